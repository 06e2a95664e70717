//! Core domain types and logic.

pub mod dates;
pub mod error;
pub mod portfolio;
pub mod price_series;
pub mod returns;
