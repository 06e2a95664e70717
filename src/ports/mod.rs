//! Port traits for price data and configuration access.

pub mod config_port;
pub mod price_port;
