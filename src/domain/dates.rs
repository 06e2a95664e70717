//! Calendar date parsing at the input boundary.

use chrono::NaiveDate;

use super::error::{Result, StockfolioError};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`). Surrounding whitespace is ignored.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        StockfolioError::InvalidDate {
            value: value.to_string(),
        }
    })
}
