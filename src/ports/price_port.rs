//! Price data access port trait.

use crate::domain::error::Result;
use crate::domain::price_series::PriceSeries;

pub trait PricePort {
    /// Load the full price history for `code`.
    fn fetch_series(&self, code: &str) -> Result<PriceSeries>;

    /// Codes this source can serve, sorted.
    fn list_codes(&self) -> Result<Vec<String>>;
}
