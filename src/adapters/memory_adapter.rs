//! In-memory price adapter.

use crate::domain::error::{Result, StockfolioError};
use crate::domain::price_series::PriceSeries;
use crate::ports::price_port::PricePort;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryAdapter {
    series: BTreeMap<String, PriceSeries>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a series under its own code, replacing any series with the same code.
    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.series.insert(series.code().to_string(), series);
        self
    }
}

impl PricePort for MemoryAdapter {
    fn fetch_series(&self, code: &str) -> Result<PriceSeries> {
        self.series
            .get(code)
            .cloned()
            .ok_or_else(|| StockfolioError::Data {
                reason: format!("no price series for {}", code),
            })
    }

    fn list_codes(&self) -> Result<Vec<String>> {
        Ok(self.series.keys().cloned().collect())
    }
}
