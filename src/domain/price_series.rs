//! Per-instrument date to price table.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::error::{Result, StockfolioError};

/// A single (date, price) observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        PricePoint { date, price }
    }
}

/// Historical prices for one instrument, at most one price per date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    code: String,
    prices: BTreeMap<NaiveDate, f64>,
}

impl PriceSeries {
    /// Build a series from observations in order. A later observation for a
    /// date already seen replaces the earlier one.
    pub fn new<I>(code: impl Into<String>, observations: I) -> Self
    where
        I: IntoIterator<Item = PricePoint>,
    {
        let code = code.into();
        let mut prices = BTreeMap::new();
        for point in observations {
            if let Some(previous) = prices.insert(point.date, point.price) {
                tracing::debug!(
                    code = %code,
                    date = %point.date,
                    previous,
                    price = point.price,
                    "duplicate date, keeping later price"
                );
            }
        }
        PriceSeries { code, prices }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Price recorded for exactly `date`.
    pub fn price(&self, date: NaiveDate) -> Result<f64> {
        self.prices
            .get(&date)
            .copied()
            .ok_or_else(|| StockfolioError::PriceNotAvailable {
                code: self.code.clone(),
                date,
            })
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Stored dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.prices.keys().copied()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.prices.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.prices.keys().next_back().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stock_a() -> PriceSeries {
        PriceSeries::new(
            "STOCKA",
            vec![
                PricePoint::new(date(2024, 1, 1), 100.0),
                PricePoint::new(date(2024, 6, 1), 110.0),
                PricePoint::new(date(2024, 12, 1), 115.0),
            ],
        )
    }

    #[test]
    fn price_returns_stored_value() {
        let series = stock_a();
        assert_eq!(series.price(date(2024, 1, 1)).unwrap(), 100.0);
        assert_eq!(series.price(date(2024, 6, 1)).unwrap(), 110.0);
        assert_eq!(series.price(date(2024, 12, 1)).unwrap(), 115.0);
    }

    #[test]
    fn missing_date_is_price_not_available() {
        let series = stock_a();
        let err = series.price(date(2024, 3, 1)).unwrap_err();
        assert!(matches!(
            err,
            StockfolioError::PriceNotAvailable { ref code, date: d }
                if code == "STOCKA" && d == date(2024, 3, 1)
        ));
    }

    #[test]
    fn no_nearest_date_fallback() {
        let series = stock_a();
        assert!(series.price(date(2024, 1, 2)).is_err());
        assert!(series.price(date(2023, 12, 31)).is_err());
    }

    #[test]
    fn duplicate_date_last_write_wins() {
        let series = PriceSeries::new(
            "DUP",
            vec![
                PricePoint::new(date(2024, 1, 1), 100.0),
                PricePoint::new(date(2024, 1, 2), 101.0),
                PricePoint::new(date(2024, 1, 1), 99.5),
            ],
        );
        assert_eq!(series.len(), 2);
        assert_eq!(series.price(date(2024, 1, 1)).unwrap(), 99.5);
    }

    #[test]
    fn empty_series() {
        let series = PriceSeries::new("EMPTY", Vec::new());
        assert!(series.is_empty());
        assert_eq!(series.first_date(), None);
        assert_eq!(series.last_date(), None);
        assert!(series.price(date(2024, 1, 1)).is_err());
    }

    #[test]
    fn dates_are_sorted_regardless_of_input_order() {
        let series = PriceSeries::new(
            "UNSORTED",
            vec![
                PricePoint::new(date(2024, 12, 1), 3.0),
                PricePoint::new(date(2024, 1, 1), 1.0),
                PricePoint::new(date(2024, 6, 1), 2.0),
            ],
        );
        let dates: Vec<_> = series.dates().collect();
        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 6, 1), date(2024, 12, 1)]);
        assert_eq!(series.first_date(), Some(date(2024, 1, 1)));
        assert_eq!(series.last_date(), Some(date(2024, 12, 1)));
    }
}
