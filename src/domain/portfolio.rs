//! Portfolio aggregation: value, profit, and annualized return across holdings.

use chrono::NaiveDate;

use super::error::Result;
use super::price_series::PriceSeries;
use super::returns::{annualize, elapsed_days};

/// Profit of one holding between two dates.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingProfit {
    pub code: String,
    pub start_price: f64,
    pub end_price: f64,
    pub profit: f64,
}

/// A set of borrowed price series aggregated by summation.
#[derive(Debug, Clone, Default)]
pub struct Portfolio<'a> {
    holdings: Vec<&'a PriceSeries>,
}

impl<'a> Portfolio<'a> {
    pub fn new(holdings: Vec<&'a PriceSeries>) -> Self {
        Portfolio { holdings }
    }

    pub fn holdings(&self) -> &[&'a PriceSeries] {
        &self.holdings
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Sum of every holding's price on `date`. Fails on the first holding
    /// without a price for that date.
    pub fn value_at(&self, date: NaiveDate) -> Result<f64> {
        self.holdings.iter().map(|series| series.price(date)).sum()
    }

    /// Total value on `end` minus total value on `start`.
    pub fn profit(&self, start: NaiveDate, end: NaiveDate) -> Result<f64> {
        let start_value = self.value_at(start)?;
        let end_value = self.value_at(end)?;
        Ok(end_value - start_value)
    }

    /// Per-holding profit between two dates, in holding order.
    pub fn holding_profits(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<HoldingProfit>> {
        self.holdings
            .iter()
            .map(|series| {
                let start_price = series.price(start)?;
                let end_price = series.price(end)?;
                Ok(HoldingProfit {
                    code: series.code().to_string(),
                    start_price,
                    end_price,
                    profit: end_price - start_price,
                })
            })
            .collect()
    }

    /// Realized return between `start` and `end` scaled to a 365-day year.
    pub fn annualized_return(&self, start: NaiveDate, end: NaiveDate) -> Result<f64> {
        let profit = self.profit(start, end)?;
        let start_value = self.value_at(start)?;
        let days = elapsed_days(start, end);
        tracing::debug!(%start, %end, profit, start_value, days, "annualizing portfolio return");
        annualize(profit, start_value, days)
    }
}
