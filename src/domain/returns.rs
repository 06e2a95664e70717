//! Return arithmetic.

use chrono::NaiveDate;

use super::error::{Result, StockfolioError};

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Whole calendar days from `start` to `end`. Negative when `end` precedes `start`.
pub fn elapsed_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Scale a single-period gain on `start_value` to a 365-day compounding rate:
/// `(1 + profit / start_value) ^ (365 / days) - 1`.
///
/// Zero `start_value`, zero `days`, and non-finite results are reported as
/// [`StockfolioError::DegenerateReturn`] rather than returned as NaN or infinity.
pub fn annualize(profit: f64, start_value: f64, days: i64) -> Result<f64> {
    if start_value == 0.0 {
        return Err(StockfolioError::DegenerateReturn {
            reason: "total start value is zero".into(),
        });
    }
    if days == 0 {
        return Err(StockfolioError::DegenerateReturn {
            reason: "start and end dates are the same".into(),
        });
    }

    let growth = 1.0 + profit / start_value;
    let annualized = growth.powf(DAYS_PER_YEAR / days as f64) - 1.0;
    if !annualized.is_finite() {
        return Err(StockfolioError::DegenerateReturn {
            reason: format!("growth factor {growth} over {days} days has no real annualized rate"),
        });
    }
    Ok(annualized)
}
