//! Domain error types.

use chrono::NaiveDate;

pub type Result<T> = std::result::Result<T, StockfolioError>;

/// Top-level error type for stockfolio.
#[derive(Debug, thiserror::Error)]
pub enum StockfolioError {
    #[error("price for {code} on {date} not available")]
    PriceNotAvailable { code: String, date: NaiveDate },

    #[error("annualized return is undefined: {reason}")]
    DegenerateReturn { reason: String },

    #[error("invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("price data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StockfolioError> for std::process::ExitCode {
    fn from(err: &StockfolioError) -> Self {
        let code: u8 = match err {
            StockfolioError::Io(_) => 1,
            StockfolioError::ConfigParse { .. }
            | StockfolioError::ConfigMissing { .. }
            | StockfolioError::ConfigInvalid { .. } => 2,
            StockfolioError::Data { .. } => 3,
            StockfolioError::PriceNotAvailable { .. } | StockfolioError::InvalidDate { .. } => 4,
            StockfolioError::DegenerateReturn { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
