//! CSV file price adapter. One `<CODE>.csv` per instrument with a `date,price` header.

use crate::domain::dates::parse_date;
use crate::domain::error::{Result, StockfolioError};
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::ports::price_port::PricePort;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, code: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", code))
    }
}

impl PricePort for CsvAdapter {
    fn fetch_series(&self, code: &str) -> Result<PriceSeries> {
        let path = self.csv_path(code);
        let content = fs::read_to_string(&path).map_err(|e| StockfolioError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut points = Vec::new();

        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| StockfolioError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;
            // header is line 1
            let line = row + 2;

            let date_str = record.get(0).ok_or_else(|| StockfolioError::Data {
                reason: format!("{}:{}: missing date column", path.display(), line),
            })?;
            let date = parse_date(date_str).map_err(|e| StockfolioError::Data {
                reason: format!("{}:{}: {}", path.display(), line, e),
            })?;

            let price: f64 = record
                .get(1)
                .ok_or_else(|| StockfolioError::Data {
                    reason: format!("{}:{}: missing price column", path.display(), line),
                })?
                .trim()
                .parse()
                .map_err(|e| StockfolioError::Data {
                    reason: format!("{}:{}: invalid price value: {}", path.display(), line, e),
                })?;
            if !price.is_finite() || price < 0.0 {
                return Err(StockfolioError::Data {
                    reason: format!(
                        "{}:{}: price must be a non-negative number, got {}",
                        path.display(),
                        line,
                        price
                    ),
                });
            }

            points.push(PricePoint::new(date, price));
        }

        tracing::debug!(code, rows = points.len(), path = %path.display(), "loaded price file");
        Ok(PriceSeries::new(code, points))
    }

    fn list_codes(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| StockfolioError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut codes = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| StockfolioError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(code) = name_str.strip_suffix(".csv") {
                if !code.is_empty() {
                    codes.push(code.to_string());
                }
            }
        }

        codes.sort();
        Ok(codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        fs::write(
            path.join("STOCKA.csv"),
            "date,price\n2024-01-01,100\n2024-06-01,110\n2024-12-01,115\n",
        )
        .unwrap();
        fs::write(
            path.join("STOCKB.csv"),
            "date,price\n2024-01-01,200.0\n2024-06-01,210.0\n2024-12-01,205.0\n",
        )
        .unwrap();
        fs::write(path.join("notes.txt"), "not a price file").unwrap();

        (dir, path)
    }

    #[test]
    fn fetch_series_reads_prices() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let series = adapter.fetch_series("STOCKA").unwrap();
        assert_eq!(series.code(), "STOCKA");
        assert_eq!(series.len(), 3);
        assert_eq!(series.price(date(2024, 6, 1)).unwrap(), 110.0);
    }

    #[test]
    fn fetch_series_missing_file_is_data_error() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let err = adapter.fetch_series("XYZ").unwrap_err();
        assert!(matches!(err, StockfolioError::Data { .. }));
    }

    #[test]
    fn fetch_series_keeps_last_duplicate() {
        let (_dir, path) = setup_test_data();
        fs::write(
            path.join("DUP.csv"),
            "date,price\n2024-01-01,1.0\n2024-01-01,2.0\n",
        )
        .unwrap();
        let adapter = CsvAdapter::new(path);

        let series = adapter.fetch_series("DUP").unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.price(date(2024, 1, 1)).unwrap(), 2.0);
    }

    #[test]
    fn fetch_series_rejects_bad_date() {
        let (_dir, path) = setup_test_data();
        fs::write(path.join("BAD.csv"), "date,price\n01/02/2024,1.0\n").unwrap();
        let adapter = CsvAdapter::new(path);

        let err = adapter.fetch_series("BAD").unwrap_err();
        match err {
            StockfolioError::Data { reason } => assert!(reason.contains(":2:"), "{reason}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn fetch_series_rejects_negative_price() {
        let (_dir, path) = setup_test_data();
        fs::write(path.join("NEG.csv"), "date,price\n2024-01-01,-5\n").unwrap();
        let adapter = CsvAdapter::new(path);

        assert!(matches!(
            adapter.fetch_series("NEG").unwrap_err(),
            StockfolioError::Data { .. }
        ));
    }

    #[test]
    fn fetch_series_rejects_non_numeric_price() {
        let (_dir, path) = setup_test_data();
        fs::write(path.join("NAN.csv"), "date,price\n2024-01-01,abc\n").unwrap();
        let adapter = CsvAdapter::new(path);

        assert!(adapter.fetch_series("NAN").is_err());
    }

    #[test]
    fn list_codes_returns_csv_stems() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        assert_eq!(adapter.list_codes().unwrap(), vec!["STOCKA", "STOCKB"]);
    }

    #[test]
    fn list_codes_missing_directory() {
        let adapter = CsvAdapter::new(PathBuf::from("/nonexistent/stockfolio/data"));
        assert!(adapter.list_codes().is_err());
    }
}
