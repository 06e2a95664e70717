#![allow(dead_code)]

use chrono::NaiveDate;
use stockfolio::domain::price_series::{PricePoint, PriceSeries};
use std::fs;
use std::path::Path;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_series(code: &str, points: &[(&str, f64)]) -> PriceSeries {
    PriceSeries::new(
        code,
        points
            .iter()
            .map(|&(d, p)| PricePoint::new(NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(), p)),
    )
}

pub fn stock_a() -> PriceSeries {
    make_series(
        "STOCKA",
        &[("2024-01-01", 100.0), ("2024-06-01", 110.0), ("2024-12-01", 115.0)],
    )
}

pub fn stock_b() -> PriceSeries {
    make_series(
        "STOCKB",
        &[("2024-01-01", 200.0), ("2024-06-01", 210.0), ("2024-12-01", 205.0)],
    )
}

/// Write `<code>.csv` with a `date,price` header into `dir`.
pub fn write_price_csv(dir: &Path, code: &str, rows: &[(&str, f64)]) {
    let mut content = String::from("date,price\n");
    for (d, p) in rows {
        content.push_str(&format!("{},{}\n", d, p));
    }
    fs::write(dir.join(format!("{}.csv", code)), content).unwrap();
}

pub fn write_example_prices(dir: &Path) {
    write_price_csv(
        dir,
        "STOCKA",
        &[("2024-01-01", 100.0), ("2024-06-01", 110.0), ("2024-12-01", 115.0)],
    );
    write_price_csv(
        dir,
        "STOCKB",
        &[("2024-01-01", 200.0), ("2024-06-01", 210.0), ("2024-12-01", 205.0)],
    );
}
