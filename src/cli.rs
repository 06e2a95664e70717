//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::memory_adapter::MemoryAdapter;
use crate::domain::dates::parse_date;
use crate::domain::error::{Result, StockfolioError};
use crate::domain::portfolio::{HoldingProfit, Portfolio};
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::ports::config_port::ConfigPort;
use crate::ports::price_port::PricePort;

pub const PORTFOLIO_SECTION: &str = "portfolio";

#[derive(Parser, Debug)]
#[command(name = "stockfolio", about = "Portfolio profit and annualized return calculator")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report profit and annualized return for a portfolio of CSV price files
    Report {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Comma-separated instrument codes
        #[arg(long)]
        codes: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Look up one instrument's price on a date
    Price {
        #[arg(long)]
        data_dir: PathBuf,
        #[arg(long)]
        code: String,
        #[arg(long)]
        date: String,
    },
    /// List instrument codes available in a data directory
    Codes {
        #[arg(long)]
        data_dir: PathBuf,
    },
    /// Run the built-in two-stock example
    Demo {
        #[arg(long, default_value = "2024-01-01")]
        start: String,
        #[arg(long, default_value = "2024-12-01")]
        end: String,
    },
}

/// Resolved inputs for a portfolio report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub data_dir: PathBuf,
    pub codes: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Everything printed for one portfolio query.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub holdings: Vec<HoldingProfit>,
    pub profit: f64,
    pub annualized_return: f64,
}

/// Command-line values layered over an optional config file.
pub struct OverrideConfig<'a> {
    base: Option<&'a dyn ConfigPort>,
    overrides: HashMap<(String, String), String>,
}

impl<'a> OverrideConfig<'a> {
    pub fn new(base: Option<&'a dyn ConfigPort>) -> Self {
        Self {
            base,
            overrides: HashMap::new(),
        }
    }

    pub fn set(&mut self, section: &str, key: &str, value: Option<String>) {
        if let Some(value) = value {
            self.overrides
                .insert((section.to_string(), key.to_string()), value);
        }
    }
}

impl ConfigPort for OverrideConfig<'_> {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.overrides
            .get(&(section.to_string(), key.to_string()))
            .cloned()
            .or_else(|| self.base.and_then(|b| b.get_string(section, key)))
    }
}

pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Report {
            config,
            data_dir,
            codes,
            start,
            end,
        } => run_report(config.as_deref(), data_dir, codes, start, end),
        Command::Price {
            data_dir,
            code,
            date,
        } => run_price(data_dir, &code, &date),
        Command::Codes { data_dir } => run_codes(data_dir),
        Command::Demo { start, end } => run_demo(&start, &end),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter> {
    FileConfigAdapter::from_file(path).map_err(|e| StockfolioError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn fail(err: StockfolioError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(&err)
}

fn run_report(
    config_path: Option<&Path>,
    data_dir: Option<PathBuf>,
    codes: Option<String>,
    start: Option<String>,
    end: Option<String>,
) -> ExitCode {
    let file_config = match config_path {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            match load_config(path) {
                Ok(a) => Some(a),
                Err(e) => return fail(e),
            }
        }
        None => None,
    };

    let mut config = OverrideConfig::new(file_config.as_ref().map(|c| c as &dyn ConfigPort));
    config.set(
        PORTFOLIO_SECTION,
        "data_dir",
        data_dir.map(|p| p.display().to_string()),
    );
    config.set(PORTFOLIO_SECTION, "codes", codes);
    config.set(PORTFOLIO_SECTION, "start_date", start);
    config.set(PORTFOLIO_SECTION, "end_date", end);

    let report_config = match build_report_config(&config) {
        Ok(c) => c,
        Err(e) => return fail(e),
    };

    let adapter = CsvAdapter::new(report_config.data_dir.clone());
    match report_from_port(
        &adapter,
        &report_config.codes,
        report_config.start_date,
        report_config.end_date,
    ) {
        Ok(report) => {
            print!("{}", render_report(&report));
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

pub fn build_report_config(config: &dyn ConfigPort) -> Result<ReportConfig> {
    let data_dir = config
        .get_string(PORTFOLIO_SECTION, "data_dir")
        .ok_or_else(|| missing("data_dir"))?;

    let codes = config
        .get_list(PORTFOLIO_SECTION, "codes")
        .ok_or_else(|| missing("codes"))?;
    if codes.is_empty() {
        return Err(StockfolioError::ConfigInvalid {
            section: PORTFOLIO_SECTION.into(),
            key: "codes".into(),
            reason: "no instrument codes given".into(),
        });
    }

    let start_date = config_date(config, "start_date")?;
    let end_date = config_date(config, "end_date")?;

    Ok(ReportConfig {
        data_dir: PathBuf::from(data_dir),
        codes,
        start_date,
        end_date,
    })
}

fn missing(key: &str) -> StockfolioError {
    StockfolioError::ConfigMissing {
        section: PORTFOLIO_SECTION.into(),
        key: key.into(),
    }
}

fn config_date(config: &dyn ConfigPort, key: &str) -> Result<NaiveDate> {
    let raw = config
        .get_string(PORTFOLIO_SECTION, key)
        .ok_or_else(|| missing(key))?;
    parse_date(&raw).map_err(|e| StockfolioError::ConfigInvalid {
        section: PORTFOLIO_SECTION.into(),
        key: key.into(),
        reason: e.to_string(),
    })
}

/// Fetch each code's series, in order. The first failure aborts.
pub fn load_series(port: &dyn PricePort, codes: &[String]) -> Result<Vec<PriceSeries>> {
    codes
        .iter()
        .map(|code| {
            tracing::info!("Loading prices for {}", code);
            port.fetch_series(code)
        })
        .collect()
}

pub fn build_report(
    portfolio: &Portfolio<'_>,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<PortfolioReport> {
    let holdings = portfolio.holding_profits(start_date, end_date)?;
    let profit = portfolio.profit(start_date, end_date)?;
    let annualized_return = portfolio.annualized_return(start_date, end_date)?;
    Ok(PortfolioReport {
        start_date,
        end_date,
        holdings,
        profit,
        annualized_return,
    })
}

pub fn report_from_port(
    port: &dyn PricePort,
    codes: &[String],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<PortfolioReport> {
    let series = load_series(port, codes)?;
    let portfolio = Portfolio::new(series.iter().collect());
    tracing::info!(
        "Computing {} holdings from {} to {}",
        portfolio.len(),
        start_date,
        end_date
    );
    build_report(&portfolio, start_date, end_date)
}

pub fn render_report(report: &PortfolioReport) -> String {
    let mut out = String::new();
    for h in &report.holdings {
        let _ = writeln!(
            out,
            "{:<10} {:>12.2} -> {:>12.2}  profit {:>12.2}",
            h.code, h.start_price, h.end_price, h.profit
        );
    }
    let _ = writeln!(
        out,
        "Profit from {} to {}: {:.2}",
        report.start_date, report.end_date, report.profit
    );
    let _ = writeln!(
        out,
        "Annualized Return from {} to {}: {:.2}%",
        report.start_date,
        report.end_date,
        report.annualized_return * 100.0
    );
    out
}

fn run_price(data_dir: PathBuf, code: &str, date: &str) -> ExitCode {
    let date = match parse_date(date) {
        Ok(d) => d,
        Err(e) => return fail(e),
    };
    let adapter = CsvAdapter::new(data_dir);
    match adapter.fetch_series(code).and_then(|s| s.price(date)) {
        Ok(price) => {
            println!("{} {}: {:.2}", code, date, price);
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn run_codes(data_dir: PathBuf) -> ExitCode {
    let adapter = CsvAdapter::new(data_dir.clone());
    let codes = match adapter.list_codes() {
        Ok(c) => c,
        Err(e) => return fail(e),
    };
    if codes.is_empty() {
        eprintln!("No price files found in {}", data_dir.display());
        return ExitCode::SUCCESS;
    }
    for code in &codes {
        match adapter.fetch_series(code) {
            Ok(series) => match (series.first_date(), series.last_date()) {
                (Some(first), Some(last)) => {
                    println!("{}: {} to {} ({} prices)", code, first, last, series.len())
                }
                _ => println!("{}: no prices", code),
            },
            Err(e) => return fail(e),
        }
    }
    ExitCode::SUCCESS
}

/// Two instruments with three observations each.
pub fn demo_adapter() -> Result<MemoryAdapter> {
    let dates = [
        parse_date("2024-01-01")?,
        parse_date("2024-06-01")?,
        parse_date("2024-12-01")?,
    ];
    let points = |prices: [f64; 3]| -> Vec<PricePoint> {
        dates
            .iter()
            .zip(prices)
            .map(|(&date, price)| PricePoint::new(date, price))
            .collect()
    };
    Ok(MemoryAdapter::new()
        .with_series(PriceSeries::new("STOCKA", points([100.0, 110.0, 115.0])))
        .with_series(PriceSeries::new("STOCKB", points([200.0, 210.0, 205.0]))))
}

fn run_demo(start: &str, end: &str) -> ExitCode {
    let (start_date, end_date) = match parse_date(start).and_then(|s| Ok((s, parse_date(end)?))) {
        Ok(dates) => dates,
        Err(e) => return fail(e),
    };
    let adapter = match demo_adapter() {
        Ok(a) => a,
        Err(e) => return fail(e),
    };
    let codes = match adapter.list_codes() {
        Ok(c) => c,
        Err(e) => return fail(e),
    };
    match report_from_port(&adapter, &codes, start_date, end_date) {
        Ok(report) => {
            print!("{}", render_report(&report));
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}
