//! minuteplot CLI - per-minute intraday stock price charts.

use anyhow::{Context, Result};
use clap::Parser;
use minuteplot_lib::prelude::*;
use minuteplot_lib::{MAX_SIDE, MIN_SIZE};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod display;

use display::{ConsoleReporter, date_error_lines, tickers_line};

#[derive(Debug, Parser)]
#[command(name = "minuteplot")]
#[command(about = "Plot per-minute stock prices for a date or date range", long_about = None)]
#[command(version)]
struct Cli {
    /// Date or range: YYYYMMDD, YYYYMMDD-DD, YYYYMMDD-MMDD or YYYYMMDD-YYYYMMDD
    date: String,

    /// Ticker symbols to plot
    #[arg(long, num_args = 1.., default_values_t = default_tickers())]
    tickers: Vec<Ticker>,

    /// Directory charts are written to
    #[arg(short, long, default_value = "plots")]
    output_dir: PathBuf,

    /// Chart width in pixels
    #[arg(long, default_value = "1500", value_parser = canvas_side(MIN_SIZE.0))]
    width: u32,

    /// Chart height in pixels
    #[arg(long, default_value = "700", value_parser = canvas_side(MIN_SIZE.1))]
    height: u32,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn processor(&self) -> Result<DayProcessor<ChartClient, PngRenderer>> {
        let client = ChartClient::new(ClientConfig {
            timeout: Duration::from_secs(self.timeout),
            ..Default::default()
        })
        .context("Failed to create HTTP client")?;

        let renderer = PngRenderer::new(RenderConfig {
            width: self.width,
            height: self.height,
            ..Default::default()
        });

        let config = ProcessorConfig {
            output_dir: self.output_dir.clone(),
        };

        Ok(DayProcessor::new(client, renderer, config))
    }
}

/// Accepts a canvas side between `min` and [`MAX_SIDE`] pixels.
fn canvas_side(min: u32) -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(i64::from(min)..=i64::from(MAX_SIDE))
}

/// Maps the `-v` count to a default filter directive.
const fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let range = match parse_date_spec(&cli.date) {
        Ok(range) => range,
        Err(e) => {
            for line in date_error_lines(&cli.date, &e) {
                println!("{line}");
            }
            return Ok(ExitCode::FAILURE);
        }
    };
    let dates: Vec<_> = range.days().collect();

    let mut reporter = ConsoleReporter::new(cli.quiet);
    reporter.line(&tickers_line(&cli.tickers));
    reporter.line(&format!("Date(s) to process: {}", cli.date));
    reporter.line("");

    let processor = cli.processor()?;
    let summary = run(&cli.tickers, &dates, &processor, &mut reporter);
    tracing::debug!(%summary, "run finished");

    Ok(ExitCode::SUCCESS)
}
