//! Console progress output for the minuteplot CLI.

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use minuteplot_lib::prelude::*;

/// Message shown when the provider returns no samples for a day.
pub(crate) const NO_DATA_MESSAGE: &str =
    "No data found. It might be a weekend, a holiday, or an invalid ticker/date.";

/// Formats the diagnostic printed when the date argument cannot be parsed.
pub(crate) fn date_error_lines(input: &str, error: &DateSpecError) -> [String; 2] {
    [
        format!("Error parsing date '{input}': {error}"),
        format!("Please use formats: {DATE_SPEC_FORMATS}"),
    ]
}

/// Formats the line announcing the tickers of a run.
pub(crate) fn tickers_line(tickers: &[Ticker]) -> String {
    let symbols: Vec<&str> = tickers.iter().map(Ticker::as_str).collect();
    format!("Tickers to process: {}", symbols.join(", "))
}

/// Formats the header printed before each pair.
pub(crate) fn pair_header(ticker: &Ticker, date: NaiveDate) -> String {
    format!("--- Processing {ticker} for {} ---", date.format("%Y-%m-%d"))
}

/// Formats the result line for a processed pair.
pub(crate) fn outcome_line(outcome: &DayOutcome) -> String {
    match outcome {
        DayOutcome::Saved(path) => format!("Plot saved to '{}'", path.display()),
        DayOutcome::NoData => NO_DATA_MESSAGE.to_string(),
    }
}

/// Reports run progress on stdout with a progress bar on stderr.
///
/// In quiet mode nothing is printed and the bar stays hidden.
#[derive(Debug)]
pub(crate) struct ConsoleReporter {
    progress: ProgressBar,
    quiet: bool,
}

impl ConsoleReporter {
    pub(crate) fn new(quiet: bool) -> Self {
        Self {
            progress: ProgressBar::hidden(),
            quiet,
        }
    }

    /// Prints a line to stdout without tearing the bar.
    pub(crate) fn line(&self, message: &str) {
        if !self.quiet {
            self.progress.suspend(|| println!("{message}"));
        }
    }
}

impl RunObserver for ConsoleReporter {
    fn on_start(&mut self, tickers: &[Ticker], dates: &[NaiveDate]) {
        if self.quiet {
            return;
        }
        let total = (tickers.len() * dates.len()) as u64;
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} charts {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        self.progress = pb;
    }

    fn on_pair_start(&mut self, ticker: &Ticker, date: NaiveDate) {
        self.progress.set_message(format!("{ticker} {date}"));
        self.line(&pair_header(ticker, date));
    }

    fn on_pair_done(&mut self, _ticker: &Ticker, _date: NaiveDate, outcome: &DayOutcome) {
        self.line(&outcome_line(outcome));
        self.line("");
        self.progress.inc(1);
    }

    fn on_pair_failed(&mut self, ticker: &Ticker, date: NaiveDate, error: &ProcessError) {
        self.line(&format!("Error processing {ticker} for {date}: {error}"));
        self.line("");
        self.progress.inc(1);
    }

    fn on_finish(&mut self, summary: &RunSummary) {
        self.progress.finish_and_clear();
        self.line(&format!("Done: {summary}"));
    }
}
