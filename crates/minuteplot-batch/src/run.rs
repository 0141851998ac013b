//! Sequential processing of every (ticker, date) pair.

use chrono::NaiveDate;
use minuteplot_fetch::MarketDataProvider;
use minuteplot_render::ChartRenderer;
use minuteplot_types::Ticker;
use tracing::warn;

use crate::{DayOutcome, DayProcessor, ProcessError};

/// Counters for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Pairs that produced a chart.
    pub saved: usize,
    /// Pairs the provider had no data for.
    pub empty: usize,
    /// Pairs that failed.
    pub failed: usize,
}

impl RunSummary {
    /// Returns the number of pairs processed.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.saved + self.empty + self.failed
    }

    fn record(&mut self, outcome: &DayOutcome) {
        match outcome {
            DayOutcome::Saved(_) => self.saved += 1,
            DayOutcome::NoData => self.empty += 1,
        }
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} chart(s) saved, {} without data, {} failed",
            self.saved, self.empty, self.failed
        )
    }
}

/// Progress callbacks invoked by [`run`].
///
/// Every method has an empty default so observers only implement what they show.
pub trait RunObserver {
    /// Called once before the first pair.
    fn on_start(&mut self, _tickers: &[Ticker], _dates: &[NaiveDate]) {}

    /// Called before a pair is processed.
    fn on_pair_start(&mut self, _ticker: &Ticker, _date: NaiveDate) {}

    /// Called after a pair was processed successfully.
    fn on_pair_done(&mut self, _ticker: &Ticker, _date: NaiveDate, _outcome: &DayOutcome) {}

    /// Called after a pair failed.
    fn on_pair_failed(&mut self, _ticker: &Ticker, _date: NaiveDate, _error: &ProcessError) {}

    /// Called once after the last pair.
    fn on_finish(&mut self, _summary: &RunSummary) {}
}

/// Observer that reports nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl RunObserver for SilentObserver {}

/// Processes every (ticker, date) pair, ticker-major, one at a time.
///
/// All dates of the first ticker are processed before the second ticker, and
/// so on. A failing pair is logged, reported to the observer and counted; the
/// loop carries on with the next pair.
pub fn run<P, R, O>(
    tickers: &[Ticker],
    dates: &[NaiveDate],
    processor: &DayProcessor<P, R>,
    observer: &mut O,
) -> RunSummary
where
    P: MarketDataProvider,
    R: ChartRenderer,
    O: RunObserver + ?Sized,
{
    let mut summary = RunSummary::default();
    observer.on_start(tickers, dates);

    for ticker in tickers {
        for &date in dates {
            observer.on_pair_start(ticker, date);
            match processor.process(ticker, date) {
                Ok(outcome) => {
                    summary.record(&outcome);
                    observer.on_pair_done(ticker, date, &outcome);
                }
                Err(error) => {
                    warn!(%ticker, %date, %error, "pair failed");
                    summary.failed += 1;
                    observer.on_pair_failed(ticker, date, &error);
                }
            }
        }
    }

    observer.on_finish(&summary);
    summary
}
