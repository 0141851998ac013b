//! Per-day fetch and plot orchestration for minuteplot.
//!
//! - [`DayProcessor`] - Fetches, renders and saves one (ticker, date) pair
//! - [`artifact_path`] - Deterministic output path for a pair
//! - [`run`] - Sequential, ticker-major loop over all pairs
//! - [`RunObserver`] - Progress callbacks for the loop

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/minuteplot/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod processor;
mod run;

#[cfg(test)]
mod testing;

pub use processor::{DayOutcome, DayProcessor, ProcessError, ProcessorConfig, artifact_path};
pub use run::{RunObserver, RunSummary, SilentObserver, run};
