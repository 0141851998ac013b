//! Core types for the minuteplot intraday chart generator.
//!
//! This crate provides the fundamental data structures used throughout minuteplot:
//!
//! - [`DateRange`] - Inclusive range of calendar dates
//! - [`parse_date_spec`] - Compact date specifier parser (`20231023-27`, ...)
//! - [`Ticker`] - Stock ticker symbol
//! - [`PricePoint`] and [`IntradaySeries`] - One trading day of price samples

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/minuteplot/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod date_range;
mod date_spec;
mod error;
mod series;
mod ticker;

pub use date_range::{DateRange, DayIterator};
pub use date_spec::{DATE_SPEC_FORMATS, parse_date_spec};
pub use error::{DateRangeError, DateSpecError, TickerError};
pub use series::{IntradaySeries, PricePoint};
pub use ticker::{DEFAULT_TICKERS, Ticker, default_tickers};
