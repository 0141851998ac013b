//! Error types for minuteplot.

use chrono::NaiveDate;
use thiserror::Error;

/// Error for invalid date ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// Start date is after end date.
    #[error("End date cannot be before start date ({end} < {start})")]
    InvalidRange {
        /// The start date.
        start: NaiveDate,
        /// The end date.
        end: NaiveDate,
    },
}

/// Errors produced while parsing a date specifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateSpecError {
    /// A segment is not a valid `YYYYMMDD`-style calendar date.
    #[error("'{segment}' is not a valid date (expected {expected})")]
    InvalidDate {
        /// The offending segment of the input.
        segment: String,
        /// The layout that segment was parsed against.
        expected: &'static str,
    },

    /// The end segment has a length other than 2, 4 or 8.
    #[error("End of date range has an unsupported format ({0} characters)")]
    UnsupportedEndLength(usize),

    /// The resolved range runs backwards.
    #[error(transparent)]
    Range(#[from] DateRangeError),
}

/// Errors produced while validating a ticker symbol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TickerError {
    /// The symbol is empty after trimming.
    #[error("Ticker symbol cannot be empty")]
    Empty,

    /// The symbol contains a character that cannot appear in a symbol.
    #[error("Ticker symbol '{symbol}' contains invalid character '{ch}'")]
    InvalidChar {
        /// The rejected symbol.
        symbol: String,
        /// The first invalid character.
        ch: char,
    },
}
