//! Ticker symbol definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::TickerError;

/// Symbols processed when no tickers are given.
pub const DEFAULT_TICKERS: [&str; 6] = ["AAPL", "MSFT", "GOOG", "AMZN", "NVDA", "TSLA"];

/// Returns [`DEFAULT_TICKERS`] as validated tickers.
#[must_use]
pub fn default_tickers() -> Vec<Ticker> {
    DEFAULT_TICKERS
        .iter()
        .map(|symbol| Ticker(symbol.to_string()))
        .collect()
}

/// A stock ticker symbol as given by the user (e.g. `AAPL`, `BRK-B`).
///
/// Only the characters that occur in exchange symbols are accepted, so a
/// ticker is always safe to embed in a URL path or a file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Creates a ticker, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol is empty or contains characters other
    /// than ASCII letters, digits, `.`, `-`, `^` and `=`.
    pub fn new(symbol: impl AsRef<str>) -> Result<Self, TickerError> {
        let symbol = symbol.as_ref().trim();
        if symbol.is_empty() {
            return Err(TickerError::Empty);
        }
        if let Some(ch) = symbol
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=')))
        {
            return Err(TickerError::InvalidChar {
                symbol: symbol.to_string(),
                ch,
            });
        }
        Ok(Self(symbol.to_string()))
    }

    /// Returns the symbol exactly as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the upper-cased symbol used for provider queries.
    #[must_use]
    pub fn query_symbol(&self) -> String {
        self.0.to_uppercase()
    }

    /// Returns the lower-cased symbol used in output file names.
    #[must_use]
    pub fn file_stem(&self) -> String {
        self.0.to_lowercase()
    }
}

impl FromStr for Ticker {
    type Err = TickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = TickerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
