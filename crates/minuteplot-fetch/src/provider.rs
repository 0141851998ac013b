//! Market data provider abstraction.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use minuteplot_types::{IntradaySeries, Ticker};

use crate::FetchError;

/// A request for one ticker's one-minute bars on one exchange-local date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntradayRequest {
    /// The ticker to fetch.
    pub ticker: Ticker,
    /// The exchange-local calendar date to keep.
    pub date: NaiveDate,
    /// Query window start (inclusive).
    pub start: DateTime<Utc>,
    /// Query window end (exclusive).
    pub end: DateTime<Utc>,
}

impl IntradayRequest {
    /// Creates a request for `date`.
    ///
    /// The query window is `[date-1 00:00, date+2 00:00)` UTC, which contains
    /// the whole of `date` for any exchange offset between UTC-12 and UTC+14.
    /// Samples falling on another exchange-local date are dropped when the
    /// payload is parsed.
    #[must_use]
    pub fn for_day(ticker: Ticker, date: NaiveDate) -> Self {
        let midnight = date.and_time(NaiveTime::MIN).and_utc();
        let start = midnight
            .checked_sub_signed(TimeDelta::days(1))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let end = midnight
            .checked_add_signed(TimeDelta::days(2))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            ticker,
            date,
            start,
            end,
        }
    }
}

/// Source of intraday price series.
pub trait MarketDataProvider {
    /// Fetches the bars described by `request`.
    ///
    /// A day without data is returned as an empty series, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be reached or answers with
    /// something other than a chart payload.
    fn fetch_intraday(&self, request: &IntradayRequest) -> Result<IntradaySeries, FetchError>;
}

impl<P: MarketDataProvider + ?Sized> MarketDataProvider for &P {
    fn fetch_intraday(&self, request: &IntradayRequest) -> Result<IntradaySeries, FetchError> {
        (**self).fetch_intraday(request)
    }
}
