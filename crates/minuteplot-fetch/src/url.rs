//! Chart endpoint URL construction.

use chrono::{DateTime, Utc};
use minuteplot_types::Ticker;

/// Base URL for the Yahoo Finance chart endpoint.
pub const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Bar interval requested from the endpoint.
pub const INTERVAL: &str = "1m";

/// Builds the URL for a ticker's one-minute bars between two instants.
///
/// URL format: `{base}/{SYMBOL}?period1={start}&period2={end}&interval=1m&includePrePost=false`
///
/// `period1` and `period2` are Unix seconds; the provider treats the window as
/// half-open.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use minuteplot_fetch::url::{BASE_URL, chart_url};
/// use minuteplot_types::Ticker;
///
/// let ticker = Ticker::new("aapl").unwrap();
/// let start = Utc.with_ymd_and_hms(2023, 10, 27, 0, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2023, 10, 28, 0, 0, 0).unwrap();
/// let url = chart_url(BASE_URL, &ticker, start, end);
/// assert_eq!(
///     url,
///     "https://query1.finance.yahoo.com/v8/finance/chart/AAPL?period1=1698364800&period2=1698451200&interval=1m&includePrePost=false"
/// );
/// ```
#[must_use]
pub fn chart_url(
    base: &str,
    ticker: &Ticker,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> String {
    format!(
        "{}/{}?period1={}&period2={}&interval={}&includePrePost=false",
        base.trim_end_matches('/'),
        ticker.query_symbol(),
        start.timestamp(),
        end.timestamp(),
        INTERVAL
    )
}
