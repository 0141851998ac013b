//! Chart payload parsing.

use chrono::{DateTime, FixedOffset, NaiveDate};
use chrono_tz::Tz;
use minuteplot_types::{IntradaySeries, PricePoint, Ticker};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while reading a chart payload.
#[derive(Error, Debug)]
pub enum ResponseError {
    /// The body is not valid chart JSON.
    #[error("Invalid chart payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The provider answered with an error object.
    #[error("Provider error [{code}]: {description}")]
    Api {
        /// Provider error code (e.g. `Bad Request`).
        code: String,
        /// Provider error description.
        description: String,
    },

    /// Timestamps were returned without a close price column.
    #[error("Chart payload has timestamps but no close prices")]
    MissingClose,

    /// The close column does not line up with the timestamps.
    #[error("Chart payload has {timestamps} timestamps but {closes} close prices")]
    ColumnLength {
        /// Number of timestamps.
        timestamps: usize,
        /// Number of close prices.
        closes: usize,
    },

    /// A timestamp is outside the representable range.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    /// The exchange UTC offset is outside +/-24h.
    #[error("Invalid exchange UTC offset: {0}s")]
    InvalidOffset(i32),
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    #[serde(default)]
    indicators: Option<Indicators>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    exchange_timezone_name: Option<String>,
    #[serde(default)]
    gmtoffset: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    close: Option<Vec<Option<f64>>>,
}

/// Exchange clock used to localize timestamps.
enum ExchangeClock {
    Named(Tz),
    Fixed(FixedOffset),
}

impl ExchangeClock {
    fn localize(&self, utc: DateTime<chrono::Utc>) -> DateTime<FixedOffset> {
        match self {
            Self::Named(tz) => utc.with_timezone(tz).fixed_offset(),
            Self::Fixed(offset) => utc.with_timezone(offset),
        }
    }
}

/// Parses a chart endpoint body into a series for `ticker` on `date`.
///
/// A payload without results or without timestamps maps to an empty series.
/// Bars whose close price is null are dropped. Timestamps are converted to the
/// exchange's local clock, preferring the named timezone over the fixed
/// `gmtoffset`, which only reflects the offset in effect at query time. Only
/// bars falling on `date` in that local clock are kept.
///
/// # Errors
///
/// Returns an error if the body is not chart JSON, carries a provider error,
/// or has timestamps without a matching close column.
pub fn parse_chart(
    body: &str,
    ticker: &Ticker,
    date: NaiveDate,
) -> Result<IntradaySeries, ResponseError> {
    let envelope: ChartEnvelope = serde_json::from_str(body)?;

    if let Some(error) = envelope.chart.error {
        return Err(ResponseError::Api {
            code: error.code,
            description: error.description,
        });
    }

    let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(IntradaySeries::empty(ticker.clone(), date));
    };

    let timestamps = result.timestamp.unwrap_or_default();
    if timestamps.is_empty() {
        return Ok(IntradaySeries::empty(ticker.clone(), date));
    }

    let closes = result
        .indicators
        .and_then(|i| i.quote.into_iter().next())
        .and_then(|q| q.close)
        .ok_or(ResponseError::MissingClose)?;
    if closes.len() != timestamps.len() {
        return Err(ResponseError::ColumnLength {
            timestamps: timestamps.len(),
            closes: closes.len(),
        });
    }

    let clock = exchange_clock(&result.meta)?;

    let mut points = Vec::with_capacity(timestamps.len());
    for (ts, close) in timestamps.into_iter().zip(closes) {
        let Some(price) = close.filter(|p| p.is_finite()) else {
            continue;
        };
        let utc = DateTime::from_timestamp(ts, 0).ok_or(ResponseError::InvalidTimestamp(ts))?;
        let local = clock.localize(utc);
        if local.date_naive() == date {
            points.push(PricePoint::new(local, price));
        }
    }

    let timezone = result
        .meta
        .exchange_timezone_name
        .unwrap_or_else(|| "UTC".to_string());

    Ok(IntradaySeries::new(ticker.clone(), date, timezone, points))
}

/// Extracts a provider error object from an error-status body, if it has one.
pub(crate) fn api_error(body: &str) -> Option<ResponseError> {
    let envelope: ChartEnvelope = serde_json::from_str(body).ok()?;
    envelope.chart.error.map(|error| ResponseError::Api {
        code: error.code,
        description: error.description,
    })
}

fn exchange_clock(meta: &ChartMeta) -> Result<ExchangeClock, ResponseError> {
    if let Some(tz) = meta
        .exchange_timezone_name
        .as_deref()
        .and_then(|name| name.parse::<Tz>().ok())
    {
        return Ok(ExchangeClock::Named(tz));
    }

    let seconds = meta.gmtoffset.unwrap_or(0);
    FixedOffset::east_opt(seconds)
        .map(ExchangeClock::Fixed)
        .ok_or(ResponseError::InvalidOffset(seconds))
}
