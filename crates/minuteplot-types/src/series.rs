//! Intraday price series representation.

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

use crate::Ticker;

/// A single closing-price sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Sample timestamp in exchange-local time.
    pub timestamp: DateTime<FixedOffset>,
    /// Closing price of the bar.
    pub price: f64,
}

impl PricePoint {
    /// Creates a new price point.
    #[must_use]
    pub const fn new(timestamp: DateTime<FixedOffset>, price: f64) -> Self {
        Self { timestamp, price }
    }

    /// Returns seconds elapsed since exchange-local midnight.
    #[must_use]
    pub fn seconds_of_day(&self) -> u32 {
        self.timestamp.time().num_seconds_from_midnight()
    }
}

/// One trading day of price samples for a single ticker.
///
/// An empty series means the provider had nothing for that day (weekend,
/// holiday, unknown symbol).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradaySeries {
    /// The ticker the samples belong to.
    pub ticker: Ticker,
    /// The calendar date that was requested.
    pub date: NaiveDate,
    /// Exchange timezone name reported by the provider (e.g. `America/New_York`).
    pub timezone: String,
    /// Samples ordered by timestamp.
    pub points: Vec<PricePoint>,
}

impl IntradaySeries {
    /// Creates a series, sorting the samples by timestamp.
    #[must_use]
    pub fn new(
        ticker: Ticker,
        date: NaiveDate,
        timezone: impl Into<String>,
        mut points: Vec<PricePoint>,
    ) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self {
            ticker,
            date,
            timezone: timezone.into(),
            points,
        }
    }

    /// Creates an empty series for a day without data.
    #[must_use]
    pub fn empty(ticker: Ticker, date: NaiveDate) -> Self {
        Self {
            ticker,
            date,
            timezone: String::new(),
            points: Vec::new(),
        }
    }

    /// Returns true if the series has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns the lowest and highest price, or None when empty.
    #[must_use]
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        self.points.iter().map(|p| p.price).fold(None, |acc, price| {
            Some(match acc {
                None => (price, price),
                Some((lo, hi)) => (lo.min(price), hi.max(price)),
            })
        })
    }

    /// Returns the first and last sample times as seconds since local midnight.
    #[must_use]
    pub fn time_bounds(&self) -> Option<(u32, u32)> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        Some((first.seconds_of_day(), last.seconds_of_day()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn eastern(h: u32, m: u32) -> DateTime<FixedOffset> {
        FixedOffset::west_opt(4 * 3600)
            .unwrap()
            .with_ymd_and_hms(2023, 10, 27, h, m, 0)
            .unwrap()
    }

    fn series(points: Vec<PricePoint>) -> IntradaySeries {
        IntradaySeries::new(
            Ticker::new("AAPL").unwrap(),
            NaiveDate::from_ymd_opt(2023, 10, 27).unwrap(),
            "America/New_York",
            points,
        )
    }

    #[test]
    fn test_points_sorted_on_creation() {
        let s = series(vec![
            PricePoint::new(eastern(9, 31), 168.5),
            PricePoint::new(eastern(9, 30), 168.2),
        ]);
        assert_eq!(s.points[0].timestamp, eastern(9, 30));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_price_bounds() {
        let s = series(vec![
            PricePoint::new(eastern(9, 30), 168.2),
            PricePoint::new(eastern(9, 31), 167.9),
            PricePoint::new(eastern(9, 32), 168.7),
        ]);
        assert_eq!(s.price_bounds(), Some((167.9, 168.7)));
    }

    #[test]
    fn test_time_bounds_use_exchange_clock() {
        let s = series(vec![
            PricePoint::new(eastern(9, 30), 1.0),
            PricePoint::new(eastern(15, 59), 1.0),
        ]);
        assert_eq!(s.time_bounds(), Some((9 * 3600 + 1800, 15 * 3600 + 59 * 60)));
    }

    #[test]
    fn test_empty_series() {
        let s = IntradaySeries::empty(
            Ticker::new("AAPL").unwrap(),
            NaiveDate::from_ymd_opt(2023, 10, 28).unwrap(),
        );
        assert!(s.is_empty());
        assert_eq!(s.price_bounds(), None);
        assert_eq!(s.time_bounds(), None);
    }
}
