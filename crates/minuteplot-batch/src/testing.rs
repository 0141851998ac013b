//! Fake collaborators for processor and run tests.

use chrono::{FixedOffset, NaiveDate, TimeDelta, TimeZone};
use minuteplot_fetch::{FetchError, IntradayRequest, MarketDataProvider};
use minuteplot_render::{ChartLabels, ChartRenderer, RenderError};
use minuteplot_types::{IntradaySeries, PricePoint, Ticker};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;

pub(crate) const FAKE_IMAGE: &[u8] = b"\x89PNG fake chart";

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn ticker(symbol: &str) -> Ticker {
    Ticker::new(symbol).unwrap()
}

/// Provider serving a fixed set of (symbol, date) sessions.
#[derive(Debug, Default)]
pub(crate) struct FakeProvider {
    sessions: HashSet<(String, NaiveDate)>,
    failing: HashSet<String>,
    requests: RefCell<Vec<IntradayRequest>>,
}

impl FakeProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_session(mut self, symbol: &str, date: NaiveDate) -> Self {
        self.sessions.insert((symbol.to_string(), date));
        self
    }

    pub(crate) fn failing(mut self, symbol: &str) -> Self {
        self.failing.insert(symbol.to_string());
        self
    }

    pub(crate) fn requests(&self) -> Vec<IntradayRequest> {
        self.requests.borrow().clone()
    }
}

impl MarketDataProvider for FakeProvider {
    fn fetch_intraday(&self, request: &IntradayRequest) -> Result<IntradaySeries, FetchError> {
        self.requests.borrow_mut().push(request.clone());
        let symbol = request.ticker.as_str().to_string();

        if self.failing.contains(&symbol) {
            return Err(FetchError::ServerError { status: 503 });
        }
        if !self.sessions.contains(&(symbol, request.date)) {
            return Ok(IntradaySeries::empty(request.ticker.clone(), request.date));
        }

        let open = FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .from_local_datetime(&request.date.and_hms_opt(9, 30, 0).unwrap())
            .unwrap();
        let points = (0..390)
            .map(|i| PricePoint::new(open + TimeDelta::minutes(i), 100.0 + i as f64 * 0.01))
            .collect();
        Ok(IntradaySeries::new(
            request.ticker.clone(),
            request.date,
            "America/New_York",
            points,
        ))
    }
}

/// Renderer returning [`FAKE_IMAGE`], or failing when broken.
#[derive(Debug, Default)]
pub(crate) struct FakeRenderer {
    broken: bool,
    calls: Cell<usize>,
}

impl FakeRenderer {
    pub(crate) fn broken() -> Self {
        Self {
            broken: true,
            calls: Cell::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ChartRenderer for FakeRenderer {
    fn render(&self, series: &IntradaySeries, labels: &ChartLabels) -> Result<Vec<u8>, RenderError> {
        self.calls.set(self.calls.get() + 1);
        assert!(!series.is_empty());
        assert!(labels.title.contains(series.ticker.as_str()));
        if self.broken {
            return Err(RenderError::Draw("backend unavailable".to_string()));
        }
        Ok(FAKE_IMAGE.to_vec())
    }

    fn extension(&self) -> &str {
        "png"
    }
}
