//! Rendering abstraction.

use minuteplot_types::IntradaySeries;
use thiserror::Error;

/// Errors that can occur during rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    /// There is nothing to draw.
    #[error("Cannot render an empty series")]
    EmptySeries,

    /// The canvas size is unusable.
    #[error("Invalid chart size: {width}x{height}")]
    InvalidSize {
        /// Canvas width in pixels.
        width: u32,
        /// Canvas height in pixels.
        height: u32,
    },

    /// The drawing backend failed.
    #[error("Drawing error: {0}")]
    Draw(String),

    /// Image encoding failed.
    #[error("Encoding error: {0}")]
    Encode(String),
}

/// Text drawn around a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLabels {
    /// Chart caption.
    pub title: String,
    /// Horizontal axis description.
    pub x_label: String,
    /// Vertical axis description.
    pub y_label: String,
    /// Legend entry for the price line.
    pub legend: String,
}

impl ChartLabels {
    /// Builds the standard labels for a series.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use minuteplot_render::ChartLabels;
    /// use minuteplot_types::{IntradaySeries, Ticker};
    ///
    /// let series = IntradaySeries::new(
    ///     Ticker::new("AAPL").unwrap(),
    ///     NaiveDate::from_ymd_opt(2023, 10, 27).unwrap(),
    ///     "America/New_York",
    ///     Vec::new(),
    /// );
    /// let labels = ChartLabels::for_series(&series);
    /// assert_eq!(labels.title, "AAPL Stock Price per Minute (2023-10-27)");
    /// ```
    #[must_use]
    pub fn for_series(series: &IntradaySeries) -> Self {
        let timezone = if series.timezone.is_empty() {
            "UTC"
        } else {
            series.timezone.as_str()
        };
        Self {
            title: format!(
                "{} Stock Price per Minute ({})",
                series.ticker,
                series.date.format("%Y-%m-%d")
            ),
            x_label: format!("Time of Day (Exchange Time - {timezone})"),
            y_label: "Price (USD)".to_string(),
            legend: format!("{} Intraday Price", series.ticker),
        }
    }
}

/// Trait for chart renderers.
pub trait ChartRenderer {
    /// Renders the series and returns the encoded image.
    ///
    /// Drawing state lives only for the duration of the call.
    ///
    /// # Errors
    ///
    /// Returns an error if the series is empty or drawing/encoding fails.
    fn render(&self, series: &IntradaySeries, labels: &ChartLabels) -> Result<Vec<u8>, RenderError>;

    /// Returns the file extension for the encoded image.
    fn extension(&self) -> &str;
}

impl<R: ChartRenderer + ?Sized> ChartRenderer for &R {
    fn render(&self, series: &IntradaySeries, labels: &ChartLabels) -> Result<Vec<u8>, RenderError> {
        (**self).render(series, labels)
    }

    fn extension(&self) -> &str {
        (**self).extension()
    }
}
