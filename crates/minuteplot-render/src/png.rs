//! PNG line chart renderer.

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use minuteplot_types::IntradaySeries;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::ops::Range;
use tracing::debug;

use crate::{ChartLabels, ChartRenderer, RenderError};

/// Smallest canvas that still leaves room for the plot area.
pub const MIN_SIZE: (u32, u32) = (200, 150);

/// Largest canvas accepted on either axis.
pub const MAX_SIDE: u32 = 10_000;

/// Canvas settings for [`PngRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Price line width in pixels.
    pub line_width: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 700,
            line_width: 2,
        }
    }
}

/// Renders a close-price line chart into an in-memory bitmap and encodes it as PNG.
#[derive(Debug, Clone, Default)]
pub struct PngRenderer {
    config: RenderConfig,
}

impl PngRenderer {
    /// Creates a renderer with the given canvas settings.
    #[must_use]
    pub const fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Returns the canvas settings.
    #[must_use]
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn draw(
        &self,
        pixels: &mut [u8],
        series: &IntradaySeries,
        labels: &ChartLabels,
        time_range: Range<f64>,
        price_range: Range<f64>,
    ) -> Result<(), RenderError> {
        let size = (self.config.width, self.config.height);
        let root = BitMapBackend::with_buffer(pixels, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&labels.title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d(time_range, price_range)
            .map_err(draw_error)?;

        // Mesh lines double as the grid.
        chart
            .configure_mesh()
            .x_desc(labels.x_label.as_str())
            .y_desc(labels.y_label.as_str())
            .x_labels(12)
            .x_label_formatter(&|secs: &f64| format_time_of_day(*secs))
            .y_label_formatter(&|price: &f64| format!("{price:.2}"))
            .draw()
            .map_err(draw_error)?;

        let line = BLUE.stroke_width(self.config.line_width);
        chart
            .draw_series(LineSeries::new(
                series
                    .points
                    .iter()
                    .map(|p| (f64::from(p.seconds_of_day()), p.price)),
                line,
            ))
            .map_err(draw_error)?
            .label(labels.legend.as_str())
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_error)?;

        root.present().map_err(draw_error)?;
        Ok(())
    }
}

impl ChartRenderer for PngRenderer {
    fn render(&self, series: &IntradaySeries, labels: &ChartLabels) -> Result<Vec<u8>, RenderError> {
        let RenderConfig { width, height, .. } = self.config;
        let len = buffer_len(width, height).ok_or(RenderError::InvalidSize { width, height })?;

        let time_range = time_axis(series).ok_or(RenderError::EmptySeries)?;
        let price_range = price_axis(series).ok_or(RenderError::EmptySeries)?;

        // Dropped at the end of this call whatever the outcome.
        let mut pixels = vec![0u8; len];
        self.draw(&mut pixels, series, labels, time_range, price_range)?;

        let png = encode_png(&pixels, width, height)?;
        debug!(
            ticker = %series.ticker,
            points = series.len(),
            bytes = png.len(),
            "chart rendered"
        );
        Ok(png)
    }

    fn extension(&self) -> &str {
        "png"
    }
}

/// RGB buffer size for a canvas, or None when the size is out of bounds.
fn buffer_len(width: u32, height: u32) -> Option<usize> {
    let (min_width, min_height) = MIN_SIZE;
    if !(min_width..=MAX_SIDE).contains(&width) || !(min_height..=MAX_SIDE).contains(&height) {
        return None;
    }
    usize::try_from(width)
        .ok()?
        .checked_mul(usize::try_from(height).ok()?)?
        .checked_mul(3)
}

fn draw_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Draw(err.to_string())
}

fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(pixels, width, height, ColorType::Rgb8)
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    Ok(bytes)
}

/// Horizontal extent in seconds since exchange-local midnight.
///
/// A single sample is widened by a minute either side.
fn time_axis(series: &IntradaySeries) -> Option<Range<f64>> {
    let (first, last) = series.time_bounds()?;
    let (first, last) = (f64::from(first), f64::from(last));
    if last > first {
        Some(first..last)
    } else {
        Some((first - 60.0).max(0.0)..last + 60.0)
    }
}

/// Vertical extent with 5% padding; flat series get 1% of the price.
fn price_axis(series: &IntradaySeries) -> Option<Range<f64>> {
    let (lo, hi) = series.price_bounds()?;
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        (lo.abs() * 0.01).max(0.01)
    };
    Some(lo - pad..hi + pad)
}

/// Formats seconds since midnight as `HH:MM`.
fn format_time_of_day(secs: f64) -> String {
    let total = secs.round().max(0.0) as u32;
    format!("{:02}:{:02}", total / 3600, (total / 60) % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{FixedOffset, NaiveDate, TimeZone};
    use minuteplot_types::{PricePoint, Ticker};

    fn point(h: u32, m: u32, price: f64) -> PricePoint {
        let ts = FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 2, h, m, 0)
            .unwrap();
        PricePoint::new(ts, price)
    }

    fn series(points: Vec<PricePoint>) -> IntradaySeries {
        IntradaySeries::new(
            Ticker::new("MSFT").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            "America/New_York",
            points,
        )
    }

    #[test]
    fn test_render_config_default() {
        let config = RenderConfig::default();
        assert_eq!((config.width, config.height), (1500, 700));
        assert_eq!(PngRenderer::default().config(), &config);
    }

    #[test]
    fn test_time_axis_spans_session() {
        let s = series(vec![point(9, 30, 370.0), point(16, 0, 372.0)]);
        let range = time_axis(&s).unwrap();
        assert_relative_eq!(range.start, 34_200.0);
        assert_relative_eq!(range.end, 57_600.0);
    }

    #[test]
    fn test_time_axis_single_point() {
        let s = series(vec![point(9, 30, 370.0)]);
        let range = time_axis(&s).unwrap();
        assert_relative_eq!(range.start, 34_140.0);
        assert_relative_eq!(range.end, 34_260.0);
    }

    #[test]
    fn test_price_axis_padding() {
        let s = series(vec![point(9, 30, 100.0), point(9, 31, 110.0)]);
        let range = price_axis(&s).unwrap();
        assert_relative_eq!(range.start, 99.5);
        assert_relative_eq!(range.end, 110.5);
    }

    #[test]
    fn test_price_axis_flat_series() {
        let s = series(vec![point(9, 30, 200.0), point(9, 31, 200.0)]);
        let range = price_axis(&s).unwrap();
        assert_relative_eq!(range.start, 198.0);
        assert_relative_eq!(range.end, 202.0);
    }

    #[test]
    fn test_format_time_of_day() {
        assert_eq!(format_time_of_day(34_200.0), "09:30");
        assert_eq!(format_time_of_day(57_599.6), "16:00");
        assert_eq!(format_time_of_day(-5.0), "00:00");
    }

    #[test]
    fn test_empty_series_rejected() {
        let renderer = PngRenderer::default();
        let s = series(Vec::new());
        let labels = ChartLabels::for_series(&s);
        assert!(matches!(
            renderer.render(&s, &labels),
            Err(RenderError::EmptySeries)
        ));
    }

    #[test]
    fn test_tiny_canvas_rejected() {
        let renderer = PngRenderer::new(RenderConfig {
            width: 10,
            height: 10,
            line_width: 1,
        });
        let s = series(vec![point(9, 30, 1.0)]);
        let labels = ChartLabels::for_series(&s);
        assert!(matches!(
            renderer.render(&s, &labels),
            Err(RenderError::InvalidSize {
                width: 10,
                height: 10
            })
        ));
    }

    #[test]
    fn test_huge_canvas_rejected() {
        let renderer = PngRenderer::new(RenderConfig {
            width: u32::MAX,
            height: u32::MAX,
            line_width: 1,
        });
        let s = series(vec![point(9, 30, 1.0)]);
        let labels = ChartLabels::for_series(&s);
        assert!(matches!(
            renderer.render(&s, &labels),
            Err(RenderError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_buffer_len_bounds() {
        assert_eq!(buffer_len(1500, 700), Some(1500 * 700 * 3));
        assert_eq!(buffer_len(MAX_SIDE, MAX_SIDE), Some(300_000_000));
        assert_eq!(buffer_len(MAX_SIDE + 1, 700), None);
        assert_eq!(buffer_len(1500, MAX_SIDE + 1), None);
        assert_eq!(buffer_len(199, 700), None);
        assert_eq!(buffer_len(1500, 149), None);
    }

    #[test]
    fn test_encode_png_signature() {
        let pixels = vec![255u8; 4 * 3 * 3];
        let png = encode_png(&pixels, 4, 3).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_extension() {
        assert_eq!(PngRenderer::default().extension(), "png");
    }
}
