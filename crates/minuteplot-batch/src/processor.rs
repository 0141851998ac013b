//! Single (ticker, date) processing.

use chrono::NaiveDate;
use minuteplot_fetch::{FetchError, IntradayRequest, MarketDataProvider};
use minuteplot_render::{ChartLabels, ChartRenderer, RenderError};
use minuteplot_types::Ticker;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Settings for a [`DayProcessor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// Directory charts are written to, created on first save.
    pub output_dir: PathBuf,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("plots"),
        }
    }
}

/// Result of processing one (ticker, date) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayOutcome {
    /// A chart was written to the given path.
    Saved(PathBuf),
    /// The provider had no samples for that day.
    NoData,
}

/// Errors that can occur while processing one pair.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// Fetching the series failed.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Rendering the chart failed.
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    /// Writing the chart failed.
    #[error("Cannot write {}: {source}", path.display())]
    Io {
        /// The path being created or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Returns the chart path for a pair: `{dir}/{ticker_lower}_{YYYYMMDD}.{extension}`.
///
/// ```
/// use chrono::NaiveDate;
/// use minuteplot_batch::artifact_path;
/// use minuteplot_types::Ticker;
/// use std::path::Path;
///
/// let path = artifact_path(
///     Path::new("plots"),
///     &Ticker::new("AAPL").unwrap(),
///     NaiveDate::from_ymd_opt(2023, 10, 27).unwrap(),
///     "png",
/// );
/// assert_eq!(path, Path::new("plots/aapl_20231027.png"));
/// ```
#[must_use]
pub fn artifact_path(dir: &Path, ticker: &Ticker, date: NaiveDate, extension: &str) -> PathBuf {
    dir.join(format!(
        "{}_{}.{}",
        ticker.file_stem(),
        date.format("%Y%m%d"),
        extension
    ))
}

/// Fetches, renders and saves the chart for one (ticker, date) pair.
#[derive(Debug)]
pub struct DayProcessor<P, R> {
    provider: P,
    renderer: R,
    config: ProcessorConfig,
}

impl<P, R> DayProcessor<P, R>
where
    P: MarketDataProvider,
    R: ChartRenderer,
{
    /// Creates a processor from its collaborators.
    #[must_use]
    pub const fn new(provider: P, renderer: R, config: ProcessorConfig) -> Self {
        Self {
            provider,
            renderer,
            config,
        }
    }

    /// Returns the processor configuration.
    #[must_use]
    pub const fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Returns the market data provider.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the chart renderer.
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Returns the output path used for a pair.
    #[must_use]
    pub fn path_for(&self, ticker: &Ticker, date: NaiveDate) -> PathBuf {
        artifact_path(
            &self.config.output_dir,
            ticker,
            date,
            self.renderer.extension(),
        )
    }

    /// Processes one pair.
    ///
    /// Requests the bars of `date` in exchange-local time; an empty series yields
    /// [`DayOutcome::NoData`] and writes nothing. An existing chart at the
    /// output path is overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if fetching, rendering or writing fails.
    pub fn process(&self, ticker: &Ticker, date: NaiveDate) -> Result<DayOutcome, ProcessError> {
        let request = IntradayRequest::for_day(ticker.clone(), date);
        let series = self.provider.fetch_intraday(&request)?;

        if series.is_empty() {
            info!(%ticker, %date, "no data");
            return Ok(DayOutcome::NoData);
        }
        debug!(%ticker, %date, points = series.len(), "series fetched");

        let labels = ChartLabels::for_series(&series);
        let image = self.renderer.render(&series, &labels)?;

        let path = self.path_for(ticker, date);
        self.write_artifact(&path, &image)?;
        info!(%ticker, %date, path = %path.display(), "chart saved");

        Ok(DayOutcome::Saved(path))
    }

    fn write_artifact(&self, path: &Path, bytes: &[u8]) -> Result<(), ProcessError> {
        let dir = &self.config.output_dir;
        std::fs::create_dir_all(dir).map_err(|source| ProcessError::Io {
            path: dir.clone(),
            source,
        })?;
        std::fs::write(path, bytes).map_err(|source| ProcessError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FAKE_IMAGE, FakeProvider, FakeRenderer, date, ticker};
    use tempfile::TempDir;

    fn processor(
        provider: FakeProvider,
        renderer: FakeRenderer,
        dir: &Path,
    ) -> DayProcessor<FakeProvider, FakeRenderer> {
        DayProcessor::new(
            provider,
            renderer,
            ProcessorConfig {
                output_dir: dir.join("plots"),
            },
        )
    }

    #[test]
    fn test_default_config() {
        let config = ProcessorConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("plots"));
    }

    #[test]
    fn test_artifact_path_lowercases_ticker() {
        let path = artifact_path(Path::new("out"), &ticker("BRK-B"), date(2024, 1, 5), "png");
        assert_eq!(path, Path::new("out/brk-b_20240105.png"));
    }

    #[test]
    fn test_saves_chart_for_series() {
        let temp = TempDir::new().unwrap();
        let provider = FakeProvider::new().with_session("AAPL", date(2023, 10, 27));
        let p = processor(provider, FakeRenderer::default(), temp.path());

        let outcome = p.process(&ticker("AAPL"), date(2023, 10, 27)).unwrap();

        let expected = temp.path().join("plots").join("aapl_20231027.png");
        assert_eq!(outcome, DayOutcome::Saved(expected.clone()));
        assert_eq!(std::fs::read(&expected).unwrap(), FAKE_IMAGE);

        let entries: Vec<_> = std::fs::read_dir(temp.path().join("plots"))
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_no_data_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let p = processor(FakeProvider::new(), FakeRenderer::default(), temp.path());

        let outcome = p.process(&ticker("AAPL"), date(2023, 10, 28)).unwrap();

        assert_eq!(outcome, DayOutcome::NoData);
        assert!(!temp.path().join("plots").exists());
        assert_eq!(p.renderer().calls(), 0);
    }

    #[test]
    fn test_requests_the_processed_date() {
        let temp = TempDir::new().unwrap();
        let p = processor(FakeProvider::new(), FakeRenderer::default(), temp.path());

        p.process(&ticker("MSFT"), date(2024, 2, 29)).unwrap();

        let requests = p.provider().requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.ticker, ticker("MSFT"));
        assert_eq!(request.date, date(2024, 2, 29));
        assert!(request.start < date(2024, 2, 29).and_hms_opt(0, 0, 0).unwrap().and_utc());
        assert!(request.end > date(2024, 3, 1).and_hms_opt(0, 0, 0).unwrap().and_utc());
    }

    #[test]
    fn test_overwrites_existing_chart() {
        let temp = TempDir::new().unwrap();
        let provider = FakeProvider::new().with_session("TSLA", date(2024, 1, 2));
        let p = processor(provider, FakeRenderer::default(), temp.path());

        let path = p.path_for(&ticker("TSLA"), date(2024, 1, 2));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"stale").unwrap();

        p.process(&ticker("TSLA"), date(2024, 1, 2)).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), FAKE_IMAGE);
    }

    #[test]
    fn test_fetch_error_propagates() {
        let temp = TempDir::new().unwrap();
        let provider = FakeProvider::new().failing("GOOG");
        let p = processor(provider, FakeRenderer::default(), temp.path());

        let err = p.process(&ticker("GOOG"), date(2024, 1, 2)).unwrap_err();
        assert!(matches!(
            err,
            ProcessError::Fetch(FetchError::ServerError { status: 503 })
        ));
    }

    #[test]
    fn test_render_error_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let provider = FakeProvider::new().with_session("AMZN", date(2024, 1, 2));
        let p = processor(provider, FakeRenderer::broken(), temp.path());

        let err = p.process(&ticker("AMZN"), date(2024, 1, 2)).unwrap_err();
        assert!(matches!(err, ProcessError::Render(RenderError::Draw(_))));
        assert!(!temp.path().join("plots").exists());
    }

    #[test]
    fn test_unwritable_output_dir() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("plots"), b"not a directory").unwrap();
        let provider = FakeProvider::new().with_session("NVDA", date(2024, 1, 2));
        let p = processor(provider, FakeRenderer::default(), temp.path());

        let err = p.process(&ticker("NVDA"), date(2024, 1, 2)).unwrap_err();
        assert!(matches!(err, ProcessError::Io { .. }));
    }
}
