//! Rust library for fetching and charting intraday stock prices.
//!
//! This is a facade crate that re-exports functionality from the minuteplot
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```no_run
//! use minuteplot_lib::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let range = parse_date_spec("20231023-27")?;
//!     let dates: Vec<_> = range.days().collect();
//!     let tickers = vec![Ticker::new("AAPL")?];
//!
//!     let processor = DayProcessor::new(
//!         ChartClient::with_defaults()?,
//!         PngRenderer::default(),
//!         ProcessorConfig::default(),
//!     );
//!
//!     let summary = run(&tickers, &dates, &processor, &mut SilentObserver);
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/minuteplot/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use minuteplot_types::*;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use minuteplot_fetch::{
    ChartClient, ClientConfig, FetchError, IntradayRequest, MarketDataProvider, ResponseError,
    parse_chart,
};

// Re-export rendering
#[cfg(feature = "render")]
pub use minuteplot_render::{
    ChartLabels, ChartRenderer, MAX_SIDE, MIN_SIZE, PngRenderer, RenderConfig, RenderError,
};

// Re-export batch processing
#[cfg(feature = "batch")]
pub use minuteplot_batch::{
    DayOutcome, DayProcessor, ProcessError, ProcessorConfig, RunObserver, RunSummary,
    SilentObserver, artifact_path, run,
};

/// Prelude module for convenient imports.
///
/// ```
/// use minuteplot_lib::prelude::*;
/// ```
pub mod prelude {
    pub use minuteplot_types::{
        DATE_SPEC_FORMATS, DEFAULT_TICKERS, DateRange, DateSpecError, IntradaySeries,
        PricePoint, Ticker, default_tickers, parse_date_spec,
    };

    #[cfg(feature = "fetch")]
    pub use minuteplot_fetch::{ChartClient, ClientConfig, MarketDataProvider};

    #[cfg(feature = "render")]
    pub use minuteplot_render::{ChartRenderer, PngRenderer, RenderConfig};

    #[cfg(feature = "batch")]
    pub use minuteplot_batch::{
        DayOutcome, DayProcessor, ProcessError, ProcessorConfig, RunObserver, RunSummary,
        SilentObserver, run,
    };
}
