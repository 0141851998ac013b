//! Chart rendering for minuteplot.
//!
//! This crate turns an [`IntradaySeries`] into image bytes:
//!
//! - [`ChartRenderer`] - Rendering abstraction
//! - [`ChartLabels`] - Title, axis and legend text for one chart
//! - [`PngRenderer`] - Bitmap line chart encoded as PNG
//!
//! [`IntradaySeries`]: minuteplot_types::IntradaySeries

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/minuteplot/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod png;
mod renderer;

pub use png::{MAX_SIDE, MIN_SIZE, PngRenderer, RenderConfig};
pub use renderer::{ChartLabels, ChartRenderer, RenderError};
