//! Intraday chart data fetching for minuteplot.
//!
//! This crate provides the data retrieval side of minuteplot:
//!
//! - [`url::chart_url`] - Constructs chart endpoint URLs
//! - [`ChartClient`] - Blocking HTTP client for the chart endpoint
//! - [`parse_chart`] - Maps the chart JSON payload into an [`IntradaySeries`]
//! - [`MarketDataProvider`] - Seam between the fetch side and the rest of the pipeline
//!
//! [`IntradaySeries`]: minuteplot_types::IntradaySeries

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/minuteplot/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod parse;
mod provider;
pub mod url;

pub use client::{ChartClient, ClientConfig, FetchError};
pub use parse::{ResponseError, parse_chart};
pub use provider::{IntradayRequest, MarketDataProvider};
