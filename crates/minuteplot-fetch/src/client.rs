//! HTTP client for the chart endpoint.

use minuteplot_types::IntradaySeries;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::parse::{api_error, parse_chart};
use crate::url::{BASE_URL, chart_url};
use crate::{IntradayRequest, MarketDataProvider, ResponseError};

/// Configuration for the chart client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Chart endpoint base URL.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            // The endpoint rejects requests without a browser-like agent.
            user_agent: format!(
                "Mozilla/5.0 (X11; Linux x86_64) minuteplot/{}",
                env!("CARGO_PKG_VERSION")
            ),
        }
    }
}

/// Errors that can occur while fetching a series.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error status without a chart error payload.
    #[error("Server error: {status}")]
    ServerError {
        /// HTTP status code.
        status: u16,
    },

    /// The response could not be read as a chart.
    #[error(transparent)]
    Response(#[from] ResponseError),
}

/// Blocking HTTP client for the chart endpoint.
///
/// One request is made per call; failed requests are not retried.
#[derive(Debug, Clone)]
pub struct ChartClient {
    client: Client,
    config: ClientConfig,
}

impl ChartClient {
    /// Creates a new chart client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Downloads a chart body.
    ///
    /// Returns `Ok(None)` if the symbol is unknown (404).
    fn download(&self, url: &str) -> Result<Option<String>, FetchError> {
        let response = self.client.get(url).send()?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response.text()?;
        if !status.is_success() {
            return Err(api_error(&body).map_or(
                FetchError::ServerError {
                    status: status.as_u16(),
                },
                FetchError::Response,
            ));
        }

        Ok(Some(body))
    }
}

impl MarketDataProvider for ChartClient {
    fn fetch_intraday(&self, request: &IntradayRequest) -> Result<IntradaySeries, FetchError> {
        let url = chart_url(
            &self.config.base_url,
            &request.ticker,
            request.start,
            request.end,
        );
        debug!(%url, "requesting chart");

        let Some(body) = self.download(&url)? else {
            info!(ticker = %request.ticker, "symbol not found");
            return Ok(IntradaySeries::empty(
                request.ticker.clone(),
                request.date,
            ));
        };

        let series = parse_chart(&body, &request.ticker, request.date)?;
        debug!(
            ticker = %request.ticker,
            date = %request.date,
            points = series.len(),
            "chart parsed"
        );
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert!(config.user_agent.contains("minuteplot/"));
    }

    #[test]
    fn test_client_creation() {
        let client = ChartClient::with_defaults();
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_keeps_config() {
        let config = ClientConfig {
            timeout: Duration::from_secs(5),
            ..Default::default()
        };
        let client = ChartClient::new(config).unwrap();
        assert_eq!(client.config().timeout, Duration::from_secs(5));
    }
}
