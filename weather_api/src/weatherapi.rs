//! Client for the upstream current-conditions endpoint.
//!
//! The API key travels in the query string, so nothing in here may log or
//! return a URL. Transport errors are stripped of theirs before they leave
//! this module.

use std::{fmt::Write as _, time::Duration};

use redact::Secret;
use reqwest::{StatusCode, Url};
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1/current.json";
pub const DEFAULT_LOCATION: &str = "29203";

const FALLBACK_MESSAGE: &str = "Failed to fetch weather data";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("invalid weather API URL: {0}")]
    InvalidUrl(String),
    #[error("failed to build HTTP client: {}", describe(.0))]
    Client(reqwest::Error),
    /// No response was received, including timeouts.
    #[error("{}", describe(.0))]
    Network(reqwest::Error),
    /// The upstream answered with a non-2xx status.
    #[error("API Error: {}", status_text(.0))]
    Upstream(StatusCode),
    /// The upstream answered 2xx but the body is not JSON.
    #[error("failed to parse weather data: {}", describe(.0))]
    Decode(reqwest::Error),
}

impl WeatherError {
    /// The message placed in the `error` field of the response body.
    #[must_use]
    pub fn message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }

    /// Status used when failures are reported with HTTP error codes.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Network(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::Network(_) | Self::Upstream(_) | Self::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::InvalidUrl(_) | Self::Client(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// The standard reason phrase for the code. reqwest does not expose the
// phrase the upstream sent, and HTTP/2 responses carry none.
fn status_text(status: &StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_str().to_string(), ToString::to_string)
}

// reqwest keeps the interesting part of an error in its source chain
fn describe(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);

    while let Some(cause) = source {
        let _ = write!(message, ": {cause}");
        source = cause.source();
    }

    message
}

/// Location and air-quality flag sent with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamQuery {
    pub location: String,
    pub aqi: bool,
}

impl UpstreamQuery {
    fn aqi_flag(&self) -> &'static str {
        if self.aqi { "yes" } else { "no" }
    }
}

impl Default for UpstreamQuery {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            aqi: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherSettings {
    pub base_url: String,
    pub api_key: Secret<String>,
    /// `None` leaves outbound calls unbounded.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Secret<String>,
}

impl WeatherClient {
    /// Builds a client for the endpoint at `settings.base_url`.
    ///
    /// # Errors
    ///
    /// * `WeatherError::InvalidUrl` - the base URL does not parse.
    /// * `WeatherError::Client` - the HTTP client cannot be built.
    pub fn new(settings: &WeatherSettings) -> Result<Self, WeatherError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|e| WeatherError::InvalidUrl(e.to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(WeatherError::Client)?;

        Ok(Self {
            http,
            base_url,
            api_key: settings.api_key.clone(),
        })
    }

    /// The full request URL, including the API key.
    #[must_use]
    pub fn current_url(&self, query: &UpstreamQuery) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("key", self.api_key.expose_secret())
            .append_pair("q", &query.location)
            .append_pair("aqi", query.aqi_flag());
        url
    }

    /// Fetches current conditions and returns the upstream JSON untouched.
    ///
    /// Exactly one request is made; nothing is retried.
    ///
    /// # Errors
    ///
    /// * `WeatherError::Network` - no response was received.
    /// * `WeatherError::Upstream` - the response status is not 2xx.
    /// * `WeatherError::Decode` - the response body is not JSON.
    pub async fn current(
        &self,
        query: &UpstreamQuery,
    ) -> Result<Value, WeatherError> {
        let response = self
            .http
            .get(self.current_url(query))
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Upstream(status));
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                WeatherError::Decode(e.without_url())
            } else {
                WeatherError::Network(e.without_url())
            }
        })
    }
}
