//! HTTP client for the Shorty API.
//!
//! One function per endpoint, no retries, no local state. Non-success statuses
//! become [`ClientError::Http`] with the response body (or a synthesized message)
//! so the caller can show it verbatim.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::api::dto::{LinkItem, ShortenBody, ShortenResponse, StatsResponse};
use crate::config::Config;
use crate::domain::entities::{LinkStats, LinkSummary, ShortenRequest, ShortenResult};
use crate::error::ClientError;

/// Remote operations the controllers depend on.
///
/// # Implementations
///
/// - [`HttpApiClient`] - reqwest-backed client for a running server
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortyApi: Send + Sync {
    /// Fetches the full link listing in server order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on a non-success status,
    /// [`ClientError::Transport`] if the server is unreachable and
    /// [`ClientError::Decode`] if the body is not a listing.
    async fn list_links(&self) -> Result<Vec<LinkSummary>, ClientError>;

    /// Fetches analytics for one code. The code is percent-encoded into the path.
    ///
    /// # Errors
    ///
    /// Same contract as [`ShortyApi::list_links`]; an unknown code surfaces as
    /// [`ClientError::Http`] with status 404.
    async fn get_stats(&self, code: &str) -> Result<LinkStats, ClientError>;

    /// Creates a short link.
    ///
    /// # Errors
    ///
    /// Same contract as [`ShortyApi::list_links`]; server-side validation and
    /// conflicts arrive as [`ClientError::Http`] (400/409) with the server's text.
    async fn create_short_link(
        &self,
        request: &ShortenRequest,
    ) -> Result<ShortenResult, ClientError>;
}

/// reqwest-backed [`ShortyApi`].
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApiClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if `base_url` is not an absolute
    /// http(s) URL, or [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url.trim())
            .map_err(|e| ClientError::validation("api_url", format!("Invalid API URL: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::validation(
                "api_url",
                "API URL must start with http:// or https://",
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("shorty-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from the loaded configuration.
    ///
    /// # Errors
    ///
    /// See [`HttpApiClient::new`].
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(&config.api_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and decodes a JSON success body into `T`.
    ///
    /// Records one request counter and one latency sample per call.
    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let started = Instant::now();
        let result = Self::send_and_decode(request).await;
        let elapsed = started.elapsed();

        metrics::counter!(
            "shorty_api_requests_total",
            "endpoint" => endpoint,
            "outcome" => outcome_label(&result)
        )
        .increment(1);
        metrics::histogram!("shorty_api_request_duration_seconds", "endpoint" => endpoint)
            .record(elapsed.as_secs_f64());

        match &result {
            Ok(_) => debug!(
                endpoint,
                elapsed_ms = elapsed.as_millis() as u64,
                "API request succeeded"
            ),
            Err(e) => warn!(
                endpoint,
                status = ?e.status(),
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "API request failed"
            ),
        }

        result
    }

    async fn send_and_decode<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::http(status.as_u16(), body));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn outcome_label<T>(result: &Result<T, ClientError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(ClientError::Http { .. }) => "http_error",
        Err(ClientError::Transport(_)) => "transport_error",
        Err(ClientError::Decode(_)) => "decode_error",
        Err(ClientError::Validation { .. }) => "validation_error",
    }
}

#[async_trait]
impl ShortyApi for HttpApiClient {
    async fn list_links(&self) -> Result<Vec<LinkSummary>, ClientError> {
        let request = self.http.get(self.endpoint("/api/urls"));
        let items: Vec<LinkItem> = self.execute("list_links", request).await?;

        Ok(items.into_iter().map(LinkSummary::from).collect())
    }

    async fn get_stats(&self, code: &str) -> Result<LinkStats, ClientError> {
        let code = code.trim();
        let path = format!("/api/urls/{}/stats", urlencoding::encode(code));
        let request = self.http.get(self.endpoint(&path));
        let resp: StatsResponse = self.execute("get_stats", request).await?;

        Ok(resp.into_stats(code))
    }

    async fn create_short_link(
        &self,
        request: &ShortenRequest,
    ) -> Result<ShortenResult, ClientError> {
        let body = ShortenBody::from(request);
        let request = self.http.post(self.endpoint("/api/shorten")).json(&body);
        let resp: ShortenResponse = self.execute("create_short_link", request).await?;

        Ok(resp.into())
    }
}
