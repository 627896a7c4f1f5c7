// src/services/fetcher.rs

//! Lookup fetcher.
//!
//! Performs exactly one outbound GET per lookup (or none in mock mode) and
//! always answers with a [`ResultEnvelope`]: transport failures are folded
//! into error envelopes instead of being returned as `Err`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, LookupRequest, ResultEnvelope};
use crate::services::MockSource;
use crate::utils::http;

/// Something that can answer a lookup.
#[async_trait]
pub trait LookupSource: Send + Sync {
    /// Perform the lookup. Never fails; failures are carried in the envelope.
    async fn lookup(&self, request: &LookupRequest) -> ResultEnvelope;
}

/// Live lookup source talking to the remote API.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    error_for_status: bool,
}

impl HttpSource {
    /// Create a source with a client built from the API settings.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self::with_client(
            http::create_client(config)?,
            config.error_for_status,
        ))
    }

    /// Create a source around an existing client.
    pub fn with_client(client: Client, error_for_status: bool) -> Self {
        Self {
            client,
            error_for_status,
        }
    }

    /// Fetch and normalize, keeping any known status code alongside a failure.
    async fn try_lookup(
        &self,
        request: &LookupRequest,
    ) -> std::result::Result<ResultEnvelope, (AppError, Option<u16>)> {
        let url = http::build_url(request).map_err(|e| {
            (
                AppError::transport(format!("invalid base URL {:?}: {}", request.base_url(), e)),
                None,
            )
        })?;

        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(request.timeout_secs()))
            .send()
            .await
            .map_err(|e| {
                let status = e.status().map(|s| s.as_u16());
                (describe(e, request.timeout_secs()), status)
            })?;

        let status = response.status();
        if self.error_for_status && !status.is_success() {
            return Err((
                AppError::transport(format!("server answered {}", status)),
                Some(status.as_u16()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| (describe(e, request.timeout_secs()), Some(status.as_u16())))?;

        Ok(ResultEnvelope::from_body(&body, Some(status.as_u16())))
    }
}

#[async_trait]
impl LookupSource for HttpSource {
    async fn lookup(&self, request: &LookupRequest) -> ResultEnvelope {
        log::info!("GET {}", http::redacted_url(request));

        match self.try_lookup(request).await {
            Ok(envelope) => {
                log::debug!(
                    "Lookup for {:?} answered with status {:?}",
                    request.term(),
                    envelope.status_code()
                );
                envelope
            }
            Err((error, status)) => {
                log::warn!("Lookup for {:?} failed: {}", request.term(), error);
                ResultEnvelope::failure(error.to_string(), status)
            }
        }
    }
}

/// Dispatches a lookup to the live or the mock source.
#[derive(Debug, Clone)]
pub struct Fetcher {
    http: HttpSource,
    mock: MockSource,
}

impl Fetcher {
    /// Create a fetcher for the given API settings.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self::from_source(HttpSource::new(config)?))
    }

    /// Create a fetcher around an existing live source.
    pub fn from_source(http: HttpSource) -> Self {
        Self {
            http,
            mock: MockSource::new(),
        }
    }

    /// Look `request` up. In mock mode no network call is made.
    pub async fn fetch(&self, request: &LookupRequest, mock_mode: bool) -> ResultEnvelope {
        let source: &dyn LookupSource = if mock_mode { &self.mock } else { &self.http };
        source.lookup(request).await
    }
}

/// One-shot lookup with a default client.
pub async fn fetch(request: &LookupRequest, mock_mode: bool) -> ResultEnvelope {
    if mock_mode {
        return MockSource::new().lookup(request).await;
    }
    match Fetcher::new(&ApiConfig::default()) {
        Ok(fetcher) => fetcher.fetch(request, false).await,
        Err(e) => ResultEnvelope::failure(e.to_string(), None),
    }
}

/// Turn a reqwest failure into a readable transport error.
///
/// The URL is stripped first: it carries the API key.
fn describe(error: reqwest::Error, timeout_secs: u64) -> AppError {
    let error = error.without_url();
    if error.is_timeout() {
        AppError::transport(format!("request timed out after {}s", timeout_secs))
    } else if error.is_connect() {
        AppError::transport(format!("could not connect: {}", error))
    } else {
        AppError::transport(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::MOCK_STATUS;

    fn request(base: &str, term: &str) -> LookupRequest {
        LookupRequest::new(term, base, "key", "k", "term", 1).unwrap()
    }

    #[tokio::test]
    async fn mock_mode_never_touches_the_network() {
        // Nothing listens on this address; a real call would fail.
        let req = request("http://127.0.0.1:9/", "12345");
        let envelope = fetch(&req, true).await;

        assert_eq!(envelope.status_code(), Some(MOCK_STATUS));
        assert_eq!(envelope.data()["mobile"], "12345");
    }

    #[tokio::test]
    async fn malformed_base_url_becomes_error_envelope() {
        let fetcher = Fetcher::new(&ApiConfig::default()).unwrap();
        let envelope = fetcher.fetch(&request("::not a url::", "1"), false).await;

        assert!(envelope.is_error());
        assert_eq!(envelope.status_code(), None);
        assert!(envelope.error().unwrap().contains("invalid base URL"));
    }

    #[tokio::test]
    async fn connection_failure_becomes_error_envelope() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let req = request(&format!("http://{}/", addr), "1");
        let envelope = fetch(&req, false).await;

        assert!(envelope.is_error());
        assert_eq!(envelope.status_code(), None);
        assert!(!envelope.error().unwrap().contains("key=k"));
    }
}
