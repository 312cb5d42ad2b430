//! HTTP transport
//!
//! The dispatcher only needs "GET this URL, give me the body". Anything
//! beyond that (sockets, TLS, mirrors) lives behind the [`Transport`] trait.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::GeoNamesConfig;
use crate::error::{GeoNamesError, TransportError};

/// Per-request options passed through to the transport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Override the configured request timeout
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Options with a request timeout override
    #[must_use]
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// Fetches a fully built request URL
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a GET request and return the raw response body
    async fn fetch(&self, url: &str, options: &RequestOptions) -> Result<Bytes, TransportError>;
}

/// `reqwest`-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout_secs: u64,
}

impl HttpTransport {
    /// Create a transport from the client configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &GeoNamesConfig) -> Result<Self, GeoNamesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GeoNamesError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    fn map_send_error(&self, e: &reqwest::Error, options: &RequestOptions) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                timeout_secs: options.timeout.map_or(self.timeout_secs, |t| t.as_secs()),
            }
        } else if e.is_connect() {
            TransportError::ConnectionFailed(e.to_string())
        } else {
            TransportError::RequestFailed(e.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, url, options))]
    async fn fetch(&self, url: &str, options: &RequestOptions) -> Result<Bytes, TransportError> {
        let mut request = self.client.get(url);
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.map_send_error(&e, options))?;

        let status = response.status();
        debug!(status = %status, "Received GeoNames response");

        if status.is_server_error() {
            return Err(TransportError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(TransportError::HttpStatus {
                status: status.as_u16(),
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| self.map_send_error(&e, options))
    }
}
