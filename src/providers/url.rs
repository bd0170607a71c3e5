//! # URL provider
//!
//! Fetches each source with an HTTP GET through one shared [`reqwest::Client`]:
//! - fixed client-wide request timeout,
//! - redirect following capped at a fixed number of hops.
//!
//! The response body is exposed as a [`ByteStream`] via `tokio_util`'s `StreamReader`.
//! The body is counted whatever the status code; dropping the stream releases the
//! connection.

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::{Client, redirect};
use tokio_util::io::StreamReader;

use crate::error::{ConfigError, ProviderError};

use super::provider::{ByteStream, ContentProvider};

/// HTTP-backed provider.
#[derive(Clone, Debug)]
pub struct UrlProvider {
    client: Client,
}

impl UrlProvider {
    /// Builds the shared client.
    ///
    /// ### Parameters
    /// - `timeout`: whole-request timeout (connect, headers and body)
    /// - `max_redirects`: redirect hops followed before failing
    pub fn new(timeout: Duration, max_redirects: usize) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::limited(max_redirects))
            .build()
            .map_err(|e| ConfigError::HttpClient {
                reason: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ContentProvider for UrlProvider {
    fn name(&self) -> &'static str {
        "url"
    }

    async fn open(&self, source: &str) -> Result<ByteStream, ProviderError> {
        if source.is_empty() {
            return Err(ProviderError::EmptySource {
                provider: self.name(),
            });
        }

        let response = self
            .client
            .get(source)
            .send()
            .await
            .map_err(|error| ProviderError::Request {
                source_name: source.to_string(),
                error,
            })?;
        tracing::debug!(source, status = %response.status(), "response received");

        let body = response.bytes_stream().map_err(io::Error::other);
        Ok(Box::pin(StreamReader::new(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> UrlProvider {
        UrlProvider::new(Duration::from_millis(200), 10).unwrap()
    }

    #[tokio::test]
    async fn test_empty_source_fails() {
        let err = provider().open("").await.err().unwrap();
        assert!(matches!(err, ProviderError::EmptySource { provider: "url" }));
    }

    #[tokio::test]
    async fn test_malformed_url_fails_as_request_error() {
        let err = provider().open("not a url").await.err().unwrap();
        assert!(matches!(err, ProviderError::Request { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_host_fails() {
        // Port 9 on loopback: nothing listens there in CI.
        let err = provider().open("http://127.0.0.1:9/").await.err().unwrap();
        assert!(matches!(err, ProviderError::Request { .. }));
    }
}
