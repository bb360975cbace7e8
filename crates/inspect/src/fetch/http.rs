//! HTTP(S) fetcher backed by `reqwest`.

use crate::consts::DEFAULT_MAX_BODY_BYTES;
use crate::error::{ErrorKind, Result};
use crate::fetch::Fetcher;
use async_trait::async_trait;
use std::time::Duration;

/// Fetches remote templates over HTTP(S).
///
/// Uses the default `reqwest` redirect policy and certificate validation.
/// Every request is bounded by the configured timeout, covering connect,
/// redirects and reading the body. Bodies are cut off after
/// [`max_body_bytes`](Self::with_max_body_bytes).
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
    max_body_bytes: u64,
}
impl HttpFetcher {
    /// Create a fetcher with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Network`](ErrorKind::Network) if the TLS backend could not
    /// be initialised.
    pub fn new(timeout: Duration, user_agent: Option<&str>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(timeout);
        if let Some(user_agent) = user_agent {
            builder = builder.user_agent(user_agent.to_string());
        }
        let client = builder.build().map_err(|e| ErrorKind::Network(e.to_string()))?;
        Ok(Self {
            client,
            timeout,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        })
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: u64) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[tracing::instrument(level = "debug", skip(self), fields(timeout = ?self.timeout))]
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("Sending HTTP GET request");
        let mut response = self.client.get(url).send().await.map_err(|e| ErrorKind::Network(e.to_string()))?;
        // Status is not checked; error pages are searched like any other body.
        tracing::debug!(status = %response.status(), "Response received");
        let limit = usize::try_from(self.max_body_bytes).unwrap_or(usize::MAX);
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| ErrorKind::ResponseRead(e.to_string()))? {
            let remaining = limit - body.len();
            if chunk.len() > remaining {
                body.extend_from_slice(&chunk[..remaining]);
                tracing::debug!(limit, "Response body truncated");
                break;
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}
