//! In-memory fetcher for testing.

use crate::error::{ErrorKind, Result};
use crate::fetch::Fetcher;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Clone, Debug)]
enum Response {
    Body(Vec<u8>),
    NetworkError(String),
    ReadError(String),
}

/// In-memory fetcher for testing.
///
/// Serves canned bodies (or canned failures) per URL and records every
/// request it receives, so tests can assert that no request was made at
/// all. Unknown URLs fail with [`Network`](ErrorKind::Network), same as an
/// unreachable host would.
///
/// # Examples
///
/// ```ignore
/// use follina_inspect::Fetcher;
/// use follina_inspect::fetch::MockFetcher;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let fetcher = MockFetcher::default()
///     .with_body("http://evil.example/x.html", "<script>ms-msdt:/id PCWDiagnostic</script>")
///     .with_network_error("http://down.example/y.html", "operation timed out");
/// assert!(fetcher.fetch("http://evil.example/x.html").await.is_ok());
/// assert!(fetcher.fetch("http://down.example/y.html").await.is_err());
/// assert_eq!(fetcher.requests().await.len(), 2);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MockFetcher {
    responses: HashMap<String, Response>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.into(), Response::Body(body.into()));
        self
    }

    pub fn with_network_error(mut self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses.insert(url.into(), Response::NetworkError(message.into()));
        self
    }

    pub fn with_read_error(mut self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses.insert(url.into(), Response::ReadError(message.into()));
        self
    }

    /// Every URL requested so far, in order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.lock().await.push(url.to_string());
        match self.responses.get(url) {
            Some(Response::Body(body)) => Ok(body.clone()),
            Some(Response::NetworkError(message)) => exn::bail!(ErrorKind::Network(message.clone())),
            Some(Response::ReadError(message)) => exn::bail!(ErrorKind::ResponseRead(message.clone())),
            None => exn::bail!(ErrorKind::Network(format!("no mock response for {url}"))),
        }
    }
}
