//! Fetcher trait and implementations.
//!
//! The [`Inspector`](crate::Inspector) makes at most one outbound request per
//! document. It goes through the [`Fetcher`] trait so that the whole
//! inspection can run against canned responses in tests.

mod http;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use self::http::HttpFetcher;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockFetcher;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type FetcherHandle = Arc<dyn Fetcher>;

/// Retrieves the body of a remote template.
///
/// Implementations must bound the time spent on a single request; a
/// malicious host is free to never answer.
///
/// # Errors
///
/// - [`Network`](crate::error::ErrorKind::Network) if no response was received.
/// - [`ResponseRead`](crate::error::ErrorKind::ResponseRead) if the body could
///   not be read to the end.
///
/// # Examples
///
/// ```
/// use follina_inspect::Fetcher;
/// async fn is_reachable(fetcher: &dyn Fetcher, url: &str) -> bool {
///     fetcher.fetch(url).await.is_ok()
/// }
/// ```
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Perform a single GET request and return the complete response body.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
