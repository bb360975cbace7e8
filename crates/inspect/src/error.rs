//! Inspection Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. None of these escape
//! [`Inspector::inspect`](crate::Inspector::inspect); they are folded into
//! a [`Classification`](crate::Classification) at that boundary.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An inspection error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for inspection operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file does not exist or could not be read.
    #[display("cannot read file: {}", _0.display())]
    FileAccess(#[error(not(source))] PathBuf),
    /// The file is readable but isn't a zip container, so it can't be an
    /// Office Open XML document.
    #[display("not a zip archive")]
    NotAnArchive,
    /// An archive entry could not be opened or decompressed.
    #[display("cannot read archive entry: {_0}")]
    EntryRead(#[error(not(source))] String),
    /// The HTTP request failed (connection, TLS, timeout).
    #[display("request failed: {_0}")]
    Network(#[error(not(source))] String),
    /// A response arrived but its body could not be read to the end.
    #[display("cannot read response body: {_0}")]
    ResponseRead(#[error(not(source))] String),
    /// The blocking archive task panicked or was cancelled.
    #[display("inspection task failed: {_0}")]
    Task(#[error(not(source))] String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use exn::ResultExt;

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::NotAnArchive.to_string(), "not a zip archive");
        assert_eq!(
            ErrorKind::FileAccess(PathBuf::from("missing.docx")).to_string(),
            "cannot read file: missing.docx"
        );
        assert_eq!(
            ErrorKind::Network("operation timed out".to_string()).to_string(),
            "request failed: operation timed out"
        );
    }

    #[test]
    fn error_from_result() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::InvalidData, "bad header"));
        let err: Result<()> = result.or_raise(|| ErrorKind::NotAnArchive);
        assert_eq!(*err.unwrap_err(), ErrorKind::NotAnArchive);
    }
}
