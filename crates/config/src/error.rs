//! Configuration Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An explicitly requested configuration file does not exist.
    #[display("configuration file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// A configuration source could not be parsed or has unknown keys.
    #[display("cannot load configuration: {_0}")]
    Load(#[error(not(source))] String),
    /// Configuration parsed fine, but a value is out of range.
    #[display("invalid value for '{field}': {reason}")]
    Invalid {
        /// The offending configuration key.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        let invalid = ErrorKind::Invalid {
            field: "timeout_secs",
            reason: "must be at least one second".to_string(),
        };
        assert_eq!(invalid.to_string(), "invalid value for 'timeout_secs': must be at least one second");
        assert_eq!(
            ErrorKind::NotFound(PathBuf::from("follina.toml")).to_string(),
            "configuration file not found: follina.toml"
        );
    }
}
