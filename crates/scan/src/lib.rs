//! Run-level driving of the [`Inspector`](follina_inspect::Inspector).
//!
//! Turns the paths given on the command-line into a stream of
//! [`ScanEvent`]s: files are inspected in argument order, directories are
//! walked depth-first when recursion is enabled, and every result is folded
//! into a [`Summary`] that is handed out once the run is complete.

pub mod error;
mod stream;
mod summary;
mod walk;

pub use crate::stream::{ScanEvent, ScanOptions, run, scan};
pub use crate::summary::{Summary, SummaryBuilder};
