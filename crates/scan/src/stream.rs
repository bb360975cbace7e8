use crate::error::ErrorKind;
use crate::summary::{Summary, SummaryBuilder};
use crate::walk::walk;
use async_stream::stream;
use follina_inspect::{Inspector, ScanResult};
use futures::{Stream, StreamExt};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::pin::pin;
use tokio::fs;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Descend into directories given as targets.
    pub recursive: bool,
}

#[derive(Debug)]
pub enum ScanEvent {
    Started,
    /// A target (or something inside a walked directory) could not be
    /// accessed. The scan continues with the next path.
    AccessError { path: PathBuf, message: String },
    /// A directory was given but recursion is disabled.
    SkippedDirectory(PathBuf),
    /// The file was already inspected during this run under another name
    /// (repeated argument, symbolic link, overlapping directories).
    Duplicate(PathBuf),
    Inspected(Box<ScanResult>),
    Complete(Summary),
}

/// Scans `targets` one file at a time.
///
/// Targets are handled in the order given. Files are inspected directly,
/// directories are walked depth-first if [`ScanOptions::recursive`] is set
/// and reported as [`ScanEvent::SkippedDirectory`] otherwise. Every file is
/// inspected at most once per run, keyed by its canonical path.
///
/// Nothing here is fatal: problems with one path become events and the scan
/// carries on. The final event is always [`ScanEvent::Complete`].
pub fn scan<'a>(
    inspector: &'a Inspector,
    targets: &'a [PathBuf],
    options: ScanOptions,
) -> impl Stream<Item = ScanEvent> + 'a {
    stream! {
        yield ScanEvent::Started;
        let mut summary = SummaryBuilder::default();
        let mut seen = HashSet::new();
        for target in targets {
            let metadata = match fs::metadata(target).await {
                Ok(metadata) => metadata,
                Err(e) => {
                    summary.access_error();
                    let message = ErrorKind::from_io(e, target).to_string();
                    yield ScanEvent::AccessError { path: target.clone(), message };
                    continue;
                },
            };
            if !metadata.is_dir() {
                yield visit(inspector, &mut seen, &mut summary, target).await;
                continue;
            }
            if !options.recursive {
                yield ScanEvent::SkippedDirectory(target.clone());
                continue;
            }
            tracing::debug!(directory = %target.display(), "Walking directory");
            for await item in walk(target.clone()) {
                match item {
                    Ok(path) => yield visit(inspector, &mut seen, &mut summary, &path).await,
                    Err(e) => {
                        summary.access_error();
                        yield ScanEvent::AccessError { path: e.path().to_path_buf(), message: (*e).to_string() };
                    },
                }
            }
        }
        yield ScanEvent::Complete(summary.finish());
    }
}

/// Drives [`scan`] to completion, discarding intermediate events.
pub async fn run(inspector: &Inspector, targets: &[PathBuf], options: ScanOptions) -> Summary {
    let mut events = pin!(scan(inspector, targets, options));
    let mut summary = Summary::default();
    while let Some(event) = events.next().await {
        if let ScanEvent::Complete(complete) = event {
            summary = complete;
        }
    }
    summary
}

async fn visit(
    inspector: &Inspector,
    seen: &mut HashSet<PathBuf>,
    summary: &mut SummaryBuilder,
    path: &Path,
) -> ScanEvent {
    let canonical = fs::canonicalize(path).await.unwrap_or_else(|_| path.to_path_buf());
    if !seen.insert(canonical) {
        tracing::debug!(path = %path.display(), "Already inspected during this run");
        return ScanEvent::Duplicate(path.to_path_buf());
    }
    let result = inspector.inspect(path).await;
    summary.record(&result);
    ScanEvent::Inspected(Box::new(result))
}
