//! Depth-first directory walking.

use crate::error::{ErrorKind, Result};
use async_stream::stream;
use futures::Stream;
use std::path::{Path, PathBuf};
use tokio::fs;

enum WalkEntry {
    File(PathBuf),
    Descend(PathBuf),
    Skip,
}

/// Walks `root` depth-first, yielding every regular file beneath it.
///
/// Siblings are visited in byte-wise name order, so the same tree always
/// produces the same sequence. Symbolic links to files are yielded, symbolic
/// links to directories are not followed (no cycles). Unreadable entries are
/// yielded as errors and the walk carries on.
pub(crate) fn walk(root: PathBuf) -> impl Stream<Item = Result<PathBuf>> {
    stream! {
        // Pending paths in reverse visiting order; popping from the end gives
        // pre-order. The root itself is always descended into, even when the
        // caller handed us a symbolic link to it.
        let mut pending = Vec::new();
        match children(&root).await {
            Ok(children) => pending.extend(children.into_iter().rev()),
            Err(e) => yield Err(e),
        }
        while let Some(path) = pending.pop() {
            match classify(&path).await {
                Ok(WalkEntry::File(file)) => yield Ok(file),
                Ok(WalkEntry::Descend(dir)) => match children(&dir).await {
                    Ok(children) => pending.extend(children.into_iter().rev()),
                    Err(e) => yield Err(e),
                },
                Ok(WalkEntry::Skip) => {},
                Err(e) => yield Err(e),
            }
        }
    }
}

async fn classify(path: &Path) -> Result<WalkEntry> {
    let metadata = fs::symlink_metadata(path).await.map_err(|e| ErrorKind::from_io(e, path))?;
    if metadata.is_dir() {
        return Ok(WalkEntry::Descend(path.to_path_buf()));
    }
    if metadata.is_file() {
        return Ok(WalkEntry::File(path.to_path_buf()));
    }
    if metadata.is_symlink() {
        return Ok(match fs::metadata(path).await {
            Ok(target) if target.is_file() => WalkEntry::File(path.to_path_buf()),
            Ok(_) => {
                tracing::debug!(path = %path.display(), "Not following symbolic link to directory");
                WalkEntry::Skip
            },
            // Note: silently drop what is most likely a broken symlink.
            Err(_) => WalkEntry::Skip,
        });
    }
    // Sockets, FIFOs, devices.
    Ok(WalkEntry::Skip)
}

async fn children(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir).await.map_err(|e| ErrorKind::from_io(e, dir))?;
    let mut children = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| ErrorKind::from_io(e, dir))? {
        children.push(entry.path());
    }
    children.sort();
    Ok(children)
}
