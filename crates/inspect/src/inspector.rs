use crate::consts::{DEFAULT_MAX_MANIFEST_BYTES, DEFAULT_SIGNATURE};
use crate::error::{ErrorKind, Result};
use crate::extract::{contains_signature, extract_target_url};
use crate::fetch::FetcherHandle;
use crate::manifest::ManifestSelector;
use crate::result::{Classification, ScanResult};
use exn::ResultExt;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use tracing::instrument;
use zip::ZipArchive;

/// A manifest entry that yielded a target URL.
#[derive(Debug)]
struct Located {
    manifest: String,
    url: String,
}

/// Inspects documents one at a time.
///
/// Holds no per-file state; one inspector serves an entire run.
pub struct Inspector {
    fetcher: FetcherHandle,
    selector: ManifestSelector,
    signature: String,
    max_manifest_bytes: u64,
}
impl Inspector {
    pub fn new(fetcher: FetcherHandle) -> Self {
        Self {
            fetcher,
            selector: ManifestSelector::default(),
            signature: DEFAULT_SIGNATURE.to_string(),
            max_manifest_bytes: DEFAULT_MAX_MANIFEST_BYTES,
        }
    }

    pub fn with_selector(mut self, selector: ManifestSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    pub fn with_max_manifest_bytes(mut self, max_manifest_bytes: u64) -> Self {
        self.max_manifest_bytes = max_manifest_bytes;
        self
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Inspects a single file and classifies it.
    ///
    /// 1. **Open**: the file is parsed as a zip archive, seeking rather than
    ///    reading it whole. Anything that fails here is
    ///    [`NotApplicable`](Classification::NotApplicable).
    /// 2. **Locate**: entries matching the [`ManifestSelector`] are read in
    ///    archive order. Empty manifests, manifests without a target URL and
    ///    unreadable entries are skipped; the first URL found wins. No URL at
    ///    all means the document is [`Valid`](Classification::Valid).
    /// 3. **Fetch**: the URL is requested exactly once. A failed request or
    ///    body read makes the document [`Suspicious`](Classification::Suspicious).
    /// 4. **Match**: a body containing the signature is
    ///    [`Infected`](Classification::Infected), anything else is valid.
    ///
    /// No network request is made unless step 2 found a URL.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn inspect(&self, path: &Path) -> ScanResult {
        let located = match self.open_and_locate(path).await {
            Ok(located) => located,
            Err(e) => {
                tracing::debug!(error = %*e, "Not an Office document");
                return ScanResult::new(path, Classification::NotApplicable).with_message((*e).to_string());
            },
        };
        let Some(Located { manifest, url }) = located else {
            return ScanResult::new(path, Classification::Valid).with_message("no external target URL found");
        };
        tracing::debug!(manifest = %manifest, url = %url, "Found external target URL");

        let result = ScanResult::new(path, Classification::Valid).with_target(manifest, &url);
        match self.fetcher.fetch(&url).await {
            Err(e) => {
                tracing::info!(url = %url, error = %*e, "Could not fetch external target");
                ScanResult { classification: Classification::Suspicious, ..result }.with_message((*e).to_string())
            },
            Ok(body) if contains_signature(&body, &self.signature) => {
                tracing::info!(url = %url, signature = %self.signature, "Found exploit signature in external target");
                ScanResult { classification: Classification::Infected, ..result }
            },
            Ok(body) => {
                tracing::debug!(url = %url, bytes = body.len(), "External target does not contain the signature");
                result
            },
        }
    }

    /// Opens the archive and looks for a target URL on the blocking pool.
    async fn open_and_locate(&self, path: &Path) -> Result<Option<Located>> {
        let path = path.to_path_buf();
        let selector = self.selector.clone();
        let max_manifest_bytes = self.max_manifest_bytes;
        let span = tracing::Span::current();
        tokio::task::spawn_blocking(move || -> Result<Option<Located>> {
            let _entered = span.enter();
            let mut archive = open_archive(&path)?;
            tracing::debug!(entries = archive.len(), "Opened file as zip archive");
            Ok(locate(&mut archive, &selector, max_manifest_bytes))
        })
        .await
        .map_err(|e| ErrorKind::Task(e.to_string()))?
    }
}

/// Walks the archive entries in stored order and returns the first
/// manifest that yields a target URL.
fn locate<R: Read + Seek>(archive: &mut ZipArchive<R>, selector: &ManifestSelector, limit: u64) -> Option<Located> {
    for index in 0..archive.len() {
        let (manifest, contents) = match read_manifest(archive, index, selector, limit) {
            Ok(Some(entry)) => entry,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!(index, error = %*e, "Skipping unreadable archive entry");
                continue;
            },
        };
        if contents.iter().all(u8::is_ascii_whitespace) {
            tracing::debug!(manifest = %manifest, "Empty relationship manifest");
            continue;
        }
        match extract_target_url(&contents) {
            Some(url) => return Some(Located { manifest, url }),
            None => tracing::debug!(manifest = %manifest, "No URL found in relationship manifest"),
        }
    }
    None
}

/// Reads the entry at `index` if it is a manifest candidate, `Ok(None)` otherwise.
fn read_manifest<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    index: usize,
    selector: &ManifestSelector,
    limit: u64,
) -> Result<Option<(String, Vec<u8>)>> {
    let entry = archive.by_index(index).or_raise(|| ErrorKind::EntryRead(format!("entry #{index}")))?;
    if entry.is_dir() || !selector.matches(entry.name()) {
        return Ok(None);
    }
    let name = entry.name().to_string();
    tracing::debug!(manifest = %name, size = entry.size(), "Found relationship manifest");
    let mut contents = Vec::new();
    entry.take(limit).read_to_end(&mut contents).or_raise(|| ErrorKind::EntryRead(name.clone()))?;
    Ok(Some((name, contents)))
}

fn open_archive(path: &Path) -> Result<ZipArchive<BufReader<File>>> {
    let file = File::open(path).or_raise(|| ErrorKind::FileAccess(path.to_path_buf()))?;
    ZipArchive::new(BufReader::new(file)).or_raise(|| ErrorKind::NotAnArchive)
}
