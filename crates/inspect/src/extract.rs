//! Target URL extraction and signature matching on raw bytes.

use crate::consts;
use memchr::memmem;

/// Extracts the first external `.html` target URL from a relationship
/// manifest.
///
/// Operates on raw bytes; no XML parsing is involved. The `mhtml:` and
/// `x-usc:` scheme markers are dropped, and so is anything from the first
/// `!` onwards (the in-document fragment), leaving the URL that would
/// actually be requested.
///
/// # Examples
///
/// ```rust
/// use follina_inspect::extract_target_url;
/// let rels = br#"<Relationship Id="rId996" Target="mhtml:https://evil.example/x.html!foo" TargetMode="External"/>"#;
/// assert_eq!(extract_target_url(rels).as_deref(), Some("https://evil.example/x.html"));
/// assert_eq!(extract_target_url(b"<Relationships/>"), None);
/// ```
pub fn extract_target_url(manifest: impl AsRef<[u8]>) -> Option<String> {
    consts::TARGET_REGEX
        .captures(manifest.as_ref())
        .and_then(|captures| captures.get(1))
        .map(|url| String::from_utf8_lossy(url.as_bytes()).into_owned())
}

/// Returns `true` if `body` contains `signature` anywhere (case-sensitive).
///
/// An empty signature never matches.
pub fn contains_signature(body: &[u8], signature: &str) -> bool {
    !signature.is_empty() && memmem::find(body, signature.as_bytes()).is_some()
}
