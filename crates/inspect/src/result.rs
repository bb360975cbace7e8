use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

/// Terminal state of a single document inspection.
///
/// ```text
/// Unopened ─┬─> NotApplicable
///           └─> Opened ─┬─> Valid (no URL)
///                       └─> URL found ─┬─> Suspicious (fetch failed)
///                                      ├─> Valid (no signature)
///                                      └─> Infected (signature found)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Not a zip container, so not an Office document at all.
    NotApplicable,
    /// A document with no external template, or one whose template is clean.
    Valid,
    /// An external template was found but could not be fetched or read.
    Suspicious,
    /// The external template carries the exploit signature.
    Infected,
}
impl Classification {
    /// Returns `true` if the file opened as a zip archive.
    #[inline]
    #[must_use]
    pub fn is_document(&self) -> bool {
        !matches!(self, Self::NotApplicable)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotApplicable => "not applicable",
            Self::Valid => "valid",
            Self::Suspicious => "suspicious",
            Self::Infected => "infected",
        }
    }
}
impl Display for Classification {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of inspecting one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanResult {
    pub path: PathBuf,
    pub classification: Classification,
    /// Archive entry the URL was extracted from.
    pub manifest: Option<String>,
    /// The extracted (and already fetched, unless classification says otherwise) URL.
    pub url: Option<String>,
    /// Human-readable diagnostic; usually the error that decided the classification.
    pub message: Option<String>,
}
impl ScanResult {
    pub fn new(path: impl Into<PathBuf>, classification: Classification) -> Self {
        Self {
            path: path.into(),
            classification,
            manifest: None,
            url: None,
            message: None,
        }
    }

    pub fn with_target(mut self, manifest: impl Into<String>, url: impl Into<String>) -> Self {
        self.manifest = Some(manifest.into());
        self.url = Some(url.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Classification::NotApplicable, false)]
    #[case(Classification::Valid, true)]
    #[case(Classification::Suspicious, true)]
    #[case(Classification::Infected, true)]
    fn test_is_document(#[case] classification: Classification, #[case] expected: bool) {
        assert_eq!(classification.is_document(), expected);
    }

    #[test]
    fn builder() {
        let result = ScanResult::new("doc.docx", Classification::Suspicious)
            .with_target("word/_rels/document.xml.rels", "http://a.b/c.html")
            .with_message("request failed: timeout");
        assert_eq!(result.path, PathBuf::from("doc.docx"));
        assert_eq!(result.manifest.as_deref(), Some("word/_rels/document.xml.rels"));
        assert_eq!(result.url.as_deref(), Some("http://a.b/c.html"));
        assert_eq!(result.message.as_deref(), Some("request failed: timeout"));
        assert_eq!(result.classification.to_string(), "suspicious");
    }
}
