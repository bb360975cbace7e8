use std::fmt::{Display, Formatter, Result as FmtResult};

/// Directory name shared by every relationship part in an Office Open XML
/// container, whatever the application (Word, Excel, PowerPoint).
pub const RELATIONSHIP_NEEDLE: &str = "_rels";
/// The relationship manifest of the main part of a Word document.
pub const WORD_DOCUMENT_RELATIONSHIPS: &str = "word/_rels/document.xml.rels";

/// Decides which archive entries are treated as relationship manifests.
///
/// Defaults to [`Substring`](Self::Substring) on [`RELATIONSHIP_NEEDLE`],
/// which covers every Office Open XML format. [`Exact`](Self::Exact) on
/// [`WORD_DOCUMENT_RELATIONSHIPS`] is the stricter, Word-only policy.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ManifestSelector {
    /// Entry name contains the needle anywhere.
    Substring(String),
    /// Entry name is exactly this path.
    Exact(String),
}
impl ManifestSelector {
    #[must_use]
    pub fn substring() -> Self {
        Self::Substring(RELATIONSHIP_NEEDLE.to_string())
    }

    #[must_use]
    pub fn exact() -> Self {
        Self::Exact(WORD_DOCUMENT_RELATIONSHIPS.to_string())
    }

    /// Returns `true` if the archive entry `name` is a manifest candidate.
    ///
    /// Directory entries (names ending in `/`) never match, even when
    /// their name contains the needle.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        if name.ends_with('/') {
            return false;
        }
        match self {
            Self::Substring(needle) => name.contains(needle.as_str()),
            Self::Exact(path) => name == path,
        }
    }
}
impl Default for ManifestSelector {
    fn default() -> Self {
        Self::substring()
    }
}
impl Display for ManifestSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Substring(needle) => write!(f, "*{needle}*"),
            Self::Exact(path) => write!(f, "{path}"),
        }
    }
}
