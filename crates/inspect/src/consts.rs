use regex::bytes::Regex;
use std::sync::LazyLock;
use std::time::Duration;

/// Literal found in the payload page of every known Follina sample.
pub const DEFAULT_SIGNATURE: &str = "ms-msdt";
/// Upper bound for the single outbound request made per document.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Relationship manifests are tiny; anything past this is not worth reading.
pub const DEFAULT_MAX_MANIFEST_BYTES: u64 = 16 * 1024 * 1024;
/// Upper bound on bytes read from a fetched template; the rest is discarded.
pub const DEFAULT_MAX_BODY_BYTES: u64 = 16 * 1024 * 1024;

const SCHEME_MARKER: &str = "(?:mhtml:|x-usc:)";
// One stray character after `.htm(l)` (e.g. `x.html/`, `x.html?`) is kept as part of the URL.
const HTML_URL: &str = r#"(https?://[^\s"!]+\.html?[^\s"!]?)"#;
const FRAGMENT: &str = r#"(?:![^"]*)?"#;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// `Target="` [scheme marker] url `.htm(l)` [char] [`!fragment`] `"`, the URL is capture group 1.
regex!(TARGET_REGEX, format!(r#"Target="{}?{}{}""#, SCHEME_MARKER, HTML_URL, FRAGMENT).as_str());
