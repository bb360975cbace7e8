//! Inspection of Office Open XML documents for remote-template exploits.
//!
//! A document is a zip container. Its relationship manifests (the `_rels`
//! parts) declare the resources a document part pulls in, and a "Follina"
//! document points one of them at an external `.html` page that launches
//! the `ms-msdt:` protocol handler. The [`Inspector`] walks through that:
//!
//! 1. open the file as a zip archive ([`Classification::NotApplicable`] if
//!    it isn't one),
//! 2. find a relationship manifest with a [`ManifestSelector`],
//! 3. pull the target URL out of it with [`extract_target_url`],
//! 4. fetch the URL through a [`Fetcher`] and look for the signature.
//!
//! Inspection never fails; every problem ends up in the [`ScanResult`].

mod consts;
pub mod error;
mod extract;
pub mod fetch;
mod inspector;
mod manifest;
mod result;

pub use crate::consts::{DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_MANIFEST_BYTES, DEFAULT_SIGNATURE, DEFAULT_TIMEOUT};
pub use crate::extract::{contains_signature, extract_target_url};
pub use crate::fetch::{Fetcher, FetcherHandle, HttpFetcher};
pub use crate::inspector::Inspector;
pub use crate::manifest::{ManifestSelector, RELATIONSHIP_NEEDLE, WORD_DOCUMENT_RELATIONSHIPS};
pub use crate::result::{Classification, ScanResult};
