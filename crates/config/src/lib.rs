//! Layered configuration for the scanner.
//!
//! Values are merged, lowest priority first, from:
//!
//! 1. built-in defaults,
//! 2. a configuration file (`config.toml`, `config.yaml` or `config.json` in
//!    the user's config directory, or an explicit path),
//! 3. environment variables prefixed with `FOLLINA_` (nested keys use a
//!    double underscore, e.g. `FOLLINA_MANIFEST__STRICT=true`). Variables
//!    that don't name a configuration key are ignored.
//!
//! Command-line flags are applied on top by the binary, which then calls
//! [`Config::validate`].

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use follina_inspect::{DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_MANIFEST_BYTES, DEFAULT_SIGNATURE, DEFAULT_TIMEOUT, ManifestSelector};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_PREFIX: &str = "FOLLINA_";
const CONFIG_BASENAME: &str = "config";
/// Keys (after the prefix) the environment layer may set.
const ENV_KEYS: &[&str] = &[
    "timeout_secs",
    "signature",
    "max_manifest_bytes",
    "max_body_bytes",
    "user_agent",
    "manifest__strict",
    "manifest__name",
];

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Timeout (in seconds) for fetching an external template.
    pub timeout_secs: u64,
    /// Literal searched for in fetched templates.
    pub signature: String,
    pub manifest: ManifestConfig,
    /// Upper bound on bytes read from a single relationship manifest.
    pub max_manifest_bytes: u64,
    /// Upper bound on bytes read from a fetched template.
    pub max_body_bytes: u64,
    /// Overrides the HTTP client's default `User-Agent` header.
    pub user_agent: Option<String>,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            signature: DEFAULT_SIGNATURE.to_string(),
            manifest: ManifestConfig::default(),
            max_manifest_bytes: DEFAULT_MAX_MANIFEST_BYTES,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            user_agent: None,
        }
    }
}

/// Which archive entries count as relationship manifests.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Only accept the exact manifest path instead of any `_rels` entry.
    pub strict: bool,
    /// Replaces the substring needle (or the exact path, when strict).
    pub name: Option<String>,
}
impl ManifestConfig {
    pub fn selector(&self) -> ManifestSelector {
        match (self.strict, &self.name) {
            (false, None) => ManifestSelector::substring(),
            (true, None) => ManifestSelector::exact(),
            (false, Some(name)) => ManifestSelector::Substring(name.clone()),
            (true, Some(name)) => ManifestSelector::Exact(name.clone()),
        }
    }
}

impl Config {
    /// Load configuration from the default file location (if it exists) and
    /// the environment. Values are not validated yet.
    pub fn load() -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(dir) = Self::directory() {
            tracing::trace!(directory = %dir.display(), "Looking for configuration file");
            figment = figment
                .merge(Toml::file(dir.join(format!("{CONFIG_BASENAME}.toml"))))
                .merge(Yaml::file(dir.join(format!("{CONFIG_BASENAME}.yaml"))))
                .merge(Json::file(dir.join(format!("{CONFIG_BASENAME}.json"))));
        }
        Self::extract(figment.merge(Self::env()))
    }

    /// Load configuration from an explicit file. Unlike [`load`](Self::load),
    /// a missing file is an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
        }
        let figment = Figment::from(Serialized::defaults(Config::default()));
        let figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
            Some("json") => figment.merge(Json::file_exact(path)),
            _ => figment.merge(Toml::file_exact(path)),
        };
        Self::extract(figment.merge(Self::env()))
    }

    /// Platform-specific configuration directory, e.g. `~/.config/follina`.
    pub fn directory() -> Option<PathBuf> {
        ProjectDirs::from("", "", "follina").map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn env() -> Env {
        Env::prefixed(ENV_PREFIX)
            .filter(|key| ENV_KEYS.iter().any(|known| key.as_str().eq_ignore_ascii_case(known)))
            .split("__")
    }

    fn extract(figment: Figment) -> Result<Self> {
        Ok(figment.extract().map_err(|e| ErrorKind::Load(e.to_string()))?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            exn::bail!(ErrorKind::Invalid {
                field: "timeout_secs",
                reason: "must be at least one second".to_string(),
            });
        }
        if self.signature.is_empty() {
            exn::bail!(ErrorKind::Invalid {
                field: "signature",
                reason: "must not be empty".to_string(),
            });
        }
        if self.max_manifest_bytes == 0 {
            exn::bail!(ErrorKind::Invalid {
                field: "max_manifest_bytes",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.max_body_bytes == 0 {
            exn::bail!(ErrorKind::Invalid {
                field: "max_body_bytes",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.manifest.name.as_deref().is_some_and(str::is_empty) {
            exn::bail!(ErrorKind::Invalid {
                field: "manifest.name",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn selector(&self) -> ManifestSelector {
        self.manifest.selector()
    }
}
