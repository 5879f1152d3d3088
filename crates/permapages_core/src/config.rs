//! Protocol configuration shared by tagging, querying and rendering.
//!
//! # Responsibility
//! - Hold every protocol identifier written into ledger tags.
//! - Hold the fixed asset references used by the document template.
//!
//! # Invariants
//! - Protocol identifiers are never empty once loaded.
//! - The same config must be used for publishing and querying, otherwise
//!   published entries cannot be found again.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Schema tag value for profile entries.
pub const DEFAULT_PROFILE_PROTOCOL: &str = "PermaProfile-v0.1";
/// Schema tag value for page entries.
pub const DEFAULT_PAGES_PROTOCOL: &str = "PermaPages-v0.3";
/// Value of the `DEPLOY` tag marking application deploys.
pub const DEFAULT_DEPLOY_APP: &str = "permapages";
/// Content type of deploy manifests.
pub const DEFAULT_MANIFEST_CONTENT_TYPE: &str = "application/x.arweave-manifest+json";
/// Content type of profile/page record payloads.
pub const DEFAULT_RECORD_CONTENT_TYPE: &str = "application/json";
/// Advertised generator of rendered documents.
pub const DEFAULT_GENERATOR_URL: &str = "https://permanotes.app";

const DEFAULT_STYLESHEETS: &[&str] = &["https://cdn.jsdelivr.net/npm/daisyui@2.15.4/dist/full.css"];
const DEFAULT_SCRIPTS: &[&str] = &[
    "https://cdn.tailwindcss.com/3.1.3?plugins=typography",
    "https://unpkg.com/arweave@1.11.4/bundles/web.bundle.min.js",
];

/// Protocol constants for one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    pub profile_protocol: String,
    pub pages_protocol: String,
    pub deploy_app: String,
    pub manifest_content_type: String,
    pub record_content_type: String,
    pub generator_url: String,
    /// Stylesheets linked from every rendered document, in order.
    pub stylesheets: Vec<String>,
    /// Scripts loaded by every rendered document, in order.
    pub scripts: Vec<String>,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            profile_protocol: DEFAULT_PROFILE_PROTOCOL.to_string(),
            pages_protocol: DEFAULT_PAGES_PROTOCOL.to_string(),
            deploy_app: DEFAULT_DEPLOY_APP.to_string(),
            manifest_content_type: DEFAULT_MANIFEST_CONTENT_TYPE.to_string(),
            record_content_type: DEFAULT_RECORD_CONTENT_TYPE.to_string(),
            generator_url: DEFAULT_GENERATOR_URL.to_string(),
            stylesheets: DEFAULT_STYLESHEETS.iter().map(|s| s.to_string()).collect(),
            scripts: DEFAULT_SCRIPTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ProtocolConfig {
    /// Loads a config override document.
    ///
    /// Keys missing from `raw` keep their default values.
    ///
    /// # Errors
    /// - `ConfigError::Parse` when `raw` is not a JSON object of the expected shape.
    /// - `ConfigError::EmptyField` when a protocol identifier is blank.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every identifier used in tags and filters is present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("profile_protocol", &self.profile_protocol),
            ("pages_protocol", &self.pages_protocol),
            ("deploy_app", &self.deploy_app),
            ("manifest_content_type", &self.manifest_content_type),
            ("record_content_type", &self.record_content_type),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField(field));
            }
        }
        Ok(())
    }
}

/// Config loading errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    EmptyField(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid protocol config: {message}"),
            Self::EmptyField(field) => {
                write!(f, "protocol config field `{field}` must not be empty")
            }
        }
    }
}

impl Error for ConfigError {}
