//! Collection configuration via TOML
//!
//! Settings that are policy rather than contract live here. Callers can
//! embed a `[collections]`-style table in their own configuration file, or
//! load a dedicated file with [`CollectionConfig::from_file`].

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CollectionError, CollectionResult};

/// Behavior of an indirect event raiser asked to signal a data replacement
/// before a target was set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsetRaiserPolicy {
    /// Fail with an invalid-state error, like every other raiser call
    #[default]
    Fail,
    /// Silently do nothing
    Ignore,
}

/// Collection configuration
///
/// # Example
///
/// ```toml
/// # What an unwired indirect event raiser does when a sort completes:
/// # "fail" (default) or "ignore"
/// unset_raiser_policy = "fail"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Policy for `within_replace_data` on an indirect raiser with no target
    #[serde(default)]
    pub unset_raiser_policy: UnsetRaiserPolicy,
}

impl CollectionConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Collection configuration
#
# What an indirect event raiser without a target does when asked to signal
# a data replacement (sent after every sort):
#   "fail"   = report an invalid-state error (default)
#   "ignore" = do nothing
unset_raiser_policy = "fail"
"#
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or has unknown values.
    pub fn from_toml_str(content: &str) -> CollectionResult<Self> {
        toml::from_str(content).map_err(|e| CollectionError::Config(e.to_string()))
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> CollectionResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CollectionError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }
}
