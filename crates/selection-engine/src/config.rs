//! Engine options.
//!
//! Options arrive from the host's option store as a plain value. Hosts that keep them on disk
//! can use the TOML helpers; every table and field is optional and falls back to its default.
//!
//! ```toml
//! [sort]
//! case_sensitive = false
//! ordinal_comparison = true
//! ascending = true
//! ignore_leading_whitespace = false
//! ignore_punctuation = false
//! eliminate_duplicates = true
//!
//! [trim]
//! trim_start = true
//! trim_end = true
//!
//! [region]
//! default_name = "Region"
//!
//! [todo]
//! author = "ann"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sort::SortPolicy;
use crate::trim::TrimPolicy;

/// Options for the "Add Region" command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionOptions {
    /// Name written after the region start marker.
    pub default_name: String,
}

impl Default for RegionOptions {
    fn default() -> Self {
        Self {
            default_name: "Region".to_string(),
        }
    }
}

/// Options for the "Add TODO Comment" command.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToDoOptions {
    /// Author shown as `TODO (author):`.
    pub author: Option<String>,
}

/// All options consumed by the command engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Options for "Sort Lines".
    pub sort: SortPolicy,
    /// Options for "Trim".
    pub trim: TrimPolicy,
    /// Options for "Add Region".
    pub region: RegionOptions,
    /// Options for "Add TODO Comment".
    pub todo: ToDoOptions,
}

impl EngineOptions {
    /// Parse options from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse an options file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
