use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::runtime::GraphVersion;

fn default_max_iterations() -> u32 {
    5
}

fn default_cache_enabled() -> bool {
    true
}

/// Operational options for a coder agent that make sense to keep in a file.
/// Model, tools and prompt are code-level concerns and are not covered here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoderSettings {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,

    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub version: GraphVersion,

    #[serde(default)]
    pub interrupt_before: Vec<String>,

    #[serde(default)]
    pub interrupt_after: Vec<String>,
}

impl Default for CoderSettings {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            cache_enabled: default_cache_enabled(),
            debug: false,
            version: GraphVersion::default(),
            interrupt_before: Vec::new(),
            interrupt_after: Vec::new(),
        }
    }
}

impl CoderSettings {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse coder settings")
    }

    /// Load settings from a TOML file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {path:?}"))?;
        Self::from_toml_str(&contents).with_context(|| format!("Invalid settings in {path:?}"))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {parent:?}"))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, contents).with_context(|| format!("Failed to write settings to {path:?}"))
    }
}
