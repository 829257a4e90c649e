//! Configuration — an optional TOML file, overridden by CLI flags.
//!
//! ```toml
//! acronym = "ea"
//!
//! [mode]
//! framework = true
//! interops = false
//! adapters = true
//!
//! [templates]
//! definition = "..."
//! execution = "..."
//! unit_definition = "..."
//! ```

use crate::error::{Error, Result};
use crate::templates::DefaultTemplates;
use crate::tree::BuildMode;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Product acronym used in the drag MIME type.
    pub acronym: String,
    pub mode: BuildMode,
    pub templates: DefaultTemplates,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            acronym: "EA".to_string(),
            mode: BuildMode::default(),
            templates: DefaultTemplates::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.acronym.trim().is_empty() {
            return Err(Error::config("acronym must not be empty"));
        }
        Ok(())
    }
}
