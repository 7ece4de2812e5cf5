use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Emit machine-readable JSON instead of human output
    #[serde(default)]
    pub json: bool,

    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { json: false, pretty: default_pretty() }
    }
}

fn default_pretty() -> bool {
    true
}

/// Default config file looked up in the working directory
const DEFAULT_CONFIG_PATH: &str = "geomark.toml";

/// Load configuration.
///
/// An explicitly given path must exist; the default path is optional and
/// silently falls back to defaults when absent.
pub fn load(path: Option<&Path>) -> Result<ConfigFile> {
    let path = match path {
        Some(path) => path,
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if !default.exists() {
                return Ok(ConfigFile::default());
            }
            default
        }
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}
