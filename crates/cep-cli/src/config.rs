//! Configuration management for the CLI.
//!
//! One `cep.toml` with optional sections:
//!
//! ```toml
//! [settings]
//! color = true
//! format = "table"
//!
//! [classifier]
//! reality_threshold = 0.85
//!
//! [layout]
//! root = "assets/images"
//!
//! [extractor]
//! pdf_pages = 3
//!
//! [vision]
//! models = ["Qwen/Qwen3-Omni-30B-A3B-Instruct"]
//! ```

use crate::error::{CliError, Result};
use cep_classifier::ClassifierConfig;
use cep_extractor::ExtractorConfig;
use cep_resolver::LayoutConfig;
use cep_vision::VisionConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Classification rules and thresholds
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Evidence directory layout
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Record extraction settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Vision provider settings
    #[serde(default)]
    pub vision: VisionConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Default configuration file path, `~/.cep/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".cep").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist; the default path may be absent, in
    /// which case defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.classifier
            .validate()
            .map_err(|e| CliError::Config(format!("[classifier] {}", e)))?;
        self.layout
            .validate()
            .map_err(|e| CliError::Config(format!("[layout] {}", e)))?;
        self.extractor
            .validate()
            .map_err(|e| CliError::Config(format!("[extractor] {}", e)))?;
        self.vision
            .validate()
            .map_err(|e| CliError::Config(format!("[vision] {}", e)))?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
