//! Evidence tree layout

use std::path::{Path, PathBuf};

use cep_classifier::MatchConfig;
use cep_domain::Category;
use serde::{Deserialize, Serialize};

/// Where evidence lives on disk
///
/// `root/<category dir>/<institution>/<cohort>/<section>` for section
/// folders, `root/<category dir>/<institution>/<shared default>` for the
/// institution-wide fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Evidence root directory
    pub root: PathBuf,
    /// Folder name of the theme-session tree
    pub theme_session_dir: String,
    /// Folder name of the labor tree
    pub labor_dir: String,
    /// Folder name of the military training tree
    pub military_dir: String,
    /// Folder name of the public speech tree
    pub public_speech_dir: String,
    /// Institution-level shared folder name
    pub shared_default: String,
    /// Sub-package matching parameters
    pub matching: MatchConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets/images"),
            theme_session_dir: "主题班会".to_string(),
            labor_dir: "劳动".to_string(),
            military_dir: "军训".to_string(),
            public_speech_dir: "国旗下讲话".to_string(),
            shared_default: "默认".to_string(),
            matching: MatchConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Default layout under a different root
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Folder name for a category
    pub fn dir_name(&self, category: Category) -> &str {
        match category {
            Category::ThemeSession => &self.theme_session_dir,
            Category::Labor => &self.labor_dir,
            Category::Military => &self.military_dir,
            Category::PublicSpeech => &self.public_speech_dir,
        }
    }

    /// `root/<category dir>`
    pub fn category_root(&self, category: Category) -> PathBuf {
        self.root.join(self.dir_name(category))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let names = [
            ("theme_session_dir", &self.theme_session_dir),
            ("labor_dir", &self.labor_dir),
            ("military_dir", &self.military_dir),
            ("public_speech_dir", &self.public_speech_dir),
            ("shared_default", &self.shared_default),
        ];
        for (field, name) in names {
            if name.trim().is_empty() {
                return Err(format!("{} cannot be empty", field));
            }
            if Path::new(name.as_str()).components().count() != 1 || name.contains(['/', '\\']) {
                return Err(format!("{} must be a single folder name", field));
            }
        }
        self.matching.validate()
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
