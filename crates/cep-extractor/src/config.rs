//! Configuration for the record extractor

use serde::{Deserialize, Serialize};

/// Default prompt sent along with rendered PDF pages
pub const DEFAULT_PAGE_PROMPT: &str = "这些图片是一份活动记录的前几页。请完整转写其中与活动相关的文字内容（主题、时间、地点、过程、总结），不要添加评论。";

/// Configuration for the record extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Number of leading PDF pages rendered for the vision path
    pub pdf_pages: usize,
    /// Render resolution in DPI
    pub render_dpi: u32,
    /// Page rendering program (poppler `pdftoppm` compatible)
    pub renderer: String,
    /// Legacy `.doc` to text converter (prints text on stdout)
    pub doc_converter: String,
    /// Characters kept from an extracted record
    pub max_record_chars: usize,
    /// Prompt passed to the vision describer with rendered pages
    pub page_prompt: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            pdf_pages: 3,
            render_dpi: 200,
            renderer: "pdftoppm".to_string(),
            doc_converter: "antiword".to_string(),
            max_record_chars: 8_000,
            page_prompt: DEFAULT_PAGE_PROMPT.to_string(),
        }
    }
}

impl ExtractorConfig {
    /// Aggressive preset: one page at low resolution, short records
    pub fn aggressive() -> Self {
        Self {
            pdf_pages: 1,
            render_dpi: 150,
            max_record_chars: 3_000,
            ..Self::default()
        }
    }

    /// Lenient preset: more pages at high resolution, long records
    pub fn lenient() -> Self {
        Self {
            pdf_pages: 5,
            render_dpi: 300,
            max_record_chars: 20_000,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.pdf_pages == 0 || self.pdf_pages > 20 {
            return Err("pdf_pages must be between 1 and 20".to_string());
        }
        if !(72..=600).contains(&self.render_dpi) {
            return Err("render_dpi must be between 72 and 600".to_string());
        }
        if self.renderer.trim().is_empty() {
            return Err("renderer cannot be empty".to_string());
        }
        if self.doc_converter.trim().is_empty() {
            return Err("doc_converter cannot be empty".to_string());
        }
        if self.max_record_chars == 0 {
            return Err("max_record_chars must be greater than 0".to_string());
        }
        Ok(())
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
