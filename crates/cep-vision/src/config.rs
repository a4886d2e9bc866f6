//! Vision provider configuration

use serde::{Deserialize, Serialize};

/// Default OpenAI-compatible endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.siliconflow.cn/v1";

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "CEP_VISION_API_KEY";

/// Settings for [`OpenAiDescriber`](crate::OpenAiDescriber)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// Base URL, `/chat/completions` is appended
    pub base_url: String,

    /// Environment variable the API key is read from
    pub api_key_env: String,

    /// Models tried in order until one answers
    pub models: Vec<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Completion token limit
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// System message sent before the user prompt
    pub system_prompt: String,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            models: vec![
                "Qwen/Qwen3-Omni-30B-A3B-Instruct".to_string(),
                "PaddlePaddle/PaddleOCR-VL-1.5".to_string(),
                "deepseek-ai/DeepSeek-OCR".to_string(),
            ],
            timeout_secs: 60,
            max_tokens: 2048,
            temperature: 0.2,
            system_prompt: "你是一个专业的视觉助手。".to_string(),
        }
    }
}

impl VisionConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }
        if self.api_key_env.trim().is_empty() {
            return Err("api_key_env must not be empty".to_string());
        }
        if self.models.iter().all(|m| m.trim().is_empty()) {
            return Err("at least one model is required".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        Ok(())
    }

    /// API key from the configured environment variable, if set and non-blank
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = VisionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api_key_env, "CEP_VISION_API_KEY");
        assert_eq!(config.models.len(), 3);
    }

    #[test]
    fn test_validation_failures() {
        let config = VisionConfig {
            models: vec![" ".to_string()],
            ..VisionConfig::default()
        };
        assert!(config.validate().is_err());

        let config = VisionConfig {
            timeout_secs: 0,
            ..VisionConfig::default()
        };
        assert!(config.validate().is_err());

        let config = VisionConfig {
            temperature: 3.5,
            ..VisionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_key_variable() {
        let config = VisionConfig {
            api_key_env: "CEP_VISION_TEST_UNSET_VARIABLE".to_string(),
            ..VisionConfig::default()
        };
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_partial_toml() {
        let config = VisionConfig::from_toml(
            r#"
base_url = "http://localhost:8000/v1"
models = ["local-vl"]
"#,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8000/v1");
        assert_eq!(config.models, vec!["local-vl"]);
        assert_eq!(config.max_tokens, 2048);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = VisionConfig::default();
        let parsed = VisionConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
