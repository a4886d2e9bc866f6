//! OpenAI-compatible chat-completions describer
//!
//! Sends the prompt plus every page image as a base64 `data:` URL and tries
//! the configured models in order. The first non-empty answer wins.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::PathBuf;
//! use cep_domain::VisionDescriber;
//! use cep_vision::{OpenAiDescriber, VisionConfig};
//!
//! let describer = OpenAiDescriber::from_config(VisionConfig::default()).unwrap();
//! let text = describer.describe(&[PathBuf::from("page-1.png")], "转写图片中的文字");
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use cep_domain::format::lower_extension;
use cep_domain::VisionDescriber;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::VisionConfig;
use crate::VisionError;

/// Vision describer speaking the OpenAI chat-completions protocol
///
/// Blocking: call it from a worker thread, not from inside an async task.
pub struct OpenAiDescriber {
    config: VisionConfig,
    api_key: Option<String>,
    client: Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Value>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiDescriber {
    /// Create a describer, reading the API key from the configured variable
    pub fn from_config(config: VisionConfig) -> Result<Self, VisionError> {
        let api_key = config.api_key();
        Self::build(config, api_key)
    }

    /// Create a describer with an explicit API key
    pub fn with_api_key(config: VisionConfig, api_key: impl Into<String>) -> Result<Self, VisionError> {
        Self::build(config, Some(api_key.into()))
    }

    fn build(config: VisionConfig, api_key: Option<String>) -> Result<Self, VisionError> {
        config.validate().map_err(VisionError::Config)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Whether an API key is available
    pub fn enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Active configuration
    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn messages(&self, images: &[PathBuf], prompt: &str) -> Result<Vec<Value>, VisionError> {
        let mut content = vec![json!({ "type": "text", "text": prompt })];
        for image in images {
            content.push(json!({
                "type": "image_url",
                "image_url": { "url": data_url(image)? },
            }));
        }

        Ok(vec![
            json!({ "role": "system", "content": self.config.system_prompt }),
            json!({ "role": "user", "content": content }),
        ])
    }

    fn ask(&self, api_key: &str, model: &str, messages: &[Value]) -> Result<String, VisionError> {
        let request = ChatRequest {
            model,
            messages: messages.to_vec(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(VisionError::InvalidResponse(format!("HTTP {}: {}", status, body.trim())));
        }

        let parsed: ChatResponse = response.json()?;
        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default())
    }
}

impl VisionDescriber for OpenAiDescriber {
    type Error = VisionError;

    fn describe(&self, images: &[PathBuf], prompt: &str) -> Result<String, Self::Error> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            VisionError::NotConfigured(format!("set {} to enable page description", self.config.api_key_env))
        })?;
        if images.is_empty() {
            return Err(VisionError::NoImages);
        }

        let messages = self.messages(images, prompt)?;
        let mut last_error = String::from("no model returned text");

        for model in self.config.models.iter().filter(|m| !m.trim().is_empty()) {
            info!(model = %model, images = images.len(), "Requesting page description");
            match self.ask(api_key, model, &messages) {
                Ok(text) if !text.is_empty() => {
                    debug!(model = %model, chars = text.chars().count(), "Model answered");
                    return Ok(text);
                }
                Ok(_) => {
                    warn!(model = %model, "Model returned empty text, trying next");
                }
                Err(e) => {
                    warn!(model = %model, error = %e, "Model request failed, trying next");
                    last_error = e.to_string();
                }
            }
        }

        Err(VisionError::AllModelsFailed(last_error))
    }
}

/// MIME type for an image path, by extension
pub fn mime_type(path: &Path) -> &'static str {
    match lower_extension(path).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif") | Some("tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

fn data_url(path: &Path) -> Result<String, VisionError> {
    let bytes = std::fs::read(path)?;
    Ok(format!("data:{};base64,{}", mime_type(path), STANDARD.encode(bytes)))
}
