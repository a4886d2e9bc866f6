//! Command implementations.

pub mod classify;
pub mod extract;
pub mod health;
pub mod matching;
pub mod pick_image;
pub mod plan;
pub mod resolve;

pub use self::classify::execute_classify;
pub use self::extract::execute_extract;
pub use self::health::execute_health;
pub use self::matching::execute_match;
pub use self::pick_image::execute_pick_image;
pub use self::plan::execute_plan;
pub use self::resolve::execute_resolve;

use std::path::PathBuf;

use cep_classifier::Classifier;
use cep_domain::VisionDescriber;
use cep_extractor::RecordExtractor;
use cep_resolver::ResourceResolver;
use cep_vision::{OpenAiDescriber, VisionError};
use tracing::warn;

use crate::config::Config;
use crate::error::Result;

/// Build the classifier from configuration.
pub fn build_classifier(config: &Config) -> Result<Classifier> {
    Ok(Classifier::new(config.classifier.clone())?)
}

/// Build the resolver from configuration.
pub fn build_resolver(config: &Config) -> Result<ResourceResolver> {
    Ok(ResourceResolver::new(config.layout.clone())?)
}

/// Vision capability chosen for a run.
pub enum Describer {
    /// PDFs are skipped
    Disabled,
    /// Remote chat-completions provider
    OpenAi(OpenAiDescriber),
}

impl Describer {
    /// Build the describer for a run.
    ///
    /// Blocking: must not be created or dropped on an async task.
    pub fn from_config(config: &Config, disabled: bool) -> Result<Self> {
        if disabled {
            return Ok(Describer::Disabled);
        }
        let describer = OpenAiDescriber::from_config(config.vision.clone())?;
        if !describer.enabled() {
            warn!(
                variable = %config.vision.api_key_env,
                "No vision API key; PDF records will be skipped"
            );
        }
        Ok(Describer::OpenAi(describer))
    }
}

impl VisionDescriber for Describer {
    type Error = VisionError;

    fn describe(&self, images: &[PathBuf], prompt: &str) -> std::result::Result<String, Self::Error> {
        match self {
            Describer::Disabled => Err(VisionError::NotConfigured("vision disabled for this run".to_string())),
            Describer::OpenAi(describer) => describer.describe(images, prompt),
        }
    }
}

/// Build a record extractor with the run's vision capability.
pub fn build_extractor(config: &Config, no_vision: bool) -> Result<RecordExtractor<Describer>> {
    let describer = Describer::from_config(config, no_vision)?;
    Ok(RecordExtractor::new(config.extractor.clone(), describer)?)
}
