//! Vision describers for rendered record pages
//!
//! Implementations of the [`VisionDescriber`](cep_domain::VisionDescriber)
//! seam from `cep-domain`.
//!
//! # Describers
//!
//! - [`MockDescriber`]: deterministic, for tests
//! - [`OpenAiDescriber`]: OpenAI-compatible chat-completions API with
//!   model fallback
//!
//! # Examples
//!
//! ```
//! use cep_domain::VisionDescriber;
//! use cep_vision::MockDescriber;
//!
//! let describer = MockDescriber::new("第一页内容");
//! assert_eq!(describer.describe(&[], "转写").unwrap(), "第一页内容");
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod mock;
mod openai;

pub use config::{VisionConfig, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL};
pub use error::VisionError;
pub use mock::MockDescriber;
pub use openai::{mime_type, OpenAiDescriber};
