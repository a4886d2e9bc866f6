//! CEP Classifier
//!
//! Decides which special category a work item belongs to, and which
//! evidence folder best fits its title.
//!
//! The classifier provides:
//! - Title normalization (NFKC, punctuation stripping, quote and date extraction)
//! - Fuzzy folder matching with date-aware tie-breaking
//! - Layered category decisions (veto, reality, semantic, structural, fallback)
//! - Work-item selection and status scoping
//!
//! # Examples
//!
//! ```
//! use cep_classifier::{Classifier, ClassifierConfig, NO_FOLDERS};
//! use cep_domain::Category;
//!
//! let classifier = Classifier::new(ClassifierConfig::default()).unwrap();
//! let result = classifier.classify("校园卫生大扫除", "劳动", NO_FOLDERS);
//! assert!(result.contains(Category::Labor));
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod fuzzy;
mod normalize;
mod selection;

pub use classifier::{Classification, Classifier, Decision, Layer, NO_FOLDERS};
pub use config::{CategoryRules, ClassifierConfig, MatchConfig, SemanticWeights};
pub use error::ClassifierError;
pub use fuzzy::{best_match, date_score, sequence_ratio, FuzzyMatch};
pub use normalize::{extract_date, extract_quoted_title, nfkc, normalize, normalized_key};
pub use selection::{apply_scope, select, Scope, ScopedItems, Selection};
