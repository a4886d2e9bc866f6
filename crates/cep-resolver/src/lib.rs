//! CEP Resolver
//!
//! Locates evidence on disk for a classified work item.
//!
//! # Layout
//!
//! ```text
//! <root>/<category>/<institution>/<cohort>/<section>/...   section folders
//! <root>/<category>/<institution>/默认/...                  shared default
//! ```
//!
//! Each category carries a fallback policy: public speech only uses the
//! shared default, labor and military try the section first, theme sessions
//! never leave the section.
//!
//! # Examples
//!
//! ```no_run
//! use cep_domain::{Category, OrgPath};
//! use cep_resolver::{LayoutConfig, ResourceResolver};
//!
//! let resolver = ResourceResolver::new(LayoutConfig::with_root("assets/images")).unwrap();
//! let org = OrgPath::new("福清一中", "高一", "高一八班");
//! if let Some(evidence) = resolver.resolve(Category::Labor, &org, Some("校园清洁")) {
//!     println!("{}", evidence.path().display());
//! }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod health;
mod package;
mod picker;
mod resolver;

pub use config::LayoutConfig;
pub use error::ResolverError;
pub use health::{MissingResource, ResourceHealth};
pub use package::{has_resources, sub_packages, EvidencePackage};
pub use picker::{pick_image, pick_image_with};
pub use resolver::{Evidence, ResourceResolver};
