//! Category-aware evidence resolution

use std::path::{Path, PathBuf};

use cep_classifier::best_match;
use cep_domain::{Category, EvidenceScope, OrgPath};
use rand::Rng;
use tracing::{debug, info};

use crate::config::LayoutConfig;
use crate::package::{has_resources, sub_packages, EvidencePackage};
use crate::picker::pick_image_with;
use crate::ResolverError;

/// What a resolution landed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evidence {
    /// A topic sub-package matched the title
    Package(PathBuf),
    /// A single file picked directly from the resolved folder
    File(PathBuf),
}

impl Evidence {
    /// The resolved path
    pub fn path(&self) -> &Path {
        match self {
            Evidence::Package(p) | Evidence::File(p) => p,
        }
    }

    /// Folder holding the evidence: the package itself, or the file's parent
    pub fn folder(&self) -> &Path {
        match self {
            Evidence::Package(p) => p,
            Evidence::File(p) => p.parent().unwrap_or(p),
        }
    }

    /// Pick an image from already-resolved evidence
    pub fn pick_image(&self) -> Option<PathBuf> {
        self.pick_image_with(&mut rand::thread_rng())
    }

    /// [`pick_image`](Self::pick_image) with an injected RNG
    ///
    /// A package is searched recursively; for a single file only its own
    /// folder is searched.
    pub fn pick_image_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<PathBuf> {
        match self {
            Evidence::Package(dir) => pick_image_with(rng, dir, true),
            Evidence::File(file) => pick_image_with(rng, file.parent()?, false),
        }
    }
}

/// Maps a category and org path to an evidence folder
pub struct ResourceResolver {
    layout: LayoutConfig,
}

impl ResourceResolver {
    /// Create a resolver over the given layout
    pub fn new(layout: LayoutConfig) -> Result<Self, ResolverError> {
        layout.validate().map_err(ResolverError::Config)?;
        Ok(Self { layout })
    }

    /// Active layout
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Folders tried for a category, most specific first
    pub fn candidates(&self, category: Category, org: &OrgPath) -> Vec<PathBuf> {
        let base = self.layout.category_root(category);
        let shared = org.institution_dir(&base).join(&self.layout.shared_default);
        match category.scope() {
            EvidenceScope::OrgWideShared => vec![shared],
            EvidenceScope::SectionScoped => vec![org.section_dir(&base), shared],
            EvidenceScope::SectionExclusive => vec![org.section_dir(&base)],
        }
    }

    /// First folder in the chain that holds any evidence
    pub fn resolve_dir(&self, category: Category, org: &OrgPath) -> Option<PathBuf> {
        let chain = self.candidates(category, org);
        let last = chain.len().saturating_sub(1);
        for (i, dir) in chain.into_iter().enumerate() {
            if has_resources(&dir, true) {
                if i > 0 {
                    info!(%category, %org, dir = %dir.display(), "Using shared fallback folder");
                }
                return Some(dir);
            }
            if i < last {
                debug!(%category, dir = %dir.display(), "No evidence, trying next folder");
            }
        }

        if category.scope().blocks_when_missing() {
            info!(%category, %org, "No section folder; item must not be submitted");
        } else {
            info!(%category, %org, "No evidence folder found");
        }
        None
    }

    /// Resolve the evidence for a work item
    ///
    /// With a title, sub-packages of the resolved folder are fuzzy-matched
    /// against it; otherwise (or on no match) a file directly inside the
    /// folder is used.
    pub fn resolve(&self, category: Category, org: &OrgPath, title: Option<&str>) -> Option<Evidence> {
        let dir = self.resolve_dir(category, org)?;

        if let Some(title) = title {
            if let Some(package) = self.match_sub_package(&dir, title) {
                return Some(Evidence::Package(package));
            }
        }

        let flat = EvidencePackage::discover(&dir);
        match flat.primary_file() {
            Some(file) => Some(Evidence::File(file.clone())),
            None => {
                debug!(%category, dir = %dir.display(), "No matching sub-package and no direct files");
                None
            }
        }
    }

    /// Best sub-package of `dir` for a title
    pub fn match_sub_package(&self, dir: &Path, title: &str) -> Option<PathBuf> {
        let packages = sub_packages(dir);
        let names: Vec<&str> = packages.iter().map(|(name, _)| name.as_str()).collect();
        let found = best_match(title, &names, &self.layout.matching)?;
        info!(title, package = found.candidate, similarity = found.similarity, "Matched evidence package");
        Some(packages[found.index].1.clone())
    }

    /// Names of the evidence sub-packages available for a section
    pub fn known_folders(&self, category: Category, org: &OrgPath) -> Vec<String> {
        self.resolve_dir(category, org)
            .map(|dir| sub_packages(&dir).into_iter().map(|(name, _)| name).collect())
            .unwrap_or_default()
    }

    /// Resolve and pick an image for a work item
    pub fn resolve_image(&self, category: Category, org: &OrgPath, title: Option<&str>) -> Option<PathBuf> {
        self.resolve_image_with(&mut rand::thread_rng(), category, org, title)
    }

    /// [`resolve_image`](Self::resolve_image) with an injected RNG
    pub fn resolve_image_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        category: Category,
        org: &OrgPath,
        title: Option<&str>,
    ) -> Option<PathBuf> {
        self.resolve(category, org, title)?.pick_image_with(rng)
    }
}
