//! Evidence packages: a folder and its recognized files

use std::path::{Path, PathBuf};

use cep_domain::format::{is_image, is_resource};
use cep_domain::FormatClass;
use tracing::warn;
use walkdir::WalkDir;

use crate::ResolverError;

/// A folder plus its classified evidence files
///
/// Discovered fresh on every call; never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvidencePackage {
    /// The folder that was inspected
    pub folder: PathBuf,
    /// Image files, lexicographic
    pub images: Vec<PathBuf>,
    /// Document files, by format priority then lexicographic
    pub documents: Vec<PathBuf>,
}

impl EvidencePackage {
    /// Files directly inside `folder`
    ///
    /// A missing or unreadable folder yields an empty package.
    pub fn discover(folder: &Path) -> Self {
        Self::try_discover(folder, false).unwrap_or_else(|e| {
            warn!(folder = %folder.display(), error = %e, "Could not list evidence folder");
            Self::empty(folder)
        })
    }

    /// Files anywhere below `folder`
    pub fn discover_recursive(folder: &Path) -> Self {
        Self::try_discover(folder, true).unwrap_or_else(|e| {
            warn!(folder = %folder.display(), error = %e, "Could not walk evidence folder");
            Self::empty(folder)
        })
    }

    /// Classify the files of a folder, failing on the first listing error
    pub fn try_discover(folder: &Path, recursive: bool) -> Result<Self, ResolverError> {
        if !folder.is_dir() {
            return Ok(Self::empty(folder));
        }

        let mut images = Vec::new();
        let mut documents = Vec::new();
        for path in list_files(folder, recursive)? {
            if is_image(&path) {
                images.push(path);
            } else if let Some(class) = FormatClass::of(&path) {
                documents.push((class, path));
            }
        }

        images.sort();
        documents.sort();

        Ok(Self {
            folder: folder.to_path_buf(),
            images,
            documents: documents.into_iter().map(|(_, p)| p).collect(),
        })
    }

    fn empty(folder: &Path) -> Self {
        Self {
            folder: folder.to_path_buf(),
            ..Self::default()
        }
    }

    /// Whether no recognized file was found
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.documents.is_empty()
    }

    /// Documents of one format class, in order
    pub fn documents_of(&self, class: FormatClass) -> impl Iterator<Item = &PathBuf> + '_ {
        self.documents
            .iter()
            .filter(move |p| FormatClass::of(p) == Some(class))
    }

    /// Highest-priority document, else the first image
    pub fn primary_file(&self) -> Option<&PathBuf> {
        self.documents.first().or_else(|| self.images.first())
    }
}

fn list_files(folder: &Path, recursive: bool) -> Result<Vec<PathBuf>, ResolverError> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();
    for entry in WalkDir::new(folder).min_depth(1).max_depth(max_depth) {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Whether `folder` holds at least one recognized evidence file
///
/// Listing errors count as "no resources".
pub fn has_resources(folder: &Path, recursive: bool) -> bool {
    if !folder.is_dir() {
        return false;
    }
    let max_depth = if recursive { usize::MAX } else { 1 };
    WalkDir::new(folder)
        .min_depth(1)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .any(|e| e.file_type().is_file() && is_resource(e.path()))
}

/// Immediate sub-folders of `folder` that hold evidence somewhere below
///
/// Sorted by name so matching ties resolve the same way every run.
pub fn sub_packages(folder: &Path) -> Vec<(String, PathBuf)> {
    let Ok(entries) = std::fs::read_dir(folder) else {
        return Vec::new();
    };
    let mut packages: Vec<(String, PathBuf)> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir() && has_resources(p, true))
        .filter_map(|p| {
            let name = p.file_name()?.to_string_lossy().into_owned();
            Some((name, p))
        })
        .collect();
    packages.sort();
    packages
}
