//! Resource audit and health report

use std::fmt;
use std::path::{Path, PathBuf};

use cep_domain::format::is_image;
use cep_domain::{Category, FormatClass, OrgPath};
use walkdir::WalkDir;

use crate::package::sub_packages;
use crate::resolver::ResourceResolver;

/// A category with no usable evidence for an org
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingResource {
    /// The category that has nothing
    pub category: Category,
    /// Folders that were tried, in order
    pub tried: Vec<PathBuf>,
}

impl fmt::Display for MissingResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tried: Vec<String> = self.tried.iter().map(|p| p.display().to_string()).collect();
        write!(f, "{}: {}", self.category, tried.join(" | "))
    }
}

/// Per-category readiness for one org
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceHealth {
    /// Labor folder resolves
    pub labor: bool,
    /// Military folder resolves
    pub military: bool,
    /// Public speech shared folder resolves
    pub public_speech: bool,
    /// Some theme-session package has an image
    pub theme_session_images: bool,
    /// Some theme-session package has a record document
    pub theme_session_records: bool,
}

impl ResourceHealth {
    /// Whether everything is in place
    pub fn is_complete(&self) -> bool {
        self.labor
            && self.military
            && self.public_speech
            && self.theme_session_images
            && self.theme_session_records
    }
}

impl ResourceResolver {
    /// Categories that resolve to nothing for an org
    pub fn audit(&self, org: &OrgPath) -> Vec<MissingResource> {
        Category::ALL
            .into_iter()
            .filter(|c| self.resolve_dir(*c, org).is_none())
            .map(|category| MissingResource {
                category,
                tried: self.candidates(category, org),
            })
            .collect()
    }

    /// Readiness summary for an org
    pub fn health(&self, org: &OrgPath) -> ResourceHealth {
        let (images, records) = match self.resolve_dir(Category::ThemeSession, org) {
            Some(dir) => {
                let mut folders = vec![dir.clone()];
                folders.extend(sub_packages(&dir).into_iter().map(|(_, p)| p));
                let images = folders.iter().any(|f| contains_file(f, is_image));
                let records = folders
                    .iter()
                    .any(|f| contains_file(f, |p| FormatClass::of(p).is_some()));
                (images, records)
            }
            None => (false, false),
        };

        ResourceHealth {
            labor: self.resolve_dir(Category::Labor, org).is_some(),
            military: self.resolve_dir(Category::Military, org).is_some(),
            public_speech: self.resolve_dir(Category::PublicSpeech, org).is_some(),
            theme_session_images: images,
            theme_session_records: records,
        }
    }
}

fn contains_file(folder: &Path, accept: impl Fn(&Path) -> bool) -> bool {
    WalkDir::new(folder)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .any(|e| e.file_type().is_file() && accept(e.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LayoutConfig;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"0").unwrap();
    }

    #[test]
    fn test_audit_everything_missing() {
        let dir = TempDir::new().unwrap();
        let resolver = ResourceResolver::new(LayoutConfig::with_root(dir.path())).unwrap();
        let org = OrgPath::new("测试学校", "高一", "1班");

        let missing = resolver.audit(&org);
        assert_eq!(missing.len(), 4);
        assert!(missing.iter().any(|m| m.to_string().contains("劳动")));
        assert!(missing.iter().any(|m| m.to_string().contains("主题班会")));
    }

    #[test]
    fn test_audit_partial() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("劳动/测试学校/高一/1班/pic.jpg"));
        let resolver = ResourceResolver::new(LayoutConfig::with_root(dir.path())).unwrap();
        let org = OrgPath::new("测试学校", "高一", "1班");

        let missing = resolver.audit(&org);
        assert!(!missing.iter().any(|m| m.category == Category::Labor));
        assert!(missing.iter().any(|m| m.category == Category::Military));
        assert!(missing.iter().any(|m| m.category == Category::ThemeSession));
    }

    #[test]
    fn test_health_with_nested_packages() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("劳动/测试学校/初一/五班/校园大扫除专项/clean.jpg"));
        touch(&dir.path().join("主题班会/测试学校/初一/五班/2025防火安全/p.jpg"));
        touch(&dir.path().join("主题班会/测试学校/初一/五班/2025防火安全/data.xlsx"));
        let resolver = ResourceResolver::new(LayoutConfig::with_root(dir.path())).unwrap();
        let org = OrgPath::new("测试学校", "初一", "五班");

        let health = resolver.health(&org);
        assert!(health.labor);
        assert!(!health.military);
        assert!(health.theme_session_images);
        assert!(health.theme_session_records);
        assert!(!health.is_complete());
    }

    #[test]
    fn test_health_images_without_records() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("主题班会/A/高二/三班/3.jpg"));
        let resolver = ResourceResolver::new(LayoutConfig::with_root(dir.path())).unwrap();
        let health = resolver.health(&OrgPath::new("A", "高二", "三班"));
        assert!(health.theme_session_images);
        assert!(!health.theme_session_records);
    }
}
