//! Organizational identity: institution, cohort and section

use std::fmt;
use std::path::{Path, PathBuf};

/// Characters that cannot appear in a path component on common filesystems
const ILLEGAL_PATH_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Make a string safe to use as a single path component
///
/// Illegal characters and control characters become `_`, whitespace is removed.
/// Applying it twice gives the same result as applying it once.
pub fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            if ILLEGAL_PATH_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// An `(institution, cohort, section)` triple with every component sanitized
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrgPath {
    institution: String,
    cohort: String,
    section: String,
}

impl OrgPath {
    /// Build an org path from raw platform labels
    ///
    /// The platform sometimes reports the section with the cohort as prefix
    /// (`高一` / `高一八班`); the prefix is dropped so folders are named `八班`.
    pub fn new(
        institution: impl AsRef<str>,
        cohort: impl AsRef<str>,
        section: impl AsRef<str>,
    ) -> Self {
        let cohort_raw = cohort.as_ref().trim();
        let section_raw = section.as_ref().trim();
        let section_raw = match section_raw.strip_prefix(cohort_raw) {
            Some(rest) if !cohort_raw.is_empty() && !rest.trim().is_empty() => rest,
            _ => section_raw,
        };

        Self {
            institution: sanitize_component(institution.as_ref()),
            cohort: sanitize_component(cohort_raw),
            section: sanitize_component(section_raw),
        }
    }

    /// Sanitized institution name
    pub fn institution(&self) -> &str {
        &self.institution
    }

    /// Sanitized cohort name
    pub fn cohort(&self) -> &str {
        &self.cohort
    }

    /// Sanitized section name, cohort prefix removed
    pub fn section(&self) -> &str {
        &self.section
    }

    /// `base/institution`
    pub fn institution_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.institution)
    }

    /// `base/institution/cohort/section`
    pub fn section_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.institution)
            .join(&self.cohort)
            .join(&self.section)
    }
}

impl fmt::Display for OrgPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.institution, self.cohort, self.section)
    }
}
