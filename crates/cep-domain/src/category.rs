//! Special categories and their evidence policies

use std::fmt;
use std::str::FromStr;

/// How far up the organizational hierarchy evidence for a category may come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvidenceScope {
    /// Identical for the whole institution: only `institution/<shared-default>`
    OrgWideShared,
    /// Section folder first, institution shared-default as fallback
    SectionScoped,
    /// Section folder only; an unresolved item must not be submitted
    SectionExclusive,
}

impl EvidenceScope {
    /// Whether a missing section folder blocks submission entirely
    pub fn blocks_when_missing(&self) -> bool {
        matches!(self, EvidenceScope::SectionExclusive)
    }
}

/// A special activity category
///
/// Categories are evaluated independently; one work item can match several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Themed class session with per-topic evidence packages
    ThemeSession,
    /// Labor / cleaning activities
    Labor,
    /// Military / physical training camp
    Military,
    /// Flag-raising public address
    PublicSpeech,
}

impl Category {
    /// All categories in evaluation order
    pub const ALL: [Category; 4] = [
        Category::ThemeSession,
        Category::Labor,
        Category::Military,
        Category::PublicSpeech,
    ];

    /// Order in which a work item matching several categories is handled;
    /// the first match decides which evidence is attached
    pub const SUBMISSION_ORDER: [Category; 4] = [
        Category::PublicSpeech,
        Category::Labor,
        Category::Military,
        Category::ThemeSession,
    ];

    /// Stable identifier used in config files and CLI arguments
    pub fn slug(&self) -> &'static str {
        match self {
            Category::ThemeSession => "theme-session",
            Category::Labor => "labor",
            Category::Military => "military",
            Category::PublicSpeech => "public-speech",
        }
    }

    /// Evidence resolution policy for this category
    pub fn scope(&self) -> EvidenceScope {
        match self {
            Category::ThemeSession => EvidenceScope::SectionExclusive,
            Category::Labor | Category::Military => EvidenceScope::SectionScoped,
            Category::PublicSpeech => EvidenceScope::OrgWideShared,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "theme-session" | "bh" => Ok(Category::ThemeSession),
            "labor" | "labour" | "ld" => Ok(Category::Labor),
            "military" | "physical-training" | "jx" => Ok(Category::Military),
            "public-speech" | "speech" | "gq" => Ok(Category::PublicSpeech),
            other => Err(format!("Unknown category: {}", other)),
        }
    }
}
