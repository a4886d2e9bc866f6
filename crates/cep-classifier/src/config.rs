//! Classifier configuration
//!
//! Every threshold and keyword list here was tuned against real platform
//! titles; none of them are invariants, so all of it is overridable from TOML.

use cep_domain::Category;
use serde::{Deserialize, Serialize};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Fuzzy folder matching parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Added when both sides carry the same date token
    pub date_match_bonus: i32,
    /// Added when both sides carry different date tokens (negative)
    pub date_conflict_penalty: i32,
    /// A date-conflicting winner below this similarity is rejected
    pub weak_similarity_floor: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            date_match_bonus: 2,
            date_conflict_penalty: -1,
            weak_similarity_floor: 0.6,
        }
    }
}

impl MatchConfig {
    /// Strict preset: date-conflicting folders need a closer name to match
    pub fn strict() -> Self {
        Self {
            weak_similarity_floor: 0.7,
            ..Self::default()
        }
    }

    /// Lenient preset: date-conflicting folders match on a looser name
    pub fn lenient() -> Self {
        Self {
            weak_similarity_floor: 0.5,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.date_match_bonus <= 0 {
            return Err("date_match_bonus must be positive".to_string());
        }
        if self.date_conflict_penalty >= 0 {
            return Err("date_conflict_penalty must be negative".to_string());
        }
        if !(0.0..=1.0).contains(&self.weak_similarity_floor) {
            return Err("weak_similarity_floor must be within [0.0, 1.0]".to_string());
        }
        Ok(())
    }
}

/// Score weights for the semantic layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticWeights {
    /// Dimension hint contains a category keyword
    pub hint: i32,
    /// Title contains a strong marker phrase
    pub marker: i32,
    /// Title contains a quoted subtitle
    pub quoted: i32,
    /// Title contains any secondary keyword (counted once)
    pub secondary: i32,
    /// Title is longer than `long_title_chars`
    pub long_title: i32,
    /// Character count above which the length bonus applies
    pub long_title_chars: usize,
    /// Score needed to accept
    pub threshold: i32,
}

impl Default for SemanticWeights {
    fn default() -> Self {
        Self {
            hint: 3,
            marker: 10,
            quoted: 5,
            secondary: 2,
            long_title: 1,
            long_title_chars: 15,
            threshold: 7,
        }
    }
}

/// Keyword lists for one category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryRules {
    /// Keywords looked for in the dimension hint
    pub hint_keywords: Vec<String>,
    /// Strong marker phrases looked for in the title
    pub markers: Vec<String>,
    /// Weaker topical keywords looked for in the title
    pub secondary_keywords: Vec<String>,
    /// Last-resort regexes, applied to the whitespace-free NFKC title
    pub fallback_patterns: Vec<String>,
    /// Whether existing evidence folders may confirm the category
    pub reality_check: bool,
}

impl CategoryRules {
    /// Themed class session
    pub fn theme_session() -> Self {
        Self {
            hint_keywords: strings(&["思想", "品德", "德育", "心理", "班会", "moral", "ideolog", "mental", "theme"]),
            markers: strings(&["班会", "class meeting", "theme session"]),
            secondary_keywords: strings(&[
                "教育", "主题", "安全", "励志", "感恩", "诚信", "青春", "爱国",
                "education", "theme", "safety", "session",
            ]),
            fallback_patterns: strings(&[
                r#"(?:^|[^级])班[《“"'‘「『]"#,
                r#"(?i:class)(?:<<|[《“"])"#,
            ]),
            reality_check: true,
        }
    }

    /// Labor and cleaning activities
    pub fn labor() -> Self {
        Self {
            hint_keywords: strings(&["劳动", "labor", "labour"]),
            markers: strings(&[
                "劳动", "保洁", "扫除", "打扫", "卫生", "清洁", "家务", "值日",
                "labor", "labour", "cleaning", "chores", "housework",
            ]),
            secondary_keywords: strings(&["活动", "校园", "教室", "宿舍", "实践", "campus", "dorm", "practice"]),
            fallback_patterns: Vec::new(),
            reality_check: false,
        }
    }

    /// Military / physical training camp
    pub fn military() -> Self {
        Self {
            hint_keywords: strings(&["军训", "国防", "military"]),
            markers: strings(&["军训", "military training"]),
            secondary_keywords: strings(&["训练", "国防", "队列", "training", "drill"]),
            fallback_patterns: Vec::new(),
            reality_check: false,
        }
    }

    /// Flag-raising public address
    pub fn public_speech() -> Self {
        Self {
            hint_keywords: strings(&["国旗", "升旗", "flag"]),
            markers: strings(&["国旗下讲话", "国旗下演讲", "升旗仪式", "flag-raising speech", "public speech"]),
            secondary_keywords: strings(&["升旗", "演讲", "讲话", "speech", "flag"]),
            fallback_patterns: Vec::new(),
            reality_check: false,
        }
    }
}

/// Configuration for the layered classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Substrings that veto every category
    pub veto: Vec<String>,
    /// Similarity above which a known folder confirms the title
    pub reality_threshold: f64,
    /// Regex for an organizational unit reference (cohort + section)
    pub org_unit_pattern: String,
    /// Semantic layer weights
    pub weights: SemanticWeights,
    /// Theme-session rules
    pub theme_session: CategoryRules,
    /// Labor rules
    pub labor: CategoryRules,
    /// Military training rules
    pub military: CategoryRules,
    /// Public speech rules
    pub public_speech: CategoryRules,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            veto: strings(&[
                "评价", "考核", "打卡", "证书", "考试", "志愿", "报告", "作业", "签到",
                "assessment", "evaluation", "grading", "sign-in", "signin",
                "certificate", "exam", "volunteer", "report", "homework",
            ]),
            reality_threshold: 0.85,
            org_unit_pattern: r"[高初][一二三]\s*[(（]?\s*\d{1,2}\s*[)）]?\s*班|(?i:grade)\s*\d{1,2}\s*[(（]\s*\d{1,2}\s*[)）]"
                .to_string(),
            weights: SemanticWeights::default(),
            theme_session: CategoryRules::theme_session(),
            labor: CategoryRules::labor(),
            military: CategoryRules::military(),
            public_speech: CategoryRules::public_speech(),
        }
    }
}

impl ClassifierConfig {
    /// Strict preset: fewer false positives, more items left generic
    pub fn strict() -> Self {
        let mut config = Self::default();
        config.reality_threshold = 0.9;
        config.weights.threshold = 9;
        config
    }

    /// Lenient preset: more items classified as special
    pub fn lenient() -> Self {
        let mut config = Self::default();
        config.reality_threshold = 0.8;
        config.weights.threshold = 5;
        config
    }

    /// Rules for one category
    pub fn rules(&self, category: Category) -> &CategoryRules {
        match category {
            Category::ThemeSession => &self.theme_session,
            Category::Labor => &self.labor,
            Category::Military => &self.military,
            Category::PublicSpeech => &self.public_speech,
        }
    }

    /// Validate the configuration
    ///
    /// Regex syntax is checked when the classifier is built.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.reality_threshold) {
            return Err("reality_threshold must be within [0.0, 1.0]".to_string());
        }
        if self.weights.threshold <= 0 {
            return Err("weights.threshold must be positive".to_string());
        }
        if self.org_unit_pattern.trim().is_empty() {
            return Err("org_unit_pattern cannot be empty".to_string());
        }
        if self.veto.iter().any(|v| v.trim().is_empty()) {
            return Err("veto entries cannot be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ClassifierConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ClassifierConfig::strict().validate().is_ok());
        assert!(ClassifierConfig::lenient().validate().is_ok());
        assert!(ClassifierConfig::strict().weights.threshold > ClassifierConfig::lenient().weights.threshold);
    }

    #[test]
    fn test_invalid_thresholds() {
        let mut config = ClassifierConfig::default();
        config.reality_threshold = 1.5;
        assert!(config.validate().is_err());

        let mut config = MatchConfig::default();
        config.date_conflict_penalty = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_match_presets() {
        assert!(MatchConfig::strict().validate().is_ok());
        assert!(MatchConfig::lenient().validate().is_ok());
        assert!(MatchConfig::strict().weak_similarity_floor > MatchConfig::default().weak_similarity_floor);
        assert!(MatchConfig::lenient().weak_similarity_floor < MatchConfig::default().weak_similarity_floor);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ClassifierConfig::from_toml(
            r#"
            reality_threshold = 0.9

            [weights]
            threshold = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.reality_threshold, 0.9);
        assert_eq!(config.weights.threshold, 8);
        assert_eq!(config.weights.marker, 10);
        assert_eq!(config.labor, CategoryRules::labor());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ClassifierConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ClassifierConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_rules_lookup() {
        let config = ClassifierConfig::default();
        assert!(config.rules(Category::ThemeSession).reality_check);
        assert!(!config.rules(Category::Labor).reality_check);
    }
}
