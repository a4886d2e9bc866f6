//! Layered work-item classification
//!
//! Each category is decided independently by the same layers, in order:
//! veto, reality (existing folders), semantic score, structural regex,
//! fallback regex. The first layer that decides short-circuits.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use cep_domain::{Category, WorkItem};
use regex::Regex;
use tracing::debug;

use crate::config::{CategoryRules, ClassifierConfig};
use crate::fuzzy::sequence_ratio;
use crate::normalize::{extract_quoted_title, nfkc, normalize};
use crate::ClassifierError;

/// Convenience for calls without folder evidence
pub const NO_FOLDERS: &[&str] = &[];

static LEADING_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\d{1,4}\.)?\d{1,2}\.\d{1,2}日?").expect("date pattern is valid")
});

/// The layer that settled a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Disallowed substring found; always negative
    Veto,
    /// A known evidence folder matched the title
    Reality,
    /// Weighted keyword score reached the threshold
    Semantic,
    /// Org-unit reference plus a category signal
    Structural,
    /// Category-specific last-resort pattern
    Fallback,
}

/// Outcome of classifying one title for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Whether the title belongs to the category
    pub matched: bool,
    /// The deciding layer, `None` when nothing fired
    pub layer: Option<Layer>,
    /// Semantic score accumulated (0 if the semantic layer was not reached)
    pub score: i32,
}

impl Decision {
    fn accept(layer: Layer, score: i32) -> Self {
        Self { matched: true, layer: Some(layer), score }
    }

    fn reject(layer: Option<Layer>, score: i32) -> Self {
        Self { matched: false, layer, score }
    }
}

/// Categories a work item was classified into
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    matched: BTreeSet<Category>,
}

impl Classification {
    /// Whether the given category matched
    pub fn contains(&self, category: Category) -> bool {
        self.matched.contains(&category)
    }

    /// Whether any special category matched
    pub fn is_special(&self) -> bool {
        !self.matched.is_empty()
    }

    /// Matched categories in evaluation order
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.matched.iter().copied()
    }

    /// Category that decides how the item is handled: the first match in
    /// [`Category::SUBMISSION_ORDER`]
    pub fn primary(&self) -> Option<Category> {
        Category::SUBMISSION_ORDER
            .into_iter()
            .find(|c| self.matched.contains(c))
    }

    /// Result for every category
    pub fn as_map(&self) -> BTreeMap<Category, bool> {
        Category::ALL.iter().map(|c| (*c, self.contains(*c))).collect()
    }
}

struct CompiledRules {
    hint_keywords: Vec<String>,
    markers: Vec<String>,
    secondary_keywords: Vec<String>,
    fallback: Vec<Regex>,
    reality_check: bool,
}

impl CompiledRules {
    fn compile(rules: &CategoryRules) -> Result<Self, ClassifierError> {
        let fallback = rules
            .fallback_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            hint_keywords: normalized_list(&rules.hint_keywords),
            markers: normalized_list(&rules.markers),
            secondary_keywords: normalized_list(&rules.secondary_keywords),
            fallback,
            reality_check: rules.reality_check,
        })
    }
}

fn normalized_list(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| normalize(s))
        .filter(|s| !s.is_empty())
        .collect()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}

/// The layered classifier
pub struct Classifier {
    config: ClassifierConfig,
    veto: Vec<String>,
    org_unit: Regex,
    rules: BTreeMap<Category, CompiledRules>,
}

impl Classifier {
    /// Build a classifier, compiling every configured pattern
    pub fn new(config: ClassifierConfig) -> Result<Self, ClassifierError> {
        config.validate().map_err(ClassifierError::Config)?;

        let org_unit = Regex::new(&config.org_unit_pattern)?;
        let mut rules = BTreeMap::new();
        for category in Category::ALL {
            rules.insert(category, CompiledRules::compile(config.rules(category))?);
        }

        Ok(Self {
            veto: normalized_list(&config.veto),
            org_unit,
            rules,
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a title into every category
    pub fn classify<S: AsRef<str>>(
        &self,
        title: &str,
        hint: &str,
        known_folders: &[S],
    ) -> Classification {
        let matched = Category::ALL
            .into_iter()
            .filter(|c| self.evaluate(*c, title, hint, known_folders).matched)
            .collect();
        Classification { matched }
    }

    /// Classify a work item into every category
    pub fn classify_item<S: AsRef<str>>(&self, item: &WorkItem, known_folders: &[S]) -> Classification {
        self.classify(&item.title, &item.category_hint, known_folders)
    }

    /// Whether a title belongs to one category
    pub fn is_category<S: AsRef<str>>(
        &self,
        category: Category,
        title: &str,
        hint: &str,
        known_folders: &[S],
    ) -> bool {
        self.evaluate(category, title, hint, known_folders).matched
    }

    /// Run the layers for one category and report which one decided
    pub fn evaluate<S: AsRef<str>>(
        &self,
        category: Category,
        title: &str,
        hint: &str,
        known_folders: &[S],
    ) -> Decision {
        let key = normalize(title);
        if let Some(term) = self.veto.iter().find(|v| key.contains(v.as_str())) {
            debug!(%category, title, term = term.as_str(), "Vetoed");
            return Decision::reject(Some(Layer::Veto), 0);
        }

        let Some(rules) = self.rules.get(&category) else {
            return Decision::reject(None, 0);
        };

        if rules.reality_check && self.confirmed_by_folder(title, known_folders) {
            debug!(%category, title, "Confirmed by existing folder");
            return Decision::accept(Layer::Reality, 0);
        }

        let hint_hit = contains_any(&normalize(hint), &rules.hint_keywords);
        let marker_hit = contains_any(&key, &rules.markers);

        let weights = &self.config.weights;
        let mut score = 0;
        if hint_hit {
            score += weights.hint;
        }
        if marker_hit {
            score += weights.marker;
        }
        if !extract_quoted_title(title).is_empty() {
            score += weights.quoted;
        }
        if contains_any(&key, &rules.secondary_keywords) {
            score += weights.secondary;
        }
        if title.trim().chars().count() > weights.long_title_chars {
            score += weights.long_title;
        }
        if score >= weights.threshold {
            debug!(%category, title, score, "Semantic match");
            return Decision::accept(Layer::Semantic, score);
        }

        let canonical = nfkc(title);
        if (hint_hit || marker_hit) && self.org_unit.is_match(&canonical) {
            debug!(%category, title, "Structural match");
            return Decision::accept(Layer::Structural, score);
        }

        let compact: String = canonical.chars().filter(|c| !c.is_whitespace()).collect();
        if rules.fallback.iter().any(|re| re.is_match(&compact)) {
            debug!(%category, title, "Fallback match");
            return Decision::accept(Layer::Fallback, score);
        }

        Decision::reject(None, score)
    }

    fn confirmed_by_folder<S: AsRef<str>>(&self, title: &str, known_folders: &[S]) -> bool {
        if known_folders.is_empty() {
            return false;
        }
        let stripped_title = self.strip_context(title);
        if stripped_title.is_empty() {
            return false;
        }
        known_folders.iter().any(|folder| {
            let stripped_folder = self.strip_context(folder.as_ref());
            !stripped_folder.is_empty()
                && sequence_ratio(&stripped_title, &stripped_folder) > self.config.reality_threshold
        })
    }

    /// Title with its date token, org-unit references and whitespace removed
    pub fn strip_context(&self, text: &str) -> String {
        let canonical = nfkc(text);
        let without_date = LEADING_DATE.replace(&canonical, "");
        let without_unit = self.org_unit.replace_all(&without_date, "");
        without_unit.chars().filter(|c| !c.is_whitespace()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::new(ClassifierConfig::default()).unwrap()
    }

    fn theme(title: &str, hint: &str) -> bool {
        classifier().is_category(Category::ThemeSession, title, hint, NO_FOLDERS)
    }

    fn labor(title: &str, hint: &str) -> bool {
        classifier().is_category(Category::Labor, title, hint, NO_FOLDERS)
    }

    #[test]
    fn test_quoted_title_with_moral_hint() {
        assert!(theme("2025.9.29高一（ 8 ）班《百年薪火传，青春报国时》", "思想品德"));
    }

    #[test]
    fn test_structural_layer() {
        let c = classifier();
        let d = c.evaluate(Category::ThemeSession, "高三  12  班主题活动", "思想品德", NO_FOLDERS);
        assert!(d.matched);
        assert_eq!(d.layer, Some(Layer::Structural));
    }

    #[test]
    fn test_structural_requires_signal() {
        assert!(!theme("高三12班活动", "其它"));
    }

    #[test]
    fn test_veto_terms() {
        assert!(!theme("《主题班会》学习报告", "思想品德"));
        assert!(!theme("主题班会签到", "思想品德"));
        assert!(!labor("劳动素养自我评价", "劳动"));
        assert!(!labor("Student Labor Literacy Self-Assessment", "Labor"));

        let d = classifier().evaluate(Category::Labor, "劳动证书上传", "劳动", NO_FOLDERS);
        assert_eq!(d.layer, Some(Layer::Veto));
    }

    #[test]
    fn test_plain_section_words_are_not_sessions() {
        assert!(!theme("班级活动", "思想品德"));
        assert!(!theme("这个班不一般", "其它"));
    }

    #[test]
    fn test_quote_and_secondary_reach_threshold() {
        assert!(theme("《网络安全教育》", "其它"));
    }

    #[test]
    fn test_marker_alone_is_enough() {
        assert!(theme("感恩班会", "其它"));
        assert!(labor("校园卫生大扫除", "劳动"));
        assert!(labor("教室清洁", "其它"));
    }

    #[test]
    fn test_fallback_pattern() {
        let c = classifier();
        let d = c.evaluate(Category::ThemeSession, "八班“阳光”", "其它", NO_FOLDERS);
        // quoted (5) alone is below threshold, the fallback pattern catches it
        assert!(d.matched);
        assert_eq!(d.layer, Some(Layer::Fallback));
        assert!(!theme("高一年级“阳光”", "其它"));
    }

    #[test]
    fn test_reality_layer() {
        let c = classifier();
        let folders = ["《百年薪火传，青春报国时》主题班会"];
        let d = c.evaluate(
            Category::ThemeSession,
            "2025.9.29高一（ 8 ）班《百年薪火传，青春报国时》",
            "其它",
            &folders,
        );
        assert_eq!(d.layer, Some(Layer::Reality));
    }

    #[test]
    fn test_reality_layer_only_for_theme_session() {
        let c = classifier();
        let folders = ["门口值周"];
        assert!(!c.is_category(Category::Labor, "门口值周", "其它", &folders));
        assert!(c.is_category(Category::ThemeSession, "门口值周", "其它", &folders));
    }

    #[test]
    fn test_strip_context() {
        let c = classifier();
        assert_eq!(c.strip_context("2025.9.29日 高一（ 8 ）班 《主题》"), "《主题》");
        assert_eq!(c.strip_context("9.8 Grade1(1) <<Fire Safety>>"), "<<FireSafety>>");
    }

    #[test]
    fn test_english_scenarios() {
        let c = classifier();
        assert!(c.is_category(
            Category::ThemeSession,
            "2025.9.29 Grade1(8) Special Session <<Heritage and Duty>>",
            "Moral Education",
            NO_FOLDERS,
        ));
        assert!(c.is_category(Category::Labor, "Campus Cleaning Day", "Labor", NO_FOLDERS));
    }

    #[test]
    fn test_other_categories() {
        let c = classifier();
        let military = c.classify("2025级新生军训总结", "军训", NO_FOLDERS);
        assert!(military.contains(Category::Military));
        assert!(!military.contains(Category::Labor));

        let speech = c.classify("第五周国旗下讲话", "其它", NO_FOLDERS);
        assert!(speech.contains(Category::PublicSpeech));
        assert_eq!(speech.primary(), Some(Category::PublicSpeech));
    }

    #[test]
    fn test_primary_follows_submission_order() {
        let both = Classification {
            matched: [Category::ThemeSession, Category::Labor].into_iter().collect(),
        };
        assert_eq!(both.primary(), Some(Category::Labor));

        let all = Classification {
            matched: Category::ALL.into_iter().collect(),
        };
        assert_eq!(all.primary(), Some(Category::PublicSpeech));
        assert_eq!(Classification::default().primary(), None);
    }

    #[test]
    fn test_classification_map() {
        let c = classifier();
        let result = c.classify("普通阅读任务", "其它", NO_FOLDERS);
        assert!(!result.is_special());
        let map = result.as_map();
        assert_eq!(map.len(), 4);
        assert!(map.values().all(|v| !v));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let mut config = ClassifierConfig::default();
        config.labor.fallback_patterns.push("(unclosed".to_string());
        assert!(matches!(Classifier::new(config), Err(ClassifierError::InvalidPattern(_))));
    }
}
