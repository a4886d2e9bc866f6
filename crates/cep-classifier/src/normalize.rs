//! Title canonicalization for comparison
//!
//! Work-item titles and folder names are typed by hand, in mixed full-width
//! and half-width forms, with inconsistent spacing and quoting. Everything
//! here reduces them to a comparable key.

use std::sync::LazyLock;

use cep_domain::DateToken;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Punctuation and bracket characters dropped by [`normalize`]
const STRIPPED_PUNCTUATION: &str = "，,。．·!！?？:：;；“”\"'‘’《》〈〉()（）【】[]{}<>";

/// Longest quoted subtitle that still counts as a title
const MAX_QUOTED_CHARS: usize = 80;

/// Quote pairs, tried in order
static QUOTE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"《([^《》]+)》",
        r"“([^“”]+)”",
        r#""([^"]+)""#,
        r"『([^『』]+)』",
        r"「([^「」]+)」",
        r"<<(.+?)>>",
        r"〈([^〈〉]+)〉",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("quote pattern is valid"))
    .collect()
});

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\d{1,4}\.)?(\d{1,2})\.(\d{1,2})").expect("date pattern is valid")
});

/// Unicode compatibility normalization (NFKC)
pub fn nfkc(text: &str) -> String {
    text.nfkc().collect()
}

/// Canonical comparison form of a string
///
/// NFKC, then all whitespace and a fixed punctuation set removed, then
/// lower-cased. Empty input yields empty output.
pub fn normalize(text: &str) -> String {
    text.nfkc()
        .filter(|c| !c.is_whitespace() && !STRIPPED_PUNCTUATION.contains(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalized text of the first quoted subtitle, or an empty string
///
/// Quote pairs are tried in a fixed order (book-title marks first); within
/// a pair the first occurrence whose inner text is 1-80 characters wins.
/// The text is NFKC-folded first, so full-width quotes count as ASCII ones.
pub fn extract_quoted_title(text: &str) -> String {
    let text = nfkc(text);
    for pattern in QUOTE_PATTERNS.iter() {
        for caps in pattern.captures_iter(&text) {
            let inner = &caps[1];
            let len = inner.chars().count();
            if (1..=MAX_QUOTED_CHARS).contains(&len) {
                let key = normalize(inner);
                if !key.is_empty() {
                    return key;
                }
            }
        }
    }
    String::new()
}

/// Comparison key: the quoted subtitle if there is one, else the whole text
pub fn normalized_key(text: &str) -> String {
    let quoted = extract_quoted_title(text);
    if quoted.is_empty() {
        normalize(text)
    } else {
        quoted
    }
}

/// First `month.day` token, with an optional leading `year.`
///
/// An out-of-range month or day counts as no token at all.
pub fn extract_date(text: &str) -> Option<DateToken> {
    let text = nfkc(text);
    let caps = DATE_PATTERN.captures(&text)?;
    let month = caps[1].parse::<u32>().ok()?;
    let day = caps[2].parse::<u32>().ok()?;
    DateToken::new(month, day)
}
