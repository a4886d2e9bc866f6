//! Fuzzy matching of work-item titles against evidence folder names

use cep_domain::DateToken;
use tracing::debug;

use crate::config::MatchConfig;
use crate::normalize::{extract_date, nfkc, normalized_key};

/// Ratcliff/Obershelp similarity of two strings, in `[0, 1]`
///
/// `2 * M / (|a| + |b|)` where `M` counts characters in recursively found
/// longest common blocks. Two empty strings are identical (1.0).
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_block(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    matched
}

/// Longest common block in `a[alo..ahi]` / `b[blo..bhi]`, earliest on ties
fn longest_block(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let width = bhi - blo;
    let mut best = (alo, blo, 0);
    let mut prev = vec![0usize; width + 1];
    let mut cur = vec![0usize; width + 1];

    for i in alo..ahi {
        cur.iter_mut().for_each(|v| *v = 0);
        for j in blo..bhi {
            if a[i] == b[j] {
                let run = prev[j - blo] + 1;
                cur[j - blo + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    best
}

/// A candidate that won [`best_match`]
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch<'a> {
    /// Position in the candidate slice
    pub index: usize,
    /// The winning candidate
    pub candidate: &'a str,
    /// Similarity of the normalized keys
    pub similarity: f64,
    /// Date agreement score (bonus, penalty or zero)
    pub date_score: i32,
}

#[derive(Debug)]
struct Scored {
    index: usize,
    similarity: f64,
    date_score: i32,
    key_len: usize,
    raw_similarity: f64,
}

impl Scored {
    fn outranks(&self, other: &Scored) -> bool {
        if self.date_score != other.date_score {
            return self.date_score > other.date_score;
        }
        if self.similarity != other.similarity {
            return self.similarity > other.similarity;
        }
        if self.key_len != other.key_len {
            return self.key_len > other.key_len;
        }
        // Equal keys: the name closest to the untouched title wins
        self.raw_similarity > other.raw_similarity
    }
}

/// Date agreement between two optional tokens
pub fn date_score(a: Option<DateToken>, b: Option<DateToken>, config: &MatchConfig) -> i32 {
    match (a, b) {
        (Some(a), Some(b)) if a == b => config.date_match_bonus,
        (Some(_), Some(_)) => config.date_conflict_penalty,
        _ => 0,
    }
}

/// Pick the candidate folder name that best fits a title
///
/// Candidates are ranked by date score, then key similarity, then key
/// length, then similarity of the raw names; earlier candidates win exact
/// ties. The winner is rejected when
/// its dates conflict and its similarity stays under the weak floor.
/// Candidates without evidence files must be filtered out by the caller.
pub fn best_match<'a, S: AsRef<str>>(
    title: &str,
    candidates: &'a [S],
    config: &MatchConfig,
) -> Option<FuzzyMatch<'a>> {
    let target_key = normalized_key(title);
    let target_date = extract_date(title);
    let target_raw = nfkc(title);

    let mut best: Option<Scored> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let name = candidate.as_ref();
        let key = normalized_key(name);
        let scored = Scored {
            index,
            similarity: sequence_ratio(&target_key, &key),
            date_score: date_score(target_date, extract_date(name), config),
            key_len: key.chars().count(),
            raw_similarity: sequence_ratio(&target_raw, &nfkc(name)),
        };
        if best.as_ref().is_none_or(|b| scored.outranks(b)) {
            best = Some(scored);
        }
    }

    let best = best?;
    let candidate = candidates[best.index].as_ref();
    if best.date_score < 0 && best.similarity < config.weak_similarity_floor {
        debug!(
            title,
            candidate,
            similarity = best.similarity,
            "Rejected best match: date conflict with weak similarity"
        );
        return None;
    }

    debug!(title, candidate, similarity = best.similarity, date_score = best.date_score, "Matched folder");
    Some(FuzzyMatch {
        index: best.index,
        candidate,
        similarity: best.similarity,
        date_score: best.date_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_basics() {
        assert_eq!(sequence_ratio("", ""), 1.0);
        assert_eq!(sequence_ratio("abc", ""), 0.0);
        assert_eq!(sequence_ratio("abcd", "abcd"), 1.0);
        assert!((sequence_ratio("abcd", "bcde") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_cjk() {
        let r = sequence_ratio("《百年薪火传,青春报国时》", "《百年薪火传,青春报国时》主题班会");
        assert!(r > 0.85 && r < 0.9);
    }

    #[test]
    fn test_best_match_prefers_quoted_key() {
        let folders = [
            "2025.9.8 Grade1(1) <<Fire Safety>>",
            "2025.9.8 Grade1(1) <<Legal Education>>",
        ];
        let m = best_match("Fire Safety Session", &folders, &MatchConfig::default()).unwrap();
        assert_eq!(m.index, 0);
        assert_eq!(m.candidate, folders[0]);
    }

    #[test]
    fn test_identical_key_scores_one() {
        let folders = ["《网络安全教育》"];
        let m = best_match("高一8班《网络安全教育》", &folders, &MatchConfig::default()).unwrap();
        assert_eq!(m.similarity, 1.0);
    }

    #[test]
    fn test_date_breaks_similarity_tie() {
        let folders = ["9.1《安全教育》", "9.8《安全教育》"];
        let m = best_match("2025.9.8《安全教育》", &folders, &MatchConfig::default()).unwrap();
        assert_eq!(m.index, 1);
        assert_eq!(m.date_score, 2);
    }

    #[test]
    fn test_date_conflict_with_weak_similarity_rejected() {
        let folders = ["10.1《国庆献礼》"];
        assert!(best_match("9.8《安全教育》", &folders, &MatchConfig::default()).is_none());
    }

    #[test]
    fn test_date_conflict_with_strong_similarity_kept() {
        let folders = ["10.1《安全教育》"];
        let m = best_match("9.8《安全教育》", &folders, &MatchConfig::default()).unwrap();
        assert_eq!(m.date_score, -1);
        assert_eq!(m.similarity, 1.0);
    }

    #[test]
    fn test_missing_date_is_neutral() {
        let folders = ["《安全教育》"];
        let m = best_match("9.8《安全教育》", &folders, &MatchConfig::default()).unwrap();
        assert_eq!(m.date_score, 0);
    }

    #[test]
    fn test_equal_keys_prefer_closest_raw_name() {
        let folders = [
            "2025.9.29高一（8）班《百年薪火传青春报国时》",
            "2025.9.29高一（8）班《法制教育》",
            "2025.9.29高一（8）班《百年薪火传，青春报国时》",
        ];
        let m = best_match(
            "主题班会：2025.9.29高一（8）班《百年薪火传，青春报国时》",
            &folders,
            &MatchConfig::default(),
        )
        .unwrap();
        assert_eq!(m.index, 2);
    }

    #[test]
    fn test_date_outranks_similarity() {
        let folders = ["无关文件夹", "2025.10.13 其他活动", "2025.10.13 高一(1)班 “法制教育” 主题班会"];
        let m = best_match("2025.10.13 开展“法制教育”主题班会活动", &folders, &MatchConfig::default()).unwrap();
        assert_eq!(m.index, 2);
    }

    #[test]
    fn test_empty_candidates() {
        let folders: [&str; 0] = [];
        assert!(best_match("anything", &folders, &MatchConfig::default()).is_none());
    }

    #[test]
    fn test_longer_key_wins_tie() {
        // Neither key shares a character with the title, so only length differs.
        let folders = ["《xy》", "《xyz》"];
        let m = best_match("《ab》", &folders, &MatchConfig::default()).unwrap();
        assert_eq!(m.index, 1);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn ratio_is_bounded(a in "\\PC{0,30}", b in "\\PC{0,30}") {
                let r = sequence_ratio(&a, &b);
                prop_assert!((0.0..=1.0).contains(&r));
            }

            #[test]
            fn ratio_of_identical_is_one(a in "\\PC{0,30}") {
                prop_assert_eq!(sequence_ratio(&a, &a), 1.0);
            }
        }
    }
}
