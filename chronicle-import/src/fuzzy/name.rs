//! Name Similarity Scorer
//!
//! Scores two personal names in `[0, 1]`:
//! 1. Blank on either side → 0.0
//! 2. Identical after case/whitespace normalization → 1.0
//! 3. Canonical name and one of its nicknames ("William"/"Bill") → 0.9
//! 4. Otherwise normalized Levenshtein similarity `1 - distance / max_len`
//!
//! The score is symmetric in its arguments.

use crate::fuzzy::place::title_case;
use crate::tables::{is_nickname_pair, CANONICAL_NAMES, NICKNAMES};
use serde::{Deserialize, Serialize};

/// Similarity of a canonical name / nickname pair
pub const NICKNAME_SIMILARITY: f64 = 0.9;

/// Normalized personal name with known variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyName {
    pub original: String,
    pub normalized: String,
    pub confidence: f64,
    pub alternatives: Vec<String>,
}

/// Similarity of two personal names using the default nickname score
pub fn calculate_name_similarity(a: &str, b: &str) -> f64 {
    name_similarity_with(a, b, NICKNAME_SIMILARITY)
}

/// Similarity of two personal names with a custom nickname score
pub fn name_similarity_with(a: &str, b: &str, nickname_similarity: f64) -> f64 {
    let a = normalize_name_text(a);
    let b = normalize_name_text(b);

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    if is_nickname_pair(&a, &b) {
        return nickname_similarity;
    }

    levenshtein_similarity(&a, &b)
}

/// Classic Levenshtein edit distance over chars (insert/delete/substitute cost 1)
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// `1 - distance / max(len(a), len(b))`, clamped to `[0, 1]`
///
/// Two empty strings are identical (1.0).
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein_distance(a, b) as f64;
    (1.0 - distance / max_len as f64).clamp(0.0, 1.0)
}

/// Lowercase, trim and collapse internal whitespace
pub fn normalize_name_text(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a personal name for display and list its nickname variants
///
/// A name that is itself a nickname ("Bill") is reported with confidence 0.9
/// and its canonical forms as alternatives; a canonical name ("William")
/// lists its nicknames. Other names keep confidence 1.0.
pub fn normalize_person_name(input: &str) -> FuzzyName {
    let key = normalize_name_text(input);
    if key.is_empty() {
        return FuzzyName {
            original: input.to_string(),
            normalized: String::new(),
            confidence: 0.0,
            alternatives: Vec::new(),
        };
    }

    let normalized = title_case(&key);

    if let Some(canonicals) = CANONICAL_NAMES.get(key.as_str()) {
        return FuzzyName {
            original: input.to_string(),
            normalized,
            confidence: NICKNAME_SIMILARITY,
            alternatives: canonicals.iter().map(|name| title_case(name)).collect(),
        };
    }

    let alternatives = NICKNAMES
        .get(key.as_str())
        .map(|nicknames| nicknames.iter().map(|name| title_case(name)).collect())
        .unwrap_or_default();

    FuzzyName {
        original: input.to_string(),
        normalized,
        confidence: 1.0,
        alternatives,
    }
}
