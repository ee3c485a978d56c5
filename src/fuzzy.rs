//! Header matching for vocabulary files
//!
//! Exact alias matching decides which column is which. Fuzzy similarity is
//! only used to suggest a fix when a required column is missing.

use strsim::{jaro_winkler, normalized_levenshtein};

pub const WORD_ALIASES: &[&str] = &["word", "words", "vocabulary", "单词"];

pub const TRANSLATION_ALIASES: &[&str] = &[
    "translation",
    "translations",
    "meaning",
    "meanings",
    "definition",
    "中文翻译",
    "中文",
    "翻译",
];

/// Minimum similarity for a header to be offered as a suggestion
pub const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Trim surrounding whitespace and lowercase
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

pub fn matches_alias(header: &str, aliases: &[&str]) -> bool {
    let normalized = normalize_header(header);
    aliases.iter().any(|a| *a == normalized)
}

/// Similarity between two headers in [0, 1]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize_header(a);
    let b = normalize_header(b);
    if a == b {
        return 1.0;
    }

    // Weighted average (Jaro-Winkler is better for typos)
    normalized_levenshtein(&a, &b) * 0.4 + jaro_winkler(&a, &b) * 0.6
}

/// Header that most resembles one of `aliases`, if it clears the threshold
pub fn closest_header<'a>(headers: &'a [String], aliases: &[&str]) -> Option<&'a str> {
    headers
        .iter()
        .filter(|h| !h.trim().is_empty())
        .map(|h| {
            let best = aliases
                .iter()
                .map(|a| similarity(h, a))
                .fold(0.0_f64, f64::max);
            (h.as_str(), best)
        })
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(h, _)| h)
}
