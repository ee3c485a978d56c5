//! Vocabulary model: ordered word + translation pairs

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One row of the source word list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub word: String,
    pub translation: String,
}

impl VocabEntry {
    pub fn new(word: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
        }
    }
}

/// Ordered word list as read from the input file.
///
/// Duplicate words are kept; the generator treats them as separate draw
/// candidates and excludes by value when building distractors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    entries: Vec<VocabEntry>,
}

impl Vocabulary {
    pub fn new(entries: Vec<VocabEntry>) -> Self {
        Self { entries }
    }

    /// Build a vocabulary with no translations
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: words
                .into_iter()
                .map(|w| VocabEntry::new(w, String::new()))
                .collect(),
        }
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The word column, in source order
    pub fn words(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.word.clone()).collect()
    }

    pub fn distinct_words(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.word.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Translation of the first entry whose word equals `word`
    pub fn translation_of(&self, word: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.word == word)
            .map(|e| e.translation.as_str())
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_keep_source_order_and_duplicates() {
        let vocab = Vocabulary::from_words(["cat", "dog", "cat"]);
        assert_eq!(vocab.words(), vec!["cat", "dog", "cat"]);
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.distinct_words(), 2);
    }

    #[test]
    fn test_translation_lookup_first_wins() {
        let vocab = Vocabulary::new(vec![
            VocabEntry::new("bank", "银行"),
            VocabEntry::new("bank", "河岸"),
            VocabEntry::new("tree", ""),
        ]);
        assert_eq!(vocab.translation_of("bank"), Some("银行"));
        assert_eq!(vocab.translation_of("tree"), None);
        assert_eq!(vocab.translation_of("missing"), None);
    }
}
