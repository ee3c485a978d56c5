//! Generation report - coverage outlook and statistics for a finished quiz

use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::questions::Question;

/// Whether every vocabulary word can appear as a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Coverage {
    Full,
    /// At least `uncovered` words will never be asked
    Partial { uncovered: usize },
}

/// Coverage expected before generating, from the counts alone
pub fn coverage_outlook(vocabulary_size: usize, question_count: usize) -> Coverage {
    if question_count >= vocabulary_size {
        Coverage::Full
    } else {
        Coverage::Partial {
            uncovered: vocabulary_size - question_count,
        }
    }
}

/// Statistics for one generated question set
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    pub question_count: usize,
    pub option_count: usize,
    pub vocabulary_size: usize,
    pub distinct_words: usize,
    pub distinct_prompts: usize,
    /// Distinct words never used as a prompt
    pub uncovered_words: Vec<String>,
    /// How often each word was the prompt
    pub prompt_frequency: BTreeMap<String, usize>,
    pub generated_at: DateTime<Local>,
}

impl GenerationSummary {
    pub fn is_full_coverage(&self) -> bool {
        self.uncovered_words.is_empty()
    }
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generated {} questions with {} options each from {} words ({} distinct); \
             {} of {} words used as prompts",
            self.question_count,
            self.option_count,
            self.vocabulary_size,
            self.distinct_words,
            self.distinct_prompts,
            self.distinct_words
        )
    }
}

pub fn summarize(words: &[String], questions: &[Question], option_count: usize) -> GenerationSummary {
    let mut prompt_frequency: BTreeMap<String, usize> = BTreeMap::new();
    for q in questions {
        *prompt_frequency.entry(q.prompt.clone()).or_insert(0) += 1;
    }

    let mut seen = HashSet::new();
    let uncovered_words: Vec<String> = words
        .iter()
        .filter(|w| seen.insert(w.as_str()))
        .filter(|w| !prompt_frequency.contains_key(w.as_str()))
        .cloned()
        .collect();

    GenerationSummary {
        question_count: questions.len(),
        option_count,
        vocabulary_size: words.len(),
        distinct_words: seen.len(),
        distinct_prompts: prompt_frequency.len(),
        uncovered_words,
        prompt_frequency,
        generated_at: Local::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(prompt: &str) -> Question {
        Question {
            prompt: prompt.to_string(),
            options: vec![prompt.to_string(), "x".to_string()],
            correct_index: 0,
        }
    }

    #[test]
    fn test_coverage_outlook() {
        assert_eq!(coverage_outlook(5, 5), Coverage::Full);
        assert_eq!(coverage_outlook(5, 12), Coverage::Full);
        assert_eq!(coverage_outlook(10, 4), Coverage::Partial { uncovered: 6 });
    }

    #[test]
    fn test_summarize_counts_and_uncovered() {
        let words: Vec<String> = ["a", "b", "c", "b"].iter().map(|s| s.to_string()).collect();
        let questions = vec![question("a"), question("b"), question("a")];
        let summary = summarize(&words, &questions, 2);

        assert_eq!(summary.question_count, 3);
        assert_eq!(summary.vocabulary_size, 4);
        assert_eq!(summary.distinct_words, 3);
        assert_eq!(summary.distinct_prompts, 2);
        assert_eq!(summary.uncovered_words, vec!["c".to_string()]);
        assert_eq!(summary.prompt_frequency.get("a"), Some(&2));
        assert!(!summary.is_full_coverage());
    }
}
