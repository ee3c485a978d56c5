//! Multiple-choice question generation for vocabulary quizzes
//!
//! Every word is used as a prompt at least once when the requested count
//! allows it; the remaining quota is filled with random prompts. Distractors
//! never repeat within a question and never equal the prompt's text.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[cfg(feature = "python")]
use pyo3::prelude::*;

use crate::error::{QuizError, Result};

/// One quiz row: the prompt word and its shuffled options
#[cfg_attr(feature = "python", pyclass)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[cfg_attr(feature = "python", pyo3(get))]
    pub prompt: String,
    #[cfg_attr(feature = "python", pyo3(get))]
    pub options: Vec<String>,
    #[cfg_attr(feature = "python", pyo3(get))]
    pub correct_index: usize,
}

impl Question {
    pub fn correct_answer(&self) -> &str {
        &self.options[self.correct_index]
    }

    /// 1-based position of the correct option
    pub fn correct_number(&self) -> usize {
        self.correct_index + 1
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl Question {
    fn __repr__(&self) -> String {
        format!(
            "Question(prompt='{}', options={:?}, correct_index={})",
            self.prompt, self.options, self.correct_index
        )
    }
}

/// Requested counts for one generation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub question_count: usize,
    pub option_count: usize,
}

impl GenerationRequest {
    pub fn new(question_count: usize, option_count: usize) -> Self {
        Self {
            question_count,
            option_count,
        }
    }

    /// Reject malformed counts before any randomness is consumed
    pub fn validate(&self, words: &[String]) -> Result<()> {
        if self.question_count < 1 {
            return Err(QuizError::InvalidRequest(
                "question count must be at least 1".to_string(),
            ));
        }
        if self.option_count < 2 {
            return Err(QuizError::InvalidRequest(format!(
                "option count must be at least 2 (got {})",
                self.option_count
            )));
        }
        if words.is_empty() {
            return Err(QuizError::InvalidRequest("vocabulary is empty".to_string()));
        }
        if self.option_count > words.len() {
            return Err(QuizError::InvalidRequest(format!(
                "option count ({}) cannot exceed vocabulary size ({})",
                self.option_count,
                words.len()
            )));
        }
        Ok(())
    }

    pub fn generate<R: Rng + ?Sized>(&self, words: &[String], rng: &mut R) -> Result<Vec<Question>> {
        generate(words, self.question_count, self.option_count, rng)
    }
}

/// Shuffled copy of `items`; the input is left untouched
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}

/// Generate `question_count` questions with `option_count` options each.
///
/// All-or-nothing: any failure returns no questions.
pub fn generate<R: Rng + ?Sized>(
    words: &[String],
    question_count: usize,
    option_count: usize,
    rng: &mut R,
) -> Result<Vec<Question>> {
    GenerationRequest::new(question_count, option_count).validate(words)?;

    // Coverage phase: a permutation of the vocabulary, truncated to the quota
    let mut prompts = shuffled(words, rng);
    prompts.truncate(question_count);

    // Fill phase: independent uniform draws with replacement
    let extra = question_count.saturating_sub(words.len());
    for _ in 0..extra {
        let idx = rng.gen_range(0..words.len());
        prompts.push(words[idx].clone());
    }

    debug!(
        "Generating {} questions ({} coverage, {} fill) with {} options",
        question_count,
        question_count - extra,
        extra,
        option_count
    );

    let questions = prompts
        .into_iter()
        .map(|prompt| build_question(words, prompt, option_count, rng))
        .collect::<Result<Vec<_>>>()?;

    // Interleave coverage and fill questions
    Ok(shuffled(&questions, rng))
}

/// Generate with a fixed seed; identical inputs give identical output
pub fn generate_with_seed(
    words: &[String],
    question_count: usize,
    option_count: usize,
    seed: u64,
) -> Result<Vec<Question>> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(words, question_count, option_count, &mut rng)
}

/// Distinct values of `words` other than `prompt`, in first-seen order
fn distractor_pool(words: &[String], prompt: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    words
        .iter()
        .filter(|w| w.as_str() != prompt)
        .filter(|w| seen.insert(w.as_str()))
        .cloned()
        .collect()
}

fn build_question<R: Rng + ?Sized>(
    words: &[String],
    prompt: String,
    option_count: usize,
    rng: &mut R,
) -> Result<Question> {
    let needed = option_count - 1;
    let pool = distractor_pool(words, &prompt);
    if pool.len() < needed {
        return Err(QuizError::InsufficientDistractors {
            prompt,
            needed,
            available: pool.len(),
        });
    }

    let mut options: Vec<String> = shuffled(&pool, rng).into_iter().take(needed).collect();

    // Build options list with correct answer in random position
    let correct_index = rng.gen_range(0..option_count);
    options.insert(correct_index, prompt.clone());

    Ok(Question {
        prompt,
        options,
        correct_index,
    })
}

/// Generator owning its randomness source, for repeated calls
pub struct QuestionGenerator {
    rng: StdRng,
}

impl QuestionGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn generate(
        &mut self,
        words: &[String],
        question_count: usize,
        option_count: usize,
    ) -> Result<Vec<Question>> {
        generate(words, question_count, option_count, &mut self.rng)
    }
}

impl Default for QuestionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// ============= Python Binding =============

#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "generate_questions", signature = (words, question_count, option_count, seed=None))]
pub fn py_generate_questions(
    words: Vec<String>,
    question_count: usize,
    option_count: usize,
    seed: Option<u64>,
) -> PyResult<Vec<Question>> {
    let questions = match seed {
        Some(seed) => generate_with_seed(&words, question_count, option_count, seed)?,
        None => QuestionGenerator::new().generate(&words, question_count, option_count)?,
    };
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn assert_well_formed(q: &Question, option_count: usize) {
        assert_eq!(q.options.len(), option_count);
        assert_eq!(q.options[q.correct_index], q.prompt);
        let distinct: HashSet<_> = q.options.iter().collect();
        assert_eq!(distinct.len(), option_count, "duplicate option in {:?}", q);
    }

    #[test]
    fn test_scenario_full_coverage_exact() {
        let vocab = words(&["A", "B", "C", "D", "E"]);
        let questions = generate_with_seed(&vocab, 5, 3, 7).unwrap();

        assert_eq!(questions.len(), 5);
        let mut prompts: Vec<_> = questions.iter().map(|q| q.prompt.as_str()).collect();
        prompts.sort();
        assert_eq!(prompts, vec!["A", "B", "C", "D", "E"]);
        for q in &questions {
            assert_well_formed(q, 3);
        }
    }

    #[test]
    fn test_scenario_fill_beyond_vocabulary() {
        let vocab = words(&["A", "B", "C"]);
        let questions = generate_with_seed(&vocab, 10, 2, 99).unwrap();

        assert_eq!(questions.len(), 10);
        let prompts: HashSet<_> = questions.iter().map(|q| q.prompt.as_str()).collect();
        assert_eq!(prompts, ["A", "B", "C"].into_iter().collect());
        for q in &questions {
            assert_well_formed(q, 2);
        }
    }

    #[test]
    fn test_too_many_options_is_invalid() {
        let vocab = words(&["A", "B"]);
        let err = generate_with_seed(&vocab, 2, 3, 1).unwrap_err();
        assert!(matches!(err, QuizError::InvalidRequest(_)));
    }

    #[test]
    fn test_zero_questions_is_invalid() {
        let vocab = words(&["A", "B", "C"]);
        let err = generate_with_seed(&vocab, 0, 2, 1).unwrap_err();
        assert!(matches!(err, QuizError::InvalidRequest(_)));
    }

    #[test]
    fn test_single_option_and_empty_vocabulary_are_invalid() {
        let err = generate_with_seed(&words(&["A", "B"]), 1, 1, 1).unwrap_err();
        assert!(matches!(err, QuizError::InvalidRequest(_)));

        let err = generate_with_seed(&[], 1, 2, 1).unwrap_err();
        assert!(matches!(err, QuizError::InvalidRequest(_)));
    }

    #[test]
    fn test_duplicates_cause_insufficient_distractors() {
        // Three entries but only two distinct values
        let vocab = words(&["A", "A", "B"]);
        let err = generate_with_seed(&vocab, 3, 3, 5).unwrap_err();
        match err {
            QuizError::InsufficientDistractors { needed, available, .. } => {
                assert_eq!(needed, 2);
                assert!(available < 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicates_excluded_by_value() {
        let vocab = words(&["A", "A", "B", "C", "B"]);
        let questions = generate_with_seed(&vocab, 20, 3, 11).unwrap();
        for q in &questions {
            assert_well_formed(q, 3);
        }
    }

    #[test]
    fn test_distractor_pool_dedupes_and_excludes_prompt() {
        let vocab = words(&["A", "B", "A", "C", "B"]);
        assert_eq!(distractor_pool(&vocab, "A"), words(&["B", "C"]));
    }

    #[test]
    fn test_partial_coverage_prompts_are_distinct() {
        let vocab = words(&["A", "B", "C", "D", "E", "F"]);
        let questions = generate_with_seed(&vocab, 4, 2, 3).unwrap();
        let prompts: HashSet<_> = questions.iter().map(|q| q.prompt.as_str()).collect();
        assert_eq!(questions.len(), 4);
        assert_eq!(prompts.len(), 4);
    }

    #[test]
    fn test_same_seed_same_output() {
        let vocab = words(&["one", "two", "three", "four", "five", "six"]);
        let a = generate_with_seed(&vocab, 12, 4, 42).unwrap();
        let b = generate_with_seed(&vocab, 12, 4, 42).unwrap();
        assert_eq!(a, b);

        let mut g1 = QuestionGenerator::with_seed(42);
        let mut g2 = QuestionGenerator::with_seed(42);
        assert_eq!(g1.generate(&vocab, 6, 3).unwrap(), g2.generate(&vocab, 6, 3).unwrap());
    }

    #[test]
    fn test_shuffled_leaves_input_untouched() {
        let vocab = words(&["a", "b", "c", "d"]);
        let mut rng = StdRng::seed_from_u64(0);
        let out = shuffled(&vocab, &mut rng);
        assert_eq!(vocab, words(&["a", "b", "c", "d"]));
        let mut sorted = out.clone();
        sorted.sort();
        assert_eq!(sorted, vocab);
    }

    #[test]
    fn test_correct_helpers() {
        let q = Question {
            prompt: "B".into(),
            options: words(&["A", "B", "C"]),
            correct_index: 1,
        };
        assert_eq!(q.correct_answer(), "B");
        assert_eq!(q.correct_number(), 2);
    }
}
