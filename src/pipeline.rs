//! Batch front end: read a word list, generate, export

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

use crate::config::{CoveragePolicy, QuizConfig};
use crate::error::{QuizError, Result};
use crate::excel::parse_file;
use crate::export::{build_table, write_questions, ExportOptions, OutputFormat};
use crate::questions::Question;
use crate::summary::{coverage_outlook, summarize, Coverage, GenerationSummary};
use crate::vocab::Vocabulary;

#[cfg(feature = "python")]
use crate::export::AnswerMode;
#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Apply the caller's policy for question counts below the vocabulary size
pub fn check_coverage(policy: CoveragePolicy, vocabulary_size: usize, question_count: usize) -> Result<()> {
    let Coverage::Partial { uncovered } = coverage_outlook(vocabulary_size, question_count) else {
        return Ok(());
    };

    match policy {
        CoveragePolicy::Ignore => Ok(()),
        CoveragePolicy::Warn => {
            warn!(
                "Question count ({}) is below vocabulary size ({}); at least {} words will not be asked",
                question_count, vocabulary_size, uncovered
            );
            Ok(())
        }
        CoveragePolicy::Deny => Err(QuizError::CoverageDenied {
            question_count,
            vocabulary_size,
        }),
    }
}

/// Generate questions for an already-loaded vocabulary
pub fn generate_for(vocab: &Vocabulary, config: &QuizConfig) -> Result<Vec<Question>> {
    let request = config.request();
    let words = vocab.words();
    request.validate(&words)?;
    check_coverage(config.coverage_policy, words.len(), request.question_count)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    request.generate(&words, &mut rng)
}

/// Everything produced by one batch run
#[derive(Debug, Clone)]
pub struct QuizRun {
    pub vocabulary: Vocabulary,
    pub questions: Vec<Question>,
    pub options: ExportOptions,
    pub summary: GenerationSummary,
}

impl QuizRun {
    /// The exported table, header row first
    pub fn table(&self) -> Vec<Vec<String>> {
        build_table(&self.questions, &self.vocabulary, &self.options)
    }
}

/// Read `input`, generate per `config`, and write to `output`
pub fn run(config: &QuizConfig, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<QuizRun> {
    let output = output.as_ref();
    let options = config.export_options(OutputFormat::from_path(output)?);

    let vocabulary = parse_file(input)?;
    let questions = generate_for(&vocabulary, config)?;
    write_questions(output, &questions, &vocabulary, &options)?;

    let summary = summarize(&vocabulary.words(), &questions, config.option_count);
    info!("{}", summary);

    Ok(QuizRun {
        vocabulary,
        questions,
        options,
        summary,
    })
}

// ============= Python Binding =============

/// Returns the number of questions written
#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(
    name = "export_questions",
    signature = (input, output, question_count, option_count, answer_mode="label", seed=None)
)]
pub fn py_export_questions(
    input: &str,
    output: &str,
    question_count: usize,
    option_count: usize,
    answer_mode: &str,
    seed: Option<u64>,
) -> PyResult<usize> {
    let answer_mode = match answer_mode.to_lowercase().as_str() {
        "label" => AnswerMode::Label,
        "text" => AnswerMode::Text,
        other => {
            return Err(pyo3::exceptions::PyValueError::new_err(format!(
                "Unknown answer mode: {}",
                other
            )))
        }
    };

    let config = QuizConfig {
        question_count,
        option_count,
        answer_mode,
        seed,
        ..QuizConfig::default()
    };
    Ok(run(&config, input, output)?.summary.question_count)
}
