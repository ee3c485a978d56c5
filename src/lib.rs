//! Vocabulary Quiz - multiple-choice question generation from word lists
//!
//! Reads a word/translation spreadsheet, builds quiz rows where every word is
//! asked at least once when the question count allows it, and exports them.

mod config;
mod error;
mod excel;
mod export;
mod fuzzy;
mod pipeline;
mod questions;
mod summary;
mod vocab;

pub use config::{CoveragePolicy, QuizConfig, DEFAULT_OPTION_COUNT, DEFAULT_QUESTION_COUNT};
pub use error::{QuizError, Result};
pub use excel::{detect_columns, parse_csv, parse_excel, parse_file, ColumnMapping};
pub use export::{
    build_table, write_questions, AnswerMode, ColumnLabels, ExportOptions, HeaderStyle, OutputFormat,
    PromptSource,
};
pub use fuzzy::{closest_header, normalize_header};
pub use pipeline::{check_coverage, generate_for, run, QuizRun};
pub use questions::{generate, generate_with_seed, shuffled, GenerationRequest, Question, QuestionGenerator};
pub use summary::{coverage_outlook, summarize, Coverage, GenerationSummary};
pub use vocab::{VocabEntry, Vocabulary};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Vocabulary Quiz Python Module
#[cfg(feature = "python")]
#[pymodule]
fn vocab_quiz(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Question generation
    m.add_function(wrap_pyfunction!(questions::py_generate_questions, m)?)?;

    // File parsing (Excel and CSV)
    m.add_function(wrap_pyfunction!(excel::py_parse_vocabulary, m)?)?;

    // Batch export
    m.add_function(wrap_pyfunction!(pipeline::py_export_questions, m)?)?;

    m.add_class::<questions::Question>()?;

    Ok(())
}
