//! Error types shared by parsing, generation and export

use thiserror::Error;

/// Everything that can go wrong between reading a word list and writing the quiz
#[derive(Debug, Error)]
pub enum QuizError {
    /// Malformed counts or an empty vocabulary
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Fewer distinct words than options, even though the raw list is long enough
    #[error("Not enough distinct distractors for '{prompt}': need {needed}, found {available}")]
    InsufficientDistractors {
        prompt: String,
        needed: usize,
        available: usize,
    },

    #[error("Missing required '{column}' column in file header (found: {found}){hint}")]
    MissingColumn {
        column: String,
        found: String,
        hint: String,
    },

    #[error("Unsupported file format: .{0}")]
    UnsupportedFormat(String),

    #[error("Failed to parse vocabulary: {0}")]
    Parse(String),

    #[error(
        "Question count ({question_count}) is below vocabulary size ({vocabulary_size}); \
         not every word can be asked"
    )]
    CoverageDenied {
        question_count: usize,
        vocabulary_size: usize,
    },

    #[error("Export table too large: {0}")]
    TableTooLarge(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QuizError {
    /// True for errors caused by the request itself rather than by I/O
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            QuizError::InvalidRequest(_)
                | QuizError::InsufficientDistractors { .. }
                | QuizError::CoverageDenied { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;

// ============= Python Binding =============

#[cfg(feature = "python")]
impl From<QuizError> for pyo3::PyErr {
    fn from(err: QuizError) -> Self {
        if err.is_request_error() {
            pyo3::exceptions::PyValueError::new_err(err.to_string())
        } else {
            pyo3::exceptions::PyRuntimeError::new_err(err.to_string())
        }
    }
}
