//! Quiz configuration: JSON file with defaults, overridable from the CLI

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::export::{AnswerMode, ColumnLabels, ExportOptions, HeaderStyle, OutputFormat, PromptSource};
use crate::questions::GenerationRequest;

pub const DEFAULT_QUESTION_COUNT: usize = 10;
pub const DEFAULT_OPTION_COUNT: usize = 4;

/// What to do when there are fewer questions than words
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoveragePolicy {
    /// Log a warning and continue
    #[default]
    Warn,
    Ignore,
    /// Refuse to generate
    Deny,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub question_count: usize,
    pub option_count: usize,
    pub answer_mode: AnswerMode,
    pub prompt_source: PromptSource,
    pub headers: HeaderStyle,
    pub coverage_policy: CoveragePolicy,
    pub seed: Option<u64>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            option_count: DEFAULT_OPTION_COUNT,
            answer_mode: AnswerMode::default(),
            prompt_source: PromptSource::default(),
            headers: HeaderStyle::default(),
            coverage_policy: CoveragePolicy::default(),
            seed: None,
        }
    }
}

impl QuizConfig {
    /// Load from a JSON file; missing keys keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn request(&self) -> GenerationRequest {
        GenerationRequest::new(self.question_count, self.option_count)
    }

    pub fn export_options(&self, format: OutputFormat) -> ExportOptions {
        ExportOptions {
            answer_mode: self.answer_mode,
            prompt_source: self.prompt_source,
            labels: ColumnLabels::from(self.headers),
            format,
        }
    }
}
