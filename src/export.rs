//! Quiz export to spreadsheet (xlsx / csv) or JSON

use log::info;
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{QuizError, Result};
use crate::questions::Question;
use crate::vocab::Vocabulary;

/// What the correct-answer column contains
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerMode {
    /// Header of the correct option column, e.g. "Option 2"
    #[default]
    Label,
    /// The correct word itself
    Text,
}

/// What the prompt column shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptSource {
    #[default]
    Word,
    /// The prompt's translation, falling back to the word when it has none
    Translation,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderStyle {
    #[default]
    English,
    Chinese,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl OutputFormat {
    /// Infer from the file extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" => Ok(OutputFormat::Xlsx),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(QuizError::UnsupportedFormat(extension)),
        }
    }
}

/// Column headers of the exported table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLabels {
    pub prompt: String,
    pub option_prefix: String,
    pub answer: String,
    /// Put a space between the option prefix and its number
    pub spaced: bool,
}

impl ColumnLabels {
    pub fn english() -> Self {
        Self {
            prompt: "Prompt".to_string(),
            option_prefix: "Option".to_string(),
            answer: "Answer".to_string(),
            spaced: true,
        }
    }

    pub fn chinese() -> Self {
        Self {
            prompt: "题干".to_string(),
            option_prefix: "选项".to_string(),
            answer: "正确选项".to_string(),
            spaced: false,
        }
    }

    /// Label of the 1-based option column `number`
    pub fn option(&self, number: usize) -> String {
        if self.spaced {
            format!("{} {}", self.option_prefix, number)
        } else {
            format!("{}{}", self.option_prefix, number)
        }
    }

    pub fn header_row(&self, option_count: usize) -> Vec<String> {
        let mut row = Vec::with_capacity(option_count + 2);
        row.push(self.prompt.clone());
        row.extend((1..=option_count).map(|n| self.option(n)));
        row.push(self.answer.clone());
        row
    }
}

impl From<HeaderStyle> for ColumnLabels {
    fn from(style: HeaderStyle) -> Self {
        match style {
            HeaderStyle::English => ColumnLabels::english(),
            HeaderStyle::Chinese => ColumnLabels::chinese(),
        }
    }
}

impl Default for ColumnLabels {
    fn default() -> Self {
        ColumnLabels::english()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub answer_mode: AnswerMode,
    pub prompt_source: PromptSource,
    pub labels: ColumnLabels,
    pub format: OutputFormat,
}

/// Header row followed by one row per question
pub fn build_table(questions: &[Question], vocab: &Vocabulary, options: &ExportOptions) -> Vec<Vec<String>> {
    let option_count = questions.first().map(|q| q.options.len()).unwrap_or(0);

    let mut table = Vec::with_capacity(questions.len() + 1);
    table.push(options.labels.header_row(option_count));

    for q in questions {
        let prompt = match options.prompt_source {
            PromptSource::Word => q.prompt.clone(),
            PromptSource::Translation => vocab
                .translation_of(&q.prompt)
                .unwrap_or(&q.prompt)
                .to_string(),
        };
        let answer = match options.answer_mode {
            AnswerMode::Label => options.labels.option(q.correct_number()),
            AnswerMode::Text => q.correct_answer().to_string(),
        };

        let mut row = Vec::with_capacity(option_count + 2);
        row.push(prompt);
        row.extend(q.options.iter().cloned());
        row.push(answer);
        table.push(row);
    }

    table
}

/// Write the questions in the configured format
pub fn write_questions(
    path: impl AsRef<Path>,
    questions: &[Question],
    vocab: &Vocabulary,
    options: &ExportOptions,
) -> Result<()> {
    let path = path.as_ref();
    let table = build_table(questions, vocab, options);

    match options.format {
        OutputFormat::Xlsx => write_xlsx(path, &table)?,
        OutputFormat::Csv => write_csv(path, &table)?,
        OutputFormat::Json => write_json(path, &table)?,
    }

    info!(
        "Wrote {} questions to {} ({:?})",
        questions.len(),
        path.display(),
        options.format
    );
    Ok(())
}

/// Worksheet coordinates for a table cell
fn cell_position(row: usize, col: usize) -> Result<(u32, u16)> {
    let r = u32::try_from(row)
        .map_err(|_| QuizError::TableTooLarge(format!("row {} exceeds worksheet limits", row)))?;
    let c = u16::try_from(col)
        .map_err(|_| QuizError::TableTooLarge(format!("column {} exceeds worksheet limits", col)))?;
    Ok((r, c))
}

fn write_xlsx(path: &Path, table: &[Vec<String>]) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Questions")?;

    for (r, row) in table.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let (xr, xc) = cell_position(r, c)?;
            if r == 0 {
                worksheet.write_string_with_format(xr, xc, cell, &bold)?;
            } else {
                worksheet.write_string(xr, xc, cell)?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn write_csv(path: &Path, table: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in table {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Array of objects keyed by header
fn write_json(path: &Path, table: &[Vec<String>]) -> Result<()> {
    let records = table_to_records(table);
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}

fn table_to_records(table: &[Vec<String>]) -> Vec<Value> {
    let Some((header, rows)) = table.split_first() else {
        return Vec::new();
    };

    rows.iter()
        .map(|row| {
            let object: Map<String, Value> = header
                .iter()
                .zip(row)
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            Value::Object(object)
        })
        .collect()
}
