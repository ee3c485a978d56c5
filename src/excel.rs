//! File parsing for vocabulary import (Excel and CSV)

use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use log::{debug, info};
use std::path::Path;

#[cfg(feature = "python")]
use pyo3::prelude::*;

use crate::error::{QuizError, Result};
use crate::fuzzy::{closest_header, matches_alias, TRANSLATION_ALIASES, WORD_ALIASES};
use crate::vocab::{VocabEntry, Vocabulary};

/// Parse a vocabulary file, picking the reader from the extension
pub fn parse_file(file_path: impl AsRef<Path>) -> Result<Vocabulary> {
    let path = file_path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let vocab = match extension.as_str() {
        "xlsx" | "xls" | "xlsm" | "ods" => parse_excel(path)?,
        "csv" => parse_csv(path)?,
        _ => return Err(QuizError::UnsupportedFormat(extension)),
    };

    info!(
        "Read {} words ({} distinct) from {}",
        vocab.len(),
        vocab.distinct_words(),
        path.display()
    );
    Ok(vocab)
}

/// Column index mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub word: usize,
    pub translation: usize,
}

/// Detect column indices from header names
pub fn detect_columns(headers: &[String]) -> Result<ColumnMapping> {
    let word = headers.iter().position(|h| matches_alias(h, WORD_ALIASES));
    let translation = headers
        .iter()
        .position(|h| matches_alias(h, TRANSLATION_ALIASES));

    match (word, translation) {
        (Some(word), Some(translation)) => {
            debug!("Detected columns: word={}, translation={}", word, translation);
            Ok(ColumnMapping { word, translation })
        }
        (None, _) => Err(missing_column("Word", headers, WORD_ALIASES)),
        (_, None) => Err(missing_column("Translation", headers, TRANSLATION_ALIASES)),
    }
}

fn missing_column(column: &str, headers: &[String], aliases: &[&str]) -> QuizError {
    let hint = closest_header(headers, aliases)
        .map(|h| format!(". Did you mean '{}'?", h.trim()))
        .unwrap_or_default();

    QuizError::MissingColumn {
        column: column.to_string(),
        found: headers.join(", "),
        hint,
    }
}

/// Build entries from stringified rows, skipping rows without a word
fn collect_entries<I>(rows: I, mapping: ColumnMapping) -> Vocabulary
where
    I: IntoIterator<Item = Vec<String>>,
{
    let entries = rows
        .into_iter()
        .filter_map(|row| {
            let word = row.get(mapping.word).map(|s| s.trim()).unwrap_or("");
            if word.is_empty() {
                return None;
            }
            let translation = row
                .get(mapping.translation)
                .map(|s| s.trim())
                .unwrap_or("");
            Some(VocabEntry::new(word, translation))
        })
        .collect();

    Vocabulary::new(entries)
}

/// Parse the first sheet of a workbook
pub fn parse_excel(file_path: impl AsRef<Path>) -> Result<Vocabulary> {
    let mut workbook = open_workbook_auto(file_path.as_ref())?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| QuizError::Parse("No sheets found in workbook".to_string()))?;

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();

    let header_row = rows
        .next()
        .ok_or_else(|| QuizError::Parse("Empty file - no header row".to_string()))?;
    let headers: Vec<String> = header_row.iter().map(get_cell_string).collect();
    let mapping = detect_columns(&headers)?;

    Ok(collect_entries(
        rows.map(|row| row.iter().map(get_cell_string).collect()),
        mapping,
    ))
}

/// Parse a CSV file with a header row
pub fn parse_csv(file_path: impl AsRef<Path>) -> Result<Vocabulary> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(file_path.as_ref())?;

    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(QuizError::Parse("Empty file - no header row".to_string()));
    }
    let mapping = detect_columns(&headers)?;

    let rows = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(|s| s.to_string()).collect::<Vec<_>>()))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(collect_entries(rows, mapping))
}

/// Helper to extract string from Excel cell
fn get_cell_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
        Data::Empty => String::new(),
    }
}

// ============= Python Binding =============

/// Returns (word, translation) pairs
#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "parse_vocabulary")]
pub fn py_parse_vocabulary(file_path: &str) -> PyResult<Vec<(String, String)>> {
    let vocab = parse_file(file_path)?;
    Ok(vocab
        .entries()
        .iter()
        .map(|e| (e.word.clone(), e.translation.clone()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_detect_columns_tolerant() {
        let mapping = detect_columns(&headers(&["id", " Word ", "TRANSLATION"])).unwrap();
        assert_eq!(mapping, ColumnMapping { word: 1, translation: 2 });

        let mapping = detect_columns(&headers(&["中文翻译", "单词"])).unwrap();
        assert_eq!(mapping, ColumnMapping { word: 1, translation: 0 });
    }

    #[test]
    fn test_detect_columns_missing_translation() {
        let err = detect_columns(&headers(&["word", "notes"])).unwrap_err();
        match err {
            QuizError::MissingColumn { column, found, .. } => {
                assert_eq!(column, "Translation");
                assert_eq!(found, "word, notes");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_detect_columns_hint_for_typo() {
        let err = detect_columns(&headers(&["Word:", "meaning"])).unwrap_err();
        assert!(err.to_string().contains("Did you mean 'Word:'?"));
    }

    #[test]
    fn test_parse_csv_skips_blank_words() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Word,Translation").unwrap();
        writeln!(file, "apple,苹果").unwrap();
        writeln!(file, ",orphan").unwrap();
        writeln!(file, "  pear  ").unwrap();
        file.flush().unwrap();

        let vocab = parse_file(file.path()).unwrap();
        assert_eq!(
            vocab.entries(),
            &[VocabEntry::new("apple", "苹果"), VocabEntry::new("pear", "")]
        );
    }

    #[test]
    fn test_parse_xlsx_chinese_headers_and_numeric_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, " 单词 ").unwrap();
        sheet.write_string(0, 1, "中文翻译").unwrap();
        sheet.write_string(1, 0, "apple").unwrap();
        sheet.write_string(1, 1, "苹果").unwrap();
        sheet.write_number(2, 0, 42.0).unwrap();
        sheet.write_string(2, 1, "四十二").unwrap();
        // word cell left blank
        sheet.write_string(3, 1, "孤儿").unwrap();
        sheet.write_string(4, 0, " pear ").unwrap();
        workbook.save(&path).unwrap();

        let vocab = parse_file(&path).unwrap();
        assert_eq!(
            vocab.entries(),
            &[
                VocabEntry::new("apple", "苹果"),
                VocabEntry::new("42", "四十二"),
                VocabEntry::new("pear", ""),
            ]
        );
    }

    #[test]
    fn test_parse_xlsx_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Word").unwrap();
        sheet.write_string(0, 1, "Notes").unwrap();
        sheet.write_string(1, 0, "apple").unwrap();
        workbook.save(&path).unwrap();

        let err = parse_file(&path).unwrap_err();
        assert!(matches!(err, QuizError::MissingColumn { ref column, .. } if column == "Translation"));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = parse_file("words.txt").unwrap_err();
        assert!(matches!(err, QuizError::UnsupportedFormat(ext) if ext == "txt"));
    }
}
