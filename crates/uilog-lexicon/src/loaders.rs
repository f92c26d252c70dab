//! CSV readers for the built-in tables and user-supplied word lists.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{LexiconError, Result};

pub(crate) type Row = BTreeMap<String, String>;

/// Reads a headed CSV into row maps keyed by header.
///
/// Strips a leading BOM from headers and trims every value.
pub(crate) fn read_rows<R: Read>(source_name: &str, input: R) -> Result<Vec<Row>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(input);
    let headers = reader
        .headers()
        .map_err(|err| LexiconError::csv(source_name, &err))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| LexiconError::csv(source_name, &err))?;
        let mut row = Row::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers
                .get(idx)
                .unwrap_or("")
                .trim_matches('\u{feff}')
                .trim()
                .to_string();
            row.insert(key, value.trim().to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Returns a required, non-empty field.
pub(crate) fn required(row: &Row, column: &str, source_name: &str) -> Result<String> {
    row.get(column)
        .filter(|value| !value.is_empty())
        .cloned()
        .ok_or_else(|| LexiconError::MissingColumn {
            source_name: source_name.to_string(),
            column: column.to_string(),
        })
}

/// Reads a one-column word list (header row first) from disk.
///
/// Values of the first column are lower-cased; blank lines are skipped.
pub fn read_word_list(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|source| LexiconError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let source_name = path.display().to_string();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let mut words = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| LexiconError::csv(&source_name, &err))?;
        if let Some(word) = record.get(0).map(str::trim).filter(|w| !w.is_empty()) {
            words.push(word.to_lowercase());
        }
    }
    if words.is_empty() {
        return Err(LexiconError::Empty { source_name });
    }
    Ok(words)
}
