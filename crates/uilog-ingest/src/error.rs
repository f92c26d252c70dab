//! Error types for UI log ingestion.

use std::path::PathBuf;

use thiserror::Error;
use uilog_model::ResolveError;

/// Errors that can occur while loading and preparing a UI log.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("UI log not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Only CSV input is accepted.
    #[error("unsupported file type '{extension}' for {path}: expected a .csv file")]
    UnsupportedFileType { path: PathBuf, extension: String },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file has a header but no rows.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// A header cell is blank.
    #[error("CSV file {path} contains an empty column name")]
    EmptyColumnName { path: PathBuf },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    // === Event Column Errors ===
    /// The log has no columns left after preprocessing.
    #[error("UI log has no columns left after preprocessing")]
    NoColumns,

    /// The resolver named a column that does not exist.
    #[error("event column index {index} is out of range for {width} columns")]
    EventColumnOutOfRange { index: usize, width: usize },

    /// An event string does not fit the activity / object-type grammar.
    #[error("malformed event text in row {row}: '{text}' has {tokens} words (at most 3 allowed)")]
    MalformedEvent {
        row: usize,
        text: String,
        tokens: usize,
    },

    /// The ambiguity resolver failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
