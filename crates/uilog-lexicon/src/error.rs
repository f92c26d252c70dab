use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a [`Lexicon`](crate::Lexicon).
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {source_name}: {message}")]
    Csv {
        source_name: String,
        message: String,
    },

    #[error("required column '{column}' not found in {source_name}")]
    MissingColumn {
        source_name: String,
        column: String,
    },

    #[error("unknown hierarchy level '{level}' for object type '{object_type}'")]
    UnknownLevel { object_type: String, level: String },

    #[error("attribute mapping references unknown {kind} '{name}'")]
    UnknownReference { kind: &'static str, name: String },

    #[error("lexicon table {source_name} has no entries")]
    Empty { source_name: String },
}

impl LexiconError {
    pub(crate) fn csv(source_name: impl Into<String>, err: &csv::Error) -> Self {
        Self::Csv {
            source_name: source_name.into(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LexiconError>;
