use thiserror::Error;
use uilog_classify::ClassifyError;
use uilog_ingest::IngestError;
use uilog_model::ModelError;

/// Errors that abort a transformation run.
///
/// No partial document is produced once one of these is returned.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ModelError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
