use thiserror::Error;

/// Errors raised while validating shared model values.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A threshold lies outside `[0, 1]`.
    #[error("threshold {name} must be within [0, 1], got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    /// A role string did not name a known column role.
    #[error("unknown column role: {0}")]
    UnknownRole(String),
}

/// Errors returned by an [`AmbiguityResolver`](crate::AmbiguityResolver).
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The resolver refused to decide (batch mode without defaults).
    #[error("ambiguity could not be resolved automatically: {subject}")]
    Unresolved { subject: String },

    /// The operator's answer could not be read.
    #[error("failed to read resolver answer: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
