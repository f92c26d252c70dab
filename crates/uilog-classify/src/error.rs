use thiserror::Error;
use uilog_model::{ColumnRole, ResolveError};

/// Errors raised while assigning column roles.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("cannot classify a UI log without columns")]
    NoColumns,

    #[error("resolver answered '{role}' for column '{column}', which is not one of the offered roles")]
    DisallowedRole { column: String, role: ColumnRole },

    #[error("column '{column}' was left without a role")]
    Unassigned { column: String },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

pub type Result<T> = std::result::Result<T, ClassifyError>;
