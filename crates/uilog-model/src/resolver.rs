//! Ambiguity resolution seam.
//!
//! When heuristics cannot decide which column holds the event text, or which
//! role a column plays, the pipeline asks an [`AmbiguityResolver`]. The CLI
//! provides an interactive implementation; batch callers use
//! [`DefaultsResolver`] or [`FailingResolver`].

use crate::error::ResolveError;
use crate::role::ColumnRole;

/// What a resolver gets to see about one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSample {
    pub index: usize,
    pub header: String,
    /// First distinct non-missing values, in row order.
    pub values: Vec<String>,
    pub unique_ratio: f64,
}

/// Question: which column holds the event text?
#[derive(Debug, Clone, PartialEq)]
pub struct EventColumnQuery {
    pub columns: Vec<ColumnSample>,
    /// Columns whose values looked like actions. Empty or more than one.
    pub candidates: Vec<usize>,
}

/// Question: which of `allowed` does this column play?
#[derive(Debug, Clone, PartialEq)]
pub struct RoleQuery {
    pub column: ColumnSample,
    pub allowed: Vec<ColumnRole>,
}

/// Answers questions the heuristics could not settle.
pub trait AmbiguityResolver {
    /// Returns the index of the event column.
    fn resolve_event_column(&mut self, query: &EventColumnQuery) -> Result<usize, ResolveError>;

    /// Returns one of `query.allowed`.
    fn resolve_column_role(&mut self, query: &RoleQuery) -> Result<ColumnRole, ResolveError>;
}

impl<T: AmbiguityResolver + ?Sized> AmbiguityResolver for &mut T {
    fn resolve_event_column(&mut self, query: &EventColumnQuery) -> Result<usize, ResolveError> {
        (**self).resolve_event_column(query)
    }

    fn resolve_column_role(&mut self, query: &RoleQuery) -> Result<ColumnRole, ResolveError> {
        (**self).resolve_column_role(query)
    }
}

/// Picks fixed answers: the first candidate (or column 0) for the event
/// column, context attribute for undecided roles.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultsResolver;

impl AmbiguityResolver for DefaultsResolver {
    fn resolve_event_column(&mut self, query: &EventColumnQuery) -> Result<usize, ResolveError> {
        Ok(query.candidates.first().copied().unwrap_or(0))
    }

    fn resolve_column_role(&mut self, query: &RoleQuery) -> Result<ColumnRole, ResolveError> {
        if query.allowed.contains(&ColumnRole::ContextAttribute) {
            return Ok(ColumnRole::ContextAttribute);
        }
        query
            .allowed
            .first()
            .copied()
            .ok_or_else(|| ResolveError::Unresolved {
                subject: format!("role of column '{}'", query.column.header),
            })
    }
}

/// Refuses every question.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingResolver;

impl AmbiguityResolver for FailingResolver {
    fn resolve_event_column(&mut self, query: &EventColumnQuery) -> Result<usize, ResolveError> {
        Err(ResolveError::Unresolved {
            subject: format!(
                "event column ({} candidate(s) among {} columns)",
                query.candidates.len(),
                query.columns.len()
            ),
        })
    }

    fn resolve_column_role(&mut self, query: &RoleQuery) -> Result<ColumnRole, ResolveError> {
        Err(ResolveError::Unresolved {
            subject: format!("role of column '{}'", query.column.header),
        })
    }
}
