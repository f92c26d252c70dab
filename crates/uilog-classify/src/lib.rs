//! Column role classification for prepared UI logs.
//!
//! [`classify`] gives every column exactly one [`ColumnRole`] and groups the
//! attribute columns by the UI object types they describe in an
//! [`ObjectColumnPlan`].
//!
//! [`ColumnRole`]: uilog_model::ColumnRole

mod classifier;
mod error;
mod headers;
mod plan;

pub use classifier::{ClassifiedLog, DecisionReason, RoleDecision, classify};
pub use error::{ClassifyError, Result};
pub use headers::{HeaderInfo, analyze_header, analyze_headers};
pub use plan::{ColumnBinding, ObjectColumnPlan, build_plan};
