//! UI log ingestion.
//!
//! Loads a CSV UI log into a [`UiLog`], cleans it up, computes column
//! statistics, locates the event column and splits event text into an
//! activity and a main UI object type.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use uilog_ingest::{load_ui_log, prepare_log};
//!
//! let log = load_ui_log(Path::new("logs/student_record.csv"))?;
//! let prepared = prepare_log(log, &lexicon, &thresholds, &mut resolver)?;
//! ```

mod activity;
mod error;
mod preprocess;
mod profile;
mod reader;

use tracing::info;
use uilog_lexicon::Lexicon;
use uilog_model::{AmbiguityResolver, Thresholds, UiLog};

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use reader::{check_extension, dataframe_to_ui_log, load_ui_log};

// === Preprocessing ===
pub use preprocess::{
    PreprocessReport, drop_case_column, drop_duplicate_columns, drop_empty, normalize_headers,
    preprocess, unify_cell_format,
};

// === Column Profiles ===
pub use profile::{ColumnProfile, column_sample, profile_column, profile_columns, sample_values};

// === Activity Extraction ===
pub use activity::{
    ACTIVITY_HEADER, EventColumn, EventColumnSource, MAIN_OBJECT_TYPE_HEADER, SplitEvent,
    find_event_column, split_activity, split_event,
};

/// A log ready for classification: column 0 holds activities and, when
/// present, column 1 holds the split-out main UI object type.
#[derive(Debug, Clone)]
pub struct PreparedLog {
    pub log: UiLog,
    pub report: PreprocessReport,
    pub event_column: EventColumn,
    pub has_object_type_column: bool,
}

/// Runs preprocessing, event-column discovery and the activity split.
pub fn prepare_log(
    mut log: UiLog,
    lexicon: &Lexicon,
    thresholds: &Thresholds,
    resolver: &mut dyn AmbiguityResolver,
) -> Result<PreparedLog> {
    let report = preprocess(&mut log);
    let event_column = find_event_column(&mut log, lexicon, thresholds, resolver)?;
    let has_object_type_column = split_activity(&mut log, lexicon)?;
    info!(
        rows = log.height(),
        columns = log.width(),
        empty_columns = report.empty_columns,
        duplicate_columns = report.duplicate_columns,
        object_type_column = has_object_type_column,
        "UI log prepared"
    );
    Ok(PreparedLog {
        log,
        report,
        event_column,
        has_object_type_column,
    })
}
