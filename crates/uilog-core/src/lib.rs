//! Object-centric event log construction.
//!
//! After ingestion and classification, every row is resolved in order
//! against a run-scoped [`ResolutionContext`]: UI object instances are
//! recognized by their dedup keys and linked into the containment
//! hierarchy, nouns in context attributes become process objects, and the
//! [`map_builder`] folds the result into an [`OcelDocument`].
//!
//! [`OcelDocument`]: uilog_model::OcelDocument

pub mod context;
pub mod error;
pub mod map_builder;
pub mod pipeline;
pub mod process_objects;
pub mod resolver;
pub mod timestamp;

pub use context::{
    CursorEntry, CursorSlot, DedupTable, HierarchyCursor, ProcessRecord, ResolutionContext,
    RowResolution, UiOccurrence,
};
pub use error::{Result, TransformError};
pub use map_builder::{build_document, part_of_cycles};
pub use pipeline::{Transformation, resolve_rows, transform, transform_file};
pub use process_objects::{ProcessObjectExtractor, process_object_type};
pub use resolver::{HierarchyResolver, NAME_ATTRIBUTE};
pub use timestamp::parse_timestamp;
