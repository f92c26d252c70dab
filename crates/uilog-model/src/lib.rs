//! Shared data model for turning UI logs into object-centric event data.
//!
//! The crates of this workspace pass a [`UiLog`] table through column
//! classification ([`ColumnRole`]), object recognition ([`ObjectType`],
//! [`HierarchyLevel`], [`DedupKey`]) and finally serialize an
//! [`OcelDocument`].

pub mod error;
pub mod object;
pub mod ocel;
pub mod options;
pub mod resolver;
pub mod role;
pub mod table;

pub use error::{ModelError, ResolveError, Result};
pub use object::{DedupKey, HierarchyLevel, InstanceId, KeyPart, ObjectType};
pub use ocel::{EventEntry, OcelDocument, ProcessObjectEntry, UiObjectEntry};
pub use options::Thresholds;
pub use resolver::{
    AmbiguityResolver, ColumnSample, DefaultsResolver, EventColumnQuery, FailingResolver,
    RoleQuery,
};
pub use role::ColumnRole;
pub use table::UiLog;
