//! Core contracts and helpers for Storelens.
//!
//! This crate defines the canonical table model shared by the generator,
//! the extraction pipeline, and the validator: typed cell values, the
//! ordered table container, the closed set of dataset table names, and
//! the metadata attached to validated tables.

pub mod error;
pub mod metadata;
pub mod names;
pub mod table;
pub mod value;

pub use error::{Error, Result};
pub use metadata::TableMetadata;
pub use names::{SourceKind, TableName};
pub use table::{Table, TableSet};
pub use value::{TIMESTAMP_FORMAT, Value};
