//! Per-table quality gates and extraction metadata.
//!
//! The validator filters a freshly extracted table set through simple
//! wholesale gates (non-empty, minimum column and row counts), attaches
//! extraction metadata to survivors, and aggregates rejection reasons
//! without ever aborting the run.

pub mod errors;
pub mod gates;
pub mod profile;

pub use errors::ValidateError;
pub use gates::{Rejection, ValidateOptions, ValidatedTable, Validation, Validator};
pub use profile::{DataProfile, TableProfile, build_profile, write_profile};
