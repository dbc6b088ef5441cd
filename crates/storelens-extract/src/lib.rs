//! Multi-source data extraction with prioritized fallback.
//!
//! The extraction coordinator walks an ordered chain of sources (raw
//! dataset files, a generated sample cache, a remote placeholder) and
//! hands the first complete table set to the validator. A source either
//! provides all six tables or reports itself unavailable; nothing
//! partial ever leaves this crate.

pub mod errors;
pub mod extractor;
pub mod loader;
pub mod retry;
pub mod source;

pub use errors::ExtractError;
pub use extractor::{ExtractOptions, Extractor};
pub use loader::{load_table_set, read_table_csv};
pub use retry::RetryPolicy;
pub use source::{RawSource, RemoteSource, SampleSource, TableSource};
