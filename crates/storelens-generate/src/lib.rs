//! Deterministic synthetic e-commerce dataset generation.
//!
//! This crate produces the six dataset tables (customers, orders,
//! order items, products, sellers, reviews) from a single seed, with
//! referential relationships intact, and can persist them as CSV under
//! the shared dataset naming convention.

pub mod engine;
pub mod errors;
pub mod model;
pub mod output;

pub use engine::Generator;
pub use errors::GenerationError;
pub use model::{GenerateOptions, GenerationReport, TableReport};
pub use output::csv::{write_table_csv, write_table_set};
