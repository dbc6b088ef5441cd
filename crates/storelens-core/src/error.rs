use thiserror::Error;

/// Core error type shared across Storelens crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A table violates internal invariants (ragged rows, duplicate columns).
    #[error("invalid table: {0}")]
    InvalidTable(String),
}

/// Convenience alias for results returned by Storelens crates.
pub type Result<T> = std::result::Result<T, Error>;
