use thiserror::Error;

use storelens_core::SourceKind;

/// Errors surfaced by the extraction coordinator.
///
/// Per-source unavailability is not an error; it drives fallback and is
/// only logged. These variants are the unrecoverable remainder.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Every source in the chain reported unavailable.
    #[error("all extraction sources exhausted")]
    Exhausted,
    /// A source produced tables but none passed validation.
    #[error("no table passed validation (source: {0})")]
    NoValidTables(SourceKind),
}
