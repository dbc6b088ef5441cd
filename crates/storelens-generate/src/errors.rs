use thiserror::Error;

/// Errors emitted by the dataset generator.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("empty pool: {0}")]
    EmptyPool(String),
    #[error("core error: {0}")]
    Core(#[from] storelens_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
