use thiserror::Error;

/// Errors from rendering validation artifacts. The gates themselves are
/// infallible.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
