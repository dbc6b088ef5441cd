use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::names::{SourceKind, TableName};

/// Metadata attached to a table once it passes validation.
///
/// Computed once per validation pass; not persisted across runs unless
/// the caller re-saves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMetadata {
    pub table: TableName,
    pub source: SourceKind,
    pub extracted_at: DateTime<Utc>,
    pub null_percentage: f64,
}
