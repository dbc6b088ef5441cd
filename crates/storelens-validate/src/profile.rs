use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use storelens_core::{SourceKind, Table, Value};

use crate::errors::ValidateError;
use crate::gates::Validation;

/// Machine-readable profile of a validated extraction.
#[derive(Debug, Clone, Serialize)]
pub struct DataProfile {
    pub generated_at: DateTime<Utc>,
    pub source: SourceKind,
    pub total_tables: usize,
    pub tables: BTreeMap<String, TableProfile>,
}

/// Per-table shape and quality numbers.
#[derive(Debug, Clone, Serialize)]
pub struct TableProfile {
    pub rows: usize,
    pub columns: usize,
    pub null_percentage: f64,
    pub dtypes: BTreeMap<String, &'static str>,
    pub extracted_at: DateTime<Utc>,
}

/// Build a profile from a validation outcome.
pub fn build_profile(validation: &Validation) -> DataProfile {
    let mut tables = BTreeMap::new();
    for (name, validated) in &validation.tables {
        tables.insert(
            name.to_string(),
            TableProfile {
                rows: validated.table.row_count(),
                columns: validated.table.column_count(),
                null_percentage: validated.meta.null_percentage,
                dtypes: column_dtypes(&validated.table),
                extracted_at: validated.meta.extracted_at,
            },
        );
    }
    DataProfile {
        generated_at: Utc::now(),
        source: validation.source,
        total_tables: tables.len(),
        tables,
    }
}

/// Sample each column's dtype from its first non-null cell. Columns
/// that are entirely null report `"null"`.
fn column_dtypes(table: &Table) -> BTreeMap<String, &'static str> {
    let mut dtypes = BTreeMap::new();
    for name in table.columns() {
        let dtype = table
            .column(name)
            .and_then(|mut cells| cells.find(|value| !value.is_null()))
            .map_or("null", Value::dtype);
        dtypes.insert(name.clone(), dtype);
    }
    dtypes
}

/// Write the profile as pretty JSON.
pub fn write_profile(path: &Path, profile: &DataProfile) -> Result<(), ValidateError> {
    std::fs::write(path, serde_json::to_vec_pretty(profile)?)?;
    Ok(())
}
