use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use storelens_core::{SourceKind, Table, TableMetadata, TableName, TableSet};

/// Thresholds for the per-table quality gates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateOptions {
    pub min_rows: usize,
    pub min_columns: usize,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            min_rows: 10,
            min_columns: 2,
        }
    }
}

/// A table that passed all gates, paired with its extraction metadata.
#[derive(Debug, Clone)]
pub struct ValidatedTable {
    pub table: Table,
    pub meta: TableMetadata,
}

/// One per-table rejection reason.
#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    pub table: TableName,
    pub code: String,
    pub message: String,
}

/// Outcome of a validation pass. Rejections never abort the run; the
/// caller decides whether a partially surviving set is acceptable.
#[derive(Debug, Clone)]
pub struct Validation {
    pub source: SourceKind,
    pub tables: BTreeMap<TableName, ValidatedTable>,
    pub rejections: Vec<Rejection>,
}

impl Validation {
    pub fn get(&self, name: TableName) -> Option<&ValidatedTable> {
        self.tables.get(&name)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Expected table names absent from the surviving set.
    pub fn missing(&self) -> Vec<TableName> {
        TableName::ALL
            .iter()
            .copied()
            .filter(|name| !self.tables.contains_key(name))
            .collect()
    }

    /// True when at least one expected table was dropped or absent.
    pub fn is_degraded(&self) -> bool {
        !self.missing().is_empty()
    }
}

/// Applies wholesale quality gates to each table in a set.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidateOptions,
}

impl Validator {
    pub fn new(options: ValidateOptions) -> Self {
        Self { options }
    }

    /// Gate every table; survivors get metadata, the rest get a recorded
    /// rejection. Never fails.
    pub fn validate(&self, set: TableSet, source: SourceKind) -> Validation {
        let mut tables = BTreeMap::new();
        let mut rejections = Vec::new();

        for (name, table) in set {
            if let Some(rejection) = self.gate(name, &table) {
                rejections.push(rejection);
                continue;
            }

            let null_percentage = table.null_percentage();
            info!(
                table = %name,
                rows = table.row_count(),
                columns = table.column_count(),
                null_percentage = format!("{null_percentage:.1}"),
                "table validated"
            );

            tables.insert(
                name,
                ValidatedTable {
                    meta: TableMetadata {
                        table: name,
                        source,
                        extracted_at: Utc::now(),
                        null_percentage,
                    },
                    table,
                },
            );
        }

        if !rejections.is_empty() {
            let summary: Vec<String> = rejections
                .iter()
                .map(|rejection| format!("{}: {}", rejection.table, rejection.message))
                .collect();
            warn!(rejected = rejections.len(), reasons = ?summary, "validation rejections");
        }
        info!(passed = tables.len(), source = %source, "validation complete");

        Validation {
            source,
            tables,
            rejections,
        }
    }

    fn gate(&self, name: TableName, table: &Table) -> Option<Rejection> {
        if table.is_empty() {
            return Some(reject(name, "empty", "table has no rows".to_string()));
        }
        if table.column_count() < self.options.min_columns {
            return Some(reject(
                name,
                "too_few_columns",
                format!(
                    "table has too few columns ({} < {})",
                    table.column_count(),
                    self.options.min_columns
                ),
            ));
        }
        if table.row_count() < self.options.min_rows {
            return Some(reject(
                name,
                "too_few_rows",
                format!(
                    "table has too few rows ({} < {})",
                    table.row_count(),
                    self.options.min_rows
                ),
            ));
        }
        None
    }
}

fn reject(table: TableName, code: &str, message: String) -> Rejection {
    Rejection {
        table,
        code: code.to_string(),
        message,
    }
}
