use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use storelens_core::TableName;

/// Options for the dataset generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Seed for the deterministic run; per-table streams derive from it.
    pub seed: u64,
    pub customers: u64,
    pub products: u64,
    pub sellers: u64,
    pub orders: u64,
    /// Upper bound on the number of reviews sampled from delivered orders.
    pub review_cap: u64,
    /// First day of the order purchase window.
    pub start_date: NaiveDate,
    /// Width of the purchase window in days.
    pub date_span_days: u32,
    /// When set, every table is persisted here as CSV.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
    /// File-name prefix for persisted tables.
    pub file_prefix: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            customers: 1000,
            products: 500,
            sellers: 200,
            orders: 2000,
            review_cap: 800,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            date_span_days: 365,
            out_dir: None,
            file_prefix: "olist".to_string(),
        }
    }
}

/// Summary of one generated table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table: TableName,
    pub rows: u64,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub seed: u64,
    pub tables: Vec<TableReport>,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, seed: u64) -> Self {
        Self {
            run_id,
            seed,
            tables: Vec::new(),
            bytes_written: 0,
            duration_ms: 0,
        }
    }

    pub fn record_table(&mut self, table: TableName, rows: u64) {
        self.tables.push(TableReport { table, rows });
    }
}
