use std::path::Path;

use tracing::{info, warn};

use storelens_core::{Table, TableName, TableSet, Value};

/// Read one CSV table file, inferring cell types from the fields.
pub fn read_table_csv(path: &Path) -> Result<Table, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    let mut records = reader.records();
    let columns: Vec<String> = match records.next() {
        Some(header) => header?.iter().map(|field| field.to_string()).collect(),
        None => Vec::new(),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        rows.push(record.iter().map(Value::infer).collect());
    }

    Table::new(columns, rows)
        .map_err(|err| csv::Error::from(std::io::Error::other(err.to_string())))
}

/// Load all six tables from a directory, all-or-nothing.
///
/// A parse failure on a present file is logged and counted as missing so
/// the coordinator can fall back cleanly. Any missing table makes the
/// whole source unavailable; partial sets are never returned.
pub fn load_table_set(dir: &Path, prefix: &str) -> Option<TableSet> {
    let mut set = TableSet::new();
    let mut missing = Vec::new();

    for name in TableName::ALL {
        let path = dir.join(name.file_name(prefix));
        if !path.exists() {
            missing.push(name.file_name(prefix));
            continue;
        }
        match read_table_csv(&path) {
            Ok(table) => {
                info!(table = %name, rows = table.row_count(), path = %path.display(), "table loaded");
                set.insert(name, table);
            }
            Err(err) => {
                warn!(table = %name, path = %path.display(), error = %err, "failed to parse table file");
                missing.push(name.file_name(prefix));
            }
        }
    }

    if !missing.is_empty() {
        warn!(dir = %dir.display(), missing = ?missing, "source incomplete");
        return None;
    }

    Some(set)
}

/// True when every expected table file exists in the directory. Does not
/// attempt to parse anything.
pub(crate) fn all_files_present(dir: &Path, prefix: &str) -> bool {
    TableName::ALL
        .iter()
        .all(|name| dir.join(name.file_name(prefix)).exists())
}
