use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::names::TableName;
use crate::value::Value;

/// An ordered sequence of uniformly-shaped rows with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table, rejecting ragged rows and duplicate column names.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let mut seen = std::collections::BTreeSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(Error::InvalidTable(format!(
                    "duplicate column name: {column}"
                )));
            }
        }
        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::InvalidTable(format!(
                    "row {} has {} cells, expected {}",
                    index,
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Iterate the cells of a named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[index]))
    }

    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.columns.len()
    }

    pub fn null_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|value| value.is_null())
            .count()
    }

    /// Nulls over total cells, as a percentage. Zero for empty tables.
    pub fn null_percentage(&self) -> f64 {
        let cells = self.cell_count();
        if cells == 0 {
            return 0.0;
        }
        (self.null_count() as f64 / cells as f64) * 100.0
    }
}

/// A mapping from table name to table, covering at most the six dataset
/// tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSet {
    tables: BTreeMap<TableName, Table>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: TableName, table: Table) {
        self.tables.insert(name, table);
    }

    pub fn get(&self, name: TableName) -> Option<&Table> {
        self.tables.get(&name)
    }

    pub fn contains(&self, name: TableName) -> bool {
        self.tables.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TableName, &Table)> {
        self.tables.iter().map(|(name, table)| (*name, table))
    }

    pub fn names(&self) -> impl Iterator<Item = TableName> + '_ {
        self.tables.keys().copied()
    }

    /// True when every table in the closed set is present.
    pub fn is_complete(&self) -> bool {
        TableName::ALL.iter().all(|name| self.contains(*name))
    }
}

impl IntoIterator for TableSet {
    type Item = (TableName, Table);
    type IntoIter = std::collections::btree_map::IntoIter<TableName, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.into_iter()
    }
}
