use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of tables that make up the e-commerce dataset.
///
/// Every source must provide all six; the extraction coordinator never
/// returns a partial set from a single source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    Customers,
    Orders,
    OrderItems,
    Products,
    Sellers,
    Reviews,
}

impl TableName {
    pub const ALL: [TableName; 6] = [
        TableName::Customers,
        TableName::Orders,
        TableName::OrderItems,
        TableName::Products,
        TableName::Sellers,
        TableName::Reviews,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Customers => "customers",
            TableName::Orders => "orders",
            TableName::OrderItems => "order_items",
            TableName::Products => "products",
            TableName::Sellers => "sellers",
            TableName::Reviews => "reviews",
        }
    }

    /// Stem used in on-disk file names. Reviews keep the historical
    /// `order_reviews` stem from the upstream dataset layout.
    pub fn file_stem(&self) -> &'static str {
        match self {
            TableName::Reviews => "order_reviews",
            other => other.as_str(),
        }
    }

    /// File name under the `<prefix>_<stem>_dataset.csv` convention.
    pub fn file_name(&self, prefix: &str) -> String {
        format!("{prefix}_{}_dataset.csv", self.file_stem())
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named origin from which a table set may be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Raw,
    Sample,
    Remote,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Raw => "raw",
            SourceKind::Sample => "sample",
            SourceKind::Remote => "remote",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_dataset_convention() {
        assert_eq!(
            TableName::Customers.file_name("olist"),
            "olist_customers_dataset.csv"
        );
        assert_eq!(
            TableName::Reviews.file_name("olist"),
            "olist_order_reviews_dataset.csv"
        );
    }
}
