//! Relational database metadata model
//!
//! Tables, columns, indexes and keys extracted from a database catalog (or
//! loaded from an exported snapshot). Field names serialize in camelCase so
//! exported snapshots and renderer contexts share one shape.

use crate::Result;
use serde::{Deserialize, Serialize};

/// Metadata for a whole database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseMetadata {
    pub database_name: String,
    pub database_type: String,
    pub database_version: Option<String>,

    /// Connection URL the metadata was read from
    pub url: Option<String>,
    pub username: Option<String>,
    pub tables: Vec<TableMetadata>,
}

impl DatabaseMetadata {
    /// Expose the metadata as a nested key-value structure for renderers
    pub fn to_map(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn table(&self, name: &str) -> Option<&TableMetadata> {
        self.tables.iter().find(|t| t.table_name == name)
    }
}

/// Metadata for one table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableMetadata {
    pub table_name: String,
    pub table_comment: Option<String>,
    pub table_space: Option<String>,
    pub schema: Option<String>,

    /// Physical primary key column names
    pub primary_keys: Vec<String>,

    /// Logical/business key column names
    pub logical_keys: Vec<String>,

    pub indexes: Vec<IndexMetadata>,
    pub columns: Vec<ColumnMetadata>,
}

impl TableMetadata {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..Default::default()
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.column_name == name)
    }

    /// Make column primary-key flags agree with `primary_keys`
    ///
    /// A non-empty `primary_keys` list is authoritative. When it is empty the
    /// list is rebuilt from the column flags, in column order.
    pub fn reconcile_primary_keys(&mut self) {
        if self.primary_keys.is_empty() {
            self.primary_keys = self
                .columns
                .iter()
                .filter(|c| c.is_primary_key)
                .map(|c| c.column_name.clone())
                .collect();
            return;
        }

        for column in &mut self.columns {
            column.is_primary_key = self.primary_keys.contains(&column.column_name);
        }
    }
}

/// Metadata for one index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexMetadata {
    pub index_name: String,
    pub is_unique: bool,

    /// Indexed columns, in index order
    pub column_names: Vec<String>,

    /// Index type as reported by the catalog (e.g., BTREE, HASH)
    pub index_type: Option<String>,
    pub index_comment: Option<String>,
}

/// Metadata for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnMetadata {
    pub ordinal_position: i32,
    pub column_name: String,
    pub column_comment: Option<String>,
    pub data_type: String,
    pub column_size: Option<i32>,
    pub decimal_digits: Option<i32>,
    pub is_primary_key: bool,
    pub is_nullable: bool,
    pub is_foreign_key: bool,
    pub foreign_key_table: Option<String>,
    pub foreign_key_column: Option<String>,
    pub default_value: Option<String>,
}

impl Default for ColumnMetadata {
    fn default() -> Self {
        Self {
            ordinal_position: 0,
            column_name: String::new(),
            column_comment: None,
            data_type: String::new(),
            column_size: None,
            decimal_digits: None,
            is_primary_key: false,
            is_nullable: true,
            is_foreign_key: false,
            foreign_key_table: None,
            foreign_key_column: None,
            default_value: None,
        }
    }
}
