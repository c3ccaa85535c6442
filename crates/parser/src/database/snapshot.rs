//! Exported metadata snapshots
//!
//! Loads a database description exported earlier (or written by hand) as
//! JSON instead of reading a live catalog.

use openapi_docgen_common::{DatabaseMetadata, DocgenError, Result};
use std::fs;
use std::path::Path;

const DEFAULT_DATABASE_NAME: &str = "Custom Database";
const DEFAULT_DATABASE_TYPE: &str = "Custom";
const DEFAULT_DATABASE_VERSION: &str = "1.0";

/// Loader for metadata snapshots
pub struct DatabaseSnapshot;

impl DatabaseSnapshot {
    /// Load a snapshot from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<DatabaseMetadata> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            DocgenError::Database(format!(
                "Failed to read metadata snapshot {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_json(&content)
    }

    /// Parse a snapshot from JSON text
    ///
    /// Missing database name, type and version get placeholder values. Each
    /// table's primary-key list and column flags are reconciled, and
    /// foreign-key targets are dropped from columns not flagged as foreign
    /// keys.
    pub fn from_json(json: &str) -> Result<DatabaseMetadata> {
        let mut metadata: DatabaseMetadata = serde_json::from_str(json).map_err(|e| {
            DocgenError::Database(format!("Failed to parse metadata snapshot: {}", e))
        })?;

        if metadata.database_name.is_empty() {
            metadata.database_name = DEFAULT_DATABASE_NAME.to_string();
        }
        if metadata.database_type.is_empty() {
            metadata.database_type = DEFAULT_DATABASE_TYPE.to_string();
        }
        if metadata.database_version.is_none() {
            metadata.database_version = Some(DEFAULT_DATABASE_VERSION.to_string());
        }

        for table in &mut metadata.tables {
            table.reconcile_primary_keys();

            for column in table.columns.iter_mut().filter(|c| !c.is_foreign_key) {
                column.foreign_key_table = None;
                column.foreign_key_column = None;
            }
        }

        Ok(metadata)
    }
}
