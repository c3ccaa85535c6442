//! Catalog rows → database metadata

use super::catalog::{CatalogSource, ColumnRow, IndexRow};
use super::dialect::{ConnectionConfig, Dialect};
use indexmap::IndexMap;
use openapi_docgen_common::{
    ColumnMetadata, DatabaseMetadata, DocgenError, IndexMetadata, Result, TableMetadata,
};
use tracing::{debug, warn};

/// Reads database metadata through a [`CatalogSource`]
///
/// Only an unreachable catalog is fatal. Any single aspect of a table that
/// cannot be read is logged and left empty.
pub struct MetadataExtractor<C> {
    catalog: C,
}

impl<C: CatalogSource> MetadataExtractor<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Extract every table of the configured schema
    pub fn extract(&self, config: &ConnectionConfig) -> Result<DatabaseMetadata> {
        let mut metadata = self.connect(config)?;
        let dialect = config.dialect();
        let schema = config.effective_schema().unwrap_or_default();

        match self.catalog.tables(&schema) {
            Ok(rows) => {
                for row in rows {
                    let table_schema = row.schema.unwrap_or_else(|| schema.clone());
                    debug!(schema = %table_schema, table = %row.table_name, "Extracting table metadata");
                    metadata
                        .tables
                        .push(self.table_metadata(dialect, &row.table_name, &table_schema));
                }
            }
            Err(e) => warn!(schema = %schema, error = %e, "Failed to list tables"),
        }

        Ok(metadata)
    }

    /// Extract a single table
    ///
    /// `schema` falls back to the configured (or dialect default) schema.
    pub fn extract_table(
        &self,
        config: &ConnectionConfig,
        table: &str,
        schema: Option<&str>,
    ) -> Result<DatabaseMetadata> {
        let mut metadata = self.connect(config)?;
        let dialect = config.dialect();
        let schema = schema
            .map(|s| dialect.normalize_identifier(s))
            .or_else(|| config.effective_schema())
            .unwrap_or_default();
        let table = dialect.normalize_identifier(table);

        metadata
            .tables
            .push(self.table_metadata(dialect, &table, &schema));
        Ok(metadata)
    }

    fn connect(&self, config: &ConnectionConfig) -> Result<DatabaseMetadata> {
        if !config.is_valid() {
            return Err(DocgenError::Database(
                "Invalid connection configuration: database type and either a url or host and database name are required"
                    .to_string(),
            ));
        }

        let url = config.connection_url()?;
        let version = self.catalog.product_version().map_err(|e| {
            DocgenError::Database(format!("Failed to read database metadata from {}: {}", url, e))
        })?;

        Ok(DatabaseMetadata {
            database_name: config.database_name.clone(),
            database_type: config.database_type.clone(),
            database_version: Some(version),
            url: Some(url),
            username: config.username.clone(),
            tables: Vec::new(),
        })
    }

    fn table_metadata(&self, dialect: Dialect, table: &str, schema: &str) -> TableMetadata {
        let mut metadata = TableMetadata::new(table);
        metadata.schema = (!schema.is_empty()).then(|| schema.to_string());

        metadata.table_comment = self
            .catalog
            .table_comment(schema, table)
            .unwrap_or_else(|e| {
                warn!(table = %table, error = %e, "Failed to read table comment");
                None
            });

        metadata.table_space = self.catalog.table_space(schema, table).unwrap_or_else(|e| {
            warn!(table = %table, error = %e, "Failed to read tablespace");
            None
        });

        metadata.primary_keys = self
            .catalog
            .primary_keys(schema, table)
            .unwrap_or_else(|e| {
                warn!(table = %table, error = %e, "Failed to read primary keys");
                Vec::new()
            });

        match self.catalog.index_rows(schema, table) {
            Ok(rows) => metadata.indexes = group_indexes(rows),
            Err(e) => warn!(table = %table, error = %e, "Failed to read indexes"),
        }

        match self.catalog.columns(schema, table) {
            Ok(rows) => {
                metadata.columns = rows
                    .into_iter()
                    .map(|row| column_metadata(row, &metadata.primary_keys))
                    .collect();
            }
            Err(e) => warn!(table = %table, error = %e, "Failed to read columns"),
        }

        match self.catalog.imported_keys(schema, table) {
            Ok(keys) => {
                for key in keys {
                    if let Some(column) = metadata
                        .columns
                        .iter_mut()
                        .find(|c| c.column_name == key.fk_column_name)
                    {
                        column.is_foreign_key = true;
                        column.foreign_key_table = Some(key.pk_table_name);
                        column.foreign_key_column = Some(key.pk_column_name);
                    }
                }
            }
            Err(e) => warn!(table = %table, error = %e, "Failed to read foreign keys"),
        }

        debug!(
            dialect = %dialect,
            table = %table,
            columns = metadata.columns.len(),
            indexes = metadata.indexes.len(),
            "Extracted table metadata"
        );
        metadata
    }
}

/// Fold (index, column) rows into one entry per index, in first-seen order
///
/// Uniqueness and type come from an index's first row.
fn group_indexes(rows: Vec<IndexRow>) -> Vec<IndexMetadata> {
    let mut indexes: IndexMap<String, IndexMetadata> = IndexMap::new();

    for row in rows {
        let Some(name) = row.index_name else {
            continue;
        };

        let index = indexes
            .entry(name.clone())
            .or_insert_with(|| IndexMetadata {
                index_name: name,
                is_unique: !row.non_unique,
                column_names: Vec::new(),
                index_type: row.index_type,
                index_comment: None,
            });

        if let Some(column) = row.column_name {
            index.column_names.push(column);
        }
    }

    indexes.into_values().collect()
}

fn column_metadata(row: ColumnRow, primary_keys: &[String]) -> ColumnMetadata {
    ColumnMetadata {
        ordinal_position: row.ordinal_position,
        is_primary_key: primary_keys.contains(&row.column_name),
        is_nullable: row.is_nullable.eq_ignore_ascii_case("YES"),
        column_name: row.column_name,
        column_comment: row.remarks,
        data_type: row.type_name,
        column_size: row.column_size,
        decimal_digits: row.decimal_digits,
        is_foreign_key: false,
        foreign_key_table: None,
        foreign_key_column: None,
        default_value: row.default_value,
    }
}
