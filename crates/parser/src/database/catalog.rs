//! Raw catalog access
//!
//! Running vendor queries and driving a database driver happens outside this
//! crate. A [`CatalogSource`] hands back catalog rows much as a driver's
//! metadata API reports them; [`super::MetadataExtractor`] normalizes them.

use openapi_docgen_common::Result;

/// One row of the table listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub table_name: String,

    /// Schema the table lives in, when the catalog reports it
    pub schema: Option<String>,
}

/// One (index, column) row of an index listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexRow {
    /// Absent for table statistics rows
    pub index_name: Option<String>,
    pub non_unique: bool,
    pub index_type: Option<String>,
    pub column_name: Option<String>,
}

/// One row of a column listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRow {
    pub column_name: String,
    pub type_name: String,
    pub column_size: Option<i32>,
    pub decimal_digits: Option<i32>,

    /// "YES", "NO", or empty when unknown
    pub is_nullable: String,

    pub default_value: Option<String>,
    pub ordinal_position: i32,
    pub remarks: Option<String>,
}

/// One imported (foreign) key column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForeignKeyRow {
    pub fk_column_name: String,
    pub pk_table_name: String,
    pub pk_column_name: String,
}

/// Catalog queries for one open connection
///
/// `schema` is the already normalized schema name; an empty string means no
/// schema restriction.
#[cfg_attr(test, mockall::automock)]
pub trait CatalogSource {
    /// Database product version; failing here means the database is unreachable
    fn product_version(&self) -> Result<String>;

    fn tables(&self, schema: &str) -> Result<Vec<TableRow>>;

    fn table_comment(&self, schema: &str, table: &str) -> Result<Option<String>>;

    fn table_space(&self, schema: &str, table: &str) -> Result<Option<String>>;

    /// Primary key column names, in key order
    fn primary_keys(&self, schema: &str, table: &str) -> Result<Vec<String>>;

    fn index_rows(&self, schema: &str, table: &str) -> Result<Vec<IndexRow>>;

    fn columns(&self, schema: &str, table: &str) -> Result<Vec<ColumnRow>>;

    fn imported_keys(&self, schema: &str, table: &str) -> Result<Vec<ForeignKeyRow>>;
}
