//! Relational database metadata
//!
//! Normalizes catalog information (tables, columns, indexes, keys) from
//! MySQL, PostgreSQL, Oracle, SQL Server, H2 or any other product into
//! [`DatabaseMetadata`](openapi_docgen_common::DatabaseMetadata).
//!
//! ## Sources
//! - a live catalog, through a [`CatalogSource`] implementation
//! - an exported JSON snapshot, through [`DatabaseSnapshot`]
//!
//! ## Usage
//! ```rust,ignore
//! use openapi_docgen_parser::database::{ConnectionConfig, MetadataExtractor};
//!
//! let extractor = MetadataExtractor::new(my_catalog);
//! let metadata = extractor.extract(&config)?;
//! ```

mod catalog;
mod dialect;
mod extractor;
mod snapshot;

pub use catalog::{CatalogSource, ColumnRow, ForeignKeyRow, IndexRow, TableRow};
pub use dialect::{ConnectionConfig, Dialect};
pub use extractor::MetadataExtractor;
pub use snapshot::DatabaseSnapshot;
