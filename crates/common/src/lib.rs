//! Common types and utilities for OpenAPI Docgen
//!
//! This crate contains the normalized document model handed to renderers,
//! the database metadata model, configuration loading and the shared error
//! type used across the parser, generator, and CLI components.

pub mod config;
pub mod database;
pub mod model;

pub use config::{DocgenConfig, ParserConfig, RenderConfig, TraversalStrategy};
pub use database::{ColumnMetadata, DatabaseMetadata, IndexMetadata, TableMetadata};
pub use model::{
    tokens_to_string, ApiInfo, ApiResource, Bookmark, CodeBlock, ContactInfo, Definition,
    DocumentModel, Endpoint, LicenseInfo, Parameter, Property, Response, ResponseHeader, TypeToken,
    ANCHOR_PREFIX, DEFAULT_RESOURCE,
};

use thiserror::Error;

/// Errors that can occur while building or rendering documents
#[derive(Error, Debug)]
pub enum DocgenError {
    /// The input could not be parsed as an OpenAPI document at all
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for docgen operations
pub type Result<T> = std::result::Result<T, DocgenError>;
