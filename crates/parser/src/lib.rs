//! OpenAPI document-model builder
//!
//! This crate turns an OpenAPI 3.x document (JSON or YAML) into the
//! render-ready [`DocumentModel`]: API info, endpoints grouped by tag and
//! type definitions with generated examples.
//!
//! ## Traversal Strategies
//!
//! Two independent walkers build the model and must agree field for field:
//! - **tree**: reads the generic `serde_json::Value` tree directly
//! - **typed**: binds the document into `serde` structs, then walks them
//!
//! Both share the type resolver and example generator in [`schema`].
//!
//! ## Usage
//! ```rust,ignore
//! use openapi_docgen_parser::OpenApiDocParser;
//!
//! let model = OpenApiDocParser::from_file("petstore.json")?.parse()?;
//! let context = model.to_map()?;
//! ```
//!
//! The [`database`] module normalizes relational catalog metadata the same
//! way.

mod assembler;
pub mod database;
mod extract;
mod parser;
pub mod schema;
mod source;
pub mod tree;
pub mod typed;

pub use assembler::{assemble, DocumentModelAssembler, DocumentWalker};
pub use parser::OpenApiDocParser;
pub use source::{parse_document, SpecSource};

use openapi_docgen_common::{DocumentModel, Result, TraversalStrategy};

/// Parse OpenAPI text with the given strategy
pub fn parse_openapi(text: &str, strategy: TraversalStrategy) -> Result<DocumentModel> {
    DocumentModelAssembler::new(strategy).assemble_str(text)
}

/// Build the model with every strategy and report whether they agree
///
/// Returns the tree model, and the typed model when it differs.
pub fn compare_strategies(text: &str) -> Result<(DocumentModel, Option<DocumentModel>)> {
    let root = parse_document(text)?;
    let tree = DocumentModelAssembler::new(TraversalStrategy::Tree).assemble_value(&root)?;
    let typed = DocumentModelAssembler::new(TraversalStrategy::Typed).assemble_value(&root)?;

    if tree == typed {
        Ok((tree, None))
    } else {
        Ok((tree, Some(typed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_openapi() {
        let model = parse_openapi(
            r#"{"info": {"title": "Tiny"}, "paths": {"/ping": {"get": {}}}}"#,
            TraversalStrategy::Typed,
        )
        .unwrap();
        assert_eq!(model.info.title, "Tiny");
        assert_eq!(model.endpoint_count(), 1);
    }

    #[test]
    fn test_compare_strategies_agree() {
        let (model, divergent) =
            compare_strategies(r#"{"paths": {"/ping": {"get": {"tags": ["health"]}}}}"#).unwrap();
        assert!(divergent.is_none());
        assert_eq!(model.resources[0].name, "health");
    }
}
