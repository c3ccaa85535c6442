//! Document model assembly
//!
//! Runs the info, operation and definition extraction of one traversal
//! strategy and combines the results into a [`DocumentModel`].

use crate::source::parse_document;
use crate::tree::JsonTreeWalker;
use crate::typed::{OpenApiDocument, TypedWalker};
use openapi_docgen_common::{
    ApiInfo, ApiResource, Definition, DocgenError, DocumentModel, Result, TraversalStrategy,
};
use serde_json::Value;
use tracing::debug;

/// One way of walking an OpenAPI document
///
/// Implementations must agree: for the same input every walker yields equal
/// info, resources and definitions.
pub trait DocumentWalker {
    /// API metadata from `info`
    fn info(&self) -> ApiInfo;

    /// Endpoints from `paths`, grouped by first tag
    fn resources(&self) -> Vec<ApiResource>;

    /// One definition per entry of `components.schemas`
    fn definitions(&self) -> Result<Vec<Definition>>;
}

/// Combine the output of a walker into a document model
pub fn assemble<W: DocumentWalker + ?Sized>(walker: &W) -> Result<DocumentModel> {
    let info = walker.info();
    let resources = walker.resources();
    let definitions = walker.definitions()?;

    debug!(
        resources = resources.len(),
        definitions = definitions.len(),
        "Assembled document model"
    );

    Ok(DocumentModel {
        info,
        resources,
        definitions,
    })
}

/// Builds document models with a chosen traversal strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentModelAssembler {
    strategy: TraversalStrategy,
}

impl DocumentModelAssembler {
    pub fn new(strategy: TraversalStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> TraversalStrategy {
        self.strategy
    }

    /// Parse JSON or YAML text and assemble its model
    pub fn assemble_str(&self, text: &str) -> Result<DocumentModel> {
        let root = parse_document(text)?;
        self.assemble_value(&root)
    }

    /// Assemble the model of an already parsed document
    pub fn assemble_value(&self, root: &Value) -> Result<DocumentModel> {
        if !root.is_object() {
            return Err(DocgenError::MalformedInput(
                "OpenAPI document root must be an object".to_string(),
            ));
        }

        debug!(strategy = %self.strategy, "Assembling document model");
        match self.strategy {
            TraversalStrategy::Tree => assemble(&JsonTreeWalker::new(root)),
            TraversalStrategy::Typed => {
                let document = OpenApiDocument::from_value(root)?;
                assemble(&TypedWalker::new(&document))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_document() {
        for strategy in TraversalStrategy::ALL {
            let model = DocumentModelAssembler::new(strategy)
                .assemble_value(&json!({"openapi": "3.0.0"}))
                .unwrap();
            assert_eq!(model, DocumentModel::default());
        }
    }

    #[test]
    fn test_rejects_non_object_root() {
        for strategy in TraversalStrategy::ALL {
            let result = DocumentModelAssembler::new(strategy).assemble_value(&json!([1, 2]));
            assert!(matches!(result, Err(DocgenError::MalformedInput(_))));
        }
    }

    #[test]
    fn test_rejects_unparsable_text() {
        let result = DocumentModelAssembler::default().assemble_str("{\"openapi\": ");
        assert!(matches!(result, Err(DocgenError::MalformedInput(_))));
    }

    #[test]
    fn test_typed_rejects_mistyped_structure() {
        let root = json!({"paths": {"/pets": {"get": {"tags": "pets"}}}});

        let result = DocumentModelAssembler::new(TraversalStrategy::Typed).assemble_value(&root);
        assert!(matches!(result, Err(DocgenError::MalformedInput(_))));

        let model = DocumentModelAssembler::new(TraversalStrategy::Tree)
            .assemble_value(&root)
            .unwrap();
        assert_eq!(model.resources[0].name, "Default");
    }
}
