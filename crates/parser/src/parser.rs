//! OpenAPI document parser

use crate::assembler::DocumentModelAssembler;
use crate::source::{parse_document, SpecSource};
use openapi_docgen_common::{DocgenError, DocumentModel, Result, TraversalStrategy};
use serde_json::Value;
use std::path::Path;

/// OpenAPI specification parser
///
/// Holds a parsed JSON or YAML document and builds its [`DocumentModel`]
/// with the configured traversal strategy (the JSON tree walker unless set
/// otherwise).
pub struct OpenApiDocParser {
    /// Parsed document tree
    document: Value,

    strategy: TraversalStrategy,
}

impl OpenApiDocParser {
    /// Load an OpenAPI document from a JSON or YAML file
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = OpenApiDocParser::from_file("petstore.yaml")?
    ///     .with_strategy(TraversalStrategy::Typed);
    /// let model = parser.parse()?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let root = SpecSource::File(path.as_ref().to_path_buf()).parse()?;
        Ok(Self::new(root))
    }

    /// Parse an OpenAPI document from JSON or YAML text
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self> {
        Ok(Self::new(parse_document(text)?))
    }

    /// Use an already parsed document
    pub fn from_value(document: Value) -> Result<Self> {
        if !document.is_object() {
            return Err(DocgenError::MalformedInput(
                "OpenAPI document root must be an object".to_string(),
            ));
        }
        Ok(Self::new(document))
    }

    fn new(document: Value) -> Self {
        Self {
            document,
            strategy: TraversalStrategy::default(),
        }
    }

    /// Choose the traversal strategy
    pub fn with_strategy(mut self, strategy: TraversalStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> TraversalStrategy {
        self.strategy
    }

    /// Build the document model
    pub fn parse(&self) -> Result<DocumentModel> {
        DocumentModelAssembler::new(self.strategy).assemble_value(&self.document)
    }

    /// Get reference to the underlying document tree
    pub fn document(&self) -> &Value {
        &self.document
    }
}
