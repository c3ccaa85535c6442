//! Normalized API document model
//!
//! The render-ready representation of an OpenAPI document: API metadata,
//! endpoints grouped into tag resources, and type definitions with generated
//! examples. Every record is built by a single extractor and is not mutated
//! once the assembler hands the [`DocumentModel`] out.

use crate::Result;
use serde::Serialize;

/// Prefix applied to link targets that point at a definition bookmark
pub const ANCHOR_PREFIX: &str = "anchor:";

/// Resource name used for operations that declare no tag
pub const DEFAULT_RESOURCE: &str = "Default";

/// Language tag attached to generated example code blocks
pub const EXAMPLE_LANGUAGE: &str = "json";

/// Highlight theme attached to generated example code blocks
pub const EXAMPLE_THEME: &str = "zenburn";

/// Complete document model handed to a renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentModel {
    /// API metadata
    pub info: ApiInfo,

    /// Endpoints grouped by tag, in first-seen order
    pub resources: Vec<ApiResource>,

    /// One definition per named component schema
    pub definitions: Vec<Definition>,
}

impl DocumentModel {
    /// Expose the model as a nested key-value structure
    ///
    /// Top-level keys are `info`, `resources` and `definitions`. Key order
    /// follows field declaration order, so repeated calls produce identical
    /// output.
    pub fn to_map(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Total number of endpoints across all resources
    pub fn endpoint_count(&self) -> usize {
        self.resources.iter().map(|r| r.endpoints.len()).sum()
    }

    /// Find a resource by name
    pub fn resource(&self, name: &str) -> Option<&ApiResource> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Find a definition by schema name
    pub fn definition(&self, name: &str) -> Option<&Definition> {
        self.definitions.iter().find(|d| d.name.text == name)
    }
}

/// API metadata from the `info` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiInfo {
    pub title: String,
    pub description: String,
    pub version: String,
    pub contact: ContactInfo,
    pub license: LicenseInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LicenseInfo {
    pub name: String,
}

/// A named group of endpoints (one per operation tag)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiResource {
    /// Tag name, or [`DEFAULT_RESOURCE`]
    pub name: String,

    /// Always empty for now; tag descriptions are not read
    pub description: String,

    /// Endpoints in the order their operations were encountered
    pub endpoints: Vec<Endpoint>,
}

impl ApiResource {
    /// Create an empty resource
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            endpoints: Vec::new(),
        }
    }
}

/// A single HTTP operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub summary: String,
    pub description: String,

    /// Upper-cased HTTP method (e.g., "GET")
    pub http_method: String,

    /// Path template, as declared
    pub url: String,

    /// Response content types, deduplicated, first-seen order
    pub produces: Vec<String>,

    /// Request body content types, declaration order
    pub consumes: Vec<String>,

    pub parameters: Vec<Parameter>,
    pub responses: Vec<Response>,
}

/// Operation parameter, including the synthesized `body` parameter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Location: path, query, header, cookie or body
    #[serde(rename = "in")]
    pub location: String,

    pub name: String,
    pub description: String,
    pub required: bool,

    /// Rendered type of the parameter schema
    pub schema: Vec<TypeToken>,
}

/// One entry of an operation's `responses` map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Response {
    /// Status code key as written (e.g., "200", "default")
    pub code: String,

    pub description: String,
    pub headers: Vec<ResponseHeader>,

    /// Rendered type of the first content entry; empty without content
    pub schema: Vec<TypeToken>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseHeader {
    pub name: String,
    pub description: String,

    /// Primitive type of the header schema, empty when absent
    #[serde(rename = "type")]
    pub header_type: String,
}

/// A named component schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    /// Display text and bookmark anchor, both equal to the schema name
    pub name: Bookmark,

    pub properties: Vec<Property>,

    /// Generated example payload
    pub definition_code: CodeBlock,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Property {
    pub name: String,
    pub description: String,

    /// True iff the name appears in the owning schema's `required` list
    pub required: bool,

    pub schema: Vec<TypeToken>,
}

/// Text that doubles as a bookmark target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bookmark {
    pub text: String,
    pub anchor: String,
}

impl Bookmark {
    /// Bookmark whose anchor equals its text
    pub fn named(name: impl Into<String>) -> Self {
        let text = name.into();
        Self {
            anchor: text.clone(),
            text,
        }
    }
}

/// Source code block with highlighting hints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    pub code: String,
    pub language: String,
    pub theme: String,
}

impl CodeBlock {
    /// JSON code block using the default example theme
    pub fn json(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: EXAMPLE_LANGUAGE.to_string(),
            theme: EXAMPLE_THEME.to_string(),
        }
    }
}

/// One display fragment of a rendered schema type
///
/// Text tokens serialize as plain strings; link tokens as
/// `{"text": ..., "target": "anchor:..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TypeToken {
    Text(String),
    Link { text: String, target: String },
}

impl TypeToken {
    pub fn text(text: impl Into<String>) -> Self {
        TypeToken::Text(text.into())
    }

    /// Link token pointing at the definition bookmark named `name`
    pub fn link(name: &str) -> Self {
        TypeToken::Link {
            text: name.to_string(),
            target: format!("{}{}", ANCHOR_PREFIX, name),
        }
    }

    /// The text shown for this token
    pub fn display_text(&self) -> &str {
        match self {
            TypeToken::Text(text) => text,
            TypeToken::Link { text, .. } => text,
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, TypeToken::Link { .. })
    }
}

/// Join tokens into their plain display text (e.g., "<string>array")
pub fn tokens_to_string(tokens: &[TypeToken]) -> String {
    tokens.iter().map(TypeToken::display_text).collect()
}
