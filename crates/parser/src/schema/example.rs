//! Example payload generation
//!
//! Builds a sample value for a schema, following `$ref`s through the schema
//! registry. A set of visited reference names is threaded through the
//! recursion: a reference seen before is emitted as its literal `$ref`
//! string instead of being expanded again, which bounds the recursion for
//! any self-referential schema graph.

use super::{ref_name, AdditionalProperties, SchemaNode, SchemaRegistry};
use indexmap::IndexMap;
use openapi_docgen_common::{CodeBlock, Result};
use serde::Serialize;
use std::collections::HashSet;
use tracing::warn;

const DATE_TIME_EXAMPLE: &str = "2023-01-01T12:00:00Z";
const DATE_EXAMPLE: &str = "2023-01-01";
const EMAIL_EXAMPLE: &str = "user@example.com";
const UUID_EXAMPLE: &str = "550e8400-e29b-41d4-a716-446655440000";
const STRING_EXAMPLE: &str = "example";
const INT64_EXAMPLE: i64 = 10_000_000_000;
const UNKNOWN_EXAMPLE: &str = "unknown";

/// Key used for the single entry of a map-shaped example
const MAP_KEY_EXAMPLE: &str = "key";

/// Generated example value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExampleValue {
    String(String),
    Integer(i32),
    Long(i64),
    Boolean(bool),
    Array(Vec<ExampleValue>),
    /// Properties in declaration order
    Object(IndexMap<String, ExampleValue>),
}

impl ExampleValue {
    fn string(s: impl Into<String>) -> Self {
        ExampleValue::String(s.into())
    }
}

/// Generate an example value for one schema node
pub fn generate_example<R: SchemaRegistry>(
    schema: &R::Node,
    registry: &R,
    visited: &mut HashSet<String>,
) -> ExampleValue {
    if let Some(example) = schema.example_text() {
        return ExampleValue::String(example);
    }

    if let Some(ref_path) = schema.ref_path() {
        let name = ref_name(ref_path);
        if visited.contains(name) {
            return ExampleValue::string(ref_path);
        }
        visited.insert(name.to_string());

        return match registry.lookup(name) {
            Some(target) => ExampleValue::Object(generate_object(target, registry, visited)),
            None => {
                warn!(reference = %ref_path, "Unresolved schema reference in example");
                ExampleValue::Object(IndexMap::new())
            }
        };
    }

    match schema.schema_type().unwrap_or("object") {
        "string" => ExampleValue::string(match schema.format() {
            Some("date-time") => DATE_TIME_EXAMPLE,
            Some("date") => DATE_EXAMPLE,
            Some("email") => EMAIL_EXAMPLE,
            Some("uuid") => UUID_EXAMPLE,
            _ => STRING_EXAMPLE,
        }),
        "integer" | "number" => match schema.format() {
            Some("int64") => ExampleValue::Long(INT64_EXAMPLE),
            _ => ExampleValue::Integer(0),
        },
        "boolean" => ExampleValue::Boolean(false),
        "array" => ExampleValue::Array(
            schema
                .items()
                .map(|items| vec![generate_example(items, registry, visited)])
                .unwrap_or_default(),
        ),
        "object" => ExampleValue::Object(generate_object(schema, registry, visited)),
        _ => ExampleValue::string(UNKNOWN_EXAMPLE),
    }
}

/// Generate the object-shaped example of a schema
///
/// Declared properties win; without them a single `"key"` entry describes
/// `additionalProperties`. The schema's own type is not consulted.
pub fn generate_object<R: SchemaRegistry>(
    schema: &R::Node,
    registry: &R,
    visited: &mut HashSet<String>,
) -> IndexMap<String, ExampleValue> {
    let mut object = IndexMap::new();

    let properties = schema.properties();
    if !properties.is_empty() {
        for (name, property) in properties {
            let value = generate_example(property, registry, visited);
            object.insert(name.to_string(), value);
        }
        return object;
    }

    match schema.additional_properties() {
        AdditionalProperties::Schema(values) => {
            let value = generate_example(values, registry, visited);
            object.insert(MAP_KEY_EXAMPLE.to_string(), value);
        }
        AdditionalProperties::Allowed(true) => {
            object.insert(
                MAP_KEY_EXAMPLE.to_string(),
                ExampleValue::string(STRING_EXAMPLE),
            );
        }
        AdditionalProperties::Allowed(false) | AdditionalProperties::Absent => {}
    }

    object
}

/// Pretty-printed JSON example for a named definition
///
/// Each call starts from an empty visited set, so references expanded in one
/// definition never affect another.
pub fn example_code<R: SchemaRegistry>(schema: &R::Node, registry: &R) -> Result<CodeBlock> {
    let mut visited = HashSet::new();
    let example = generate_object(schema, registry, &mut visited);
    let code = serde_json::to_string_pretty(&example)?;
    Ok(CodeBlock::json(code))
}
