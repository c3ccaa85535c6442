//! Schema access shared by both traversal strategies
//!
//! The type resolver and example generator are written once against
//! [`SchemaNode`] and [`SchemaRegistry`]. The tree strategy implements them
//! for `serde_json::Value`, the typed strategy for [`crate::typed::Schema`].

mod example;
mod type_resolver;

pub use example::{example_code, generate_example, generate_object, ExampleValue};
pub use type_resolver::resolve_type_tokens;

/// Read-only view of one schema fragment
pub trait SchemaNode {
    /// Raw `$ref` value
    fn ref_path(&self) -> Option<&str>;

    /// Declared type; for a type array, the first non-`null` entry
    fn schema_type(&self) -> Option<&str>;

    fn format(&self) -> Option<&str>;

    fn description(&self) -> Option<&str>;

    fn items(&self) -> Option<&Self>;

    fn additional_properties(&self) -> AdditionalProperties<'_, Self>;

    /// Declared properties, in declaration order
    fn properties(&self) -> Vec<(&str, &Self)>;

    /// Names listed in the schema's own `required` array
    fn required(&self) -> Vec<&str>;

    /// Explicit `example`, rendered as text; `null` counts as absent
    fn example_text(&self) -> Option<String>;
}

/// Value of a schema's `additionalProperties` keyword
#[derive(Debug)]
pub enum AdditionalProperties<'a, S: ?Sized> {
    Absent,
    Allowed(bool),
    Schema(&'a S),
}

impl<S: ?Sized> Clone for AdditionalProperties<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for AdditionalProperties<'_, S> {}

/// Named schemas that `$ref`s resolve against (`components.schemas`)
pub trait SchemaRegistry {
    type Node: SchemaNode;

    fn lookup(&self, name: &str) -> Option<&Self::Node>;
}

impl SchemaRegistry for serde_json::Map<String, serde_json::Value> {
    type Node = serde_json::Value;

    fn lookup(&self, name: &str) -> Option<&serde_json::Value> {
        self.get(name)
    }
}

impl SchemaRegistry for indexmap::IndexMap<String, crate::typed::Schema> {
    type Node = crate::typed::Schema;

    fn lookup(&self, name: &str) -> Option<&crate::typed::Schema> {
        self.get(name)
    }
}

/// Name a `$ref` points at: its last `/`-separated segment
///
/// `#/components/schemas/Pet` → `Pet`
pub fn ref_name(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}

/// Render an explicit example value as text
///
/// Strings are used verbatim, everything else as compact JSON.
pub(crate) fn example_value_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ref_name() {
        assert_eq!(ref_name("#/components/schemas/Pet"), "Pet");
        assert_eq!(ref_name("Pet"), "Pet");
        assert_eq!(ref_name("#/components/schemas/"), "");
    }

    #[test]
    fn test_example_value_text() {
        assert_eq!(example_value_text(&json!("doggie")), Some("doggie".to_string()));
        assert_eq!(example_value_text(&json!(42)), Some("42".to_string()));
        assert_eq!(example_value_text(&json!(true)), Some("true".to_string()));
        assert_eq!(
            example_value_text(&json!({"a": [1, 2]})),
            Some(r#"{"a":[1,2]}"#.to_string())
        );
        assert_eq!(example_value_text(&json!(null)), None);
    }
}
