//! `SchemaNode` over raw JSON values

use crate::schema::{example_value_text, AdditionalProperties, SchemaNode};
use serde_json::Value;

impl SchemaNode for Value {
    fn ref_path(&self) -> Option<&str> {
        self.get("$ref").and_then(Value::as_str)
    }

    fn schema_type(&self) -> Option<&str> {
        match self.get("type")? {
            Value::String(s) => Some(s.as_str()),
            Value::Array(types) => types
                .iter()
                .filter_map(Value::as_str)
                .find(|t| *t != "null"),
            _ => None,
        }
    }

    fn format(&self) -> Option<&str> {
        self.get("format").and_then(Value::as_str)
    }

    fn description(&self) -> Option<&str> {
        self.get("description").and_then(Value::as_str)
    }

    fn items(&self) -> Option<&Value> {
        self.get("items").filter(|items| items.is_object())
    }

    fn additional_properties(&self) -> AdditionalProperties<'_, Value> {
        match self.get("additionalProperties") {
            Some(Value::Bool(allowed)) => AdditionalProperties::Allowed(*allowed),
            Some(schema @ Value::Object(_)) => AdditionalProperties::Schema(schema),
            _ => AdditionalProperties::Absent,
        }
    }

    fn properties(&self) -> Vec<(&str, &Value)> {
        self.get("properties")
            .and_then(Value::as_object)
            .map(|props| props.iter().map(|(k, v)| (k.as_str(), v)).collect())
            .unwrap_or_default()
    }

    fn required(&self) -> Vec<&str> {
        self.get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    fn example_text(&self) -> Option<String> {
        self.get("example").and_then(example_value_text)
    }
}
