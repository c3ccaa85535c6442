//! OpenAPI 3.x object model
//!
//! Only the parts the document model reads are bound; unknown fields are
//! ignored. Maps are `IndexMap`s so declaration order is kept, and a `null`
//! collection binds as an empty one.

use crate::extract::{is_extension, is_http_method};
use crate::schema::{example_value_text, AdditionalProperties, SchemaNode};
use indexmap::IndexMap;
use openapi_docgen_common::{DocgenError, Result};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// OpenAPI document root
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OpenApiDocument {
    /// OpenAPI version (e.g., "3.0.3")
    #[serde(deserialize_with = "scalar_text")]
    pub openapi: Option<String>,

    /// API metadata
    pub info: Option<Info>,

    /// API paths, in document order
    #[serde(deserialize_with = "without_extensions")]
    pub paths: IndexMap<String, PathItem>,

    /// Reusable components
    pub components: Option<Components>,
}

impl OpenApiDocument {
    /// Bind a parsed JSON tree into the object model
    pub fn from_value(root: &Value) -> Result<Self> {
        Self::deserialize(root).map_err(|e| {
            DocgenError::MalformedInput(format!("Failed to bind OpenAPI document: {}", e))
        })
    }

    /// Named schemas from `components.schemas`
    pub fn schemas(&self) -> Option<&IndexMap<String, Schema>> {
        self.components.as_ref().map(|c| &c.schemas)
    }
}

/// API information
///
/// Scalar fields accept numbers and booleans as well as strings, since YAML
/// documents often carry `version: 1.0` unquoted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Info {
    #[serde(deserialize_with = "scalar_text")]
    pub title: Option<String>,

    #[serde(deserialize_with = "scalar_text")]
    pub description: Option<String>,

    #[serde(deserialize_with = "scalar_text")]
    pub version: Option<String>,

    pub contact: Option<Contact>,
    pub license: Option<License>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Contact {
    #[serde(deserialize_with = "scalar_text")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct License {
    #[serde(deserialize_with = "scalar_text")]
    pub name: Option<String>,
}

/// Operations declared on one path, in document order
///
/// Keys that are not HTTP methods (`parameters`, `servers`, extensions, ...)
/// are dropped while binding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathItem {
    pub operations: Vec<(String, Operation)>,
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = Option::<IndexMap<String, Value>>::deserialize(deserializer)?;

        let mut operations = Vec::new();
        for (method, value) in entries.into_iter().flatten() {
            if !is_http_method(&method) || !value.is_object() {
                continue;
            }
            let operation = Operation::deserialize(value)
                .map_err(|e| de::Error::custom(format!("{} operation: {}", method, e)))?;
            operations.push((method, operation));
        }

        Ok(PathItem { operations })
    }
}

/// HTTP operation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Operation {
    /// Tags (for grouping)
    #[serde(deserialize_with = "nullable")]
    pub tags: Vec<String>,

    pub summary: Option<String>,
    pub description: Option<String>,
    pub operation_id: Option<String>,

    #[serde(deserialize_with = "nullable")]
    pub parameters: Vec<Parameter>,

    pub request_body: Option<RequestBody>,

    #[serde(deserialize_with = "without_extensions")]
    pub responses: IndexMap<String, Response>,
}

/// Parameter definition
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Parameter {
    pub name: Option<String>,

    /// Location: query, header, path, cookie
    #[serde(rename = "in")]
    pub location: Option<String>,

    pub description: Option<String>,
    pub required: Option<bool>,
    pub schema: Option<Schema>,
}

/// Request body
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RequestBody {
    pub description: Option<String>,

    /// Content types, in declaration order
    #[serde(deserialize_with = "nullable")]
    pub content: IndexMap<String, MediaType>,

    pub required: Option<bool>,
}

/// Media type
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MediaType {
    pub schema: Option<Schema>,
}

/// Response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Response {
    pub description: Option<String>,

    #[serde(deserialize_with = "nullable")]
    pub headers: IndexMap<String, Header>,

    #[serde(deserialize_with = "nullable")]
    pub content: IndexMap<String, MediaType>,
}

/// Response header
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Header {
    pub description: Option<String>,
    pub schema: Option<Schema>,
}

/// Reusable components
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Components {
    /// Named schemas, in declaration order
    #[serde(deserialize_with = "nullable")]
    pub schemas: IndexMap<String, Schema>,
}

/// Schema definition
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,

    /// Type: string, number, integer, boolean, array, object
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,

    /// Format (e.g., int32, int64, date-time)
    pub format: Option<String>,

    pub description: Option<String>,

    /// Object properties, in declaration order
    #[serde(deserialize_with = "nullable")]
    pub properties: IndexMap<String, Schema>,

    #[serde(deserialize_with = "nullable")]
    pub required: Vec<String>,

    /// Array item schema
    pub items: Option<Box<Schema>>,

    pub additional_properties: Option<AdditionalPropertiesValue>,

    /// Explicit example; `null` binds as absent
    pub example: Option<Value>,
}

/// `type` keyword: a single name, or a list of names (OpenAPI 3.1)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

/// `additionalProperties` keyword
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalPropertiesValue {
    Bool(bool),
    Schema(Box<Schema>),
}

impl SchemaNode for Schema {
    fn ref_path(&self) -> Option<&str> {
        self.ref_path.as_deref()
    }

    fn schema_type(&self) -> Option<&str> {
        match self.schema_type.as_ref()? {
            SchemaType::Single(name) => Some(name.as_str()),
            SchemaType::Multiple(names) => {
                names.iter().map(String::as_str).find(|name| *name != "null")
            }
        }
    }

    fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn items(&self) -> Option<&Schema> {
        self.items.as_deref()
    }

    fn additional_properties(&self) -> AdditionalProperties<'_, Schema> {
        match &self.additional_properties {
            None => AdditionalProperties::Absent,
            Some(AdditionalPropertiesValue::Bool(allowed)) => AdditionalProperties::Allowed(*allowed),
            Some(AdditionalPropertiesValue::Schema(schema)) => AdditionalProperties::Schema(schema),
        }
    }

    fn properties(&self) -> Vec<(&str, &Schema)> {
        self.properties
            .iter()
            .map(|(name, schema)| (name.as_str(), schema))
            .collect()
    }

    fn required(&self) -> Vec<&str> {
        self.required.iter().map(String::as_str).collect()
    }

    fn example_text(&self) -> Option<String> {
        self.example.as_ref().and_then(example_value_text)
    }
}

/// Bind `null` as the collection's empty value
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Bind a Paths or Responses map, dropping `x-` extension entries before
/// their values are bound
fn without_extensions<'de, D, T>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = Option::<IndexMap<String, Value>>::deserialize(deserializer)?;

    entries
        .into_iter()
        .flatten()
        .filter(|(key, _)| !is_extension(key))
        .map(|(key, value)| match T::deserialize(value) {
            Ok(bound) => Ok((key, bound)),
            Err(e) => Err(de::Error::custom(format!("{}: {}", key, e))),
        })
        .collect()
}

/// Bind a scalar as its text; objects and arrays bind as absent
fn scalar_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        scalar @ (Value::Number(_) | Value::Bool(_)) => Some(scalar.to_string()),
        _ => None,
    })
}
