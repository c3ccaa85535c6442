//! Raw specification loading
//!
//! Turns a file, string or uploaded bytes into a JSON tree whose object keys
//! keep document order. JSON is tried first, then YAML.

use openapi_docgen_common::{DocgenError, Result};
use serde_json::{Map, Number, Value};
use std::fs;
use std::path::PathBuf;

/// Where a specification comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    /// Raw specification text
    Text(String),
    /// Path to a JSON or YAML file
    File(PathBuf),
    /// Uploaded bytes (must be UTF-8)
    Bytes(Vec<u8>),
}

impl SpecSource {
    /// Read the raw specification text
    pub fn load(&self) -> Result<String> {
        match self {
            SpecSource::Text(text) => Ok(text.clone()),
            SpecSource::File(path) => fs::read_to_string(path).map_err(|e| {
                DocgenError::MalformedInput(format!(
                    "Failed to read specification file {}: {}",
                    path.display(),
                    e
                ))
            }),
            SpecSource::Bytes(bytes) => String::from_utf8(bytes.clone()).map_err(|e| {
                DocgenError::MalformedInput(format!("Specification is not valid UTF-8: {}", e))
            }),
        }
    }

    /// Read and parse the specification into a JSON tree
    pub fn parse(&self) -> Result<Value> {
        parse_document(&self.load()?)
    }
}

/// Parse specification text (JSON or YAML) into a JSON tree
///
/// The top-level value must be an object; anything else is rejected as
/// malformed input.
pub fn parse_document(text: &str) -> Result<Value> {
    let root = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(json_err) => {
            let looks_like_json = matches!(text.trim_start().chars().next(), Some('{' | '['));
            match serde_yaml::from_str::<serde_yaml::Value>(text) {
                Ok(yaml) if !looks_like_json => yaml_to_json(yaml),
                Ok(_) => {
                    return Err(DocgenError::MalformedInput(format!(
                        "Failed to parse OpenAPI JSON: {}",
                        json_err
                    )))
                }
                Err(yaml_err) => {
                    let detail = if looks_like_json {
                        json_err.to_string()
                    } else {
                        yaml_err.to_string()
                    };
                    return Err(DocgenError::MalformedInput(format!(
                        "Failed to parse OpenAPI document: {}",
                        detail
                    )));
                }
            }
        }
    };

    if !root.is_object() {
        return Err(DocgenError::MalformedInput(
            "OpenAPI document root must be an object".to_string(),
        ));
    }

    Ok(root)
}

/// Convert a YAML value into JSON, stringifying non-string mapping keys
///
/// Response codes are commonly written as bare numbers (`200:`) in YAML.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => yaml_number(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut object = Map::new();
            for (key, value) in mapping {
                object.insert(yaml_key(key), yaml_to_json(value));
            }
            Value::Object(object)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
