//! Template loading and management

use openapi_docgen_common::{DocgenError, Result, ANCHOR_PREFIX};
use std::collections::HashMap;
use tera::{Tera, Value};

/// Built-in template for OpenAPI document models
pub const API_TEMPLATE: &str = "api.md";

/// Built-in template for database metadata
pub const DATABASE_TEMPLATE: &str = "database.md";

/// Load the built-in templates and register custom filters
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("type_tokens", type_tokens_filter);
    tera.register_filter("anchor", anchor_filter);
    tera.register_filter("yes_no", yes_no_filter);

    tera.add_raw_template(API_TEMPLATE, include_str!("../templates/api.md.tera"))
        .map_err(|e| DocgenError::Render(format!("Failed to load api.md template: {}", e)))?;

    tera.add_raw_template(
        DATABASE_TEMPLATE,
        include_str!("../templates/database.md.tera"),
    )
    .map_err(|e| DocgenError::Render(format!("Failed to load database.md template: {}", e)))?;

    Ok(tera)
}

/// Markdown heading anchor for a name (e.g., "Pet Owner" → "pet-owner")
pub fn anchor_id(name: &str) -> String {
    name.trim()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c.to_ascii_lowercase()),
            _ => None,
        })
        .collect()
}

/// Filter to join a type-token sequence into Markdown, linking references
///
/// The href comes from the link's `target` bookmark; a link without a
/// target falls back to its text.
///
/// `["<", {"text": "Pet", "target": "anchor:Pet"}, ">", "array"]` → `<[Pet](#pet)>array`
fn type_tokens_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let tokens = value
        .as_array()
        .ok_or_else(|| tera::Error::msg("type_tokens filter expects an array"))?;

    let mut rendered = String::new();
    for token in tokens {
        match token {
            Value::String(text) => rendered.push_str(text),
            Value::Object(link) => {
                let text = link.get("text").and_then(Value::as_str).unwrap_or_default();
                let bookmark = link
                    .get("target")
                    .and_then(Value::as_str)
                    .map(|target| target.strip_prefix(ANCHOR_PREFIX).unwrap_or(target))
                    .unwrap_or(text);
                rendered.push_str(&format!("[{}](#{})", text, anchor_id(bookmark)));
            }
            other => {
                return Err(tera::Error::msg(format!(
                    "type_tokens filter got an unexpected token: {}",
                    other
                )))
            }
        }
    }

    Ok(Value::String(rendered))
}

fn anchor_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let name = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("anchor filter expects a string"))?;

    Ok(Value::String(anchor_id(name)))
}

/// Filter to render a flag as Y/N
fn yes_no_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let flag = value
        .as_bool()
        .ok_or_else(|| tera::Error::msg("yes_no filter expects a boolean"))?;

    Ok(Value::String(if flag { "Y" } else { "N" }.to_string()))
}
