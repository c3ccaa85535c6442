//! Schema type → display tokens

use super::{ref_name, AdditionalProperties, SchemaNode};
use openapi_docgen_common::TypeToken;

/// Resolve a schema into the token sequence of its rendered type
///
/// - absent schema → no tokens
/// - `$ref` → a single link token to the referenced definition
/// - array with `items` → `<`, item tokens, `>`, `array`
/// - object whose `additionalProperties` is a schema → `map[string, `, value tokens, `]`
/// - anything else → the declared type, or `object`
///
/// Never fails. References are not followed, so cyclic schemas terminate.
pub fn resolve_type_tokens<S: SchemaNode + ?Sized>(schema: Option<&S>) -> Vec<TypeToken> {
    let mut tokens = Vec::new();
    if let Some(schema) = schema {
        push_tokens(schema, &mut tokens);
    }
    tokens
}

fn push_tokens<S: SchemaNode + ?Sized>(schema: &S, tokens: &mut Vec<TypeToken>) {
    if let Some(ref_path) = schema.ref_path() {
        tokens.push(TypeToken::link(ref_name(ref_path)));
        return;
    }

    let schema_type = schema.schema_type().unwrap_or("object");

    if schema_type == "array" {
        if let Some(items) = schema.items() {
            tokens.push(TypeToken::text("<"));
            push_tokens(items, tokens);
            tokens.push(TypeToken::text(">"));
            tokens.push(TypeToken::text("array"));
            return;
        }
    }

    if schema_type == "object" {
        if let AdditionalProperties::Schema(values) = schema.additional_properties() {
            tokens.push(TypeToken::text("map[string, "));
            push_tokens(values, tokens);
            tokens.push(TypeToken::text("]"));
            return;
        }
    }

    tokens.push(TypeToken::text(schema_type));
}
