//! Builds the document model straight from the JSON tree

use crate::assembler::DocumentWalker;
use crate::extract::{is_extension, is_http_method, push_unique, ResourceGroups, BODY_PARAMETER};
use crate::schema::{example_code, resolve_type_tokens, SchemaNode};
use openapi_docgen_common::{
    ApiInfo, ApiResource, Bookmark, ContactInfo, Definition, Endpoint, LicenseInfo, Parameter,
    Property, Response, ResponseHeader, Result,
};
use serde_json::{Map, Value};
use tracing::debug;

/// Walks a parsed OpenAPI document as a generic JSON tree
///
/// Missing or mistyped fields resolve to empty strings, `false` or empty
/// sequences; the walker itself never fails on structure.
pub struct JsonTreeWalker<'a> {
    root: &'a Value,
}

impl<'a> JsonTreeWalker<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    fn schemas(&self) -> Option<&'a Map<String, Value>> {
        self.root
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(Value::as_object)
    }

    fn endpoint(&self, path: &str, method: &str, operation: &Value) -> Endpoint {
        Endpoint {
            summary: text(operation, "summary"),
            description: text(operation, "description"),
            http_method: method.to_uppercase(),
            url: path.to_string(),
            produces: produces(operation),
            consumes: content_types(operation.get("requestBody")),
            parameters: parameters(operation),
            responses: responses(operation),
        }
    }
}

impl DocumentWalker for JsonTreeWalker<'_> {
    fn info(&self) -> ApiInfo {
        let Some(info) = self.root.get("info") else {
            return ApiInfo::default();
        };

        ApiInfo {
            title: text(info, "title"),
            description: text(info, "description"),
            version: text(info, "version"),
            contact: ContactInfo {
                email: info.get("contact").map(|c| text(c, "email")).unwrap_or_default(),
            },
            license: LicenseInfo {
                name: info.get("license").map(|l| text(l, "name")).unwrap_or_default(),
            },
        }
    }

    fn resources(&self) -> Vec<ApiResource> {
        let mut groups = ResourceGroups::new();

        let Some(paths) = self.root.get("paths").and_then(Value::as_object) else {
            return Vec::new();
        };

        for (path, path_item) in paths {
            if is_extension(path) {
                continue;
            }
            let Some(operations) = path_item.as_object() else {
                continue;
            };
            debug!(path = %path, "Extracting operations");

            for (method, operation) in operations {
                if !is_http_method(method) || !operation.is_object() {
                    continue;
                }

                let tag = operation
                    .get("tags")
                    .and_then(Value::as_array)
                    .and_then(|tags| tags.first())
                    .and_then(Value::as_str);

                groups.add(tag, self.endpoint(path, method, operation));
            }
        }

        groups.into_resources()
    }

    fn definitions(&self) -> Result<Vec<Definition>> {
        let Some(schemas) = self.schemas() else {
            return Ok(Vec::new());
        };

        let mut definitions = Vec::with_capacity(schemas.len());
        for (name, schema) in schemas {
            debug!(definition = %name, "Building definition");

            let required = schema.required();
            let properties = schema
                .properties()
                .into_iter()
                .map(|(prop_name, prop)| Property {
                    name: prop_name.to_string(),
                    description: prop.description().unwrap_or_default().to_string(),
                    required: required.contains(&prop_name),
                    schema: resolve_type_tokens(Some(prop)),
                })
                .collect();

            definitions.push(Definition {
                name: Bookmark::named(name.as_str()),
                properties,
                definition_code: example_code(schema, schemas)?,
            });
        }

        Ok(definitions)
    }
}

/// Text of a scalar field; empty when absent or not a scalar
fn text(node: &Value, key: &str) -> String {
    match node.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(scalar @ (Value::Number(_) | Value::Bool(_))) => scalar.to_string(),
        _ => String::new(),
    }
}

fn flag(node: &Value, key: &str) -> bool {
    node.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn content(node: Option<&Value>) -> Option<&Map<String, Value>> {
    node.and_then(|n| n.get("content")).and_then(Value::as_object)
}

fn content_types(node: Option<&Value>) -> Vec<String> {
    content(node)
        .map(|media| media.keys().cloned().collect())
        .unwrap_or_default()
}

/// Schema of the first content entry, if any
fn first_content_schema(node: Option<&Value>) -> Option<&Value> {
    content(node)
        .and_then(|media| media.values().next())
        .and_then(|media_type| media_type.get("schema"))
}

fn response_entries(operation: &Value) -> impl Iterator<Item = (&String, &Value)> {
    operation
        .get("responses")
        .and_then(Value::as_object)
        .into_iter()
        .flatten()
        .filter(|(code, _)| !is_extension(code))
}

fn produces(operation: &Value) -> Vec<String> {
    let mut produces = Vec::new();
    for (_, response) in response_entries(operation) {
        for content_type in content_types(Some(response)) {
            push_unique(&mut produces, &content_type);
        }
    }
    produces
}

fn parameters(operation: &Value) -> Vec<Parameter> {
    let mut parameters: Vec<Parameter> = operation
        .get("parameters")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .map(|param| Parameter {
            location: text(param, "in"),
            name: text(param, "name"),
            description: text(param, "description"),
            required: flag(param, "required"),
            schema: resolve_type_tokens(param.get("schema")),
        })
        .collect();

    let request_body = operation.get("requestBody");
    if content(request_body).is_some_and(|media| !media.is_empty()) {
        let body = request_body.unwrap_or(&Value::Null);
        parameters.push(Parameter {
            location: BODY_PARAMETER.to_string(),
            name: BODY_PARAMETER.to_string(),
            description: text(body, "description"),
            required: flag(body, "required"),
            schema: resolve_type_tokens(first_content_schema(request_body)),
        });
    }

    parameters
}

fn responses(operation: &Value) -> Vec<Response> {
    response_entries(operation)
        .map(|(code, response)| Response {
            code: code.clone(),
            description: text(response, "description"),
            headers: headers(response),
            schema: resolve_type_tokens(first_content_schema(Some(response))),
        })
        .collect()
}

fn headers(response: &Value) -> Vec<ResponseHeader> {
    response
        .get("headers")
        .and_then(Value::as_object)
        .into_iter()
        .flatten()
        .map(|(name, header)| ResponseHeader {
            name: name.clone(),
            description: text(header, "description"),
            header_type: header
                .get("schema")
                .and_then(|s| s.schema_type())
                .unwrap_or_default()
                .to_string(),
        })
        .collect()
}
