//! Builds the document model from the bound object graph

use super::types::{MediaType, OpenApiDocument, Operation, Response as ResponseObject, Schema};
use crate::assembler::DocumentWalker;
use crate::extract::{push_unique, ResourceGroups, BODY_PARAMETER};
use crate::schema::{example_code, resolve_type_tokens, SchemaNode};
use indexmap::IndexMap;
use openapi_docgen_common::{
    ApiInfo, ApiResource, Bookmark, ContactInfo, Definition, Endpoint, LicenseInfo, Parameter,
    Property, Response, ResponseHeader, Result,
};
use tracing::debug;

/// Walks an [`OpenApiDocument`]
pub struct TypedWalker<'a> {
    document: &'a OpenApiDocument,
}

impl<'a> TypedWalker<'a> {
    pub fn new(document: &'a OpenApiDocument) -> Self {
        Self { document }
    }
}

impl DocumentWalker for TypedWalker<'_> {
    fn info(&self) -> ApiInfo {
        let Some(info) = &self.document.info else {
            return ApiInfo::default();
        };

        ApiInfo {
            title: info.title.clone().unwrap_or_default(),
            description: info.description.clone().unwrap_or_default(),
            version: info.version.clone().unwrap_or_default(),
            contact: ContactInfo {
                email: info
                    .contact
                    .as_ref()
                    .and_then(|c| c.email.clone())
                    .unwrap_or_default(),
            },
            license: LicenseInfo {
                name: info
                    .license
                    .as_ref()
                    .and_then(|l| l.name.clone())
                    .unwrap_or_default(),
            },
        }
    }

    fn resources(&self) -> Vec<ApiResource> {
        let mut groups = ResourceGroups::new();

        for (path, path_item) in &self.document.paths {
            debug!(path = %path, "Extracting operations");

            for (method, operation) in &path_item.operations {
                let tag = operation.tags.first().map(String::as_str);
                groups.add(tag, convert_operation(path, method, operation));
            }
        }

        groups.into_resources()
    }

    fn definitions(&self) -> Result<Vec<Definition>> {
        let Some(schemas) = self.document.schemas() else {
            return Ok(Vec::new());
        };

        let mut definitions = Vec::with_capacity(schemas.len());
        for (name, schema) in schemas {
            debug!(definition = %name, "Building definition");

            let properties = schema
                .properties
                .iter()
                .map(|(prop_name, prop)| Property {
                    name: prop_name.clone(),
                    description: prop.description.clone().unwrap_or_default(),
                    required: schema.required.contains(prop_name),
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

fn convert_operation(path: &str, method: &str, operation: &Operation) -> Endpoint {
    let mut produces = Vec::new();
    for response in operation.responses.values() {
        for content_type in response.content.keys() {
            push_unique(&mut produces, content_type);
        }
    }

    let consumes = operation
        .request_body
        .as_ref()
        .map(|body| body.content.keys().cloned().collect())
        .unwrap_or_default();

    Endpoint {
        summary: operation.summary.clone().unwrap_or_default(),
        description: operation.description.clone().unwrap_or_default(),
        http_method: method.to_uppercase(),
        url: path.to_string(),
        produces,
        consumes,
        parameters: convert_parameters(operation),
        responses: operation
            .responses
            .iter()
            .map(|(code, response)| convert_response(code, response))
            .collect(),
    }
}

fn convert_parameters(operation: &Operation) -> Vec<Parameter> {
    let mut parameters: Vec<Parameter> = operation
        .parameters
        .iter()
        .map(|param| Parameter {
            location: param.location.clone().unwrap_or_default(),
            name: param.name.clone().unwrap_or_default(),
            description: param.description.clone().unwrap_or_default(),
            required: param.required.unwrap_or(false),
            schema: resolve_type_tokens(param.schema.as_ref()),
        })
        .collect();

    if let Some(body) = &operation.request_body {
        if !body.content.is_empty() {
            parameters.push(Parameter {
                location: BODY_PARAMETER.to_string(),
                name: BODY_PARAMETER.to_string(),
                description: body.description.clone().unwrap_or_default(),
                required: body.required.unwrap_or(false),
                schema: resolve_type_tokens(first_content_schema(&body.content)),
            });
        }
    }

    parameters
}

fn convert_response(code: &str, response: &ResponseObject) -> Response {
    Response {
        code: code.to_string(),
        description: response.description.clone().unwrap_or_default(),
        headers: response
            .headers
            .iter()
            .map(|(name, header)| ResponseHeader {
                name: name.clone(),
                description: header.description.clone().unwrap_or_default(),
                header_type: header
                    .schema
                    .as_ref()
                    .and_then(|s| s.schema_type())
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect(),
        schema: resolve_type_tokens(first_content_schema(&response.content)),
    }
}

fn first_content_schema(content: &IndexMap<String, MediaType>) -> Option<&Schema> {
    content.values().next().and_then(|media| media.schema.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapi_docgen_common::TypeToken;
    use serde_json::json;

    fn document(value: serde_json::Value) -> OpenApiDocument {
        OpenApiDocument::from_value(&value).unwrap()
    }

    #[test]
    fn test_missing_info_defaults() {
        let doc = document(json!({"openapi": "3.0.0"}));
        assert_eq!(TypedWalker::new(&doc).info(), ApiInfo::default());
    }

    #[test]
    fn test_operation_conversion() {
        let doc = document(json!({
            "paths": {
                "/pets/{id}": {
                    "delete": {
                        "summary": "Delete a pet",
                        "parameters": [{"in": "path", "name": "id", "required": true, "schema": {"type": "integer"}}],
                        "responses": {
                            "200": {"description": "ok", "content": {"application/json": {"schema": {"type": "array", "items": {"$ref": "#/components/schemas/Pet"}}}}},
                            "default": {"description": "error", "content": {"application/json": {}}}
                        }
                    }
                }
            }
        }));

        let resources = TypedWalker::new(&doc).resources();
        assert_eq!(resources[0].name, "Default");

        let endpoint = &resources[0].endpoints[0];
        assert_eq!(endpoint.http_method, "DELETE");
        assert_eq!(endpoint.produces, vec!["application/json"]);
        assert!(endpoint.consumes.is_empty());
        assert_eq!(endpoint.parameters[0].schema, vec![TypeToken::text("integer")]);
        assert_eq!(
            endpoint.responses[0].schema,
            vec![
                TypeToken::text("<"),
                TypeToken::link("Pet"),
                TypeToken::text(">"),
                TypeToken::text("array"),
            ]
        );
        assert!(endpoint.responses[1].schema.is_empty());
    }

    #[test]
    fn test_body_without_schema_has_empty_tokens() {
        let doc = document(json!({
            "paths": {"/upload": {"post": {"requestBody": {"content": {"application/octet-stream": {}}}}}}
        }));

        let resources = TypedWalker::new(&doc).resources();
        let body = &resources[0].endpoints[0].parameters[0];
        assert_eq!(body.name, "body");
        assert!(!body.required);
        assert!(body.schema.is_empty());
    }
}
