//! Integration tests for the OpenAPI document model

use openapi_docgen_common::{tokens_to_string, DocumentModel, TraversalStrategy, TypeToken};
use openapi_docgen_parser::{compare_strategies, DocumentModelAssembler, OpenApiDocParser};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn petstore(strategy: TraversalStrategy) -> DocumentModel {
    OpenApiDocParser::from_file(fixture("petstore.json"))
        .unwrap()
        .with_strategy(strategy)
        .parse()
        .unwrap()
}

fn example_of(model: &DocumentModel, definition: &str) -> Value {
    let code = &model.definition(definition).unwrap().definition_code;
    serde_json::from_str(&code.code).unwrap()
}

#[test]
fn test_petstore_info() {
    let model = petstore(TraversalStrategy::Tree);

    assert_eq!(model.info.title, "Swagger Petstore");
    assert_eq!(model.info.description, "A sample pet store server.");
    assert_eq!(model.info.version, "1.0.7");
    assert_eq!(model.info.contact.email, "apiteam@swagger.io");
    assert_eq!(model.info.license.name, "Apache 2.0");
}

#[test]
fn test_resources_grouped_by_first_tag() {
    let model = petstore(TraversalStrategy::Tree);

    let names: Vec<&str> = model.resources.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["pet", "store", "Default"]);
    assert_eq!(model.endpoint_count(), 6);

    let pet: Vec<(String, String)> = model
        .resource("pet")
        .unwrap()
        .endpoints
        .iter()
        .map(|e| (e.http_method.clone(), e.url.clone()))
        .collect();
    assert_eq!(
        pet,
        vec![
            ("GET".to_string(), "/pets".to_string()),
            ("POST".to_string(), "/pets".to_string()),
            ("GET".to_string(), "/pets/{petId}".to_string()),
        ]
    );

    let untagged: Vec<&str> = model
        .resource("Default")
        .unwrap()
        .endpoints
        .iter()
        .map(|e| e.http_method.as_str())
        .collect();
    assert_eq!(untagged, vec!["DELETE", "HEAD"]);
    assert!(model.resource("admin").is_none());
}

#[test]
fn test_list_endpoint() {
    let model = petstore(TraversalStrategy::Tree);
    let list = &model.resource("pet").unwrap().endpoints[0];

    assert_eq!(list.summary, "List pets");
    assert_eq!(list.produces, vec!["application/json", "application/xml"]);
    assert!(list.consumes.is_empty());

    assert_eq!(list.parameters.len(), 2);
    assert_eq!(list.parameters[0].location, "query");
    assert_eq!(list.parameters[0].description, "How many items to return");
    assert!(!list.parameters[0].required);
    assert_eq!(list.parameters[0].schema, vec![TypeToken::text("integer")]);
    assert_eq!(
        list.parameters[1].schema,
        vec![
            TypeToken::text("<"),
            TypeToken::text("string"),
            TypeToken::text(">"),
            TypeToken::text("array"),
        ]
    );

    let codes: Vec<&str> = list.responses.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["200", "default"]);
    assert_eq!(tokens_to_string(&list.responses[0].schema), "<Pet>array");
    assert_eq!(list.responses[1].schema, vec![TypeToken::link("Error")]);

    let header = &list.responses[0].headers[0];
    assert_eq!(header.name, "X-Next");
    assert_eq!(header.description, "Link to the next page");
    assert_eq!(header.header_type, "string");
}

#[test]
fn test_request_body_parameter() {
    let model = petstore(TraversalStrategy::Tree);
    let create = &model.resource("pet").unwrap().endpoints[1];

    assert_eq!(
        create.consumes,
        vec!["application/json", "application/x-www-form-urlencoded"]
    );
    assert!(create.produces.is_empty());

    let body = create.parameters.last().unwrap();
    assert_eq!(create.parameters.len(), 1);
    assert_eq!(body.location, "body");
    assert_eq!(body.name, "body");
    assert_eq!(body.description, "Pet to add to the store");
    assert!(body.required);
    assert_eq!(body.schema, vec![TypeToken::link("Pet")]);

    assert_eq!(create.responses[0].code, "201");
    assert!(create.responses[0].schema.is_empty());
}

#[test]
fn test_map_response_tokens() {
    let model = petstore(TraversalStrategy::Tree);
    let inventory = &model.resource("store").unwrap().endpoints[0];

    assert_eq!(
        inventory.responses[0].schema,
        vec![
            TypeToken::text("map[string, "),
            TypeToken::text("integer"),
            TypeToken::text("]"),
        ]
    );
}

#[test]
fn test_definitions() {
    let model = petstore(TraversalStrategy::Tree);

    let names: Vec<&str> = model.definitions.iter().map(|d| d.name.text.as_str()).collect();
    assert_eq!(names, vec!["Pet", "Category", "Tag", "Owner", "Error"]);

    let pet = model.definition("Pet").unwrap();
    assert_eq!(pet.name.anchor, "Pet");

    let flags: Vec<(&str, bool)> = pet
        .properties
        .iter()
        .map(|p| (p.name.as_str(), p.required))
        .collect();
    assert_eq!(
        flags,
        vec![
            ("id", true),
            ("name", true),
            ("category", false),
            ("tags", false),
            ("birthday", false),
            ("status", false),
            ("attributes", false),
        ]
    );

    assert_eq!(pet.properties[2].schema, vec![TypeToken::link("Category")]);
    assert_eq!(tokens_to_string(&pet.properties[3].schema), "<Tag>array");
    assert_eq!(pet.properties[5].description, "pet status in the store");
    assert_eq!(
        tokens_to_string(&pet.properties[6].schema),
        "map[string, string]"
    );
    assert_eq!(pet.definition_code.language, "json");
}

#[test]
fn test_generated_examples() {
    let model = petstore(TraversalStrategy::Tree);

    assert_eq!(
        example_of(&model, "Pet"),
        json!({
            "id": 10000000000_i64,
            "name": "doggie",
            "category": {
                "id": 10000000000_i64,
                "name": "example",
                "parent": "#/components/schemas/Category"
            },
            "tags": [{"id": 0, "name": "example"}],
            "birthday": "2023-01-01",
            "status": "example",
            "attributes": {"key": "example"}
        })
    );

    let owner = example_of(&model, "Owner");
    assert_eq!(owner["email"], "user@example.com");
    assert_eq!(owner["uuid"], "550e8400-e29b-41d4-a716-446655440000");
    assert_eq!(owner["registered"], "2023-01-01T12:00:00Z");
    assert_eq!(owner["verified"], false);
    assert_eq!(owner["rating"], 0);
    assert_eq!(owner["pets"][0]["name"], "doggie");
    assert_eq!(owner["avatar"], "unknown");
    assert_eq!(owner["legacy"], json!({}));

    assert_eq!(example_of(&model, "Error"), json!({"code": 0, "message": "example"}));
}

#[test]
fn test_example_key_order_follows_declaration() {
    let model = petstore(TraversalStrategy::Typed);
    let code = &model.definition("Pet").unwrap().definition_code.code;

    let positions: Vec<usize> = ["\"id\"", "\"name\"", "\"category\"", "\"tags\"", "\"attributes\""]
        .iter()
        .map(|key| code.find(key).unwrap())
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn test_self_referencing_schema_terminates() {
    let document = r##"{
        "openapi": "3.0.0",
        "components": {
            "schemas": {
                "A": {
                    "type": "object",
                    "properties": {
                        "self": {"$ref": "#/components/schemas/A"},
                        "children": {"type": "array", "items": {"$ref": "#/components/schemas/A"}}
                    }
                }
            }
        }
    }"##;

    for strategy in TraversalStrategy::ALL {
        let model = DocumentModelAssembler::new(strategy)
            .assemble_str(document)
            .unwrap();
        let example: Value =
            serde_json::from_str(&model.definitions[0].definition_code.code).unwrap();

        assert_eq!(example["self"]["self"], "#/components/schemas/A");
        assert_eq!(example["children"], json!(["#/components/schemas/A"]));
        assert_eq!(model.definitions[0].properties[0].schema, vec![TypeToken::link("A")]);
    }
}

#[test]
fn test_assembly_is_deterministic() {
    for strategy in TraversalStrategy::ALL {
        let first = serde_json::to_string(&petstore(strategy).to_map().unwrap()).unwrap();
        let second = serde_json::to_string(&petstore(strategy).to_map().unwrap()).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_to_map_shape() {
    let map = petstore(TraversalStrategy::Tree).to_map().unwrap();

    let keys: Vec<&String> = map.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["info", "resources", "definitions"]);

    let endpoint = &map["resources"][0]["endpoints"][0];
    assert_eq!(endpoint["httpMethod"], "GET");
    assert_eq!(endpoint["parameters"][0]["in"], "query");
    assert_eq!(
        endpoint["responses"][0]["schema"],
        json!(["<", {"text": "Pet", "target": "anchor:Pet"}, ">", "array"])
    );

    let definition = &map["definitions"][0];
    assert_eq!(definition["name"], json!({"text": "Pet", "anchor": "Pet"}));
    assert_eq!(definition["definitionCode"]["language"], "json");
    assert_eq!(definition["definitionCode"]["theme"], "zenburn");
}

#[test]
fn test_strategies_agree_on_petstore() {
    assert_eq!(
        petstore(TraversalStrategy::Tree),
        petstore(TraversalStrategy::Typed)
    );
}

#[test]
fn test_strategies_agree_on_yaml() {
    let text = std::fs::read_to_string(fixture("library.yaml")).unwrap();
    let (model, divergent) = compare_strategies(&text).unwrap();
    assert_eq!(divergent, None);

    assert_eq!(model.info.version, "2.0");

    let search = &model.resource("books").unwrap().endpoints[0];
    assert_eq!(search.parameters[0].schema, vec![TypeToken::text("string")]);
    assert!(search.parameters[1].required);
    assert_eq!(search.responses[0].code, "200");
    assert!(search.responses[1].schema.is_empty());

    let borrow = &model.resource("loans").unwrap().endpoints[0];
    assert_eq!(borrow.parameters.len(), 1);
    assert!(!borrow.parameters[0].required);
    assert_eq!(borrow.responses[0].headers[0].name, "Location");
    assert_eq!(borrow.responses[0].headers[0].description, "");

    let book: Value = serde_json::from_str(
        &model.definition("Book").unwrap().definition_code.code,
    )
    .unwrap();
    assert_eq!(book["isbn"], "978-0131103627");
    assert_eq!(book["pages"], "272");
    assert_eq!(book["author"]["books"][0]["author"], "#/components/schemas/Author");
    assert_eq!(book["metadata"], json!({"key": "example"}));

    let loan: Value = serde_json::from_str(
        &model.definition("Loan").unwrap().definition_code.code,
    )
    .unwrap();
    assert_eq!(loan["renewals"], 10000000000_i64);
    assert_eq!(loan["due"], "2023-01-01T12:00:00Z");
}

#[test]
fn test_strategies_agree_on_sparse_document() {
    let document = json!({
        "paths": {
            "/a": {"get": {}, "put": {"tags": []}},
            "/b": {"options": {"parameters": [{}], "responses": {"200": {}}}}
        },
        "components": {"schemas": {"Empty": {}, "Loose": {"additionalProperties": {}}}}
    });

    let tree = DocumentModelAssembler::new(TraversalStrategy::Tree)
        .assemble_value(&document)
        .unwrap();
    let typed = DocumentModelAssembler::new(TraversalStrategy::Typed)
        .assemble_value(&document)
        .unwrap();
    assert_eq!(tree, typed);

    assert_eq!(tree.resources.len(), 1);
    assert_eq!(tree.resources[0].endpoints.len(), 3);
    assert_eq!(tree.resources[0].endpoints[2].parameters[0].name, "");
    assert_eq!(tree.definition("Empty").unwrap().definition_code.code, "{}");

    let loose = tree.definition("Loose").unwrap();
    assert!(loose.properties.is_empty());
    let example: Value = serde_json::from_str(&loose.definition_code.code).unwrap();
    assert_eq!(example, json!({"key": {}}));
}

#[test]
fn test_strategies_agree_with_specification_extensions() {
    let document = json!({
        "openapi": "3.0.3",
        "info": {"title": "Orders", "version": "1", "x-logo": "logo.png"},
        "paths": {
            "x-generated": "2024-05-01",
            "/orders": {
                "x-owner": "billing",
                "get": {
                    "tags": ["orders"],
                    "x-rate-limit": 100,
                    "responses": {
                        "200": {
                            "description": "Orders",
                            "content": {
                                "application/json": {
                                    "schema": {"type": "array", "items": {"$ref": "#/components/schemas/Order"}}
                                }
                            }
                        },
                        "x-note": "see docs"
                    }
                }
            },
            "x-internal": {"get": {"tags": ["hidden"]}}
        },
        "components": {
            "schemas": {
                "Order": {
                    "type": "object",
                    "x-table": "orders",
                    "properties": {"id": {"type": "integer", "x-sequence": true}}
                }
            }
        }
    });

    let tree = DocumentModelAssembler::new(TraversalStrategy::Tree)
        .assemble_value(&document)
        .unwrap();
    let typed = DocumentModelAssembler::new(TraversalStrategy::Typed)
        .assemble_value(&document)
        .unwrap();
    assert_eq!(tree, typed);

    let names: Vec<&str> = tree.resources.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["orders"]);

    let endpoint = &tree.resources[0].endpoints[0];
    assert_eq!(endpoint.url, "/orders");
    let codes: Vec<&str> = endpoint.responses.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["200"]);
    assert_eq!(tokens_to_string(&endpoint.responses[0].schema), "<Order>array");

    let order = tree.definition("Order").unwrap();
    assert_eq!(order.properties.len(), 1);
    assert_eq!(order.properties[0].name, "id");
}
