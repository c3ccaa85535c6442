//! Integration tests for rendering document models with the built-in templates

use openapi_docgen_common::TraversalStrategy;
use openapi_docgen_generator::{
    render_api_document, render_database_document, DocumentRenderer, TemplateRenderer,
    API_TEMPLATE, DATABASE_TEMPLATE,
};
use openapi_docgen_parser::database::DatabaseSnapshot;
use openapi_docgen_parser::OpenApiDocParser;
use std::fs;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("parser")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn render_petstore(strategy: TraversalStrategy) -> String {
    let model = OpenApiDocParser::from_file(fixture("petstore.json"))
        .unwrap()
        .with_strategy(strategy)
        .parse()
        .unwrap();

    let renderer = TemplateRenderer::new().unwrap();
    renderer
        .render(API_TEMPLATE, &model.to_map().unwrap())
        .unwrap()
}

#[test]
fn test_api_document_sections() {
    let doc = render_petstore(TraversalStrategy::Tree);

    assert!(doc.starts_with("# Swagger Petstore\n"));
    assert!(doc.contains("| 1.0.7 | apiteam@swagger.io | Apache 2.0 |"));
    assert!(doc.contains("### pet\n"));
    assert!(doc.contains("### Default\n"));
    assert!(doc.contains("#### GET `/pets`"));
    assert!(doc.contains("**List pets**"));
}

#[test]
fn test_api_document_tables() {
    let doc = render_petstore(TraversalStrategy::Tree);

    assert!(doc.contains("| limit | query | integer | N | How many items to return |"));
    assert!(doc.contains("| status | query | <string>array | N |  |"));
    assert!(doc.contains("| 200 | <[Pet](#pet)>array | X-Next: string | A paged array of pets |"));
    assert!(doc.contains("| body | body | [Pet](#pet) | Y | Pet to add to the store |"));
}

#[test]
fn test_api_document_definitions() {
    let doc = render_petstore(TraversalStrategy::Tree);

    assert!(doc.contains("## Definitions"));
    assert!(doc.contains("### Pet\n"));
    assert!(doc.contains("```json\n{\n"));
}

#[test]
fn test_strategies_render_identically() {
    assert_eq!(
        render_petstore(TraversalStrategy::Tree),
        render_petstore(TraversalStrategy::Typed)
    );
}

#[test]
fn test_render_api_document_to_file() {
    let model = OpenApiDocParser::from_file(fixture("library.yaml"))
        .unwrap()
        .parse()
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out").join("library.md");
    let renderer = TemplateRenderer::new().unwrap();

    render_api_document(&renderer, &model, API_TEMPLATE, &output).unwrap();

    let doc = fs::read_to_string(&output).unwrap();
    assert!(doc.starts_with("# Library API\n"));
    assert!(doc.contains("#### POST `/books/{isbn}/loans`"));
    assert!(doc.contains("| 201 | [Loan](#loan) | Location: string | Loan created |"));
}

#[test]
fn test_render_database_document() {
    let metadata = DatabaseSnapshot::from_file(fixture("shop_snapshot.json")).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("shop.md");
    let renderer = TemplateRenderer::new().unwrap();

    render_database_document(&renderer, &metadata, DATABASE_TEMPLATE, &output).unwrap();

    let doc = fs::read_to_string(&output).unwrap();
    assert!(doc.starts_with("# shop\n"));
    assert!(doc.contains("- [order_items](#order_items)"));
    assert!(doc.contains("Primary key: order_id, sku"));
    assert!(doc.contains("| 1 | id | bigint |  | Y | N |  |  |  |"));
    assert!(doc.contains("| 3 | price | numeric | 10,2 | N | Y | 0.00 |  |  |"));
    assert!(doc.contains("[orders](#orders).id"));
    assert!(doc.contains("| customers_email_key | Y | email | btree |"));
}

#[test]
fn test_custom_template_file() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("summary.txt.tera");
    fs::write(
        &template,
        "{% for r in resources %}{{ r.name }}={{ r.endpoints | length }};{% endfor %}",
    )
    .unwrap();

    let model = OpenApiDocParser::from_file(fixture("petstore.json"))
        .unwrap()
        .parse()
        .unwrap();

    let mut renderer = TemplateRenderer::new().unwrap();
    let name = renderer.resolve(template.to_str().unwrap()).unwrap();
    let rendered = renderer.render(&name, &model.to_map().unwrap()).unwrap();

    assert_eq!(rendered, "pet=3;store=1;Default=2;");
}
