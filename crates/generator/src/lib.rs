//! Document rendering for OpenAPI Docgen
//!
//! This crate turns document models and database metadata into text
//! documents through Tera templates. Two templates are built in
//! (`api.md` and `database.md`); any other template file can be registered
//! by path.

mod templates;

pub use templates::{anchor_id, load_templates, API_TEMPLATE, DATABASE_TEMPLATE};

use openapi_docgen_common::{DatabaseMetadata, DocgenError, DocumentModel, Result};
use std::error::Error as StdError;
use std::fs;
use std::path::Path;
use tera::Tera;
use tracing::debug;

/// Renders a named template against a key-value context
#[cfg_attr(test, mockall::automock)]
pub trait DocumentRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// Tera-backed renderer holding the built-in templates plus any
/// registered template files
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a renderer with the built-in templates loaded
    pub fn new() -> Result<Self> {
        let tera = load_templates()?;
        Ok(Self { tera })
    }

    /// Register a template file under its path and return the registered name
    pub fn register_template_file(&mut self, path: &Path) -> Result<String> {
        let name = path.to_string_lossy().to_string();
        self.tera
            .add_template_file(path, Some(&name))
            .map_err(|e| {
                DocgenError::Render(format!(
                    "Failed to load template {:?}: {}",
                    path,
                    error_chain(&e)
                ))
            })?;

        debug!(template = %name, "Registered template file");
        Ok(name)
    }

    /// Resolve a built-in template name or a template file path
    ///
    /// Built-in names win over files of the same name.
    pub fn resolve(&mut self, template: &str) -> Result<String> {
        if self.has_template(template) {
            return Ok(template.to_string());
        }

        let path = Path::new(template);
        if !path.is_file() {
            return Err(DocgenError::Render(format!(
                "Unknown template '{}'. Built-in templates: {}, {}",
                template, API_TEMPLATE, DATABASE_TEMPLATE
            )));
        }

        self.register_template_file(path)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }
}

impl DocumentRenderer for TemplateRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        let context = tera::Context::from_value(context.clone()).map_err(|e| {
            DocgenError::Render(format!("Invalid template context: {}", error_chain(&e)))
        })?;

        self.tera.render(template, &context).map_err(|e| {
            DocgenError::Render(format!(
                "Failed to render template '{}': {}",
                template,
                error_chain(&e)
            ))
        })
    }
}

/// Render an OpenAPI document model and write it to `output`
pub fn render_api_document<R: DocumentRenderer + ?Sized>(
    renderer: &R,
    model: &DocumentModel,
    template: &str,
    output: &Path,
) -> Result<()> {
    let context = model.to_map()?;
    let rendered = renderer.render(template, &context)?;

    write_output(output, &rendered)?;
    debug!(
        output = %output.display(),
        resources = model.resources.len(),
        definitions = model.definitions.len(),
        "Wrote API document"
    );

    Ok(())
}

/// Render database metadata and write it to `output`
pub fn render_database_document<R: DocumentRenderer + ?Sized>(
    renderer: &R,
    metadata: &DatabaseMetadata,
    template: &str,
    output: &Path,
) -> Result<()> {
    let context = metadata.to_map()?;
    let rendered = renderer.render(template, &context)?;

    write_output(output, &rendered)?;
    debug!(
        output = %output.display(),
        tables = metadata.tables.len(),
        "Wrote database document"
    );

    Ok(())
}

fn write_output(output: &Path, rendered: &str) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            DocgenError::Render(format!(
                "Failed to create output directory {:?}: {}",
                parent, e
            ))
        })?;
    }

    fs::write(output, rendered)
        .map_err(|e| DocgenError::Render(format!("Failed to write {:?}: {}", output, e)))
}

/// Join a Tera error with its source chain
fn error_chain(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
