//! Configuration loading from YAML files
//!
//! Lets the traversal strategy and rendering defaults be chosen from a file
//! instead of repeating CLI flags:
//!
//! ```yaml
//! parser:
//!   strategy: typed
//! render:
//!   template: api.md
//!   output: ./docs/api.md
//! ```

use crate::{DocgenError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Root structure for docgen configuration files
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocgenConfig {
    /// Parsing options
    pub parser: ParserConfig,
    /// Rendering options
    pub render: RenderConfig,
}

/// Parsing options
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Which traversal strategy builds the document model
    pub strategy: TraversalStrategy,
}

/// Rendering options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Built-in template name or path to a template file
    pub template: String,
    /// Template used for database documents
    pub database_template: String,
    /// Default output path
    pub output: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            template: "api.md".to_string(),
            database_template: "database.md".to_string(),
            output: PathBuf::from("./api-doc.md"),
        }
    }
}

/// How the OpenAPI document is walked
///
/// Both strategies produce equal models for the same document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalStrategy {
    /// Walk the generic JSON tree
    #[default]
    Tree,
    /// Bind into typed structs first, then walk the object graph
    Typed,
}

impl TraversalStrategy {
    pub const ALL: [TraversalStrategy; 2] = [TraversalStrategy::Tree, TraversalStrategy::Typed];
}

impl fmt::Display for TraversalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalStrategy::Tree => write!(f, "tree"),
            TraversalStrategy::Typed => write!(f, "typed"),
        }
    }
}

impl FromStr for TraversalStrategy {
    type Err = DocgenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tree" | "json" => Ok(TraversalStrategy::Tree),
            "typed" | "object" => Ok(TraversalStrategy::Typed),
            other => Err(DocgenError::Config(format!(
                "Unknown traversal strategy '{}'. Valid options: tree, typed",
                other
            ))),
        }
    }
}

impl DocgenConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DocgenError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            DocgenError::Config(msg) => {
                DocgenError::Config(format!("{} (in {:?})", msg, path))
            }
            other => other,
        })
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content)
            .map_err(|e| DocgenError::Config(format!("Failed to parse config YAML: {}", e)))
    }
}
