//! OpenAPI Docgen CLI
//!
//! Command-line interface for building document models from OpenAPI
//! specifications and database snapshots, and rendering them to text.

mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use openapi_docgen_common::{tokens_to_string, DocgenConfig, DocumentModel, TraversalStrategy};
use openapi_docgen_generator::{render_api_document, render_database_document, TemplateRenderer};
use openapi_docgen_parser::database::DatabaseSnapshot;
use openapi_docgen_parser::{compare_strategies, OpenApiDocParser, SpecSource};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "openapi-docgen")]
#[command(version, about = "Build documentation from OpenAPI specifications and database catalogs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a specification and display the extracted document model
    #[command(after_help = "EXAMPLES:\n  \
        # Summarize a JSON specification\n  \
        openapi-docgen parse --spec petstore.json\n\n  \
        # Use the typed traversal and list every endpoint\n  \
        openapi-docgen parse --spec api.yaml --strategy typed --verbose\n\n  \
        # Dump the model as JSON\n  \
        openapi-docgen parse --spec api.yaml --json")]
    Parse {
        /// Path to the OpenAPI specification (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Traversal strategy (defaults to the configured one)
        #[arg(long)]
        strategy: Option<StrategyArg>,

        /// Print the model as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Render an API document from a specification
    #[command(after_help = "EXAMPLES:\n  \
        # Render with the built-in Markdown template\n  \
        openapi-docgen generate --spec petstore.json --output ./docs/api.md\n\n  \
        # Render with a custom template\n  \
        openapi-docgen generate \\\n    \
        --spec petstore.json \\\n    \
        --template ./templates/api.html.tera \\\n    \
        --output ./docs/api.html")]
    Generate {
        /// Path to the OpenAPI specification (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Traversal strategy (defaults to the configured one)
        #[arg(long)]
        strategy: Option<StrategyArg>,

        /// Built-in template name or template file path
        #[arg(short, long)]
        template: Option<String>,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the model with every strategy and check that they agree
    #[command(after_help = "EXAMPLES:\n  \
        openapi-docgen compare --spec petstore.json")]
    Compare {
        /// Path to the OpenAPI specification (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,
    },

    /// Render a database document from an exported metadata snapshot
    #[command(after_help = "EXAMPLES:\n  \
        openapi-docgen database --snapshot shop.json --output ./docs/shop.md")]
    Database {
        /// Path to the metadata snapshot (JSON)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Built-in template name or template file path
        #[arg(short, long)]
        template: Option<String>,

        /// Output file
        #[arg(short, long, default_value = "./database-doc.md")]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Walk the generic JSON tree
    Tree,
    /// Bind typed structs, then walk them
    Typed,
}

impl From<StrategyArg> for TraversalStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Tree => TraversalStrategy::Tree,
            StrategyArg::Typed => TraversalStrategy::Typed,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => DocgenConfig::load(path).context("Failed to load configuration")?,
        None => DocgenConfig::default(),
    };
    debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Parse {
            spec,
            strategy,
            json,
        } => {
            let strategy = strategy.map(Into::into).unwrap_or(config.parser.strategy);
            parse_command(&spec, strategy, json, cli.verbose)?;
        }
        Commands::Generate {
            spec,
            strategy,
            template,
            output,
        } => {
            let strategy = strategy.map(Into::into).unwrap_or(config.parser.strategy);
            let template = template.unwrap_or(config.render.template);
            let output = output.unwrap_or(config.render.output);
            generate_command(&spec, strategy, &template, &output, cli.verbose)?;
        }
        Commands::Compare { spec } => {
            compare_command(&spec)?;
        }
        Commands::Database {
            snapshot,
            template,
            output,
        } => {
            let template = template.unwrap_or(config.render.database_template);
            database_command(&snapshot, &template, &output, cli.verbose)?;
        }
    }

    Ok(())
}

fn load_model(spec_path: &Path, strategy: TraversalStrategy) -> Result<DocumentModel> {
    let parser = OpenApiDocParser::from_file(spec_path)
        .with_context(|| format!("Failed to load specification {}", spec_path.display()))?
        .with_strategy(strategy);

    parser
        .parse()
        .context("Failed to build the document model")
}

fn parse_command(
    spec_path: &Path,
    strategy: TraversalStrategy,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let model = load_model(spec_path, strategy)?;

    if json {
        let map = model.to_map().context("Failed to serialize model")?;
        println!(
            "{}",
            serde_json::to_string_pretty(&map).context("Failed to serialize model")?
        );
        return Ok(());
    }

    println!("{} Parsed specification: {}", "→".cyan(), spec_path.display());
    println!("  Strategy: {}", strategy.to_string().yellow());

    println!("\n{}", "✓ Parse successful!".green().bold());
    println!("\n{}", "API:".bold());
    println!("  Title: {}", model.info.title.yellow());
    println!("  Version: {}", model.info.version.yellow());
    println!("  Resources: {}", model.resources.len());
    println!("  Endpoints: {}", model.endpoint_count());
    println!("  Definitions: {}", model.definitions.len());

    if verbose {
        println!("\n{}", "Resources:".bold());
        for resource in &model.resources {
            println!("  • {} ({})", resource.name.cyan(), resource.endpoints.len());
            for endpoint in &resource.endpoints {
                println!(
                    "    {:<7} {} {}",
                    endpoint.http_method.green(),
                    endpoint.url,
                    endpoint.summary.dimmed()
                );
            }
        }

        println!("\n{}", "Definitions:".bold());
        for definition in &model.definitions {
            let properties: Vec<String> = definition
                .properties
                .iter()
                .map(|p| format!("{}: {}", p.name, tokens_to_string(&p.schema)))
                .collect();
            println!(
                "  • {} {{ {} }}",
                definition.name.text.cyan(),
                properties.join(", ")
            );
        }
    }

    Ok(())
}

fn generate_command(
    spec_path: &Path,
    strategy: TraversalStrategy,
    template: &str,
    output: &Path,
    verbose: bool,
) -> Result<()> {
    println!(
        "{} Generating document from: {}",
        "→".cyan(),
        spec_path.display()
    );

    if verbose {
        println!("  Strategy: {}", strategy);
        println!("  Template: {}", template);
        println!("  Output: {}", output.display());
    }

    let model = load_model(spec_path, strategy)?;
    println!(
        "{} Parsed {} endpoints in {} resources, {} definitions",
        "✓".green(),
        model.endpoint_count(),
        model.resources.len(),
        model.definitions.len()
    );

    let mut renderer = TemplateRenderer::new().context("Failed to load templates")?;
    let template = renderer
        .resolve(template)
        .context("Failed to resolve template")?;

    render_api_document(&renderer, &model, &template, output)
        .context("Failed to render document")?;

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("  📄 {}", output.display());

    Ok(())
}

fn compare_command(spec_path: &Path) -> Result<()> {
    println!("{} Comparing strategies on: {}", "→".cyan(), spec_path.display());

    let text = SpecSource::File(spec_path.to_path_buf())
        .load()
        .with_context(|| format!("Failed to load specification {}", spec_path.display()))?;

    let (tree, typed) = compare_strategies(&text).context("Failed to build the document model")?;

    match typed {
        None => {
            println!(
                "\n{}",
                "✓ Tree and typed strategies produce the same model".green().bold()
            );
            println!(
                "  {} resources, {} endpoints, {} definitions",
                tree.resources.len(),
                tree.endpoint_count(),
                tree.definitions.len()
            );
            Ok(())
        }
        Some(typed) => {
            println!("\n{}", "✗ Strategies disagree".red().bold());
            if tree.info != typed.info {
                println!("  • info differs");
            }
            if tree.resources != typed.resources {
                println!("  • resources differ");
            }
            if tree.definitions != typed.definitions {
                println!("  • definitions differ");
            }
            anyhow::bail!("Traversal strategies produced different models")
        }
    }
}

fn database_command(snapshot: &Path, template: &str, output: &Path, verbose: bool) -> Result<()> {
    println!(
        "{} Loading database snapshot: {}",
        "→".cyan(),
        snapshot.display()
    );

    let metadata = DatabaseSnapshot::from_file(snapshot)
        .with_context(|| format!("Failed to load snapshot {}", snapshot.display()))?;

    println!(
        "{} Loaded {} tables from {}",
        "✓".green(),
        metadata.tables.len(),
        metadata.database_name.yellow()
    );

    if verbose {
        for table in &metadata.tables {
            println!(
                "  • {} ({} columns, {} indexes)",
                table.table_name.cyan(),
                table.columns.len(),
                table.indexes.len()
            );
        }
    }

    let mut renderer = TemplateRenderer::new().context("Failed to load templates")?;
    let template = renderer
        .resolve(template)
        .context("Failed to resolve template")?;

    render_database_document(&renderer, &metadata, &template, output)
        .context("Failed to render document")?;

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("  📄 {}", output.display());

    Ok(())
}
