//! Providers Schema CLI
//!
//! Prints a JSON representation of provider schemas: the provider
//! configuration block, or resource / data source schemas selected by name.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use provider_schemas::{marshal_with, ExportConfig, ExportError, Schemas, Selection};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "providers-schema")]
#[command(about = "Show schemas for the providers used in the configuration")]
struct Cli {
    /// Resolved provider schemas (JSON)
    input: PathBuf,

    /// The name is a resource type
    #[arg(short = 'r', long = "resource", conflicts_with = "data_source")]
    resource: bool,

    /// The name is a data source type
    #[arg(short = 'd', long = "data-source")]
    data_source: bool,

    /// Resource or data source name; "all" prints every one
    #[arg(short, long)]
    name: Option<String>,

    /// Config file to load (optional)
    #[arg(short, long)]
    config: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn selection(cli: &Cli) -> Result<Selection, ExportError> {
    if !cli.resource && !cli.data_source {
        return Ok(Selection::provider());
    }

    let name = cli.name.as_deref().filter(|n| !n.is_empty());
    match (cli.resource, name) {
        (true, Some(name)) => Ok(Selection::resource(name)),
        (false, Some(name)) => Ok(Selection::data_source(name)),
        (true, None) => Err(ExportError::MissingName("resource".to_string())),
        (false, None) => Err(ExportError::MissingName("data source".to_string())),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let selection = selection(&cli)?;
    let config = ExportConfig::load_from(cli.config.as_deref())
        .context("Failed to load configuration")?;

    let schemas = Schemas::from_file(&cli.input)
        .with_context(|| format!("Failed to load provider schemas from {:?}", cli.input))?;

    let json = marshal_with(&schemas, &selection, &config)
        .context("Failed to marshal provider schemas to json")?;
    println!("{}", json);

    Ok(())
}
