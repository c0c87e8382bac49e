//! Metadata Inspector CLI
//!
//! Loads a client package's metadata document, normalizes it and prints
//! what schema generation would see.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dmmf_document::config::OutputFormat;
use dmmf_document::types::ModelFieldKind;
use dmmf_document::utils::FieldConfig;
use dmmf_document::{get_transformed_dmmf, DmmfConfig, DmmfDocument, TransformOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dmmf-inspect")]
#[command(about = "Inspect the normalized metadata document of a generated client")]
struct Cli {
    /// Config file to load (optional)
    #[arg(short, long)]
    config: Option<String>,

    /// Client package directory (overrides config)
    #[arg(long)]
    client: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show counts and checksum
    Summary,

    /// Print the normalized document as JSON
    Dump {
        /// Single-line JSON regardless of config
        #[arg(long)]
        compact: bool,
    },

    /// Show a model and its fields
    Model { name: String },

    /// Show an input type, its fields and computed inputs
    InputType { name: String },

    /// Show an output type and its fields
    OutputType { name: String },

    /// Show the effective configuration
    Config,
}

fn main() {
    let cli = Cli::parse();

    let config = match DmmfConfig::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(cli, config) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: DmmfConfig) -> anyhow::Result<()> {
    if let Commands::Config = cli.command {
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let client = cli.client.unwrap_or_else(|| config.loader.client_path.clone());
    let reference = client.to_string_lossy();
    let index = get_transformed_dmmf(&config.client_loader(), &reference, &TransformOptions::default())
        .with_context(|| format!("loading metadata from {}", reference))?;

    match cli.command {
        Commands::Summary => print_summary(&index),
        Commands::Dump { compact } => {
            let json = if compact || config.output.format == OutputFormat::Compact {
                serde_json::to_string(index.document())?
            } else {
                serde_json::to_string_pretty(index.document())?
            };
            println!("{}", json);
        }
        Commands::Model { name } => {
            let model = index.model(&name)?;
            println!("model {}", model.name);
            for field in &model.fields {
                let marker = if field.kind == ModelFieldKind::Relation { " (relation)" } else { "" };
                println!("  {}: {}{}", field.name, FieldConfig::from(field), marker);
            }
            if let Ok(mapping) = index.mapping(&name) {
                println!();
                for (operation, resolver) in mapping.operations() {
                    println!("  {} -> {}", operation, resolver);
                }
            }
        }
        Commands::InputType { name } => {
            let input_type = index.input_type(&name)?;
            println!("input {}", input_type.name);
            for field in &input_type.fields {
                println!("  {}: {}", field.name, FieldConfig::from(&field.input_type));
            }
            for computed in input_type.computed_inputs.names() {
                println!("  {} (computed)", computed);
            }
        }
        Commands::OutputType { name } => {
            let output_type = index.output_type(&name)?;
            println!("type {}", output_type.name);
            for field in &output_type.fields {
                let args: Vec<String> = field
                    .args
                    .iter()
                    .map(|arg| format!("{}: {}", arg.name, FieldConfig::from(&arg.input_type)))
                    .collect();
                let args = if args.is_empty() { String::new() } else { format!("({})", args.join(", ")) };
                println!("  {}{}: {}", field.name, args, FieldConfig::from(&field.output_type));
            }
        }
        Commands::Config => unreachable!("handled before loading"),
    }

    Ok(())
}

fn print_summary(index: &DmmfDocument) {
    println!("Metadata document");
    if let Some(checksum) = index.source_checksum() {
        println!("  Checksum: {}", checksum);
    }
    println!("  Models: {}", index.models().count());
    println!("  Input types: {}", index.input_types().count());
    println!("  Output types: {}", index.output_types().count());
    println!("  Mappings: {}", index.mappings().count());
    let schema = &index.document().schema;
    if let Some(query) = schema.root_query_type() {
        println!("  Query root: {}", query);
    }
    if let Some(mutation) = schema.root_mutation_type() {
        println!("  Mutation root: {}", mutation);
    }

    let relations: usize = index
        .models()
        .map(|m| m.fields.iter().filter(|f| f.kind == ModelFieldKind::Relation).count())
        .sum();
    println!("  Relation fields: {}", relations);
}
