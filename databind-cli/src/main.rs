//! # databind CLI entry point
//!
//! Generates C++ data binding units from a schema file, or checks a schema
//! without emitting anything.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use databind_codegen::{CodegenError, GeneratorConfig, generate_from_file};
use databind_schema::diagnostics::error_count;
use databind_schema::{Diagnostic, load_document, parse_xml_file};

#[derive(Parser, Debug)]
#[command(name = "databind", version, about = "Generate C++ data bindings from schema files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the declaration and implementation units
    Generate(GenerateArgs),

    /// Build and resolve a schema, reporting diagnostics only
    Check {
        /// Input schema file
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// Input schema file
    #[arg(short, long)]
    input: PathBuf,

    /// Directory receiving the generated files
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Output file stem and routine prefix (defaults to `DataBinding`)
    #[arg(short, long)]
    name: Option<String>,

    /// Namespace of the host runtime (defaults to `gugu`)
    #[arg(long)]
    runtime_namespace: Option<String>,

    /// Fail without writing anything if the schema has any diagnostic
    #[arg(long)]
    deny_warnings: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match &cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Check { input } => run_check(input),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn config_from(args: &GenerateArgs) -> GeneratorConfig {
    let mut config = GeneratorConfig::new();
    if let Some(name) = &args.name {
        config = config.base_name(name.as_str());
    }
    if let Some(namespace) = &args.runtime_namespace {
        config = config.runtime_namespace(namespace.as_str());
    }
    config
}

fn run_generate(args: &GenerateArgs) -> anyhow::Result<u8> {
    let config = config_from(args);

    let binding = match generate_from_file(&args.input, &config) {
        Ok(binding) => binding,
        Err(CodegenError::Fatal { diagnostics }) => {
            summarize(&args.input, &diagnostics);
            return Ok(1);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to generate from {}", args.input.display()));
        }
    };

    summarize(&args.input, &binding.diagnostics);
    if args.deny_warnings && binding.has_diagnostics() {
        tracing::error!("diagnostics denied, nothing written");
        return Ok(1);
    }

    let (header, source) = binding
        .write_to_dir(&args.output_dir)
        .with_context(|| format!("failed to write to {}", args.output_dir.display()))?;
    println!("Generated {} and {}", header.display(), source.display());

    Ok(0)
}

fn run_check(input: &Path) -> anyhow::Result<u8> {
    let root = parse_xml_file(input).with_context(|| format!("failed to read {}", input.display()))?;
    let (doc, diagnostics) = load_document(&root);

    println!(
        "{}: {} enum(s), {} class(es)",
        input.display(),
        doc.enums.len(),
        doc.classes.len()
    );
    summarize(input, &diagnostics);

    Ok(if error_count(&diagnostics) > 0 { 1 } else { 0 })
}

/// Prints the diagnostic counts. Each diagnostic was already logged when it
/// was recorded.
fn summarize(input: &Path, diagnostics: &[Diagnostic]) {
    let errors = error_count(diagnostics);
    println!(
        "{}: {} error(s), {} warning(s)",
        input.display(),
        errors,
        diagnostics.len() - errors
    );
}
