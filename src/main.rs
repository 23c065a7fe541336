//! helmgraph - Generate a Cypher script from a Helm chart
//!
//! Renders a chart with `helm template`, infers the relationships between the
//! rendered Kubernetes resources and writes them out as a script that can be
//! imported into Neo4j.

mod cli;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use helmgraph::OutputFormat;
use helmgraph::config::ConfigLoader;
use helmgraph::manifest::{HelmTemplate, ManifestFile, ManifestSource, RenderRequest};
use std::path::PathBuf;

/// helmgraph - Generate a Cypher script from a Helm chart
#[derive(Parser, Debug)]
#[command(name = "helmgraph", version)]
#[command(
    about = "Generate a Cypher script from a Helm chart.",
    long_about = "helmgraph generates a Cypher script from a Helm chart that can be imported into Neo4j."
)]
#[command(subcommand_negates_reqs = true)]
struct Args {
    /// Path to the Helm chart directory
    #[arg(long, short = 'c', required_unless_present = "manifest")]
    chart: Option<PathBuf>,

    /// Release name
    #[arg(long, short = 'r', required_unless_present = "manifest")]
    release: Option<String>,

    /// Namespace
    #[arg(long, short = 'n')]
    namespace: Option<String>,

    /// Output file name (default: stdout)
    #[arg(long = "out", short = 'o')]
    out: Option<PathBuf>,

    /// Values file passed to helm template (repeatable)
    #[arg(long = "values", short = 'f')]
    values: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Helm binary to run
    #[arg(long)]
    helm_bin: Option<String>,

    /// Read an already rendered manifest from a file ("-" for stdin) instead of running helm
    #[arg(long, conflicts_with_all = ["chart", "release", "values", "helm_bin"])]
    manifest: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'd')]
    debug: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: cli::ConfigSubcommand,
    },
    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Some(Command::Config { subcommand }) => return cli::handle_config_command(subcommand),
        Some(Command::Version) => {
            cli::display_version();
            return Ok(());
        }
        None => {}
    }

    cli::init_logging(args.debug, args.log_file.as_deref())?;
    tracing::debug!("Debug logging enabled");

    let config = ConfigLoader::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration: {:#}, using defaults", e);
        ConfigLoader::load_defaults()
    });
    let format = args.format.unwrap_or(config.output.format);

    let source: Box<dyn ManifestSource> = match args.manifest.as_deref() {
        Some(manifest) => Box::new(ManifestFile::from_arg(manifest)),
        None => {
            let chart = args.chart.context("--chart is required")?;
            let release = args.release.context("--release is required")?;
            let namespace = args
                .namespace
                .or_else(|| Some(config.default_namespace.clone()));

            let mut values_files = config.values_files.clone();
            values_files.extend(args.values);

            let request = RenderRequest::new(chart, release)
                .with_namespace(namespace)
                .with_values_files(values_files);
            let binary = args.helm_bin.unwrap_or(config.helm_binary);
            Box::new(HelmTemplate::new(binary, request))
        }
    };

    let output = helmgraph::generate_graph(source.as_ref(), format)
        .with_context(|| format!("Failed to generate graph from {}", source.describe()))?;
    tracing::info!(
        "Generated {} script: {} nodes, {} relationships",
        format,
        output.resources,
        output.relationships
    );

    match args.out {
        Some(path) => {
            std::fs::write(&path, &output.script)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        }
        None => print!("{}", output.script),
    }

    Ok(())
}
