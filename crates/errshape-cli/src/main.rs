//! errshape CLI - Normalize error messages and group them by shape.

use clap::{Parser, Subcommand};
use errshape_normalize::Pipeline;
use std::path::Path;

mod commands;
mod config;
mod input;
mod output;

use commands::{group, normalize, stages};
use config::CliConfig;

#[derive(Parser)]
#[command(name = "errshape")]
#[command(about = "Normalize error messages into stable, groupable shapes")]
struct Cli {
    /// Path to a TOML configuration file (overrides ERRSHAPE_CONFIG)
    #[arg(long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize input as one message, or line by line
    Normalize {
        /// Input file (or stdin if not provided)
        input: Option<String>,
        /// Treat every input line as its own message
        #[arg(long)]
        lines: bool,
        /// Output one canonical JSON object per message
        #[arg(long)]
        json: bool,
    },
    /// Group input records by normalized shape
    Group {
        /// Input file (or stdin if not provided)
        input: Option<String>,
        /// Output one canonical JSON object per group
        #[arg(long)]
        json: bool,
        /// Hide groups with fewer than N records (default: from config)
        #[arg(long)]
        min_count: Option<u64>,
    },
    /// Show the normalization stages in execution order
    Stages {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::load(cli.config.as_deref().map(Path::new))?;
    init_logging(&config.log_level);
    if let Some(source) = &config.source {
        tracing::debug!(path = %source.display(), "loaded configuration");
    }

    let pipeline = Pipeline::builder()
        .override_patterns(config.detectors.clone())
        .build()
        .map_err(|e| format!("Invalid detector configuration: {}", e))?;

    match cli.command {
        Commands::Normalize { input, lines, json } => {
            normalize::run(&pipeline, input, lines, json)
        }
        Commands::Group {
            input,
            json,
            min_count,
        } => group::run(
            &pipeline,
            &config.group,
            input,
            json,
            min_count.unwrap_or(config.group.min_count),
        ),
        Commands::Stages { json } => stages::run(&pipeline, json),
    }
}

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` wins over
/// the configured level.
fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
