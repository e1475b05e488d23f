//! grf CLI - Command Line Operations for Gaussian Random Field Synthesis
//!
//! # Commands
//!
//! - `grf generate` - Generate a field and write it as JSON, CSV or a summary
//! - `grf spectrum` - Generate a field and compare its spectrum with the target
//! - `grf check` - Print and validate the resolved configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use service_cli::config::{build_config, CliArgs, LogLevel, OutputFormat};
use service_cli::{commands, Result};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Gaussian random field synthesis CLI
#[derive(Parser)]
#[command(name = "grf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

/// Job overrides shared by every command.
#[derive(Args, Debug, Default)]
struct JobArgs {
    /// Cells per axis, comma-separated (e.g. 128,128)
    #[arg(short = 'n', long, value_delimiter = ',')]
    shape: Option<Vec<usize>>,

    /// Box size: one length, or one per axis, comma-separated
    #[arg(short, long = "box", value_delimiter = ',')]
    box_dims: Option<Vec<f64>>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output format (json, csv, summary)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Gaussian random field
    Generate {
        #[command(flatten)]
        job: JobArgs,
    },

    /// Estimate the power spectrum of a generated field
    Spectrum {
        #[command(flatten)]
        job: JobArgs,

        /// Number of log-spaced wavenumber bins
        #[arg(short = 'k', long)]
        bins: Option<usize>,
    },

    /// Check the resolved configuration
    Check {
        #[command(flatten)]
        job: JobArgs,
    },
}

impl Cli {
    fn cli_args(&self) -> CliArgs {
        let (job, bins) = match &self.command {
            Commands::Generate { job } | Commands::Check { job } => (job, None),
            Commands::Spectrum { job, bins } => (job, *bins),
        };
        let verbose = self.verbose.then_some(LogLevel::Debug);
        CliArgs {
            config_file: self.config.clone(),
            grid_shape: job.shape.clone(),
            box_dims: job.box_dims.clone(),
            seed: job.seed,
            k_bins: bins,
            log_level: self.log_level.or(verbose),
            output_format: job.format,
            output: job.output.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.cli_args())?;

    // Initialise tracing; RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "resolved configuration");

    match cli.command {
        Commands::Generate { .. } => commands::generate::run(&config),
        Commands::Spectrum { .. } => commands::spectrum::run(&config),
        Commands::Check { .. } => commands::check::run(&config),
    }
}
