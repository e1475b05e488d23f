//! Job configuration management
//!
//! Handles loading a field-generation job from TOML files, environment
//! variables, and CLI arguments.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (`GRF_SEED`, `GRF_LOG_LEVEL`, `GRF_OUTPUT_FORMAT`)
//! 3. Config file
//! 4. Default values

use grf_core::math::normalize_box_dims;
use grf_core::models::SpectrumModel;
use grf_core::types::{BoxDims, FieldError, GridShape};
use grf_synth::FieldConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable overriding the seed.
pub const ENV_SEED: &str = "GRF_SEED";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "GRF_LOG_LEVEL";
/// Environment variable overriding the output format.
pub const ENV_OUTPUT_FORMAT: &str = "GRF_OUTPUT_FORMAT";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level name.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown output format name.
    #[error("Invalid output format: {0}. Must be one of: json, csv, summary")]
    InvalidOutputFormat(String),

    /// Seed that is not an unsigned 64-bit integer.
    #[error("Invalid seed: {0}. Must be an unsigned 64-bit integer")]
    InvalidSeed(String),

    /// Config file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Grid, box, spectrum or binning settings are unusable.
    #[error("Invalid job: {0}")]
    InvalidJob(String),
}

impl From<FieldError> for ConfigError {
    fn from(err: FieldError) -> Self {
        ConfigError::InvalidJob(err.to_string())
    }
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-stage trace events.
    Trace,
    /// Pipeline stages.
    Debug,
    /// Job progress.
    #[default]
    Info,
    /// Warnings only.
    Warn,
    /// Errors only.
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Output formats for generated fields and spectra
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON document.
    Json,
    /// One row per cell (or per bin), with a header.
    Csv,
    /// Human-readable statistics only.
    #[default]
    Summary,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "summary" | "table" => Ok(OutputFormat::Summary),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Summary => write!(f, "summary"),
        }
    }
}

/// A field-generation job.
///
/// ```toml
/// grid_shape = [128, 128]
/// box_dims = 100.0
/// seed = 42
/// k_bins = 12
/// output_format = "csv"
///
/// [spectrum]
/// model = "power_law"
/// amplitude = 2.0
/// index = -2.5
/// pivot = 1.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// Cells per axis.
    pub grid_shape: Vec<usize>,
    /// Physical box size: one length, or one per axis.
    pub box_dims: BoxDims,
    /// Seed; unset draws from OS entropy.
    pub seed: Option<u64>,
    /// Target power spectrum.
    pub spectrum: SpectrumModel,
    /// Number of log-spaced bins for spectrum estimation.
    pub k_bins: usize,
    /// Log level
    pub log_level: LogLevel,
    /// Output format
    pub output_format: OutputFormat,
    /// Output file; unset writes to stdout.
    pub output: Option<PathBuf>,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            grid_shape: vec![64, 64],
            box_dims: BoxDims::Uniform(100.0),
            seed: None,
            spectrum: SpectrumModel::default(),
            k_bins: 10,
            log_level: LogLevel::Info,
            output_format: OutputFormat::Summary,
            output: None,
        }
    }
}

impl JobConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::parse_file(path)?;
        config.validate()?;
        Ok(config)
    }

    fn parse_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from environment variables over the defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env_with(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Overrides fields whose variable `lookup` returns a value for.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup(ENV_SEED) {
            let seed = seed.trim();
            self.seed = Some(
                seed.parse()
                    .map_err(|_| ConfigError::InvalidSeed(seed.to_string()))?,
            );
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(level.trim())?;
        }
        if let Some(format) = lookup(ENV_OUTPUT_FORMAT) {
            self.output_format = OutputFormat::from_str(format.trim())?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let shape = GridShape::new(&self.grid_shape).map_err(FieldError::from)?;
        normalize_box_dims(&self.box_dims, shape.dims()).map_err(FieldError::from)?;
        self.spectrum.validate()?;

        if self.k_bins == 0 {
            return Err(ConfigError::InvalidJob(
                "k_bins must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the validated library-side configuration.
    pub fn field_config(&self) -> Result<FieldConfig, FieldError> {
        FieldConfig::builder()
            .grid_shape(&self.grid_shape)
            .box_dims(self.box_dims.clone())
            .optional_seed(self.seed)
            .build()
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(shape) = &cli.grid_shape {
            self.grid_shape = shape.clone();
        }
        if let Some(box_dims) = &cli.box_dims {
            self.box_dims = BoxDims::PerAxis(box_dims.clone());
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(bins) = cli.k_bins {
            self.k_bins = bins;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        if let Some(format) = cli.output_format {
            self.output_format = format;
        }
        if let Some(output) = &cli.output {
            self.output = Some(output.clone());
        }
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Grid shape override
    pub grid_shape: Option<Vec<usize>>,
    /// Box dimensions override
    pub box_dims: Option<Vec<f64>>,
    /// Seed override
    pub seed: Option<u64>,
    /// Bin count override
    pub k_bins: Option<usize>,
    /// Log level override
    pub log_level: Option<LogLevel>,
    /// Output format override
    pub output_format: Option<OutputFormat>,
    /// Output file override
    pub output: Option<PathBuf>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<JobConfig, ConfigError> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup.
pub fn build_config_with<F>(cli: &CliArgs, env: F) -> Result<JobConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // File values are validated once, after every override is applied.
    let mut config = match &cli.config_file {
        Some(path) => JobConfig::parse_file(path)?,
        None => JobConfig::default(),
    };

    config.apply_env_with(env)?;
    config.merge_with_cli(cli);

    // Final validation
    config.validate()?;

    Ok(config)
}
