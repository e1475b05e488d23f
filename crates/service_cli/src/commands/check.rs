//! Check command implementation
//!
//! Prints the resolved job configuration and validates it without
//! generating anything.

use std::io::Write;

use tracing::info;

use crate::config::JobConfig;
use crate::{CliError, Result};

/// Run the check command
pub fn run(config: &JobConfig) -> Result<()> {
    let stdout = std::io::stdout();
    run_with_writer(config, stdout.lock())
}

/// Run the check command against an arbitrary writer
pub fn run_with_writer<W: Write>(config: &JobConfig, mut writer: W) -> Result<()> {
    info!("Checking configuration...");

    // TOML integers are i64; the seed is printed on its own so every u64 renders.
    let mut rendered = config.clone();
    let seed = rendered.seed.take();
    let resolved = toml::to_string_pretty(&rendered)
        .map_err(|e| CliError::InvalidArgument(format!("Cannot render configuration: {}", e)))?;
    writeln!(writer, "# Resolved configuration")?;
    if let Some(seed) = seed {
        writeln!(writer, "seed = {}", seed)?;
    }
    writeln!(writer, "{}", resolved)?;

    config.validate()?;
    let field_config = config.field_config()?;

    writeln!(writer, "# Derived")?;
    writeln!(writer, "cells        = {}", field_config.grid_shape().n_cells())?;
    writeln!(writer, "box_volume   = {}", field_config.box_lengths().volume())?;
    writeln!(writer, "scale_factor = {:e}", field_config.scale_factor())?;
    writeln!(writer, "status       = ok")?;
    writer.flush()?;

    info!("Configuration is valid");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grf_core::types::BoxDims;

    #[test]
    fn test_check_reports_derived_values() {
        let config = JobConfig {
            grid_shape: vec![4, 4],
            box_dims: BoxDims::Uniform(2.0),
            ..JobConfig::default()
        };
        let mut buffer = Vec::new();
        run_with_writer(&config, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("grid_shape"));
        assert!(text.contains("cells        = 16"));
        assert!(text.contains("box_volume   = 4"));
        assert!(text.contains("status       = ok"));
    }

    #[test]
    fn test_check_accepts_full_seed_range() {
        let config = JobConfig {
            seed: Some(u64::MAX),
            ..JobConfig::default()
        };
        let mut buffer = Vec::new();
        run_with_writer(&config, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains(&format!("seed = {}", u64::MAX)));
        assert_eq!(text.matches("seed =").count(), 1);
        assert!(text.contains("status       = ok"));
    }

    #[test]
    fn test_check_rejects_invalid_job() {
        let config = JobConfig {
            grid_shape: vec![4, 4, 4, 4],
            ..JobConfig::default()
        };
        let result = run_with_writer(&config, Vec::new());
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
