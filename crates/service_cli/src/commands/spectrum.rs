//! Spectrum command implementation
//!
//! Generates a field, estimates its radially averaged power spectrum and
//! reports it next to the target spectrum.

use grf_synth::estimate::{power_spectrum_1d, target_profile, KBins};
use grf_synth::GaussianFieldGenerator;
use tracing::{info, warn};

use crate::config::{JobConfig, OutputFormat};
use crate::output::{
    open_output, spectrum_rows, write_spectrum_csv, write_spectrum_json, write_spectrum_table,
};
use crate::Result;

/// Run the spectrum command
pub fn run(config: &JobConfig) -> Result<()> {
    info!("Starting spectrum check...");
    info!("  Grid shape: {:?}", config.grid_shape);
    info!("  Spectrum: {}", config.spectrum);
    info!("  Bins: {}", config.k_bins);

    config.spectrum.validate()?;
    let generator = GaussianFieldGenerator::new(config.field_config()?);
    let field = generator.generate(&config.spectrum)?;

    let lengths = generator.config().box_lengths().as_slice().to_vec();
    let bins = KBins::Count(config.k_bins);
    let profile = power_spectrum_1d(&field, lengths.clone(), &bins)?;
    let target = target_profile(field.shape(), lengths, &config.spectrum, &bins)?;
    let rows = spectrum_rows(&profile, &target);

    let empty = rows.iter().filter(|row| row.measured.is_none()).count();
    if empty > 0 {
        warn!("{} of {} bins hold no modes", empty, rows.len());
    }

    let writer = open_output(config.output.as_deref())?;
    match config.output_format {
        OutputFormat::Json => write_spectrum_json(writer, &rows)?,
        OutputFormat::Csv => write_spectrum_csv(writer, &rows)?,
        OutputFormat::Summary => write_spectrum_table(writer, &rows)?,
    }

    info!("Spectrum check complete");
    Ok(())
}
