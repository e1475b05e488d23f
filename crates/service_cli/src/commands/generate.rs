//! Generate command implementation
//!
//! Synthesises one field from the job configuration and writes it out.

use grf_synth::GaussianFieldGenerator;
use tracing::info;

use crate::config::{JobConfig, OutputFormat};
use crate::output::{
    open_output, write_field_csv, write_field_json, write_field_summary, FieldDocument,
    FieldStats,
};
use crate::Result;

/// Run the generate command
pub fn run(config: &JobConfig) -> Result<()> {
    info!("Starting field generation...");
    info!("  Grid shape: {:?}", config.grid_shape);
    info!("  Box dims: {}", config.box_dims);
    info!("  Spectrum: {}", config.spectrum);
    info!("  Output format: {}", config.output_format);

    config.spectrum.validate()?;
    let field_config = config.field_config()?;
    let generator = GaussianFieldGenerator::new(field_config);
    let field = generator.generate(&config.spectrum)?;

    let stats = FieldStats::of(&field);
    info!(
        mean = stats.mean,
        variance = stats.variance,
        "field generated"
    );

    let writer = open_output(config.output.as_deref())?;
    let field_config = generator.config();
    match config.output_format {
        OutputFormat::Json => {
            let document = FieldDocument {
                shape: field_config.grid_shape().dims(),
                box_lengths: field_config.box_lengths().as_slice(),
                seed: field_config.seed(),
                spectrum: &config.spectrum,
                data: field.iter().copied().collect(),
            };
            write_field_json(writer, &document)?;
        }
        OutputFormat::Csv => write_field_csv(writer, &field)?,
        OutputFormat::Summary => write_field_summary(
            writer,
            field_config.grid_shape().dims(),
            field_config.seed(),
            &stats,
        )?,
    }

    if let Some(path) = &config.output {
        info!("Field written to {}", path.display());
    }
    info!("Generation complete");
    Ok(())
}
