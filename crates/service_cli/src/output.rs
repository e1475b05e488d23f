//! Output writers for generated fields and estimated spectra.
//!
//! Everything is written to a `dyn Write`, so the same code serves files
//! and stdout.

use grf_core::models::SpectrumModel;
use grf_synth::RadialProfile;
use ndarray::{ArrayD, Dimension};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::Result;

/// Opens `path` for writing, or stdout when no path is given.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

/// A generated field with the settings that produced it.
#[derive(Debug, Serialize)]
pub struct FieldDocument<'a> {
    /// Cells per axis.
    pub shape: &'a [usize],
    /// Box length per axis.
    pub box_lengths: &'a [f64],
    /// Seed, if one was fixed.
    pub seed: Option<u64>,
    /// Target spectrum.
    pub spectrum: &'a SpectrumModel,
    /// Cell values in row-major order.
    pub data: Vec<f64>,
}

/// Basic moments of a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldStats {
    /// Number of cells.
    pub n_cells: usize,
    /// Sample mean.
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl FieldStats {
    /// Computes the moments of `field`. All zero for an empty field.
    pub fn of(field: &ArrayD<f64>) -> Self {
        let n_cells = field.len();
        if n_cells == 0 {
            return Self {
                n_cells,
                mean: 0.0,
                variance: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }
        let n = n_cells as f64;
        let mean = field.iter().sum::<f64>() / n;
        let variance = field.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let min = field.iter().copied().fold(f64::INFINITY, f64::min);
        let max = field.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            n_cells,
            mean,
            variance,
            min,
            max,
        }
    }
}

/// Writes the field as one JSON document.
pub fn write_field_json<W: Write>(mut writer: W, document: &FieldDocument<'_>) -> Result<()> {
    serde_json::to_writer(&mut writer, document)?;
    writer.flush()?;
    Ok(())
}

/// Writes one CSV row per cell: the cell's index on every axis, then its value.
///
/// Header columns are `i`, `j` (and `k` for 3D grids), then `value`.
pub fn write_field_csv<W: Write>(writer: W, field: &ArrayD<f64>) -> Result<()> {
    const AXES: [&str; 3] = ["i", "j", "k"];

    let mut csv = csv::Writer::from_writer(writer);
    let mut header: Vec<String> = (0..field.ndim())
        .map(|axis| {
            AXES.get(axis)
                .map_or_else(|| format!("axis{}", axis), |name| name.to_string())
        })
        .collect();
    header.push("value".to_string());
    csv.write_record(&header)?;

    let mut record = Vec::with_capacity(field.ndim() + 1);
    for (index, value) in field.indexed_iter() {
        record.clear();
        record.extend(index.slice().iter().map(|i| i.to_string()));
        record.push(value.to_string());
        csv.write_record(&record)?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes human-readable field statistics.
pub fn write_field_summary<W: Write>(
    mut writer: W,
    shape: &[usize],
    seed: Option<u64>,
    stats: &FieldStats,
) -> Result<()> {
    let shape = shape
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("x");
    let seed = seed.map_or_else(|| "entropy".to_string(), |s| s.to_string());

    writeln!(writer, "Field {} (seed: {})", shape, seed)?;
    writeln!(writer, "  cells:    {}", stats.n_cells)?;
    writeln!(writer, "  mean:     {:.6e}", stats.mean)?;
    writeln!(writer, "  variance: {:.6e}", stats.variance)?;
    writeln!(writer, "  min:      {:.6e}", stats.min)?;
    writeln!(writer, "  max:      {:.6e}", stats.max)?;
    writer.flush()?;
    Ok(())
}

/// One bin of a measured-versus-target spectrum comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpectrumRow {
    /// Bin midpoint.
    pub k: f64,
    /// Radially averaged power of the realised field; `None` for empty bins.
    pub measured: Option<f64>,
    /// Target spectrum averaged over the same modes; `None` for empty bins.
    pub target: Option<f64>,
    /// Modes in the bin.
    pub n_modes: usize,
}

/// Pairs an estimated profile with the target profile binned over the same modes.
///
/// Both profiles must come from the same grid and binning.
pub fn spectrum_rows(measured: &RadialProfile, target: &RadialProfile) -> Vec<SpectrumRow> {
    measured
        .k_centres
        .iter()
        .zip(measured.power.iter())
        .zip(target.power.iter())
        .zip(measured.n_modes.iter())
        .map(|(((&k, &power), &target), &n_modes)| SpectrumRow {
            k,
            measured: (n_modes > 0).then_some(power),
            target: (n_modes > 0).then_some(target),
            n_modes,
        })
        .collect()
}

/// Writes spectrum rows as a JSON array.
pub fn write_spectrum_json<W: Write>(mut writer: W, rows: &[SpectrumRow]) -> Result<()> {
    serde_json::to_writer(&mut writer, rows)?;
    writer.flush()?;
    Ok(())
}

/// Writes spectrum rows as CSV with a `k,measured,target,n_modes` header.
///
/// Empty bins leave `measured` blank.
pub fn write_spectrum_csv<W: Write>(writer: W, rows: &[SpectrumRow]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes spectrum rows as an aligned table.
pub fn write_spectrum_table<W: Write>(mut writer: W, rows: &[SpectrumRow]) -> Result<()> {
    writeln!(
        writer,
        "{:>12}  {:>12}  {:>12}  {:>8}  {:>7}",
        "k", "measured", "target", "ratio", "modes"
    )?;
    for row in rows {
        match (row.measured, row.target) {
            (Some(measured), Some(target)) => writeln!(
                writer,
                "{:>12.4e}  {:>12.4e}  {:>12.4e}  {:>8.3}  {:>7}",
                row.k,
                measured,
                target,
                measured / target,
                row.n_modes
            )?,
            _ => writeln!(
                writer,
                "{:>12.4e}  {:>12}  {:>12}  {:>8}  {:>7}",
                row.k, "-", "-", "-", row.n_modes
            )?,
        }
    }
    writer.flush()?;
    Ok(())
}
