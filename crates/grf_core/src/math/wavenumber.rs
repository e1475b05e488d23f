//! Discrete Fourier wavenumber grids.
//!
//! Two pure helpers shared by synthesis and estimation:
//!
//! - [`normalize_box_dims`]: expands caller box dimensions to one length per axis
//! - [`k_components_and_magnitude`]: per-axis wavenumbers and the radial
//!   magnitude for every cell of a field
//!
//! ## Frequency convention
//!
//! Along an axis of `n` cells and physical length `L`, index `i` carries the
//! wavenumber
//!
//! ```text
//! k_i = 2π/L · i          for i <= n/2
//! k_i = 2π/L · (i - n)    otherwise
//! ```
//!
//! so `n = 8`, `L = 2π` gives `0, 1, 2, 3, 4, -3, -2, -1`.

use std::f64::consts::PI;

use ndarray::{ArrayD, IxDyn, Zip};

use crate::types::{BoxDims, BoxLengths, DimensionError};

/// Per-axis wavenumber components and radial magnitude of a field.
#[derive(Clone, Debug)]
pub struct WavenumberGrid {
    /// One array per axis, each of the full field shape.
    pub components: Vec<ArrayD<f64>>,
    /// Euclidean norm of the components, cell by cell.
    pub magnitude: ArrayD<f64>,
}

impl WavenumberGrid {
    /// Returns the field shape the grid was built for.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.magnitude.shape()
    }

    /// Returns the largest radial wavenumber on the grid.
    pub fn max_magnitude(&self) -> f64 {
        self.magnitude.iter().copied().fold(0.0, f64::max)
    }
}

/// Expands caller box dimensions into one positive length per grid axis.
///
/// A scalar, or a one-element sequence, is repeated along every axis. Any
/// other sequence must match the rank of `grid_shape`.
///
/// # Errors
///
/// Returns `DimensionError` if:
/// - the number of lengths disagrees with the grid rank
/// - any length is zero, negative, NaN or infinite
///
/// # Examples
/// ```
/// use grf_core::math::wavenumber::normalize_box_dims;
/// use grf_core::types::BoxDims;
///
/// let lengths = normalize_box_dims(&BoxDims::Uniform(100.0), &[64, 64, 32]).unwrap();
/// assert_eq!(lengths.as_slice(), &[100.0, 100.0, 100.0]);
///
/// assert!(normalize_box_dims(&BoxDims::from([1.0, 2.0]), &[8, 8, 8]).is_err());
/// ```
pub fn normalize_box_dims(
    box_dims: &BoxDims,
    grid_shape: &[usize],
) -> Result<BoxLengths, DimensionError> {
    let rank = grid_shape.len();
    let lengths = match box_dims {
        BoxDims::Uniform(length) => vec![*length; rank],
        BoxDims::PerAxis(lengths) if lengths.len() == 1 => vec![lengths[0]; rank],
        BoxDims::PerAxis(lengths) => lengths.clone(),
    };

    if lengths.len() != rank {
        return Err(DimensionError::RankMismatch {
            expected: rank,
            found: lengths.len(),
        });
    }

    BoxLengths::new(lengths)
}

/// Returns the wavenumber assigned to every index of one axis.
///
/// # Examples
/// ```
/// use grf_core::math::wavenumber::fft_frequencies;
/// use std::f64::consts::PI;
///
/// let k = fft_frequencies(8, 2.0 * PI);
/// let rounded: Vec<i64> = k.iter().map(|v| v.round() as i64).collect();
/// assert_eq!(rounded, vec![0, 1, 2, 3, 4, -3, -2, -1]);
/// ```
pub fn fft_frequencies(n: usize, length: f64) -> Vec<f64> {
    let step = 2.0 * PI / length;
    (0..n)
        .map(|i| {
            let index = if i <= n / 2 {
                i as f64
            } else {
                i as f64 - n as f64
            };
            index * step
        })
        .collect()
}

/// Builds per-axis wavenumber arrays and the radial magnitude for a field.
///
/// `shape` is the field's array shape; `box_lengths` must carry one length
/// per axis. Works for any rank, not only 2 and 3.
///
/// # Errors
///
/// Returns `DimensionError` if the ranks disagree, the shape is empty, or an
/// axis has no cells.
///
/// # Examples
/// ```
/// use grf_core::math::wavenumber::k_components_and_magnitude;
/// use grf_core::types::BoxLengths;
/// use std::f64::consts::PI;
///
/// let lengths = BoxLengths::new(vec![2.0 * PI, 2.0 * PI]).unwrap();
/// let grid = k_components_and_magnitude(&[4, 4], &lengths).unwrap();
///
/// assert_eq!(grid.components.len(), 2);
/// assert!((grid.magnitude[[1, 1]] - 2.0_f64.sqrt()).abs() < 1e-12);
/// assert_eq!(grid.magnitude[[0, 0]], 0.0);
/// ```
pub fn k_components_and_magnitude(
    shape: &[usize],
    box_lengths: &BoxLengths,
) -> Result<WavenumberGrid, DimensionError> {
    if shape.is_empty() {
        return Err(DimensionError::UnsupportedRank(0));
    }
    if shape.len() != box_lengths.rank() {
        return Err(DimensionError::RankMismatch {
            expected: shape.len(),
            found: box_lengths.rank(),
        });
    }
    if let Some(axis) = shape.iter().position(|&n| n == 0) {
        return Err(DimensionError::EmptyAxis { axis });
    }

    let dim = IxDyn(shape);
    let components: Vec<ArrayD<f64>> = shape
        .iter()
        .zip(box_lengths.as_slice())
        .enumerate()
        .map(|(axis, (&n, &length))| {
            let freqs = fft_frequencies(n, length);
            ArrayD::from_shape_fn(dim.clone(), |idx| freqs[idx[axis]])
        })
        .collect();

    let mut magnitude = ArrayD::<f64>::zeros(dim);
    for component in &components {
        Zip::from(&mut magnitude)
            .and(component)
            .for_each(|m, &k| *m += k * k);
    }
    magnitude.mapv_inplace(f64::sqrt);

    Ok(WavenumberGrid {
        components,
        magnitude,
    })
}
