//! Power spectrum estimation for real fields.
//!
//! The estimator is the inverse of the synthesis normalisation:
//!
//! ```text
//! P_nd(k) = |FFT(field)|² · pixel_volume² / box_volume
//! ```
//!
//! laid out with the zero mode at the grid centre, then averaged over
//! spherical shells of `|k|` to give a one-dimensional profile.

use grf_core::math::{fftshift, k_components_and_magnitude, normalize_box_dims};
use grf_core::traits::PowerSpectrum;
use grf_core::types::{BoxDims, BoxLengths, DimensionError, FieldError};
use ndarray::ArrayD;
use num_complex::Complex64;
use std::f64::consts::PI;
use tracing::debug;

use crate::rescale::{clamp_wavenumbers, scale_factor};
use crate::transform::forward_fftn;

/// Wavenumber binning for [`radial_average`].
#[derive(Clone, Debug, PartialEq)]
pub enum KBins {
    /// `n` log-spaced bins from `2π / min(box)` to the largest `|k|` on the grid.
    Count(usize),
    /// Explicit bin edges; strictly increasing, at least two.
    Edges(Vec<f64>),
}

impl Default for KBins {
    fn default() -> Self {
        KBins::Count(10)
    }
}

impl From<usize> for KBins {
    fn from(n: usize) -> Self {
        KBins::Count(n)
    }
}

impl From<Vec<f64>> for KBins {
    fn from(edges: Vec<f64>) -> Self {
        KBins::Edges(edges)
    }
}

/// Spherically averaged spectrum.
///
/// All three vectors have one entry per bin. Bins with no modes carry
/// `NaN` power and a zero count.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialProfile {
    /// Mean power per bin.
    pub power: Vec<f64>,
    /// Bin midpoints.
    pub k_centres: Vec<f64>,
    /// Number of grid cells that fell in each bin.
    pub n_modes: Vec<usize>,
}

impl RadialProfile {
    /// Number of bins.
    #[inline]
    pub fn len(&self) -> usize {
        self.power.len()
    }

    /// Returns `true` if the profile has no bins.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.power.is_empty()
    }

    /// Iterates `(k_centre, power, n_modes)` over bins that hold at least one mode.
    pub fn populated(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.k_centres
            .iter()
            .zip(self.power.iter())
            .zip(self.n_modes.iter())
            .filter(|(_, &n)| n > 0)
            .map(|((&k, &p), &n)| (k, p, n))
    }
}

fn lengths_for(shape: &[usize], box_dims: &BoxDims) -> Result<BoxLengths, FieldError> {
    if shape.is_empty() {
        return Err(DimensionError::UnsupportedRank(0).into());
    }
    if let Some(axis) = shape.iter().position(|&n| n == 0) {
        return Err(DimensionError::EmptyAxis { axis }.into());
    }
    Ok(normalize_box_dims(box_dims, shape)?)
}

/// Computes the n-dimensional power spectrum of a real field.
///
/// The result has the field's shape with the zero mode at the centre cell.
///
/// # Errors
///
/// Returns `FieldError::InvalidDimensions` if the box dimensions cannot be
/// normalised to the field's rank.
///
/// # Examples
///
/// ```rust
/// use grf_synth::estimate::power_spectrum_nd;
/// use ndarray::{ArrayD, IxDyn};
///
/// let field = ArrayD::from_elem(IxDyn(&[4, 4]), 1.0);
/// let power = power_spectrum_nd(&field, 2.0).unwrap();
///
/// // A constant field only has power in the zero mode.
/// assert!(power[[2, 2]] > 0.0);
/// assert!(power[[0, 0]] < 1e-20);
/// ```
pub fn power_spectrum_nd(
    field: &ArrayD<f64>,
    box_dims: impl Into<BoxDims>,
) -> Result<ArrayD<f64>, FieldError> {
    let lengths = lengths_for(field.shape(), &box_dims.into())?;
    let scale = scale_factor(&lengths, field.len());

    let mut spectrum = field.mapv(|v| Complex64::new(v, 0.0));
    forward_fftn(&mut spectrum);
    let power = spectrum.mapv(|z| z.norm_sqr() * scale);

    Ok(fftshift(&power))
}

/// Resolves a binning request into explicit, strictly increasing edges.
///
/// `k_max` is the largest wavenumber on the grid; `box_lengths` gives the
/// fundamental mode `2π / min(L)` used as the lowest edge for
/// [`KBins::Count`].
///
/// # Errors
///
/// Returns `FieldError::InvalidBins` if the count is zero, the edges are
/// fewer than two, not finite or not strictly increasing, or the grid is too
/// coarse to span `[2π / min(L), k_max]`.
pub fn resolve_bins(
    bins: &KBins,
    box_lengths: &BoxLengths,
    k_max: f64,
) -> Result<Vec<f64>, FieldError> {
    match bins {
        KBins::Count(0) => Err(FieldError::InvalidBins(
            "bin count must be at least 1".to_string(),
        )),
        KBins::Count(n) => {
            let k_min = 2.0 * PI / box_lengths.min_length();
            if k_max.is_nan() || k_max <= k_min {
                return Err(FieldError::InvalidBins(format!(
                    "grid k_max {k_max} does not exceed the fundamental mode {k_min}"
                )));
            }
            let (lo, hi) = (k_min.log10(), k_max.log10());
            let step = (hi - lo) / *n as f64;
            let mut edges: Vec<f64> = (0..=*n)
                .map(|i| 10f64.powf(lo + step * i as f64))
                .collect();
            // Pin the outer edges so rounding in powf cannot drop the k_max modes.
            edges[0] = k_min;
            edges[*n] = k_max;
            Ok(edges)
        }
        KBins::Edges(edges) => {
            if edges.len() < 2 {
                return Err(FieldError::InvalidBins(format!(
                    "need at least 2 edges, got {}",
                    edges.len()
                )));
            }
            if edges.iter().any(|e| !e.is_finite()) {
                return Err(FieldError::InvalidBins("edges must be finite".to_string()));
            }
            if edges.windows(2).any(|w| w[1] <= w[0]) {
                return Err(FieldError::InvalidBins(
                    "edges must be strictly increasing".to_string(),
                ));
            }
            Ok(edges.clone())
        }
    }
}

/// Index of the bin holding `k`, or `None` outside `[edges[0], edges[last]]`.
///
/// Bins are half-open except the last, which also includes its upper edge.
fn bin_index(edges: &[f64], k: f64) -> Option<usize> {
    let last = edges.len() - 1;
    if k < edges[0] || k > edges[last] || k.is_nan() {
        return None;
    }
    if k == edges[last] {
        return Some(last - 1);
    }
    Some(edges.partition_point(|&e| e <= k) - 1)
}

/// Averages a centred n-dimensional array over spherical shells of `|k|`.
///
/// `values` must use the same centred layout as [`power_spectrum_nd`].
///
/// # Errors
///
/// Returns `FieldError` if:
/// - the box dimensions do not match the rank of `values` (`InvalidDimensions`)
/// - the binning is unusable (`InvalidBins`)
pub fn radial_average(
    values: &ArrayD<f64>,
    box_dims: impl Into<BoxDims>,
    bins: &KBins,
) -> Result<RadialProfile, FieldError> {
    let lengths = lengths_for(values.shape(), &box_dims.into())?;
    let grid = k_components_and_magnitude(values.shape(), &lengths)?;
    let k_max = grid.max_magnitude();
    // Same centred layout as power_spectrum_nd.
    let k = fftshift(&grid.magnitude);
    let edges = resolve_bins(bins, &lengths, k_max)?;

    let n_bins = edges.len() - 1;
    let mut sums = vec![0.0; n_bins];
    let mut n_modes = vec![0usize; n_bins];
    for (&kv, &v) in k.iter().zip(values.iter()) {
        if let Some(i) = bin_index(&edges, kv) {
            sums[i] += v;
            n_modes[i] += 1;
        }
    }

    let power = sums
        .iter()
        .zip(n_modes.iter())
        .map(|(&s, &n)| if n == 0 { f64::NAN } else { s / n as f64 })
        .collect();
    let k_centres = edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();

    debug!(
        bins = n_bins,
        empty = n_modes.iter().filter(|&&n| n == 0).count(),
        "radial average"
    );

    Ok(RadialProfile {
        power,
        k_centres,
        n_modes,
    })
}

/// Estimates the spherically averaged power spectrum of a real field.
///
/// Equivalent to [`radial_average`] of [`power_spectrum_nd`].
///
/// # Errors
///
/// Same as [`radial_average`].
///
/// # Examples
///
/// ```rust
/// use grf_synth::estimate::{power_spectrum_1d, KBins};
/// use grf_synth::generate_field;
///
/// let field = generate_field(&[64, 64], 100.0, &|_k: f64| 2.0, Some(3)).unwrap();
/// let profile = power_spectrum_1d(&field, 100.0, &KBins::Count(8)).unwrap();
///
/// assert_eq!(profile.len(), 8);
/// for (_k, power, _n) in profile.populated() {
///     assert!(power > 0.0);
/// }
/// ```
pub fn power_spectrum_1d(
    field: &ArrayD<f64>,
    box_dims: impl Into<BoxDims>,
    bins: &KBins,
) -> Result<RadialProfile, FieldError> {
    let box_dims = box_dims.into();
    let power = power_spectrum_nd(field, box_dims.clone())?;
    radial_average(&power, box_dims, bins)
}

/// Radially averages a target spectrum over the modes of a grid.
///
/// The spectrum is evaluated on every cell's clamped `|k|` and binned like
/// [`power_spectrum_1d`], so a measured profile and its target share the
/// same modes in every bin.
///
/// # Errors
///
/// Returns `FieldError` if the shape or box is invalid, the binning is
/// unusable, or the spectrum fails to evaluate.
///
/// # Examples
///
/// ```rust
/// use grf_synth::estimate::{target_profile, KBins};
///
/// let profile = target_profile(&[32, 32], 10.0, &|_k: f64| 4.0, &KBins::Count(4)).unwrap();
/// for (_k, power, _n) in profile.populated() {
///     assert!((power - 4.0).abs() < 1e-12);
/// }
/// ```
pub fn target_profile<S>(
    grid_shape: &[usize],
    box_dims: impl Into<BoxDims>,
    spectrum: &S,
    bins: &KBins,
) -> Result<RadialProfile, FieldError>
where
    S: PowerSpectrum + ?Sized,
{
    let box_dims = box_dims.into();
    let lengths = lengths_for(grid_shape, &box_dims)?;
    let grid = k_components_and_magnitude(grid_shape, &lengths)?;
    let mut k = fftshift(&grid.magnitude);
    clamp_wavenumbers(&mut k);
    let target = spectrum.evaluate_grid(&k)?;
    radial_average(&target, box_dims, bins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::IxDyn;

    #[test]
    fn test_parseval_normalisation() {
        let field = ArrayD::from_shape_fn(IxDyn(&[8, 4]), |idx| {
            (idx[0] as f64 * 0.7).sin() + idx[1] as f64 * 0.1
        });
        let power = power_spectrum_nd(&field, [4.0, 2.0]).unwrap();

        // sum |F|² = N · sum f², so sum P = pixel² / V · N · sum f².
        let n = 32.0;
        let volume = 8.0;
        let pixel = volume / n;
        let energy: f64 = field.iter().map(|v| v * v).sum();
        let total: f64 = power.iter().sum();
        assert_relative_eq!(total, pixel * pixel / volume * n * energy, max_relative = 1e-10);
    }

    #[test]
    fn test_resolve_count_is_log_spaced() {
        let lengths = BoxLengths::new(vec![2.0 * PI, 2.0 * PI]).unwrap();
        let edges = resolve_bins(&KBins::Count(2), &lengths, 100.0).unwrap();
        assert_eq!(edges.len(), 3);
        assert_relative_eq!(edges[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(edges[1], 10.0, max_relative = 1e-12);
        assert_eq!(edges[2], 100.0);
    }

    #[test]
    fn test_resolve_rejects_bad_bins() {
        let lengths = BoxLengths::new(vec![1.0, 1.0]).unwrap();
        for bins in [
            KBins::Count(0),
            KBins::Edges(vec![1.0]),
            KBins::Edges(vec![1.0, 1.0]),
            KBins::Edges(vec![2.0, 1.0]),
            KBins::Edges(vec![0.0, f64::INFINITY]),
        ] {
            let result = resolve_bins(&bins, &lengths, 50.0);
            assert!(
                matches!(result, Err(FieldError::InvalidBins(_))),
                "{:?} accepted",
                bins
            );
        }
    }

    #[test]
    fn test_resolve_rejects_coarse_grid() {
        let lengths = BoxLengths::new(vec![1.0, 1.0]).unwrap();
        let result = resolve_bins(&KBins::Count(4), &lengths, 1.0);
        assert!(matches!(result, Err(FieldError::InvalidBins(_))));
    }

    #[test]
    fn test_bin_index_histogram_semantics() {
        let edges = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(bin_index(&edges, -0.1), None);
        assert_eq!(bin_index(&edges, 0.0), Some(0));
        assert_eq!(bin_index(&edges, 0.99), Some(0));
        assert_eq!(bin_index(&edges, 1.0), Some(1));
        assert_eq!(bin_index(&edges, 3.0), Some(2));
        assert_eq!(bin_index(&edges, 3.01), None);
        assert_eq!(bin_index(&edges, f64::NAN), None);
    }

    #[test]
    fn test_radial_average_of_constant() {
        let values = ArrayD::from_elem(IxDyn(&[16, 16]), 3.0);
        let profile = radial_average(&values, 10.0, &KBins::Count(4)).unwrap();

        assert_eq!(profile.len(), 4);
        for (_, power, _) in profile.populated() {
            assert_relative_eq!(power, 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_radial_average_empty_bins_are_nan() {
        let values = ArrayD::from_elem(IxDyn(&[4, 4]), 1.0);
        let profile = radial_average(&values, 1.0, &KBins::Edges(vec![1e3, 2e3, 3e3])).unwrap();

        assert_eq!(profile.n_modes, vec![0, 0]);
        assert!(profile.power.iter().all(|p| p.is_nan()));
        assert_eq!(profile.k_centres, vec![1.5e3, 2.5e3]);
        assert_eq!(profile.populated().count(), 0);
    }

    #[test]
    fn test_radial_average_counts_every_mode_once() {
        let values = ArrayD::from_elem(IxDyn(&[8, 8, 8]), 1.0);
        // Edges covering [0, k_max] see every cell.
        let profile = radial_average(&values, 1.0, &KBins::Edges(vec![0.0, 20.0, 100.0])).unwrap();
        assert_eq!(profile.n_modes.iter().sum::<usize>(), 512);
    }

    #[test]
    fn test_target_profile_averages_over_bin_modes() {
        let shape = [32, 32];
        let bins = KBins::Count(3);
        let profile = target_profile(&shape, 10.0, &|k: f64| k.powi(-3), &bins).unwrap();
        let midpoint = radial_average(&ArrayD::from_elem(IxDyn(&shape), 1.0), 10.0, &bins).unwrap();

        assert_eq!(profile.n_modes, midpoint.n_modes);
        // A steep spectrum differs from its value at the log-bin midpoint.
        let (k, power, _) = profile.populated().next().unwrap();
        assert!((power - k.powi(-3)).abs() / power > 0.05);
    }

    #[test]
    fn test_target_profile_propagates_spectrum_errors() {
        let failing = grf_core::traits::fallible(|_k: f64| Err::<f64, _>(std::fmt::Error));
        let result = target_profile(&[8, 8], 1.0, &failing, &KBins::Count(2));
        assert!(matches!(result, Err(FieldError::SpectrumEvaluation { .. })));
    }

    #[test]
    fn test_box_rank_mismatch() {
        let values = ArrayD::from_elem(IxDyn(&[4, 4]), 1.0);
        let result = radial_average(&values, [1.0, 1.0, 1.0], &KBins::Count(2));
        assert!(matches!(result, Err(ref e) if e.is_invalid_dimensions()));
    }
}
