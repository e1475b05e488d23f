//! Spectral rescaling of Fourier-space noise.
//!
//! Every complex sample is multiplied by
//!
//! ```text
//! sqrt(P(k) / scale_factor)
//! scale_factor = pixel_volume² / box_volume
//! pixel_volume = box_volume / n_cells
//! ```
//!
//! which converts a spectrum in continuum (inverse-volume) units into the
//! discrete-FFT convention of the inverse transform. Wavenumbers below
//! [`K_FLOOR`] are raised to it first so `P` is never evaluated at `k = 0`.

use grf_core::traits::PowerSpectrum;
use grf_core::types::{BoxLengths, DimensionError, FieldError};
use ndarray::{ArrayD, Zip};
use num_complex::Complex64;
use tracing::trace;

/// Smallest wavenumber magnitude the spectrum is evaluated at.
pub const K_FLOOR: f64 = 1e-6;

/// Raises every `|k| < K_FLOOR` to `K_FLOOR`, in place.
///
/// # Examples
///
/// ```rust
/// use grf_synth::rescale::{clamp_wavenumbers, K_FLOOR};
/// use ndarray::{ArrayD, IxDyn};
///
/// let mut k = ArrayD::from_shape_vec(IxDyn(&[3]), vec![0.0, 5e-7, 0.5]).unwrap();
/// clamp_wavenumbers(&mut k);
/// assert_eq!(k.as_slice().unwrap(), &[K_FLOOR, K_FLOOR, 0.5]);
/// ```
pub fn clamp_wavenumbers(k: &mut ArrayD<f64>) {
    k.mapv_inplace(|v| if v.abs() < K_FLOOR { K_FLOOR } else { v });
}

/// Returns `pixel_volume² / box_volume` for a grid of `n_cells` cells.
///
/// # Examples
///
/// ```rust
/// use grf_core::types::BoxLengths;
/// use grf_synth::rescale::scale_factor;
///
/// let lengths = BoxLengths::new(vec![100.0, 100.0]).unwrap();
/// // pixel = 10_000 / 4096, scale = pixel² / 10_000
/// let expected = (10_000.0_f64 / 4096.0).powi(2) / 10_000.0;
/// assert!((scale_factor(&lengths, 4096) - expected).abs() < 1e-15);
/// ```
pub fn scale_factor(box_lengths: &BoxLengths, n_cells: usize) -> f64 {
    let box_volume = box_lengths.volume();
    let pixel_volume = box_volume / n_cells as f64;
    pixel_volume * pixel_volume / box_volume
}

/// Evaluates `sqrt(P(k) / scale)` on every cell of `k`.
///
/// # Errors
///
/// Returns `FieldError` if:
/// - the spectrum fails (`SpectrumEvaluation`)
/// - the spectrum returns NaN or an infinity (`NonFiniteSpectrum`)
/// - the spectrum returns a negative value (`NegativeSpectrum`)
/// - a custom `evaluate_grid` returns the wrong shape (`ShapeMismatch`)
pub fn amplitudes<S>(k: &ArrayD<f64>, scale: f64, spectrum: &S) -> Result<ArrayD<f64>, FieldError>
where
    S: PowerSpectrum + ?Sized,
{
    let mut power = spectrum.evaluate_grid(k)?;
    if power.shape() != k.shape() {
        return Err(FieldError::ShapeMismatch {
            expected: k.shape().to_vec(),
            found: power.shape().to_vec(),
        });
    }

    for (&kv, &value) in k.iter().zip(power.iter()) {
        if !value.is_finite() {
            return Err(FieldError::NonFiniteSpectrum { k: kv, value });
        }
        if value < 0.0 {
            return Err(FieldError::NegativeSpectrum { k: kv, value });
        }
    }

    power.mapv_inplace(|p| (p / scale).sqrt());
    Ok(power)
}

/// Rescales `noise` in place so its expected power follows `spectrum`.
///
/// `k` is the radial wavenumber of every cell, laid out like `noise`; it is
/// clamped to [`K_FLOOR`] before the spectrum sees it.
///
/// # Errors
///
/// Returns `FieldError` if:
/// - `k` and `noise` shapes differ (`ShapeMismatch`)
/// - `box_lengths` does not have one length per axis (`InvalidDimensions`)
/// - the spectrum fails or returns a negative or non-finite value
pub fn rescale<S>(
    noise: &mut ArrayD<Complex64>,
    mut k: ArrayD<f64>,
    box_lengths: &BoxLengths,
    spectrum: &S,
) -> Result<(), FieldError>
where
    S: PowerSpectrum + ?Sized,
{
    if noise.shape() != k.shape() {
        return Err(FieldError::ShapeMismatch {
            expected: noise.shape().to_vec(),
            found: k.shape().to_vec(),
        });
    }
    if box_lengths.rank() != noise.ndim() {
        return Err(DimensionError::RankMismatch {
            expected: noise.ndim(),
            found: box_lengths.rank(),
        }
        .into());
    }

    clamp_wavenumbers(&mut k);
    let scale = scale_factor(box_lengths, noise.len());
    trace!(scale_factor = scale, n_cells = noise.len(), "rescaling noise");

    let amps = amplitudes(&k, scale, spectrum)?;
    Zip::from(noise).and(&amps).for_each(|z, &a| *z *= a);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use grf_core::traits::fallible;
    use ndarray::IxDyn;

    fn ones(shape: &[usize]) -> ArrayD<Complex64> {
        ArrayD::from_elem(IxDyn(shape), Complex64::new(1.0, 1.0))
    }

    #[test]
    fn test_clamp_keeps_negative_components_above_floor() {
        let mut k = ArrayD::from_shape_vec(IxDyn(&[4]), vec![-1e-7, -2.0, 1e-6, 0.0]).unwrap();
        clamp_wavenumbers(&mut k);
        assert_eq!(k.as_slice().unwrap(), &[K_FLOOR, -2.0, 1e-6, K_FLOOR]);
    }

    #[test]
    fn test_scale_factor_three_dimensional() {
        let lengths = BoxLengths::new(vec![2.0, 3.0, 4.0]).unwrap();
        let pixel = 24.0 / 64.0;
        assert_relative_eq!(
            scale_factor(&lengths, 64),
            pixel * pixel / 24.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_rescale_applies_sqrt_of_power_over_scale() {
        let lengths = BoxLengths::new(vec![4.0, 4.0]).unwrap();
        let mut noise = ones(&[2, 2]);
        let k = ArrayD::from_elem(IxDyn(&[2, 2]), 1.0);

        rescale(&mut noise, k, &lengths, &|_k: f64| 9.0).unwrap();

        let scale = scale_factor(&lengths, 4);
        let expected = (9.0 / scale).sqrt();
        for z in noise.iter() {
            assert_relative_eq!(z.re, expected, max_relative = 1e-12);
            assert_relative_eq!(z.im, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_rescale_never_evaluates_below_floor() {
        let lengths = BoxLengths::new(vec![1.0, 1.0]).unwrap();
        let mut noise = ones(&[2, 2]);
        let k = ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![0.0, 1.0, 2.0, 0.0]).unwrap();
        let spectrum = fallible(|k: f64| {
            if k.abs() < K_FLOOR {
                Err("evaluated below the floor")
            } else {
                Ok(1.0 / k)
            }
        });

        assert!(rescale(&mut noise, k, &lengths, &spectrum).is_ok());
    }

    #[test]
    fn test_rescale_negative_spectrum() {
        let lengths = BoxLengths::new(vec![1.0, 1.0]).unwrap();
        let mut noise = ones(&[2, 2]);
        let k = ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![0.0, 1.0, 2.0, 3.0]).unwrap();

        let err = rescale(&mut noise, k, &lengths, &|k: f64| 1.5 - k).unwrap_err();
        match err {
            FieldError::NegativeSpectrum { k, value } => {
                assert_eq!(k, 2.0);
                assert_eq!(value, -0.5);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rescale_non_finite_spectrum() {
        let lengths = BoxLengths::new(vec![1.0, 1.0]).unwrap();
        let mut noise = ones(&[2, 2]);
        let k = ArrayD::from_elem(IxDyn(&[2, 2]), 1.0);

        let err = rescale(&mut noise, k, &lengths, &|_k: f64| f64::NAN).unwrap_err();
        assert!(matches!(err, FieldError::NonFiniteSpectrum { .. }));
    }

    #[test]
    fn test_rescale_shape_mismatch() {
        let lengths = BoxLengths::new(vec![1.0, 1.0]).unwrap();
        let mut noise = ones(&[2, 2]);
        let k = ArrayD::from_elem(IxDyn(&[2, 3]), 1.0);

        let err = rescale(&mut noise, k, &lengths, &|_k: f64| 1.0).unwrap_err();
        assert!(matches!(err, FieldError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_rescale_box_rank_mismatch() {
        let lengths = BoxLengths::new(vec![1.0, 1.0, 1.0]).unwrap();
        let mut noise = ones(&[2, 2]);
        let k = ArrayD::from_elem(IxDyn(&[2, 2]), 1.0);

        let err = rescale(&mut noise, k, &lengths, &|_k: f64| 1.0).unwrap_err();
        assert!(err.is_invalid_dimensions());
    }

    proptest::proptest! {
        #[test]
        fn prop_clamp_floor(values in proptest::collection::vec(-1e-5f64..1e-5, 1..64)) {
            let n = values.len();
            let mut k = ArrayD::from_shape_vec(IxDyn(&[n]), values.clone()).unwrap();
            clamp_wavenumbers(&mut k);
            for (clamped, original) in k.iter().zip(values.iter()) {
                proptest::prop_assert!(clamped.abs() >= K_FLOOR);
                if original.abs() >= K_FLOOR {
                    proptest::prop_assert_eq!(clamped, original);
                }
            }
        }
    }
}
