//! Power spectrum abstraction.

use ndarray::ArrayD;

use crate::types::{FieldError, SpectrumEvaluationError};

/// Target power spectrum `P(k)` of a Gaussian random field.
///
/// Implemented automatically for any `Fn(f64) -> f64`. Spectra that can fail
/// should be wrapped with [`fallible`]; their errors reach the caller as
/// [`FieldError::SpectrumEvaluation`] with the original error as `source()`.
///
/// # Examples
/// ```
/// use grf_core::traits::PowerSpectrum;
///
/// let spectrum = |k: f64| 1.0 / (k * k + 1e-3);
/// assert!((spectrum.power(1.0).unwrap() - 1.0 / 1.001).abs() < 1e-12);
/// ```
pub trait PowerSpectrum {
    /// Returns the power at radial wavenumber `k >= 0`.
    ///
    /// # Errors
    ///
    /// Whatever the implementation considers an evaluation failure.
    fn power(&self, k: f64) -> Result<f64, SpectrumEvaluationError>;

    /// Evaluates the spectrum on every cell of a wavenumber array.
    ///
    /// The default implementation calls [`PowerSpectrum::power`] cell by cell
    /// and stops at the first failure. Implementations with a vectorised
    /// form may override it.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::SpectrumEvaluation` carrying the failing
    /// wavenumber and the implementation's error.
    fn evaluate_grid(&self, k: &ArrayD<f64>) -> Result<ArrayD<f64>, FieldError> {
        let mut out = ArrayD::<f64>::zeros(k.raw_dim());
        for (dst, &kv) in out.iter_mut().zip(k.iter()) {
            *dst = self
                .power(kv)
                .map_err(|source| FieldError::SpectrumEvaluation { k: kv, source })?;
        }
        Ok(out)
    }
}

impl<F> PowerSpectrum for F
where
    F: Fn(f64) -> f64,
{
    #[inline]
    fn power(&self, k: f64) -> Result<f64, SpectrumEvaluationError> {
        Ok(self(k))
    }
}

/// Adapter turning `Fn(f64) -> Result<f64, E>` into a [`PowerSpectrum`].
///
/// Built with [`fallible`].
#[derive(Clone, Copy, Debug)]
pub struct Fallible<F>(F);

/// Wraps a fallible closure as a [`PowerSpectrum`].
///
/// # Examples
/// ```
/// use grf_core::traits::{fallible, PowerSpectrum};
///
/// let spectrum = fallible(|k: f64| {
///     if k == 0.0 {
///         Err("undefined at k = 0")
///     } else {
///         Ok(k.powf(-3.0))
///     }
/// });
/// assert!(spectrum.power(0.0).is_err());
/// assert_eq!(spectrum.power(1.0).unwrap(), 1.0);
/// ```
pub fn fallible<F, E>(f: F) -> Fallible<F>
where
    F: Fn(f64) -> Result<f64, E>,
    E: Into<SpectrumEvaluationError>,
{
    Fallible(f)
}

impl<F, E> PowerSpectrum for Fallible<F>
where
    F: Fn(f64) -> Result<f64, E>,
    E: Into<SpectrumEvaluationError>,
{
    #[inline]
    fn power(&self, k: f64) -> Result<f64, SpectrumEvaluationError> {
        (self.0)(k).map_err(Into::into)
    }
}
