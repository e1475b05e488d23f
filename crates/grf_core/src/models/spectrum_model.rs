//! Named analytic power spectra.
//!
//! ```text
//! Flat        P(k) = A
//! PowerLaw    P(k) = A (k / k0)^n
//! Lorentzian  P(k) = A / (k² + ε)
//! Gaussian    P(k) = A exp(-k² w² / 2)
//! ```

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::PowerSpectrum;
use crate::types::{FieldError, SpectrumEvaluationError};

/// Closed-form power spectrum selectable from configuration.
///
/// Static dispatch over the supported shapes; every variant implements
/// [`PowerSpectrum`] once validated.
///
/// # Examples
/// ```
/// use grf_core::models::SpectrumModel;
/// use grf_core::traits::PowerSpectrum;
///
/// let model = SpectrumModel::Lorentzian { amplitude: 1.0, softening: 1e-3 };
/// model.validate().unwrap();
/// assert!((model.power(1.0).unwrap() - 1.0 / 1.001).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "model", rename_all = "snake_case")
)]
pub enum SpectrumModel {
    /// White noise: the same power at every wavenumber.
    Flat {
        /// Power level `A`.
        amplitude: f64,
    },

    /// Scale-free spectrum normalised at a pivot wavenumber.
    PowerLaw {
        /// Power `A` at the pivot.
        amplitude: f64,
        /// Spectral index `n`.
        index: f64,
        /// Pivot wavenumber `k0`.
        pivot: f64,
    },

    /// Softened inverse-square spectrum.
    Lorentzian {
        /// Numerator `A`.
        amplitude: f64,
        /// Softening `ε` added to `k²`.
        softening: f64,
    },

    /// Gaussian cutoff.
    Gaussian {
        /// Power `A` at `k = 0`.
        amplitude: f64,
        /// Smoothing length `w`.
        width: f64,
    },
}

impl SpectrumModel {
    /// Returns the model name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            SpectrumModel::Flat { .. } => "flat",
            SpectrumModel::PowerLaw { .. } => "power_law",
            SpectrumModel::Lorentzian { .. } => "lorentzian",
            SpectrumModel::Gaussian { .. } => "gaussian",
        }
    }

    /// Validates the model parameters.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::InvalidModel` if:
    /// - any amplitude is negative or not finite
    /// - a power-law pivot is not positive or the index is not finite
    /// - a Lorentzian softening is negative
    /// - a Gaussian width is negative
    pub fn validate(&self) -> Result<(), FieldError> {
        let amplitude = match self {
            SpectrumModel::Flat { amplitude }
            | SpectrumModel::PowerLaw { amplitude, .. }
            | SpectrumModel::Lorentzian { amplitude, .. }
            | SpectrumModel::Gaussian { amplitude, .. } => *amplitude,
        };
        if !(amplitude.is_finite() && amplitude >= 0.0) {
            return Err(FieldError::InvalidModel(format!(
                "{}: amplitude must be finite and non-negative, got {}",
                self.name(),
                amplitude
            )));
        }

        match self {
            SpectrumModel::PowerLaw { index, pivot, .. } => {
                if !(pivot.is_finite() && *pivot > 0.0) {
                    return Err(FieldError::InvalidModel(format!(
                        "power_law: pivot must be positive, got {}",
                        pivot
                    )));
                }
                if !index.is_finite() {
                    return Err(FieldError::InvalidModel(format!(
                        "power_law: index must be finite, got {}",
                        index
                    )));
                }
            }
            SpectrumModel::Lorentzian { softening, .. } => {
                if !(softening.is_finite() && *softening >= 0.0) {
                    return Err(FieldError::InvalidModel(format!(
                        "lorentzian: softening must be non-negative, got {}",
                        softening
                    )));
                }
            }
            SpectrumModel::Gaussian { width, .. } => {
                if !(width.is_finite() && *width >= 0.0) {
                    return Err(FieldError::InvalidModel(format!(
                        "gaussian: width must be non-negative, got {}",
                        width
                    )));
                }
            }
            SpectrumModel::Flat { .. } => {}
        }
        Ok(())
    }

    /// Evaluates the closed form at `k`.
    #[inline]
    pub fn evaluate(&self, k: f64) -> f64 {
        match *self {
            SpectrumModel::Flat { amplitude } => amplitude,
            SpectrumModel::PowerLaw {
                amplitude,
                index,
                pivot,
            } => amplitude * (k / pivot).powf(index),
            SpectrumModel::Lorentzian {
                amplitude,
                softening,
            } => amplitude / (k * k + softening),
            SpectrumModel::Gaussian { amplitude, width } => {
                amplitude * (-0.5 * k * k * width * width).exp()
            }
        }
    }
}

impl Default for SpectrumModel {
    fn default() -> Self {
        SpectrumModel::Lorentzian {
            amplitude: 1.0,
            softening: 1e-3,
        }
    }
}

impl PowerSpectrum for SpectrumModel {
    #[inline]
    fn power(&self, k: f64) -> Result<f64, SpectrumEvaluationError> {
        Ok(self.evaluate(k))
    }
}

impl fmt::Display for SpectrumModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpectrumModel::Flat { amplitude } => write!(f, "flat(A={})", amplitude),
            SpectrumModel::PowerLaw {
                amplitude,
                index,
                pivot,
            } => write!(f, "power_law(A={}, n={}, k0={})", amplitude, index, pivot),
            SpectrumModel::Lorentzian {
                amplitude,
                softening,
            } => write!(f, "lorentzian(A={}, eps={})", amplitude, softening),
            SpectrumModel::Gaussian { amplitude, width } => {
                write!(f, "gaussian(A={}, w={})", amplitude, width)
            }
        }
    }
}
