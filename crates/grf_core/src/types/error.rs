//! Error types for structured error handling.
//!
//! This module provides:
//! - `DimensionError`: Errors from grid-shape and box-dimension validation
//! - `FieldError`: Errors from field synthesis and spectrum estimation
//! - `SpectrumEvaluationError`: Boxed error raised by caller-supplied spectra

use thiserror::Error;

/// Error raised by a caller-supplied power spectrum.
///
/// Carried unmodified inside [`FieldError::SpectrumEvaluation`] and exposed
/// through [`std::error::Error::source`].
pub type SpectrumEvaluationError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Grid-shape and box-dimension validation errors.
///
/// # Examples
/// ```
/// use grf_core::types::DimensionError;
///
/// let err = DimensionError::UnsupportedRank(4);
/// assert_eq!(format!("{}", err), "Unsupported grid rank 4: must be 2 or 3");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DimensionError {
    /// Grid rank outside {2, 3}.
    #[error("Unsupported grid rank {0}: must be 2 or 3")]
    UnsupportedRank(usize),

    /// An axis with zero cells.
    #[error("Grid axis {axis} has no cells")]
    EmptyAxis {
        /// Index of the offending axis.
        axis: usize,
    },

    /// Total cell count does not fit in `usize`.
    #[error("Grid cell count overflows for shape {shape:?}")]
    CellCountOverflow {
        /// The requested shape.
        shape: Vec<usize>,
    },

    /// Box dimensions do not provide one length per grid axis.
    #[error("Box dimensions have {found} entries but the grid has rank {expected}")]
    RankMismatch {
        /// Grid rank.
        expected: usize,
        /// Number of box lengths supplied.
        found: usize,
    },

    /// Box dimensions with no lengths at all.
    #[error("Box dimensions must provide at least one length")]
    EmptyBox,

    /// A box length that is zero, negative, NaN or infinite.
    #[error("Box length {value} on axis {axis} must be finite and positive")]
    NonPositiveLength {
        /// Index of the offending axis.
        axis: usize,
        /// The rejected length.
        value: f64,
    },
}

/// Categorised field synthesis errors.
///
/// # Variants
/// - `InvalidDimensions`: bad grid shape or box dimensions, raised before any sampling
/// - `NegativeSpectrum`: the spectrum returned a negative power on the grid
/// - `NonFiniteSpectrum`: the spectrum returned NaN or an infinity on the grid
/// - `SpectrumEvaluation`: the caller-supplied spectrum itself failed
/// - `ShapeMismatch`: two arrays that must share a shape do not
/// - `InvalidBins`: unusable wavenumber binning for spectrum estimation
/// - `InvalidModel`: out-of-range parameters for a named spectrum model
/// - `MissingParameter`: a configuration builder was finished too early
///
/// # Examples
/// ```
/// use grf_core::types::FieldError;
///
/// let err = FieldError::NegativeSpectrum { k: 0.5, value: -1.0 };
/// assert_eq!(
///     format!("{}", err),
///     "Power spectrum is negative (-1) at k = 0.5"
/// );
/// ```
#[derive(Debug, Error)]
pub enum FieldError {
    /// Grid shape or box dimensions are unusable.
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(#[from] DimensionError),

    /// Spectrum value below zero; its square root is undefined.
    #[error("Power spectrum is negative ({value}) at k = {k}")]
    NegativeSpectrum {
        /// Wavenumber at which the spectrum was evaluated.
        k: f64,
        /// The returned power.
        value: f64,
    },

    /// Spectrum value is NaN or infinite.
    #[error("Power spectrum is not finite ({value}) at k = {k}")]
    NonFiniteSpectrum {
        /// Wavenumber at which the spectrum was evaluated.
        k: f64,
        /// The returned power.
        value: f64,
    },

    /// The caller-supplied spectrum returned an error.
    #[error("Power spectrum evaluation failed at k = {k}: {source}")]
    SpectrumEvaluation {
        /// Wavenumber at which the spectrum was evaluated.
        k: f64,
        /// The caller's error, unmodified.
        #[source]
        source: SpectrumEvaluationError,
    },

    /// Array shapes disagree.
    #[error("Array shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// Expected shape.
        expected: Vec<usize>,
        /// Shape actually supplied.
        found: Vec<usize>,
    },

    /// Unusable wavenumber binning.
    #[error("Invalid wavenumber bins: {0}")]
    InvalidBins(String),

    /// Spectrum model parameters out of range.
    #[error("Invalid spectrum model: {0}")]
    InvalidModel(String),

    /// A required builder parameter was never set.
    #[error("Missing required parameter: {name}")]
    MissingParameter {
        /// The name of the missing parameter.
        name: &'static str,
    },
}

impl FieldError {
    /// Returns `true` for errors raised by grid or box validation.
    #[inline]
    pub fn is_invalid_dimensions(&self) -> bool {
        matches!(self, FieldError::InvalidDimensions(_))
    }
}
