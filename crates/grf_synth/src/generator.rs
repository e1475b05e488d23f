//! Gaussian random field generation.
//!
//! Pipeline, run once per call:
//!   1. Validate the grid shape and normalise the box dimensions.
//!   2. Draw complex N(0, 1) noise (real parts, then imaginary parts).
//!   3. Build the radial wavenumber grid and centre it.
//!   4. Rescale the noise by `sqrt(P(k) / scale_factor)`.
//!   5. Shift the zero mode back to index 0, inverse FFT, keep the real part.
//!
//! Validation failures surface before any random number is drawn.

use grf_core::math::{fftshift, k_components_and_magnitude, normalize_box_dims};
use grf_core::traits::PowerSpectrum;
use grf_core::types::{BoxDims, BoxLengths, FieldError, GridShape};
use ndarray::ArrayD;
use tracing::debug;

use crate::noise::complex_noise;
use crate::rescale::{rescale, scale_factor};
use crate::rng::FieldRng;
use crate::transform::to_real_space;

/// Generates a real Gaussian random field with the given power spectrum.
///
/// # Arguments
///
/// * `grid_shape` - Cells per axis; 2 or 3 positive entries
/// * `box_dims` - Physical box size: one length, or one per axis
/// * `power_spectrum` - Target spectrum `P(k)`; evaluated only at `k >= 1e-6`
/// * `seed` - `Some` for a reproducible field, `None` for OS entropy
///
/// # Errors
///
/// Returns `FieldError` if:
/// - the grid rank is not 2 or 3, an axis is empty, or the box dimensions
///   cannot be normalised (`InvalidDimensions`, raised before sampling)
/// - the spectrum fails, or returns a negative or non-finite value
///
/// # Examples
///
/// ```rust
/// use grf_synth::generate_field;
///
/// let spectrum = |k: f64| 1.0 / (k * k + 1e-3);
/// let a = generate_field(&[64, 64], 100.0, &spectrum, Some(42)).unwrap();
/// let b = generate_field(&[64, 64], 100.0, &spectrum, Some(42)).unwrap();
///
/// assert_eq!(a.shape(), &[64, 64]);
/// assert_eq!(a, b);
/// ```
pub fn generate_field<S>(
    grid_shape: &[usize],
    box_dims: impl Into<BoxDims>,
    power_spectrum: &S,
    seed: Option<u64>,
) -> Result<ArrayD<f64>, FieldError>
where
    S: PowerSpectrum + ?Sized,
{
    let shape = GridShape::new(grid_shape)?;
    let lengths = normalize_box_dims(&box_dims.into(), shape.dims())?;
    let mut rng = FieldRng::from_optional_seed(seed);
    synthesise(&shape, &lengths, power_spectrum, &mut rng)
}

/// Like [`generate_field`], drawing from a caller-owned generator.
///
/// Consecutive calls on the same `rng` produce independent realisations.
///
/// # Errors
///
/// Same as [`generate_field`].
pub fn generate_field_with_rng<S>(
    grid_shape: &[usize],
    box_dims: impl Into<BoxDims>,
    power_spectrum: &S,
    rng: &mut FieldRng,
) -> Result<ArrayD<f64>, FieldError>
where
    S: PowerSpectrum + ?Sized,
{
    let shape = GridShape::new(grid_shape)?;
    let lengths = normalize_box_dims(&box_dims.into(), shape.dims())?;
    synthesise(&shape, &lengths, power_spectrum, rng)
}

fn synthesise<S>(
    shape: &GridShape,
    lengths: &BoxLengths,
    power_spectrum: &S,
    rng: &mut FieldRng,
) -> Result<ArrayD<f64>, FieldError>
where
    S: PowerSpectrum + ?Sized,
{
    debug!(
        shape = %shape,
        box_volume = lengths.volume(),
        seed = ?rng.seed(),
        "generating gaussian random field"
    );

    let mut noise = complex_noise(shape, rng);

    let grid = k_components_and_magnitude(shape.dims(), lengths)?;
    let k = fftshift(&grid.magnitude);

    rescale(&mut noise, k, lengths, power_spectrum)?;

    Ok(to_real_space(&noise))
}

/// Validated field generation settings.
///
/// Use [`FieldConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use grf_synth::FieldConfig;
///
/// let config = FieldConfig::builder()
///     .grid_shape(&[32, 32, 32])
///     .box_dims([50.0, 50.0, 100.0])
///     .seed(7)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.grid_shape().n_cells(), 32 * 32 * 32);
/// assert_eq!(config.seed(), Some(7));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    grid_shape: GridShape,
    box_lengths: BoxLengths,
    seed: Option<u64>,
}

impl FieldConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> FieldConfigBuilder {
        FieldConfigBuilder::default()
    }

    /// Returns the grid shape.
    #[inline]
    pub fn grid_shape(&self) -> &GridShape {
        &self.grid_shape
    }

    /// Returns the normalised box lengths.
    #[inline]
    pub fn box_lengths(&self) -> &BoxLengths {
        &self.box_lengths
    }

    /// Returns the optional seed.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns `pixel_volume² / box_volume` for this grid.
    #[inline]
    pub fn scale_factor(&self) -> f64 {
        scale_factor(&self.box_lengths, self.grid_shape.n_cells())
    }
}

/// Builder for [`FieldConfig`].
#[derive(Clone, Debug, Default)]
pub struct FieldConfigBuilder {
    grid_shape: Option<Vec<usize>>,
    box_dims: Option<BoxDims>,
    seed: Option<u64>,
}

impl FieldConfigBuilder {
    /// Sets the number of cells per axis.
    #[inline]
    pub fn grid_shape(mut self, dims: &[usize]) -> Self {
        self.grid_shape = Some(dims.to_vec());
        self
    }

    /// Sets the physical box size.
    #[inline]
    pub fn box_dims(mut self, box_dims: impl Into<BoxDims>) -> Self {
        self.box_dims = Some(box_dims.into());
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[inline]
    pub fn optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `FieldError` if:
    /// - `grid_shape` or `box_dims` was not set (`MissingParameter`)
    /// - either fails validation (`InvalidDimensions`)
    pub fn build(self) -> Result<FieldConfig, FieldError> {
        let dims = self
            .grid_shape
            .ok_or(FieldError::MissingParameter { name: "grid_shape" })?;
        let box_dims = self
            .box_dims
            .ok_or(FieldError::MissingParameter { name: "box_dims" })?;

        let grid_shape = GridShape::new(&dims)?;
        let box_lengths = normalize_box_dims(&box_dims, grid_shape.dims())?;

        Ok(FieldConfig {
            grid_shape,
            box_lengths,
            seed: self.seed,
        })
    }
}

/// Reusable generator bound to one [`FieldConfig`].
///
/// # Examples
///
/// ```rust
/// use grf_core::models::SpectrumModel;
/// use grf_synth::{FieldConfig, GaussianFieldGenerator};
///
/// let config = FieldConfig::builder()
///     .grid_shape(&[16, 16])
///     .box_dims(10.0)
///     .seed(1)
///     .build()
///     .unwrap();
/// let generator = GaussianFieldGenerator::new(config);
///
/// let field = generator.generate(&SpectrumModel::Flat { amplitude: 1.0 }).unwrap();
/// assert_eq!(field.shape(), &[16, 16]);
/// ```
#[derive(Clone, Debug)]
pub struct GaussianFieldGenerator {
    config: FieldConfig,
}

impl GaussianFieldGenerator {
    /// Creates a generator for a validated configuration.
    #[inline]
    pub fn new(config: FieldConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Generates one field, seeding a fresh generator from the configuration.
    ///
    /// With a seed set, every call returns the same field.
    ///
    /// # Errors
    ///
    /// Returns `FieldError` if the spectrum fails or returns a negative or
    /// non-finite value.
    pub fn generate<S>(&self, power_spectrum: &S) -> Result<ArrayD<f64>, FieldError>
    where
        S: PowerSpectrum + ?Sized,
    {
        let mut rng = FieldRng::from_optional_seed(self.config.seed);
        self.generate_with_rng(power_spectrum, &mut rng)
    }

    /// Generates one field from a caller-owned generator.
    ///
    /// # Errors
    ///
    /// Same as [`GaussianFieldGenerator::generate`].
    pub fn generate_with_rng<S>(
        &self,
        power_spectrum: &S,
        rng: &mut FieldRng,
    ) -> Result<ArrayD<f64>, FieldError>
    where
        S: PowerSpectrum + ?Sized,
    {
        synthesise(
            &self.config.grid_shape,
            &self.config.box_lengths,
            power_spectrum,
            rng,
        )
    }
}
