//! # grf_synth: Gaussian Random Field Synthesis Engine
//!
//! ## Layer 2 (Engine) Role
//!
//! grf_synth turns a grid, a box and a power spectrum into a real field:
//! - Seeded random number generation (`rng`)
//! - Complex Fourier-space noise (`noise`)
//! - Spectral rescaling of the noise (`rescale`)
//! - N-dimensional inverse FFT and real projection (`transform`)
//! - The end-to-end pipeline and its builder (`generator`)
//! - Power spectrum estimation of realised fields (`estimate`)
//!
//! ## Usage Examples
//!
//! ```rust
//! use grf_core::models::SpectrumModel;
//! use grf_synth::estimate::{power_spectrum_1d, KBins};
//! use grf_synth::generate_field;
//!
//! let model = SpectrumModel::Lorentzian { amplitude: 1.0, softening: 1e-3 };
//! let field = generate_field(&[64, 64], 100.0, &model, Some(42)).unwrap();
//! assert_eq!(field.shape(), &[64, 64]);
//!
//! let profile = power_spectrum_1d(&field, 100.0, &KBins::Count(10)).unwrap();
//! assert_eq!(profile.len(), 10);
//! ```
//!
//! Closures work as spectra too:
//!
//! ```rust
//! use grf_synth::generate_field;
//!
//! let field = generate_field(&[16, 16, 16], [10.0, 10.0, 20.0], &|k: f64| k.powf(-2.0), Some(1))
//!     .unwrap();
//! assert_eq!(field.ndim(), 3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod estimate;
pub mod generator;
pub mod noise;
pub mod rescale;
pub mod rng;
pub mod transform;

pub use estimate::{
    power_spectrum_1d, power_spectrum_nd, radial_average, target_profile, KBins, RadialProfile,
};
pub use generator::{
    generate_field, generate_field_with_rng, FieldConfig, FieldConfigBuilder,
    GaussianFieldGenerator,
};
pub use rng::FieldRng;
