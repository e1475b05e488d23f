//! Named power spectrum models.
//!
//! - [`SpectrumModel`]: static-dispatch enum over closed-form spectra
//!   (flat, power law, Lorentzian, Gaussian), validated before use and
//!   deserialisable from configuration when the `serde` feature is enabled.

pub mod spectrum_model;

pub use spectrum_model::SpectrumModel;
