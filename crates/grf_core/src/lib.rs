//! # grf_core: Foundation for Gaussian Random Field Synthesis
//!
//! ## Layer 1 (Foundation) Role
//!
//! grf_core is the bottom layer of the workspace, providing:
//! - Grid and box types: `GridShape`, `BoxDims`, `BoxLengths` (`types::grid`)
//! - Error types: `FieldError`, `DimensionError` (`types::error`)
//! - Wavenumber grids and box normalisation (`math::wavenumber`)
//! - Zero-frequency shifts (`math::shift`)
//! - The `PowerSpectrum` trait (`traits`)
//! - Named analytic spectra: `SpectrumModel` (`models`)
//!
//! Everything here is pure: no random numbers, no transforms, no I/O. The
//! synthesis pipeline lives in `grf_synth`.
//!
//! ## Usage Examples
//!
//! ```rust
//! use grf_core::math::wavenumber::{k_components_and_magnitude, normalize_box_dims};
//! use grf_core::types::{BoxDims, GridShape};
//!
//! let shape = GridShape::new(&[64, 64]).unwrap();
//! let lengths = normalize_box_dims(&BoxDims::Uniform(100.0), shape.dims()).unwrap();
//! let grid = k_components_and_magnitude(shape.dims(), &lengths).unwrap();
//!
//! assert_eq!(grid.magnitude.shape(), &[64, 64]);
//! assert_eq!(lengths.volume(), 10_000.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialisation for `GridShape`, `BoxDims` and `SpectrumModel`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod models;
pub mod traits;
pub mod types;
