//! Core traits for spectrum evaluation.
//!
//! - [`PowerSpectrum`]: target spectrum `P(k)`, implemented for plain closures
//! - [`fallible`]: adapter for closures that return `Result`

pub mod spectrum;

pub use spectrum::{fallible, Fallible, PowerSpectrum};
