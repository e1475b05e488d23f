//! Core grid and error types.
//!
//! This module provides:
//! - `grid`: grid shape, caller-facing box dimensions and normalised box lengths
//! - `error`: structured error types for dimension validation and field synthesis
//!
//! # Re-exports
//!
//! - [`GridShape`], [`BoxDims`], [`BoxLengths`], [`MIN_RANK`], [`MAX_RANK`] from `grid`
//! - [`FieldError`], [`DimensionError`], [`SpectrumEvaluationError`] from `error`

pub mod error;
pub mod grid;

pub use error::{DimensionError, FieldError, SpectrumEvaluationError};
pub use grid::{BoxDims, BoxLengths, GridShape, MAX_RANK, MIN_RANK};
