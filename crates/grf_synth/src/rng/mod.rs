//! # Random Number Generation
//!
//! Seeded standard-normal sampling for the complex noise stage.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: a seed fixes the whole draw sequence
//! - **Explicit ownership**: the generator is a value passed into the noise
//!   stage, never a process-wide singleton
//! - **Efficiency**: batch fills into `&mut [f64]` slices
//!
//! ## Module Structure
//!
//! - `prng`: `StdRng` wrapper with seed bookkeeping
//!
//! ## Usage Example
//!
//! ```rust
//! use grf_synth::rng::FieldRng;
//!
//! let mut rng = FieldRng::from_optional_seed(Some(12345));
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::FieldRng;

#[cfg(test)]
mod tests;
