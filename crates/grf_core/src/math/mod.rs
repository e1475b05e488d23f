//! Mathematical helpers for spectral grids.
//!
//! - `wavenumber`: box-dimension normalisation and discrete Fourier wavenumber grids
//! - `shift`: zero-frequency centring shifts (`fftshift` / `ifftshift`)

pub mod shift;
pub mod wavenumber;

pub use shift::{fftshift, ifftshift};
pub use wavenumber::{
    fft_frequencies, k_components_and_magnitude, normalize_box_dims, WavenumberGrid,
};
