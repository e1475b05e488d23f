//! Complex Gaussian noise in Fourier space.
//!
//! Real and imaginary parts come from two separate full-grid draws: first
//! every real part in row-major order, then every imaginary part. Each part
//! is N(0, 1), so `E|z|² = 2` per cell. The synthesis normalisation relies
//! on that variance; do not replace this with a single complex-normal draw.

use grf_core::types::GridShape;
use ndarray::ArrayD;
use num_complex::Complex64;

use crate::rng::FieldRng;

/// Draws a complex field of `shape` with independent N(0, 1) real and
/// imaginary parts.
///
/// # Examples
///
/// ```rust
/// use grf_core::types::GridShape;
/// use grf_synth::noise::complex_noise;
/// use grf_synth::rng::FieldRng;
///
/// let shape = GridShape::new(&[8, 8]).unwrap();
/// let mut rng = FieldRng::from_seed(42);
/// let noise = complex_noise(&shape, &mut rng);
/// assert_eq!(noise.shape(), &[8, 8]);
/// ```
pub fn complex_noise(shape: &GridShape, rng: &mut FieldRng) -> ArrayD<Complex64> {
    let n = shape.n_cells();

    let mut real = vec![0.0; n];
    rng.fill_normal(&mut real);
    let mut imag = vec![0.0; n];
    rng.fill_normal(&mut imag);

    let mut field = ArrayD::from_elem(shape.to_ixdyn(), Complex64::new(0.0, 0.0));
    for (z, (&re, &im)) in field.iter_mut().zip(real.iter().zip(imag.iter())) {
        *z = Complex64::new(re, im);
    }
    field
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_shape() {
        let shape = GridShape::new(&[4, 6, 2]).unwrap();
        let noise = complex_noise(&shape, &mut FieldRng::from_seed(1));
        assert_eq!(noise.shape(), &[4, 6, 2]);
    }

    #[test]
    fn test_real_parts_drawn_before_imaginary_parts() {
        let shape = GridShape::new(&[3, 5]).unwrap();
        let noise = complex_noise(&shape, &mut FieldRng::from_seed(11));

        let mut reference = FieldRng::from_seed(11);
        let mut expected = vec![0.0; 30];
        reference.fill_normal(&mut expected);

        for (i, z) in noise.iter().enumerate() {
            assert_eq!(z.re, expected[i]);
            assert_eq!(z.im, expected[15 + i]);
        }
    }

    #[test]
    fn test_noise_moments() {
        let shape = GridShape::new(&[128, 128]).unwrap();
        let noise = complex_noise(&shape, &mut FieldRng::from_seed(3));
        let n = shape.n_cells() as f64;

        let mean_re = noise.iter().map(|z| z.re).sum::<f64>() / n;
        let mean_im = noise.iter().map(|z| z.im).sum::<f64>() / n;
        let power = noise.iter().map(|z| z.norm_sqr()).sum::<f64>() / n;

        assert!(mean_re.abs() < 0.05, "mean real part {}", mean_re);
        assert!(mean_im.abs() < 0.05, "mean imaginary part {}", mean_im);
        assert!((power - 2.0).abs() < 0.1, "mean |z|^2 {}", power);
    }
}
