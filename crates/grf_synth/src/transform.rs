//! N-dimensional FFT wrappers around rustfft, and the real-space projection.
//!
//! Convention matches the usual array-programming one:
//! - Forward FFT (`forward_fftn`): unnormalised
//! - Inverse FFT (`inverse_fftn`): normalised by `1/N`, `N` = total cell count
//!
//! rustfft itself never normalises, so the `1/N` is applied here.

use grf_core::math::ifftshift;
use ndarray::{ArrayD, Axis};
use num_complex::Complex64;
use rustfft::{FftDirection, FftPlanner};

/// Applies a 1D transform along every axis of `data`, in place.
fn transform_axes(data: &mut ArrayD<Complex64>, direction: FftDirection) {
    let mut planner = FftPlanner::<f64>::new();
    let zero = Complex64::new(0.0, 0.0);

    for axis in 0..data.ndim() {
        let n = data.len_of(Axis(axis));
        if n <= 1 {
            continue;
        }
        let fft = planner.plan_fft(n, direction);
        let mut buffer = vec![zero; n];
        let mut scratch = vec![zero; fft.get_inplace_scratch_len()];

        // Lanes along non-final axes are strided; copy through a contiguous buffer.
        for mut lane in data.lanes_mut(Axis(axis)) {
            for (b, v) in buffer.iter_mut().zip(lane.iter()) {
                *b = *v;
            }
            fft.process_with_scratch(&mut buffer, &mut scratch);
            for (v, b) in lane.iter_mut().zip(buffer.iter()) {
                *v = *b;
            }
        }
    }
}

/// Forward FFT over every axis, unnormalised.
pub fn forward_fftn(data: &mut ArrayD<Complex64>) {
    transform_axes(data, FftDirection::Forward);
}

/// Inverse FFT over every axis, normalised by `1/N`.
pub fn inverse_fftn(data: &mut ArrayD<Complex64>) {
    transform_axes(data, FftDirection::Inverse);
    if data.is_empty() {
        return;
    }
    let norm = 1.0 / data.len() as f64;
    data.mapv_inplace(|z| z * norm);
}

/// Keeps the real part of every cell and discards the imaginary part.
pub fn project_real(data: &ArrayD<Complex64>) -> ArrayD<f64> {
    data.mapv(|z| z.re)
}

/// Moves a centred Fourier field back to real space.
///
/// The centre cell of every axis (the zero-frequency mode in centred layout)
/// is shifted to index 0, the inverse FFT is applied over all axes, and the
/// real part is returned. No scaling beyond the inverse FFT's `1/N`.
pub fn to_real_space(centred: &ArrayD<Complex64>) -> ArrayD<f64> {
    let mut field = ifftshift(centred);
    inverse_fftn(&mut field);
    project_real(&field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::IxDyn;
    use std::f64::consts::PI;

    fn ramp(shape: &[usize]) -> ArrayD<Complex64> {
        let mut i: f64 = 0.0;
        ArrayD::from_shape_fn(IxDyn(shape), |_| {
            i += 1.0;
            Complex64::new(i.sin(), (0.5 * i).cos())
        })
    }

    /// Direct O(N²) DFT for cross-checking small grids.
    fn naive_dft(input: &ArrayD<Complex64>, sign: f64) -> ArrayD<Complex64> {
        let shape = input.shape().to_vec();
        ArrayD::from_shape_fn(IxDyn(&shape), |out_idx| {
            let mut acc = Complex64::new(0.0, 0.0);
            for (in_idx, &v) in input.indexed_iter() {
                let mut phase = 0.0;
                for axis in 0..shape.len() {
                    phase += (out_idx[axis] * in_idx[axis]) as f64 / shape[axis] as f64;
                }
                acc += v * Complex64::from_polar(1.0, sign * 2.0 * PI * phase);
            }
            acc
        })
    }

    #[test]
    fn test_roundtrip_three_dimensional() {
        let original = ramp(&[4, 6, 5]);
        let mut data = original.clone();
        forward_fftn(&mut data);
        inverse_fftn(&mut data);

        for (a, b) in data.iter().zip(original.iter()) {
            assert_relative_eq!(a.re, b.re, epsilon = 1e-10);
            assert_relative_eq!(a.im, b.im, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_forward_matches_naive_dft() {
        let input = ramp(&[3, 4]);
        let mut fast = input.clone();
        forward_fftn(&mut fast);
        let slow = naive_dft(&input, -1.0);

        for (a, b) in fast.iter().zip(slow.iter()) {
            assert_relative_eq!(a.re, b.re, epsilon = 1e-9);
            assert_relative_eq!(a.im, b.im, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_inverse_is_normalised() {
        let n = 8;
        let mut data = ArrayD::from_elem(IxDyn(&[n, n]), Complex64::new(0.0, 0.0));
        data[[0, 0]] = Complex64::new((n * n) as f64, 0.0);
        inverse_fftn(&mut data);

        // A DC-only spectrum of N becomes a constant field of 1.
        for z in data.iter() {
            assert_relative_eq!(z.re, 1.0, epsilon = 1e-12);
            assert_relative_eq!(z.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_project_real_discards_imaginary_part() {
        let data = ArrayD::from_shape_vec(
            IxDyn(&[2, 2]),
            vec![
                Complex64::new(1.0, 5.0),
                Complex64::new(-2.0, -3.0),
                Complex64::new(0.5, 1e6),
                Complex64::new(0.0, -1.0),
            ],
        )
        .unwrap();
        let real = project_real(&data);
        assert_eq!(real.as_slice().unwrap(), &[1.0, -2.0, 0.5, 0.0]);
        assert_eq!(real.shape(), &[2, 2]);
    }

    #[test]
    fn test_to_real_space_uses_centre_as_zero_mode() {
        let n = 6;
        let mut centred = ArrayD::from_elem(IxDyn(&[n, n]), Complex64::new(0.0, 0.0));
        // Centre cell of a centred layout is the zero-frequency mode.
        centred[[n / 2, n / 2]] = Complex64::new(36.0, 0.0);

        let field = to_real_space(&centred);
        for &v in field.iter() {
            assert_relative_eq!(v, 1.0, epsilon = 1e-12);
        }
    }
}
