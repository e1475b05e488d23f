//! Zero-frequency shifts for FFT-ordered arrays.
//!
//! [`fftshift`] moves the zero-frequency cell from index 0 to the centre of
//! every axis; [`ifftshift`] undoes it. For even axis lengths the two are the
//! same permutation.

use ndarray::{ArrayD, Axis, Slice};

/// Rolls every axis so that `out[j] = input[(j + offset(n)) % n]`.
fn roll_axes<T, F>(input: &ArrayD<T>, offset: F) -> ArrayD<T>
where
    T: Clone,
    F: Fn(usize) -> usize,
{
    let mut current = input.clone();
    for axis in 0..input.ndim() {
        let n = current.len_of(Axis(axis));
        let k = offset(n) % n.max(1);
        if k == 0 {
            continue;
        }
        let mut rolled = current.clone();
        rolled
            .slice_axis_mut(Axis(axis), Slice::from(..n - k))
            .assign(&current.slice_axis(Axis(axis), Slice::from(k..)));
        rolled
            .slice_axis_mut(Axis(axis), Slice::from(n - k..))
            .assign(&current.slice_axis(Axis(axis), Slice::from(..k)));
        current = rolled;
    }
    current
}

/// Moves the zero-frequency cell of every axis to its centre.
///
/// Matches the conventional `fftshift`: along an axis of length `n` the cell
/// at index 0 ends up at index `n / 2`.
///
/// # Examples
/// ```
/// use grf_core::math::shift::fftshift;
/// use ndarray::{ArrayD, IxDyn};
///
/// let a = ArrayD::from_shape_vec(IxDyn(&[5]), vec![0, 1, 2, -2, -1]).unwrap();
/// let shifted = fftshift(&a);
/// assert_eq!(shifted.as_slice().unwrap(), &[-2, -1, 0, 1, 2]);
/// ```
pub fn fftshift<T: Clone>(input: &ArrayD<T>) -> ArrayD<T> {
    roll_axes(input, |n| n - n / 2)
}

/// Inverse of [`fftshift`]: moves the centre cell of every axis to index 0.
///
/// # Examples
/// ```
/// use grf_core::math::shift::ifftshift;
/// use ndarray::{ArrayD, IxDyn};
///
/// let a = ArrayD::from_shape_vec(IxDyn(&[5]), vec![-2, -1, 0, 1, 2]).unwrap();
/// let shifted = ifftshift(&a);
/// assert_eq!(shifted.as_slice().unwrap(), &[0, 1, 2, -2, -1]);
/// ```
pub fn ifftshift<T: Clone>(input: &ArrayD<T>) -> ArrayD<T> {
    roll_axes(input, |n| n / 2)
}
