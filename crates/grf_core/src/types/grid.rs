//! Grid shape and physical box dimensions.
//!
//! - [`GridShape`]: validated cell counts per axis (rank 2 or 3)
//! - [`BoxDims`]: caller-facing box size, either one length for every axis or
//!   one length per axis
//! - [`BoxLengths`]: normalised box size, exactly one finite positive length
//!   per axis (see [`crate::math::wavenumber::normalize_box_dims`])

use std::fmt;

use ndarray::IxDyn;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::DimensionError;

/// Smallest supported grid rank.
pub const MIN_RANK: usize = 2;

/// Largest supported grid rank.
pub const MAX_RANK: usize = 3;

/// Number of cells along each axis of a 2D or 3D grid.
///
/// # Examples
/// ```
/// use grf_core::types::GridShape;
///
/// let shape = GridShape::new(&[64, 32]).unwrap();
/// assert_eq!(shape.rank(), 2);
/// assert_eq!(shape.n_cells(), 2048);
/// assert_eq!(shape.to_string(), "64x32");
///
/// assert!(GridShape::new(&[8]).is_err());
/// assert!(GridShape::new(&[8, 8, 8, 8]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<usize>", into = "Vec<usize>")
)]
pub struct GridShape {
    dims: Vec<usize>,
    n_cells: usize,
}

impl GridShape {
    /// Creates a grid shape, checking rank and axis lengths.
    ///
    /// # Errors
    ///
    /// Returns `DimensionError` if:
    /// - the rank is not 2 or 3
    /// - any axis has zero cells
    /// - the total cell count overflows `usize`
    pub fn new(dims: &[usize]) -> Result<Self, DimensionError> {
        if dims.len() < MIN_RANK || dims.len() > MAX_RANK {
            return Err(DimensionError::UnsupportedRank(dims.len()));
        }
        if let Some(axis) = dims.iter().position(|&n| n == 0) {
            return Err(DimensionError::EmptyAxis { axis });
        }
        let n_cells = dims
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .ok_or_else(|| DimensionError::CellCountOverflow {
                shape: dims.to_vec(),
            })?;

        Ok(Self {
            dims: dims.to_vec(),
            n_cells,
        })
    }

    /// Returns the number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Returns the cell count of every axis.
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Returns the total number of cells.
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.n_cells
    }

    /// Returns the shape as an `ndarray` dynamic dimension.
    #[inline]
    pub fn to_ixdyn(&self) -> IxDyn {
        IxDyn(&self.dims)
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.dims.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", parts.join("x"))
    }
}

impl TryFrom<Vec<usize>> for GridShape {
    type Error = DimensionError;

    fn try_from(dims: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(&dims)
    }
}

impl TryFrom<&[usize]> for GridShape {
    type Error = DimensionError;

    fn try_from(dims: &[usize]) -> Result<Self, Self::Error> {
        Self::new(dims)
    }
}

impl<const N: usize> TryFrom<[usize; N]> for GridShape {
    type Error = DimensionError;

    fn try_from(dims: [usize; N]) -> Result<Self, Self::Error> {
        Self::new(&dims)
    }
}

impl From<GridShape> for Vec<usize> {
    fn from(shape: GridShape) -> Self {
        shape.dims
    }
}

/// Physical size of the simulated box as supplied by the caller.
///
/// Either a single length shared by every axis or one length per axis.
/// A one-element `PerAxis` behaves like `Uniform`.
///
/// # Examples
/// ```
/// use grf_core::types::BoxDims;
///
/// assert_eq!(BoxDims::from(100.0), BoxDims::Uniform(100.0));
/// assert_eq!(
///     BoxDims::from([100.0, 50.0]),
///     BoxDims::PerAxis(vec![100.0, 50.0])
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum BoxDims {
    /// Same length along every axis.
    Uniform(f64),
    /// One length per axis.
    PerAxis(Vec<f64>),
}

impl From<f64> for BoxDims {
    fn from(length: f64) -> Self {
        BoxDims::Uniform(length)
    }
}

impl From<Vec<f64>> for BoxDims {
    fn from(lengths: Vec<f64>) -> Self {
        BoxDims::PerAxis(lengths)
    }
}

impl From<&[f64]> for BoxDims {
    fn from(lengths: &[f64]) -> Self {
        BoxDims::PerAxis(lengths.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for BoxDims {
    fn from(lengths: [f64; N]) -> Self {
        BoxDims::PerAxis(lengths.to_vec())
    }
}

impl fmt::Display for BoxDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoxDims::Uniform(length) => write!(f, "{}", length),
            BoxDims::PerAxis(lengths) => write!(f, "{:?}", lengths),
        }
    }
}

/// Normalised box size: one finite, positive length per axis.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BoxLengths(Vec<f64>);

impl BoxLengths {
    /// Creates box lengths from explicit per-axis values.
    ///
    /// No rank check is made here; rank agreement with a grid is enforced by
    /// [`crate::math::wavenumber::normalize_box_dims`].
    ///
    /// # Errors
    ///
    /// Returns `DimensionError::NonPositiveLength` for any length that is not
    /// finite and strictly positive, and `DimensionError::EmptyBox` for an
    /// empty list.
    pub fn new(lengths: Vec<f64>) -> Result<Self, DimensionError> {
        if lengths.is_empty() {
            return Err(DimensionError::EmptyBox);
        }
        for (axis, &value) in lengths.iter().enumerate() {
            if !(value.is_finite() && value > 0.0) {
                return Err(DimensionError::NonPositiveLength { axis, value });
            }
        }
        Ok(Self(lengths))
    }

    /// Returns the number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Returns the per-axis lengths.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Returns the box volume (product of all lengths).
    #[inline]
    pub fn volume(&self) -> f64 {
        self.0.iter().product()
    }

    /// Returns the shortest box length.
    #[inline]
    pub fn min_length(&self) -> f64 {
        self.0.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Dimension;
    use super::*;

    #[test]
    fn test_grid_shape_rank_two_and_three() {
        let shape = GridShape::new(&[64, 64]).unwrap();
        assert_eq!(shape.rank(), 2);
        assert_eq!(shape.n_cells(), 4096);

        let shape = GridShape::try_from([8, 4, 2]).unwrap();
        assert_eq!(shape.rank(), 3);
        assert_eq!(shape.dims(), &[8, 4, 2]);
        assert_eq!(shape.to_ixdyn().ndim(), 3);
    }

    #[test]
    fn test_grid_shape_rejects_rank() {
        assert_eq!(
            GridShape::new(&[16]),
            Err(DimensionError::UnsupportedRank(1))
        );
        assert_eq!(
            GridShape::new(&[2, 2, 2, 2]),
            Err(DimensionError::UnsupportedRank(4))
        );
        assert_eq!(GridShape::new(&[]), Err(DimensionError::UnsupportedRank(0)));
    }

    #[test]
    fn test_grid_shape_rejects_empty_axis() {
        assert_eq!(
            GridShape::new(&[4, 0]),
            Err(DimensionError::EmptyAxis { axis: 1 })
        );
    }

    #[test]
    fn test_grid_shape_rejects_overflow() {
        let result = GridShape::new(&[usize::MAX, 2]);
        assert!(matches!(
            result,
            Err(DimensionError::CellCountOverflow { .. })
        ));
    }

    #[test]
    fn test_grid_shape_display() {
        let shape = GridShape::new(&[32, 16, 8]).unwrap();
        assert_eq!(format!("{}", shape), "32x16x8");
    }

    #[test]
    fn test_box_dims_conversions() {
        assert_eq!(BoxDims::from(2.5), BoxDims::Uniform(2.5));
        assert_eq!(
            BoxDims::from(vec![1.0, 2.0]),
            BoxDims::PerAxis(vec![1.0, 2.0])
        );
        let slice: &[f64] = &[3.0, 4.0, 5.0];
        assert_eq!(BoxDims::from(slice), BoxDims::PerAxis(vec![3.0, 4.0, 5.0]));
    }

    #[test]
    fn test_box_lengths_volume() {
        let lengths = BoxLengths::new(vec![2.0, 3.0, 4.0]).unwrap();
        assert_eq!(lengths.rank(), 3);
        assert_eq!(lengths.volume(), 24.0);
        assert_eq!(lengths.min_length(), 2.0);
    }

    #[test]
    fn test_box_lengths_reject_non_positive() {
        assert_eq!(
            BoxLengths::new(vec![1.0, 0.0]),
            Err(DimensionError::NonPositiveLength {
                axis: 1,
                value: 0.0
            })
        );
        assert!(BoxLengths::new(vec![f64::NAN]).is_err());
        assert!(BoxLengths::new(vec![f64::INFINITY, 1.0]).is_err());
        assert_eq!(BoxLengths::new(vec![]), Err(DimensionError::EmptyBox));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip_shapes() {
        let shape: GridShape = serde_json::from_str("[64, 32]").unwrap();
        assert_eq!(shape.dims(), &[64, 32]);
        assert!(serde_json::from_str::<GridShape>("[64]").is_err());

        let uniform: BoxDims = serde_json::from_str("100.0").unwrap();
        assert_eq!(uniform, BoxDims::Uniform(100.0));
        let per_axis: BoxDims = serde_json::from_str("[100.0, 50.0]").unwrap();
        assert_eq!(per_axis, BoxDims::PerAxis(vec![100.0, 50.0]));
    }
}
