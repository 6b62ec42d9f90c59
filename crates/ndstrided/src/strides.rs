//! Stride computation and coordinate translation.
//!
//! Uses row-major (C) order: the last axis is the fastest-varying one.

use crate::error::TensorError;

/// Compute row-major strides from shape.
///
/// For shape [d0, d1, d2], returns strides [d1*d2, d2, 1].
///
/// # Examples
///
/// ```
/// use ndstrided::strides::compute_strides;
///
/// assert_eq!(compute_strides(&[3, 4, 5]), vec![20, 5, 1]);
/// assert_eq!(compute_strides(&[2, 3]), vec![3, 1]);
/// assert_eq!(compute_strides(&[5]), vec![1]);
/// assert_eq!(compute_strides(&[]), Vec::<usize>::new());
/// ```
pub fn compute_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![0; shape.len()];
    compute_strides_into(shape, &mut strides);
    strides
}

/// Write row-major strides for `shape` into `strides`.
///
/// `strides` must have the same length as `shape`.
pub(crate) fn compute_strides_into(shape: &[usize], strides: &mut [usize]) {
    debug_assert_eq!(shape.len(), strides.len());
    let mut stride = 1;
    for (s, &dim) in strides.iter_mut().zip(shape.iter()).rev() {
        *s = stride;
        stride *= dim;
    }
}

/// Convert coordinates to a linear offset: the dot product of `coords` and
/// `strides`.
///
/// # Errors
///
/// Returns `TensorError::DimensionMismatch` if `coords` and `shape` have
/// different lengths.
///
/// # Examples
///
/// ```
/// use ndstrided::strides::{compute_strides, offset_of};
///
/// let shape = [3, 4, 5];
/// let strides = compute_strides(&shape);
/// assert_eq!(offset_of(&shape, &strides, &[1, 2, 3]).unwrap(), 20 + 10 + 3);
/// assert!(offset_of(&shape, &strides, &[1, 2]).is_err());
/// ```
pub fn offset_of(
    shape: &[usize],
    strides: &[usize],
    coords: &[usize],
) -> Result<usize, TensorError> {
    if coords.len() != shape.len() {
        return Err(TensorError::DimensionMismatch {
            expected: shape.len(),
            actual: coords.len(),
        });
    }
    Ok(dot(coords, strides))
}

#[inline]
pub(crate) fn dot(coords: &[usize], strides: &[usize]) -> usize {
    coords
        .iter()
        .zip(strides.iter())
        .map(|(&c, &s)| c * s)
        .sum()
}

/// Convert a linear offset back to coordinates.
///
/// Axes are divided out in decreasing stride order, so this is the exact
/// inverse of [`offset_of`] for row-major strides and for any axis
/// permutation of them. Sliced (gapped) strides are not invertible in general.
///
/// # Errors
///
/// Returns `TensorError::DimensionMismatch` if `shape` and `strides` have
/// different lengths.
///
/// # Examples
///
/// ```
/// use ndstrided::strides::{compute_strides, coords_of};
///
/// let shape = [3, 4, 5];
/// let strides = compute_strides(&shape);
/// assert_eq!(coords_of(33, &shape, &strides).unwrap(), vec![1, 2, 3]);
/// ```
pub fn coords_of(
    offset: usize,
    shape: &[usize],
    strides: &[usize],
) -> Result<Vec<usize>, TensorError> {
    if shape.len() != strides.len() {
        return Err(TensorError::DimensionMismatch {
            expected: shape.len(),
            actual: strides.len(),
        });
    }
    let mut coords = vec![0; shape.len()];

    let mut order: Vec<usize> = (0..shape.len()).collect();
    // Stable, so equal strides (unit extents) keep axis order.
    order.sort_by(|&a, &b| strides[b].cmp(&strides[a]));

    let mut rem = offset;
    for axis in order {
        if strides[axis] == 0 || shape[axis] <= 1 {
            continue;
        }
        coords[axis] = rem / strides[axis];
        rem %= strides[axis];
    }
    Ok(coords)
}

/// Decode `offset` into `coords` for a row-major layout of `shape`.
///
/// Allocation-free variant used on hot paths.
#[inline]
pub(crate) fn row_major_coords_into(mut offset: usize, shape: &[usize], coords: &mut [usize]) {
    for (c, &dim) in coords.iter_mut().zip(shape.iter()).rev() {
        if dim == 0 {
            *c = 0;
            continue;
        }
        *c = offset % dim;
        offset /= dim;
    }
}

/// Apply an axis permutation to coordinates: `result[i] = coords[perm[i]]`.
///
/// Translates coordinates from an array's original space into its transposed
/// space.
///
/// # Errors
///
/// Returns `TensorError::DimensionMismatch` on a length mismatch and
/// `TensorError::InvalidPermutation` when an entry of `perm` is out of range.
///
/// # Examples
///
/// ```
/// use ndstrided::strides::apply_permutation;
///
/// assert_eq!(apply_permutation(&[2, 0, 1], &[7, 8, 9]).unwrap(), vec![9, 7, 8]);
/// ```
pub fn apply_permutation(perm: &[usize], coords: &[usize]) -> Result<Vec<usize>, TensorError> {
    if perm.len() != coords.len() {
        return Err(TensorError::DimensionMismatch {
            expected: coords.len(),
            actual: perm.len(),
        });
    }
    perm.iter()
        .map(|&p| {
            coords.get(p).copied().ok_or_else(|| TensorError::InvalidPermutation {
                perm: perm.to_vec(),
                ndim: coords.len(),
            })
        })
        .collect()
}

/// Validate that `perm` is a permutation of `0..ndim`.
pub(crate) fn validate_permutation(perm: &[usize], ndim: usize) -> Result<(), TensorError> {
    let invalid = || TensorError::InvalidPermutation {
        perm: perm.to_vec(),
        ndim,
    };

    if perm.len() != ndim {
        return Err(invalid());
    }

    let mut seen = vec![false; ndim];
    for &p in perm {
        if p >= ndim || seen[p] {
            return Err(invalid());
        }
        seen[p] = true;
    }

    Ok(())
}
