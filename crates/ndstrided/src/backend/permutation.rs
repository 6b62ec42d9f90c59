//! Permutation backend trait and the index map it works from.

use crate::error::TensorError;
use crate::pool;
use crate::scalar::Scalar;
use crate::storage::TensorStorage;
use crate::strides::{compute_strides_into, row_major_coords_into, validate_permutation};

/// Where each element of a row-major buffer goes when its axes are permuted.
///
/// The element at physical index `i` of a buffer laid out row-major over
/// `source_shape` belongs at [`destination(i)`](Self::destination) of a
/// row-major buffer over the target shape `source_shape[axes[k]]`.
#[derive(Debug)]
pub struct TransposePlan {
    source_shape: Vec<usize>,
    axes: Vec<usize>,
    target_strides: Vec<usize>,
}

impl TransposePlan {
    /// Plan the permutation `axes` of a row-major buffer over `source_shape`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::InvalidPermutation` if `axes` is not a
    /// permutation of `0..source_shape.len()`.
    pub fn new(source_shape: &[usize], axes: &[usize]) -> Result<Self, TensorError> {
        validate_permutation(axes, source_shape.len())?;
        Ok(Self::from_validated(source_shape, axes))
    }

    /// Plan for axes already known to be a valid permutation.
    pub(crate) fn from_validated(source_shape: &[usize], axes: &[usize]) -> Self {
        let mut target_shape = pool::borrow_ints(axes.len());
        for (t, &a) in target_shape.iter_mut().zip(axes) {
            *t = source_shape[a];
        }
        let mut target_strides = pool::borrow_ints(axes.len());
        compute_strides_into(&target_shape, &mut target_strides);
        pool::return_ints(target_shape);

        Self {
            source_shape: source_shape.to_vec(),
            axes: axes.to_vec(),
            target_strides,
        }
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    /// Number of elements being permuted.
    pub fn size(&self) -> usize {
        self.source_shape.iter().product()
    }

    pub fn source_shape(&self) -> &[usize] {
        &self.source_shape
    }

    pub fn axes(&self) -> &[usize] {
        &self.axes
    }

    /// Shape of the permuted buffer.
    pub fn target_shape(&self) -> Vec<usize> {
        self.axes.iter().map(|&a| self.source_shape[a]).collect()
    }

    pub fn target_strides(&self) -> &[usize] {
        &self.target_strides
    }

    /// Target index of the element at source index `i`.
    ///
    /// `coords` is scratch of length [`ndim`](Self::ndim).
    #[inline]
    pub fn destination(&self, i: usize, coords: &mut [usize]) -> usize {
        row_major_coords_into(i, &self.source_shape, coords);
        self.axes
            .iter()
            .zip(self.target_strides.iter())
            .map(|(&a, &s)| coords[a] * s)
            .sum()
    }
}

impl Drop for TransposePlan {
    fn drop(&mut self) {
        pool::return_ints(std::mem::take(&mut self.target_strides));
    }
}

/// Backend trait for physically permuting a storage buffer.
///
/// Implementations may trade memory for speed, but all of them leave the
/// storage holding the row-major layout of the plan's target shape.
pub trait PermutationBackend {
    /// Permute `storage` in place according to `plan`.
    ///
    /// `storage` must hold exactly `plan.size()` elements in row-major order
    /// over `plan.source_shape()`.
    fn permute_in_place<ElT: Scalar, S: TensorStorage<ElT>>(storage: &mut S, plan: &TransposePlan);
}
