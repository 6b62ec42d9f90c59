//! Concatenation along an existing axis.

use std::iter;

use crate::access_pattern::{SliceSpec, concat_shape};
use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::storage::TensorStorage;
use crate::tensor::Tensor;

impl<ElT: Scalar, StoreT: TensorStorage<ElT>> Tensor<ElT, StoreT> {
    /// Join this tensor and `others`, in that order, along `axis`.
    ///
    /// The result owns a fresh contiguous buffer. Each operand is written
    /// into a view of the result covering its range along `axis`.
    ///
    /// # Errors
    ///
    /// - `TensorError::InvalidAxis` if `axis` is out of range.
    /// - `TensorError::ShapeMismatch` if the operands disagree in rank or in
    ///   any extent other than `axis`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndstrided::{DenseTensor, Tensor};
    ///
    /// let a: DenseTensor<i32> = Tensor::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
    /// let b: DenseTensor<i32> = Tensor::from_vec(vec![5, 6], &[2, 1]).unwrap();
    /// let c = a.concat(1, &[&b]).unwrap();
    /// assert_eq!(c.shape(), &[2, 3]);
    /// assert_eq!(c.to_vec(), vec![1, 2, 5, 3, 4, 6]);
    /// ```
    pub fn concat(&self, axis: usize, others: &[&Self]) -> Result<Self, TensorError> {
        let shapes: Vec<&[usize]> = iter::once(self)
            .chain(others.iter().copied())
            .map(|t| t.shape())
            .collect();
        let new_shape = concat_shape(axis, &shapes)?;
        let result = Self::zeros(&new_shape);

        let mut start = 0;
        for operand in iter::once(self).chain(others.iter().copied()) {
            let end = start + operand.shape()[axis];
            if end > start {
                let mut slices = vec![None; axis + 1];
                slices[axis] = Some(SliceSpec::range(start, end));
                let mut region = result.slice(&slices)?;
                region.assign(operand)?;
            }
            start = end;
        }
        Ok(result)
    }
}
