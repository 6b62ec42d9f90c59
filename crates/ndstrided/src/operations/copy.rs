//! Tensor copy operations.

use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::storage::TensorStorage;
use crate::tensor::Tensor;

impl<ElT: Scalar, StoreT: TensorStorage<ElT>> Tensor<ElT, StoreT> {
    /// Bulk-copy this tensor's buffer into `dest`'s, in physical order.
    ///
    /// Only element counts have to agree; `dest` keeps its own layout.
    /// Copying a tensor onto the same region with the same layout does
    /// nothing.
    ///
    /// # Errors
    ///
    /// - `TensorError::SizeMismatch` if the element counts differ.
    /// - `TensorError::NotImplemented` if either buffer is not laid out
    ///   contiguously (a strided view).
    ///
    /// # Examples
    ///
    /// ```
    /// use ndstrided::{DenseTensor, Tensor};
    ///
    /// let src: DenseTensor<f64> = Tensor::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
    /// let mut dst: DenseTensor<f64> = Tensor::zeros(&[3]);
    /// src.copy_to(&mut dst).unwrap();
    /// assert_eq!(dst.to_vec(), vec![1.0, 2.0, 3.0]);
    /// ```
    pub fn copy_to(&self, dest: &mut Self) -> Result<(), TensorError> {
        if self.len() != dest.len() {
            return Err(TensorError::SizeMismatch {
                expected: self.len(),
                actual: dest.len(),
            });
        }
        if self.storage.same_region(&dest.storage) && self.ap == dest.ap {
            return Ok(());
        }
        if !self.is_physically_contiguous() || !dest.is_physically_contiguous() {
            return Err(TensorError::NotImplemented {
                operation: "copy_to",
                what: "strided views",
            });
        }
        dest.storage.copy_from(&self.storage);
        Ok(())
    }

    /// Element-wise assignment from `src` in logical order.
    ///
    /// Works for any combination of views and pending transposes. Used to
    /// fill the destination regions of [`concat`](Self::concat).
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ShapeMismatch` if the logical shapes differ.
    pub fn assign(&mut self, src: &Self) -> Result<(), TensorError> {
        if self.shape() != src.shape() {
            return Err(TensorError::ShapeMismatch {
                expected: self.shape().to_vec(),
                actual: src.shape().to_vec(),
            });
        }
        // Read everything first: src may alias self.
        let values = src.to_vec();
        let offsets: Vec<usize> = self.iter_offsets().collect();
        for (offset, value) in offsets.into_iter().zip(values) {
            self.storage.set(offset, value);
        }
        Ok(())
    }
}
