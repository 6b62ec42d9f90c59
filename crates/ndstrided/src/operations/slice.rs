//! Slicing into aliasing views.

use crate::access_pattern::SliceSpec;
use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::storage::TensorStorage;
use crate::tensor::Tensor;

impl<ElT: Scalar, StoreT: TensorStorage<ElT>> Tensor<ElT, StoreT> {
    /// View of a sub-array sharing this tensor's buffer.
    ///
    /// `slices` covers the leading axes; `None` keeps a whole axis, as does
    /// every axis past the end of `slices`. `SliceSpec::Index` drops its axis.
    /// Writes through the view are visible in this tensor and vice versa.
    ///
    /// # Errors
    ///
    /// - `TensorError::AxisOutOfRange` if there are more specs than axes.
    /// - `TensorError::InvalidSlice` if a spec falls outside its axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndstrided::{DenseTensor, SliceSpec, Tensor};
    ///
    /// let t: DenseTensor<f64> = Tensor::from_vec(vec![0.0, 1.0, 2.0, 3.0], &[2, 2]).unwrap();
    /// let mut column = t.slice(&[None, Some(SliceSpec::Index(1))]).unwrap();
    /// assert_eq!(column.to_vec(), vec![1.0, 3.0]);
    ///
    /// column.set_linear(0, 99.0).unwrap();
    /// assert_eq!(t.at(&[0, 1]).unwrap(), 99.0);
    /// ```
    pub fn slice(&self, slices: &[Option<SliceSpec>]) -> Result<Self, TensorError> {
        let (ap, start, end) = self.ap.slice_range(self.storage.len(), slices)?;
        Ok(Self::from_parts(
            self.storage.view(start, end),
            ap,
            Some(self.shape().to_vec()),
        ))
    }
}
