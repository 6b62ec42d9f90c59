//! Repetition along an axis.

use crate::access_pattern::{AccessPattern, repeat_shape};
use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::storage::TensorStorage;
use crate::tensor::Tensor;

impl<ElT: Scalar, StoreT: TensorStorage<ElT>> Tensor<ElT, StoreT> {
    /// Repeat each position along `axis` by the matching count in `repeats`.
    ///
    /// `axis = None` flattens first and repeats each element. A single count
    /// applies to every position. A rank-0 tensor repeats into a vector (or a
    /// `[1, n]` row for axis 1), and a vector repeated along axis 1 becomes
    /// `[len, n]`.
    ///
    /// # Errors
    ///
    /// - `TensorError::InvalidAxis` if `axis` is out of range.
    /// - `TensorError::ShapeMismatch` if `repeats` has neither one entry nor
    ///   one entry per position.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndstrided::{DenseTensor, Tensor};
    ///
    /// let t: DenseTensor<i32> = Tensor::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
    ///
    /// let r = t.repeat(Some(1), &[2]).unwrap();
    /// assert_eq!(r.shape(), &[2, 4]);
    /// assert_eq!(r.to_vec(), vec![1, 1, 2, 2, 3, 3, 4, 4]);
    ///
    /// let r = t.repeat(Some(0), &[1, 2]).unwrap();
    /// assert_eq!(r.to_vec(), vec![1, 2, 3, 4, 3, 4]);
    ///
    /// let r = t.repeat(None, &[2]).unwrap();
    /// assert_eq!(r.shape(), &[8]);
    /// ```
    pub fn repeat(&self, axis: Option<usize>, repeats: &[usize]) -> Result<Self, TensorError> {
        let (new_shape, repeats, axis_len) = repeat_shape(self.shape(), axis, repeats)?;

        // The source viewed with the repeated axis restored.
        let axis = axis.unwrap_or(0);
        let mut src_shape = new_shape.clone();
        src_shape[axis] = axis_len;
        let outer: usize = src_shape[..axis].iter().product();
        let inner: usize = src_shape[axis + 1..].iter().product();

        let gathered;
        let src = if self.requires_iteration() {
            gathered = StoreT::from_vec(self.to_vec());
            &gathered
        } else {
            &self.storage
        };

        let ap = AccessPattern::contiguous(&new_shape);
        let mut storage = StoreT::zeros(ap.size());
        let mut dst = 0;
        let mut s = 0;
        for _ in 0..outer {
            for &count in &repeats {
                for _ in 0..count {
                    storage.copy_sliced(dst..dst + inner, src, s..s + inner);
                    dst += inner;
                }
                s += inner;
            }
        }
        Ok(Self::from_parts(storage, ap, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access_pattern::SliceSpec;
    use crate::tensor::DenseTensor;

    #[test]
    fn test_repeat_broadcast_row() {
        let t = DenseTensor::from_vec(vec![1, 2, 3], &[1, 3]).unwrap();
        let r = t.repeat(Some(0), &[2]).unwrap();
        assert_eq!(r.shape(), &[2, 3]);
        assert_eq!(r.to_vec(), vec![1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn test_repeat_zero_count_drops_position() {
        let t = DenseTensor::from_vec(vec![1, 2, 3], &[3]).unwrap();
        let r = t.repeat(Some(0), &[0, 2, 1]).unwrap();
        assert_eq!(r.shape(), &[3]);
        assert_eq!(r.to_vec(), vec![2, 2, 3]);
    }

    #[test]
    fn test_repeat_scalar() {
        let t: DenseTensor<f64> = Tensor::full(&[], 7.0);
        let r = t.repeat(Some(0), &[3]).unwrap();
        assert_eq!(r.shape(), &[3]);
        assert_eq!(r.to_vec(), vec![7.0; 3]);

        let r = t.repeat(Some(1), &[2]).unwrap();
        assert_eq!(r.shape(), &[1, 2]);
    }

    #[test]
    fn test_repeat_vector_along_axis1() {
        let t = DenseTensor::from_vec(vec![1, 2], &[2]).unwrap();
        let r = t.repeat(Some(1), &[3]).unwrap();
        assert_eq!(r.shape(), &[2, 3]);
        assert_eq!(r.to_vec(), vec![1, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn test_repeat_flattened() {
        let t = DenseTensor::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
        let r = t.repeat(None, &[1, 0, 2, 1]).unwrap();
        assert_eq!(r.shape(), &[4]);
        assert_eq!(r.to_vec(), vec![1, 3, 3, 4]);
    }

    #[test]
    fn test_repeat_3d_middle_axis() {
        let t = DenseTensor::from_vec((0..8).collect::<Vec<i32>>(), &[2, 2, 2]).unwrap();
        let r = t.repeat(Some(1), &[2, 1]).unwrap();
        assert_eq!(r.shape(), &[2, 3, 2]);
        assert_eq!(r.to_vec(), vec![0, 1, 0, 1, 2, 3, 4, 5, 4, 5, 6, 7]);
    }

    #[test]
    fn test_repeat_view_and_transposed() {
        let base = DenseTensor::from_vec((0..6).collect::<Vec<i32>>(), &[2, 3]).unwrap();
        let column = base.slice(&[None, Some(SliceSpec::Index(2))]).unwrap();
        let r = column.repeat(Some(0), &[2]).unwrap();
        assert_eq!(r.to_vec(), vec![2, 2, 5, 5]);

        let mut t = base.clone();
        t.t(&[]).unwrap();
        let r = t.repeat(Some(0), &[1, 2, 1]).unwrap();
        assert_eq!(r.shape(), &[4, 2]);
        assert_eq!(r.to_vec(), vec![0, 3, 1, 4, 1, 4, 2, 5]);
    }

    #[test]
    fn test_repeat_errors() {
        let t = DenseTensor::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
        assert!(matches!(
            t.repeat(Some(2), &[1]),
            Err(TensorError::InvalidAxis { .. })
        ));
        assert!(matches!(
            t.repeat(Some(0), &[1, 2, 3]),
            Err(TensorError::ShapeMismatch { .. })
        ));
    }
}
