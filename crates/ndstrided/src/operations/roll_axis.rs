//! Moving one axis to a new position.

use crate::error::TensorError;
use crate::pool;
use crate::scalar::Scalar;
use crate::storage::TensorStorage;
use crate::tensor::Tensor;

/// Axis order that moves `axis` before position `start`.
///
/// Returns `None` when the axis is already there. The vector comes from the
/// integer pool; callers hand it back with [`pool::return_ints`].
fn rolled_axes(
    ndim: usize,
    axis: usize,
    start: usize,
) -> Result<Option<Vec<usize>>, TensorError> {
    if axis >= ndim {
        return Err(TensorError::InvalidAxis { axis, ndim });
    }
    if start > ndim {
        return Err(TensorError::InvalidAxis { axis: start, ndim });
    }

    let start = if axis < start { start - 1 } else { start };
    if axis == start {
        return Ok(None);
    }

    let mut axes = pool::borrow_ints(ndim);
    for (slot, i) in axes.iter_mut().zip((0..ndim).filter(|&i| i != axis)) {
        *slot = i;
    }
    axes[start..].rotate_right(1);
    axes[start] = axis;
    Ok(Some(axes))
}

impl<ElT: Scalar, StoreT: TensorStorage<ElT>> Tensor<ElT, StoreT> {
    /// Copy with `axis` moved before position `start`, as numpy's `rollaxis`.
    ///
    /// The receiver is left alone. If nothing moves the result is a plain
    /// deep copy.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::InvalidAxis` if `axis >= ndim` or
    /// `start > ndim`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndstrided::{DenseTensor, Tensor};
    ///
    /// let t: DenseTensor<f64> = Tensor::zeros(&[3, 4, 5, 6]);
    /// let rolled = t.roll_axis(3, 1).unwrap();
    /// assert_eq!(rolled.shape(), &[3, 6, 4, 5]);
    /// assert_eq!(t.shape(), &[3, 4, 5, 6]);
    /// ```
    pub fn roll_axis(&self, axis: usize, start: usize) -> Result<Self, TensorError> {
        match rolled_axes(self.ndim(), axis, start)? {
            None => Ok(self.clone()),
            Some(axes) => {
                let result = self.safe_t(&axes);
                pool::return_ints(axes);
                result
            }
        }
    }

    /// Move `axis` before position `start` on the receiver itself.
    ///
    /// Only records a transpose; see [`t`](Self::t).
    ///
    /// # Errors
    ///
    /// Same as [`roll_axis`](Self::roll_axis). The receiver is unchanged on
    /// error.
    ///
    /// ```
    /// use ndstrided::{DenseTensor, Tensor};
    ///
    /// let mut t: DenseTensor<f64> = Tensor::zeros(&[3, 4, 5, 6]);
    /// t.roll_axis_in_place(1, 4).unwrap();
    /// assert_eq!(t.shape(), &[3, 5, 6, 4]);
    /// ```
    pub fn roll_axis_in_place(&mut self, axis: usize, start: usize) -> Result<(), TensorError> {
        match rolled_axes(self.ndim(), axis, start)? {
            None => Ok(()),
            Some(axes) => {
                let result = self.t(&axes);
                pool::return_ints(axes);
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::DenseTensor;

    fn range_tensor(shape: &[usize]) -> DenseTensor<i64> {
        let n: usize = shape.iter().product();
        Tensor::from_vec((0..n as i64).collect(), shape).unwrap()
    }

    #[test]
    fn test_rolled_axes() {
        assert_eq!(rolled_axes(4, 3, 1).unwrap(), Some(vec![0, 3, 1, 2]));
        assert_eq!(rolled_axes(4, 1, 4).unwrap(), Some(vec![0, 2, 3, 1]));
        assert_eq!(rolled_axes(4, 2, 2).unwrap(), None);
        assert_eq!(rolled_axes(4, 2, 3).unwrap(), None);
    }

    #[test]
    fn test_roll_to_front() {
        let t = range_tensor(&[2, 3, 4]);
        let r = t.roll_axis(2, 0).unwrap();
        assert_eq!(r.shape(), &[4, 2, 3]);
        assert_eq!(r.at(&[3, 1, 2]).unwrap(), t.at(&[1, 2, 3]).unwrap());
        assert_eq!(t.shape(), &[2, 3, 4]);
    }

    #[test]
    fn test_roll_to_back() {
        let t = range_tensor(&[2, 3, 4]);
        let r = t.roll_axis(0, 3).unwrap();
        assert_eq!(r.shape(), &[3, 4, 2]);
        assert_eq!(r.at(&[2, 3, 1]).unwrap(), t.at(&[1, 2, 3]).unwrap());
    }

    #[test]
    fn test_roll_through_shared_reference() {
        let t = range_tensor(&[2, 3, 4]);
        let shared = &t;
        let r = shared.roll_axis(1, 0).unwrap();
        assert_eq!(r.shape(), &[3, 2, 4]);
        assert!(!t.is_transposed());
        assert!(!r.shares_storage_with(&t));
    }

    #[test]
    fn test_roll_noop() {
        let mut t = range_tensor(&[2, 3, 4]);
        // axis 1 before position 2 is where it already is.
        let r = t.roll_axis(1, 2).unwrap();
        assert_eq!(r, t);
        assert!(!r.shares_storage_with(&t));
        t.roll_axis_in_place(1, 1).unwrap();
        assert!(!t.is_transposed());
    }

    #[test]
    fn test_roll_in_place() {
        let mut t = range_tensor(&[2, 3, 4]);
        t.roll_axis_in_place(2, 0).unwrap();
        assert!(t.is_transposed());
        assert_eq!(t.shape(), &[4, 2, 3]);
        assert_eq!(t.at(&[3, 1, 2]).unwrap(), 23);
    }

    #[test]
    fn test_roll_errors() {
        let mut t = range_tensor(&[2, 3]);
        assert!(matches!(
            t.roll_axis(2, 0),
            Err(TensorError::InvalidAxis { axis: 2, ndim: 2 })
        ));
        assert!(matches!(
            t.roll_axis_in_place(0, 3),
            Err(TensorError::InvalidAxis { axis: 3, ndim: 2 })
        ));
        assert_eq!(t.shape(), &[2, 3]);
        assert!(!t.is_transposed());
    }
}
