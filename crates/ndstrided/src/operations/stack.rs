//! Stacking along a new axis.
//!
//! Both strategies walk the output in the same order: for each outer step,
//! one `axis_stride`-sized batch from every operand in turn. They differ only
//! in how a batch is read.

use std::iter;

use log::debug;

use crate::access_pattern::{AccessPattern, stack_shape};
use crate::error::TensorError;
use crate::iter::FlatIterator;
use crate::scalar::Scalar;
use crate::storage::TensorStorage;
use crate::tensor::Tensor;

/// Output shape, batch size and number of outer steps for a stack.
fn stack_plan<ElT: Scalar, StoreT: TensorStorage<ElT>>(
    axis: usize,
    operands: &[&Tensor<ElT, StoreT>],
) -> Result<(Vec<usize>, usize, usize), TensorError> {
    let Some((first, rest)) = operands.split_first() else {
        return Err(TensorError::DimensionMismatch {
            expected: 1,
            actual: 0,
        });
    };
    if let Some(bad) = rest.iter().find(|t| t.shape() != first.shape()) {
        return Err(TensorError::ShapeMismatch {
            expected: first.shape().to_vec(),
            actual: bad.shape().to_vec(),
        });
    }

    let shape = first.shape();
    let new_shape = stack_shape(axis, shape, operands.len())?;
    let axis_stride: usize = shape[axis..].iter().product();
    let outer: usize = shape[..axis].iter().product();
    Ok((new_shape, axis_stride, outer))
}

impl<ElT: Scalar, StoreT: TensorStorage<ElT>> Tensor<ElT, StoreT> {
    /// Stack this tensor and `others` along a new axis inserted at `axis`.
    ///
    /// The new axis has length `1 + others.len()`. Contiguous operands are
    /// bulk-copied ([`simple_stack`](Self::simple_stack)); if any operand is
    /// a view or has a pending transpose, every operand is read through a
    /// [`FlatIterator`] ([`view_stack`](Self::view_stack)). Both produce the
    /// same result.
    ///
    /// # Errors
    ///
    /// - `TensorError::ShapeMismatch` if any operand's shape differs from
    ///   this tensor's.
    /// - `TensorError::InvalidAxis` if `axis > ndim`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndstrided::{DenseTensor, Tensor};
    ///
    /// let a: DenseTensor<i32> = Tensor::from_vec(vec![1, 2, 3], &[3]).unwrap();
    /// let b: DenseTensor<i32> = Tensor::from_vec(vec![4, 5, 6], &[3]).unwrap();
    ///
    /// let rows = a.stack(0, &[&b]).unwrap();
    /// assert_eq!(rows.shape(), &[2, 3]);
    /// assert_eq!(rows.to_vec(), vec![1, 2, 3, 4, 5, 6]);
    ///
    /// let cols = a.stack(1, &[&b]).unwrap();
    /// assert_eq!(cols.shape(), &[3, 2]);
    /// assert_eq!(cols.to_vec(), vec![1, 4, 2, 5, 3, 6]);
    /// ```
    pub fn stack(&self, axis: usize, others: &[&Self]) -> Result<Self, TensorError> {
        let operands: Vec<&Self> = iter::once(self).chain(others.iter().copied()).collect();
        if operands.iter().any(|t| t.requires_iteration()) {
            debug!("stack: {} operands via view_stack", operands.len());
            Self::view_stack(axis, &operands)
        } else {
            debug!("stack: {} operands via simple_stack", operands.len());
            Self::simple_stack(axis, &operands)
        }
    }

    /// Stack contiguous operands by bulk copies.
    ///
    /// Along axis 0 this is a straight concatenation of the buffers.
    ///
    /// # Errors
    ///
    /// As [`stack`](Self::stack), plus `TensorError::NotImplemented` if an
    /// operand needs offset translation.
    pub fn simple_stack(axis: usize, operands: &[&Self]) -> Result<Self, TensorError> {
        let (new_shape, axis_stride, outer) = stack_plan(axis, operands)?;
        if operands.iter().any(|t| t.requires_iteration()) {
            return Err(TensorError::NotImplemented {
                operation: "simple_stack",
                what: "views or pending transposes",
            });
        }

        let ap = AccessPattern::contiguous(&new_shape);
        let mut storage = StoreT::zeros(ap.size());
        let mut dst = 0;
        for step in 0..outer {
            let src = step * axis_stride;
            for operand in operands {
                storage.copy_sliced(
                    dst..dst + axis_stride,
                    &operand.storage,
                    src..src + axis_stride,
                );
                dst += axis_stride;
            }
        }
        Ok(Self::from_parts(storage, ap, None))
    }

    /// Stack any operands by pulling `axis_stride` offsets at a time from
    /// one iterator per operand, round-robin.
    ///
    /// # Errors
    ///
    /// As [`stack`](Self::stack).
    pub fn view_stack(axis: usize, operands: &[&Self]) -> Result<Self, TensorError> {
        let (new_shape, axis_stride, outer) = stack_plan(axis, operands)?;

        let ap = AccessPattern::contiguous(&new_shape);
        let mut iters: Vec<FlatIterator> = operands.iter().map(|t| t.iter_offsets()).collect();
        let mut data = Vec::with_capacity(ap.size());
        let mut batch = Vec::with_capacity(axis_stride);
        for _ in 0..outer {
            for (operand, it) in operands.iter().zip(iters.iter_mut()) {
                batch.clear();
                it.next_batch(axis_stride, &mut batch);
                data.extend(batch.iter().map(|&o| operand.storage.get(o)));
            }
        }
        Ok(Self::from_parts(StoreT::from_vec(data), ap, None))
    }
}
