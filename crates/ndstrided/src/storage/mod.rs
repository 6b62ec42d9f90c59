//! Storage types for array data.
//!
//! ```text
//! TensorStorage<T> (trait)
//! └── Dense<T>        window into a shared SharedBuffer<T>
//! ```
//!
//! Storage is always a flat sequence of elements; shape, strides and
//! transpose state live on the [`Tensor`](crate::Tensor) wrapper. Two
//! storages may point into one buffer: that is how views alias their source.

mod buffer;
mod dense;

use std::fmt::Debug;
use std::ops::Range;

use crate::scalar::Scalar;

pub use buffer::SharedBuffer;
pub use dense::Dense;

/// Backing storage for a [`Tensor`](crate::Tensor).
///
/// Offsets are physical positions relative to the start of the storage. The
/// transpose engine and the structural builders only ever talk to storage
/// through this trait.
pub trait TensorStorage<T: Scalar>: Debug {
    /// Create storage with given length, zero-initialized.
    fn zeros(len: usize) -> Self;

    /// Create storage from existing vector.
    fn from_vec(data: Vec<T>) -> Self;

    /// Length of storage (number of elements).
    fn len(&self) -> usize;

    /// Check if storage is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at physical offset `i`.
    fn get(&self, i: usize) -> T;

    /// Overwrite the element at physical offset `i`.
    fn set(&mut self, i: usize, value: T);

    /// Copy as much of `src` as fits; returns the count copied.
    fn copy_from(&mut self, src: &Self) -> usize;

    /// Copy `src[src_range]` into `self[dst_range]`, bounded by the shorter
    /// range; returns the count copied.
    fn copy_sliced(
        &mut self,
        dst_range: Range<usize>,
        src: &Self,
        src_range: Range<usize>,
    ) -> usize;

    /// Storage for `[start, end)` that aliases this one.
    fn view(&self, start: usize, end: usize) -> Self;

    /// Independent copy in a fresh buffer.
    fn duplicate(&self) -> Self;

    /// Whether both storages point into the same buffer.
    fn shares_storage_with(&self, other: &Self) -> bool;

    /// Whether both storages cover exactly the same region of one buffer.
    fn same_region(&self, other: &Self) -> bool;

    /// Elements in physical order.
    fn to_vec(&self) -> Vec<T>;
}

impl<T: Scalar> TensorStorage<T> for Dense<T> {
    fn zeros(len: usize) -> Self {
        Dense::zeros(len)
    }

    fn from_vec(data: Vec<T>) -> Self {
        Dense::from_vec(data)
    }

    fn len(&self) -> usize {
        Dense::len(self)
    }

    fn get(&self, i: usize) -> T {
        Dense::get(self, i)
    }

    fn set(&mut self, i: usize, value: T) {
        Dense::set(self, i, value)
    }

    fn copy_from(&mut self, src: &Self) -> usize {
        Dense::copy_from(self, src)
    }

    fn copy_sliced(
        &mut self,
        dst_range: Range<usize>,
        src: &Self,
        src_range: Range<usize>,
    ) -> usize {
        Dense::copy_sliced(self, dst_range, src, src_range)
    }

    fn view(&self, start: usize, end: usize) -> Self {
        Dense::view(self, start, end)
    }

    fn duplicate(&self) -> Self {
        Dense::duplicate(self)
    }

    fn shares_storage_with(&self, other: &Self) -> bool {
        Dense::shares_storage_with(self, other)
    }

    fn same_region(&self, other: &Self) -> bool {
        Dense::same_region(self, other)
    }

    fn to_vec(&self) -> Vec<T> {
        Dense::to_vec(self)
    }
}
