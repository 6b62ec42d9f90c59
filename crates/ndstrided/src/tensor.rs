//! N-dimensional strided array handle.
//!
//! ```text
//! Tensor<ElT, StoreT>
//! ├── storage       flat buffer (owned, or a window shared with a source)
//! ├── ap            AccessPattern: layout + Identity/Pending transpose state
//! └── view_source   shape of the array this view was sliced from
//! ```
//!
//! Shape-reading methods always report the logical (post-transpose) layout.
//! The buffer only changes order when a pending transpose is materialized.

use std::marker::PhantomData;

use crate::access_pattern::{AccessPattern, Layout};
use crate::error::TensorError;
use crate::iter::FlatIterator;
use crate::scalar::Scalar;
use crate::storage::{Dense, TensorStorage};

/// A strided n-dimensional array over a polymorphic storage.
///
/// Views created by [`slice`](Tensor::slice) share their source's buffer:
/// writes through either handle are visible through the other. Nothing
/// invalidates a view when its source is later re-laid-out.
#[derive(Debug)]
pub struct Tensor<ElT: Scalar, StoreT: TensorStorage<ElT> = Dense<ElT>> {
    pub(crate) storage: StoreT,
    pub(crate) ap: AccessPattern,
    pub(crate) view_source: Option<Vec<usize>>,
    pub(crate) materializations: usize,
    _phantom: PhantomData<ElT>,
}

/// Type alias for dense tensors (most common case).
pub type DenseTensor<ElT> = Tensor<ElT, Dense<ElT>>;

impl<ElT: Scalar, StoreT: TensorStorage<ElT>> Tensor<ElT, StoreT> {
    pub(crate) fn from_parts(
        storage: StoreT,
        ap: AccessPattern,
        view_source: Option<Vec<usize>>,
    ) -> Self {
        Self {
            storage,
            ap,
            view_source,
            materializations: 0,
            _phantom: PhantomData,
        }
    }

    /// Create a new tensor with the given shape, zero-initialized.
    ///
    /// An empty shape is a rank-0 array holding one element.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndstrided::Tensor;
    ///
    /// let t: Tensor<f64> = Tensor::zeros(&[2, 3, 4]);
    /// assert_eq!(t.shape(), &[2, 3, 4]);
    /// assert_eq!(t.strides(), &[12, 4, 1]);
    /// assert_eq!(t.len(), 24);
    /// ```
    pub fn zeros(shape: &[usize]) -> Self {
        let ap = AccessPattern::contiguous(shape);
        Self::from_parts(StoreT::zeros(ap.size()), ap, None)
    }

    /// Create a tensor with every element set to `value`.
    pub fn full(shape: &[usize], value: ElT) -> Self {
        let ap = AccessPattern::contiguous(shape);
        Self::from_parts(StoreT::from_vec(vec![value; ap.size()]), ap, None)
    }

    /// Create tensor from row-major data and shape.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::SizeMismatch` if data length doesn't match shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndstrided::{DenseTensor, Tensor};
    ///
    /// let t: DenseTensor<i32> = Tensor::from_vec(vec![1, 2, 3, 4, 5, 6], &[2, 3]).unwrap();
    /// assert_eq!(t.at(&[0, 1]).unwrap(), 2);
    /// assert_eq!(t.at(&[1, 0]).unwrap(), 4);
    /// ```
    pub fn from_vec(data: Vec<ElT>, shape: &[usize]) -> Result<Self, TensorError> {
        let ap = AccessPattern::contiguous(shape);
        if data.len() != ap.size() {
            return Err(TensorError::SizeMismatch {
                expected: ap.size(),
                actual: data.len(),
            });
        }
        Ok(Self::from_parts(StoreT::from_vec(data), ap, None))
    }

    /// Logical shape.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.ap.shape()
    }

    /// Strides of the logical shape into the buffer.
    #[inline]
    pub fn strides(&self) -> &[usize] {
        self.ap.strides()
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.ap.ndim()
    }

    /// Number of logical elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.ap.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rank 0, or every extent is 1.
    pub fn is_scalar(&self) -> bool {
        self.ap.layout().is_scalar()
    }

    /// Exactly one extent differs from 1.
    pub fn is_vector(&self) -> bool {
        self.ap.layout().is_vector()
    }

    /// Whether this tensor shares another tensor's buffer through a slice.
    #[inline]
    pub fn is_view(&self) -> bool {
        self.view_source.is_some()
    }

    /// Whether a transpose is pending.
    #[inline]
    pub fn is_transposed(&self) -> bool {
        self.ap.is_transposed()
    }

    #[inline]
    pub fn access_pattern(&self) -> &AccessPattern {
        &self.ap
    }

    /// Shape of the tensor this view was sliced from.
    pub fn view_source_shape(&self) -> Option<&[usize]> {
        self.view_source.as_deref()
    }

    #[inline]
    pub fn storage(&self) -> &StoreT {
        &self.storage
    }

    /// How many times a pending transpose physically moved data.
    #[inline]
    pub fn materialize_count(&self) -> usize {
        self.materializations
    }

    /// Whether both tensors point into the same buffer.
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        self.storage.shares_storage_with(&other.storage)
    }

    /// The buffer holds exactly the physical layout, row-major, with no gaps.
    pub(crate) fn is_physically_contiguous(&self) -> bool {
        let physical = self.ap.physical_layout();
        physical.is_row_major() && self.storage.len() == physical.size()
    }

    /// Whether reading the tensor in logical order needs offset translation.
    ///
    /// `false` means logical index `i` is physical offset `i`.
    pub fn requires_iteration(&self) -> bool {
        self.is_view() || self.is_transposed() || !self.is_physically_contiguous()
    }

    fn check_coords(&self, coords: &[usize]) -> Result<usize, TensorError> {
        if coords.len() != self.ndim() {
            return Err(TensorError::DimensionMismatch {
                expected: self.ndim(),
                actual: coords.len(),
            });
        }
        for (&idx, &dim) in coords.iter().zip(self.shape()) {
            if idx >= dim {
                return Err(TensorError::IndexOutOfBounds {
                    index: idx,
                    dim_size: dim,
                });
            }
        }
        Ok(crate::strides::dot(coords, self.strides()))
    }

    /// Element at logical coordinates.
    ///
    /// # Errors
    ///
    /// - `TensorError::DimensionMismatch` if `coords` has the wrong rank.
    /// - `TensorError::IndexOutOfBounds` if a coordinate exceeds its axis.
    pub fn at(&self, coords: &[usize]) -> Result<ElT, TensorError> {
        let offset = self.check_coords(coords)?;
        Ok(self.storage.get(offset))
    }

    /// Overwrite the element at logical coordinates.
    ///
    /// # Errors
    ///
    /// Same as [`at`](Self::at).
    pub fn set(&mut self, coords: &[usize], value: ElT) -> Result<(), TensorError> {
        let offset = self.check_coords(coords)?;
        self.storage.set(offset, value);
        Ok(())
    }

    /// Element at physical offset `i` of this tensor's storage.
    pub fn get_linear(&self, i: usize) -> Option<ElT> {
        (i < self.storage.len()).then(|| self.storage.get(i))
    }

    /// Overwrite the element at physical offset `i`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::IndexOutOfBounds` past the end of the storage.
    pub fn set_linear(&mut self, i: usize, value: ElT) -> Result<(), TensorError> {
        if i >= self.storage.len() {
            return Err(TensorError::IndexOutOfBounds {
                index: i,
                dim_size: self.storage.len(),
            });
        }
        self.storage.set(i, value);
        Ok(())
    }

    /// Physical offsets in logical row-major order.
    pub fn iter_offsets(&self) -> FlatIterator {
        FlatIterator::new(&self.ap)
    }

    /// Elements in logical row-major order.
    pub fn to_vec(&self) -> Vec<ElT> {
        if !self.requires_iteration() {
            return self.storage.to_vec();
        }
        self.iter_offsets().map(|o| self.storage.get(o)).collect()
    }

    /// Elements in buffer order.
    pub fn raw_data(&self) -> Vec<ElT> {
        self.storage.to_vec()
    }

    /// Copy into a fresh buffer, keeping layout and transpose state.
    pub(crate) fn detached(&self) -> Self {
        Self::from_parts(self.storage.duplicate(), self.ap.clone(), None)
    }

    /// Copy into a fresh contiguous buffer in logical order.
    pub(crate) fn gathered(&self) -> Self {
        Self::from_parts(
            StoreT::from_vec(self.to_vec()),
            AccessPattern::new(Layout::contiguous(self.shape())),
            None,
        )
    }
}

impl<ElT: Scalar, StoreT: TensorStorage<ElT>> Clone for Tensor<ElT, StoreT> {
    /// Deep copy. A view is gathered into its own contiguous buffer.
    fn clone(&self) -> Self {
        if self.is_view() {
            self.gathered()
        } else {
            self.detached()
        }
    }
}

impl<ElT: Scalar, StoreT: TensorStorage<ElT>> PartialEq for Tensor<ElT, StoreT> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.to_vec() == other.to_vec()
    }
}
