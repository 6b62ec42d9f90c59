//! Deferred (thunked) transposition and its materialization.
//!
//! `t` only records the permutation. The buffer is rearranged by
//! [`Tensor::transpose`], or implicitly when a second, non-cancelling `t`
//! arrives while one is still pending.

use log::{debug, trace};

use crate::access_pattern::{Layout, TransposeState};
use crate::backend::{CycleBackend, PermutationBackend, TransposePlan};
use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::storage::TensorStorage;
use crate::strides::validate_permutation;
use crate::tensor::Tensor;

impl<ElT: Scalar, StoreT: TensorStorage<ElT>> Tensor<ElT, StoreT> {
    /// Request a transpose by `axes` without moving data.
    ///
    /// An empty `axes` reverses all axes. With a transpose already pending:
    ///
    /// - a vector simply drops the pending transpose;
    /// - a request that exactly undoes the pending one cancels it;
    /// - anything else materializes the pending transpose first, then
    ///   records the new one against the materialized layout.
    ///
    /// Identity requests and scalars are left alone.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::InvalidPermutation` if `axes` is not a
    /// permutation of `0..ndim`. The receiver is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndstrided::{DenseTensor, Tensor};
    ///
    /// let mut t: DenseTensor<i32> = Tensor::from_vec((0..6).collect(), &[2, 3]).unwrap();
    /// t.t(&[]).unwrap();
    /// assert_eq!(t.shape(), &[3, 2]);
    /// assert_eq!(t.at(&[2, 1]).unwrap(), 5);
    /// // Data has not moved yet.
    /// assert_eq!(t.raw_data(), vec![0, 1, 2, 3, 4, 5]);
    ///
    /// t.transpose();
    /// assert_eq!(t.raw_data(), vec![0, 3, 1, 4, 2, 5]);
    /// ```
    pub fn t(&mut self, axes: &[usize]) -> Result<(), TensorError> {
        let ndim = self.ndim();
        let resolved: Vec<usize> = if axes.is_empty() {
            (0..ndim).rev().collect()
        } else {
            axes.to_vec()
        };
        validate_permutation(&resolved, ndim)?;
        if resolved.iter().enumerate().all(|(i, &a)| i == a) {
            return Ok(());
        }

        if let Some(pending) = self.ap.pending_axes() {
            if self.is_vector() {
                trace!("t: vector with pending transpose, cancelling");
                self.ut();
                return Ok(());
            }
            if resolved.iter().enumerate().all(|(i, &a)| pending[a] == i) {
                trace!("t: {resolved:?} undoes pending {pending:?}, cancelling");
                self.ut();
                return Ok(());
            }
            trace!("t: {resolved:?} does not compose with pending {pending:?}");
            self.transpose();
        }

        match self.ap.request_transpose(&resolved) {
            Ok((ap, _)) => {
                self.ap = ap;
                Ok(())
            }
            Err(e) if e.is_noop() => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Drop the pending transpose, restoring the previous layout.
    ///
    /// No data moves; does nothing when no transpose is pending.
    pub fn ut(&mut self) {
        self.ap.untranspose();
    }

    /// Transposed copy; the receiver is never modified.
    ///
    /// The buffer is copied first, then the transpose is recorded on the
    /// copy. An identity request yields a plain deep copy.
    ///
    /// # Errors
    ///
    /// Same as [`t`](Self::t).
    pub fn safe_t(&self, axes: &[usize]) -> Result<Self, TensorError> {
        let mut copy = self.detached();
        copy.t(axes)?;
        Ok(copy)
    }

    /// Apply the pending transpose to the buffer.
    ///
    /// Afterwards the tensor is contiguous in its logical shape and no
    /// transpose is pending. Uses the in-place cycle-following backend.
    pub fn transpose(&mut self) {
        self.transpose_with::<CycleBackend>();
    }

    /// Apply the pending transpose with a specific backend.
    ///
    /// Vectors and scalars only update metadata. A buffer that is not
    /// contiguous in the pre-transpose layout (a strided view, or a copy of
    /// one) is gathered into a fresh buffer instead, which detaches the
    /// tensor from any buffer it shared.
    pub fn transpose_with<B: PermutationBackend>(&mut self) {
        let TransposeState::Pending { previous, axes } = self.ap.state().clone() else {
            return;
        };

        if self.is_scalar() || self.is_vector() {
            let layout = self.ap.layout().clone();
            self.ap.commit(layout);
            return;
        }

        let target = Layout::contiguous(self.shape());
        if self.is_physically_contiguous() {
            let plan = TransposePlan::from_validated(previous.shape(), &axes);
            B::permute_in_place(&mut self.storage, &plan);
        } else {
            debug!(
                "transpose: gathering strided {:?} into a fresh buffer",
                previous.shape()
            );
            let data: Vec<ElT> = self
                .iter_offsets()
                .map(|o| self.storage.get(o))
                .collect();
            self.storage = StoreT::from_vec(data);
            self.view_source = None;
        }
        self.ap.commit(target);
        self.materializations += 1;
    }
}
