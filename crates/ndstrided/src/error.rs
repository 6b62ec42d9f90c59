//! Error types for ndstrided.

use thiserror::Error;

/// Errors that can occur in array operations.
///
/// `NoOp` is not a fault: it signals that a request resolved to the identity
/// transform (or that an iteration had nothing to visit). Public operations
/// swallow it; use [`TensorError::is_noop`] when calling the lower-level
/// access-pattern functions directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TensorError {
    /// Two shapes that must agree do not.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Element counts that must agree do not.
    #[error("size mismatch: expected {expected} elements, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Wrong number of coordinates or dimensions.
    #[error("dimension mismatch: expected {expected} dimensions, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Axis argument out of range.
    #[error("invalid axis {axis} for array with {ndim} dimensions")]
    InvalidAxis { axis: usize, ndim: usize },

    /// More slice specifications than dimensions.
    #[error("axis out of range: {given} slices given for array with {ndim} dimensions")]
    AxisOutOfRange { given: usize, ndim: usize },

    /// Slice bounds out of range for the sliced axis.
    #[error(
        "invalid slice {start}..{end} (step {step}) for dimension {dim} with size {size}"
    )]
    InvalidSlice {
        start: usize,
        end: usize,
        step: usize,
        dim: usize,
        size: usize,
    },

    /// Invalid axis permutation.
    #[error("invalid permutation {perm:?} for array with {ndim} dimensions")]
    InvalidPermutation { perm: Vec<usize>, ndim: usize },

    /// Coordinate out of bounds.
    #[error("index out of bounds: index {index} is out of range for dimension {dim_size}")]
    IndexOutOfBounds { index: usize, dim_size: usize },

    /// Combination of inputs the engine does not support.
    #[error("{operation} is not implemented for {what}")]
    NotImplemented {
        operation: &'static str,
        what: &'static str,
    },

    /// The request is an identity transform; nothing to do.
    #[error("{operation}: no-op")]
    NoOp { operation: &'static str },
}

impl TensorError {
    /// Returns `true` for the `NoOp` control signal.
    #[inline]
    pub fn is_noop(&self) -> bool {
        matches!(self, TensorError::NoOp { .. })
    }
}
