//! Access patterns: how a flat buffer is read as an N-dimensional array.
//!
//! An [`AccessPattern`] pairs the [`Layout`] every shape-reading operation
//! sees with the array's [`TransposeState`]:
//!
//! ```text
//! Identity                      buffer order == layout order
//! Pending { previous, axes }    layout is previous permuted by axes;
//!                               buffer still holds previous order
//! ```
//!
//! Requesting a transpose only rewrites metadata. Moving data is the job of
//! the transpose engine in [`crate::operations`].

mod shape;
mod slice;

pub use shape::{concat_shape, repeat_shape, stack_shape};
pub use slice::SliceSpec;

use crate::error::TensorError;
use crate::strides::{compute_strides, validate_permutation};

/// Shape and strides of an array.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layout {
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl Layout {
    /// Create a layout from explicit shape and strides.
    ///
    /// # Panics
    ///
    /// Panics if `shape` and `strides` have different lengths.
    pub fn new(shape: Vec<usize>, strides: Vec<usize>) -> Self {
        assert_eq!(
            shape.len(),
            strides.len(),
            "shape and strides must have the same rank"
        );
        Self { shape, strides }
    }

    /// Row-major layout for `shape`.
    pub fn contiguous(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            strides: compute_strides(shape),
        }
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Number of logical elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }

    /// Rank 0, or every extent is 1.
    pub fn is_scalar(&self) -> bool {
        self.shape.iter().all(|&d| d == 1)
    }

    /// Exactly one extent differs from 1.
    pub fn is_vector(&self) -> bool {
        self.shape.iter().filter(|&&d| d != 1).count() == 1
    }

    /// Strides are the row-major strides of the shape.
    ///
    /// Axes of extent 1 never move the cursor, so their strides are ignored.
    pub fn is_row_major(&self) -> bool {
        let expected = compute_strides(&self.shape);
        self.shape
            .iter()
            .zip(self.strides.iter().zip(expected.iter()))
            .all(|(&d, (&s, &e))| d == 1 || s == e)
    }

    /// Layout with axes reordered: `shape[axes[i]]`, `strides[axes[i]]`.
    ///
    /// `axes` must be a valid permutation of `0..ndim`.
    pub fn permuted(&self, axes: &[usize]) -> Self {
        Self {
            shape: axes.iter().map(|&a| self.shape[a]).collect(),
            strides: axes.iter().map(|&a| self.strides[a]).collect(),
        }
    }

    /// One past the largest offset this layout addresses (0 if empty).
    pub fn span(&self) -> usize {
        if self.shape.contains(&0) {
            return 0;
        }
        1 + self
            .shape
            .iter()
            .zip(self.strides.iter())
            .map(|(&d, &s)| (d - 1) * s)
            .sum::<usize>()
    }
}

/// Whether a transpose is waiting to be applied to the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransposeState {
    /// The buffer is laid out as the layout says.
    #[default]
    Identity,
    /// `axes` was requested against `previous`; the buffer is still in
    /// `previous` order.
    Pending { previous: Layout, axes: Vec<usize> },
}

/// Layout plus transpose bookkeeping for one array.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessPattern {
    layout: Layout,
    state: TransposeState,
}

impl AccessPattern {
    /// Access pattern with no pending transpose.
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            state: TransposeState::Identity,
        }
    }

    /// Row-major access pattern for `shape`.
    pub fn contiguous(shape: &[usize]) -> Self {
        Self::new(Layout::contiguous(shape))
    }

    /// The layout every shape-reading operation sees (post-transpose).
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.layout.size()
    }

    #[inline]
    pub fn state(&self) -> &TransposeState {
        &self.state
    }

    /// `true` while a transpose is pending.
    #[inline]
    pub fn is_transposed(&self) -> bool {
        matches!(self.state, TransposeState::Pending { .. })
    }

    /// Layout in effect before the pending transpose.
    pub fn previous(&self) -> Option<&Layout> {
        match &self.state {
            TransposeState::Pending { previous, .. } => Some(previous),
            TransposeState::Identity => None,
        }
    }

    /// Axis permutation of the pending transpose.
    pub fn pending_axes(&self) -> Option<&[usize]> {
        match &self.state {
            TransposeState::Pending { axes, .. } => Some(axes),
            TransposeState::Identity => None,
        }
    }

    /// Layout the buffer is physically in: `previous` while pending.
    pub fn physical_layout(&self) -> &Layout {
        self.previous().unwrap_or(&self.layout)
    }

    /// Capture a transpose without touching data.
    ///
    /// An empty `axes` means full reversal. The returned pattern is `Pending`
    /// with this pattern's current layout as `previous`, together with the
    /// resolved axes.
    ///
    /// # Errors
    ///
    /// - `TensorError::NoOp` for scalars and the identity permutation.
    /// - `TensorError::InvalidPermutation` if `axes` is not a permutation of
    ///   `0..ndim`.
    /// - `TensorError::NotImplemented` if a transpose is already pending;
    ///   [`untranspose`](Self::untranspose) it or materialize it first.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndstrided::AccessPattern;
    ///
    /// let ap = AccessPattern::contiguous(&[2, 3, 4]);
    /// let (t, axes) = ap.request_transpose(&[]).unwrap();
    /// assert_eq!(axes, vec![2, 1, 0]);
    /// assert_eq!(t.shape(), &[4, 3, 2]);
    /// assert_eq!(t.strides(), &[1, 4, 12]);
    ///
    /// assert!(ap.request_transpose(&[0, 1, 2]).unwrap_err().is_noop());
    /// ```
    pub fn request_transpose(
        &self,
        axes: &[usize],
    ) -> Result<(AccessPattern, Vec<usize>), TensorError> {
        if self.is_transposed() {
            return Err(TensorError::NotImplemented {
                operation: "request_transpose",
                what: "patterns with a pending transpose",
            });
        }
        let ndim = self.ndim();
        if self.layout.is_scalar() && axes.is_empty() {
            return Err(TensorError::NoOp { operation: "T" });
        }

        let axes: Vec<usize> = if axes.is_empty() {
            (0..ndim).rev().collect()
        } else {
            axes.to_vec()
        };
        validate_permutation(&axes, ndim)?;

        if self.layout.is_scalar() || axes.iter().enumerate().all(|(i, &a)| i == a) {
            return Err(TensorError::NoOp { operation: "T" });
        }

        let transformed = AccessPattern {
            layout: self.layout.permuted(&axes),
            state: TransposeState::Pending {
                previous: self.layout.clone(),
                axes: axes.clone(),
            },
        };
        Ok((transformed, axes))
    }

    /// Restore the layout from before the pending transpose.
    ///
    /// Does nothing when no transpose is pending.
    pub fn untranspose(&mut self) {
        if let TransposeState::Pending { previous, .. } = std::mem::take(&mut self.state) {
            self.layout = previous;
        }
    }

    /// Replace the layout and clear any pending transpose.
    pub(crate) fn commit(&mut self, layout: Layout) {
        self.layout = layout;
        self.state = TransposeState::Identity;
    }

    /// Narrow the pattern by per-axis slice specs.
    ///
    /// `slices` covers the leading axes; `None` (and any axis past the end of
    /// `slices`) keeps the whole axis. `SliceSpec::Index` drops its axis.
    /// Returns the narrowed pattern and the physical `[start, end)` range it
    /// addresses inside a buffer of `total_len` elements; the new strides are
    /// relative to `start`.
    ///
    /// # Errors
    ///
    /// - `TensorError::AxisOutOfRange` if there are more specs than axes.
    /// - `TensorError::InvalidSlice` if a spec falls outside its axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndstrided::{AccessPattern, SliceSpec};
    ///
    /// // Column 1 of a 2x2 array.
    /// let ap = AccessPattern::contiguous(&[2, 2]);
    /// let (view, start, end) = ap
    ///     .slice_range(4, &[None, Some(SliceSpec::Index(1))])
    ///     .unwrap();
    /// assert_eq!(view.shape(), &[2]);
    /// assert_eq!(view.strides(), &[2]);
    /// assert_eq!((start, end), (1, 4));
    /// ```
    pub fn slice_range(
        &self,
        total_len: usize,
        slices: &[Option<SliceSpec>],
    ) -> Result<(AccessPattern, usize, usize), TensorError> {
        let ndim = self.ndim();
        if slices.len() > ndim {
            return Err(TensorError::AxisOutOfRange {
                given: slices.len(),
                ndim,
            });
        }

        let mut shape = Vec::with_capacity(ndim);
        let mut strides = Vec::with_capacity(ndim);
        let mut start = 0;

        for (dim, (&size, &stride)) in self.shape().iter().zip(self.strides()).enumerate() {
            match slices.get(dim).copied().flatten() {
                None => {
                    shape.push(size);
                    strides.push(stride);
                }
                Some(spec) => {
                    let (lo, hi, step) = spec.resolve(dim, size)?;
                    start += lo * stride;
                    if !spec.is_index() {
                        shape.push((hi - lo).div_ceil(step));
                        strides.push(stride * step);
                    }
                }
            }
        }

        let layout = Layout::new(shape, strides);
        let end = start + layout.span();
        debug_assert!(end <= total_len, "slice range {start}..{end} exceeds buffer");
        Ok((AccessPattern::new(layout), start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_contiguous() {
        let layout = Layout::contiguous(&[2, 3, 4]);
        assert_eq!(layout.strides(), &[12, 4, 1]);
        assert_eq!(layout.size(), 24);
        assert!(layout.is_row_major());
        assert_eq!(layout.span(), 24);
    }

    #[test]
    fn test_layout_vector_and_scalar() {
        assert!(Layout::contiguous(&[5]).is_vector());
        assert!(Layout::contiguous(&[1, 5]).is_vector());
        assert!(Layout::contiguous(&[5, 1, 1]).is_vector());
        assert!(!Layout::contiguous(&[2, 5]).is_vector());
        assert!(Layout::contiguous(&[]).is_scalar());
        assert!(Layout::contiguous(&[1, 1]).is_scalar());
        assert!(!Layout::contiguous(&[1, 1]).is_vector());
    }

    #[test]
    fn test_layout_row_major_ignores_unit_axes() {
        let layout = Layout::new(vec![3, 1], vec![1, 7]);
        assert!(layout.is_row_major());
        let layout = Layout::new(vec![2, 3], vec![1, 2]);
        assert!(!layout.is_row_major());
    }

    #[test]
    fn test_request_transpose_default_reverses() {
        let ap = AccessPattern::contiguous(&[2, 3]);
        let (t, axes) = ap.request_transpose(&[]).unwrap();
        assert_eq!(axes, vec![1, 0]);
        assert_eq!(t.shape(), &[3, 2]);
        assert_eq!(t.strides(), &[1, 3]);
        assert_eq!(t.previous(), Some(ap.layout()));
        assert_eq!(t.pending_axes(), Some(&[1, 0][..]));
    }

    #[test]
    fn test_request_transpose_leaves_receiver() {
        let ap = AccessPattern::contiguous(&[2, 3, 4]);
        let (t, _) = ap.request_transpose(&[1, 2, 0]).unwrap();
        assert_eq!(t.shape(), &[3, 4, 2]);
        assert_eq!(t.strides(), &[4, 1, 12]);
        assert!(!ap.is_transposed());
        assert_eq!(ap.shape(), &[2, 3, 4]);
    }

    #[test]
    fn test_request_transpose_noop() {
        let ap = AccessPattern::contiguous(&[2, 3]);
        assert!(ap.request_transpose(&[0, 1]).unwrap_err().is_noop());
        let scalar = AccessPattern::contiguous(&[]);
        assert!(scalar.request_transpose(&[]).unwrap_err().is_noop());
        let vector = AccessPattern::contiguous(&[4]);
        assert!(vector.request_transpose(&[]).unwrap_err().is_noop());
    }

    #[test]
    fn test_request_transpose_invalid() {
        let ap = AccessPattern::contiguous(&[2, 3]);
        assert!(matches!(
            ap.request_transpose(&[0, 0]),
            Err(TensorError::InvalidPermutation { .. })
        ));
        assert!(matches!(
            ap.request_transpose(&[0, 1, 2]),
            Err(TensorError::InvalidPermutation { .. })
        ));
    }

    #[test]
    fn test_request_transpose_on_pending_is_rejected() {
        let ap = AccessPattern::contiguous(&[2, 3, 4]);
        let (pending, _) = ap.request_transpose(&[1, 0, 2]).unwrap();
        assert!(matches!(
            pending.request_transpose(&[2, 1, 0]),
            Err(TensorError::NotImplemented { .. })
        ));
        // The buffer order is still the original one.
        assert_eq!(pending.physical_layout(), ap.layout());
    }

    #[test]
    fn test_untranspose() {
        let ap = AccessPattern::contiguous(&[2, 3]);
        let (mut t, _) = ap.request_transpose(&[]).unwrap();
        t.untranspose();
        assert_eq!(t, ap);
        // Identity stays identity.
        t.untranspose();
        assert_eq!(t, ap);
    }

    #[test]
    fn test_physical_layout() {
        let ap = AccessPattern::contiguous(&[2, 3]);
        let (t, _) = ap.request_transpose(&[]).unwrap();
        assert_eq!(t.physical_layout(), ap.layout());
        assert_eq!(ap.physical_layout(), ap.layout());
    }

    #[test]
    fn test_slice_range_rows() {
        let ap = AccessPattern::contiguous(&[4, 3]);
        let (view, start, end) = ap
            .slice_range(12, &[Some(SliceSpec::range(1, 3))])
            .unwrap();
        assert_eq!(view.shape(), &[2, 3]);
        assert_eq!(view.strides(), &[3, 1]);
        assert_eq!((start, end), (3, 9));
    }

    #[test]
    fn test_slice_range_step() {
        let ap = AccessPattern::contiguous(&[5, 2]);
        let (view, start, end) = ap
            .slice_range(10, &[Some(SliceSpec::range_step(0, 5, 2)), None])
            .unwrap();
        assert_eq!(view.shape(), &[3, 2]);
        assert_eq!(view.strides(), &[4, 1]);
        assert_eq!((start, end), (0, 10));
    }

    #[test]
    fn test_slice_range_all_indices_is_scalar() {
        let ap = AccessPattern::contiguous(&[2, 3]);
        let (view, start, end) = ap
            .slice_range(6, &[Some(SliceSpec::Index(1)), Some(SliceSpec::Index(2))])
            .unwrap();
        assert_eq!(view.ndim(), 0);
        assert_eq!((start, end), (5, 6));
    }

    #[test]
    fn test_slice_range_errors() {
        let ap = AccessPattern::contiguous(&[2, 3]);
        assert!(matches!(
            ap.slice_range(6, &[None, None, None]),
            Err(TensorError::AxisOutOfRange { given: 3, ndim: 2 })
        ));
        assert!(matches!(
            ap.slice_range(6, &[Some(SliceSpec::Index(2))]),
            Err(TensorError::InvalidSlice { dim: 0, .. })
        ));
        assert!(matches!(
            ap.slice_range(6, &[None, Some(SliceSpec::range(1, 4))]),
            Err(TensorError::InvalidSlice { dim: 1, .. })
        ));
    }
}
