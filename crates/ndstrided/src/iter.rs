//! Flat iteration over the physical offsets of an access pattern.

use smallvec::SmallVec;

use crate::access_pattern::{AccessPattern, Layout};
use crate::error::TensorError;

type Dims = SmallVec<[usize; 8]>;

/// Physical offsets of a layout, one per logical element, in row-major
/// (last axis fastest) logical order.
///
/// For a contiguous pattern this is `0, 1, ..., n - 1`. For transposed or
/// sliced patterns each logical coordinate is mapped through the strides, so
/// consecutive offsets may jump around the buffer.
///
/// The iterator is finite and can be restarted with [`FlatIterator::reset`].
///
/// # Examples
///
/// ```
/// use ndstrided::{AccessPattern, FlatIterator};
///
/// let ap = AccessPattern::contiguous(&[2, 3]);
/// let (t, _) = ap.request_transpose(&[]).unwrap();
/// let offsets: Vec<usize> = FlatIterator::new(&t).collect();
/// assert_eq!(offsets, vec![0, 3, 1, 4, 2, 5]);
/// ```
#[derive(Debug, Clone)]
pub struct FlatIterator {
    shape: Dims,
    strides: Dims,
    coords: Dims,
    offset: usize,
    remaining: usize,
    size: usize,
}

impl FlatIterator {
    /// Iterate the logical (post-transpose) layout of `ap`.
    pub fn new(ap: &AccessPattern) -> Self {
        Self::from_layout(ap.layout())
    }

    /// Iterate an explicit layout.
    pub fn from_layout(layout: &Layout) -> Self {
        let size = layout.size();
        Self {
            shape: layout.shape().iter().copied().collect(),
            strides: layout.strides().iter().copied().collect(),
            coords: SmallVec::from_elem(0, layout.ndim()),
            offset: 0,
            remaining: size,
            size,
        }
    }

    /// Pull the next offset.
    ///
    /// Returns `Ok(None)` once exhausted.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::NoOp` when an axis has zero extent; there is
    /// nothing to visit, which callers treat as an empty traversal.
    pub fn next_offset(&mut self) -> Result<Option<usize>, TensorError> {
        if self.size == 0 {
            return Err(TensorError::NoOp {
                operation: "FlatIterator::next_offset",
            });
        }
        Ok(self.next())
    }

    /// Append up to `n` offsets to `out`, returning how many were pulled.
    ///
    /// Several iterators drained batch by batch from one loop give the
    /// interleaved traversal that view stacking needs.
    pub fn next_batch(&mut self, n: usize, out: &mut Vec<usize>) -> usize {
        let before = out.len();
        out.extend(self.by_ref().take(n));
        out.len() - before
    }

    /// Rewind to the first element.
    pub fn reset(&mut self) {
        self.coords.iter_mut().for_each(|c| *c = 0);
        self.offset = 0;
        self.remaining = self.size;
    }

    fn advance(&mut self) {
        for axis in (0..self.shape.len()).rev() {
            self.coords[axis] += 1;
            self.offset += self.strides[axis];
            if self.coords[axis] < self.shape[axis] {
                return;
            }
            self.offset -= self.coords[axis] * self.strides[axis];
            self.coords[axis] = 0;
        }
    }
}

impl Iterator for FlatIterator {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.offset;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for FlatIterator {}
