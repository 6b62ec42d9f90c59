//! Per-axis slice specifications.

use std::ops::Range;

use crate::error::TensorError;

/// How one axis is narrowed by [`Tensor::slice`](crate::Tensor::slice).
///
/// `None` in a slice list stands for the full axis (`:` in NumPy).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceSpec {
    /// A single position; the axis is dropped from the result.
    Index(usize),
    /// Positions `start, start + step, ...` below `end`; the axis is kept.
    Range {
        start: usize,
        end: usize,
        step: usize,
    },
}

impl SliceSpec {
    /// `start..end` with unit step.
    pub fn range(start: usize, end: usize) -> Self {
        SliceSpec::Range {
            start,
            end,
            step: 1,
        }
    }

    /// `start..end` taking every `step`-th position.
    pub fn range_step(start: usize, end: usize, step: usize) -> Self {
        SliceSpec::Range { start, end, step }
    }

    #[inline]
    pub fn is_index(&self) -> bool {
        matches!(self, SliceSpec::Index(_))
    }

    /// Resolve against an axis of extent `size` into `(start, end, step)`.
    pub(crate) fn resolve(
        &self,
        dim: usize,
        size: usize,
    ) -> Result<(usize, usize, usize), TensorError> {
        let (start, end, step) = match *self {
            SliceSpec::Index(i) => (i, i.saturating_add(1), 1),
            SliceSpec::Range { start, end, step } => (start, end, step),
        };
        if start >= size || end > size || start >= end || step == 0 {
            return Err(TensorError::InvalidSlice {
                start,
                end,
                step,
                dim,
                size,
            });
        }
        Ok((start, end, step))
    }
}

impl From<usize> for SliceSpec {
    fn from(index: usize) -> Self {
        SliceSpec::Index(index)
    }
}

impl From<Range<usize>> for SliceSpec {
    fn from(range: Range<usize>) -> Self {
        SliceSpec::range(range.start, range.end)
    }
}
