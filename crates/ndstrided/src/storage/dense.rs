//! Dense storage for array data.

use std::ops::Range;

use super::buffer::SharedBuffer;
use crate::scalar::Scalar;

/// Dense storage: a window `[start, start + len)` into a shared buffer.
///
/// An owning array's window covers the whole buffer; a view's window covers
/// the physical range its slice addresses. Offsets passed to `get`/`set` are
/// relative to the window start.
#[derive(Debug)]
pub struct Dense<ElT: Scalar> {
    buffer: SharedBuffer<ElT>,
    start: usize,
    len: usize,
}

impl<ElT: Scalar> Dense<ElT> {
    /// Create dense storage with given length, zero-initialized.
    pub fn zeros(len: usize) -> Self {
        Self::from_vec(vec![ElT::zero(); len])
    }

    /// Create dense storage from existing vector (takes ownership).
    pub fn from_vec(data: Vec<ElT>) -> Self {
        let len = data.len();
        Self {
            buffer: SharedBuffer::new(data),
            start: 0,
            len,
        }
    }

    /// Length of the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Element at window offset `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is outside the window.
    #[inline]
    pub fn get(&self, i: usize) -> ElT {
        assert!(i < self.len, "offset {i} out of range for storage of {}", self.len);
        self.buffer.borrow()[self.start + i]
    }

    /// Overwrite the element at window offset `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is outside the window.
    #[inline]
    pub fn set(&mut self, i: usize, value: ElT) {
        assert!(i < self.len, "offset {i} out of range for storage of {}", self.len);
        self.buffer.borrow_mut()[self.start + i] = value;
    }

    /// Copy `src[src_range]` into `self[dst_range]`, stopping at the shorter
    /// of the two. Returns the number of elements copied.
    ///
    /// Overlapping windows of the same buffer are handled.
    pub fn copy_sliced(
        &mut self,
        dst_range: Range<usize>,
        src: &Self,
        src_range: Range<usize>,
    ) -> usize {
        let dst_range = clamp(dst_range, self.len);
        let src_range = clamp(src_range, src.len);
        let n = dst_range.len().min(src_range.len());
        if n == 0 {
            return 0;
        }

        let dst_at = self.start + dst_range.start;
        let src_at = src.start + src_range.start;
        if self.buffer.shares_storage_with(&src.buffer) {
            self.buffer
                .borrow_mut()
                .copy_within(src_at..src_at + n, dst_at);
        } else {
            let src_data = src.buffer.borrow();
            self.buffer.borrow_mut()[dst_at..dst_at + n]
                .copy_from_slice(&src_data[src_at..src_at + n]);
        }
        n
    }

    /// Copy as much of `src` as fits, from the window starts.
    pub fn copy_from(&mut self, src: &Self) -> usize {
        self.copy_sliced(0..self.len, src, 0..src.len)
    }

    /// A window `[start, end)` of this window sharing the same buffer.
    ///
    /// # Panics
    ///
    /// Panics if the range is outside the window.
    pub fn view(&self, start: usize, end: usize) -> Self {
        assert!(
            start <= end && end <= self.len,
            "view {start}..{end} out of range for storage of {}",
            self.len
        );
        Self {
            buffer: self.buffer.share(),
            start: self.start + start,
            len: end - start,
        }
    }

    /// Fresh buffer holding a copy of the window.
    pub fn duplicate(&self) -> Self {
        Self::from_vec(self.to_vec())
    }

    /// Contents of the window.
    pub fn to_vec(&self) -> Vec<ElT> {
        self.buffer.borrow()[self.start..self.start + self.len].to_vec()
    }

    /// Whether both storages point into the same buffer.
    #[inline]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        self.buffer.shares_storage_with(&other.buffer)
    }

    /// Whether both storages cover exactly the same window of one buffer.
    pub fn same_region(&self, other: &Self) -> bool {
        self.shares_storage_with(other) && self.start == other.start && self.len == other.len
    }

    /// Whether another storage shares this buffer.
    #[inline]
    pub fn is_shared(&self) -> bool {
        self.buffer.is_shared()
    }
}

fn clamp(range: Range<usize>, len: usize) -> Range<usize> {
    let end = range.end.min(len);
    range.start.min(end)..end
}

impl<ElT: Scalar> PartialEq for Dense<ElT> {
    fn eq(&self, other: &Self) -> bool {
        self.to_vec() == other.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let d: Dense<f64> = Dense::zeros(5);
        assert_eq!(d.len(), 5);
        assert!(!d.is_empty());
        for i in 0..5 {
            assert_eq!(d.get(i), 0.0);
        }
    }

    #[test]
    fn test_from_vec() {
        let d = Dense::from_vec(vec![1.0, 2.0, 3.0]);
        assert_eq!(d.len(), 3);
        assert_eq!(d.to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_view_shares_writes() {
        let d = Dense::from_vec(vec![0, 1, 2, 3, 4]);
        let mut v = d.view(1, 4);
        assert_eq!(v.to_vec(), vec![1, 2, 3]);
        v.set(0, 99);
        assert_eq!(d.get(1), 99);
        assert!(d.shares_storage_with(&v));
        assert!(!d.same_region(&v));
        assert!(d.same_region(&d.view(0, 5)));
    }

    #[test]
    fn test_view_of_view() {
        let d = Dense::from_vec(vec![0, 1, 2, 3, 4, 5]);
        let v = d.view(1, 5).view(2, 4);
        assert_eq!(v.to_vec(), vec![3, 4]);
    }

    #[test]
    fn test_duplicate_detaches() {
        let d = Dense::from_vec(vec![1, 2, 3]);
        let mut c = d.duplicate();
        c.set(0, 7);
        assert_eq!(d.get(0), 1);
        assert!(!d.shares_storage_with(&c));
    }

    #[test]
    fn test_copy_sliced_clamps() {
        let mut dst: Dense<i32> = Dense::zeros(4);
        let src = Dense::from_vec(vec![1, 2, 3, 4, 5]);
        assert_eq!(dst.copy_sliced(2..4, &src, 0..5), 2);
        assert_eq!(dst.to_vec(), vec![0, 0, 1, 2]);
        assert_eq!(dst.copy_from(&src), 4);
        assert_eq!(dst.to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_copy_sliced_same_buffer() {
        let d = Dense::from_vec(vec![1, 2, 3, 4, 5, 6]);
        let mut tail = d.view(3, 6);
        let head = d.view(0, 3);
        assert_eq!(tail.copy_from(&head), 3);
        assert_eq!(d.to_vec(), vec![1, 2, 3, 1, 2, 3]);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_window() {
        let d = Dense::from_vec(vec![1, 2, 3, 4]);
        d.view(1, 3).get(2);
    }
}
