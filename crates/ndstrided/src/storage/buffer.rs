//! Shared, mutable element buffer.
//!
//! Every array owns a handle to one of these; views hold another handle to
//! the same buffer. Writes through any handle are visible through all of
//! them. There is no copy-on-write and no invalidation when one handle
//! re-lays-out the data.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::scalar::Scalar;

/// Reference-counted flat buffer backed by `Vec<T>`.
#[derive(Debug)]
pub struct SharedBuffer<T: Scalar> {
    data: Rc<RefCell<Vec<T>>>,
}

impl<T: Scalar> SharedBuffer<T> {
    /// Take ownership of `data`.
    #[inline]
    pub fn new(data: Vec<T>) -> Self {
        Self {
            data: Rc::new(RefCell::new(data)),
        }
    }

    /// Zero-initialized buffer of `len` elements.
    pub fn zeros(len: usize) -> Self {
        Self::new(vec![T::zero(); len])
    }

    /// Another handle to the same buffer.
    #[inline]
    pub fn share(&self) -> Self {
        Self {
            data: Rc::clone(&self.data),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, Vec<T>> {
        self.data.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, Vec<T>> {
        self.data.borrow_mut()
    }

    /// Whether both handles point to the same buffer.
    #[inline]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// Whether any other handle to this buffer exists.
    #[inline]
    pub fn is_shared(&self) -> bool {
        Rc::strong_count(&self.data) > 1
    }
}
