//! Array operations.
//!
//! Every operation is a method on [`Tensor`](crate::Tensor), split by concern:
//!
//! ```text
//! transpose   t / ut / safe_t / transpose (materialize)
//! slice       slice (aliasing view)
//! copy        copy_to (physical) / assign (logical)
//! concat      concat
//! stack       stack → simple_stack | view_stack
//! repeat      repeat
//! roll_axis   roll_axis (copy) / roll_axis_in_place
//! ```
//!
//! Metadata-only operations never touch the buffer. Builders that produce a
//! new array allocate its buffer once and fill it; on error the receiver is
//! left unchanged.

mod concat;
mod copy;
mod repeat;
mod roll_axis;
mod slice;
mod stack;
mod transpose;
