//! ndstrided - dense, strided N-dimensional arrays
//!
//! This crate manages how a flat buffer is read as an N-dimensional array:
//! coordinate/offset arithmetic, aliasing views, deferred transposes, and
//! in-place materialization of those transposes without a second buffer.
//!
//! # Architecture
//!
//! ```text
//! Level 1: Tensor API (tensor + operations modules)
//!     → t / ut / safe_t / transpose, slice, concat, stack, repeat, roll_axis
//!
//! Level 2: Access patterns (access_pattern, strides, iter modules)
//!     → Layout, Identity/Pending transpose state, FlatIterator
//!
//! Level 3: Data movement (backend + storage modules)
//!     → CycleBackend (in-place), GenericBackend (scratch copy)
//!     → Dense storage over a shared buffer
//! ```
//!
//! # Example
//!
//! ```
//! use ndstrided::{DenseTensor, SliceSpec, Tensor};
//!
//! let data: Vec<f64> = (0..6).map(f64::from).collect();
//! let mut t: DenseTensor<f64> = Tensor::from_vec(data, &[2, 3]).unwrap();
//!
//! // Transposing only rewrites metadata...
//! t.t(&[]).unwrap();
//! assert_eq!(t.shape(), &[3, 2]);
//! assert_eq!(t.at(&[2, 0]).unwrap(), 2.0);
//!
//! // ...until the transpose is materialized.
//! t.transpose();
//! assert_eq!(t.raw_data(), vec![0.0, 3.0, 1.0, 4.0, 2.0, 5.0]);
//!
//! // Slices are views sharing the buffer.
//! let mut row = t.slice(&[Some(SliceSpec::Index(1))]).unwrap();
//! row.set(&[0], -1.0).unwrap();
//! assert_eq!(t.at(&[1, 0]).unwrap(), -1.0);
//! ```

pub mod access_pattern;
pub mod backend;
pub mod error;
pub mod iter;
pub mod operations;
pub mod pool;
pub mod scalar;
pub mod storage;
pub mod strides;
pub mod tensor;

pub use access_pattern::{
    AccessPattern, Layout, SliceSpec, TransposeState, concat_shape, repeat_shape, stack_shape,
};
pub use error::TensorError;
pub use iter::FlatIterator;
pub use scalar::{Scalar, c64};
pub use storage::{Dense, TensorStorage};
pub use tensor::{DenseTensor, Tensor};
