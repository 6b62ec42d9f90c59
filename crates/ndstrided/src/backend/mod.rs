//! Backends that physically permute a storage buffer.
//!
//! A pending transpose is resolved by a [`PermutationBackend`] working from a
//! [`TransposePlan`]:
//!
//! - [`CycleBackend`]: in-place cycle following, one carried element plus a
//!   bitmap (the default)
//! - [`GenericBackend`]: naive scatter through a full-size scratch copy
//!
//! The cycle walk itself is a pure step generator, [`walk_cycles`], so it can
//! be tested independently of any buffer.

mod cycle;
mod generic;
mod permutation;

pub use cycle::{CycleBackend, CycleStep, walk_cycles};
pub use generic::GenericBackend;
pub use permutation::{PermutationBackend, TransposePlan};
