//! In-place transposition by cycle following.
//!
//! Every permutation of `0..n` splits into disjoint cycles. Walking a cycle
//! while carrying one element moves each element of the cycle to its
//! destination; a bitmap records which indices are already settled so each
//! cycle is walked exactly once. Extra memory is one element plus `n` bits.

use log::debug;

use super::permutation::{PermutationBackend, TransposePlan};
use crate::pool::{self, BitMap};
use crate::scalar::Scalar;
use crate::storage::TensorStorage;

/// One buffer operation of a cycle walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStep {
    /// Swap the carried element with the one at `index` (at the start of a
    /// cycle nothing is carried, so this only picks the element up).
    Evict { index: usize },
    /// Write the carried element to `index`, closing the cycle.
    Close { index: usize },
}

/// Generate the steps that move every element `i` of a buffer of `size`
/// elements to `dest(i)`.
///
/// `dest` must be a permutation of `0..size` that fixes `0` and `size - 1`,
/// which holds for any axis permutation of a row-major buffer. `bitmap` must
/// hold at least `size` cleared flags; on return every flag is set.
///
/// # Examples
///
/// ```
/// use ndstrided::backend::{CycleStep, walk_cycles};
/// use ndstrided::pool::BitMap;
///
/// // Transpose of a [2, 3] matrix: one 4-cycle 1 -> 2 -> 4 -> 3 -> 1.
/// let dest = [0, 2, 4, 1, 3, 5];
/// let mut bitmap = BitMap::new(6);
/// let mut steps = Vec::new();
/// walk_cycles(6, &mut bitmap, |i| dest[i], |s| steps.push(s));
/// assert_eq!(steps.first(), Some(&CycleStep::Evict { index: 1 }));
/// assert_eq!(steps.last(), Some(&CycleStep::Close { index: 1 }));
/// assert_eq!(steps.len(), 5);
/// ```
pub fn walk_cycles<D, V>(size: usize, bitmap: &mut BitMap, mut dest: D, mut visit: V)
where
    D: FnMut(usize) -> usize,
    V: FnMut(CycleStep),
{
    if size < 3 {
        for i in 0..size {
            bitmap.set(i);
        }
        return;
    }
    bitmap.set(0);
    bitmap.set(size - 1);

    for start in 1..size - 1 {
        if bitmap.is_set(start) {
            continue;
        }
        visit(CycleStep::Evict { index: start });
        bitmap.set(start);
        let mut i = dest(start);
        while !bitmap.is_set(i) {
            visit(CycleStep::Evict { index: i });
            bitmap.set(i);
            i = dest(i);
        }
        visit(CycleStep::Close { index: i });
    }
}

/// In-place backend that follows permutation cycles.
pub struct CycleBackend;

impl PermutationBackend for CycleBackend {
    fn permute_in_place<ElT: Scalar, S: TensorStorage<ElT>>(storage: &mut S, plan: &TransposePlan) {
        let size = plan.size();
        debug_assert_eq!(storage.len(), size);

        let mut bitmap = pool::borrow_bitmap(size);
        let mut coords = pool::borrow_ints(plan.ndim());
        let mut carry: Option<ElT> = None;
        let mut moves = 0usize;

        walk_cycles(
            size,
            &mut bitmap,
            |i| plan.destination(i, &mut coords),
            |step| match step {
                CycleStep::Evict { index } => {
                    let current = storage.get(index);
                    if let Some(value) = carry.replace(current) {
                        storage.set(index, value);
                        moves += 1;
                    }
                }
                CycleStep::Close { index } => {
                    if let Some(value) = carry.take() {
                        storage.set(index, value);
                        moves += 1;
                    }
                }
            },
        );
        debug!(
            "cycle transpose of {:?} by {:?}: {moves} writes",
            plan.source_shape(),
            plan.axes()
        );

        pool::return_ints(coords);
        pool::return_bitmap(bitmap);
    }
}
