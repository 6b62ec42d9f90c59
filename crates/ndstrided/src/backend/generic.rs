//! Generic (naive loop-based) backend implementation.

use super::permutation::{PermutationBackend, TransposePlan};
use crate::scalar::Scalar;
use crate::storage::TensorStorage;

/// Generic backend using a naive scatter.
///
/// Copies the buffer once, then writes every element to its destination.
/// It needs a full-size scratch buffer, but it is simple enough to serve as
/// the reference the in-place backend is checked against.
pub struct GenericBackend;

impl GenericBackend {
    /// Scatter `src` (row-major over the plan's source shape) into `dest`
    /// (row-major over its target shape).
    pub fn permute_into<ElT: Scalar, S: TensorStorage<ElT>>(
        dest: &mut S,
        src: &S,
        plan: &TransposePlan,
    ) {
        let mut coords = vec![0; plan.ndim()];
        for i in 0..plan.size() {
            dest.set(plan.destination(i, &mut coords), src.get(i));
        }
    }
}

impl PermutationBackend for GenericBackend {
    fn permute_in_place<ElT: Scalar, S: TensorStorage<ElT>>(storage: &mut S, plan: &TransposePlan) {
        let src = storage.duplicate();
        Self::permute_into(storage, &src, plan);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Dense;

    #[test]
    fn test_generic_permute_transpose() {
        // 2x3 matrix
        let src = Dense::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let mut dest: Dense<f64> = Dense::zeros(6);
        let plan = TransposePlan::new(&[2, 3], &[1, 0]).unwrap();

        GenericBackend::permute_into(&mut dest, &src, &plan);

        assert_eq!(dest.to_vec(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_generic_permute_3d() {
        // 2x3x4 tensor, element (i, j, k) holds 100i + 10j + k.
        let mut data = Vec::new();
        for i in 0..2 {
            for j in 0..3 {
                for k in 0..4 {
                    data.push(i * 100 + j * 10 + k);
                }
            }
        }
        let mut storage = Dense::from_vec(data);

        // [2, 0, 1]: shape 2x3x4 -> 4x2x3
        let plan = TransposePlan::new(&[2, 3, 4], &[2, 0, 1]).unwrap();
        GenericBackend::permute_in_place(&mut storage, &plan);

        for i in 0..2 {
            for j in 0..3 {
                for k in 0..4 {
                    assert_eq!(storage.get(k * 6 + i * 3 + j), i * 100 + j * 10 + k);
                }
            }
        }
    }
}
