//! Property-based tests for layout arithmetic and transposition.
//!
//! Shapes are kept small (rank 1-4, extents 1-4) so every property checks
//! whole buffers.

use ndstrided::backend::GenericBackend;
use ndstrided::strides::{coords_of, compute_strides, offset_of};
use ndstrided::{AccessPattern, DenseTensor, FlatIterator, Tensor};
use proptest::prelude::*;

// ============================================================================
// Test Utilities
// ============================================================================

/// Strategy for generating small shapes.
fn shape_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..5, 1..=4)
}

/// Strategy for a shape together with a permutation of its axes.
fn shape_and_perm() -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
    shape_strategy().prop_flat_map(|shape| {
        let axes: Vec<usize> = (0..shape.len()).collect();
        (Just(shape), Just(axes).prop_shuffle())
    })
}

fn range_tensor(shape: &[usize]) -> DenseTensor<i64> {
    let n: usize = shape.iter().product();
    Tensor::from_vec((0..n as i64).collect(), shape).unwrap()
}

fn inverse(perm: &[usize]) -> Vec<usize> {
    let mut inv = vec![0; perm.len()];
    for (i, &p) in perm.iter().enumerate() {
        inv[p] = i;
    }
    inv
}

// ============================================================================
// Coordinate Properties
// ============================================================================

proptest! {
    /// Property: coords_of inverts offset_of over every row-major offset
    #[test]
    fn prop_coordinate_bijection(shape in shape_strategy()) {
        let strides = compute_strides(&shape);
        let size: usize = shape.iter().product();
        for o in 0..size {
            let coords = coords_of(o, &shape, &strides).unwrap();
            prop_assert_eq!(offset_of(&shape, &strides, &coords).unwrap(), o);
        }
    }

    /// Property: the bijection survives any axis permutation of the strides
    #[test]
    fn prop_coordinate_bijection_permuted((shape, perm) in shape_and_perm()) {
        let ap = AccessPattern::contiguous(&shape);
        let permuted = ap.layout().permuted(&perm);
        for o in 0..permuted.size() {
            let coords = coords_of(o, permuted.shape(), permuted.strides()).unwrap();
            prop_assert_eq!(
                offset_of(permuted.shape(), permuted.strides(), &coords).unwrap(),
                o
            );
        }
    }

    /// Property: a transposed traversal visits every offset exactly once
    #[test]
    fn prop_flat_iterator_is_permutation((shape, perm) in shape_and_perm()) {
        let ap = AccessPattern::contiguous(&shape);
        let layout = ap.layout().permuted(&perm);
        let mut offsets: Vec<usize> = FlatIterator::from_layout(&layout).collect();
        offsets.sort_unstable();
        prop_assert_eq!(offsets, (0..layout.size()).collect::<Vec<_>>());
    }
}

// ============================================================================
// Transpose Properties
// ============================================================================

proptest! {
    /// Property: t(P) then t(P^-1) restores the array without moving data
    #[test]
    fn prop_round_trip_thunked((shape, perm) in shape_and_perm()) {
        let mut t = range_tensor(&shape);
        t.t(&perm).unwrap();
        t.t(&inverse(&perm)).unwrap();
        prop_assert_eq!(t.shape(), &shape[..]);
        prop_assert_eq!(t.raw_data(), range_tensor(&shape).raw_data());
        prop_assert_eq!(t.materialize_count(), 0);
    }

    /// Property: materializing both directions restores the buffer
    #[test]
    fn prop_round_trip_materialized((shape, perm) in shape_and_perm()) {
        let mut t = range_tensor(&shape);
        t.t(&perm).unwrap();
        t.transpose();
        t.t(&inverse(&perm)).unwrap();
        t.transpose();
        prop_assert_eq!(t.shape(), &shape[..]);
        prop_assert_eq!(t.raw_data(), range_tensor(&shape).raw_data());
    }

    /// Property: in-place materialization lays the buffer out in the
    /// pending logical order
    #[test]
    fn prop_materialize_matches_logical_order((shape, perm) in shape_and_perm()) {
        let mut t = range_tensor(&shape);
        t.t(&perm).unwrap();
        let logical = t.to_vec();
        t.transpose();
        prop_assert!(!t.is_transposed());
        prop_assert_eq!(t.raw_data(), logical);
    }

    /// Property: the cycle-following backend agrees with the scratch-copy one
    #[test]
    fn prop_backends_agree((shape, perm) in shape_and_perm()) {
        let mut a = range_tensor(&shape);
        let mut b = range_tensor(&shape);
        a.t(&perm).unwrap();
        b.t(&perm).unwrap();
        a.transpose();
        b.transpose_with::<GenericBackend>();
        prop_assert_eq!(a.raw_data(), b.raw_data());
    }

    /// Property: a second request composes with the first
    #[test]
    fn prop_two_requests_compose(
        (shape, p) in shape_and_perm(),
        seed in any::<u64>(),
    ) {
        // A vector drops its pending transpose on a second request.
        prop_assume!(shape.iter().filter(|&&d| d != 1).count() > 1);

        // Derive a second permutation deterministically from the seed.
        let mut q: Vec<usize> = (0..shape.len()).collect();
        q.rotate_left((seed as usize) % shape.len());

        let mut t = range_tensor(&shape);
        t.t(&p).unwrap();
        t.t(&q).unwrap();

        let composed: Vec<usize> = q.iter().map(|&i| p[i]).collect();
        let mut expected = range_tensor(&shape);
        expected.t(&composed).unwrap();

        prop_assert_eq!(t.shape(), expected.shape());
        prop_assert_eq!(t.to_vec(), expected.to_vec());
    }
}

// ============================================================================
// Builder Properties
// ============================================================================

proptest! {
    /// Property: view and contiguous stacking produce identical buffers
    #[test]
    fn prop_stack_strategies_agree(shape in shape_strategy(), axis_seed in any::<usize>()) {
        let axis = axis_seed % (shape.len() + 1);
        let a = range_tensor(&shape);
        let b = Tensor::from_vec(a.to_vec().iter().map(|x| x + 1000).collect(), &shape).unwrap();

        let simple = Tensor::simple_stack(axis, &[&a, &b]).unwrap();
        let va = a.slice(&[]).unwrap();
        let vb = b.slice(&[]).unwrap();
        let viewed = Tensor::view_stack(axis, &[&va, &vb]).unwrap();
        prop_assert_eq!(simple.raw_data(), viewed.raw_data());
    }

    /// Property: rolling an axis away and back is the identity
    #[test]
    fn prop_roll_axis_inverse(
        shape in shape_strategy(),
        a_seed in any::<usize>(),
        b_seed in any::<usize>(),
    ) {
        let ndim = shape.len();
        let a = a_seed % ndim;
        let b = b_seed % (ndim + 1);
        let t = range_tensor(&shape);
        let rolled = t.roll_axis(a, b).unwrap();
        let (back_axis, back_start) = if a < b { (b - 1, a) } else { (b, a + 1) };
        let restored = rolled.roll_axis(back_axis, back_start).unwrap();
        prop_assert_eq!(restored.shape(), t.shape());
        prop_assert_eq!(restored.to_vec(), t.to_vec());
    }
}
