//! Scalar trait for array element types.

use std::fmt::Debug;

pub use faer::c64;

/// Trait for element types supported by ndstrided.
///
/// The engine only moves elements around, so the bound is structural:
/// elements are plain copyable values with a zero (`Default`).
pub trait Scalar: Copy + Debug + Default + PartialEq + 'static {
    /// Returns the additive identity (zero).
    fn zero() -> Self {
        Self::default()
    }
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {
        $(impl Scalar for $t {})*
    };
}

impl_scalar!(
    f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, bool, c64
);
