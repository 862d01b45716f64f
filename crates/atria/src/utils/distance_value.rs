//! A trait for types that can be used as distance values.

use core::fmt::{Debug, Display};

/// A trait for types that can be used as distance values in the index.
///
/// Distances are real-valued: the search engine relies on `infinity()` as the
/// "no threshold yet" sentinel and on `is_nan()` to absorb metric anomalies.
///
/// We provide a blanket implementation for all types that satisfy the trait
/// bounds. This includes `f32` and `f64`.
#[must_use]
pub trait DistanceValue:
    PartialOrd
    + Copy
    + Display
    + Debug
    + Default
    + num_traits::Float
    + num_traits::NumAssign
    + core::iter::Sum
    + Send
    + Sync
{
    /// Returns half of the value.
    #[must_use]
    fn half(self) -> Self {
        self / (Self::one() + Self::one())
    }
}

/// Blanket implementation of `DistanceValue` for all types that satisfy the trait bounds.
impl<T> DistanceValue for T where
    T: PartialOrd
        + Copy
        + Display
        + Debug
        + Default
        + num_traits::Float
        + num_traits::NumAssign
        + core::iter::Sum
        + Send
        + Sync
{
}
