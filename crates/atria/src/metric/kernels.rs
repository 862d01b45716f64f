//! Low-level distance kernels.
//!
//! Everything here is bounded on the `distances` crate's numeric traits and
//! nothing else, so the kernel bodies resolve against exactly one trait
//! family. Contiguous slices go through [`distances::vectors`]; strided views
//! and the threshold-aware forms are component-wise loops in the same shape.

use distances::number::Float;
use ndarray::ArrayView1;

/// Euclidean distance between two contiguous slices.
pub fn euclidean<T: Float>(x: &[T], y: &[T]) -> T {
    distances::vectors::euclidean(x, y)
}

/// Euclidean distance between two (possibly strided) views.
pub fn euclidean_strided<T: Float>(x: ArrayView1<T>, y: ArrayView1<T>) -> T {
    x.iter()
        .zip(y.iter())
        .map(|(a, &b)| a.abs_diff(b))
        .map(|v| v * v)
        .sum::<T>()
        .sqrt()
}

/// Euclidean distance with early exit past `threshold`.
///
/// Partial sums are screened against the squared threshold, and an exit is
/// taken only once the rooted partial sum itself exceeds the threshold. The
/// partial sum never decreases and `sqrt` is monotone, so an exit implies the
/// full distance would exceed the threshold too.
pub fn euclidean_upto<T: Float>(x: ArrayView1<T>, y: ArrayView1<T>, threshold: T) -> T {
    let threshold_sq = threshold * threshold;
    let mut sum = T::from(0);
    for (a, &b) in x.iter().zip(y.iter()) {
        let v = a.abs_diff(b);
        sum = sum + v * v;
        if sum > threshold_sq {
            let rooted = sum.sqrt();
            if rooted > threshold {
                return rooted;
            }
        }
    }
    sum.sqrt()
}

/// Chebyshev distance between two contiguous slices.
pub fn chebyshev<T: Float>(x: &[T], y: &[T]) -> T {
    distances::vectors::chebyshev(x, y)
}

/// Chebyshev distance between two (possibly strided) views.
pub fn chebyshev_strided<T: Float>(x: ArrayView1<T>, y: ArrayView1<T>) -> T {
    x.iter()
        .zip(y.iter())
        .map(|(a, &b)| a.abs_diff(b))
        .fold(T::from(0), |max, v| if v > max { v } else { max })
}

/// Chebyshev distance with early exit past `threshold`.
pub fn chebyshev_upto<T: Float>(x: ArrayView1<T>, y: ArrayView1<T>, threshold: T) -> T {
    let mut max = T::from(0);
    for (a, &b) in x.iter().zip(y.iter()) {
        let v = a.abs_diff(b);
        if v > max {
            max = v;
            if max > threshold {
                return max;
            }
        }
    }
    max
}

/// Manhattan distance between two contiguous slices.
pub fn manhattan<T: Float>(x: &[T], y: &[T]) -> T {
    distances::vectors::manhattan(x, y)
}

/// Manhattan distance between two (possibly strided) views.
pub fn manhattan_strided<T: Float>(x: ArrayView1<T>, y: ArrayView1<T>) -> T {
    x.iter().zip(y.iter()).map(|(a, &b)| a.abs_diff(b)).sum()
}

/// Manhattan distance with early exit past `threshold`.
///
/// The running sum only grows, so the moment it exceeds the threshold it is a
/// valid over-threshold return value.
pub fn manhattan_upto<T: Float>(x: ArrayView1<T>, y: ArrayView1<T>, threshold: T) -> T {
    let mut sum = T::from(0);
    for (a, &b) in x.iter().zip(y.iter()) {
        sum = sum + a.abs_diff(b);
        if sum > threshold {
            return sum;
        }
    }
    sum
}
