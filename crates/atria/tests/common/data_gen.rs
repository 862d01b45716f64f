//! Data generation utilities for testing.

use rand::SeedableRng;

/// Seeded random tabular data in `[min, max]`.
pub fn tabular(car: usize, dim: usize, min: f32, max: f32, seed: u64) -> Vec<Vec<f32>> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    symagen::random_data::random_tabular_floats(car, dim, min, max, &mut rng)
}

/// The points of scenario S1: a tiny 2-D set with known neighbors.
pub fn tiny() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 0.0],
        vec![3.0, 4.0],
        vec![1.0, 1.0],
        vec![5.0, 0.0],
    ]
}

/// A slow sine sweep, for delay-embedding tests.
pub fn sine_series(len: usize) -> Vec<f64> {
    (0..len).map(|t| (t as f64 / 10.0).sin()).collect()
}
