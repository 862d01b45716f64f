//! A time-delay embedding view over a scalar series.

use ndarray::{ArrayView1, ShapeBuilder};

use crate::utils::DistanceValue;

use super::PointSet;

/// A point set of virtual D-vectors `[x_t, x_{t+tau}, ..., x_{t+(D-1)tau}]`
/// over a 1-D series, never materialized.
///
/// The `i`-th point is a strided view into the series starting at `i`, so the
/// set holds `len - (D - 1) * tau` points.
#[derive(Clone)]
pub struct DelayEmbedding<T: DistanceValue> {
    /// The underlying scalar series.
    series: Vec<T>,
    /// The embedding dimension D.
    dims: usize,
    /// The delay (stride) between consecutive components.
    tau: usize,
    /// The number of virtual points.
    cardinality: usize,
}

impl<T: DistanceValue> DelayEmbedding<T> {
    /// Creates a new `DelayEmbedding` over `series` with embedding dimension
    /// `dims` and delay `tau`.
    ///
    /// # Errors
    ///
    /// - If `dims` or `tau` is zero.
    /// - If the series is too short to hold even one embedded point.
    pub fn new(series: Vec<T>, dims: usize, tau: usize) -> Result<Self, String> {
        if dims == 0 {
            return Err("Embedding dimension must be at least 1".to_string());
        }
        if tau == 0 {
            return Err("Embedding delay must be at least 1".to_string());
        }
        let window = (dims - 1) * tau + 1;
        if series.len() < window {
            return Err(format!(
                "Series of length {} is too short for a delay embedding with dims {dims} and tau {tau}",
                series.len()
            ));
        }
        let cardinality = series.len() - (dims - 1) * tau;
        Ok(Self {
            series,
            dims,
            tau,
            cardinality,
        })
    }

    /// The embedding dimension D.
    #[must_use]
    pub const fn dims(&self) -> usize {
        self.dims
    }

    /// The delay between consecutive components.
    #[must_use]
    pub const fn tau(&self) -> usize {
        self.tau
    }
}

impl<T: DistanceValue> PointSet<T> for DelayEmbedding<T> {
    fn cardinality(&self) -> usize {
        self.cardinality
    }

    fn dimensionality(&self) -> usize {
        self.dims
    }

    fn point(&self, i: usize) -> ArrayView1<'_, T> {
        let window = &self.series[i..i + (self.dims - 1) * self.tau + 1];
        ArrayView1::from_shape((self.dims,).strides((self.tau,)), window)
            .unwrap_or_else(|_| unreachable!("The window length matches the embedding shape"))
    }
}
