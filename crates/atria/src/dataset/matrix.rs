//! A dense, matrix-backed point set.

use ndarray::{Array2, ArrayView1};

use crate::utils::DistanceValue;

use super::PointSet;

/// A point set stored as a row-major N-by-D matrix, one point per row.
#[derive(Clone)]
pub struct MatrixSet<T: DistanceValue> {
    /// The points, one per row.
    data: Array2<T>,
}

impl<T: DistanceValue> MatrixSet<T> {
    /// Creates a new `MatrixSet` from an N-by-D matrix.
    ///
    /// # Errors
    ///
    /// - If the matrix has no rows or no columns.
    pub fn new(data: Array2<T>) -> Result<Self, String> {
        if data.nrows() == 0 {
            Err("Cannot create a MatrixSet with no points".to_string())
        } else if data.ncols() == 0 {
            Err("Cannot create a MatrixSet with zero-dimensional points".to_string())
        } else {
            Ok(Self { data })
        }
    }

    /// Creates a new `MatrixSet` from one `Vec` per point.
    ///
    /// # Errors
    ///
    /// - If `rows` is empty, the first row is empty, or the rows do not all
    ///   have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, String> {
        let n = rows.len();
        if n == 0 {
            return Err("Cannot create a MatrixSet with no points".to_string());
        }
        let d = rows[0].len();
        if rows.iter().any(|row| row.len() != d) {
            return Err("All points must have the same dimensionality".to_string());
        }
        let flat = rows.into_iter().flatten().collect::<Vec<_>>();
        let data = Array2::from_shape_vec((n, d), flat)
            .map_err(|e| format!("Malformed point matrix: {e}"))?;
        Self::new(data)
    }
}

impl<T: DistanceValue> PointSet<T> for MatrixSet<T> {
    fn cardinality(&self) -> usize {
        self.data.nrows()
    }

    fn dimensionality(&self) -> usize {
        self.data.ncols()
    }

    fn point(&self, i: usize) -> ArrayView1<'_, T> {
        self.data.row(i)
    }
}
