use super::error::ClusteringError;
use ndarray::{Array2, ArrayView2};

/// 经过校验的对称距离矩阵（方阵、非空、有限且非负）
///
/// The matrix is taken as-is: negative rounding noise has to be clamped by
/// whoever builds it, see [`crate::core::video::cosine_distance_matrix`].
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    values: Array2<f64>,
}

impl DistanceMatrix {
    pub fn new(values: Array2<f64>) -> Result<Self, ClusteringError> {
        let (rows, cols) = values.dim();
        if rows == 0 || cols == 0 {
            return Err(ClusteringError::EmptyMatrix);
        }
        if rows != cols {
            return Err(ClusteringError::NotSquare { rows, cols });
        }
        for ((row, col), &value) in values.indexed_iter() {
            if !value.is_finite() || value < 0.0 {
                return Err(ClusteringError::InvalidDistance { row, col, value });
            }
        }
        Ok(Self { values })
    }

    /// Builds a matrix from nested rows, as handed over by the Dart side.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ClusteringError> {
        let n = rows.len();
        if n == 0 {
            return Err(ClusteringError::EmptyMatrix);
        }
        let cols = rows[0].len();
        let mut flat = Vec::with_capacity(n * cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(ClusteringError::RaggedRow {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            flat.extend(values);
        }
        let values = Array2::from_shape_vec((n, cols), flat)
            .map_err(|_| ClusteringError::NotSquare { rows: n, cols })?;
        Self::new(values)
    }

    /// Number of leaves (frames) the matrix covers.
    pub fn n_leaves(&self) -> usize {
        self.values.nrows()
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[[row, col]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_valid_matrix() {
        let matrix = DistanceMatrix::new(array![[0.0, 0.5], [0.5, 0.0]]).unwrap();
        assert_eq!(matrix.n_leaves(), 2);
        assert_eq!(matrix.get(0, 1), 0.5);
    }

    #[test]
    fn test_rejects_non_square() {
        let err = DistanceMatrix::new(Array2::zeros((2, 3))).unwrap_err();
        assert_eq!(err, ClusteringError::NotSquare { rows: 2, cols: 3 });
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            DistanceMatrix::from_rows(vec![]).unwrap_err(),
            ClusteringError::EmptyMatrix
        );
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert_eq!(
            err,
            ClusteringError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_rejects_negative_and_nan() {
        let err = DistanceMatrix::new(array![[0.0, -0.1], [-0.1, 0.0]]).unwrap_err();
        assert!(matches!(err, ClusteringError::InvalidDistance { row: 0, col: 1, .. }));

        let err = DistanceMatrix::new(array![[0.0, f64::NAN], [0.3, 0.0]]).unwrap_err();
        assert!(matches!(err, ClusteringError::InvalidDistance { row: 0, col: 1, .. }));
    }
}
