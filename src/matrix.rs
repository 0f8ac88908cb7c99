//! Precomputed pairwise distance matrices.
//!
//! K-medoids never looks at coordinates: it only needs a dissimilarity
//! `d(i, j)` for every pair of items. [`DistanceMatrix`] holds those values
//! for `n` items and guarantees, once constructed, that the matrix is
//!
//! - square (`n × n`),
//! - finite and non-negative,
//! - zero on the diagonal,
//! - symmetric (within a small tolerance).
//!
//! Values are typically expensive to obtain (e.g. travel times from a routing
//! service), so [`DistanceMatrix::from_fn`] queries each unordered pair only
//! once and mirrors it. [`DistanceMatrix::pair_count`] tells a caller how many
//! queries such a fill will make.

use crate::error::{Error, Result};
use std::fmt::Display;

/// Default tolerance for the symmetry check.
///
/// Relative to the larger magnitude of the two entries, absolute below 1.
pub const DEFAULT_SYMMETRY_TOL: f64 = 1e-9;

/// A validated, immutable `n × n` matrix of pairwise distances.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    /// Row-major entries.
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Build from full rows, using [`DEFAULT_SYMMETRY_TOL`].
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if there are no rows.
    /// - [`Error::DimensionMismatch`] if any row is not of length `n`.
    /// - [`Error::MalformedMatrix`] if an entry is negative, non-finite,
    ///   on a non-zero diagonal, or differs from its mirror.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::with_symmetry_tol(rows, DEFAULT_SYMMETRY_TOL)
    }

    /// Build from full rows with a custom symmetry tolerance.
    pub fn with_symmetry_tol(rows: Vec<Vec<f64>>, tol: f64) -> Result<Self> {
        if !tol.is_finite() || tol < 0.0 {
            return Err(Error::InvalidParameter {
                name: "symmetry_tol",
                message: "must be finite and non-negative",
            });
        }

        let n = rows.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }

        let mut data = Vec::with_capacity(n * n);
        for row in rows {
            if row.len() != n {
                return Err(Error::DimensionMismatch {
                    expected: n,
                    found: row.len(),
                });
            }
            data.extend(row);
        }

        let matrix = Self { n, data };
        matrix.validate(tol)?;
        Ok(matrix)
    }

    /// Build from the strict lower triangle: row `i` holds `d(i, 0..i)`.
    ///
    /// The first row is therefore empty. Entries are mirrored into the upper
    /// triangle and the diagonal is zero.
    pub fn from_lower_triangle(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }

        let mut data = vec![0.0; n * n];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != i {
                return Err(Error::DimensionMismatch {
                    expected: i,
                    found: row.len(),
                });
            }
            for (j, &d) in row.iter().enumerate() {
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }

        let matrix = Self { n, data };
        matrix.validate(0.0)?;
        Ok(matrix)
    }

    /// Build by evaluating `dist(i, j)` once for every pair `j < i`.
    ///
    /// The value is mirrored to `(j, i)`, so `dist` does not need to be
    /// symmetric itself; only the lower-triangle direction is ever asked for.
    pub fn from_fn(n: usize, mut dist: impl FnMut(usize, usize) -> f64) -> Result<Self> {
        Self::try_from_fn(n, |i, j| Ok::<_, std::convert::Infallible>(dist(i, j)))
    }

    /// Fallible variant of [`DistanceMatrix::from_fn`].
    ///
    /// The first error returned by `dist` aborts the fill and is reported as
    /// [`Error::Other`]. No further pairs are queried after a failure.
    pub fn try_from_fn<E: Display>(
        n: usize,
        mut dist: impl FnMut(usize, usize) -> std::result::Result<f64, E>,
    ) -> Result<Self> {
        if n == 0 {
            return Err(Error::EmptyInput);
        }

        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..i {
                let d = dist(i, j).map_err(|e| Error::Other(e.to_string()))?;
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }

        let matrix = Self { n, data };
        matrix.validate(0.0)?;
        Ok(matrix)
    }

    /// Build from a square `ndarray` matrix.
    #[cfg(feature = "ndarray")]
    pub fn from_array(array: &ndarray::Array2<f64>) -> Result<Self> {
        let (rows, cols) = array.dim();
        if rows != cols {
            return Err(Error::DimensionMismatch {
                expected: rows,
                found: cols,
            });
        }
        Self::new(array.outer_iter().map(|row| row.to_vec()).collect())
    }

    /// Number of pairwise queries needed to fill a matrix of `n` items
    /// (one per unordered pair).
    pub fn pair_count(n: usize) -> usize {
        n * n.saturating_sub(1) / 2
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the matrix has no items. Never true for a constructed matrix.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between items `i` and `j`.
    ///
    /// # Panics
    ///
    /// If `i` or `j` is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "index ({i}, {j}) out of range");
        self.data[i * self.n + j]
    }

    /// All distances from item `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Total distance from item `i` to all items.
    pub fn row_sum(&self, i: usize) -> f64 {
        self.row(i).iter().sum()
    }

    fn validate(&self, tol: f64) -> Result<()> {
        let n = self.n;
        for i in 0..n {
            for j in 0..n {
                let d = self.data[i * n + j];
                let message = if !d.is_finite() {
                    "entry is not finite"
                } else if d < 0.0 {
                    "entry is negative"
                } else if i == j && d != 0.0 {
                    "diagonal entry is not zero"
                } else if j < i && !approx_eq(d, self.data[j * n + i], tol) {
                    "matrix is not symmetric"
                } else {
                    continue;
                };
                return Err(Error::MalformedMatrix {
                    row: i,
                    col: j,
                    message,
                });
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<Vec<f64>>> for DistanceMatrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(rows)
    }
}

#[inline]
fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * a.abs().max(b.abs()).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 1.0, 4.0],
            vec![1.0, 0.0, 2.0],
            vec![4.0, 2.0, 0.0],
        ]
    }

    #[test]
    fn test_new_accepts_valid_matrix() {
        let m = DistanceMatrix::new(square()).unwrap();
        assert_eq!(m.len(), 3);
        assert!(!m.is_empty());
        assert_eq!(m.get(0, 2), 4.0);
        assert_eq!(m.row(1), &[1.0, 0.0, 2.0]);
        assert_eq!(m.row_sum(2), 6.0);
    }

    #[test]
    fn test_empty_matrix_error() {
        let result = DistanceMatrix::new(vec![]);
        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn test_ragged_rows_error() {
        let rows = vec![vec![0.0, 1.0], vec![1.0]];
        let result = DistanceMatrix::new(rows);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_malformed_entries_rejected() {
        let mut negative = square();
        negative[0][1] = -1.0;
        negative[1][0] = -1.0;
        assert!(matches!(
            DistanceMatrix::new(negative),
            Err(Error::MalformedMatrix { row: 0, col: 1, .. })
        ));

        let mut diagonal = square();
        diagonal[1][1] = 0.5;
        assert!(matches!(
            DistanceMatrix::new(diagonal),
            Err(Error::MalformedMatrix { row: 1, col: 1, .. })
        ));

        let mut asymmetric = square();
        asymmetric[2][0] = 5.0;
        assert!(matches!(
            DistanceMatrix::new(asymmetric),
            Err(Error::MalformedMatrix { row: 2, col: 0, .. })
        ));

        let mut nan = square();
        nan[0][2] = f64::NAN;
        assert!(DistanceMatrix::new(nan).is_err());
    }

    #[test]
    fn test_symmetry_tolerance() {
        let mut rows = square();
        rows[2][0] = 4.0 + 1e-12;
        assert!(DistanceMatrix::new(rows.clone()).is_ok());

        rows[2][0] = 4.001;
        assert!(DistanceMatrix::new(rows.clone()).is_err());
        assert!(DistanceMatrix::with_symmetry_tol(rows, 1e-3).is_ok());

        assert!(DistanceMatrix::with_symmetry_tol(square(), -1.0).is_err());
    }

    #[test]
    fn test_from_lower_triangle_mirrors() {
        let m = DistanceMatrix::from_lower_triangle(vec![vec![], vec![1.0], vec![4.0, 2.0]])
            .unwrap();
        assert_eq!(m, DistanceMatrix::new(square()).unwrap());

        let bad = DistanceMatrix::from_lower_triangle(vec![vec![], vec![1.0, 2.0]]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_from_fn_queries_each_pair_once() {
        let mut calls = Vec::new();
        let m = DistanceMatrix::from_fn(4, |i, j| {
            calls.push((i, j));
            (i as f64 - j as f64).abs()
        })
        .unwrap();

        assert_eq!(calls.len(), DistanceMatrix::pair_count(4));
        assert!(calls.iter().all(|&(i, j)| j < i));
        assert_eq!(m.get(0, 3), 3.0);
        assert_eq!(m.get(3, 0), 3.0);
    }

    #[test]
    fn test_try_from_fn_stops_on_error() {
        let mut calls = 0;
        let result = DistanceMatrix::try_from_fn(5, |i, _| {
            calls += 1;
            if i == 2 {
                Err("route not found")
            } else {
                Ok(1.0)
            }
        });
        match result {
            Err(Error::Other(msg)) => assert_eq!(msg, "route not found"),
            other => panic!("unexpected result: {other:?}"),
        }
        // (1, 0) succeeded, (2, 0) failed.
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_pair_count() {
        assert_eq!(DistanceMatrix::pair_count(0), 0);
        assert_eq!(DistanceMatrix::pair_count(1), 0);
        assert_eq!(DistanceMatrix::pair_count(150), 11_175);
    }

    #[cfg(feature = "ndarray")]
    #[test]
    fn test_from_array() {
        let array = ndarray::arr2(&[[0.0, 1.0], [1.0, 0.0]]);
        let m = DistanceMatrix::from_array(&array).unwrap();
        assert_eq!(m.get(1, 0), 1.0);

        let rect = ndarray::Array2::<f64>::zeros((2, 3));
        assert!(DistanceMatrix::from_array(&rect).is_err());
    }
}
