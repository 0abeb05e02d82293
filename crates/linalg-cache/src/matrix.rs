//! Dense row-major matrix storage.
//!
//! `Matrix` does not require squareness: shape is only checked by the
//! inversion routine, at solve time.

use core::fmt;
use core::ops::Index;

use crate::{Element, LinalgError, LinalgResult};

/// Dense matrix stored row-major. `data.len() == rows * cols` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T: Element = f64> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Element> Matrix<T> {
    /// Build a matrix from a row-major buffer.
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> LinalgResult<Self> {
        if data.len() != rows * cols {
            return Err(LinalgError::InvalidShape {
                reason: format!(
                    "buffer of length {} does not match {}×{}",
                    data.len(),
                    rows,
                    cols
                ),
            });
        }

        Ok(Self { rows, cols, data })
    }

    /// Build a matrix from nested rows. Ragged rows are rejected.
    ///
    /// ```
    /// use linalg_cache::Matrix;
    ///
    /// let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(m[(1, 0)], 3.0);
    /// ```
    pub fn from_rows(rows: Vec<Vec<T>>) -> LinalgResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);

        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(LinalgError::InvalidShape {
                    reason: format!(
                        "row {} has {} columns, expected {}",
                        i,
                        row.len(),
                        n_cols
                    ),
                });
            }
            data.extend(row);
        }

        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// All-zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::default(); rows * cols],
        }
    }

    /// `n×n` identity.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        let one = T::from_working(1.0);
        for i in 0..n {
            m.data[i * n + i] = one;
        }
        m
    }

    /// The 0×0 placeholder matrix.
    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            data: Vec::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Slice of one row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Widen every element to working precision.
    pub fn to_working(&self) -> Vec<f64> {
        self.data.iter().map(|x| x.to_working()).collect()
    }

    /// Narrow a working-precision buffer into a matrix.
    pub fn from_working(rows: usize, cols: usize, data: &[f64]) -> LinalgResult<Self> {
        Self::new(
            rows,
            cols,
            data.iter().map(|&x| T::from_working(x)).collect(),
        )
    }
}

impl<T: Element> Default for Matrix<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Element> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}×{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl<T: Element> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows == 0 || self.cols == 0 {
            return write!(f, "[]");
        }

        for i in 0..self.rows {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for (j, x) in self.row(i).iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", x.to_working())?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// Shape label used in error messages, e.g. `"3×2"`.
pub(crate) fn shape_label<T: Element>(m: &Matrix<T>) -> String {
    format!("{}×{}", m.rows, m.cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_row_major() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert!(!m.is_square());
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!(m[(0, 2)], 3.0);
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, LinalgError::InvalidShape { .. }));
    }

    #[test]
    fn test_new_length_mismatch() {
        let err = Matrix::<f64>::new(2, 2, vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            LinalgError::InvalidShape {
                reason: "buffer of length 3 does not match 2×2".to_string()
            }
        );
    }

    #[test]
    fn test_identity_and_empty() {
        let id = Matrix::<f32>::identity(3);
        assert_eq!(id.get(1, 1), Some(1.0));
        assert_eq!(id.get(1, 2), Some(0.0));
        assert_eq!(id.get(3, 0), None);

        let empty = Matrix::<f64>::default();
        assert!(empty.is_empty());
        assert!(empty.is_square());
        assert_eq!(empty.shape(), (0, 0));
        assert_eq!(Matrix::<f64>::from_rows(Vec::new()).unwrap(), empty);
    }

    #[test]
    fn test_display() {
        let m = Matrix::from_rows(vec![vec![1.0, 0.5], vec![0.0, 2.0]]).unwrap();
        assert_eq!(format!("{}", m), "[1, 0.5]\n[0, 2]");
        assert_eq!(format!("{}", Matrix::<f64>::empty()), "[]");
    }

    #[test]
    fn test_shape_label() {
        assert_eq!(shape_label(&Matrix::<f64>::zeros(3, 2)), "3×2");
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_out_of_bounds() {
        let m = Matrix::<f64>::identity(2);
        let _ = m[(0, 2)];
    }
}
