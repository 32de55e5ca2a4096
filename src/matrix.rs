//! Dense real matrices with shape-checked algebra.
//!
//! [`Matrix`] wraps an `ndarray::Array2<f64>` and carries its own shape, so
//! the projection of observed data onto the sign table can reject
//! incompatible operands before any arithmetic happens.

use std::fmt;

use ndarray::{Array2, ArrayView1};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A dense `rows × cols` matrix of `f64`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Matrix {
    data: Array2<f64>,
}

impl Matrix {
    /// Wrap an existing array.
    #[must_use]
    pub fn new(data: Array2<f64>) -> Self {
        Self { data }
    }

    /// Create a matrix of zeros.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::new(Array2::zeros((rows, cols)))
    }

    /// Build a matrix from row-major nested vectors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShape`] if there are no rows, if the first
    /// row is empty, or if the rows have different lengths.
    ///
    /// # Example
    ///
    /// ```
    /// use twok::Matrix;
    ///
    /// let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(m.shape(), (2, 2));
    /// assert!(Matrix::from_rows(&[vec![1.0], vec![2.0, 3.0]]).is_err());
    /// ```
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let first = rows
            .first()
            .ok_or_else(|| Error::invalid_shape("matrix has no rows"))?;
        let cols = first.len();
        if cols == 0 {
            return Err(Error::invalid_shape("matrix has no columns"));
        }

        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(Error::invalid_shape(format!(
                "row {idx} has {} columns, expected {cols}",
                row.len()
            )));
        }

        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let data = Array2::from_shape_vec((rows.len(), cols), flat)
            .map_err(|e| Error::invalid_shape(e.to_string()))?;
        Ok(Self::new(data))
    }

    /// Build a single-column matrix from a vector.
    #[must_use]
    pub fn from_column(values: &[f64]) -> Self {
        let mut data = Array2::zeros((values.len(), 1));
        for (i, &v) in values.iter().enumerate() {
            data[[i, 0]] = v;
        }
        Self::new(data)
    }

    /// Number of rows.
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// Shape as `(rows, cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Get the value at a position, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    /// Borrow a column as a view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `idx >= ncols()`.
    pub fn column_view(&self, idx: usize) -> Result<ArrayView1<'_, f64>> {
        if idx >= self.ncols() {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                size: self.ncols(),
            });
        }
        Ok(self.data.column(idx))
    }

    /// Copy a column out as a vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `idx >= ncols()`.
    pub fn column(&self, idx: usize) -> Result<Vec<f64>> {
        Ok(self.column_view(idx)?.to_vec())
    }

    /// Copy the matrix out as row-major nested vectors.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.rows().into_iter().map(|r| r.to_vec()).collect()
    }

    /// Get a reference to the underlying data.
    #[must_use]
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Consume the matrix and return the underlying data.
    #[must_use]
    pub fn into_data(self) -> Array2<f64> {
        self.data
    }

    /// Return the transpose as a newly allocated matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::new(self.data.t().to_owned())
    }

    /// Multiply `self (a×b)` by `rhs (b×c)`, producing a fresh `a×c` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `self.ncols() != rhs.nrows()`.
    ///
    /// # Example
    ///
    /// ```
    /// use twok::Matrix;
    ///
    /// let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// let b = Matrix::from_column(&[1.0, 1.0]);
    /// let c = a.multiply(&b).unwrap();
    /// assert_eq!(c.column(0).unwrap(), vec![3.0, 7.0]);
    ///
    /// let bad = Matrix::from_column(&[1.0, 1.0, 1.0]);
    /// assert!(a.multiply(&bad).is_err());
    /// ```
    pub fn multiply(&self, rhs: &Self) -> Result<Self> {
        if self.ncols() != rhs.nrows() {
            return Err(Error::DimensionMismatch {
                expected: format!("{} rows in right operand", self.ncols()),
                actual: format!("{}x{} right operand", rhs.nrows(), rhs.ncols()),
            });
        }
        Ok(Self::new(self.data.dot(&rhs.data)))
    }

    /// Return a copy with every entry multiplied by `factor`.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.data.mapv(|v| v * factor))
    }
}

impl From<Array2<f64>> for Matrix {
    fn from(data: Array2<f64>) -> Self {
        Self::new(data)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[")?;
        for row in self.data.rows() {
            let row_str: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(f, "  [{}]", row_str.join(", "))?;
        }
        write!(f, "]")
    }
}
