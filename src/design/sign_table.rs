//! The 2^k sign table (design matrix).
//!
//! Row `i` is factorial run `i`; column `j` is the `j`-th effect in canonical
//! order. Entry `(i, j)` is the contrast sign of effect `j` in run `i`.
//!
//! ## Example
//!
//! ```
//! use twok::design::SignTable;
//!
//! let table = SignTable::new(2).unwrap();
//!
//! //        T   A   B  AB
//! // run 0 +1  -1  -1  +1
//! // run 1 +1  +1  -1  -1
//! // run 2 +1  -1  +1  -1
//! // run 3 +1  +1  +1  +1
//! assert_eq!(table.get(1, 1), Some(1));
//! assert_eq!(table.get(1, 3), Some(-1));
//! ```

use std::fmt;

use ndarray::{Array2, ArrayView1};
use tracing::debug;

use super::{canonical_power_set, Subset};
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::utils::MAX_FACTORS;

/// Signed `2^k × 2^k` design matrix with its column subsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignTable {
    factors: usize,
    subsets: Vec<Subset>,
    signs: Array2<i8>,
}

impl SignTable {
    /// Build the sign table for `factors` binary factors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] unless `2 <= factors <= 10`.
    pub fn new(factors: usize) -> Result<Self> {
        let subsets = canonical_power_set(factors)?;
        let runs = subsets.len();
        debug!(factors, runs, "building sign table");

        let mut signs = Array2::zeros((runs, runs));
        for (run, mut row) in signs.rows_mut().into_iter().enumerate() {
            for (col, subset) in subsets.iter().enumerate() {
                row[col] = subset.sign_for_run(run);
            }
        }

        Ok(Self {
            factors,
            subsets,
            signs,
        })
    }

    /// Assemble a table from already-computed parts.
    ///
    /// The caller guarantees that `subsets` is the canonical power set for
    /// `factors` and that `signs` was filled from it.
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    pub(crate) fn from_parts(factors: usize, subsets: Vec<Subset>, signs: Array2<i8>) -> Self {
        debug_assert!(factors <= MAX_FACTORS);
        debug_assert_eq!(signs.dim(), (subsets.len(), subsets.len()));
        Self {
            factors,
            subsets,
            signs,
        }
    }

    /// Number of factors k.
    #[must_use]
    pub fn factors(&self) -> usize {
        self.factors
    }

    /// Number of runs (and of columns), 2^k.
    #[must_use]
    pub fn runs(&self) -> usize {
        self.signs.nrows()
    }

    /// Column subsets in canonical order.
    #[must_use]
    pub fn subsets(&self) -> &[Subset] {
        &self.subsets
    }

    /// Raw ±1 entries.
    #[must_use]
    pub fn signs(&self) -> &Array2<i8> {
        &self.signs
    }

    /// Entry at `(run, col)`, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, run: usize, col: usize) -> Option<i8> {
        self.signs.get((run, col)).copied()
    }

    /// Column `idx` as a view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `idx >= runs()`.
    pub fn column(&self, idx: usize) -> Result<ArrayView1<'_, i8>> {
        if idx >= self.runs() {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                size: self.runs(),
            });
        }
        Ok(self.signs.column(idx))
    }

    /// Canonical column index of `subset`, if it belongs to this design.
    #[must_use]
    pub fn index_of(&self, subset: &Subset) -> Option<usize> {
        self.subsets.binary_search(subset).ok()
    }

    /// Convert to a real matrix for projection.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix {
        Matrix::new(self.signs.mapv(f64::from))
    }
}

impl fmt::Display for SignTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = self.subsets.iter().map(|s| format!("{s:>3}")).collect();
        writeln!(f, "2^{} sign table", self.factors)?;
        writeln!(f, "       {}", header.join(" "))?;
        for (run, row) in self.signs.rows().into_iter().enumerate() {
            let row_str: Vec<String> = row.iter().map(|v| format!("{v:>+3}")).collect();
            writeln!(f, "  {run:>4} {}", row_str.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_sign_table_k2() {
        let table = SignTable::new(2).unwrap();
        assert_eq!(
            table.signs(),
            &array![
                [1, -1, -1, 1],
                [1, 1, -1, -1],
                [1, -1, 1, -1],
                [1, 1, 1, 1],
            ]
        );
    }

    #[test]
    fn test_sign_table_shape_and_entries() {
        for k in 2..=10 {
            let table = SignTable::new(k).unwrap();
            let n = 1 << k;
            assert_eq!(table.signs().dim(), (n, n));
            assert!(table.signs().iter().all(|&v| v == 1 || v == -1));

            // Grand-mean column is all +1, every other column sums to zero
            assert!(table.column(0).unwrap().iter().all(|&v| v == 1));
            for col in 1..n {
                let sum: i64 = table
                    .column(col)
                    .unwrap()
                    .iter()
                    .map(|&v| i64::from(v))
                    .sum();
                assert_eq!(sum, 0, "k={k} column {col}");
            }
        }
    }

    #[test]
    fn test_sign_table_matches_sylvester_hadamard() {
        // Column S equals (-1)^|S| times the Walsh column of S's mask.
        let table = SignTable::new(5).unwrap();
        for (col, subset) in table.subsets().iter().enumerate() {
            for run in 0..table.runs() {
                let parity = (run & subset.mask()).count_ones() as usize + subset.len();
                let expected = if parity % 2 == 0 { 1 } else { -1 };
                assert_eq!(table.get(run, col), Some(expected));
            }
        }
    }

    #[test]
    fn test_sign_table_deterministic() {
        assert_eq!(SignTable::new(6).unwrap(), SignTable::new(6).unwrap());
    }

    #[test]
    fn test_sign_table_invalid_factors() {
        assert!(matches!(
            SignTable::new(1),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            SignTable::new(11),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_index_of() {
        let table = SignTable::new(3).unwrap();
        let bc = Subset::from_members(&[1, 2]).unwrap();
        assert_eq!(table.index_of(&bc), Some(6));
        assert_eq!(table.index_of(&Subset::empty()), Some(0));
        assert_eq!(table.index_of(&Subset::from_members(&[5]).unwrap()), None);
    }

    #[test]
    fn test_to_matrix() {
        let table = SignTable::new(2).unwrap();
        let m = table.to_matrix();
        assert_eq!(m.shape(), (4, 4));
        assert_eq!(m.get(0, 1), Some(-1.0));
        assert_eq!(m.get(3, 3), Some(1.0));
    }

    #[test]
    fn test_display() {
        let table = SignTable::new(2).unwrap();
        let text = table.to_string();
        assert!(text.starts_with("2^2 sign table"));
        assert!(text.contains(" AB"));
        assert!(text.contains("+1"));
        assert!(text.contains("-1"));
    }
}
