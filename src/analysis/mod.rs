//! 2^k factorial analysis.
//!
//! This module turns a `2^k × n` data matrix into one sum-of-squares
//! decomposition per data column:
//! - Sign table construction for the k factors
//! - Projection of the data onto the sign table (effect coefficients)
//! - Sum of squares and variation fractions per effect
//!
//! ## Quick Start
//!
//! ```rust
//! use twok::analysis::{analyze, AnalysisConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Four runs (k = 2), two measured series. Row i is the run whose
//! // binary encoding is i: bit 0 is factor A, bit 1 is factor B.
//! let data = vec![
//!     vec![0.0, 10.0],
//!     vec![10.0, 10.0],
//!     vec![0.0, 30.0],
//!     vec![10.0, 30.0],
//! ];
//!
//! let result = analyze(&data, &AnalysisConfig::default())?;
//!
//! assert_eq!(result.factors, 2);
//! assert_eq!(result.columns[0].decomposition.fraction("A"), Some(1.0));
//! assert_eq!(result.columns[1].decomposition.fraction("B"), Some(1.0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Coefficients
//!
//! With sign table M, the coefficient vector of a data column y is
//! `q = Mᵗ·y / 2^k`. `q[0]` is the grand mean and `q[j]` the estimated
//! effect of the j-th subset in canonical order.
//!
//! ## Variation
//!
//! Each effect's sum of squares `2^k · q[j]²` is divided by the total over
//! all effects (grand mean excluded). Effects are reported weakest first.

mod sst;
mod types;

pub use sst::{decompose, sums_of_squares};
pub use types::{
    AnalysisConfig, ColumnReport, DegeneratePolicy, Decomposition, FactorialAnalysis,
    SumsOfSquares, Variation,
};

use tracing::debug;

use crate::design::SignTable;
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::naming::NameTable;
use crate::utils::factors_for_runs;

/// Run a complete 2^k factorial analysis.
///
/// # Arguments
/// * `data` - Observations organized as `Vec<Vec<f64>>` where the outer vec
///   is runs (`2^k` of them, in binary counting order) and the inner vec is
///   measured series
/// * `config` - Analysis configuration
///
/// # Returns
/// * One [`ColumnReport`] per data column, in input order
///
/// # Errors
/// * [`Error::InvalidShape`] if the data is empty, ragged or has no columns,
///   or its row count is not `2^k` for k in `2..=10`
/// * [`Error::DegenerateDecomposition`] if a column has zero total sum of
///   squares and the policy is [`DegeneratePolicy::Fail`]
pub fn analyze(data: &[Vec<f64>], config: &AnalysisConfig) -> Result<FactorialAnalysis> {
    let matrix = Matrix::from_rows(data)?;
    analyze_matrix(&matrix, config)
}

/// Run a complete 2^k factorial analysis on a [`Matrix`].
///
/// # Errors
///
/// Same as [`analyze`].
pub fn analyze_matrix(data: &Matrix, config: &AnalysisConfig) -> Result<FactorialAnalysis> {
    if data.ncols() == 0 {
        return Err(Error::invalid_shape("data has no columns"));
    }
    let factors = factors_for_runs(data.nrows())?;
    let table = SignTable::new(factors)?;
    let names = NameTable::new(factors)?;

    let q = coefficient_matrix(&table, data)?;
    debug!(factors, columns = data.ncols(), "projected data onto sign table");

    let columns = (0..data.ncols())
        .map(|column| decompose_column(&q, column, &names, config))
        .collect::<Result<Vec<_>>>()?;

    Ok(FactorialAnalysis {
        factors,
        runs: table.runs(),
        columns,
    })
}

/// Effect coefficients for every data column: `Mᵗ·data / 2^k`.
///
/// Column `c` of the result is the q vector of data column `c`.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if `data` does not have one row per
/// run of `table`.
///
/// # Example
///
/// ```
/// use twok::analysis::coefficient_matrix;
/// use twok::design::SignTable;
/// use twok::Matrix;
///
/// let table = SignTable::new(2).unwrap();
/// let data = Matrix::from_column(&[1.0, 1.0, 1.0, 1.0]);
/// let q = coefficient_matrix(&table, &data).unwrap();
/// assert_eq!(q.column(0).unwrap(), vec![1.0, 0.0, 0.0, 0.0]);
/// ```
pub fn coefficient_matrix(table: &SignTable, data: &Matrix) -> Result<Matrix> {
    let projected = table.to_matrix().transpose().multiply(data)?;
    Ok(projected.scale(1.0 / table.runs() as f64))
}

/// Decompose column `column` of a coefficient matrix.
pub(crate) fn decompose_column(
    q: &Matrix,
    column: usize,
    names: &NameTable,
    config: &AnalysisConfig,
) -> Result<ColumnReport> {
    let coefficients = q.column(column)?;
    let decomposition = decompose(&coefficients, names, config).map_err(|e| match e {
        Error::DegenerateDecomposition { message } => {
            Error::degenerate(format!("column {column}: {message}"))
        }
        other => other,
    })?;
    debug!(
        column,
        total_ss = decomposition.total_ss(),
        strongest = decomposition.strongest().map(|v| v.group.as_str()),
        "decomposed column"
    );

    Ok(ColumnReport {
        column,
        decomposition,
    })
}
