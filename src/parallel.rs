//! Parallel analysis support.
//!
//! This module provides parallel versions of the sign table builder and the
//! analysis pipeline using Rayon. Enable with the `parallel` feature flag.
//!
//! # Usage
//!
//! ```ignore
//! use twok::parallel::par_analyze;
//! use twok::AnalysisConfig;
//!
//! let data = vec![vec![0.0], vec![10.0], vec![0.0], vec![10.0]];
//! let result = par_analyze(&data, &AnalysisConfig::default()).unwrap();
//! assert_eq!(result.columns[0].decomposition.fraction("A"), Some(1.0));
//! ```
//!
//! # Performance
//!
//! Parallel analysis is most beneficial for:
//! - Large designs (k ≥ 8, i.e. 256+ runs)
//! - Many measured series (columns)
//!
//! For small designs the sequential versions may be faster due to
//! parallelization overhead. Results are identical either way: no column's
//! decomposition reads another column's state.

use ndarray::Array2;
use rayon::prelude::*;
use tracing::debug;

use crate::analysis::{coefficient_matrix, AnalysisConfig, FactorialAnalysis};
use crate::design::{canonical_power_set, SignTable};
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::naming::NameTable;
use crate::utils::factors_for_runs;

/// Build the sign table with rows generated in parallel.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidArgument`] unless `2 <= factors <= 10`.
pub fn par_sign_table(factors: usize) -> Result<SignTable> {
    let subsets = canonical_power_set(factors)?;
    let runs = subsets.len();
    debug!(factors, runs, "building sign table in parallel");

    let rows: Vec<Vec<i8>> = (0..runs)
        .into_par_iter()
        .map(|run| subsets.iter().map(|s| s.sign_for_run(run)).collect())
        .collect();

    let mut signs = Array2::zeros((runs, runs));
    for (run, row) in rows.into_iter().enumerate() {
        for (col, sign) in row.into_iter().enumerate() {
            signs[[run, col]] = sign;
        }
    }

    Ok(SignTable::from_parts(factors, subsets, signs))
}

/// Run a complete 2^k factorial analysis, decomposing columns in parallel.
///
/// # Errors
///
/// Same as [`crate::analysis::analyze`]. When several columns fail, the
/// error of one of them is returned.
pub fn par_analyze(data: &[Vec<f64>], config: &AnalysisConfig) -> Result<FactorialAnalysis> {
    let matrix = Matrix::from_rows(data)?;
    par_analyze_matrix(&matrix, config)
}

/// Parallel version of [`crate::analysis::analyze_matrix`].
///
/// # Errors
///
/// Same as [`crate::analysis::analyze`].
pub fn par_analyze_matrix(data: &Matrix, config: &AnalysisConfig) -> Result<FactorialAnalysis> {
    if data.ncols() == 0 {
        return Err(Error::invalid_shape("data has no columns"));
    }
    let factors = factors_for_runs(data.nrows())?;
    let table = par_sign_table(factors)?;
    let names = NameTable::new(factors)?;

    let q = coefficient_matrix(&table, data)?;
    debug!(factors, columns = data.ncols(), "projected data onto sign table");

    // Indexed parallel collect keeps input column order.
    let columns = (0..data.ncols())
        .into_par_iter()
        .map(|column| crate::analysis::decompose_column(&q, column, &names, config))
        .collect::<Result<Vec<_>>>()?;

    Ok(FactorialAnalysis {
        factors,
        runs: table.runs(),
        columns,
    })
}
