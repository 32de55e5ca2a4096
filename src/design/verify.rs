//! Sign table verification.
//!
//! Checks the properties every 2^k design matrix must have: entries are
//! ±1, effect columns are balanced, and distinct columns are orthogonal.

use tracing::debug;

use super::SignTable;

/// Result of verifying a sign table.
#[derive(Debug, Clone)]
pub struct OrthogonalityReport {
    /// Whether the table passes every check.
    pub is_valid: bool,
    /// Number of runs (rows) checked.
    pub runs: usize,
    /// Details about any issues found.
    pub issues: Vec<OrthogonalityIssue>,
}

/// A specific issue found during verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrthogonalityIssue {
    /// An entry is neither +1 nor -1.
    InvalidEntry { run: usize, column: usize, value: i8 },
    /// An effect column does not have as many +1 as -1 entries.
    UnbalancedColumn { column: usize, sum: i64 },
    /// Two distinct columns have a nonzero dot product.
    NotOrthogonal { left: usize, right: usize, dot: i64 },
    /// A column's dot product with itself is not the run count.
    WrongNorm { column: usize, norm: i64, expected: i64 },
}

/// Verify that a sign table is a valid orthogonal 2^k design.
///
/// # Algorithm
///
/// 1. Every entry must be +1 or -1
/// 2. Every column except the grand-mean column must sum to zero
/// 3. The Gram matrix `Mᵗ·M` must equal `2^k · I`
///
/// # Example
///
/// ```
/// use twok::design::{verify_sign_table, SignTable};
///
/// let report = verify_sign_table(&SignTable::new(4).unwrap());
/// assert!(report.is_valid);
/// ```
#[must_use]
pub fn verify_sign_table(table: &SignTable) -> OrthogonalityReport {
    let signs = table.signs();
    let runs = table.runs();
    let mut issues = Vec::new();

    for ((run, column), &value) in signs.indexed_iter() {
        if value != 1 && value != -1 {
            issues.push(OrthogonalityIssue::InvalidEntry { run, column, value });
        }
    }

    for column in 1..signs.ncols() {
        let sum: i64 = signs.column(column).iter().map(|&v| i64::from(v)).sum();
        if sum != 0 {
            issues.push(OrthogonalityIssue::UnbalancedColumn { column, sum });
        }
    }

    // Entries are small integers, so the f64 Gram matrix is exact.
    let real = signs.mapv(f64::from);
    let gram = real.t().dot(&real);
    let expected = runs as i64;
    for ((left, right), &dot) in gram.indexed_iter() {
        let dot = dot as i64;
        if left == right {
            if dot != expected {
                issues.push(OrthogonalityIssue::WrongNorm {
                    column: left,
                    norm: dot,
                    expected,
                });
            }
        } else if left < right && dot != 0 {
            issues.push(OrthogonalityIssue::NotOrthogonal { left, right, dot });
        }
    }

    debug!(runs, issues = issues.len(), "verified sign table");

    OrthogonalityReport {
        is_valid: issues.is_empty(),
        runs,
        issues,
    }
}
