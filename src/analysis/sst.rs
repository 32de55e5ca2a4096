//! Sum-of-squares decomposition of a coefficient vector.
//!
//! For a 2^k design with coefficient vector q:
//! - `SS[j] = 2^k · q[j]²` for every effect `j > 0`
//! - `SS[0] = Σ_{j>0} SS[j]`, the total explained sum of squares
//! - `fraction[j] = SS[j] / SS[0]`
//!
//! The grand mean `q[0]` never contributes to `SS[0]`.

use tracing::{trace, warn};

use super::types::{AnalysisConfig, DegeneratePolicy, Decomposition, SumsOfSquares, Variation};
use crate::error::{Error, Result};
use crate::naming::{strip_label, NameTable};

/// Sums of squares in canonical effect order, with the total at index 0.
///
/// # Example
///
/// ```
/// use twok::analysis::sums_of_squares;
///
/// let ss = sums_of_squares(&[5.0, 5.0, 0.0, 1.0]);
/// assert_eq!(ss, vec![104.0, 100.0, 0.0, 4.0]);
/// ```
#[must_use]
pub fn sums_of_squares(coefficients: &[f64]) -> Vec<f64> {
    let runs = coefficients.len() as f64;
    let mut ss: Vec<f64> = coefficients.iter().map(|q| runs * q * q).collect();
    if let Some(first) = ss.first_mut() {
        *first = 0.0;
    }
    let total: f64 = ss.iter().sum();
    if let Some(first) = ss.first_mut() {
        *first = total;
    }
    ss
}

/// Decompose a coefficient vector into sums of squares and variation.
///
/// # Arguments
/// * `coefficients` - q vector in canonical effect order
/// * `names` - Label table for the same design
/// * `config` - Analysis configuration (degenerate policy and tolerance)
///
/// # Returns
/// * Decomposition with the raw coefficients, sums of squares in label
///   display order and variation sorted weakest first
///
/// # Errors
/// * [`Error::DimensionMismatch`] if `coefficients.len() != names.len()`
/// * [`Error::DegenerateDecomposition`] if the total is zero and the policy
///   is [`DegeneratePolicy::Fail`]
///
/// # Example
///
/// ```
/// use twok::analysis::{decompose, AnalysisConfig};
/// use twok::naming::NameTable;
///
/// let names = NameTable::new(2).unwrap();
/// let d = decompose(&[5.0, 5.0, 0.0, 0.0], &names, &AnalysisConfig::default()).unwrap();
///
/// assert_eq!(d.sum_of_squares("SST"), Some(100.0));
/// assert_eq!(d.strongest().unwrap().group, "A");
/// assert_eq!(d.fraction("A"), Some(1.0));
/// ```
pub fn decompose(
    coefficients: &[f64],
    names: &NameTable,
    config: &AnalysisConfig,
) -> Result<Decomposition> {
    if coefficients.len() != names.len() {
        return Err(Error::DimensionMismatch {
            expected: format!("{} coefficients", names.len()),
            actual: format!("{} coefficients", coefficients.len()),
        });
    }

    let ss = sums_of_squares(coefficients);
    let total = ss[0];

    let runs = coefficients.len() as f64;
    let grand = runs * coefficients[0] * coefficients[0];
    let step = runs * config.zero_tolerance;
    // Also true for an exact zero total when the grand mean is zero
    let degenerate = total <= runs * step * step * grand;

    if degenerate {
        match config.degenerate_policy {
            DegeneratePolicy::Fail => {
                return Err(Error::degenerate(format!(
                    "total sum of squares {total} is zero for {} effects",
                    names.len() - 1
                )));
            }
            DegeneratePolicy::ZeroFractions => {
                warn!(total, "total sum of squares is zero; reporting zero fractions");
            }
        }
    }

    let sums_of_squares = SumsOfSquares::new(
        names
            .display_order()
            .map(|(idx, label)| (label.to_string(), ss[idx]))
            .collect(),
    );

    let mut variation: Vec<Variation> = names
        .labels()
        .iter()
        .zip(&ss)
        .skip(1)
        .map(|(label, &value)| Variation {
            group: strip_label(label).to_string(),
            fraction: if degenerate { 0.0 } else { value / total },
        })
        .collect();
    variation.sort_by(|a, b| {
        a.fraction
            .partial_cmp(&b.fraction)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    trace!(total, effects = variation.len(), "decomposed coefficients");

    Ok(Decomposition {
        coefficients: coefficients.to_vec(),
        sums_of_squares,
        variation,
        degenerate,
    })
}
