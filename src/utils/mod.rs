//! Bit and factor-count helpers shared by the design and analysis modules.
//!
//! A 2^k experiment identifies each run by an integer whose bit `f` tells
//! whether factor `f` is at its high level. Everything in this crate relies
//! on that convention, so the helpers for it live here.

use crate::error::{Error, Result};

/// Smallest supported number of factors.
pub const MIN_FACTORS: usize = 2;

/// Largest supported number of factors.
pub const MAX_FACTORS: usize = 10;

/// Tell whether factor `bit` is at its high level in run `run`.
///
/// # Examples
///
/// ```
/// use twok::utils::bit_on;
///
/// assert!(bit_on(0b101, 0));
/// assert!(!bit_on(0b101, 1));
/// assert!(bit_on(0b101, 2));
/// ```
#[inline]
#[must_use]
pub fn bit_on(run: usize, bit: usize) -> bool {
    run & (1 << bit) != 0
}

/// Check that `factors` lies in `MIN_FACTORS..=MAX_FACTORS`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] naming the `factors` parameter.
pub fn validate_factors(factors: usize) -> Result<()> {
    if (MIN_FACTORS..=MAX_FACTORS).contains(&factors) {
        Ok(())
    } else {
        Err(Error::InvalidArgument {
            parameter: "factors",
            value: factors,
            min: MIN_FACTORS,
            max: MAX_FACTORS,
        })
    }
}

/// Number of runs in a full 2^k design.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `factors` is out of range.
///
/// # Examples
///
/// ```
/// use twok::utils::runs_for;
///
/// assert_eq!(runs_for(3).unwrap(), 8);
/// assert!(runs_for(1).is_err());
/// ```
pub fn runs_for(factors: usize) -> Result<usize> {
    validate_factors(factors)?;
    Ok(1 << factors)
}

/// Recover k from the row count of a 2^k data matrix.
///
/// # Errors
///
/// Returns [`Error::InvalidShape`] if `rows` is not a power of two, or if
/// its base-2 logarithm is outside `MIN_FACTORS..=MAX_FACTORS`.
///
/// # Examples
///
/// ```
/// use twok::utils::factors_for_runs;
///
/// assert_eq!(factors_for_runs(16).unwrap(), 4);
/// assert!(factors_for_runs(5).is_err());
/// assert!(factors_for_runs(2).is_err());
/// ```
pub fn factors_for_runs(rows: usize) -> Result<usize> {
    if !rows.is_power_of_two() {
        return Err(Error::invalid_shape(format!(
            "row count {rows} is not a power of two"
        )));
    }

    let factors = rows.trailing_zeros() as usize;
    if !(MIN_FACTORS..=MAX_FACTORS).contains(&factors) {
        return Err(Error::invalid_shape(format!(
            "row count {rows} = 2^{factors}, but k must be in {MIN_FACTORS}..={MAX_FACTORS}"
        )));
    }

    Ok(factors)
}
