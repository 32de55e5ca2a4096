//! Factorial design structures: interaction subsets and the power set.
//!
//! ## Overview
//!
//! - [`Subset`]: a set of factor indices naming one effect or interaction
//! - [`power_set`]: every subset of `{0..k-1}`, indexed by run number
//! - [`canonical_power_set`]: the same subsets in effect order
//! - [`SignTable`]: the `2^k × 2^k` ±1 design matrix
//!
//! ## Orders
//!
//! Two orders over subsets are used throughout the crate. *Run order* is the
//! binary counting order: subset `i` holds the factors whose bit is set in
//! `i`. *Canonical order* sorts by size, then lexicographically by member
//! indices:
//!
//! ```text
//! {} < {0} < {1} < {2} < {0,1} < {0,2} < {1,2} < {0,1,2}
//! ```
//!
//! Sign-table columns and reported effects follow canonical order; rows of
//! data and of the sign table follow run order.

mod sign_table;
mod verify;

pub use sign_table::SignTable;
pub use verify::{verify_sign_table, OrthogonalityIssue, OrthogonalityReport};

use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::naming;
use crate::utils::{bit_on, validate_factors, MAX_FACTORS};

/// A set of factor indices identifying one effect.
///
/// The empty subset stands for the grand mean (or grand total), a singleton
/// for a main effect and anything larger for an interaction. Members are
/// always kept sorted and free of duplicates.
///
/// `Ord` orders subsets by size first and then lexicographically by their
/// members, which is the canonical column order of the sign table.
///
/// With the `serde` feature a subset serializes as its member list, and
/// deserializing goes through [`Subset::from_members`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<usize>", into = "Vec<usize>")
)]
pub struct Subset {
    mask: usize,
    members: Vec<usize>,
}

impl Subset {
    /// The empty subset (grand mean).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            mask: 0,
            members: Vec::new(),
        }
    }

    /// Build the subset of factors whose bit is set in `mask`, looking at the
    /// low `factors` bits only.
    ///
    /// # Example
    ///
    /// ```
    /// use twok::design::Subset;
    ///
    /// let s = Subset::from_mask(0b101, 3);
    /// assert_eq!(s.members(), &[0, 2]);
    /// ```
    #[must_use]
    pub fn from_mask(mask: usize, factors: usize) -> Self {
        let members: Vec<usize> = (0..factors.min(usize::BITS as usize))
            .filter(|&f| bit_on(mask, f))
            .collect();
        let mask = members.iter().fold(0usize, |m, &f| m | (1usize << f));
        Self { mask, members }
    }

    /// Build a subset from factor indices in any order. Duplicates collapse.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if an index is `>= MAX_FACTORS`.
    pub fn from_members(members: &[usize]) -> Result<Self> {
        if let Some(&bad) = members.iter().find(|&&f| f >= MAX_FACTORS) {
            return Err(Error::InvalidArgument {
                parameter: "factor index",
                value: bad,
                min: 0,
                max: MAX_FACTORS - 1,
            });
        }
        let mask = members.iter().fold(0usize, |m, &f| m | (1usize << f));
        Ok(Self::from_mask(mask, MAX_FACTORS))
    }

    /// Bitmask with bit `f` set for every member `f`.
    #[must_use]
    pub fn mask(&self) -> usize {
        self.mask
    }

    /// Member factor indices in increasing order.
    #[must_use]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Number of factors in the subset (the interaction order).
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether this is the grand-mean subset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether factor `factor` is a member.
    #[must_use]
    pub fn contains(&self, factor: usize) -> bool {
        factor < usize::BITS as usize && bit_on(self.mask, factor)
    }

    /// Sign of this effect's contrast in run `run`.
    ///
    /// The product over members of `+1` where the factor is high in `run`
    /// and `-1` where it is low. The empty subset is `+1` everywhere.
    ///
    /// # Example
    ///
    /// ```
    /// use twok::design::Subset;
    ///
    /// let ab = Subset::from_mask(0b11, 2);
    /// assert_eq!(ab.sign_for_run(0b00), 1);
    /// assert_eq!(ab.sign_for_run(0b01), -1);
    /// assert_eq!(ab.sign_for_run(0b11), 1);
    /// ```
    #[must_use]
    pub fn sign_for_run(&self, run: usize) -> i8 {
        self.members
            .iter()
            .fold(1, |sign, &f| if bit_on(run, f) { sign } else { -sign })
    }
}

impl TryFrom<Vec<usize>> for Subset {
    type Error = Error;

    fn try_from(members: Vec<usize>) -> Result<Self> {
        Self::from_members(&members)
    }
}

impl From<Subset> for Vec<usize> {
    fn from(subset: Subset) -> Self {
        subset.members
    }
}

impl Ord for Subset {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.members.cmp(&other.members))
    }
}

impl PartialOrd for Subset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&naming::group_name(self))
    }
}

/// Every subset of `{0..factors-1}` in run order.
///
/// Entry `i` holds the factors whose bit is set in `i`, so the position in
/// the returned vector is the factorial run identifier.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] unless `2 <= factors <= 10`.
///
/// # Example
///
/// ```
/// use twok::design::power_set;
///
/// let pset = power_set(2).unwrap();
/// assert_eq!(pset.len(), 4);
/// assert!(pset[0].is_empty());
/// assert_eq!(pset[1].members(), &[0]);
/// assert_eq!(pset[2].members(), &[1]);
/// assert_eq!(pset[3].members(), &[0, 1]);
/// ```
pub fn power_set(factors: usize) -> Result<Vec<Subset>> {
    validate_factors(factors)?;
    Ok((0..1usize << factors)
        .map(|run| Subset::from_mask(run, factors))
        .collect())
}

/// Sort subsets into canonical order (size, then members). The sort is
/// stable and idempotent.
pub fn sort_subsets(subsets: &mut [Subset]) {
    subsets.sort();
}

/// Every subset of `{0..factors-1}` in canonical order.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] unless `2 <= factors <= 10`.
///
/// # Example
///
/// ```
/// use twok::design::canonical_power_set;
///
/// let names: Vec<String> = canonical_power_set(3)
///     .unwrap()
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// assert_eq!(names, ["T", "A", "B", "C", "AB", "AC", "BC", "ABC"]);
/// ```
pub fn canonical_power_set(factors: usize) -> Result<Vec<Subset>> {
    let mut subsets = power_set(factors)?;
    sort_subsets(&mut subsets);
    Ok(subsets)
}
