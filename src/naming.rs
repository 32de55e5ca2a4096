//! Display labels for effects.
//!
//! Every effect of a 2^k design gets a sum-of-squares label: the grand total
//! is `"SST"`, and any other subset is `"SS"` followed by one letter per
//! member factor (`"SSA"`, `"SSBD"`, ...). Factor letters come from the Latin
//! alphabet with `T` left out, so no interaction label can read as the total.
//!
//! Labels have their own display order, independent of the canonical column
//! order of the sign table: `"SST"` first, then shorter labels before longer
//! ones, and equal-length labels by character order. [`NameTable`] keeps both
//! orders and ties them together through the canonical subset index.
//!
//! ```
//! use twok::naming::NameTable;
//!
//! let names = NameTable::new(3).unwrap();
//! assert_eq!(names.label(0), Some("SST"));
//! assert_eq!(names.label(4), Some("SSAB"));
//! assert_eq!(
//!     names.display_labels(),
//!     ["SST", "SSA", "SSB", "SSC", "SSAB", "SSAC", "SSBC", "SSABC"]
//! );
//! ```

use std::cmp::Ordering;

use crate::design::{canonical_power_set, Subset};
use crate::error::{Error, Result};
use crate::utils::{validate_factors, MAX_FACTORS};

/// Label of the grand-total entry.
pub const TOTAL_LABEL: &str = "SST";

/// Prefix shared by every sum-of-squares label.
pub const LABEL_PREFIX: &str = "SS";

/// Factor letters, indexed by factor. `T` is reserved for the total.
pub const LABEL_ALPHABET: &[u8; 25] = b"ABCDEFGHIJKLMNOPQRSUVWXYZ";

/// Largest factor count for which labels are generated.
pub const MAX_LABELLED_FACTORS: usize = MAX_FACTORS;

/// Letter for factor `factor`, or `'?'` past the end of the alphabet.
#[must_use]
pub fn factor_letter(factor: usize) -> char {
    LABEL_ALPHABET
        .get(factor)
        .map_or('?', |&b| char::from(b))
}

/// Bare interaction name of a subset: `"T"` for the grand total, otherwise
/// the member letters (`"A"`, `"AB"`, ...).
#[must_use]
pub fn group_name(subset: &Subset) -> String {
    if subset.is_empty() {
        return strip_label(TOTAL_LABEL).to_string();
    }
    subset.members().iter().map(|&f| factor_letter(f)).collect()
}

/// Sum-of-squares label of a subset: `"SST"` or `"SS"` plus its letters.
#[must_use]
pub fn label(subset: &Subset) -> String {
    if subset.is_empty() {
        return TOTAL_LABEL.to_string();
    }
    format!("{LABEL_PREFIX}{}", group_name(subset))
}

/// Strip the `"SS"` decoration from a label.
///
/// ```
/// use twok::naming::strip_label;
///
/// assert_eq!(strip_label("SSAB"), "AB");
/// assert_eq!(strip_label("SST"), "T");
/// assert_eq!(strip_label("AB"), "AB");
/// ```
#[must_use]
pub fn strip_label(label: &str) -> &str {
    label.strip_prefix(LABEL_PREFIX).unwrap_or(label)
}

/// Display order over labels: total first, then by length, then by
/// character order.
#[must_use]
pub fn display_cmp(a: &str, b: &str) -> Ordering {
    match (a == TOTAL_LABEL, b == TOTAL_LABEL) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
    }
}

/// Labels for every effect of a 2^k design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTable {
    factors: usize,
    /// Labels in canonical subset order.
    labels: Vec<String>,
    /// Canonical indices sorted into display order.
    display: Vec<usize>,
}

impl NameTable {
    /// Build the label table for `factors` factors.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedFactorCount`] if `factors > 10`
    /// - [`Error::InvalidArgument`] if `factors < 2`
    pub fn new(factors: usize) -> Result<Self> {
        if factors > MAX_LABELLED_FACTORS {
            return Err(Error::UnsupportedFactorCount {
                factors,
                max: MAX_LABELLED_FACTORS,
            });
        }
        validate_factors(factors)?;

        let labels: Vec<String> = canonical_power_set(factors)?.iter().map(label).collect();

        let mut display: Vec<usize> = (0..labels.len()).collect();
        display.sort_by(|&a, &b| display_cmp(&labels[a], &labels[b]));

        Ok(Self {
            factors,
            labels,
            display,
        })
    }

    /// Number of factors k.
    #[must_use]
    pub fn factors(&self) -> usize {
        self.factors
    }

    /// Number of labels, 2^k.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the table has no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label of the subset at canonical index `idx`.
    #[must_use]
    pub fn label(&self, idx: usize) -> Option<&str> {
        self.labels.get(idx).map(String::as_str)
    }

    /// Labels in canonical subset order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Canonical index of `label`, if present.
    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// `(canonical index, label)` pairs in display order.
    pub fn display_order(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.display.iter().map(|&i| (i, self.labels[i].as_str()))
    }

    /// Labels in display order.
    #[must_use]
    pub fn display_labels(&self) -> Vec<&str> {
        self.display_order().map(|(_, l)| l).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_excludes_total_letter() {
        assert_eq!(LABEL_ALPHABET.len(), 25);
        assert!(!LABEL_ALPHABET.contains(&b'T'));
        assert_eq!(factor_letter(18), 'S');
        assert_eq!(factor_letter(19), 'U');
        assert_eq!(factor_letter(25), '?');
    }

    #[test]
    fn test_labels_k2() {
        let names = NameTable::new(2).unwrap();
        assert_eq!(names.labels(), ["SST", "SSA", "SSB", "SSAB"]);
        assert_eq!(names.display_labels(), ["SST", "SSA", "SSB", "SSAB"]);
        assert_eq!(names.index_of("SSB"), Some(2));
        assert_eq!(names.index_of("SSC"), None);
    }

    #[test]
    fn test_labels_unique() {
        for k in 2..=10 {
            let names = NameTable::new(k).unwrap();
            assert_eq!(names.len(), 1 << k);
            let distinct: HashSet<&String> = names.labels().iter().collect();
            assert_eq!(distinct.len(), 1 << k);
        }
    }

    #[test]
    fn test_display_order_is_sorted() {
        let names = NameTable::new(5).unwrap();
        let display = names.display_labels();
        assert_eq!(display[0], TOTAL_LABEL);
        for pair in display.windows(2) {
            assert_eq!(display_cmp(pair[0], pair[1]), Ordering::Less);
        }
    }

    #[test]
    fn test_display_order_tracks_canonical_index() {
        for k in 2..=10 {
            let names = NameTable::new(k).unwrap();
            for (idx, label) in names.display_order() {
                assert_eq!(names.label(idx), Some(label));
            }
        }
    }

    #[test]
    fn test_display_cmp() {
        assert_eq!(display_cmp("SST", "SSA"), Ordering::Less);
        assert_eq!(display_cmp("SSZ", "SST"), Ordering::Greater);
        assert_eq!(display_cmp("SSZ", "SSAB"), Ordering::Less);
        assert_eq!(display_cmp("SSAC", "SSBC"), Ordering::Less);
        assert_eq!(display_cmp("SSAB", "SSAB"), Ordering::Equal);
    }

    #[test]
    fn test_factor_count_errors() {
        assert!(matches!(
            NameTable::new(11),
            Err(Error::UnsupportedFactorCount {
                factors: 11,
                max: 10
            })
        ));
        assert!(matches!(
            NameTable::new(1),
            Err(Error::InvalidArgument { value: 1, .. })
        ));
    }

    #[test]
    fn test_group_name() {
        assert_eq!(group_name(&Subset::empty()), "T");
        assert_eq!(group_name(&Subset::from_members(&[0, 3]).unwrap()), "AD");
        assert_eq!(label(&Subset::from_members(&[9]).unwrap()), "SSJ");
    }
}
