//! Factorial analysis types.
//!
//! Configuration and report types for the 2^k sum-of-squares decomposition.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::naming::TOTAL_LABEL;

/// What to report when a column's total sum of squares is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DegeneratePolicy {
    /// Report every variation fraction as 0.
    ZeroFractions,
    /// Fail with [`crate::Error::DegenerateDecomposition`].
    Fail,
}

impl Default for DegeneratePolicy {
    fn default() -> Self {
        Self::ZeroFractions
    }
}

/// Configuration for factorial analysis.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnalysisConfig {
    /// Handling of columns with zero total sum of squares.
    pub degenerate_policy: DegeneratePolicy,
    /// Relative rounding tolerance per operation (default: `f64::EPSILON`).
    ///
    /// A column is degenerate when its total sum of squares is exactly zero
    /// or at most `2^k * (2^k * zero_tolerance)^2 * 2^k * grand_mean^2`,
    /// the residue that summing `2^k` equal values can leave behind.
    pub zero_tolerance: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            degenerate_policy: DegeneratePolicy::ZeroFractions,
            zero_tolerance: f64::EPSILON,
        }
    }
}

/// Share of explained variation attributed to one effect.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Variation {
    /// Bare interaction name (`"A"`, `"BC"`, ...).
    pub group: String,
    /// `SS[effect] / SS[total]`, in `[0, 1]`.
    pub fraction: f64,
}

/// Sums of squares keyed by label, in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SumsOfSquares(Vec<(String, f64)>);

impl SumsOfSquares {
    /// Wrap label/value pairs that are already in display order.
    #[must_use]
    pub fn new(entries: Vec<(String, f64)>) -> Self {
        Self(entries)
    }

    /// Sum of squares for `label`.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.iter().find(|(l, _)| l == label).map(|&(_, v)| v)
    }

    /// Total explained sum of squares (the `"SST"` entry).
    #[must_use]
    pub fn total(&self) -> f64 {
        self.get(TOTAL_LABEL).unwrap_or(0.0)
    }

    /// Iterate `(label, value)` in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(l, v)| (l.as_str(), *v))
    }

    /// Number of entries, including the total.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(feature = "serde")]
impl Serialize for SumsOfSquares {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, value) in &self.0 {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for SumsOfSquares {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct OrderedVisitor;

        impl<'de> serde::de::Visitor<'de> for OrderedVisitor {
            type Value = SumsOfSquares;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from sum-of-squares label to number")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((label, value)) = access.next_entry::<String, f64>()? {
                    entries.push((label, value));
                }
                Ok(SumsOfSquares(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Sum-of-squares decomposition of one coefficient vector.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Decomposition {
    /// Coefficient vector q in canonical effect order; `q[0]` is the grand mean.
    pub coefficients: Vec<f64>,
    /// Sums of squares by label in display order, including `"SST"`.
    pub sums_of_squares: SumsOfSquares,
    /// Variation fractions, weakest effect first.
    pub variation: Vec<Variation>,
    /// Whether the total sum of squares was zero.
    pub degenerate: bool,
}

impl Decomposition {
    /// Grand mean of the column (`q[0]`).
    #[must_use]
    pub fn grand_mean(&self) -> f64 {
        self.coefficients.first().copied().unwrap_or(0.0)
    }

    /// Total explained sum of squares.
    #[must_use]
    pub fn total_ss(&self) -> f64 {
        self.sums_of_squares.total()
    }

    /// Sum of squares for a label such as `"SSAB"`.
    #[must_use]
    pub fn sum_of_squares(&self, label: &str) -> Option<f64> {
        self.sums_of_squares.get(label)
    }

    /// Variation fraction for a bare group name such as `"AB"`.
    #[must_use]
    pub fn fraction(&self, group: &str) -> Option<f64> {
        self.variation
            .iter()
            .find(|v| v.group == group)
            .map(|v| v.fraction)
    }

    /// The effect explaining the most variation.
    #[must_use]
    pub fn strongest(&self) -> Option<&Variation> {
        self.variation.last()
    }
}

impl fmt::Display for Decomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let q: Vec<String> = self.coefficients.iter().map(|v| format!("{v:.6}")).collect();
        writeln!(f, "coefficients: [{}]", q.join(", "))?;
        writeln!(f, "sums of squares:")?;
        for (label, value) in self.sums_of_squares.iter() {
            writeln!(f, "  {label:<12} {value:.6}")?;
        }
        writeln!(f, "variation (weakest first):")?;
        for v in &self.variation {
            writeln!(f, "  {:<10} {:>8.4}%", v.group, v.fraction * 100.0)?;
        }
        if self.degenerate {
            writeln!(f, "  (total sum of squares is zero)")?;
        }
        Ok(())
    }
}

/// Decomposition of one data column.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColumnReport {
    /// Index of the source column in the data matrix.
    pub column: usize,
    /// The decomposition itself.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub decomposition: Decomposition,
}

impl fmt::Display for ColumnReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "column {}:", self.column)?;
        write!(f, "{}", self.decomposition)
    }
}

/// Complete 2^k factorial analysis of a data matrix.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FactorialAnalysis {
    /// Number of factors k.
    pub factors: usize,
    /// Number of runs, 2^k.
    pub runs: usize,
    /// One report per data column, in input column order.
    pub columns: Vec<ColumnReport>,
}

impl fmt::Display for FactorialAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "2^{} factorial analysis ({} runs, {} columns)",
            self.factors,
            self.runs,
            self.columns.len()
        )?;
        for report in &self.columns {
            writeln!(f)?;
            write!(f, "{report}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Decomposition {
        Decomposition {
            coefficients: vec![5.0, 5.0, 0.0, 0.0],
            sums_of_squares: SumsOfSquares::new(vec![
                ("SST".into(), 100.0),
                ("SSA".into(), 100.0),
                ("SSB".into(), 0.0),
                ("SSAB".into(), 0.0),
            ]),
            variation: vec![
                Variation {
                    group: "B".into(),
                    fraction: 0.0,
                },
                Variation {
                    group: "AB".into(),
                    fraction: 0.0,
                },
                Variation {
                    group: "A".into(),
                    fraction: 1.0,
                },
            ],
            degenerate: false,
        }
    }

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.degenerate_policy, DegeneratePolicy::ZeroFractions);
        assert!(config.zero_tolerance > 0.0);
    }

    #[test]
    fn test_accessors() {
        let d = sample();
        assert_eq!(d.grand_mean(), 5.0);
        assert_eq!(d.total_ss(), 100.0);
        assert_eq!(d.sum_of_squares("SSA"), Some(100.0));
        assert_eq!(d.sum_of_squares("SSC"), None);
        assert_eq!(d.fraction("AB"), Some(0.0));
        assert_eq!(d.strongest().map(|v| v.group.as_str()), Some("A"));
    }

    #[test]
    fn test_sums_of_squares_order() {
        let d = sample();
        let labels: Vec<&str> = d.sums_of_squares.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, ["SST", "SSA", "SSB", "SSAB"]);
        assert_eq!(d.sums_of_squares.len(), 4);
    }

    #[test]
    fn test_display() {
        let report = ColumnReport {
            column: 2,
            decomposition: sample(),
        };
        let text = report.to_string();
        assert!(text.starts_with("column 2:"));
        assert!(text.contains("SSAB"));
        assert!(text.contains("100.0000%"));
    }
}
