//! # twok
//!
//! Full-factorial 2^k design-of-experiments analysis: sign tables, effect
//! estimates and sum-of-squares variation decomposition.
//!
//! ## Overview
//!
//! A 2^k experiment measures a response for every combination of k binary
//! factors. This library decomposes the observed variation into the share
//! explained by each factor (main effects) and by each combination of
//! factors (interactions), and reports them under labels such as `"A"`,
//! `"BC"` or `"ABCD"`.
//!
//! This library provides:
//! - Power-set enumeration and canonical effect ordering
//! - Sign table (design matrix) construction and orthogonality verification
//! - Shape-checked matrix algebra on top of `ndarray`
//! - Sum-of-squares decomposition with ranked variation fractions
//!
//! ## Quick Start
//!
//! ```rust
//! use twok::{analyze, AnalysisConfig};
//!
//! // k = 2: rows are runs 00, 01, 10, 11 (bit 0 is factor A)
//! let data = vec![vec![0.0], vec![10.0], vec![0.0], vec![10.0]];
//!
//! let result = analyze(&data, &AnalysisConfig::default()).unwrap();
//! let column = &result.columns[0].decomposition;
//!
//! assert_eq!(column.coefficients, vec![5.0, 5.0, 0.0, 0.0]);
//! assert_eq!(column.strongest().unwrap().group, "A");
//! assert_eq!(column.fraction("A"), Some(1.0));
//! ```
//!
//! Or work with the building blocks directly:
//!
//! ```rust
//! use twok::design::{verify_sign_table, SignTable};
//! use twok::naming::NameTable;
//!
//! let table = SignTable::new(3).unwrap();
//! assert_eq!(table.runs(), 8);
//! assert!(verify_sign_table(&table).is_valid);
//!
//! let names = NameTable::new(3).unwrap();
//! assert_eq!(names.label(7), Some("SSABC"));
//! ```
//!
//! ## Notation
//!
//! - **k**: number of factors, `2 <= k <= 10`
//! - **run**: row index `i` of the data; factor `f` is high in run `i` when
//!   bit `f` of `i` is set
//! - **q**: effect coefficient vector, `q = Mᵗ·y / 2^k`
//! - **SS**: sum of squares, `SS[j] = 2^k · q[j]²`
//!
//! ## Features
//!
//! - `serde`: Enable serialization/deserialization of reports and matrices
//! - `parallel`: Enable parallel analysis using rayon

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod analysis;
pub mod design;
pub mod error;
pub mod matrix;
pub mod naming;
pub mod utils;

#[cfg(feature = "parallel")]
pub mod parallel;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analysis::{
        analyze, analyze_matrix, coefficient_matrix, decompose, AnalysisConfig, ColumnReport,
        DegeneratePolicy, Decomposition, FactorialAnalysis, SumsOfSquares, Variation,
    };
    pub use crate::design::{
        canonical_power_set, power_set, sort_subsets, verify_sign_table, OrthogonalityReport,
        SignTable, Subset,
    };
    pub use crate::error::{Error, Result};
    pub use crate::matrix::Matrix;
    pub use crate::naming::NameTable;

    #[cfg(feature = "parallel")]
    pub use crate::parallel::{par_analyze, par_analyze_matrix, par_sign_table};
}

// Re-export commonly used items at crate root
pub use analysis::{analyze, analyze_matrix, AnalysisConfig, DegeneratePolicy, FactorialAnalysis};
pub use error::{Error, Result};
pub use matrix::Matrix;

#[cfg(feature = "parallel")]
pub use parallel::{par_analyze, par_analyze_matrix};
