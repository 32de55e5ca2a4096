//! Analyze 2^k experiment data stored as JSON.
//!
//! Each input file must hold a nested array of numbers: one inner array per
//! run (in binary counting order), one number per measured series.
//!
//! ```text
//! cargo run --example analyze_json --features serde -- data.json [--json]
//! ```
//!
//! Set `RUST_LOG=twok=debug` to see the analysis stages.

use std::fs;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use twok::design::SignTable;
use twok::{analyze, AnalysisConfig, Matrix};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut as_json = false;
    let mut files = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            as_json = true;
        } else {
            files.push(arg);
        }
    }

    if files.is_empty() {
        eprintln!("usage: analyze_json <file.json>... [--json]");
        return ExitCode::FAILURE;
    }

    let config = AnalysisConfig::default();
    let mut failures = 0;

    for filename in &files {
        let raw = match fs::read_to_string(filename) {
            Ok(raw) => raw,
            Err(e) => {
                eprintln!("Could not read {filename}: {e}");
                failures += 1;
                continue;
            }
        };

        let data: Vec<Vec<f64>> = match serde_json::from_str(&raw) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("{filename} does not hold a nested array of numbers: {e}");
                failures += 1;
                continue;
            }
        };
        println!("Loaded {filename}");

        let result = match analyze(&data, &config) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Could not analyze {filename}: {e}");
                failures += 1;
                continue;
            }
        };

        if as_json {
            match serde_json::to_string_pretty(&result) {
                Ok(text) => println!("{text}"),
                Err(e) => {
                    eprintln!("Could not serialize report for {filename}: {e}");
                    failures += 1;
                }
            }
            continue;
        }

        println!("{}", "=".repeat(68));
        if let Ok(matrix) = Matrix::from_rows(&data) {
            println!("Analysis of 2^(k={}) data =\n{matrix}", result.factors);
        }
        if result.factors <= 4 {
            if let Ok(table) = SignTable::new(result.factors) {
                println!("{table}");
            }
        }
        println!("{result}");
    }

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
