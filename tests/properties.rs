use proptest::prelude::*;
use twok::design::{canonical_power_set, sort_subsets, Subset};
use twok::{analyze, AnalysisConfig};

fn arb_design() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (2usize..=5, 1usize..=3).prop_flat_map(|(k, cols)| {
        prop::collection::vec(
            prop::collection::vec(-1000.0f64..1000.0, cols),
            1 << k,
        )
    })
}

// ── Scaling law: SS scales by c², fractions unchanged ─────────────────────

proptest! {
    #[test]
    fn scaling_preserves_fractions(
        data in arb_design(),
        exponent in -8.0f64..8.0,
        negate in any::<bool>()
    ) {
        let c = if negate { -10f64.powf(exponent) } else { 10f64.powf(exponent) };
        let scaled: Vec<Vec<f64>> = data
            .iter()
            .map(|row| row.iter().map(|v| v * c).collect())
            .collect();

        let base = analyze(&data, &AnalysisConfig::default()).unwrap();
        let other = analyze(&scaled, &AnalysisConfig::default()).unwrap();

        for (a, b) in base.columns.iter().zip(&other.columns) {
            let (a, b) = (&a.decomposition, &b.decomposition);
            prop_assert_eq!(a.degenerate, b.degenerate);
            prop_assume!(!a.degenerate);

            let ratio = b.total_ss() / a.total_ss();
            prop_assert!((ratio - c * c).abs() <= 1e-6 * c * c);

            for v in &a.variation {
                let w = b.fraction(&v.group).unwrap();
                prop_assert!((v.fraction - w).abs() < 1e-9);
            }
        }
    }
}

// ── Fractions are a distribution over effects, sorted ascending ───────────

proptest! {
    #[test]
    fn fractions_sum_to_one_and_ascend(data in arb_design()) {
        let result = analyze(&data, &AnalysisConfig::default()).unwrap();

        for report in &result.columns {
            let d = &report.decomposition;
            prop_assert_eq!(d.variation.len(), d.coefficients.len() - 1);
            for pair in d.variation.windows(2) {
                prop_assert!(pair[0].fraction <= pair[1].fraction);
            }
            if !d.degenerate {
                let sum: f64 = d.variation.iter().map(|v| v.fraction).sum();
                prop_assert!((sum - 1.0).abs() < 1e-9);
            }
        }
    }
}

// ── Reconstruction: Σ q[j]·M[i][j] recovers every observation ─────────────

proptest! {
    #[test]
    fn coefficients_reconstruct_data(data in arb_design()) {
        let result = analyze(&data, &AnalysisConfig::default()).unwrap();
        let subsets = canonical_power_set(result.factors).unwrap();

        for report in &result.columns {
            let q = &report.decomposition.coefficients;
            for (run, row) in data.iter().enumerate() {
                let rebuilt: f64 = subsets
                    .iter()
                    .zip(q)
                    .map(|(s, &qj)| f64::from(s.sign_for_run(run)) * qj)
                    .sum();
                prop_assert!((rebuilt - row[report.column]).abs() < 1e-6);
            }
        }
    }
}

// ── Canonical ordering is idempotent under any starting permutation ───────

fn arb_shuffled_power_set() -> impl Strategy<Value = (Vec<Subset>, Vec<Subset>)> {
    (2usize..=6).prop_flat_map(|k| {
        let canonical = canonical_power_set(k).unwrap();
        (Just(canonical.clone()), Just(canonical).prop_shuffle())
    })
}

proptest! {
    #[test]
    fn sorting_is_idempotent((canonical, shuffled) in arb_shuffled_power_set()) {
        let mut shuffled = shuffled;
        sort_subsets(&mut shuffled);
        prop_assert_eq!(&shuffled, &canonical);
        sort_subsets(&mut shuffled);
        prop_assert_eq!(&shuffled, &canonical);
    }
}

#[cfg(feature = "parallel")]
proptest! {
    #[test]
    fn parallel_matches_sequential(data in arb_design()) {
        let seq = analyze(&data, &AnalysisConfig::default()).unwrap();
        let par = twok::par_analyze(&data, &AnalysisConfig::default()).unwrap();
        prop_assert_eq!(seq, par);
    }
}
