use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use twok::design::SignTable;
use twok::{analyze, AnalysisConfig};

fn synthetic_data(k: usize, columns: usize) -> Vec<Vec<f64>> {
    (0..1usize << k)
        .map(|run| {
            (0..columns)
                .map(|col| run.count_ones() as f64 + ((run * 31 + col * 7) % 11) as f64)
                .collect()
        })
        .collect()
}

fn bench_sign_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("SignTable");

    for k in [4, 6, 8, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| SignTable::new(k).unwrap());
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("Analyze");

    for k in [4, 6, 8] {
        let data = synthetic_data(k, 4);
        group.bench_with_input(BenchmarkId::from_parameter(k), &data, |b, data| {
            b.iter(|| analyze(data, &AnalysisConfig::default()).unwrap());
        });
    }
    group.finish();
}

#[cfg(feature = "parallel")]
fn bench_par_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("ParAnalyze");

    for k in [6, 8] {
        let data = synthetic_data(k, 16);
        group.bench_with_input(BenchmarkId::from_parameter(k), &data, |b, data| {
            b.iter(|| twok::par_analyze(data, &AnalysisConfig::default()).unwrap());
        });
    }
    group.finish();
}

#[cfg(not(feature = "parallel"))]
fn bench_par_analyze(_c: &mut Criterion) {}

criterion_group!(benches, bench_sign_table, bench_analyze, bench_par_analyze);
criterion_main!(benches);
