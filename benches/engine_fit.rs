/// Regression Engine Benchmarks
///
/// Measures model construction (all derived series) and critical-value lookup.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fisherfit::regression::{CriticalValueTable, RegressionEngine};
use fisherfit::Sample;

fn noisy_line(n: usize) -> Vec<Sample> {
    (0..n)
        .map(|i| {
            let x = i as f64;
            let noise = ((i * 7919) % 13) as f64 - 6.0;
            Sample::new(x, 2.5 * x - 1.0 + noise)
        })
        .collect()
}

fn bench_engine_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_construction");

    for size in [10, 100, 1_000, 10_000] {
        let samples = noisy_line(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &samples, |b, samples| {
            b.iter(|| RegressionEngine::new(black_box(samples)).unwrap());
        });
    }

    group.finish();
}

fn bench_f_statistic(c: &mut Criterion) {
    let engine = RegressionEngine::new(&noisy_line(1_000)).unwrap();
    c.bench_function("f_statistic_1000", |b| {
        b.iter(|| black_box(&engine).f_statistic().unwrap());
    });
}

fn bench_critical_value_lookup(c: &mut Criterion) {
    let table = CriticalValueTable::standard();
    c.bench_function("critical_value_lookup", |b| {
        b.iter(|| {
            table
                .critical_value(black_box(1.0 - 0.95), 1, black_box(28))
                .unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_engine_construction,
    bench_f_statistic,
    bench_critical_value_lookup
);

criterion_main!(benches);
