//! Store operation benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tallykv_bench::utils::{generate_keys, populated_store, random_value};
use tallykv_core::Store;

/// Benchmark plain sets outside any block.
fn bench_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("set");

    for count in [100, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let keys = generate_keys(count);
            let value = random_value(16);
            b.iter(|| {
                let mut store = Store::new();
                for key in &keys {
                    store.set(black_box(key), black_box(&value));
                }
                store
            });
        });
    }
    group.finish();
}

/// Benchmark `num_equal_to` against store size; should stay flat.
fn bench_num_equal_to(c: &mut Criterion) {
    let mut group = c.benchmark_group("num_equal_to");

    for count in [100, 10_000, 100_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let store = populated_store(count, 16);
            b.iter(|| store.num_equal_to(black_box("V3")));
        });
    }
    group.finish();
}

/// Benchmark rolling back a block that touched `touched` keys of a large store.
fn bench_rollback(c: &mut Criterion) {
    let mut group = c.benchmark_group("rollback");

    for touched in [10, 100, 1_000].iter() {
        group.throughput(Throughput::Elements(*touched as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(touched),
            touched,
            |b, &touched| {
                let mut store = populated_store(50_000, 16);
                let keys = generate_keys(touched);
                b.iter(|| {
                    store.begin();
                    for key in &keys {
                        store.set(key, "TMP");
                    }
                    store.rollback().unwrap();
                });
            },
        );
    }
    group.finish();
}

/// Benchmark nested blocks followed by a single commit.
fn bench_nested_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_commit");

    for depth in [1, 10, 100].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, &depth| {
            let mut store = Store::new();
            b.iter(|| {
                for level in 0..depth {
                    store.begin();
                    store.set("A", if level % 2 == 0 { "EVEN" } else { "ODD" });
                }
                store.commit().unwrap();
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_set,
    bench_num_equal_to,
    bench_rollback,
    bench_nested_commit
);
criterion_main!(benches);
