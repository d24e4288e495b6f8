//! Criterion micro-benchmarks for the raw-index pools: growth, steady
//! churn, and hole-skipping iteration.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use keel_pool::FreeListPool;
use keel_test_utils::fixtures::object_pool_with_holes;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Benchmark: insert 4K records starting from an empty pool, paying every
/// power-of-two growth step along the way.
fn bench_free_list_growth(c: &mut Criterion) {
    c.bench_function("free_list_growth_to_4k", |b| {
        b.iter(|| {
            let mut pool: FreeListPool<u64> = FreeListPool::new();
            for i in 0..4096u64 {
                black_box(pool.insert(i));
            }
            black_box(pool.capacity());
        });
    });
}

/// Benchmark: steady-state insert/remove pairs at 50% occupancy, with the
/// removal order scrambled so the sorted free-list re-insertion does real
/// work.
fn bench_free_list_churn(c: &mut Criterion) {
    let mut pool = FreeListPool::with_capacity(4096).unwrap();
    let mut live: Vec<u32> = (0..2048u64).map(|i| pool.insert(i)).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("free_list_churn_4k", |b| {
        b.iter(|| {
            for _ in 0..64 {
                let pick = rng.random_range(0..live.len());
                let index = live.swap_remove(pick);
                let value = pool.remove(index).unwrap();
                live.push(pool.insert(value));
            }
            black_box(live.len());
        });
    });
}

/// Benchmark: iterate an 8K object pool with every other slot free — the
/// worst case for the free-list cursor (maximum skip transitions).
fn bench_object_pool_iteration(c: &mut Criterion) {
    let mut pool = object_pool_with_holes(8192, 2);

    c.bench_function("object_pool_visit_8k_half_free", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            pool.visit(|_, value| {
                sum = sum.wrapping_add(*value);
            });
            black_box(sum);
        });
    });
}

criterion_group!(
    benches,
    bench_free_list_growth,
    bench_free_list_churn,
    bench_object_pool_iteration
);
criterion_main!(benches);
