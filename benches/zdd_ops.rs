//! ZDD operation benchmarks.
//!
//! Run with:
//! ```bash
//! cargo bench --bench zdd_ops
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use zdd_rs::config::ZddConfig;
use zdd_rs::guard::Root;
use zdd_rs::reference::ZddId;
use zdd_rs::types::Var;
use zdd_rs::zdd::ZddManager;

// ============================================================================
// Helper: N-Queens Problem
// ============================================================================

/// Count N-Queens placements by row-wise product and attack filtering.
fn solve_queens(mgr: &ZddManager, n: usize) -> u64 {
    let cells = mgr.new_vars(n * n);
    let cell = |i: usize, j: usize| -> Var { cells[i * n + j] };

    let mut attacks = mgr.root(ZddId::EMPTY);
    for i in 0..n {
        for j in 0..n {
            for k in i + 1..n {
                for l in 0..n {
                    if j == l || k - i == j.abs_diff(l) {
                        let pair = mgr.cube_vars(&[cell(i, j), cell(k, l)]).unwrap();
                        attacks = mgr.root(mgr.union(attacks.id(), pair));
                    }
                }
            }
        }
    }

    let mut placements = mgr.root(ZddId::BASE);
    for i in 0..n {
        let mut row = mgr.root(ZddId::EMPTY);
        for j in 0..n {
            let single = mgr.single(cell(i, j)).unwrap();
            row = mgr.root(mgr.union(row.id(), single));
        }
        let extended = mgr.mul(placements.id(), row.id());
        placements = mgr.root(mgr.no_supset(extended, attacks.id()));
    }
    mgr.count(placements.id())
}

// ============================================================================
// Benchmark: Queens with varying arena size (exercises collection)
// ============================================================================

fn bench_queens_arena_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("zdd/queens_arena_size");
    group.sample_size(10);

    let n = 7;

    for bits in [8, 12, 16, 20] {
        group.bench_with_input(
            BenchmarkId::new(format!("n={}", n), format!("2^{}", bits)),
            &bits,
            |b, &bits| {
                b.iter(|| {
                    let config = ZddConfig::default().with_initial_nodes(1 << bits);
                    let mgr = ZddManager::with_config(config);
                    solve_queens(&mgr, n)
                });
            },
        );
    }

    group.finish();
}

fn bench_queens_cache_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("zdd/queens_cache_size");
    group.sample_size(10);

    let n = 7;

    for cache_bits in [8, 12, 16, 20] {
        group.bench_with_input(
            BenchmarkId::new(format!("n={}", n), format!("2^{}", cache_bits)),
            &cache_bits,
            |b, &cache_bits| {
                b.iter(|| {
                    let config = ZddConfig::default()
                        .with_cache_bits(cache_bits)
                        .with_max_cache_bits(cache_bits);
                    let mgr = ZddManager::with_config(config);
                    solve_queens(&mgr, n)
                });
            },
        );
    }

    group.finish();
}

// ============================================================================
// Benchmark: Antichains of pair products
// ============================================================================

fn bench_pair_products(c: &mut Criterion) {
    let mut group = c.benchmark_group("zdd/pair_products");
    group.sample_size(10);

    for n in [16, 24, 32] {
        group.bench_with_input(BenchmarkId::new("max_set", n), &n, |b, &n| {
            b.iter(|| {
                let mgr = ZddManager::new();
                let vars = mgr.new_vars(n);
                let edges = mgr.root(mgr.all_edge(vars[0], vars[n - 1]).unwrap());
                let products = mgr.root(mgr.mul(edges.id(), edges.id()));
                let max = mgr.max_set(products.id());
                mgr.count(max)
            });
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Set algebra on random families
// ============================================================================

/// Build a family of `num_sets` random sets over `vars`, each variable present with probability `density`.
fn build_random_family<'a>(
    mgr: &'a ZddManager,
    vars: &[Var],
    num_sets: usize,
    density: f64,
    rng: &mut impl Rng,
) -> Root<'a> {
    let mut family = mgr.root(ZddId::EMPTY);
    for _ in 0..num_sets {
        let set: Vec<Var> = vars.iter().copied().filter(|_| rng.random_bool(density)).collect();
        let cube = mgr.cube_vars(&set).unwrap();
        family = mgr.root(mgr.union(family.id(), cube));
    }
    family
}

fn bench_random_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("zdd/random_algebra");
    group.sample_size(10);

    for num_sets in [100, 1000] {
        group.bench_with_input(BenchmarkId::new("union_intersect", num_sets), &num_sets, |b, &num_sets| {
            b.iter(|| {
                let mut rng = ChaCha8Rng::seed_from_u64(42);
                let mgr = ZddManager::new();
                let vars = mgr.new_vars(32);
                let f = build_random_family(&mgr, &vars, num_sets, 0.3, &mut rng);
                let g = build_random_family(&mgr, &vars, num_sets, 0.3, &mut rng);
                let u = mgr.root(mgr.union(f.id(), g.id()));
                let i = mgr.intersect(f.id(), g.id());
                mgr.count(u.id()) + mgr.count(i)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_random_algebra,
    bench_queens_arena_size,
    bench_queens_cache_size,
    bench_pair_products
);
criterion_main!(benches);
