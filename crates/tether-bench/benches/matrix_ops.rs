//! Criterion micro-benchmarks for two-layer matrix access.
//!
//! Matrix access pays both validation layers per element in checked
//! mode, so these benches bound the worst-case overhead of the design.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tether_bench::{make_jagged_matrix, make_square_matrix};

fn bench_square_traversal(c: &mut Criterion) {
    let n = 128;
    let m = make_square_matrix(n);
    c.bench_function("square_128_row_major", |b| {
        b.iter(|| {
            let mut sum = 0.0f32;
            for i in 0..n {
                for j in 0..n {
                    sum += *tether::at2(&m, i, j);
                }
            }
            black_box(sum)
        });
    });
    tether::free_matrix(&m);
}

fn bench_jagged_traversal(c: &mut Criterion) {
    let rows = 256;
    let m = make_jagged_matrix(rows);
    c.bench_function("jagged_256_rows", |b| {
        b.iter(|| {
            let mut sum = 0.0f32;
            for i in 0..rows {
                let cols = if i % 2 == 0 { 4 } else { 256 };
                for j in 0..cols {
                    sum += *tether::at2(&m, i, j);
                }
            }
            black_box(sum)
        });
    });
    tether::free_matrix(&m);
}

fn bench_alloc_free_matrix(c: &mut Criterion) {
    c.bench_function("alloc_free_square_32", |b| {
        b.iter(|| {
            let m = make_square_matrix(black_box(32));
            tether::free_matrix(&m);
        });
    });
}

criterion_group!(
    benches,
    bench_square_traversal,
    bench_jagged_traversal,
    bench_alloc_free_matrix
);
criterion_main!(benches);
