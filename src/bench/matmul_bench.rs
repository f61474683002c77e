//! Criterion benchmarks for the matmul progression.
//!
//! Run with `cargo bench`. Sizes are tile multiples so every variant runs.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use matmul_tiled::blocked::{TILE_X, TILE_Y, UNROLL};
use matmul_tiled::kernels::DOT_WIDTH;
use matmul_tiled::kernels::simd::NELTS;
use matmul_tiled::{
    Matrix, Result, matmul, matmul_naive_ikj, matmul_parallelized, matmul_tiled,
    matmul_tiled_parallelized, matmul_tiled_unrolled_parallelized, matmul_vectorized, zeros,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

type Variant = fn(&mut Matrix, &Matrix, &Matrix) -> Result<()>;

fn bench_variants(crit: &mut Criterion) {
    let variants: [(&str, Variant); 7] = [
        ("scalar_ikj", matmul_naive_ikj),
        ("vectorized", matmul_vectorized::<DOT_WIDTH>),
        ("tiled", matmul_tiled::<TILE_X, TILE_Y, DOT_WIDTH>),
        ("parallel", matmul_parallelized::<DOT_WIDTH>),
        (
            "tiled_parallel",
            matmul_tiled_parallelized::<TILE_X, TILE_Y, DOT_WIDTH>,
        ),
        (
            "unrolled_parallel",
            matmul_tiled_unrolled_parallelized::<TILE_X, TILE_Y, NELTS, UNROLL>,
        ),
        ("auto", matmul),
    ];

    let mut group = crit.benchmark_group("matmul");
    group.sample_size(10);

    for size in [128, 256] {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let a = Matrix::random_with(size, size, &mut rng).unwrap();
        let b = Matrix::random_with(size, size, &mut rng).unwrap();
        let mut c = zeros(size, size).unwrap();

        group.throughput(Throughput::Elements((2 * size * size * size) as u64));
        for (name, f) in variants {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |bench, _| {
                bench.iter(|| {
                    c.fill(0.0);
                    f(black_box(&mut c), black_box(&a), black_box(&b)).unwrap();
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_variants);
criterion_main!(benches);
