//! Benchmark runner for the matmul variants.

use matmul_tiled::blocked::{TILE_X, TILE_Y, UNROLL};
use matmul_tiled::config::BenchConfig;
use matmul_tiled::kernels::{DOT_WIDTH, DotKernel};
use matmul_tiled::kernels::simd::NELTS;
use matmul_tiled::threaded::scheduler::configure_thread_pool;
use matmul_tiled::{
    Matrix, Result, gflops, matmul, matmul_naive_ijk, matmul_naive_ikj, matmul_parallelized,
    matmul_tiled, matmul_tiled_parallelized, matmul_tiled_unrolled_parallelized,
    matmul_vectorized, random, zeros,
};
use std::time::Instant;

type Variant = fn(&mut Matrix, &Matrix, &Matrix) -> Result<()>;

fn main() -> Result<()> {
    let config = BenchConfig::from_env()?;
    if let Some(threads) = config.threads {
        configure_thread_pool(threads)?;
    }

    println!("=== Matrix Multiplication Benchmark ===\n");
    println!(
        "Kernel: {}, threads: {}, vector width: {}, tile: {}x{}\n",
        DotKernel::detect().name(),
        rayon::current_num_threads(),
        DOT_WIDTH,
        TILE_X,
        TILE_Y
    );

    let variants: [(&str, Variant); 8] = [
        ("Naive (i-j-k)", matmul_naive_ijk),
        ("Scalar (i-k-j)", matmul_naive_ikj),
        ("Vectorized", matmul_vectorized::<DOT_WIDTH>),
        ("Tiled", matmul_tiled::<TILE_X, TILE_Y, DOT_WIDTH>),
        ("Parallel", matmul_parallelized::<DOT_WIDTH>),
        (
            "Tiled parallel",
            matmul_tiled_parallelized::<TILE_X, TILE_Y, DOT_WIDTH>,
        ),
        (
            "Unrolled parallel",
            matmul_tiled_unrolled_parallelized::<TILE_X, TILE_Y, NELTS, UNROLL>,
        ),
        ("matmul (auto)", matmul),
    ];

    let mut all_results = Vec::new();

    for &size in &config.sizes {
        println!("Matrix: {}×{}", size, size);
        println!("{}", "-".repeat(60));

        let a = random(size, size)?;
        let b = random(size, size)?;
        let mut c = zeros(size, size)?;

        let mut results = Vec::new();
        for (name, f) in variants {
            match bench_fn(&mut c, &a, &b, config.iterations, f) {
                Ok(r) => results.push((name, Some(r))),
                // Tiled variants need tile-multiple sizes.
                Err(e) => {
                    println!("   {:18} skipped: {}", name, e);
                    results.push((name, None));
                }
            }
        }

        let baseline_time = results[0].1.map(|(t, _)| t);
        for (i, (name, r)) in results.iter().enumerate() {
            if let Some((time_ms, gf)) = r {
                let speedup = baseline_time.map_or(1.0, |base| base / time_ms);
                println!(
                    "{}. {:18} {:9.2} ms  {:7.2} GFLOPS  ({:.1}×)",
                    i + 1,
                    name,
                    time_ms,
                    gf,
                    speedup
                );
            }
        }
        println!();

        all_results.push((size, results));
        c.release();
    }

    print_summary_table(&all_results);
    Ok(())
}

/// Runs `f` once to warm up, then `iterations` timed runs on a re-zeroed C.
/// Returns (average ms, GFLOP/s).
fn bench_fn(
    c: &mut Matrix,
    a: &Matrix,
    b: &Matrix,
    iterations: usize,
    f: Variant,
) -> Result<(f64, f64)> {
    c.fill(0.0);
    f(c, a, b)?;

    let mut total = 0.0;
    for _ in 0..iterations {
        c.fill(0.0);
        let start = Instant::now();
        f(c, a, b)?;
        total += start.elapsed().as_secs_f64();
    }

    let avg = total / iterations as f64;
    Ok((avg * 1000.0, gflops(c.rows(), c.cols(), a.cols(), avg)))
}

#[allow(clippy::type_complexity)]
fn print_summary_table(all_results: &[(usize, Vec<(&str, Option<(f64, f64)>)>)]) {
    let Some((_, first)) = all_results.first() else {
        return;
    };

    println!("\n{}", "=".repeat(90));
    println!("SUMMARY (GFLOPS)");
    println!("{}", "=".repeat(90));

    print!("\n{:<20}", "Method");
    for (size, _) in all_results {
        print!(" {:>12}", format!("{}×{}", size, size));
    }
    println!();
    println!("{}", "-".repeat(90));

    for (method_idx, (method_name, _)) in first.iter().enumerate() {
        print!("{:<20}", method_name);
        for (_, results) in all_results {
            match results[method_idx].1 {
                Some((_, gf)) => print!(" {:>12.2}", gf),
                None => print!(" {:>12}", "-"),
            }
        }
        println!();
    }

    println!("{}", "=".repeat(90));
    println!("\nGFLOPS = 2·M·N·K / seconds / 1e9. Higher is better.\n");
}
