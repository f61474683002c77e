//! Dense f32 matrix multiplication, built up one technique at a time.
//!
//! Each layer builds on the previous one:
//!
//! 1. [`Matrix`]: an owned, row-major f32 buffer with scalar and
//!    fixed-width vector access.
//! 2. The dot step: `C[m, ..] += A[m, k] * B[k, ..]` with SIMD-width
//!    vectors and a scalar tail.
//! 3. Tiling: the (column, k) space is walked in small tiles so the rows of
//!    B and the segment of C being updated stay in L1.
//! 4. Row parallelism: rows of C are handed to rayon's pool; each task
//!    writes only the rows it owns.
//!
//! ## Usage
//!
//! ```
//! use matmul_tiled::{matmul, zeros, Matrix};
//!
//! let a = Matrix::from_buffer(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! let b = Matrix::from_buffer(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
//! let mut c = zeros(2, 2).unwrap();
//!
//! matmul(&mut c, &a, &b).unwrap();
//! assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
//! ```
//!
//! Every variant accumulates (`C += A * B`); zero C first for a fresh
//! product. The individual steps of the progression are public too:
//! [`matmul_naive_ijk`], [`matmul_naive_ikj`], [`matmul_vectorized`],
//! [`matmul_tiled`], [`matmul_parallelized`],
//! [`matmul_tiled_parallelized`] and
//! [`matmul_tiled_unrolled_parallelized`].
//!
//! ## Contract violations
//!
//! Shape mismatches and non-multiple tile extents are returned as
//! [`MatmulError`]. Out-of-range element access panics.

pub mod blocked;
pub mod config;
pub mod error;
pub mod kernels;
pub mod matrix;
pub mod threaded;

use log::debug;

pub use blocked::tiled::matmul_tiled;
pub use error::{MatmulError, Result};
pub use kernels::dot::{matmul_vectorized, matmul_vectorized_unrolled};
pub use matrix::Matrix;
pub use matrix::naive_ijk::matmul_naive_ijk;
pub use matrix::naive_ikj::matmul_naive_ikj;
pub use threaded::parallel::{
    matmul_parallelized, matmul_tiled_parallelized, matmul_tiled_unrolled_parallelized,
};

use blocked::tile::Tiling;
use blocked::tiled::tiled_row;
use blocked::{TILE_X, TILE_Y};
use kernels::DotKernel;
use matrix::check_dims;
use threaded::scheduler::parallelize_rows;

/// Matrix multiply: C += A * B
///
/// Uses every layer: rows in parallel, `TILE_X × TILE_Y` tiles when the
/// shape allows it, and the fastest dot kernel for this CPU (AVX2+FMA >
/// portable). Shapes that are not tile multiples take the untiled parallel
/// path, so any compatible shape is accepted.
///
/// # Errors
///
/// `DimensionMismatch` unless C is m×n, A is m×k and B is k×n.
pub fn matmul(c: &mut Matrix, a: &Matrix, b: &Matrix) -> Result<()> {
    check_dims(c, a, b)?;

    let kernel = DotKernel::detect();
    let rows = c.rows();

    match Tiling::<TILE_X, TILE_Y>::new(c.cols(), a.cols()) {
        Ok(tiling) => {
            debug!(
                "matmul {}x{}x{}: tiled {}x{}, {} kernel",
                rows,
                c.cols(),
                a.cols(),
                TILE_X,
                TILE_Y,
                kernel.name()
            );
            parallelize_rows(c, rows, |m, c_row| {
                tiled_row(&tiling, c_row, a.row(m), b, |c_seg, a_mk, b_seg| {
                    kernel.apply(c_seg, a_mk, b_seg)
                });
            });
        }
        Err(_) => {
            debug!(
                "matmul {}x{}x{}: untiled, {} kernel",
                rows,
                c.cols(),
                a.cols(),
                kernel.name()
            );
            parallelize_rows(c, rows, |m, c_row| {
                for (k, &a_mk) in a.row(m).iter().enumerate() {
                    kernel.apply(c_row, a_mk, b.row(k));
                }
            });
        }
    }
    Ok(())
}

/// Zero-filled `rows × cols` matrix. See [`Matrix::zeros`].
pub fn zeros(rows: usize, cols: usize) -> Result<Matrix> {
    Matrix::zeros(rows, cols)
}

/// `rows × cols` matrix of uniform values in `[0, 1)`. See [`Matrix::random`].
pub fn random(rows: usize, cols: usize) -> Result<Matrix> {
    Matrix::random(rows, cols)
}

/// Throughput of an m×n×k multiply that took `seconds`: `2·m·n·k` flops.
pub fn gflops(m: usize, n: usize, k: usize, seconds: f64) -> f64 {
    2.0 * (m as f64) * (n as f64) * (k as f64) / seconds / 1e9
}
