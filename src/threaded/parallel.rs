//! Row-parallel matmul variants.
//!
//! Each variant validates shapes once, then hands every output row to
//! [`parallelize_rows`] with one work item per row.

use crate::blocked::tile::Tiling;
use crate::blocked::tiled::tiled_row;
use crate::error::Result;
use crate::kernels::dot::{dot_row, dot_row_unrolled};
use crate::matrix::{Matrix, check_dims};
use crate::threaded::scheduler::parallelize_rows;

/// Vectorized matmul with rows spread across the rayon pool.
pub fn matmul_parallelized<const W: usize>(c: &mut Matrix, a: &Matrix, b: &Matrix) -> Result<()> {
    check_dims(c, a, b)?;
    let rows = c.rows();

    parallelize_rows(c, rows, |m, c_row| {
        for (k, &a_mk) in a.row(m).iter().enumerate() {
            dot_row::<W>(c_row, a_mk, b.row(k));
        }
    });
    Ok(())
}

/// Row-parallel, tiled matmul.
///
/// # Errors
///
/// `TileMismatch` unless `C.cols % TX == 0` and `A.cols % TY == 0`. The
/// check happens before any row is dispatched.
pub fn matmul_tiled_parallelized<const TX: usize, const TY: usize, const W: usize>(
    c: &mut Matrix,
    a: &Matrix,
    b: &Matrix,
) -> Result<()> {
    check_dims(c, a, b)?;
    let tiling = Tiling::<TX, TY>::new(c.cols(), a.cols())?;
    let rows = c.rows();

    parallelize_rows(c, rows, |m, c_row| {
        tiled_row(&tiling, c_row, a.row(m), b, dot_row::<W>);
    });
    Ok(())
}

/// Row-parallel, tiled matmul with `U` dot steps unrolled per iteration.
///
/// With `U = TX / W` each tile row is one unrolled pass.
pub fn matmul_tiled_unrolled_parallelized<
    const TX: usize,
    const TY: usize,
    const W: usize,
    const U: usize,
>(
    c: &mut Matrix,
    a: &Matrix,
    b: &Matrix,
) -> Result<()> {
    check_dims(c, a, b)?;
    let tiling = Tiling::<TX, TY>::new(c.cols(), a.cols())?;
    let rows = c.rows();

    parallelize_rows(c, rows, |m, c_row| {
        tiled_row(&tiling, c_row, a.row(m), b, dot_row_unrolled::<W, U>);
    });
    Ok(())
}
