//! Tiled per-row update and the single-threaded tiled matmul.

use crate::blocked::tile::Tiling;
use crate::error::Result;
use crate::kernels::dot::dot_row;
use crate::matrix::{Matrix, check_dims};

/// Accumulates row `m` of `A @ B` into `c_row`, one tile at a time.
///
/// `tiling` covers (columns of C, columns of A). Inside each tile, for
/// every k in the tile's y-range, `dot` adds `A[m, k] * B[k, x_range]` into
/// `c_row[x_range]`.
#[inline]
pub fn tiled_row<const TX: usize, const TY: usize, D>(
    tiling: &Tiling<TX, TY>,
    c_row: &mut [f32],
    a_row: &[f32],
    b: &Matrix,
    mut dot: D,
) where
    D: FnMut(&mut [f32], f32, &[f32]),
{
    tiling.for_each(|t| {
        let cols = t.x_range();
        for k in t.y_range() {
            dot(&mut c_row[cols.clone()], a_row[k], &b.row(k)[cols.clone()]);
        }
    });
}

/// Single-threaded tiled matmul with `W`-wide dot steps.
///
/// # Errors
///
/// `DimensionMismatch` for incompatible shapes; `TileMismatch` unless
/// `C.cols % TX == 0` and `A.cols % TY == 0`.
pub fn matmul_tiled<const TX: usize, const TY: usize, const W: usize>(
    c: &mut Matrix,
    a: &Matrix,
    b: &Matrix,
) -> Result<()> {
    check_dims(c, a, b)?;
    let tiling = Tiling::<TX, TY>::new(c.cols(), a.cols())?;

    for m in 0..c.rows() {
        tiled_row(&tiling, c.row_mut(m), a.row(m), b, dot_row::<W>);
    }
    Ok(())
}
