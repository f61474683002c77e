//! The vectorized inner-product step: `C[m, ..] += A[m, k] * B[k, ..]`.
//!
//! For a fixed output row `m` and reduction index `k`, the scalar
//! `A[m, k]` is broadcast and multiplied into B's row `k`, then added to
//! C's row `m`. Full `W`-wide segments go through [`F32x`], the
//! `cols % W` leftover columns are done one at a time.

use crate::error::Result;
use crate::kernels::simd::F32x;
use crate::kernels::vectorize::{VectorOp, vectorize, vectorize_unroll};
use crate::matrix::{Matrix, check_dims};

/// Dot step that goes through the matrix load/store API.
struct MatrixDot<'a> {
    c: &'a mut Matrix,
    b: &'a Matrix,
    a_mk: f32,
    m: usize,
    k: usize,
}

impl VectorOp for MatrixDot<'_> {
    #[inline(always)]
    fn step<const WIDTH: usize>(&mut self, n: usize) {
        let acc = self.c.load_vector::<WIDTH>(self.m, n);
        let b = self.b.load_vector::<WIDTH>(self.k, n);
        self.c
            .store_vector(self.m, n, b.mul_add(F32x::splat(self.a_mk), acc));
    }
}

/// Dot step over a borrowed output row and B row.
struct RowDot<'a> {
    c_row: &'a mut [f32],
    b_row: &'a [f32],
    a_mk: f32,
}

impl VectorOp for RowDot<'_> {
    #[inline(always)]
    fn step<const WIDTH: usize>(&mut self, n: usize) {
        let acc = F32x::<WIDTH>::load(&self.c_row[n..]);
        let b = F32x::<WIDTH>::load(&self.b_row[n..]);
        b.mul_add(F32x::splat(self.a_mk), acc)
            .store(&mut self.c_row[n..]);
    }
}

/// Adds `A[m, k] * B[k, ..]` into `C[m, ..]` with `W`-wide vectors.
///
/// Dimensions are not re-checked here; the matmul entry points validate
/// them once per call.
#[inline]
pub fn dot<const W: usize>(c: &mut Matrix, a: &Matrix, b: &Matrix, m: usize, k: usize) {
    let cols = c.cols();
    let mut op = MatrixDot {
        c,
        b,
        a_mk: a.get(m, k),
        m,
        k,
    };
    vectorize::<W, _>(cols, &mut op);
}

/// Unrolled version of [`dot`].
#[inline]
pub fn dot_unrolled<const W: usize, const U: usize>(
    c: &mut Matrix,
    a: &Matrix,
    b: &Matrix,
    m: usize,
    k: usize,
) {
    let cols = c.cols();
    let mut op = MatrixDot {
        c,
        b,
        a_mk: a.get(m, k),
        m,
        k,
    };
    vectorize_unroll::<W, U, _>(cols, &mut op);
}

/// Slice form of [`dot`]: `c_row += a_mk * b_row`.
///
/// `b_row` must be at least as long as `c_row`. Used by the tiled and
/// row-parallel drivers, which only hold a slice of C.
#[inline]
pub fn dot_row<const W: usize>(c_row: &mut [f32], a_mk: f32, b_row: &[f32]) {
    let len = c_row.len();
    let mut op = RowDot { c_row, b_row, a_mk };
    vectorize::<W, _>(len, &mut op);
}

#[inline]
pub fn dot_row_unrolled<const W: usize, const U: usize>(c_row: &mut [f32], a_mk: f32, b_row: &[f32]) {
    let len = c_row.len();
    let mut op = RowDot { c_row, b_row, a_mk };
    vectorize_unroll::<W, U, _>(len, &mut op);
}

/// Single-threaded matmul: one [`dot`] per (m, k) pair.
pub fn matmul_vectorized<const W: usize>(c: &mut Matrix, a: &Matrix, b: &Matrix) -> Result<()> {
    check_dims(c, a, b)?;
    for m in 0..c.rows() {
        for k in 0..a.cols() {
            dot::<W>(c, a, b, m, k);
        }
    }
    Ok(())
}

pub fn matmul_vectorized_unrolled<const W: usize, const U: usize>(
    c: &mut Matrix,
    a: &Matrix,
    b: &Matrix,
) -> Result<()> {
    check_dims(c, a, b)?;
    for m in 0..c.rows() {
        for k in 0..a.cols() {
            dot_unrolled::<W, U>(c, a, b, m, k);
        }
    }
    Ok(())
}
