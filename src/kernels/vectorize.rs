//! Drivers that split a 1-D range into fixed-width vector steps.

/// An operation applied at an offset with a compile-time width.
///
/// The drivers below call `step::<W>` for full vectors and `step::<1>` for
/// the scalar tail.
pub trait VectorOp {
    fn step<const WIDTH: usize>(&mut self, offset: usize);
}

/// Calls `op.step::<W>(n)` for `n = 0, W, 2W, ...` while `n + W <= size`,
/// then `op.step::<1>(n)` for each remaining index.
///
/// Every index in `0..size` is covered exactly once.
#[inline(always)]
pub fn vectorize<const W: usize, Op: VectorOp>(size: usize, op: &mut Op) {
    const { assert!(W > 0, "vector width must be non-zero") };

    let vector_end = size - size % W;
    for n in (0..vector_end).step_by(W) {
        op.step::<W>(n);
    }
    for n in vector_end..size {
        op.step::<1>(n);
    }
}

/// Like [`vectorize`], but issues `U` vector steps back to back per
/// iteration so independent loads and multiply-adds can overlap. The
/// result is identical.
#[inline(always)]
pub fn vectorize_unroll<const W: usize, const U: usize, Op: VectorOp>(size: usize, op: &mut Op) {
    const { assert!(W > 0 && U > 0, "vector width and unroll factor must be non-zero") };

    let block = W * U;
    let unrolled_end = size - size % block;
    for base in (0..unrolled_end).step_by(block) {
        for u in 0..U {
            op.step::<W>(base + u * W);
        }
    }

    let vector_end = size - size % W;
    for n in (unrolled_end..vector_end).step_by(W) {
        op.step::<W>(n);
    }
    for n in vector_end..size {
        op.step::<1>(n);
    }
}
