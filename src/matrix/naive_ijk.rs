use crate::error::Result;
use crate::matrix::{Matrix, check_dims};

/// Naive matrix multiplication using i-j-k loop order.
///
/// The textbook triple loop: each C[i, j] is a dot product of row i of A
/// and column j of B. The innermost loop walks B with stride `cols`, so
/// every step is a cache miss on large inputs.
///
/// Use this as the correctness baseline, not for performance.
///
/// # Errors
///
/// `DimensionMismatch` unless C is m×n, A is m×k and B is k×n.
pub fn matmul_naive_ijk(c: &mut Matrix, a: &Matrix, b: &Matrix) -> Result<()> {
    check_dims(c, a, b)?;
    for i in 0..c.rows() {
        for j in 0..c.cols() {
            let mut acc = c.get(i, j);
            for p in 0..a.cols() {
                acc += a.get(i, p) * b.get(p, j);
            }
            c.set(i, j, acc);
        }
    }
    Ok(())
}
