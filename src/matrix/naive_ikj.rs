use crate::error::Result;
use crate::matrix::{Matrix, check_dims};

/// Scalar matrix multiplication using i-k-j loop order.
///
/// Swapping the j and k loops makes the innermost loop walk both B and C
/// along a row (stride 1). Each A[i, k] is loaded once and broadcast over
/// the whole row. This is the loop order every vectorized variant keeps.
pub fn matmul_naive_ikj(c: &mut Matrix, a: &Matrix, b: &Matrix) -> Result<()> {
    check_dims(c, a, b)?;
    for i in 0..c.rows() {
        for p in 0..a.cols() {
            let a_ip = a.get(i, p);
            for j in 0..c.cols() {
                c.set(i, j, c.get(i, j) + a_ip * b.get(p, j));
            }
        }
    }
    Ok(())
}
