//! AVX2 + FMA row kernel for the dot step.

/// Computes `c_row[j] += a_mk * b_row[j]` for every j in `c_row`.
///
/// Two YMM registers (16 f32) per iteration keep two independent FMA
/// chains in flight, then one register, then scalar for the last few
/// columns.
///
/// # Safety
///
/// Caller must ensure:
/// - CPU supports AVX2 and FMA (checked via `#[target_feature]`)
/// - `b_row.len() >= c_row.len()`
#[target_feature(enable = "avx2,fma")]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn dot_row_avx2(c_row: &mut [f32], a_mk: f32, b_row: &[f32]) {
    use std::arch::x86_64::*;

    debug_assert!(b_row.len() >= c_row.len());

    let len = c_row.len();
    let c = c_row.as_mut_ptr();
    let b = b_row.as_ptr();
    let a = _mm256_set1_ps(a_mk);

    let mut j = 0;
    while j + 16 <= len {
        let c0 = _mm256_loadu_ps(c.add(j));
        let c1 = _mm256_loadu_ps(c.add(j + 8));
        let b0 = _mm256_loadu_ps(b.add(j));
        let b1 = _mm256_loadu_ps(b.add(j + 8));

        _mm256_storeu_ps(c.add(j), _mm256_fmadd_ps(a, b0, c0));
        _mm256_storeu_ps(c.add(j + 8), _mm256_fmadd_ps(a, b1, c1));
        j += 16;
    }

    if j + 8 <= len {
        let c0 = _mm256_loadu_ps(c.add(j));
        let b0 = _mm256_loadu_ps(b.add(j));
        _mm256_storeu_ps(c.add(j), _mm256_fmadd_ps(a, b0, c0));
        j += 8;
    }

    while j < len {
        *c.add(j) += a_mk * *b.add(j);
        j += 1;
    }
}
