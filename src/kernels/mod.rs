//! Vector kernels for the inner loop of matrix multiplication.
//!
//! Everything here updates one row segment of C for one reduction index k.
//! The tiled and threaded drivers call these for every (m, k) pair.
//!
//! - `simd`: `F32x<W>`, a fixed-width f32 vector
//! - `vectorize`: splits a row into W-wide steps plus a scalar tail
//! - `dot`: the portable dot step, over a `Matrix` or over row slices
//! - `dot_avx2`: AVX2 + FMA row kernel (x86_64 only)

pub mod dot;
#[cfg(target_arch = "x86_64")]
pub mod dot_avx2;
pub mod simd;
pub mod vectorize;

use self::dot::dot_row_unrolled;
use self::simd::NELTS;

/// Default dot-step width: two registers' worth of lanes per step.
pub const DOT_WIDTH: usize = NELTS * 2;

/// Vector steps per unrolled iteration in the portable kernel, so each
/// iteration covers `DOT_WIDTH` columns.
pub const PORTABLE_UNROLL: usize = DOT_WIDTH / NELTS;

/// Row kernel picked once per matmul call from the CPU's features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotKernel {
    /// `F32x` lanes, left to the compiler to vectorize.
    Portable,
    /// Hand-written AVX2 + FMA intrinsics.
    #[cfg(target_arch = "x86_64")]
    Avx2Fma,
}

impl DotKernel {
    /// Picks the fastest kernel for this CPU (AVX2+FMA > portable).
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
                return DotKernel::Avx2Fma;
            }
        }
        DotKernel::Portable
    }

    pub fn name(self) -> &'static str {
        match self {
            DotKernel::Portable => "portable",
            #[cfg(target_arch = "x86_64")]
            DotKernel::Avx2Fma => "avx2+fma",
        }
    }

    /// `c_row += a_mk * b_row[..c_row.len()]`.
    ///
    /// # Panics
    ///
    /// Panics if `b_row` is shorter than `c_row`.
    #[inline]
    pub fn apply(self, c_row: &mut [f32], a_mk: f32, b_row: &[f32]) {
        let b_row = &b_row[..c_row.len()];
        match self {
            DotKernel::Portable => dot_row_unrolled::<NELTS, PORTABLE_UNROLL>(c_row, a_mk, b_row),
            // SAFETY: this variant is only produced by `detect` after the
            // feature check, and `b_row` was sliced to `c_row`'s length.
            #[cfg(target_arch = "x86_64")]
            DotKernel::Avx2Fma => unsafe { dot_avx2::dot_row_avx2(c_row, a_mk, b_row) },
        }
    }
}
