//! Fixed-width f32 vector value.
//!
//! `F32x<W>` is a plain `[f32; W]` with lane-wise arithmetic. Every
//! operation is a fixed-length loop, which the compiler turns into SIMD
//! instructions for the target. `F32x<1>` is the scalar case.

use std::ops::{Add, Mul};

/// Number of f32 lanes in a 256-bit register.
pub const NELTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct F32x<const W: usize>(pub [f32; W]);

impl<const W: usize> F32x<W> {
    pub const LANES: usize = W;

    #[inline(always)]
    pub fn splat(value: f32) -> Self {
        Self([value; W])
    }

    /// Reads the first `W` elements of `src`.
    ///
    /// # Panics
    ///
    /// Panics if `src` is shorter than `W`.
    #[inline(always)]
    pub fn load(src: &[f32]) -> Self {
        let mut lanes = [0.0; W];
        lanes.copy_from_slice(&src[..W]);
        Self(lanes)
    }

    /// Writes all lanes to the first `W` elements of `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than `W`.
    #[inline(always)]
    pub fn store(self, dst: &mut [f32]) {
        dst[..W].copy_from_slice(&self.0);
    }

    /// `self * a + b`, lane by lane.
    #[inline(always)]
    pub fn mul_add(self, a: Self, b: Self) -> Self {
        let mut out = b.0;
        for (o, (x, y)) in out.iter_mut().zip(self.0.iter().zip(a.0.iter())) {
            *o += x * y;
        }
        Self(out)
    }

    #[inline(always)]
    pub fn reduce_add(self) -> f32 {
        self.0.iter().sum()
    }
}

impl<const W: usize> Add for F32x<W> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (o, r) in out.iter_mut().zip(rhs.0.iter()) {
            *o += r;
        }
        Self(out)
    }
}

impl<const W: usize> Mul for F32x<W> {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (o, r) in out.iter_mut().zip(rhs.0.iter()) {
            *o *= r;
        }
        Self(out)
    }
}
