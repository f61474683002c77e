//! Dense row-major f32 matrix and the scalar baselines.
//!
//! `Matrix` owns its buffer. Element (r, c) lives at offset `r * cols + c`.
//! Storage is released when the matrix is dropped or passed to
//! [`Matrix::release`].

pub mod naive_ijk;
pub mod naive_ikj;

use rand::Rng;

use crate::error::{MatmulError, Result};
use crate::kernels::simd::F32x;

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Allocates a zero-filled `rows × cols` matrix.
    ///
    /// # Errors
    ///
    /// `SizeOverflow` if `rows * cols` does not fit in usize, `Allocation`
    /// if the buffer cannot be reserved.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        let mut data = allocate(rows, cols)?;
        data.resize(rows * cols, 0.0);
        Ok(Self { rows, cols, data })
    }

    /// Wraps a caller-supplied buffer as-is, without clearing it.
    ///
    /// # Errors
    ///
    /// `BufferLength` if `buffer.len() != rows * cols`.
    pub fn from_buffer(rows: usize, cols: usize, buffer: Vec<f32>) -> Result<Self> {
        let expected = rows
            .checked_mul(cols)
            .ok_or(MatmulError::SizeOverflow { rows, cols })?;
        if buffer.len() != expected {
            return Err(MatmulError::BufferLength {
                rows,
                cols,
                len: buffer.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            data: buffer,
        })
    }

    /// Allocates a matrix filled with uniform values in `[0, 1)` from the
    /// thread-local generator.
    pub fn random(rows: usize, cols: usize) -> Result<Self> {
        Self::random_with(rows, cols, &mut rand::thread_rng())
    }

    /// Same as [`Matrix::random`] with a caller-provided generator.
    pub fn random_with<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Self> {
        let mut data = allocate(rows, cols)?;
        data.extend((0..rows * cols).map(|_| rng.r#gen::<f32>()));
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// # Panics
    ///
    /// Panics unless `row < rows` and `col < cols`.
    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of range for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        self.data[row * self.cols + col]
    }

    /// # Panics
    ///
    /// Panics unless `row < rows` and `col < cols`.
    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of range for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        self.data[row * self.cols + col] = value;
    }

    /// Reads `W` contiguous elements starting at (row, col).
    ///
    /// The run must stay inside one row: `col + W <= cols`.
    #[inline(always)]
    pub fn load_vector<const W: usize>(&self, row: usize, col: usize) -> F32x<W> {
        debug_assert!(row < self.rows && col + W <= self.cols);
        F32x::load(&self.data[row * self.cols + col..])
    }

    #[inline(always)]
    pub fn store_vector<const W: usize>(&mut self, row: usize, col: usize, value: F32x<W>) {
        debug_assert!(row < self.rows && col + W <= self.cols);
        value.store(&mut self.data[row * self.cols + col..]);
    }

    #[inline(always)]
    pub fn row(&self, row: usize) -> &[f32] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    #[inline(always)]
    pub fn row_mut(&mut self, row: usize) -> &mut [f32] {
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Overwrites every element, e.g. to re-zero an output between runs.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Frees the buffer now instead of at end of scope.
    pub fn release(self) {
        drop(self);
    }
}

fn allocate(rows: usize, cols: usize) -> Result<Vec<f32>> {
    let len = rows
        .checked_mul(cols)
        .ok_or(MatmulError::SizeOverflow { rows, cols })?;
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|source| MatmulError::Allocation { rows, cols, source })?;
    Ok(data)
}

/// Checks `C[m×n] += A[m×k] @ B[k×n]`.
pub(crate) fn check_dims(c: &Matrix, a: &Matrix, b: &Matrix) -> Result<()> {
    if c.rows != a.rows || a.cols != b.rows || c.cols != b.cols {
        return Err(MatmulError::DimensionMismatch {
            c_rows: c.rows,
            c_cols: c.cols,
            a_rows: a.rows,
            a_cols: a.cols,
            b_rows: b.rows,
            b_cols: b.cols,
        });
    }
    Ok(())
}
