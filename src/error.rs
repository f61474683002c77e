//! Error type shared by every layer of the crate.

use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatmulError {
    #[error("matrix size {rows}x{cols} overflows usize")]
    SizeOverflow { rows: usize, cols: usize },
    #[error("cannot allocate {rows}x{cols} matrix")]
    Allocation {
        rows: usize,
        cols: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("buffer holds {len} elements, expected {rows}x{cols}")]
    BufferLength { rows: usize, cols: usize, len: usize },
    #[error(
        "matmul dimension mismatch: C[{c_rows}x{c_cols}] += A[{a_rows}x{a_cols}] @ B[{b_rows}x{b_cols}]"
    )]
    DimensionMismatch {
        c_rows: usize,
        c_cols: usize,
        a_rows: usize,
        a_cols: usize,
        b_rows: usize,
        b_cols: usize,
    },
    #[error("iteration space {end_x}x{end_y} is not a multiple of tile {tile_x}x{tile_y}")]
    TileMismatch {
        end_x: usize,
        end_y: usize,
        tile_x: usize,
        tile_y: usize,
    },
    #[error("invalid value {value:?} for {key}")]
    Config { key: String, value: String },
    #[error("thread pool: {0}")]
    ThreadPool(String),
}

pub type Result<T> = std::result::Result<T, MatmulError>;
