//! Cache tiling over the (column, reduction) iteration space.
//!
//! A row of C is updated tile by tile: for each `TILE_X`-wide column band
//! and `TILE_Y`-deep slice of k, the same few rows of B and the same
//! segment of C stay hot in L1 while the dot steps run.
//!
//! - `tile`: the `Tile` descriptor, `Tiling` plan and `tile()` driver
//! - `tiled`: per-row tiled kernels and the single-threaded `matmul_tiled`

pub mod tile;
pub mod tiled;

use crate::kernels::simd::NELTS;

/// Columns per tile.
pub const TILE_X: usize = NELTS * 4;
/// Reduction steps per tile.
pub const TILE_Y: usize = 4;
/// Vector steps per unrolled iteration: one tile row in a single pass.
pub const UNROLL: usize = TILE_X / NELTS;
