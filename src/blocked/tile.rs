//! Tile descriptors and the tiling driver.

use std::ops::Range;

use crate::error::{MatmulError, Result};

/// Origin of one `TX × TY` tile. `x` indexes columns, `y` the reduction
/// dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile<const TX: usize, const TY: usize> {
    pub x: usize,
    pub y: usize,
}

impl<const TX: usize, const TY: usize> Tile<TX, TY> {
    pub const WIDTH: usize = TX;
    pub const HEIGHT: usize = TY;

    #[inline(always)]
    pub fn x_range(&self) -> Range<usize> {
        self.x..self.x + TX
    }

    #[inline(always)]
    pub fn y_range(&self) -> Range<usize> {
        self.y..self.y + TY
    }
}

/// A validated `end_x × end_y` iteration space split into `TX × TY` tiles.
///
/// Remainder tiles are not supported: both extents must be exact
/// multiples of the tile size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tiling<const TX: usize, const TY: usize> {
    end_x: usize,
    end_y: usize,
}

impl<const TX: usize, const TY: usize> Tiling<TX, TY> {
    /// # Errors
    ///
    /// `TileMismatch` if `end_x % TX != 0` or `end_y % TY != 0`.
    pub fn new(end_x: usize, end_y: usize) -> Result<Self> {
        const { assert!(TX > 0 && TY > 0, "tile extents must be non-zero") };

        if end_x % TX != 0 || end_y % TY != 0 {
            return Err(MatmulError::TileMismatch {
                end_x,
                end_y,
                tile_x: TX,
                tile_y: TY,
            });
        }
        Ok(Self { end_x, end_y })
    }

    pub fn end_x(&self) -> usize {
        self.end_x
    }

    pub fn end_y(&self) -> usize {
        self.end_y
    }

    pub fn tile_count(&self) -> usize {
        (self.end_x / TX) * (self.end_y / TY)
    }

    /// Tiles in y-major, x-minor order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile<TX, TY>> + use<TX, TY> {
        let (end_x, end_y) = (self.end_x, self.end_y);
        (0..end_y)
            .step_by(TY)
            .flat_map(move |y| (0..end_x).step_by(TX).map(move |x| Tile { x, y }))
    }

    #[inline]
    pub fn for_each<F: FnMut(Tile<TX, TY>)>(&self, mut tiled_fn: F) {
        for y in (0..self.end_y).step_by(TY) {
            for x in (0..self.end_x).step_by(TX) {
                tiled_fn(Tile { x, y });
            }
        }
    }
}

/// Runs `tiled_fn` on every `TX × TY` tile of `[0, end_x) × [0, end_y)`,
/// y-major then x.
///
/// # Errors
///
/// `TileMismatch` if the extents are not tile multiples; nothing is
/// invoked in that case.
pub fn tile<const TX: usize, const TY: usize, F: FnMut(Tile<TX, TY>)>(
    end_x: usize,
    end_y: usize,
    tiled_fn: F,
) -> Result<()> {
    Tiling::<TX, TY>::new(end_x, end_y)?.for_each(tiled_fn);
    Ok(())
}
