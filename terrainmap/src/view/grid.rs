//! Buffered tile grid covering a view window.

use crate::coord::TileCoord;

use super::{ViewError, ViewWindow};

/// Inclusive rectangle of tiles at one zoom level.
///
/// The grid extends one tile past the window's corner tiles on every side so
/// that a mosaic built from it fully covers the window even when the window
/// edges fall mid-tile. The buffer is clamped to the valid tile range and
/// never wraps around the antimeridian or the poles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    zoom: u8,
    min_x: u32,
    max_x: u32,
    min_y: u32,
    max_y: u32,
}

impl TileGrid {
    /// Computes the buffered grid for a window.
    pub fn for_window(window: &ViewWindow) -> Result<Self, ViewError> {
        let ur = window.upper_right_tile()?;
        let ll = window.lower_left_tile()?;
        let last = ur.tiles_per_axis() - 1;

        Ok(Self {
            zoom: window.zoom(),
            min_x: ll.x.saturating_sub(1),
            max_x: (ur.x + 1).min(last),
            min_y: ur.y.saturating_sub(1),
            max_y: (ll.y + 1).min(last),
        })
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Column range as `(min, max)`, inclusive.
    pub fn x_range(&self) -> (u32, u32) {
        (self.min_x, self.max_x)
    }

    /// Row range as `(min, max)`, inclusive.
    pub fn y_range(&self) -> (u32, u32) {
        (self.min_y, self.max_y)
    }

    pub fn width(&self) -> usize {
        (self.max_x - self.min_x + 1) as usize
    }

    pub fn height(&self) -> usize {
        (self.max_y - self.min_y + 1) as usize
    }

    /// Number of tiles in the grid, computed without materialising them.
    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, tile: &TileCoord) -> bool {
        tile.zoom == self.zoom
            && (self.min_x..=self.max_x).contains(&tile.x)
            && (self.min_y..=self.max_y).contains(&tile.y)
    }

    /// Fails with [`ViewError::TooManyTiles`] when the grid exceeds `max_tiles`.
    pub fn check_budget(&self, max_tiles: usize) -> Result<(), ViewError> {
        let count = self.len();
        if count > max_tiles {
            return Err(ViewError::TooManyTiles {
                count,
                max: max_tiles,
            });
        }
        Ok(())
    }

    /// Materialises the grid in sweep order: columns west to east, and within
    /// each column rows north to south.
    pub fn tiles(&self) -> Vec<TileCoord> {
        let mut tiles = Vec::with_capacity(self.len());
        for x in self.min_x..=self.max_x {
            for y in self.min_y..=self.max_y {
                tiles.push(TileCoord::new(x, y, self.zoom));
            }
        }
        tiles
    }
}
