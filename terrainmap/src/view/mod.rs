//! View decomposition
//!
//! Turns a [`ViewWindow`] into the ordered set of tiles that covers it plus a
//! one-tile buffer on every side, and exposes the tile-count pre-flight check
//! that must pass before any network fetch is started.
//!
//! ```text
//!   x: ll.x-1 ............. ur.x+1
//!  ┌───┬───┬───┬───┐  y: ur.y-1
//!  │ b │ b │ b │ b │
//!  ├───┼───┼───┼───┤
//!  │ b │ ╔═══════╗ │  ← window corners fall inside
//!  ├───┼─║─┼───┼─║─┤    the inner tiles
//!  │ b │ ╚═══════╝ │
//!  ├───┼───┼───┼───┤
//!  │ b │ b │ b │ b │  y: ll.y+1
//!  └───┴───┴───┴───┘
//! ```

mod grid;
mod window;

pub use grid::TileGrid;
pub use window::ViewWindow;

use thiserror::Error;

use crate::coord::{CoordError, TileCoord};

/// Default upper bound on the number of tiles one run may request.
pub const DEFAULT_MAX_TILES: usize = 100;

/// Errors raised while validating or decomposing a view.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    /// A corner or the zoom level is not usable.
    #[error(transparent)]
    InvalidCoordinate(#[from] CoordError),

    /// `min >= max` on one axis.
    #[error("Invalid {axis} range: min {min} must be less than max {max}")]
    InvertedBounds {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    /// The buffered grid is larger than the configured budget.
    #[error("Too many map tiles ({count} > {max}). Narrow the view or lower the zoom")]
    TooManyTiles { count: usize, max: usize },
}

/// Returns the buffered, ordered tile set covering `window`.
pub fn tiles_for(window: &ViewWindow) -> Result<Vec<TileCoord>, ViewError> {
    Ok(TileGrid::for_window(window)?.tiles())
}

/// Pre-flight: computes the grid for `window` and checks it against
/// `max_tiles` without materialising any coordinates.
pub fn plan(window: &ViewWindow, max_tiles: usize) -> Result<TileGrid, ViewError> {
    let grid = TileGrid::for_window(window)?;
    grid.check_budget(max_tiles)?;
    Ok(grid)
}
