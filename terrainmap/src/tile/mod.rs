//! Per-tile elevation extraction
//!
//! [`TileProcessor`] fetches a tile from a [`TileSource`](crate::source::TileSource),
//! decodes the PNG and samples all 256×256 pixel centres in row-major order.
//!
//! ```text
//! fetch ──► TerrainImage::decode ──► for y, for x:
//!                                      pixel centre ─► location ─► elevation
//! ```
//!
//! Failures are graded:
//!
//! - Whole tile: [`TileFailure`], carried inside the [`FetchResult`]
//! - Single pixel: [`ElevationLookupFailed`], replaced by [`NO_DATA_ELEVATION`]

mod grid;
mod processor;
mod terrain;

pub use grid::{ElevationGrid, ElevationSample, TileExtent, NO_DATA_ELEVATION};
pub use processor::{FetchResult, TileData, TileFailure, TileProcessor};
pub use terrain::{ElevationLookupFailed, TerrainImage};
