//! Coordinate types and validation errors.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum latitude representable in Web Mercator (degrees).
pub const MAX_LAT: f64 = 85.05112878;

/// Minimum latitude representable in Web Mercator (degrees).
pub const MIN_LAT: f64 = -85.05112878;

/// Minimum longitude (degrees).
pub const MIN_LON: f64 = -180.0;

/// Maximum longitude (degrees).
pub const MAX_LON: f64 = 180.0;

/// Minimum supported zoom level.
pub const MIN_ZOOM: u8 = 1;

/// Maximum supported zoom level. Terrain tile services stop at 15.
pub const MAX_ZOOM: u8 = 15;

/// Width and height of a terrain tile in pixels.
pub const TILE_SIZE: u32 = 256;

/// Errors raised by coordinate conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude/longitude pair cannot be mapped onto the tile grid.
    #[error("Invalid coordinate (lat {lat}, lng {lng}): {reason}")]
    InvalidCoordinate { lat: f64, lng: f64, reason: String },

    /// Zoom level outside the supported range.
    #[error("Invalid zoom level {0} (must be 1-15)")]
    InvalidZoom(u8),
}

/// Slippy-map tile address.
///
/// - `x` grows eastward from the antimeridian
/// - `y` grows southward from the northern Mercator limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
    /// Zoom level.
    pub zoom: u8,
}

impl TileCoord {
    /// Creates a tile coordinate without range checks.
    pub fn new(x: u32, y: u32, zoom: u8) -> Self {
        Self { x, y, zoom }
    }

    /// Number of tiles along one axis at this tile's zoom level.
    #[inline]
    pub fn tiles_per_axis(&self) -> u32 {
        1u32 << self.zoom
    }

    /// Nominal geographic bounds derived from the tile numbering.
    ///
    /// Returns `(min_lat, max_lat, min_lng, max_lng)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let n = self.tiles_per_axis() as f64;

        let min_lng = self.x as f64 / n * 360.0 - 180.0;
        let max_lng = (self.x + 1) as f64 / n * 360.0 - 180.0;

        let max_lat = (PI * (1.0 - 2.0 * self.y as f64 / n)).sinh().atan().to_degrees();
        let min_lat = (PI * (1.0 - 2.0 * (self.y + 1) as f64 / n))
            .sinh()
            .atan()
            .to_degrees();

        (min_lat, max_lat, min_lng, max_lng)
    }

    /// Deterministic file stem used for per-tile artifacts (`z_x_y`).
    pub fn file_stem(&self) -> String {
        format!("{}_{}_{}", self.zoom, self.x, self.y)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiles_per_axis() {
        assert_eq!(TileCoord::new(0, 0, 1).tiles_per_axis(), 2);
        assert_eq!(TileCoord::new(0, 0, 15).tiles_per_axis(), 32768);
    }

    #[test]
    fn test_bounds_zoom_one_north_west() {
        let (min_lat, max_lat, min_lng, max_lng) = TileCoord::new(0, 0, 1).bounds();
        assert!((min_lat - 0.0).abs() < 1e-9);
        assert!((max_lat - MAX_LAT).abs() < 1e-6);
        assert_eq!(min_lng, -180.0);
        assert_eq!(max_lng, 0.0);
    }

    #[test]
    fn test_file_stem_and_display() {
        let tile = TileCoord::new(163, 395, 10);
        assert_eq!(tile.file_stem(), "10_163_395");
        assert_eq!(tile.to_string(), "10/163/395");
    }

    #[test]
    fn test_coord_error_display() {
        let err = CoordError::InvalidZoom(16);
        assert_eq!(err.to_string(), "Invalid zoom level 16 (must be 1-15)");
    }
}
