//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude),
//! slippy-map tile numbers, and the 256×256 pixel grid inside a tile.
//!
//! All functions here are pure. Every other component derives positions from
//! these functions so that the tile grid, the sampled pixel locations and the
//! raster georeferencing stay consistent with each other.

mod types;

pub use types::{
    CoordError, Location, TileCoord, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM,
    TILE_SIZE,
};

use std::f64::consts::PI;

/// Checks that a latitude/longitude pair can be placed on the tile grid.
pub fn validate_location(lat: f64, lng: f64) -> Result<(), CoordError> {
    let invalid = |reason: &str| CoordError::InvalidCoordinate {
        lat,
        lng,
        reason: reason.to_string(),
    };

    if !lat.is_finite() || !lng.is_finite() {
        return Err(invalid("coordinates must be finite"));
    }
    if lat.abs() >= 90.0 {
        return Err(invalid("latitude must be strictly between -90 and 90"));
    }
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(invalid("latitude outside the Web Mercator range"));
    }
    if !(MIN_LON..=MAX_LON).contains(&lng) {
        return Err(invalid("longitude must be between -180 and 180"));
    }
    Ok(())
}

/// Checks that a zoom level is supported.
pub fn validate_zoom(zoom: u8) -> Result<(), CoordError> {
    if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
        return Err(CoordError::InvalidZoom(zoom));
    }
    Ok(())
}

/// Converts geographic coordinates to tile coordinates.
///
/// Uses the standard slippy-map numbering:
///
/// - `x = floor((lng + 180) / 360 * 2^zoom)`
/// - `y = floor((1 - ln(tan(lat) + sec(lat)) / π) / 2 * 2^zoom)`
///
/// Positions on the eastern antimeridian or the southern Mercator limit
/// belong to the last tile of the axis.
///
/// # Errors
///
/// [`CoordError::InvalidCoordinate`] for non-finite or out-of-range input and
/// [`CoordError::InvalidZoom`] for zoom levels outside `1..=15`.
#[inline]
pub fn to_tile_coords(lat: f64, lng: f64, zoom: u8) -> Result<TileCoord, CoordError> {
    validate_location(lat, lng)?;
    validate_zoom(zoom)?;

    let n = 2.0_f64.powi(zoom as i32);
    let last = (1u32 << zoom) - 1;

    let x = ((lng + 180.0) / 360.0 * n).floor() as u32;

    let lat_rad = lat.to_radians();
    let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n).floor();
    // Rounding at the northern limit can land a hair below zero.
    let y = y.max(0.0) as u32;

    Ok(TileCoord::new(x.min(last), y.min(last), zoom))
}

/// Converts tile coordinates back to geographic coordinates.
///
/// Returns the latitude/longitude of the tile's north-west corner.
#[inline]
pub fn tile_to_lat_lon(tile: &TileCoord) -> (f64, f64) {
    let n = 2.0_f64.powi(tile.zoom as i32);

    let lng = tile.x as f64 / n * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * tile.y as f64 / n)).sinh().atan().to_degrees();

    (lat, lng)
}

/// Maps a position in a tile's pixel grid to a geographic location.
///
/// `px`/`py` are measured from the tile's north-west corner in pixels; integer
/// values address pixel edges, so `(0.5, 0.5)` is the centre of the first
/// pixel and `(256, 256)` is the tile's south-east corner.
pub fn pixel_to_location(tile: &TileCoord, px: f64, py: f64) -> Location {
    let world = TILE_SIZE as f64 * 2.0_f64.powi(tile.zoom as i32);
    let gx = (tile.x as f64 * TILE_SIZE as f64) + px;
    let gy = (tile.y as f64 * TILE_SIZE as f64) + py;

    let longitude = gx / world * 360.0 - 180.0;
    let latitude = (PI * (1.0 - 2.0 * gy / world)).sinh().atan().to_degrees();

    Location::new(latitude, longitude)
}

/// Maps a geographic location to the pixel of `tile` that contains it.
///
/// Returns `None` when the location lies outside the tile or is not finite.
pub fn location_to_pixel(tile: &TileCoord, location: &Location) -> Option<(u32, u32)> {
    if !location.latitude.is_finite() || !location.longitude.is_finite() {
        return None;
    }

    let world = TILE_SIZE as f64 * 2.0_f64.powi(tile.zoom as i32);
    let lat_rad = location.latitude.to_radians();

    let gx = (location.longitude + 180.0) / 360.0 * world;
    let gy = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * world;

    let px = (gx - tile.x as f64 * TILE_SIZE as f64).floor();
    let py = (gy - tile.y as f64 * TILE_SIZE as f64).floor();

    let range = 0.0..TILE_SIZE as f64;
    if range.contains(&px) && range.contains(&py) {
        Some((px as u32, py as u32))
    } else {
        None
    }
}
