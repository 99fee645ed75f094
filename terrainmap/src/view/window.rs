//! The requested map view.

use crate::coord::{to_tile_coords, validate_location, validate_zoom, TileCoord};

use super::ViewError;

/// Geographic bounding box plus the zoom level to render it at.
///
/// Construct with [`ViewWindow::new`], which rejects empty or inverted ranges
/// and coordinates that cannot be placed on the tile grid. A window is never
/// mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewWindow {
    min_lat: f64,
    max_lat: f64,
    min_lng: f64,
    max_lng: f64,
    zoom: u8,
}

impl ViewWindow {
    /// Creates a validated view window.
    ///
    /// # Errors
    ///
    /// - [`ViewError::InvalidCoordinate`] if a corner is not on the tile grid
    ///   or the zoom is outside `1..=15`
    /// - [`ViewError::InvertedBounds`] if `min >= max` on either axis
    pub fn new(
        min_lat: f64,
        max_lat: f64,
        min_lng: f64,
        max_lng: f64,
        zoom: u8,
    ) -> Result<Self, ViewError> {
        validate_location(min_lat, min_lng)?;
        validate_location(max_lat, max_lng)?;
        validate_zoom(zoom)?;

        if min_lat >= max_lat {
            return Err(ViewError::InvertedBounds {
                axis: "latitude",
                min: min_lat,
                max: max_lat,
            });
        }
        if min_lng >= max_lng {
            return Err(ViewError::InvertedBounds {
                axis: "longitude",
                min: min_lng,
                max: max_lng,
            });
        }

        Ok(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
            zoom,
        })
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    pub fn min_lng(&self) -> f64 {
        self.min_lng
    }

    pub fn max_lng(&self) -> f64 {
        self.max_lng
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Tile containing the north-east (upper-right) corner.
    pub fn upper_right_tile(&self) -> Result<TileCoord, ViewError> {
        Ok(to_tile_coords(self.max_lat, self.max_lng, self.zoom)?)
    }

    /// Tile containing the south-west (lower-left) corner.
    pub fn lower_left_tile(&self) -> Result<TileCoord, ViewError> {
        Ok(to_tile_coords(self.min_lat, self.min_lng, self.zoom)?)
    }
}
