//! Decoded terrain tile image and per-pixel lookup.

use image::RgbaImage;
use thiserror::Error;

use crate::coord::{self, Location, TileCoord, TILE_SIZE};
use crate::source::ElevationEncoding;

use super::{TileExtent, TileFailure};

/// Why a single pixel could not be turned into an elevation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ElevationLookupFailed {
    #[error("Location ({lat}, {lng}) is outside tile {tile}")]
    OutsideTile { tile: TileCoord, lat: f64, lng: f64 },

    #[error("Pixel ({x}, {y}) is transparent")]
    Transparent { x: u32, y: u32 },
}

/// A fetched tile decoded into RGBA pixels, ready for elevation lookups.
pub struct TerrainImage {
    tile: TileCoord,
    encoding: ElevationEncoding,
    pixels: RgbaImage,
}

impl TerrainImage {
    /// Decodes raw image bytes.
    ///
    /// # Errors
    ///
    /// [`TileFailure::Decode`] if the bytes are not a supported image or the
    /// image is not exactly 256×256.
    pub fn decode(
        tile: TileCoord,
        bytes: &[u8],
        encoding: ElevationEncoding,
    ) -> Result<Self, TileFailure> {
        let pixels = image::load_from_memory(bytes)
            .map_err(|e| TileFailure::Decode(e.to_string()))?
            .to_rgba8();

        if pixels.width() != TILE_SIZE || pixels.height() != TILE_SIZE {
            return Err(TileFailure::Decode(format!(
                "expected {}x{} image, got {}x{}",
                TILE_SIZE,
                TILE_SIZE,
                pixels.width(),
                pixels.height()
            )));
        }

        Ok(Self {
            tile,
            encoding,
            pixels,
        })
    }

    pub fn tile(&self) -> TileCoord {
        self.tile
    }

    /// Location at a pixel position of this tile.
    pub fn pixel_to_location(&self, px: f64, py: f64) -> Location {
        coord::pixel_to_location(&self.tile, px, py)
    }

    /// Elevation in metres of the pixel containing `location`.
    pub fn elevation_at(&self, location: &Location) -> Result<f32, ElevationLookupFailed> {
        let (x, y) = coord::location_to_pixel(&self.tile, location).ok_or(
            ElevationLookupFailed::OutsideTile {
                tile: self.tile,
                lat: location.latitude,
                lng: location.longitude,
            },
        )?;

        let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
        if a == 0 {
            return Err(ElevationLookupFailed::Transparent { x, y });
        }

        Ok(self.encoding.decode(r, g, b) as f32)
    }

    /// Geographic box spanned by the outer pixel edges.
    pub fn extent(&self) -> TileExtent {
        let nw = self.pixel_to_location(0.0, 0.0);
        let se = self.pixel_to_location(TILE_SIZE as f64, TILE_SIZE as f64);

        TileExtent {
            min_lng: nw.longitude,
            min_lat: se.latitude,
            max_lng: se.longitude,
            max_lat: nw.latitude,
        }
    }
}
