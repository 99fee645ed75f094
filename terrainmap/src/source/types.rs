//! Tile source trait, errors and pixel encodings.

use thiserror::Error;

use crate::coord::{TileCoord, MAX_ZOOM, MIN_ZOOM};

/// Errors a tile source can report for a single tile.
///
/// None of these are fatal to a run: the fetch pool records them against the
/// tile and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The server has no tile at this address.
    #[error("Tile not found")]
    NotFound,

    /// The server asked us to slow down (HTTP 429).
    #[error("Rate limited by tile server")]
    RateLimited,

    /// Any other transport or server failure, including timeouts.
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// The source cannot be constructed (missing token, client build failure).
    #[error("Invalid tile source configuration: {0}")]
    Config(String),
}

/// How elevation is packed into the RGB channels of a tile image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevationEncoding {
    /// Mapbox Terrain-RGB: `-10000 + (R·65536 + G·256 + B) · 0.1` metres.
    TerrainRgb,
    /// Mapzen/AWS Terrarium: `R·256 + G + B/256 − 32768` metres.
    Terrarium,
}

impl ElevationEncoding {
    /// Decodes one pixel to metres.
    #[inline]
    pub fn decode(&self, r: u8, g: u8, b: u8) -> f64 {
        let (r, g, b) = (r as f64, g as f64, b as f64);
        match self {
            ElevationEncoding::TerrainRgb => -10000.0 + (r * 65536.0 + g * 256.0 + b) * 0.1,
            ElevationEncoding::Terrarium => r * 256.0 + g + b / 256.0 - 32768.0,
        }
    }

    /// Encodes metres into a pixel, the inverse of [`decode`](Self::decode)
    /// up to the encoding's resolution.
    pub fn encode(&self, elevation: f64) -> [u8; 3] {
        match self {
            ElevationEncoding::TerrainRgb => {
                let value = ((elevation + 10000.0) * 10.0).round().clamp(0.0, 16_777_215.0) as u32;
                [(value >> 16) as u8, (value >> 8) as u8, value as u8]
            }
            ElevationEncoding::Terrarium => {
                let shifted = (elevation + 32768.0).clamp(0.0, 65535.996);
                let whole = shifted.floor() as u32;
                let fraction = ((shifted - whole as f64) * 256.0).floor() as u32;
                [(whole >> 8) as u8, whole as u8, fraction.min(255) as u8]
            }
        }
    }
}

/// A remote supplier of raw terrain tiles.
///
/// Implementations are shared by reference across all fetch workers, so they
/// must be `Send + Sync` and must not mutate per-request state.
pub trait TileSource: Send + Sync {
    /// Fetches the encoded image bytes for one tile.
    fn fetch(&self, tile: &TileCoord) -> Result<Vec<u8>, SourceError>;

    /// Human-readable name for logs and the run manifest.
    fn name(&self) -> &str;

    /// Pixel encoding of the returned images.
    fn encoding(&self) -> ElevationEncoding;

    fn min_zoom(&self) -> u8 {
        MIN_ZOOM
    }

    fn max_zoom(&self) -> u8 {
        MAX_ZOOM
    }

    fn supports_zoom(&self, zoom: u8) -> bool {
        (self.min_zoom()..=self.max_zoom()).contains(&zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_rgb_decode_known_values() {
        let encoding = ElevationEncoding::TerrainRgb;
        // Sea level: 100000 = 0x01_86_A0
        assert!((encoding.decode(0x01, 0x86, 0xA0) - 0.0).abs() < 1e-9);
        assert!((encoding.decode(0, 0, 0) + 10000.0).abs() < 1e-9);
    }

    #[test]
    fn test_terrarium_decode_known_values() {
        let encoding = ElevationEncoding::Terrarium;
        assert_eq!(encoding.decode(128, 0, 0), 0.0);
        assert_eq!(encoding.decode(128, 1, 128), 1.5);
        assert_eq!(encoding.decode(0, 0, 0), -32768.0);
    }

    #[test]
    fn test_encode_inverts_decode() {
        for encoding in [ElevationEncoding::TerrainRgb, ElevationEncoding::Terrarium] {
            for elevation in [-412.3, 0.0, 1234.5, 8848.8] {
                let [r, g, b] = encoding.encode(elevation);
                let decoded = encoding.decode(r, g, b);
                assert!(
                    (decoded - elevation).abs() <= 0.1,
                    "{:?}: {} decoded as {}",
                    encoding,
                    elevation,
                    decoded
                );
            }
        }
    }

    #[test]
    fn test_source_error_display() {
        assert_eq!(SourceError::NotFound.to_string(), "Tile not found");
        assert_eq!(
            SourceError::FetchFailed("HTTP 500".to_string()).to_string(),
            "Fetch failed: HTTP 500"
        );
    }
}
