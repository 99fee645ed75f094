//! Georeferenced raster output
//!
//! Each processed tile becomes one single-band raster in EPSG:4326. The
//! geotransform is derived from the tile's pixel-grid extent:
//!
//! ```text
//! [min_lng, Δlng/256, 0, max_lat, 0, −Δlat/256]
//! ```
//!
//! Two encoders are provided:
//!
//! | Format  | Encoder            | Extension |
//! |---------|--------------------|-----------|
//! | GeoTIFF | [`GeoTiffEncoder`] | `.tif`    |
//! | XYZ     | [`XyzEncoder`]     | `.xyz`    |

mod geotiff;
mod geotransform;
mod tile;
mod writer;
mod xyz;

pub use geotiff::GeoTiffEncoder;
pub use geotransform::{Geotransform, SpatialRef};
pub use tile::RasterTile;
pub use writer::{RasterEncoder, RasterWriter};
pub use xyz::XyzEncoder;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::coord::TileCoord;

/// Errors from building or encoding rasters.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF encoding error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("Invalid raster: {0}")]
    InvalidRaster(String),

    /// Writing one tile failed; other tiles are unaffected.
    #[error("Failed to write tile {tile}: {reason}")]
    EncodeFailed { tile: TileCoord, reason: String },

    #[error("Unknown output format '{0}' (expected geotiff or xyz)")]
    UnknownFormat(String),
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterFormat {
    #[default]
    GeoTiff,
    Xyz,
}

impl RasterFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            RasterFormat::GeoTiff => "geotiff",
            RasterFormat::Xyz => "xyz",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            RasterFormat::GeoTiff => "tif",
            RasterFormat::Xyz => "xyz",
        }
    }
}

impl fmt::Display for RasterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RasterFormat {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "geotiff" | "tiff" | "tif" => Ok(RasterFormat::GeoTiff),
            "xyz" => Ok(RasterFormat::Xyz),
            other => Err(RasterError::UnknownFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("GeoTIFF".parse::<RasterFormat>().unwrap(), RasterFormat::GeoTiff);
        assert_eq!("tif".parse::<RasterFormat>().unwrap(), RasterFormat::GeoTiff);
        assert_eq!("xyz".parse::<RasterFormat>().unwrap(), RasterFormat::Xyz);
        assert!(matches!(
            "png".parse::<RasterFormat>(),
            Err(RasterError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_extension_matches_encoder() {
        for format in [RasterFormat::GeoTiff, RasterFormat::Xyz] {
            assert_eq!(
                RasterWriter::for_format(format).extension(),
                format.extension()
            );
        }
    }
}
