//! Per-tile raster persistence.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::session::WorkDir;
use crate::tile::FetchResult;

use super::{GeoTiffEncoder, RasterError, RasterFormat, RasterTile, XyzEncoder};

/// Serialises a [`RasterTile`] to a file.
pub trait RasterEncoder: Send + Sync {
    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    fn encode(&self, path: &Path, raster: &RasterTile) -> Result<(), RasterError>;
}

/// Writes successful fetch results into a working directory as
/// `{z}_{x}_{y}.{ext}`.
pub struct RasterWriter {
    encoder: Box<dyn RasterEncoder>,
}

impl RasterWriter {
    pub fn new(encoder: Box<dyn RasterEncoder>) -> Self {
        Self { encoder }
    }

    pub fn for_format(format: RasterFormat) -> Self {
        match format {
            RasterFormat::GeoTiff => Self::new(Box::new(GeoTiffEncoder::new())),
            RasterFormat::Xyz => Self::new(Box::new(XyzEncoder::new())),
        }
    }

    pub fn extension(&self) -> &'static str {
        self.encoder.extension()
    }

    /// Writes one tile and returns the created path.
    ///
    /// # Errors
    ///
    /// [`RasterError::EncodeFailed`] if the result carries a failure or the
    /// encoder fails. Only this tile is affected.
    pub fn write(&self, result: &FetchResult, workdir: &WorkDir) -> Result<PathBuf, RasterError> {
        let tile = result.tile;
        let data = result.outcome.as_ref().map_err(|failure| RasterError::EncodeFailed {
            tile,
            reason: format!("no data to write ({})", failure),
        })?;

        let path = workdir.tile_path(&tile, self.extension());
        let raster = RasterTile::from_tile_data(data);

        self.encoder
            .encode(&path, &raster)
            .map_err(|e| RasterError::EncodeFailed {
                tile,
                reason: e.to_string(),
            })?;

        debug!(tile = %tile, path = %path.display(), "Raster written");
        Ok(path)
    }
}

impl Default for RasterWriter {
    fn default() -> Self {
        Self::for_format(RasterFormat::default())
    }
}
