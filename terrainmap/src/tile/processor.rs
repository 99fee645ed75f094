//! Fetch-decode-sample pipeline for a single tile.

use thiserror::Error;
use tracing::{debug, trace};

use crate::coord::{TileCoord, TILE_SIZE};
use crate::source::{SourceError, TileSource};

use super::{ElevationGrid, ElevationSample, TerrainImage, TileExtent, NO_DATA_ELEVATION};

/// Reasons a whole tile is missing from the output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileFailure {
    #[error("Tile not found on server")]
    NotFound,

    #[error("Rate limited by tile server")]
    RateLimited,

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Decode failed: {0}")]
    Decode(String),

    #[error("Encode failed: {0}")]
    EncodeFailed(String),
}

impl TileFailure {
    /// Stable identifier used in the run manifest.
    pub fn kind(&self) -> &'static str {
        match self {
            TileFailure::NotFound => "not_found",
            TileFailure::RateLimited => "rate_limited",
            TileFailure::FetchFailed(_) => "fetch_failed",
            TileFailure::Decode(_) => "decode",
            TileFailure::EncodeFailed(_) => "encode_failed",
        }
    }
}

impl From<SourceError> for TileFailure {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::NotFound => TileFailure::NotFound,
            SourceError::RateLimited => TileFailure::RateLimited,
            SourceError::FetchFailed(msg) | SourceError::Config(msg) => TileFailure::FetchFailed(msg),
        }
    }
}

/// Sampled elevations for one tile plus the box they cover.
#[derive(Debug, Clone, PartialEq)]
pub struct TileData {
    pub grid: ElevationGrid,
    pub extent: TileExtent,
}

/// Outcome of processing one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult {
    pub tile: TileCoord,
    pub outcome: Result<TileData, TileFailure>,
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn data(&self) -> Option<&TileData> {
        self.outcome.as_ref().ok()
    }

    pub fn failure(&self) -> Option<&TileFailure> {
        self.outcome.as_ref().err()
    }
}

/// Turns a tile address into a sampled elevation grid.
///
/// Stateless; one instance is shared by every fetch worker.
#[derive(Debug, Clone, Copy, Default)]
pub struct TileProcessor;

impl TileProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Fetches, decodes and samples one tile.
    ///
    /// Never panics on bad input: every failure is captured in the returned
    /// [`FetchResult`].
    pub fn process(&self, tile: TileCoord, source: &dyn TileSource) -> FetchResult {
        debug!(tile = %tile, source = source.name(), "Fetching tile");

        let outcome = source
            .fetch(&tile)
            .map_err(TileFailure::from)
            .and_then(|bytes| TerrainImage::decode(tile, &bytes, source.encoding()))
            .map(|image| self.sample(&image));

        if let Ok(data) = &outcome {
            debug!(
                tile = %tile,
                nodata = data.grid.nodata_count(),
                range = ?data.grid.elevation_range(),
                "Tile processed"
            );
        }

        FetchResult { tile, outcome }
    }

    /// Samples every pixel centre of a decoded tile, row by row.
    pub fn sample(&self, image: &TerrainImage) -> TileData {
        let grid = ElevationGrid::from_fn(TILE_SIZE, TILE_SIZE, |x, y| {
            let location = image.pixel_to_location(x as f64 + 0.5, y as f64 + 0.5);
            let elevation = match image.elevation_at(&location) {
                Ok(elevation) => elevation,
                Err(e) => {
                    trace!(tile = %image.tile(), error = %e, "No elevation for pixel");
                    NO_DATA_ELEVATION
                }
            };
            ElevationSample {
                longitude: location.longitude,
                latitude: location.latitude,
                elevation,
            }
        });

        TileData {
            grid,
            extent: image.extent(),
        }
    }
}
