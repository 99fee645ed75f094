//! Mapbox Terrain-RGB tile source.
//!
//! # URL Pattern
//!
//! `https://api.mapbox.com/v4/mapbox.terrain-rgb/{z}/{x}/{y}.pngraw?access_token={token}`
//!
//! - Standard XYZ tile coordinates
//! - Requires a Mapbox access token
//! - `.pngraw` is a lossless PNG, so the packed elevation survives intact
//! - 256×256 tiles up to zoom 15

use crate::coord::TileCoord;
use crate::source::{ElevationEncoding, HttpClient, SourceError, TileSource};

/// Base URL for the Terrain-RGB tileset.
const MAPBOX_TERRAIN_URL: &str = "https://api.mapbox.com/v4/mapbox.terrain-rgb";

/// Mapbox Terrain-RGB elevation tiles.
///
/// # Example
///
/// ```no_run
/// use terrainmap::source::{MapboxTerrainSource, ReqwestClient, TileSource};
/// use terrainmap::coord::TileCoord;
///
/// let client = ReqwestClient::new().unwrap();
/// let source = MapboxTerrainSource::new(client, "pk.YOUR_TOKEN").unwrap();
/// let png = source.fetch(&TileCoord::new(163, 395, 10)).unwrap();
/// ```
pub struct MapboxTerrainSource<C: HttpClient> {
    http_client: C,
    access_token: String,
}

impl<C: HttpClient> MapboxTerrainSource<C> {
    /// Creates a new Mapbox source.
    ///
    /// # Errors
    ///
    /// [`SourceError::Config`] if the access token is empty.
    pub fn new(http_client: C, access_token: impl Into<String>) -> Result<Self, SourceError> {
        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Err(SourceError::Config(
                "Mapbox requires an access token. Set access_token in config.ini or use --token"
                    .to_string(),
            ));
        }

        Ok(Self {
            http_client,
            access_token,
        })
    }

    fn build_url(&self, tile: &TileCoord) -> String {
        format!(
            "{}/{}/{}/{}.pngraw?access_token={}",
            MAPBOX_TERRAIN_URL, tile.zoom, tile.x, tile.y, self.access_token
        )
    }
}

impl<C: HttpClient> TileSource for MapboxTerrainSource<C> {
    fn fetch(&self, tile: &TileCoord) -> Result<Vec<u8>, SourceError> {
        if !self.supports_zoom(tile.zoom) {
            return Err(SourceError::FetchFailed(format!(
                "zoom {} not served by {}",
                tile.zoom,
                self.name()
            )));
        }

        self.http_client.get(&self.build_url(tile))
    }

    fn name(&self) -> &str {
        "Mapbox Terrain-RGB"
    }

    fn encoding(&self) -> ElevationEncoding {
        ElevationEncoding::TerrainRgb
    }
}
