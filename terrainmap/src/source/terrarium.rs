//! AWS Open Data Terrarium tile source.
//!
//! `https://s3.amazonaws.com/elevation-tiles-prod/terrarium/{z}/{x}/{y}.png`
//!
//! Global coverage, no authentication. Same slippy-map numbering as Mapbox but
//! a different RGB packing (see [`ElevationEncoding::Terrarium`]).

use crate::coord::TileCoord;
use crate::source::{ElevationEncoding, HttpClient, SourceError, TileSource};

const TERRARIUM_URL: &str = "https://s3.amazonaws.com/elevation-tiles-prod/terrarium";

/// Terrarium PNG elevation tiles.
pub struct TerrariumSource<C: HttpClient> {
    http_client: C,
}

impl<C: HttpClient> TerrariumSource<C> {
    pub fn new(http_client: C) -> Self {
        Self { http_client }
    }

    fn build_url(&self, tile: &TileCoord) -> String {
        format!("{}/{}/{}/{}.png", TERRARIUM_URL, tile.zoom, tile.x, tile.y)
    }
}

impl<C: HttpClient> TileSource for TerrariumSource<C> {
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
        "AWS Terrarium"
    }

    fn encoding(&self) -> ElevationEncoding {
        ElevationEncoding::Terrarium
    }
}
