//! Terrain tile source abstraction
//!
//! A [`TileSource`] supplies the raw, encoded image for one tile address. The
//! rest of the crate treats it as an opaque capability: the fetch pool shares
//! one source by reference across all workers.
//!
//! Concrete sources sit on top of an injectable [`HttpClient`] so they can be
//! tested against a mock:
//!
//! ```ignore
//! use terrainmap::source::{create_source, SourceConfig};
//!
//! let source = create_source(&SourceConfig::mapbox("pk.…"), 30)?;
//! let png = source.fetch(&tile)?;
//! ```

mod factory;
mod http;
mod mapbox;
mod terrarium;
mod types;

pub use factory::{create_source, SourceConfig, SourceKind};
pub use http::{HttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use mapbox::MapboxTerrainSource;
pub use terrarium::TerrariumSource;
pub use types::{ElevationEncoding, SourceError, TileSource};

#[cfg(test)]
pub use http::tests::MockHttpClient;
