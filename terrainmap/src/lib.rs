//! terrainmap - Terrain elevation tiles to georeferenced rasters
//!
//! Fetches slippy-map terrain tiles (Mapbox Terrain-RGB or AWS Terrarium)
//! covering a geographic view window, decodes every pixel to an elevation in
//! metres and writes one georeferenced raster per tile into a working
//! directory, together with a `manifest.json` for downstream mosaicking.
//!
//! # Pipeline
//!
//! ```text
//! ViewWindow ─► view::plan ─► FetchPool ─► TileProcessor ─► RasterWriter
//!                (budget)     (workers)    (decode+sample)   (GeoTIFF/XYZ)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use terrainmap::session::{Session, SessionConfig, WorkDir};
//! use terrainmap::source::{create_source, SourceConfig};
//! use terrainmap::view::ViewWindow;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = create_source(&SourceConfig::Terrarium, 30)?;
//! let session = Session::new(SessionConfig::default(), source);
//!
//! let window = ViewWindow::new(46.50, 46.60, 7.90, 8.05, 12)?;
//! let workdir = WorkDir::create("terrain-tiles")?;
//! let report = session.run(&window, &workdir, None)?;
//! println!("{} tiles written", report.succeeded());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod coord;
pub mod error;
pub mod logging;
pub mod pool;
pub mod raster;
pub mod session;
pub mod source;
pub mod tile;
pub mod view;

pub use error::{Result, TerrainError};

/// Crate version, used in the HTTP user agent.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
