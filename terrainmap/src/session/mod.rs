//! End-to-end run orchestration
//!
//! A [`Session`] ties the stages together for one view window:
//!
//! 1. plan the buffered tile grid and enforce the tile budget
//! 2. fetch and sample every tile on the [`FetchPool`]
//! 3. write one raster per successful tile
//! 4. write `manifest.json` describing the run
//!
//! Only planning, worker start-up and the manifest can fail the run. Tile
//! failures are logged and listed in the [`RunReport`].

mod report;
mod workdir;

pub use report::{FailedTile, ReportBounds, RunReport, WrittenTile};
pub use workdir::WorkDir;

use std::time::Instant;

use tracing::{info, warn};

use crate::error::TerrainError;
use crate::pool::{default_concurrency, FetchPool, ProgressCallback};
use crate::raster::{RasterError, RasterFormat, RasterWriter};
use crate::source::TileSource;
use crate::tile::{TileFailure, TileProcessor};
use crate::view::{self, TileGrid, ViewWindow, DEFAULT_MAX_TILES};

/// Name of the run summary written into the working directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Knobs for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Upper bound on tiles per run, checked before any fetch.
    pub max_tiles: usize,
    /// Number of fetch workers.
    pub concurrency: usize,
    pub format: RasterFormat,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_tiles: DEFAULT_MAX_TILES,
            concurrency: default_concurrency(),
            format: RasterFormat::default(),
        }
    }
}

/// Fetches a view window into per-tile rasters.
pub struct Session {
    config: SessionConfig,
    source: Box<dyn TileSource>,
    pool: FetchPool,
    processor: TileProcessor,
    writer: RasterWriter,
}

impl Session {
    pub fn new(config: SessionConfig, source: Box<dyn TileSource>) -> Self {
        let pool = FetchPool::new(config.concurrency);
        let writer = RasterWriter::for_format(config.format);
        Self {
            config,
            source,
            pool,
            processor: TileProcessor::new(),
            writer,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Pre-flight only: the grid a run would fetch.
    pub fn plan(&self, window: &ViewWindow) -> Result<TileGrid, TerrainError> {
        Ok(view::plan(window, self.config.max_tiles)?)
    }

    /// Runs the full pipeline and writes `manifest.json`.
    pub fn run(
        &self,
        window: &ViewWindow,
        workdir: &WorkDir,
        progress: Option<&ProgressCallback>,
    ) -> Result<RunReport, TerrainError> {
        let started = Instant::now();

        let grid = self.plan(window)?;
        info!(
            tiles = grid.len(),
            zoom = grid.zoom(),
            x_range = ?grid.x_range(),
            y_range = ?grid.y_range(),
            "Planned tile grid"
        );

        let tiles = grid.tiles();
        let results = self
            .pool
            .run(&tiles, self.source.as_ref(), &self.processor, progress)?;

        let mut report = RunReport::new(
            self.source.name(),
            window,
            &grid,
            self.config.format.as_str(),
        );

        for result in &results {
            let data = match &result.outcome {
                Ok(data) => data,
                Err(failure) => {
                    report.record_failure(result.tile, failure);
                    continue;
                }
            };

            match self.writer.write(result, workdir) {
                Ok(path) => {
                    report.record_written(result.tile, &path, workdir, data.grid.nodata_count())
                }
                Err(e) => {
                    warn!(tile = %result.tile, error = %e, "Failed to write raster");
                    report.record_failure(result.tile, &write_failure(e));
                }
            }
        }

        report.set_elapsed(started.elapsed());
        let manifest = report.write_manifest(workdir)?;

        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            elapsed_ms = report.elapsed_ms,
            manifest = %manifest.display(),
            "Run complete"
        );

        Ok(report)
    }
}

/// Per-tile failure for a raster that could not be written. The tile is
/// already recorded alongside the failure, so only the cause is kept.
fn write_failure(error: RasterError) -> TileFailure {
    match error {
        RasterError::EncodeFailed { reason, .. } => TileFailure::EncodeFailed(reason),
        other => TileFailure::EncodeFailed(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ElevationEncoding, SourceError};
    use crate::tile::testing::{terrain_png, StaticSource};
    use crate::view::ViewError;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    fn window() -> ViewWindow {
        // Inside a single z10 tile, so the buffered grid is 3×3
        ViewWindow::new(46.50, 46.53, 8.50, 8.55, 10).unwrap()
    }

    fn source() -> StaticSource {
        let png = terrain_png(ElevationEncoding::TerrainRgb, |_, _| Some(1500.0));
        StaticSource::new(png, ElevationEncoding::TerrainRgb)
    }

    fn config() -> SessionConfig {
        SessionConfig {
            concurrency: 4,
            ..SessionConfig::default()
        }
    }

    #[test]
    fn test_run_writes_rasters_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let workdir = WorkDir::create(dir.path()).unwrap();

        let session = Session::new(config(), Box::new(source()));
        let report = session.run(&window(), &workdir, None).unwrap();

        assert_eq!(report.tiles_requested, 9);
        assert_eq!(report.succeeded(), 9);
        assert_eq!(report.failed(), 0);
        for written in &report.written {
            assert!(dir.path().join(&written.path).exists());
        }
        assert!(dir.path().join(MANIFEST_FILE).exists());
    }

    #[test]
    fn test_run_records_tile_failures() {
        let dir = tempfile::tempdir().unwrap();
        let workdir = WorkDir::create(dir.path()).unwrap();

        let grid = view::plan(&window(), DEFAULT_MAX_TILES).unwrap();
        let broken = grid.tiles()[4];
        let source = source().fail_on(broken, SourceError::NotFound);

        let report = Session::new(config(), Box::new(source))
            .run(&window(), &workdir, None)
            .unwrap();

        assert_eq!(report.succeeded(), 8);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].tile, broken);
        assert_eq!(report.failures[0].kind, "not_found");
        assert!(!workdir.tile_path(&broken, "tif").exists());
    }

    #[test]
    fn test_too_many_tiles_fails_before_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let workdir = WorkDir::create(dir.path()).unwrap();
        let source = Arc::new(source());

        struct Shared(Arc<StaticSource>);
        impl TileSource for Shared {
            fn fetch(&self, tile: &crate::coord::TileCoord) -> Result<Vec<u8>, SourceError> {
                self.0.fetch(tile)
            }
            fn name(&self) -> &str {
                self.0.name()
            }
            fn encoding(&self) -> ElevationEncoding {
                self.0.encoding()
            }
        }

        let session = Session::new(
            SessionConfig {
                max_tiles: 4,
                ..config()
            },
            Box::new(Shared(Arc::clone(&source))),
        );

        let err = session.run(&window(), &workdir, None).unwrap_err();
        assert!(matches!(
            err,
            TerrainError::View(ViewError::TooManyTiles { count: 9, max: 4 })
        ));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert!(!workdir.manifest_path().exists());
    }

    #[test]
    fn test_total_failure_still_writes_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let workdir = WorkDir::create(dir.path()).unwrap();

        let report = Session::new(config(), Box::new(StaticSource::failing(SourceError::RateLimited)))
            .run(&window(), &workdir, None)
            .unwrap();

        assert!(report.is_total_failure());
        assert_eq!(report.failed(), 9);
        assert!(workdir.manifest_path().exists());
    }

    #[test]
    fn test_xyz_format() {
        let dir = tempfile::tempdir().unwrap();
        let workdir = WorkDir::create(dir.path()).unwrap();

        let config = SessionConfig {
            format: RasterFormat::Xyz,
            ..config()
        };
        let report = Session::new(config, Box::new(source()))
            .run(&window(), &workdir, None)
            .unwrap();

        assert_eq!(report.format, "xyz");
        assert!(report
            .written
            .iter()
            .all(|w| w.path.extension().unwrap() == "xyz"));
    }

    #[test]
    fn test_unwritable_tile_records_only_the_cause() {
        let dir = tempfile::tempdir().unwrap();
        let workdir = WorkDir::create(dir.path()).unwrap();

        let grid = view::plan(&window(), DEFAULT_MAX_TILES).unwrap();
        let blocked = grid.tiles()[0];
        // A directory in the way makes the raster file impossible to create
        std::fs::create_dir(workdir.tile_path(&blocked, "tif")).unwrap();

        let report = Session::new(config(), Box::new(source()))
            .run(&window(), &workdir, None)
            .unwrap();

        assert_eq!(report.succeeded(), 8);
        let failure = &report.failures[0];
        assert_eq!(failure.tile, blocked);
        assert_eq!(failure.kind, "encode_failed");
        assert!(!failure.reason.contains("Failed to write tile"));
        assert!(!failure.reason.contains(&blocked.to_string()));
    }
}
