//! Run summary and `manifest.json`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coord::TileCoord;
use crate::error::TerrainError;
use crate::tile::TileFailure;
use crate::view::{TileGrid, ViewWindow};

use super::WorkDir;

/// Requested view, echoed into the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl From<&ViewWindow> for ReportBounds {
    fn from(window: &ViewWindow) -> Self {
        Self {
            min_lat: window.min_lat(),
            max_lat: window.max_lat(),
            min_lng: window.min_lng(),
            max_lng: window.max_lng(),
        }
    }
}

/// A raster that made it to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrittenTile {
    pub tile: TileCoord,
    /// Relative to the working directory.
    pub path: PathBuf,
    pub nodata_pixels: usize,
}

/// A tile that is missing from the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedTile {
    pub tile: TileCoord,
    pub kind: String,
    pub reason: String,
}

/// Summary of one run, serialised as `manifest.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub zoom: u8,
    pub bounds: ReportBounds,
    pub format: String,
    pub tiles_requested: usize,
    pub written: Vec<WrittenTile>,
    pub failures: Vec<FailedTile>,
    pub elapsed_ms: u64,
}

impl RunReport {
    pub fn new(source: &str, window: &ViewWindow, grid: &TileGrid, format: &str) -> Self {
        Self {
            source: source.to_string(),
            created_at: Utc::now(),
            zoom: grid.zoom(),
            bounds: ReportBounds::from(window),
            format: format.to_string(),
            tiles_requested: grid.len(),
            written: Vec::new(),
            failures: Vec::new(),
            elapsed_ms: 0,
        }
    }

    pub fn record_written(&mut self, tile: TileCoord, path: &Path, workdir: &WorkDir, nodata_pixels: usize) {
        let relative = path.strip_prefix(workdir.path()).unwrap_or(path);
        self.written.push(WrittenTile {
            tile,
            path: relative.to_path_buf(),
            nodata_pixels,
        });
    }

    pub fn record_failure(&mut self, tile: TileCoord, failure: &TileFailure) {
        self.failures.push(FailedTile {
            tile,
            kind: failure.kind().to_string(),
            reason: failure.to_string(),
        });
    }

    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed_ms = elapsed.as_millis() as u64;
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }

    pub fn succeeded(&self) -> usize {
        self.written.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// True when tiles were requested but none was written.
    pub fn is_total_failure(&self) -> bool {
        self.tiles_requested > 0 && self.written.is_empty()
    }

    /// Writes `manifest.json` into the working directory.
    pub fn write_manifest(&self, workdir: &WorkDir) -> Result<PathBuf, TerrainError> {
        let path = workdir.manifest_path();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).map_err(|source| TerrainError::Manifest {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Reads a manifest written by [`write_manifest`](Self::write_manifest).
    pub fn load_manifest(path: &Path) -> Result<Self, TerrainError> {
        let json = fs::read_to_string(path).map_err(|source| TerrainError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}
