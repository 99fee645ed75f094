//! Crate-level error type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::coord::CoordError;
use crate::pool::PoolError;
use crate::raster::RasterError;
use crate::source::SourceError;
use crate::view::ViewError;

/// Errors that abort a run.
///
/// Per-tile problems never surface here; they are recorded in the
/// [`RunReport`](crate::session::RunReport).
#[derive(Debug, Error)]
pub enum TerrainError {
    #[error(transparent)]
    Coord(#[from] CoordError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error("Failed to prepare working directory {}: {source}", .path.display())]
    WorkDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid manifest: {0}")]
    ManifestFormat(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TerrainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_errors_pass_through() {
        let err: TerrainError = ViewError::TooManyTiles { count: 120, max: 100 }.into();
        assert!(err.to_string().contains("120 > 100"));
    }

    #[test]
    fn test_manifest_error_names_path() {
        let err = TerrainError::Manifest {
            path: PathBuf::from("/out/manifest.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to write manifest /out/manifest.json: denied"
        );
    }
}
