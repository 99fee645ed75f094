//! Output directory handle.

use std::fs;
use std::path::{Path, PathBuf};

use crate::coord::TileCoord;
use crate::error::TerrainError;

/// Directory that receives per-tile rasters and the run manifest.
///
/// Created once by the caller and passed by reference. Nothing is ever
/// deleted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDir {
    path: PathBuf,
}

impl WorkDir {
    /// Ensures `path` exists as a directory and wraps it.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, TerrainError> {
        let path = path.as_ref().to_path_buf();
        fs::create_dir_all(&path).map_err(|source| TerrainError::WorkDir {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `{z}_{x}_{y}.{extension}` inside the directory.
    pub fn tile_path(&self, tile: &TileCoord, extension: &str) -> PathBuf {
        self.path.join(format!("{}.{}", tile.file_stem(), extension))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path.join(super::MANIFEST_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let workdir = WorkDir::create(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(workdir.path(), nested);
    }

    #[test]
    fn test_create_over_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("occupied");
        std::fs::write(&file, b"x").unwrap();

        assert!(matches!(
            WorkDir::create(&file),
            Err(TerrainError::WorkDir { .. })
        ));
    }

    #[test]
    fn test_tile_path() {
        let dir = tempfile::tempdir().unwrap();
        let workdir = WorkDir::create(dir.path()).unwrap();

        assert_eq!(
            workdir.tile_path(&TileCoord::new(163, 395, 10), "tif"),
            dir.path().join("10_163_395.tif")
        );
        assert_eq!(workdir.manifest_path(), dir.path().join("manifest.json"));
    }
}
