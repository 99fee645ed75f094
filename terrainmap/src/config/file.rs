//! `config.ini` model and persistence.

use std::fs;
use std::path::{Path, PathBuf};

use ini::Ini;
use tracing::debug;

use crate::pool::default_concurrency;
use crate::raster::RasterFormat;
use crate::session::SessionConfig;
use crate::source::{SourceConfig, SourceKind, DEFAULT_TIMEOUT_SECS};
use crate::view::DEFAULT_MAX_TILES;

use super::{config_file_path, ConfigError, ConfigKey};

/// Default output directory, relative to the current directory.
pub const DEFAULT_OUTPUT_DIR: &str = "terrain-tiles";

/// `[source]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSettings {
    pub provider: SourceKind,
    pub access_token: Option<String>,
    /// HTTP timeout in seconds.
    pub timeout: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            provider: SourceKind::default(),
            access_token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `[fetch]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    /// Worker count; `None` means twice the available parallelism.
    pub concurrency: Option<usize>,
    pub max_tiles: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            concurrency: None,
            max_tiles: DEFAULT_MAX_TILES,
        }
    }
}

/// `[output]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    pub directory: PathBuf,
    pub format: RasterFormat,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: RasterFormat::default(),
        }
    }
}

/// Contents of `config.ini`. Missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigFile {
    pub source: SourceSettings,
    pub fetch: FetchSettings,
    pub output: OutputSettings,
}

impl ConfigFile {
    /// Loads from the default location, or returns defaults if the file
    /// does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut config = Self::default();
        for key in ConfigKey::all() {
            if let Some(value) = ini.get_from(Some(key.section()), key.key_name()) {
                key.set(&mut config, value)?;
            }
        }

        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Writes to the default location, creating its directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            ini.with_section(Some(key.section()))
                .set(key.key_name(), key.get(self));
        }

        ini.write_to_file(path).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Source selection with the configured token.
    pub fn source_config(&self) -> Result<SourceConfig, ConfigError> {
        Ok(self
            .source
            .provider
            .into_config(self.source.access_token.clone())?)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            max_tiles: self.fetch.max_tiles,
            concurrency: self.fetch.concurrency.unwrap_or_else(default_concurrency),
            format: self.output.format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigFile::load_from(&dir.path().join("absent.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.fetch.max_tiles, 100);
        assert_eq!(config.output.directory, PathBuf::from("terrain-tiles"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.source.provider = SourceKind::Terrarium;
        config.source.timeout = 10;
        config.fetch.concurrency = Some(3);
        config.fetch.max_tiles = 49;
        config.output.format = RasterFormat::Xyz;
        config.output.directory = PathBuf::from("/data/dem");

        config.save_to(&path).unwrap();
        assert_eq!(ConfigFile::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "[source]\nprovider = mapbox\naccess_token = pk.test\n").unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.source.access_token.as_deref(), Some("pk.test"));
        assert_eq!(config.fetch, FetchSettings::default());
        assert_eq!(config.source_config().unwrap(), SourceConfig::mapbox("pk.test"));
    }

    #[test]
    fn test_invalid_value_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "[fetch]\nmax_tiles = many\n").unwrap();

        let err = ConfigFile::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("fetch.max_tiles"));
    }

    #[test]
    fn test_mapbox_without_token() {
        let config = ConfigFile::default();
        assert!(matches!(
            config.source_config(),
            Err(ConfigError::Source(_))
        ));
    }

    #[test]
    fn test_session_config() {
        let mut config = ConfigFile::default();
        config.fetch.concurrency = Some(5);
        config.fetch.max_tiles = 20;

        let session = config.session_config();
        assert_eq!(session.concurrency, 5);
        assert_eq!(session.max_tiles, 20);
        assert_eq!(session.format, RasterFormat::GeoTiff);
    }
}
