//! Argument types and resolution shared across CLI commands.

use std::path::Path;

use clap::{Args, ValueEnum};
use terrainmap::config::{config_file_path, ConfigFile};
use terrainmap::raster::RasterFormat;
use terrainmap::source::{SourceConfig, SourceKind};
use terrainmap::view::ViewWindow;
use tracing::warn;

use crate::error::CliError;

/// Default zoom when `--zoom` is not given.
pub const DEFAULT_ZOOM: u8 = 10;

/// Tile source selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ProviderType {
    /// Mapbox Terrain-RGB (requires an access token)
    Mapbox,
    /// AWS Open Data Terrarium (no token required)
    Terrarium,
}

impl From<ProviderType> for SourceKind {
    fn from(provider: ProviderType) -> Self {
        match provider {
            ProviderType::Mapbox => SourceKind::Mapbox,
            ProviderType::Terrarium => SourceKind::Terrarium,
        }
    }
}

/// Output format selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum FormatType {
    /// Single-band 32-bit float GeoTIFF
    Geotiff,
    /// ASCII x,y,z grid
    Xyz,
}

impl From<FormatType> for RasterFormat {
    fn from(format: FormatType) -> Self {
        match format {
            FormatType::Geotiff => RasterFormat::GeoTiff,
            FormatType::Xyz => RasterFormat::Xyz,
        }
    }
}

/// Geographic view window.
#[derive(Debug, Clone, Args)]
pub struct WindowArgs {
    /// Southern edge (degrees)
    #[arg(long, allow_negative_numbers = true)]
    pub min_lat: f64,

    /// Northern edge (degrees)
    #[arg(long, allow_negative_numbers = true)]
    pub max_lat: f64,

    /// Western edge (degrees)
    #[arg(long, allow_negative_numbers = true)]
    pub min_lng: f64,

    /// Eastern edge (degrees)
    #[arg(long, allow_negative_numbers = true)]
    pub max_lng: f64,

    /// Zoom level (1-15)
    #[arg(short, long, default_value_t = DEFAULT_ZOOM,
          value_parser = clap::value_parser!(u8).range(1..=15))]
    pub zoom: u8,
}

impl WindowArgs {
    pub fn to_window(&self) -> Result<ViewWindow, CliError> {
        Ok(ViewWindow::new(
            self.min_lat,
            self.max_lat,
            self.min_lng,
            self.max_lng,
            self.zoom,
        )?)
    }
}

/// Loads the config file, falling back to defaults with a warning when it
/// cannot be read. Every setting can still be given on the command line.
pub fn load_config() -> ConfigFile {
    load_config_from(&config_file_path())
}

pub fn load_config_from(path: &Path) -> ConfigFile {
    ConfigFile::load_from(path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Ignoring unreadable config file, using defaults");
        ConfigFile::default()
    })
}

/// Resolve the tile source from CLI args and config. CLI takes precedence.
pub fn resolve_source(
    cli_provider: Option<ProviderType>,
    cli_token: Option<String>,
    config: &ConfigFile,
) -> Result<SourceConfig, CliError> {
    let kind = cli_provider
        .map(SourceKind::from)
        .unwrap_or(config.source.provider);
    let token = cli_token.or_else(|| config.source.access_token.clone());

    kind.into_config(token)
        .map_err(|e| CliError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_args(min_lat: f64, max_lat: f64) -> WindowArgs {
        WindowArgs {
            min_lat,
            max_lat,
            min_lng: 7.0,
            max_lng: 7.1,
            zoom: 12,
        }
    }

    #[test]
    fn test_cli_provider_overrides_config() {
        let mut config = ConfigFile::default();
        config.source.access_token = Some("pk.config".to_string());

        let source = resolve_source(Some(ProviderType::Terrarium), None, &config).unwrap();
        assert_eq!(source, SourceConfig::Terrarium);

        let source = resolve_source(None, Some("pk.cli".to_string()), &config).unwrap();
        assert_eq!(source, SourceConfig::mapbox("pk.cli"));

        let source = resolve_source(None, None, &config).unwrap();
        assert_eq!(source, SourceConfig::mapbox("pk.config"));
    }

    #[test]
    fn test_mapbox_without_token_is_config_error() {
        let err = resolve_source(Some(ProviderType::Mapbox), None, &ConfigFile::default())
            .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_malformed_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[fetch]\nmax_tiles = abc\n").unwrap();

        assert!(ConfigFile::load_from(&path).is_err());
        assert_eq!(load_config_from(&path), ConfigFile::default());
    }

    #[test]
    fn test_valid_config_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[fetch]\nmax_tiles = 40\n").unwrap();

        assert_eq!(load_config_from(&path).fetch.max_tiles, 40);
    }

    #[test]
    fn test_window_validation() {
        assert!(window_args(46.0, 46.1).to_window().is_ok());
        assert!(matches!(
            window_args(46.1, 46.0).to_window(),
            Err(CliError::InvalidWindow(_))
        ));
        assert!(matches!(
            window_args(86.0, 87.0).to_window(),
            Err(CliError::InvalidWindow(_))
        ));
    }
}
