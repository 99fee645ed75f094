//! User configuration
//!
//! Settings live in an INI file at `<config dir>/terrainmap/config.ini`
//! (`~/.config/terrainmap/config.ini` on Linux):
//!
//! ```ini
//! [source]
//! provider = mapbox
//! access_token = pk.…
//! timeout = 30
//!
//! [fetch]
//! concurrency =
//! max_tiles = 100
//!
//! [output]
//! directory = terrain-tiles
//! format = geotiff
//! ```
//!
//! Command-line arguments take precedence over file values.

mod file;
mod keys;

pub use file::{ConfigFile, FetchSettings, OutputSettings, SourceSettings, DEFAULT_OUTPUT_DIR};
pub use keys::ConfigKey;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::source::SourceError;

/// Errors reading, writing or interpreting the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("Failed to write config file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Directory holding `config.ini`.
pub fn config_directory() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("terrainmap")
}

/// Full path of `config.ini`.
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
