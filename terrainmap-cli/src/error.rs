//! CLI error type.

use std::fmt;

use terrainmap::config::ConfigError;
use terrainmap::view::ViewError;
use terrainmap::TerrainError;

/// Errors that end a CLI command with a non-zero exit code.
#[derive(Debug)]
pub enum CliError {
    /// Invalid or incomplete configuration.
    Config(String),

    /// The view window arguments are invalid.
    InvalidWindow(ViewError),

    /// A run failed before producing a report.
    Run(TerrainError),

    /// The run finished but no tile was written.
    NoTilesWritten { requested: usize },

    /// Logging could not be initialised.
    Logging(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::InvalidWindow(e) => write!(f, "Invalid view window: {}", e),
            CliError::Run(e) => write!(f, "{}", e),
            CliError::NoTilesWritten { requested } => {
                write!(f, "None of the {} requested tiles could be written", requested)
            }
            CliError::Logging(msg) => write!(f, "Failed to initialise logging: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::InvalidWindow(e) => Some(e),
            CliError::Run(e) => Some(e),
            CliError::Config(_) | CliError::NoTilesWritten { .. } | CliError::Logging(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<ViewError> for CliError {
    fn from(e: ViewError) -> Self {
        match e {
            ViewError::TooManyTiles { .. } => CliError::Run(TerrainError::View(e)),
            other => CliError::InvalidWindow(other),
        }
    }
}

impl From<TerrainError> for CliError {
    fn from(e: TerrainError) -> Self {
        match e {
            TerrainError::Config(e) => CliError::from(e),
            other => CliError::Run(other),
        }
    }
}
