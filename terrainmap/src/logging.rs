//! Tracing subscriber setup.
//!
//! Console output goes to stderr so it never mixes with command output.
//! An optional log file receives the same events without ANSI colours,
//! written from a background thread.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "terrainmap=info";

/// Filter used for `--verbose`.
pub const VERBOSE_FILTER: &str = "terrainmap=debug";

/// Logging options.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Raise the default level to debug. `RUST_LOG` still wins.
    pub verbose: bool,
    /// Also append to this file.
    pub file: Option<PathBuf>,
}

/// Installs the global subscriber.
///
/// Returns the file writer's guard, which must be held until exit so
/// buffered lines are flushed.
pub fn init_logging(config: &LoggingConfig) -> io::Result<Option<WorkerGuard>> {
    let default = if config.verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    };
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let console = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(filter());

    let (file_layer, guard) = match &config.file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            fs::create_dir_all(&directory)?;

            let file_name = path
                .file_name()
                .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "log path has no file name"))?;

            let appender = tracing_appender::rolling::never(&directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_thread_names(true)
                .with_filter(filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_quiet() {
        let config = LoggingConfig::default();
        assert!(!config.verbose);
        assert!(config.file.is_none());
    }

    #[test]
    fn test_filters_parse() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
        assert!(EnvFilter::try_new(VERBOSE_FILTER).is_ok());
    }
}
