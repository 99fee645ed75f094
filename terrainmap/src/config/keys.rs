//! Addressable configuration keys (`section.key`).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::{ConfigError, ConfigFile};

/// Every setting that can be read or written through `config get/set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    SourceProvider,
    SourceAccessToken,
    SourceTimeout,
    FetchConcurrency,
    FetchMaxTiles,
    OutputDirectory,
    OutputFormat,
}

impl ConfigKey {
    /// All keys in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::SourceProvider,
            ConfigKey::SourceAccessToken,
            ConfigKey::SourceTimeout,
            ConfigKey::FetchConcurrency,
            ConfigKey::FetchMaxTiles,
            ConfigKey::OutputDirectory,
            ConfigKey::OutputFormat,
        ]
    }

    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::SourceProvider | ConfigKey::SourceAccessToken | ConfigKey::SourceTimeout => {
                "source"
            }
            ConfigKey::FetchConcurrency | ConfigKey::FetchMaxTiles => "fetch",
            ConfigKey::OutputDirectory | ConfigKey::OutputFormat => "output",
        }
    }

    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::SourceProvider => "provider",
            ConfigKey::SourceAccessToken => "access_token",
            ConfigKey::SourceTimeout => "timeout",
            ConfigKey::FetchConcurrency => "concurrency",
            ConfigKey::FetchMaxTiles => "max_tiles",
            ConfigKey::OutputDirectory => "directory",
            ConfigKey::OutputFormat => "format",
        }
    }

    /// `section.key`
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as written in the file; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::SourceProvider => config.source.provider.to_string(),
            ConfigKey::SourceAccessToken => config.source.access_token.clone().unwrap_or_default(),
            ConfigKey::SourceTimeout => config.source.timeout.to_string(),
            ConfigKey::FetchConcurrency => config
                .fetch
                .concurrency
                .map(|n| n.to_string())
                .unwrap_or_default(),
            ConfigKey::FetchMaxTiles => config.fetch.max_tiles.to_string(),
            ConfigKey::OutputDirectory => config.output.directory.display().to_string(),
            ConfigKey::OutputFormat => config.output.format.to_string(),
        }
    }

    /// Parses and stores `value`.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match self {
            ConfigKey::SourceProvider => {
                config.source.provider = value.parse().map_err(|e| self.invalid(value, e))?;
            }
            ConfigKey::SourceAccessToken => {
                config.source.access_token = (!value.is_empty()).then(|| value.to_string());
            }
            ConfigKey::SourceTimeout => {
                config.source.timeout = self.parse_positive(value)?;
            }
            ConfigKey::FetchConcurrency => {
                config.fetch.concurrency = if value.is_empty() {
                    None
                } else {
                    Some(self.parse_positive(value)?)
                };
            }
            ConfigKey::FetchMaxTiles => {
                config.fetch.max_tiles = self.parse_positive(value)?;
            }
            ConfigKey::OutputDirectory => {
                if value.is_empty() {
                    return Err(self.invalid(value, "must not be empty"));
                }
                config.output.directory = PathBuf::from(value);
            }
            ConfigKey::OutputFormat => {
                config.output.format = value.parse().map_err(|e| self.invalid(value, e))?;
            }
        }
        Ok(())
    }

    fn parse_positive<T>(&self, value: &str) -> Result<T, ConfigError>
    where
        T: FromStr + PartialOrd + Default,
    {
        match value.parse::<T>() {
            Ok(n) if n > T::default() => Ok(n),
            _ => Err(self.invalid(value, "expected a positive integer")),
        }
    }

    fn invalid(&self, value: &str, reason: impl fmt::Display) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.key_name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}
