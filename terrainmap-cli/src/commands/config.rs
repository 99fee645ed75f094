//! `terrainmap config`: read and write individual settings.

use clap::Subcommand;
use terrainmap::config::{config_file_path, ConfigFile, ConfigKey};

use crate::error::CliError;

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a setting
    Get {
        /// Setting name, e.g. source.provider
        key: String,
    },
    /// Change a setting and save the file
    Set {
        /// Setting name, e.g. fetch.max_tiles
        key: String,
        /// New value (empty to unset optional settings)
        value: String,
    },
    /// Print every setting
    List,
    /// Print the configuration file location
    Path,
}

pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => {
            let key = parse_key(&key)?;
            let config = ConfigFile::load()?;
            println!("{}", display_value(key, &key.get(&config)));
        }
        ConfigCommands::Set { key, value } => {
            let key = parse_key(&key)?;
            let mut config = ConfigFile::load()?;
            key.set(&mut config, &value)?;
            config.save()?;
            println!("Set {} = {}", key, display_value(key, &key.get(&config)));
        }
        ConfigCommands::List => {
            let config = ConfigFile::load()?;
            list(&config);
        }
        ConfigCommands::Path => {
            println!("{}", config_file_path().display());
        }
    }
    Ok(())
}

fn parse_key(name: &str) -> Result<ConfigKey, CliError> {
    name.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'terrainmap config list' to see available keys.",
            name
        ))
    })
}

fn list(config: &ConfigFile) {
    println!("Configuration Settings");
    println!("======================");

    let mut section = "";
    for key in ConfigKey::all() {
        if key.section() != section {
            section = key.section();
            println!();
            println!("[{}]", section);
        }
        println!("  {} = {}", key.key_name(), display_value(*key, &key.get(config)));
    }
}

fn display_value(key: ConfigKey, value: &str) -> String {
    if value.is_empty() {
        "(not set)".to_string()
    } else if key == ConfigKey::SourceAccessToken {
        mask(value)
    } else {
        value.to_string()
    }
}

/// Keeps the first few characters of a secret.
fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(6).collect();
    format!("{}...", visible)
}
