//! `terrainmap init`: write the configuration file.

use terrainmap::config::{config_file_path, ConfigFile};

use crate::error::CliError;

pub fn run() -> Result<(), CliError> {
    let path = config_file_path();

    if path.exists() {
        println!("Configuration file already exists: {}", path.display());
        println!("Use 'terrainmap config list' to view current settings.");
        return Ok(());
    }

    ConfigFile::default().save()?;

    println!("Created configuration file: {}", path.display());
    println!();
    println!("Set a Mapbox token with:");
    println!("  terrainmap config set source.access_token <TOKEN>");
    println!("or switch to the token-free AWS source with:");
    println!("  terrainmap config set source.provider terrarium");
    println!();
    println!("CLI arguments override config file values when specified.");
    Ok(())
}
