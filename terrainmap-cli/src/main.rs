//! terrainmap command line interface.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use console::style;
use terrainmap::logging::{init_logging, LoggingConfig};

use commands::config::ConfigCommands;
use commands::fetch::FetchArgs;
use commands::plan::PlanArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "terrainmap")]
#[command(version, about = "Terrain elevation tiles to georeferenced rasters", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch terrain tiles for a view window and write rasters
    Fetch(FetchArgs),

    /// Show the tiles a fetch would download, without fetching
    Plan(PlanArgs),

    /// Create the configuration file with default settings
    Init,

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        verbose: cli.verbose,
        file: cli.log_file.clone(),
    };
    let _guard = match init_logging(&logging) {
        Ok(guard) => guard,
        Err(e) => return report(CliError::Logging(e.to_string())),
    };

    let result = match cli.command {
        Commands::Fetch(args) => commands::fetch::run(args),
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Init => commands::init::run(),
        Commands::Config { command } => commands::config::run(command),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(e),
    }
}

fn report(error: CliError) -> ExitCode {
    eprintln!("{} {}", style("Error:").red().bold(), error);
    ExitCode::FAILURE
}
