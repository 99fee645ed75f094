//! `terrainmap fetch`: download a view window and write rasters.

use std::path::PathBuf;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use terrainmap::pool::ProgressCallback;
use terrainmap::session::{RunReport, Session, WorkDir, MANIFEST_FILE};
use terrainmap::source::create_source;
use tracing::debug;

use super::common::{load_config, resolve_source, FormatType, ProviderType, WindowArgs};
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct FetchArgs {
    #[command(flatten)]
    pub window: WindowArgs,

    /// Tile source (overrides config)
    #[arg(long, value_enum)]
    pub source: Option<ProviderType>,

    /// Mapbox access token (overrides config)
    #[arg(long)]
    pub token: Option<String>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Raster format (overrides config)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatType>,

    /// Parallel downloads (overrides config)
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Refuse windows that need more tiles than this (overrides config)
    #[arg(long)]
    pub max_tiles: Option<usize>,

    /// HTTP timeout in seconds (overrides config)
    #[arg(long)]
    pub timeout: Option<u64>,
}

pub fn run(args: FetchArgs) -> Result<(), CliError> {
    let config = load_config();

    let window = args.window.to_window()?;
    let source_config = resolve_source(args.source, args.token, &config)?;
    let timeout = args.timeout.unwrap_or(config.source.timeout);

    let mut session_config = config.session_config();
    if let Some(format) = args.format {
        session_config.format = format.into();
    }
    if let Some(n) = args.concurrency {
        session_config.concurrency = n.max(1);
    }
    if let Some(max) = args.max_tiles {
        session_config.max_tiles = max;
    }
    debug!(?session_config, source = %source_config.kind(), "Resolved settings");

    let source = create_source(&source_config, timeout)
        .map_err(|e| CliError::Config(e.to_string()))?;
    let session = Session::new(session_config, source);

    // Fail on the tile budget before touching the output directory
    let grid = session.plan(&window)?;

    let output = args.output.unwrap_or_else(|| config.output.directory.clone());
    let workdir = WorkDir::create(&output)?;

    println!(
        "Fetching {} tiles at zoom {} from {}",
        grid.len(),
        grid.zoom(),
        session.source_name()
    );

    let bar = progress_bar(grid.len());
    let progress: ProgressCallback = {
        let bar = bar.clone();
        Box::new(move |done, _total| bar.set_position(done as u64))
    };

    let report = session.run(&window, &workdir, Some(&progress));
    bar.finish_and_clear();
    let report = report?;

    print_summary(&report, &workdir);

    if report.is_total_failure() {
        return Err(CliError::NoTilesWritten {
            requested: report.tiles_requested,
        });
    }
    Ok(())
}

fn progress_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    if let Ok(style) =
        ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} tiles ({elapsed})")
    {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

fn print_summary(report: &RunReport, workdir: &WorkDir) {
    println!();
    println!("{}", style("Fetch complete").green().bold());
    println!("  Source:    {}", report.source);
    println!(
        "  Tiles:     {} requested, {} written, {} failed",
        report.tiles_requested,
        report.succeeded(),
        report.failed()
    );
    println!("  Format:    {}", report.format);
    println!("  Output:    {}", workdir.path().display());
    println!(
        "  Manifest:  {}",
        workdir.path().join(MANIFEST_FILE).display()
    );
    println!("  Elapsed:   {:.1}s", report.elapsed().as_secs_f64());

    if !report.failures.is_empty() {
        println!();
        println!("{}", style("Failed tiles").yellow().bold());
        for failure in &report.failures {
            println!(
                "  {:<16} {:<13} {}",
                failure.tile.to_string(),
                failure.kind,
                failure.reason
            );
        }
    }
}
