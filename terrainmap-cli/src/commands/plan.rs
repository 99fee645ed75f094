//! `terrainmap plan`: show the tile grid for a window without fetching.

use clap::Args;
use terrainmap::view;

use super::common::{load_config, WindowArgs};
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub window: WindowArgs,

    /// Tile budget to check against (overrides config)
    #[arg(long)]
    pub max_tiles: Option<usize>,

    /// Print every tile coordinate
    #[arg(long)]
    pub list: bool,
}

pub fn run(args: PlanArgs) -> Result<(), CliError> {
    let config = load_config();
    let max_tiles = args.max_tiles.unwrap_or(config.fetch.max_tiles);

    let window = args.window.to_window()?;
    let grid = view::plan(&window, max_tiles)?;
    let (min_x, max_x) = grid.x_range();
    let (min_y, max_y) = grid.y_range();

    println!("Tile Grid");
    println!("=========");
    println!();
    println!("  Zoom:      {}", grid.zoom());
    println!("  Columns:   x {}..={} ({})", min_x, max_x, grid.width());
    println!("  Rows:      y {}..={} ({})", min_y, max_y, grid.height());
    println!("  Tiles:     {} (limit {})", grid.len(), max_tiles);

    if args.list {
        println!();
        for tile in grid.tiles() {
            println!("  {}", tile);
        }
    }

    Ok(())
}
