use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use fractmaze::{
    MazeConfig, generate_maze, logging,
    maze::{Grid, draw},
};

/// Generate a (fractal) maze and save it as a PNG image
#[derive(Parser)]
#[command(name = "fractmaze", version)]
struct Cli {
    /// Width of the maze, in cells or in submazes when recursing
    #[arg(long, default_value = "20")]
    width: usize,
    /// Height of the maze, in cells or in submazes when recursing
    #[arg(long, default_value = "20")]
    height: usize,
    /// Recursion level, 0 for a plain maze
    #[arg(long, default_value = "0")]
    recursion: usize,
    /// Side length of every nested submaze
    #[arg(long, default_value_t = MazeConfig::DEFAULT_BASE_SIZE)]
    base_size: usize,
    /// Output filename for the maze image
    #[arg(short, long, default_value = "maze.png")]
    filename: PathBuf,
    /// Pixels per maze cell
    #[arg(long, default_value = "20")]
    square_size: u32,
    /// Seed for reproducible mazes
    #[arg(long)]
    seed: Option<u64>,
    /// Also print the maze to the terminal
    #[arg(long)]
    display: bool,
    /// Write logs to a file in this directory instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_dir.as_deref());

    let mut config = MazeConfig::default()
        .with_dimensions(cli.width, cli.height)
        .with_recursion_level(cli.recursion)
        .with_base_size(cli.base_size, cli.base_size);
    config.seed = cli.seed;

    let maze = generate_maze(&config).context("failed to generate maze")?;

    let img = draw::render_image(&maze, cli.square_size).context("failed to draw maze")?;
    draw::write_png(&img, &cli.filename)
        .with_context(|| format!("writing {}", cli.filename.display()))?;
    tracing::info!(
        path = %cli.filename.display(),
        width_px = img.width,
        height_px = img.height,
        "maze saved"
    );

    if cli.display {
        Grid::from_rectangle(&maze)
            .display(&mut std::io::stdout())
            .context("failed to print maze")?;
    }

    Ok(())
}
