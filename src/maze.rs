pub mod cell;
pub mod draw;
pub mod generator;
pub mod grid;
mod rectangle;

use rand::{SeedableRng, rngs::StdRng};

pub use cell::GridCell;
pub use generator::{MazeConfig, MazeError, MazeGenerator, Submazes};
pub use grid::Grid;
pub use rectangle::{Rectangle, Weighting};

/// Orientation of the wall (or passage) that follows a cell.
///
/// - `Vertical`: between the cell and its east neighbor
/// - `Horizontal`: between the cell and its south neighbor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Generates a maze as described by `config` and returns its passages.
///
/// The returned rectangle is `config.width × config.height` cells at
/// recursion level 0; every level multiplies both sides by the base size.
/// Sizes are in cells: [`draw::render_image`] turns the rectangle into an
/// image of `width × square_size` by `height × square_size` pixels.
pub fn generate_maze(config: &MazeConfig) -> Result<Rectangle, MazeError> {
    let mut rng = get_rng(config.seed);
    let maze = MazeGenerator::generate(config, &mut rng)?;
    tracing::info!(
        width = maze.rectangle().width(),
        height = maze.rectangle().height(),
        passages = maze.rectangle().graph().edge_count(),
        "maze generated"
    );
    Ok(maze.into_rectangle())
}
