use std::time::{Duration, Instant};

use fractmaze::{MazeConfig, generate_maze, logging};

fn main() -> anyhow::Result<()> {
    let _guard = logging::init(None);

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(10)
        .max(1);
    let recursion = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(2);

    let config = MazeConfig::default()
        .with_dimensions(8, 8)
        .with_recursion_level(recursion)
        .with_seed(0);

    let mut total = Duration::ZERO;
    for i in 0..num_iters {
        let start = Instant::now();
        let maze = generate_maze(&config)?;
        let elapsed = start.elapsed();
        total += elapsed;
        tracing::debug!(iteration = i, cells = maze.graph().size(), ?elapsed, "generated");
    }

    tracing::info!(
        iterations = num_iters,
        recursion,
        mean = ?(total / num_iters),
        "profiling finished"
    );
    Ok(())
}
