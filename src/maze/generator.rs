//! Fractal maze generation.
//!
//! A maze at recursion level 0 is the minimum spanning tree of a randomly
//! weighted grid. At level `d > 0` the maze is built from a matrix of child
//! mazes at level `d - 1`: their passages are copied into one large grid,
//! every pair of adjacent children is bridged along their shared border with
//! freshly weighted candidate edges, and the result is reduced to a spanning
//! tree once more. Each child keeps its own shape while the last reduction
//! decides which bridges stay open.

use rand::Rng;
use thiserror::Error;

use super::{Orientation, Rectangle, Weighting};
use crate::{
    graph::{GraphError, SparseGraph},
    kruskal::{MstError, minimum_spanning_tree},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("invalid maze dimensions {width}x{height}")]
    InvalidConfiguration { width: usize, height: usize },

    #[error("recursion level {level} exceeds the maximum of {max}")]
    RecursionTooDeep { level: usize, max: usize },

    #[error("failed to build maze graph: {0}")]
    Graph(#[from] GraphError),

    #[error("failed to reduce maze to a spanning tree: {0}")]
    Mst(#[from] MstError),
}

/// Parameters of a maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeConfig {
    /// Cells (level 0) or submazes (level > 0) per row
    pub width: usize,
    /// Cells (level 0) or submazes (level > 0) per column
    pub height: usize,
    /// Depth of submaze nesting, 0 for a plain maze
    pub recursion_level: usize,
    /// Width of every nested submaze before its own nesting is applied
    pub base_width: usize,
    /// Height of every nested submaze before its own nesting is applied
    pub base_height: usize,
    /// Seed for edge weights; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            recursion_level: 0,
            base_width: Self::DEFAULT_BASE_SIZE,
            base_height: Self::DEFAULT_BASE_SIZE,
            seed: None,
        }
    }
}

impl MazeConfig {
    pub const DEFAULT_BASE_SIZE: usize = 4;
    pub const MAX_RECURSION_LEVEL: usize = 32;

    pub fn with_dimensions(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_recursion_level(mut self, level: usize) -> Self {
        self.recursion_level = level;
        self
    }

    pub fn with_base_size(mut self, width: usize, height: usize) -> Self {
        self.base_width = width;
        self.base_height = height;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Size of the finished maze in cells, or `None` if it does not fit in a graph.
    pub fn maze_dimensions(&self) -> Option<(usize, usize)> {
        let mut width = self.width;
        let mut height = self.height;
        for _ in 0..self.recursion_level {
            width = width.checked_mul(self.base_width)?;
            height = height.checked_mul(self.base_height)?;
        }
        let cells = width.checked_mul(height)?;
        (cells > 0 && cells <= SparseGraph::MAX_NODES).then_some((width, height))
    }

    fn validate(&self) -> Result<(), MazeError> {
        if self.recursion_level > Self::MAX_RECURSION_LEVEL {
            return Err(MazeError::RecursionTooDeep {
                level: self.recursion_level,
                max: Self::MAX_RECURSION_LEVEL,
            });
        }
        let invalid = MazeError::InvalidConfiguration {
            width: self.width,
            height: self.height,
        };
        if self.recursion_level > 0 && (self.base_width == 0 || self.base_height == 0) {
            return Err(invalid);
        }
        self.maze_dimensions().map(|_| ()).ok_or(invalid)
    }
}

/// One node of the tree of generated mazes.
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    /// The passages of this maze
    rect: Rectangle,
    recursion_level: usize,
    /// Submazes this maze was composed from, present when `recursion_level > 0`
    children: Option<Submazes>,
}

impl MazeGenerator {
    /// Generates the whole tree described by `config`, drawing every weight from `rng`.
    ///
    /// Any failure while building a submaze aborts the whole generation.
    pub fn generate<R: Rng + ?Sized>(config: &MazeConfig, rng: &mut R) -> Result<Self, MazeError> {
        config.validate()?;
        Self::build(
            config.width,
            config.height,
            config.recursion_level,
            (config.base_width, config.base_height),
            rng,
        )
    }

    fn build<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        recursion_level: usize,
        base: (usize, usize),
        rng: &mut R,
    ) -> Result<Self, MazeError> {
        let (candidates, children) = if recursion_level == 0 {
            let candidates = Rectangle::new(width, height, Weighting::Random, rng)?;
            (candidates, None)
        } else {
            tracing::debug!(recursion_level, width, height, "generating submazes");
            let children = Submazes::build(width, height, recursion_level - 1, base, rng)?;
            let candidates = children.join(rng)?;
            (candidates, Some(children))
        };

        let rect = spanning_tree(&candidates)?;
        tracing::trace!(
            recursion_level,
            width = rect.width(),
            height = rect.height(),
            "maze reduced to spanning tree"
        );

        Ok(MazeGenerator {
            rect,
            recursion_level,
            children,
        })
    }

    pub fn rectangle(&self) -> &Rectangle {
        &self.rect
    }

    pub fn into_rectangle(self) -> Rectangle {
        self.rect
    }

    pub fn recursion_level(&self) -> usize {
        self.recursion_level
    }

    pub fn children(&self) -> Option<&Submazes> {
        self.children.as_ref()
    }
}

/// Reduces a grid of candidate edges to the spanning tree of its passages.
fn spanning_tree(candidates: &Rectangle) -> Result<Rectangle, MazeError> {
    let mut paths = SparseGraph::new(candidates.graph().size(), false)?;
    minimum_spanning_tree(candidates.graph(), &mut paths)?;
    Ok(Rectangle::with_graph(
        candidates.width(),
        candidates.height(),
        paths,
    )?)
}

/// A row-major `width × height` matrix of child mazes.
#[derive(Debug, Clone)]
pub struct Submazes {
    width: usize,
    height: usize,
    cells: Box<[MazeGenerator]>,
}

impl Submazes {
    fn build<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        recursion_level: usize,
        base: (usize, usize),
        rng: &mut R,
    ) -> Result<Self, MazeError> {
        let cells = (0..width * height)
            .map(|_| MazeGenerator::build(base.0, base.1, recursion_level, base, &mut *rng))
            .collect::<Result<Box<[_]>, _>>()?;
        Ok(Submazes {
            width,
            height,
            cells,
        })
    }

    /// Number of submazes per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of submazes per column.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&MazeGenerator> {
        if row < self.height && col < self.width {
            self.cells.get(row * self.width + col)
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MazeGenerator> {
        self.cells.iter()
    }

    /// Whether another submaze follows `(row, col)` in the given orientation.
    fn has_neighbor_after(&self, (row, col): (usize, usize), orientation: Orientation) -> bool {
        match orientation {
            Orientation::Vertical => col + 1 < self.width,
            Orientation::Horizontal => row + 1 < self.height,
        }
    }

    /// Lays the submazes out side by side in one grid of candidate edges.
    ///
    /// Passages inside a submaze keep their weights. Where a submaze ends and
    /// another one follows, every pair of facing cells becomes a candidate
    /// with a new random weight.
    fn join<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Rectangle, MazeError> {
        let (child_width, child_height) = self
            .cells
            .first()
            .map(|c| (c.rect.width(), c.rect.height()))
            .ok_or(MazeError::InvalidConfiguration {
                width: self.width,
                height: self.height,
            })?;

        let mut composite =
            Rectangle::unconnected(self.width * child_width, self.height * child_height)?;

        for row in 0..self.height {
            for col in 0..self.width {
                let child = &self[(row, col)].rect;
                let origin = (row * child_height, col * child_width);

                for r in 0..child_height {
                    for c in 0..child_width {
                        let here = (origin.0 + r, origin.1 + c);
                        for orientation in [Orientation::Vertical, Orientation::Horizontal] {
                            let weight = match child.neighbor_after((r, c), orientation) {
                                Some(next) => child
                                    .graph()
                                    .edge(child.index(r, c), child.index(next.0, next.1))
                                    .map(|e| e.weight),
                                None if self.has_neighbor_after((row, col), orientation) => {
                                    Weighting::Random.next_weight(rng)
                                }
                                None => None,
                            };
                            if let Some(weight) = weight {
                                composite.connect_after(here, orientation, weight)?;
                            }
                        }
                    }
                }
            }
        }

        tracing::debug!(
            width = composite.width(),
            height = composite.height(),
            candidates = composite.graph().edge_count(),
            "submazes joined"
        );
        Ok(composite)
    }
}

impl std::ops::Index<(usize, usize)> for Submazes {
    type Output = MazeGenerator;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.cells[row * self.width + col]
    }
}
