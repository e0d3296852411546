use rand::Rng;

use super::Orientation;
use crate::graph::{GraphError, NodeIndex, SparseGraph};

/// How the neighboring cells of a new rectangle are connected.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Weighting {
    /// No edges at all; the rectangle is only used for coordinate math.
    #[default]
    NoConnect,
    /// Every neighbor pair joined with [`Weighting::DEFAULT_WEIGHT`].
    Constant,
    /// Every neighbor pair joined with a weight drawn from `[0.0, 1.0)`.
    Random,
}

impl Weighting {
    pub const DEFAULT_WEIGHT: f64 = 1.0;

    /// Draws the weight of the next edge, or `None` when nothing should be connected.
    pub fn next_weight<R: Rng + ?Sized>(self, rng: &mut R) -> Option<f64> {
        match self {
            Weighting::NoConnect => None,
            Weighting::Constant => Some(Self::DEFAULT_WEIGHT),
            Weighting::Random => Some(rng.random::<f64>()),
        }
    }
}

/// A `width × height` grid of cells laid over an undirected graph.
///
/// Cell `(row, col)` is node `row * width + col`.
#[derive(Debug, Clone)]
pub struct Rectangle {
    width: usize,
    height: usize,
    graph: SparseGraph,
}

impl Rectangle {
    /// Builds the rectangle, joining every cell to its east and south
    /// neighbors as `weighting` dictates. North and west are the same edges
    /// seen from the other side.
    pub fn new<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        weighting: Weighting,
        rng: &mut R,
    ) -> Result<Self, GraphError> {
        let mut rect = Self::unconnected(width, height)?;

        for row in 0..height {
            for col in 0..width {
                let east = (col + 1 < width).then(|| weighting.next_weight(rng)).flatten();
                if let Some(weight) = east {
                    rect.connect_after((row, col), Orientation::Vertical, weight)?;
                }
                let south = (row + 1 < height).then(|| weighting.next_weight(rng)).flatten();
                if let Some(weight) = south {
                    rect.connect_after((row, col), Orientation::Horizontal, weight)?;
                }
            }
        }

        Ok(rect)
    }

    /// Builds a rectangle without any edges.
    pub fn unconnected(width: usize, height: usize) -> Result<Self, GraphError> {
        let nodes = width
            .checked_mul(height)
            .ok_or(GraphError::InvalidConfiguration { nodes: usize::MAX })?;
        Ok(Rectangle {
            width,
            height,
            graph: SparseGraph::new(nodes, false)?,
        })
    }

    /// Wraps an existing graph, which must have exactly `width * height` nodes.
    pub fn with_graph(width: usize, height: usize, graph: SparseGraph) -> Result<Self, GraphError> {
        if width.checked_mul(height) != Some(graph.size()) {
            return Err(GraphError::InvalidConfiguration { nodes: graph.size() });
        }
        Ok(Rectangle {
            width,
            height,
            graph,
        })
    }

    /// Width of the rectangle in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the rectangle in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn graph(&self) -> &SparseGraph {
        &self.graph
    }

    pub fn into_graph(self) -> SparseGraph {
        self.graph
    }

    /// Maps a cell to its node. Only meaningful for `row < height` and `col < width`.
    pub fn index(&self, row: usize, col: usize) -> NodeIndex {
        (row * self.width + col) as NodeIndex
    }

    /// Maps a node back to its `(row, col)` cell.
    pub fn coordinates(&self, index: NodeIndex) -> (usize, usize) {
        let index = index as usize;
        (index / self.width, index % self.width)
    }

    /// Checks if the given cell lies inside the rectangle.
    pub fn is_in_bounds(&self, (row, col): (usize, usize)) -> bool {
        row < self.height && col < self.width
    }

    /// The cell after `from` in the given orientation, if it exists.
    pub fn neighbor_after(
        &self,
        (row, col): (usize, usize),
        orientation: Orientation,
    ) -> Option<(usize, usize)> {
        let next = match orientation {
            Orientation::Vertical => (row, col + 1),
            Orientation::Horizontal => (row + 1, col),
        };
        (self.is_in_bounds((row, col)) && self.is_in_bounds(next)).then_some(next)
    }

    /// Whether there is a passage between `from` and the cell after it.
    /// Cells on the outer boundary never have one leading outwards.
    pub fn is_passage_after(&self, from: (usize, usize), orientation: Orientation) -> bool {
        self.neighbor_after(from, orientation).is_some_and(|to| {
            self.graph
                .is_connected(self.index(from.0, from.1), self.index(to.0, to.1))
        })
    }

    /// Joins `from` and the cell after it with an edge of the given weight.
    pub fn connect_after(
        &mut self,
        from: (usize, usize),
        orientation: Orientation,
        weight: f64,
    ) -> Result<(), GraphError> {
        // Cells outside the rectangle have no node, report the first index past the end
        let Some(to) = self.neighbor_after(from, orientation) else {
            return Err(GraphError::NoSuchNode {
                index: self.graph.size() as NodeIndex,
                size: self.graph.size(),
            });
        };
        let (i, j) = (self.index(from.0, from.1), self.index(to.0, to.1));
        self.graph.connect(i, j, weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::get_rng;

    /// Checks every pair of cells: only orthogonal neighbors may be joined.
    fn assert_grid_edges(rect: &Rectangle, weighting: Weighting) {
        let (width, height) = (rect.width(), rect.height());
        for y1 in 0..height {
            for x1 in 0..width {
                for y2 in 0..height {
                    for x2 in 0..width {
                        let (i, j) = (rect.index(y1, x1), rect.index(y2, x2));
                        let edge = rect.graph().edge(i, j);
                        let adjacent = (x1 == x2 && y1.abs_diff(y2) == 1)
                            || (y1 == y2 && x1.abs_diff(x2) == 1);
                        match (adjacent, edge) {
                            (true, Some(e)) => match weighting {
                                Weighting::Constant => {
                                    assert_eq!(e.weight, Weighting::DEFAULT_WEIGHT)
                                }
                                _ => assert!((0.0..1.0).contains(&e.weight)),
                            },
                            (true, None) => panic!("expected edge between {i} and {j}"),
                            (false, Some(_)) => panic!("unexpected edge between {i} and {j}"),
                            (false, None) => {}
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_rectangle_shapes() {
        let mut rng = get_rng(Some(0));
        let cases = [
            (2, 2, Weighting::Constant),
            (10, 10, Weighting::Constant),
            (3, 15, Weighting::Constant),
            (15, 3, Weighting::Constant),
            (1, 100, Weighting::Constant),
            (100, 1, Weighting::Constant),
            (1, 1, Weighting::Constant),
            (2, 2, Weighting::Random),
            (5, 4, Weighting::Random),
        ];
        for (width, height, weighting) in cases {
            let rect = Rectangle::new(width, height, weighting, &mut rng).unwrap();
            assert_eq!(rect.graph().size(), width * height);
            assert_eq!(
                rect.graph().edge_count(),
                (width - 1) * height + width * (height - 1)
            );
            assert_grid_edges(&rect, weighting);
        }
    }

    #[test]
    fn test_no_connect_has_no_edges() {
        let rect = Rectangle::new(4, 3, Weighting::NoConnect, &mut get_rng(Some(1))).unwrap();
        assert_eq!(rect.graph().size(), 12);
        assert_eq!(rect.graph().edge_count(), 0);
    }

    #[test]
    fn test_zero_dimensions_are_rejected() {
        assert!(Rectangle::unconnected(0, 4).is_err());
        assert!(Rectangle::unconnected(4, 0).is_err());
        assert!(Rectangle::unconnected(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_index() {
        let rect = Rectangle::unconnected(10, 10).unwrap();
        assert_eq!(rect.index(9, 9), 99);
        assert_eq!(rect.index(2, 4), 24);
        assert_eq!(rect.coordinates(24), (2, 4));

        let wide = Rectangle::unconnected(7, 3).unwrap();
        assert_eq!(wide.index(2, 6), 20);
        assert_eq!(wide.coordinates(20), (2, 6));
    }

    #[test]
    fn test_with_graph_checks_size() {
        let graph = SparseGraph::new(6, false).unwrap();
        assert!(Rectangle::with_graph(3, 2, graph.clone()).is_ok());
        assert!(Rectangle::with_graph(4, 2, graph).is_err());
    }

    #[test]
    fn test_passages_after() {
        let mut rect = Rectangle::unconnected(3, 2).unwrap();
        rect.connect_after((0, 0), Orientation::Vertical, 0.5).unwrap();
        rect.connect_after((0, 2), Orientation::Horizontal, 0.5).unwrap();

        assert!(rect.is_passage_after((0, 0), Orientation::Vertical));
        assert!(!rect.is_passage_after((0, 0), Orientation::Horizontal));
        assert!(rect.is_passage_after((0, 2), Orientation::Horizontal));
        assert!(rect.graph().is_connected(2, 5));
        // Outer boundary is always walled
        assert!(!rect.is_passage_after((0, 2), Orientation::Vertical));
        assert!(!rect.is_passage_after((1, 0), Orientation::Horizontal));
        assert_eq!(rect.neighbor_after((1, 2), Orientation::Vertical), None);
    }

    #[test]
    fn test_connect_after_boundary_fails() {
        let mut rect = Rectangle::unconnected(2, 2).unwrap();
        assert!(rect.connect_after((0, 1), Orientation::Vertical, 1.0).is_err());
        assert!(rect.connect_after((1, 0), Orientation::Horizontal, 1.0).is_err());
        assert_eq!(rect.graph().edge_count(), 0);
    }
}
