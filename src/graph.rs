mod edge;
mod sparse;

pub use edge::{Edge, NodeIndex};
pub use sparse::SparseGraph;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("a graph needs between 1 and {max} nodes, got {nodes}", max = NodeIndex::MAX)]
    InvalidConfiguration { nodes: usize },

    #[error("no such node {index} in a graph of {size} nodes")]
    NoSuchNode { index: NodeIndex, size: usize },
}

/// The capabilities a graph must offer to be reduced to a minimum spanning tree.
///
/// Kruskal's algorithm only reads the candidate edges of its source and only
/// adds edges to its destination, so the seam is kept this narrow.
pub trait Graph {
    /// Number of nodes, fixed at construction.
    fn size(&self) -> usize;

    fn is_directed(&self) -> bool;

    /// Adds (or overwrites) the edge between `i` and `j`.
    fn connect(&mut self, i: NodeIndex, j: NodeIndex, weight: f64) -> Result<(), GraphError>;

    /// Every stored edge exactly once, in no particular order.
    fn edges(&self) -> Vec<Edge>;
}
