/// Index of a node inside a graph. Composite mazes share one node space, so a
/// single fixed-width integer is enough.
pub type NodeIndex = u32;

/// Weighted connection between two nodes.
///
/// For undirected graphs `from` is always the lower of the two indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: NodeIndex,
    pub to: NodeIndex,
    pub weight: f64,
}

impl Edge {
    pub fn new(from: NodeIndex, to: NodeIndex, weight: f64) -> Self {
        Edge { from, to, weight }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({:.4})", self.from, self.to, self.weight)
    }
}
