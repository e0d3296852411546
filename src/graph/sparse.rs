use std::collections::BTreeMap;

use super::{Edge, Graph, GraphError, NodeIndex};

/// Weighted graph with a fixed number of nodes and sparse adjacency.
///
/// Undirected edges are stored once, in the adjacency of the lower index,
/// and are visible from both ends through [`SparseGraph::edge`].
#[derive(Debug, Clone)]
pub struct SparseGraph {
    directed: bool,
    /// Adjacency of each node, mapping the neighbor to the edge weight.
    nodes: Box<[BTreeMap<NodeIndex, f64>]>,
}

impl SparseGraph {
    /// Largest node count such that the count itself fits in a [`NodeIndex`].
    pub const MAX_NODES: usize = NodeIndex::MAX as usize;

    /// Creates a graph with `n` nodes and no edges.
    pub fn new(n: usize, directed: bool) -> Result<Self, GraphError> {
        if n == 0 || n > Self::MAX_NODES {
            return Err(GraphError::InvalidConfiguration { nodes: n });
        }

        Ok(SparseGraph {
            directed,
            nodes: vec![BTreeMap::new(); n].into_boxed_slice(),
        })
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns the number of nodes in the graph.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of stored edges. Undirected edges count once.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(BTreeMap::len).sum()
    }

    fn check_index(&self, index: NodeIndex) -> Result<usize, GraphError> {
        let idx = index as usize;
        if idx < self.nodes.len() {
            Ok(idx)
        } else {
            Err(GraphError::NoSuchNode {
                index,
                size: self.nodes.len(),
            })
        }
    }

    /// Orders the endpoints the way they are stored.
    fn canonical(&self, i: NodeIndex, j: NodeIndex) -> (NodeIndex, NodeIndex) {
        if !self.directed && i > j { (j, i) } else { (i, j) }
    }

    /// Connects node `i` to node `j` with the given weight.
    ///
    /// Connecting the same pair again overwrites the previous weight.
    /// Fails without touching the graph if either index is out of range.
    pub fn connect(&mut self, i: NodeIndex, j: NodeIndex, weight: f64) -> Result<(), GraphError> {
        self.check_index(i)?;
        self.check_index(j)?;

        let (from, to) = self.canonical(i, j);
        self.nodes[from as usize].insert(to, weight);
        Ok(())
    }

    /// Looks up the edge between `i` and `j`.
    ///
    /// Unlike [`SparseGraph::connect`], out-of-range indices are not an error
    /// here: there is simply no such edge.
    pub fn edge(&self, i: NodeIndex, j: NodeIndex) -> Option<Edge> {
        let (from, to) = self.canonical(i, j);
        self.nodes
            .get(from as usize)?
            .get(&to)
            .map(|&weight| Edge::new(from, to, weight))
    }

    /// Whether `i` and `j` are joined by an edge.
    pub fn is_connected(&self, i: NodeIndex, j: NodeIndex) -> bool {
        self.edge(i, j).is_some()
    }

    /// Iterates every stored edge once, ordered by `(from, to)`.
    pub fn iter_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes.iter().enumerate().flat_map(|(from, adjacency)| {
            adjacency
                .iter()
                .map(move |(&to, &weight)| Edge::new(from as NodeIndex, to, weight))
        })
    }

    pub fn edges(&self) -> Vec<Edge> {
        self.iter_edges().collect()
    }
}

impl Graph for SparseGraph {
    fn size(&self) -> usize {
        SparseGraph::size(self)
    }

    fn is_directed(&self) -> bool {
        SparseGraph::is_directed(self)
    }

    fn connect(&mut self, i: NodeIndex, j: NodeIndex, weight: f64) -> Result<(), GraphError> {
        SparseGraph::connect(self, i, j, weight)
    }

    fn edges(&self) -> Vec<Edge> {
        SparseGraph::edges(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_graph() {
        assert_eq!(
            SparseGraph::new(0, false).unwrap_err(),
            GraphError::InvalidConfiguration { nodes: 0 }
        );
        assert!(SparseGraph::new(1, true).is_ok());
    }

    #[test]
    fn test_new_rejects_more_nodes_than_indices() {
        assert_eq!(SparseGraph::MAX_NODES, NodeIndex::MAX as usize);
        if let Some(n) = SparseGraph::MAX_NODES.checked_add(1) {
            assert_eq!(
                SparseGraph::new(n, false).unwrap_err(),
                GraphError::InvalidConfiguration { nodes: n }
            );
        }
    }

    #[test]
    fn test_accessors() {
        let g = SparseGraph::new(7, true).unwrap();
        assert_eq!(g.size(), 7);
        assert!(g.is_directed());
        assert_eq!(g.edge_count(), 0);
        assert!(g.edges().is_empty());
    }

    #[test]
    fn test_connect_out_of_range() {
        let mut g = SparseGraph::new(3, false).unwrap();
        assert_eq!(
            g.connect(0, 3, 1.0),
            Err(GraphError::NoSuchNode { index: 3, size: 3 })
        );
        assert_eq!(
            g.connect(5, 1, 1.0),
            Err(GraphError::NoSuchNode { index: 5, size: 3 })
        );
        // A failed connect leaves the graph untouched
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_edge_out_of_range_is_not_found() {
        let mut g = SparseGraph::new(3, false).unwrap();
        g.connect(0, 2, 0.5).unwrap();
        assert_eq!(g.edge(0, 3), None);
        assert_eq!(g.edge(NodeIndex::MAX, 0), None);
    }

    #[test]
    fn test_undirected_symmetry() {
        let mut g = SparseGraph::new(4, false).unwrap();
        g.connect(3, 1, 0.25).unwrap();
        let expected = Edge::new(1, 3, 0.25);
        assert_eq!(g.edge(1, 3), Some(expected));
        assert_eq!(g.edge(3, 1), Some(expected));
        // Stored (and reported) only once
        assert_eq!(g.edges(), vec![expected]);
    }

    #[test]
    fn test_directed_asymmetry() {
        let mut g = SparseGraph::new(4, true).unwrap();
        g.connect(3, 1, 0.25).unwrap();
        assert_eq!(g.edge(3, 1), Some(Edge::new(3, 1, 0.25)));
        assert_eq!(g.edge(1, 3), None);

        g.connect(1, 3, 0.75).unwrap();
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_connect_overwrites_weight() {
        let mut g = SparseGraph::new(2, false).unwrap();
        g.connect(0, 1, 1.0).unwrap();
        g.connect(1, 0, 2.0).unwrap();
        assert_eq!(g.edge(0, 1).map(|e| e.weight), Some(2.0));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_edges_are_ordered() {
        let mut g = SparseGraph::new(5, false).unwrap();
        g.connect(4, 3, 0.1).unwrap();
        g.connect(0, 2, 0.2).unwrap();
        g.connect(1, 0, 0.3).unwrap();
        let pairs = g.iter_edges().map(|e| (e.from, e.to)).collect::<Vec<_>>();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (3, 4)]);
    }
}
