use std::{cmp::Reverse, collections::BinaryHeap};

use ordered_float::OrderedFloat;
use thiserror::Error;

use crate::{
    disjoint_set::{DisjointSet, DisjointSetError},
    graph::{Edge, Graph, GraphError, NodeIndex},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MstError {
    #[error("minimum spanning trees require an undirected graph")]
    DirectedGraph,

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    DisjointSet(#[from] DisjointSetError),
}

/// Heap entry ordered by weight, then by endpoints so equal weights pop in a
/// stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct QueuedEdge {
    weight: OrderedFloat<f64>,
    from: NodeIndex,
    to: NodeIndex,
}

impl From<Edge> for QueuedEdge {
    fn from(edge: Edge) -> Self {
        QueuedEdge {
            weight: OrderedFloat(edge.weight),
            from: edge.from,
            to: edge.to,
        }
    }
}

/// Computes a minimum spanning forest of `source` with Kruskal's algorithm and
/// adds its edges to `dest`.
///
/// `dest` is expected to be empty and to have as many nodes as `source`.
/// A directed source is rejected before `dest` is touched. On a connected
/// source with `n` nodes exactly `n - 1` edges are added; in general one less
/// than `n` per connected component.
pub fn minimum_spanning_tree<S, D>(source: &S, dest: &mut D) -> Result<(), MstError>
where
    S: Graph + ?Sized,
    D: Graph + ?Sized,
{
    if source.is_directed() {
        return Err(MstError::DirectedGraph);
    }

    // Using Reverse to turn the max-heap into a min-heap
    let mut queue = source
        .edges()
        .into_iter()
        .map(|edge| Reverse(QueuedEdge::from(edge)))
        .collect::<BinaryHeap<_>>();

    // Track connected components, one element per node
    let size = source.size();
    let mut components = DisjointSet::new(size.max(1), DisjointSet::DEFAULT_SCALE_FACTOR)?;
    if size > 0 {
        components.add_many(size)?;
    }

    let mut added = 0usize;
    while let Some(Reverse(edge)) = queue.pop() {
        let root_from = components.find(edge.from as usize)?;
        let root_to = components.find(edge.to as usize)?;

        // Endpoints in different trees: the edge joins them
        if root_from != root_to {
            dest.connect(edge.from, edge.to, edge.weight.into_inner())?;
            components.union(root_from, root_to)?;
            added += 1;
        }
    }

    tracing::trace!(nodes = size, edges = added, "spanning forest computed");
    Ok(())
}
