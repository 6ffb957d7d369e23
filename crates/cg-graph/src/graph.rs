use crate::adjacency::AdjacencyRelation;
use crate::edges::EdgeList;

pub type NodeId = usize;
pub type Edge = (NodeId, NodeId);

/// Outcome of one construction call.
#[derive(Debug, Clone)]
pub struct ProximityGraph {
    pub num_nodes: usize,
    pub adjacency: AdjacencyRelation,
    pub edges: EdgeList,
    /// Edges present after thresholding, before any capping.
    pub threshold_edges: usize,
}

impl ProximityGraph {
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency.degree(node)
    }

    pub fn max_degree(&self) -> usize {
        (0..self.num_nodes)
            .map(|i| self.adjacency.degree(i))
            .max()
            .unwrap_or(0)
    }

    pub fn iter_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }
}
