use serde::{Deserialize, Serialize};

use crate::adjacency::AdjacencyRelation;
use crate::graph::Edge;

/// Canonical edge list: `(i, j)` with `i < j`, ascending by `i` then `j`,
/// no duplicates. Serializes as `[[i, j], ...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeList {
    edges: Vec<Edge>,
}

impl EdgeList {
    pub fn from_adjacency(adj: &AdjacencyRelation) -> Self {
        let mut edges = Vec::with_capacity(adj.edge_count());
        edges.extend(adj.iter_edges());
        Self { edges }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn as_slice(&self) -> &[Edge] {
        &self.edges
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn into_vec(self) -> Vec<Edge> {
        self.edges
    }
}

impl<'a> IntoIterator for &'a EdgeList {
    type Item = &'a Edge;
    type IntoIter = core::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::EdgeList;
    use crate::adjacency::AdjacencyRelation;

    #[test]
    fn ordered_by_source_then_target() {
        let mut adj = AdjacencyRelation::empty(5);
        adj.insert(4, 2);
        adj.insert(0, 3);
        adj.insert(2, 1);
        adj.insert(0, 1);
        adj.insert(3, 0);

        let edges = EdgeList::from_adjacency(&adj);
        assert_eq!(edges.as_slice(), &[(0, 1), (0, 3), (1, 2), (2, 4)]);
        assert_eq!(edges.len(), adj.edge_count());
    }

    #[test]
    fn empty_relation_gives_empty_list() {
        let edges = EdgeList::from_adjacency(&AdjacencyRelation::empty(3));
        assert!(edges.is_empty());
        assert_eq!(edges, EdgeList::default());
    }

    #[test]
    fn serializes_as_pairs() {
        let mut adj = AdjacencyRelation::empty(3);
        adj.insert(0, 2);
        adj.insert(1, 2);

        let edges = EdgeList::from_adjacency(&adj);
        let json = serde_json::to_string(&edges).expect("serialize");
        assert_eq!(json, "[[0,2],[1,2]]");

        let back: EdgeList = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, edges);
    }
}
