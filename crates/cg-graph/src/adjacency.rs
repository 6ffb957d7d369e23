use cg_core::SquareMatrix;

use crate::distance::DistanceMatrix;
use crate::graph::NodeId;

/// Undirected, self-loop-free adjacency over `n` nodes.
///
/// Only the upper triangle (`i < j`) is ever written; every accessor
/// canonicalizes its arguments to `(min, max)` first.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyRelation {
    flags: SquareMatrix<bool>,
    edge_count: usize,
}

impl AdjacencyRelation {
    pub fn empty(n: usize) -> Self {
        Self {
            flags: SquareMatrix::new_fill(n, false),
            edge_count: 0,
        }
    }

    /// Connects `i < j` iff `d[i][j] < threshold`. NaN never compares less,
    /// so non-finite distances never produce an edge.
    pub fn from_threshold(d: &DistanceMatrix, threshold: f32) -> Self {
        let n = d.len();
        let mut adj = Self::empty(n);

        for i in 0..n {
            let dist = d.row(i);
            let flags = adj.flags.row_mut(i);
            for j in (i + 1)..n {
                if dist[j] < threshold {
                    flags[j] = true;
                    adj.edge_count += 1;
                }
            }
        }

        adj
    }

    pub fn num_nodes(&self) -> usize {
        self.flags.size()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains(&self, a: NodeId, b: NodeId) -> bool {
        match canonical(a, b) {
            Some((i, j)) => self.flags.get(i, j).copied().unwrap_or(false),
            None => false,
        }
    }

    /// Adds the undirected edge `{a, b}`. Self-pairs and out-of-range
    /// indices are ignored. Returns whether the edge was newly added.
    pub fn insert(&mut self, a: NodeId, b: NodeId) -> bool {
        let Some((i, j)) = canonical(a, b) else {
            return false;
        };
        match self.flags.get_mut(i, j) {
            Some(cell) if !*cell => {
                *cell = true;
                self.edge_count += 1;
                true
            }
            _ => false,
        }
    }

    /// Drops the undirected edge `{a, b}`. Idempotent; returns whether an
    /// edge was actually removed.
    pub fn remove(&mut self, a: NodeId, b: NodeId) -> bool {
        let Some((i, j)) = canonical(a, b) else {
            return false;
        };
        match self.flags.get_mut(i, j) {
            Some(cell) if *cell => {
                *cell = false;
                self.edge_count -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).count()
    }

    /// Neighbours of `node` in ascending index order.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.num_nodes()).filter(move |&other| self.contains(node, other))
    }

    /// Present edges as `(i, j)`, `i < j`, ascending by `i` then `j`.
    pub fn iter_edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        let n = self.num_nodes();
        (0..n).flat_map(move |i| {
            let row = self.flags.row(i);
            ((i + 1)..n).filter(move |&j| row[j]).map(move |j| (i, j))
        })
    }
}

#[inline]
fn canonical(a: NodeId, b: NodeId) -> Option<(NodeId, NodeId)> {
    match a.cmp(&b) {
        core::cmp::Ordering::Less => Some((a, b)),
        core::cmp::Ordering::Greater => Some((b, a)),
        core::cmp::Ordering::Equal => None,
    }
}

#[cfg(test)]
mod tests {
    use cg_core::Point2f;

    use super::AdjacencyRelation;
    use crate::distance::DistanceMatrix;

    fn pts(coords: &[(f32, f32)]) -> Vec<Point2f> {
        coords.iter().map(|&c| Point2f::from(c)).collect()
    }

    #[test]
    fn threshold_is_strict() {
        let d = DistanceMatrix::build(&pts(&[(0.0, 0.0), (3.0, 4.0)]));

        let at = AdjacencyRelation::from_threshold(&d, 5.0);
        assert_eq!(at.edge_count(), 0);
        assert!(!at.contains(0, 1));

        let above = AdjacencyRelation::from_threshold(&d, 5.000_1);
        assert_eq!(above.edge_count(), 1);
        assert!(above.contains(0, 1));
        assert!(above.contains(1, 0));
    }

    #[test]
    fn only_upper_triangle_is_stored() {
        let d = DistanceMatrix::build(&pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]));
        let adj = AdjacencyRelation::from_threshold(&d, 10.0);

        assert_eq!(adj.edge_count(), 3);
        for i in 0..3 {
            assert!(!adj.contains(i, i));
            assert_eq!(adj.degree(i), 2);
        }
        assert_eq!(
            adj.iter_edges().collect::<Vec<_>>(),
            vec![(0, 1), (0, 2), (1, 2)]
        );
    }

    #[test]
    fn non_finite_points_never_connect() {
        let d = DistanceMatrix::build(&pts(&[
            (0.0, 0.0),
            (f32::NAN, 0.0),
            (1.0, 1.0),
            (f32::INFINITY, f32::INFINITY),
        ]));
        let adj = AdjacencyRelation::from_threshold(&d, f32::MAX);

        assert_eq!(adj.iter_edges().collect::<Vec<_>>(), vec![(0, 2)]);
        assert_eq!(adj.degree(1), 0);
        assert_eq!(adj.degree(3), 0);
    }

    #[test]
    fn insert_and_remove_are_idempotent() {
        let mut adj = AdjacencyRelation::empty(4);

        assert!(adj.insert(3, 1));
        assert!(!adj.insert(1, 3));
        assert!(!adj.insert(2, 2));
        assert!(!adj.insert(0, 9));
        assert_eq!(adj.edge_count(), 1);
        assert_eq!(adj.neighbors(1).collect::<Vec<_>>(), vec![3]);

        assert!(adj.remove(1, 3));
        assert!(!adj.remove(3, 1));
        assert!(!adj.remove(0, 0));
        assert_eq!(adj.edge_count(), 0);
        assert_eq!(adj.iter_edges().count(), 0);
    }

    #[test]
    fn empty_relation() {
        let adj = AdjacencyRelation::empty(0);
        assert_eq!(adj.num_nodes(), 0);
        assert_eq!(adj.iter_edges().count(), 0);
    }
}
