use tracing::trace;

use crate::adjacency::AdjacencyRelation;
use crate::distance::DistanceMatrix;

/// Mutual-kNN pruning of a thresholded adjacency.
///
/// For every node the other nodes are ranked by distance over the full
/// matrix; any edge to a node ranked at `max_degree` or beyond is removed.
/// Removals are never undone, so an edge `{i, j}` survives iff each
/// endpoint ranks the other among its `max_degree` nearest. Returns the
/// number of edges removed.
pub fn cap_degree(adj: &mut AdjacencyRelation, d: &DistanceMatrix, max_degree: usize) -> usize {
    let n = d.len();
    debug_assert_eq!(adj.num_nodes(), n, "adjacency/distance size mismatch");

    if n <= max_degree.saturating_add(1) {
        return 0;
    }

    let mut removed = 0;
    for i in 0..n {
        if adj.degree(i) == 0 {
            continue;
        }
        let ranked = d.ranked_neighbors(i);
        for &far in &ranked[max_degree..] {
            if adj.remove(i, far) {
                removed += 1;
            }
        }
    }

    trace!(n, max_degree, removed, "degree cap applied");
    removed
}
