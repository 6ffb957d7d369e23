use cg_core::{Point2f, PointSet};
use tracing::debug;

use crate::adjacency::AdjacencyRelation;
use crate::cap::cap_degree;
use crate::config::{ConfigError, GraphConfig};
use crate::distance::DistanceMatrix;
use crate::edges::EdgeList;
use crate::graph::ProximityGraph;

pub fn build_graph(points: &[Point2f], cfg: &GraphConfig) -> Result<ProximityGraph, ConfigError> {
    cfg.validate()?;

    let n = points.len();
    let distances = DistanceMatrix::build(points);
    let mut adjacency = AdjacencyRelation::from_threshold(&distances, cfg.threshold);
    let threshold_edges = adjacency.edge_count();

    if cfg.knn {
        cap_degree(&mut adjacency, &distances, cfg.max_degree);
    }

    let edges = EdgeList::from_adjacency(&adjacency);
    debug!(
        nodes = n,
        threshold = cfg.threshold,
        knn = cfg.knn,
        threshold_edges,
        edges = edges.len(),
        "proximity graph built"
    );

    Ok(ProximityGraph {
        num_nodes: n,
        adjacency,
        edges,
        threshold_edges,
    })
}

pub fn build_graph_for(set: &PointSet, cfg: &GraphConfig) -> Result<ProximityGraph, ConfigError> {
    build_graph(set.points(), cfg)
}

pub fn build_edge_list(points: &[Point2f], cfg: &GraphConfig) -> Result<EdgeList, ConfigError> {
    build_graph(points, cfg).map(|g| g.edges)
}
