//! Proximity graphs over 2D centroids.
//!
//! Construction runs in four stages over one point set:
//! - [`DistanceMatrix`]: dense pairwise Euclidean distances.
//! - [`AdjacencyRelation::from_threshold`]: connect pairs strictly closer than
//!   the threshold, storing each undirected edge once as `(min, max)`.
//! - [`cap_degree`]: optional mutual-kNN pruning. An edge survives only if
//!   both endpoints rank each other among their `max_degree` nearest nodes.
//! - [`EdgeList`]: present edges as `(i, j)` pairs, `i < j`, in ascending
//!   order.
//!
//! Non-finite coordinates are not an error; their distances fail every
//! threshold test, so such nodes stay isolated.

mod adjacency;
mod build;
mod cap;
mod config;
mod distance;
mod edges;
mod graph;

pub use adjacency::AdjacencyRelation;
pub use build::{build_edge_list, build_graph, build_graph_for};
pub use cap::cap_degree;
pub use config::{ConfigError, GraphConfig};
pub use distance::DistanceMatrix;
pub use edges::EdgeList;
pub use graph::{Edge, NodeId, ProximityGraph};
