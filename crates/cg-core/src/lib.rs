//! Foundational primitives for centroid proximity graphs.
//!
//! ## Point Sets
//! A [`PointSet`] maps opaque node ids to 2D centroids. Insertion order fixes
//! the integer node index used everywhere downstream; ids are unique.
//!
//! ## Dense Matrices
//! [`SquareMatrix`] is a row-major `n x n` buffer. Graph construction uses it
//! for pairwise distances and adjacency flags, sized once per point set and
//! dropped after the edge list is produced.

mod error;
mod geom;
mod matrix;
mod point_set;

pub use error::Error;
pub use geom::{Point2f, Vec2f};
pub use matrix::SquareMatrix;
pub use point_set::PointSet;
