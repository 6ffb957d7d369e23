use std::collections::HashMap;

use crate::{Error, Point2f};

/// Ordered mapping from node id to centroid.
///
/// Insertion order defines the node index `0..len()` used by graph
/// construction and by the emitted edge lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    ids: Vec<String>,
    points: Vec<Point2f>,
    index: HashMap<String, usize>,
}

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
            points: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Builds a point set from `(id, point)` pairs, rejecting repeated ids.
    pub fn from_pairs<I, S, P>(pairs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (S, P)>,
        S: Into<String>,
        P: Into<Point2f>,
    {
        let mut out = Self::new();
        for (id, p) in pairs {
            out.push(id, p)?;
        }
        Ok(out)
    }

    /// Appends a node and returns its index.
    pub fn push(&mut self, id: impl Into<String>, p: impl Into<Point2f>) -> Result<usize, Error> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(Error::DuplicateNodeId(id));
        }

        let idx = self.points.len();
        self.index.insert(id.clone(), idx);
        self.ids.push(id);
        self.points.push(p.into());
        Ok(idx)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point2f] {
        &self.points
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn id(&self, index: usize) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    pub fn point(&self, index: usize) -> Option<Point2f> {
        self.points.get(index).copied()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Point2f)> {
        self.ids
            .iter()
            .map(String::as_str)
            .zip(self.points.iter().copied())
    }
}
