use core::fmt;

/// Failures when assembling a [`crate::PointSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A detection id was inserted twice into the same point set.
    DuplicateNodeId(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateNodeId(id) => write!(f, "detection id '{id}' appears more than once"),
        }
    }
}

impl std::error::Error for Error {}
