use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid graph configuration: {0}")]
    Config(#[from] cg_graph::ConfigError),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("reading {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parsing detection records in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("building point set from {}", path.display())]
    PointSet {
        path: PathBuf,
        #[source]
        source: cg_core::Error,
    },

    #[error("point set id '{id}' is produced by both {} and {}", first.display(), second.display())]
    DuplicatePointSet {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("creating output directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("writing {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("serializing artifact for '{id}'")]
    Serialize {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("image i/o for {}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("building worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
