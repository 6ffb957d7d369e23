use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use cg_core::PointSet;
use cg_graph::EdgeList;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::source::ArtifactKey;

/// Persisted form of one point set's graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeListArtifact {
    pub id: String,
    /// Node ids in index order; edge endpoints index into this list.
    pub nodes: Vec<String>,
    pub edges: EdgeList,
}

impl EdgeListArtifact {
    pub fn new(key: &ArtifactKey, points: &PointSet, edges: EdgeList) -> Self {
        Self {
            id: key.id.clone(),
            nodes: points.ids().to_vec(),
            edges,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputLayout {
    /// `<out>/<id>.<ext>`
    #[default]
    Flat,
    /// `<out>/<class>/<id>.<ext>`, flat when the id carries no class.
    ByClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtifactFormat {
    #[default]
    Json,
    Csv,
}

impl ArtifactFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Persists edge-list artifacts.
pub trait ArtifactWriter: Sync {
    /// Writes the artifact for `key` and returns where it landed.
    fn write(&self, key: &ArtifactKey, artifact: &EdgeListArtifact) -> Result<PathBuf>;
}

#[derive(Debug, Clone)]
pub struct FsArtifactWriter {
    out_dir: PathBuf,
    layout: OutputLayout,
    format: ArtifactFormat,
}

impl FsArtifactWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            layout: OutputLayout::default(),
            format: ArtifactFormat::default(),
        }
    }

    pub fn with_layout(mut self, layout: OutputLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_format(mut self, format: ArtifactFormat) -> Self {
        self.format = format;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn artifact_path(&self, key: &ArtifactKey) -> PathBuf {
        let dir = match (self.layout, key.class.as_deref()) {
            (OutputLayout::ByClass, Some(class)) => self.out_dir.join(class),
            _ => self.out_dir.clone(),
        };
        dir.join(format!("{}.{}", key.id, self.format.extension()))
    }

    fn encode(&self, artifact: &EdgeListArtifact) -> Result<Vec<u8>> {
        match self.format {
            ArtifactFormat::Json => {
                serde_json::to_vec_pretty(artifact).map_err(|source| Error::Serialize {
                    id: artifact.id.clone(),
                    source,
                })
            }
            ArtifactFormat::Csv => {
                let mut buf = Vec::with_capacity(16 + artifact.edges.len() * 12);
                // Writing into a Vec cannot fail.
                let _ = writeln!(buf, "source,target");
                for &(i, j) in &artifact.edges {
                    let _ = writeln!(buf, "{i},{j}");
                }
                Ok(buf)
            }
        }
    }
}

impl ArtifactWriter for FsArtifactWriter {
    fn write(&self, key: &ArtifactKey, artifact: &EdgeListArtifact) -> Result<PathBuf> {
        let path = self.artifact_path(key);
        let bytes = self.encode(artifact)?;
        write_atomic(&path, &bytes)?;
        debug!(path = %path.display(), edges = artifact.edges.len(), "artifact written");
        Ok(path)
    }
}

/// Creates missing parent directories, writes `bytes` next to `path` and
/// renames over it, so readers never observe a partial file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    let result = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, path));
    if let Err(source) = result {
        let _ = fs::remove_file(&tmp);
        return Err(Error::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}
