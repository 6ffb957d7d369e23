use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use cg_core::{Point2f, PointSet};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::naming::{class_label, collect_files, point_set_id};

/// Identifies one point set and, through it, its output artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactKey {
    pub id: String,
    pub class: Option<String>,
}

impl ArtifactKey {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let class = class_label(&id).map(str::to_owned);
        Self { id, class }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub key: ArtifactKey,
    pub path: PathBuf,
}

/// Supplies the point sets of a batch.
pub trait PointSetSource: Sync {
    /// Lists the available point sets in a stable order.
    fn entries(&self) -> Result<Vec<SourceEntry>>;

    fn load(&self, entry: &SourceEntry) -> Result<PointSet>;
}

/// Directory of per-image detection record files (`*.json`).
///
/// Each file holds a `nuc` object keyed by nucleus id whose values carry a
/// `centroid: [x, y]`; the object's key order becomes the node order.
#[derive(Debug, Clone)]
pub struct JsonRecordSource {
    root: PathBuf,
}

impl JsonRecordSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PointSetSource for JsonRecordSource {
    fn entries(&self) -> Result<Vec<SourceEntry>> {
        let files = collect_files(&self.root, "json")?;
        let mut seen: HashMap<String, PathBuf> = HashMap::with_capacity(files.len());
        let mut out = Vec::with_capacity(files.len());

        for path in files {
            let Some(id) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(point_set_id)
            else {
                warn!(path = %path.display(), "skipping record file without a usable id");
                continue;
            };

            if let Some(first) = seen.get(id) {
                return Err(Error::DuplicatePointSet {
                    id: id.to_owned(),
                    first: first.clone(),
                    second: path,
                });
            }
            seen.insert(id.to_owned(), path.clone());

            out.push(SourceEntry {
                key: ArtifactKey::new(id),
                path,
            });
        }

        debug!(root = %self.root.display(), count = out.len(), "record files discovered");
        Ok(out)
    }

    fn load(&self, entry: &SourceEntry) -> Result<PointSet> {
        load_record_file(&entry.path)
    }
}

pub fn load_record_file(path: &Path) -> Result<PointSet> {
    let bytes = fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&bytes, path)
}

#[derive(Debug, Deserialize)]
struct RecordFile {
    #[serde(default)]
    nuc: Option<Map<String, Value>>,
}

/// Parses a detection record document into a point set.
///
/// Entries without a centroid of exactly two finite numbers are skipped.
/// `origin` is only used for error reporting.
pub fn parse_records(bytes: &[u8], origin: &Path) -> Result<PointSet> {
    let record: RecordFile = serde_json::from_slice(bytes).map_err(|source| Error::Parse {
        path: origin.to_path_buf(),
        source,
    })?;

    let Some(nuc) = record.nuc else {
        return Ok(PointSet::new());
    };

    let mut set = PointSet::with_capacity(nuc.len());
    let mut skipped = 0_usize;
    for (id, value) in &nuc {
        let Some(p) = value.get("centroid").and_then(centroid_from_value) else {
            skipped += 1;
            continue;
        };
        set.push(id.as_str(), p).map_err(|source| Error::PointSet {
            path: origin.to_path_buf(),
            source,
        })?;
    }

    if skipped > 0 {
        debug!(
            path = %origin.display(),
            skipped,
            kept = set.len(),
            "records without a finite centroid skipped"
        );
    }
    Ok(set)
}

fn centroid_from_value(v: &Value) -> Option<Point2f> {
    let [x, y] = v.as_array()?.as_slice() else {
        return None;
    };
    let p = Point2f::new(x.as_f64()? as f32, y.as_f64()? as f32);
    p.is_finite().then_some(p)
}
