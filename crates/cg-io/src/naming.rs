use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Point-set id for a record file: its name up to the first `.`.
///
/// `patch-3-HP_1.json` -> `patch-3-HP_1`, `tile.v2.json` -> `tile`.
/// Returns `None` when that prefix is empty.
pub fn point_set_id(file_name: &str) -> Option<&str> {
    let id = file_name.split('.').next().unwrap_or(file_name);
    (!id.is_empty()).then_some(id)
}

/// Class label embedded in a point-set id: the segment after the last `-`,
/// cut at the first `_`. `case-17-NCM_4` -> `NCM`.
pub fn class_label(id: &str) -> Option<&str> {
    let (_, tail) = id.rsplit_once('-')?;
    let label = tail.split('_').next().unwrap_or(tail);
    (!label.is_empty()).then_some(label)
}

/// Recursively collects files with extension `ext` (case-insensitive)
/// under `root`, sorted by path.
pub fn collect_files(root: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    let mut out = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = fs::read_dir(&dir).map_err(|source| Error::Read {
            path: dir.clone(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| Error::Read {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(ext))
            {
                out.push(path);
            }
        }
    }

    out.sort();
    Ok(out)
}
