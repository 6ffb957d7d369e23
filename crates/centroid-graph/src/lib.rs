//! Umbrella crate for the `centroid-graph` workspace.
//!
//! Re-exports the point-set primitives, the graph construction pipeline and
//! the file-facing collaborators (record source, artifact writer, renderer).
//! The two error types stay behind their crate paths (`cg_core::Error`,
//! `cg_io::Error`).

pub use cg_core::{self, Point2f, PointSet, SquareMatrix, Vec2f};
pub use cg_graph::*;
pub use cg_io::{
    self, ArtifactFormat, ArtifactKey, ArtifactWriter, BatchOptions, BatchReport,
    EdgeListArtifact, FsArtifactWriter, JsonRecordSource, OutputLayout, PngVisualizer,
    PointSetOutcome, PointSetSource, PointSetSummary, SourceEntry, Visualizer, class_label,
    collect_files, load_record_file, parse_records, point_set_id, run_batch, write_atomic,
};
