//! File-facing collaborators around graph construction.
//!
//! - [`JsonRecordSource`] discovers per-image detection record files and
//!   turns each into a [`cg_core::PointSet`].
//! - [`FsArtifactWriter`] persists one edge list per point set, creating the
//!   output tree on demand and replacing files atomically.
//! - [`PngVisualizer`] optionally renders the graph for inspection.
//! - [`run_batch`] ties them together, processing point sets in parallel
//!   while keeping each point set's failure to itself.

mod batch;
mod error;
mod naming;
mod render;
mod source;
mod writer;

pub use batch::{BatchOptions, BatchReport, PointSetOutcome, PointSetSummary, run_batch};
pub use error::{Error, Result};
pub use naming::{class_label, collect_files, point_set_id};
pub use render::{PngVisualizer, Visualizer};
pub use source::{
    ArtifactKey, JsonRecordSource, PointSetSource, SourceEntry, load_record_file, parse_records,
};
pub use writer::{
    ArtifactFormat, ArtifactWriter, EdgeListArtifact, FsArtifactWriter, OutputLayout, write_atomic,
};
