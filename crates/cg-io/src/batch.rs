use std::path::PathBuf;

use cg_graph::{GraphConfig, build_graph_for};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::render::Visualizer;
use crate::source::{ArtifactKey, PointSetSource, SourceEntry};
use crate::writer::{ArtifactWriter, EdgeListArtifact};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointSetSummary {
    pub nodes: usize,
    pub threshold_edges: usize,
    pub edges: usize,
    pub artifact: PathBuf,
    /// `None` when rendering is off or failed.
    pub rendering: Option<PathBuf>,
}

#[derive(Debug)]
pub struct PointSetOutcome {
    pub key: ArtifactKey,
    pub result: Result<PointSetSummary>,
}

/// Per-point-set outcomes, in source order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<PointSetOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = (&ArtifactKey, &PointSetSummary)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|s| (&o.key, s)))
    }

    pub fn failed(&self) -> impl Iterator<Item = (&ArtifactKey, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.key, e)))
    }

    pub fn num_failed(&self) -> usize {
        self.failed().count()
    }

    pub fn total_edges(&self) -> usize {
        self.succeeded().map(|(_, s)| s.edges).sum()
    }
}

#[derive(Clone, Copy, Default)]
pub struct BatchOptions<'a> {
    pub visualizer: Option<&'a dyn Visualizer>,
    /// Worker threads; `None` uses the global rayon pool.
    pub jobs: Option<usize>,
}

/// Builds and persists one graph per point set of `source`.
///
/// The configuration is validated before anything is read. A failing point
/// set is recorded in the report and does not stop the others.
pub fn run_batch<S, W>(
    source: &S,
    writer: &W,
    cfg: &GraphConfig,
    opts: BatchOptions<'_>,
) -> Result<BatchReport>
where
    S: PointSetSource + ?Sized,
    W: ArtifactWriter + ?Sized,
{
    cfg.validate()?;
    let entries = source.entries()?;
    info!(count = entries.len(), "processing point sets");

    let work = || {
        entries
            .par_iter()
            .map(|entry| PointSetOutcome {
                key: entry.key.clone(),
                result: process_one(source, writer, cfg, opts.visualizer, entry),
            })
            .collect::<Vec<_>>()
    };

    let outcomes = match opts.jobs {
        Some(n) => rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()?
            .install(work),
        None => work(),
    };

    Ok(BatchReport { outcomes })
}

fn process_one<S, W>(
    source: &S,
    writer: &W,
    cfg: &GraphConfig,
    visualizer: Option<&dyn Visualizer>,
    entry: &SourceEntry,
) -> Result<PointSetSummary>
where
    S: PointSetSource + ?Sized,
    W: ArtifactWriter + ?Sized,
{
    let result = build_and_write(source, writer, cfg, visualizer, entry);
    match &result {
        Ok(s) => info!(
            id = %entry.key.id,
            nodes = s.nodes,
            edges = s.edges,
            "point set done"
        ),
        Err(e) => warn!(id = %entry.key.id, error = %e, "point set failed"),
    }
    result
}

fn build_and_write<S, W>(
    source: &S,
    writer: &W,
    cfg: &GraphConfig,
    visualizer: Option<&dyn Visualizer>,
    entry: &SourceEntry,
) -> Result<PointSetSummary>
where
    S: PointSetSource + ?Sized,
    W: ArtifactWriter + ?Sized,
{
    let points = source.load(entry)?;
    let graph = build_graph_for(&points, cfg)?;

    let edges = graph.num_edges();
    let artifact = EdgeListArtifact::new(&entry.key, &points, graph.edges);
    let path = writer.write(&entry.key, &artifact)?;

    // Rendering failures never fail the point set.
    let rendering = visualizer.and_then(|v| {
        v.render(&entry.key, &points, &graph.adjacency)
            .inspect_err(|e| warn!(id = %entry.key.id, error = %e, "rendering failed"))
            .ok()
    });

    Ok(PointSetSummary {
        nodes: points.len(),
        threshold_edges: graph.threshold_edges,
        edges,
        artifact: path,
        rendering,
    })
}
