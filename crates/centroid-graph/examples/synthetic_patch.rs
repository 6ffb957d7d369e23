//! Example: proximity graphs over a synthetic patch of centroids.
//!
//! Scatters centroids on a jittered grid, builds the plain threshold graph and
//! the mutual-kNN capped graph with the same cutoff, and prints degree
//! statistics for both. Optionally writes the capped edge list to disk.
//!
//! Run from the workspace root:
//!   cargo run -p centroid-graph --example synthetic_patch -- --help
//!   cargo run -p centroid-graph --example synthetic_patch -- --out target/demo

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use centroid_graph::{
    ArtifactKey, ArtifactWriter, EdgeListArtifact, FsArtifactWriter, GraphConfig, Point2f,
    PointSet, ProximityGraph, build_graph_for,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Build threshold and mutual-kNN graphs over a synthetic patch")]
struct Args {
    /// Patch side length in pixels
    #[arg(long, default_value_t = 512)]
    size: usize,

    /// Grid spacing between centroids before jitter
    #[arg(long, default_value_t = 18)]
    spacing: usize,

    #[arg(long, default_value_t = 50.0)]
    threshold: f32,

    #[arg(long, default_value_t = 10)]
    max_degree: usize,

    /// Directory for the capped edge list (skipped when absent)
    #[arg(long)]
    out: Option<PathBuf>,
}

fn synthetic_patch(size: usize, spacing: usize) -> Result<PointSet> {
    let spacing = spacing.max(1);
    let mut set = PointSet::new();
    let mut id = 1_usize;
    for y in (spacing / 2..size).step_by(spacing) {
        for x in (spacing / 2..size).step_by(spacing) {
            let jx = ((x * 31 + y * 17) % 11) as f32 - 5.0;
            let jy = ((x * 13 + y * 29) % 11) as f32 - 5.0;
            set.push(id.to_string(), Point2f::new(x as f32 + jx, y as f32 + jy))?;
            id += 1;
        }
    }
    Ok(set)
}

fn report(label: &str, g: &ProximityGraph, elapsed_ms: f64) {
    let mean = if g.num_nodes == 0 {
        0.0
    } else {
        2.0 * g.num_edges() as f64 / g.num_nodes as f64
    };
    println!(
        "{label:>10}: {} edges, mean degree {mean:.2}, max degree {}, {elapsed_ms:.2} ms",
        g.num_edges(),
        g.max_degree()
    );
}

fn main() -> Result<()> {
    let args = Args::parse();
    let set = synthetic_patch(args.size, args.spacing)?;
    println!("{} centroids", set.len());

    let plain = GraphConfig {
        threshold: args.threshold,
        max_degree: args.max_degree,
        knn: false,
    };
    let capped = GraphConfig { knn: true, ..plain };

    let t0 = Instant::now();
    let g_plain = build_graph_for(&set, &plain)?;
    report("threshold", &g_plain, t0.elapsed().as_secs_f64() * 1e3);

    let t1 = Instant::now();
    let g_capped = build_graph_for(&set, &capped)?;
    report("mutual-kNN", &g_capped, t1.elapsed().as_secs_f64() * 1e3);

    if let Some(out) = args.out {
        let key = ArtifactKey::new("synthetic");
        let artifact = EdgeListArtifact::new(&key, &set, g_capped.edges);
        let path = FsArtifactWriter::new(out).write(&key, &artifact)?;
        println!("edge list written to {}", path.display());
    }

    Ok(())
}
