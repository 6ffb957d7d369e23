use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use cg_graph::{GraphConfig, build_graph_for};
use cg_io::{
    ArtifactFormat, ArtifactKey, BatchOptions, EdgeListArtifact, FsArtifactWriter,
    JsonRecordSource, OutputLayout, PngVisualizer, Visualizer, load_record_file, point_set_id,
    run_batch,
};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{error, info};

/// Run summary written next to the artifacts. Ids end at the first `.`, so no
/// point set can be persisted under this name.
const META_FILE: &str = "run.meta.json";

#[derive(Parser, Debug)]
#[command(name = "centroid_graph")]
#[command(about = "Build proximity graphs from detected centroids and save them as edge lists")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process every record file under a directory.
    #[command(name = "build")]
    Build(BuildArgs),
    /// Build the graph of a single record file and print it.
    #[command(name = "inspect")]
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone)]
struct GraphArgs {
    /// Distance cutoff; pairs strictly closer are connected.
    #[arg(long, default_value_t = 50.0)]
    threshold: f32,
    /// Neighbour cap for mutual-kNN pruning.
    #[arg(long, default_value_t = 10)]
    max_degree: usize,
    /// Apply mutual-kNN pruning (`--knn false` keeps the plain threshold graph).
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    knn: bool,
}

impl GraphArgs {
    fn config(&self) -> GraphConfig {
        GraphConfig {
            threshold: self.threshold,
            max_degree: self.max_degree,
            knn: self.knn,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct BuildArgs {
    #[command(flatten)]
    graph: GraphArgs,
    /// Directory holding per-image detection record files (searched recursively).
    #[arg(long, required = true)]
    json_dir: PathBuf,
    /// Output directory for edge lists; created if missing.
    #[arg(long, default_value = "data/graphs")]
    out: PathBuf,
    #[arg(long, value_enum, default_value_t = LayoutArg::Flat)]
    layout: LayoutArg,
    #[arg(long, value_enum, default_value_t = FormatArg::Json)]
    format: FormatArg,
    /// Render each graph to `<out>/render/<id>.png`.
    #[arg(long)]
    draw: bool,
    /// Patch images used as rendering background (`<dir>/<id>.png`).
    #[arg(long, requires = "draw")]
    image_dir: Option<PathBuf>,
    /// Worker threads (defaults to one per core).
    #[arg(long)]
    jobs: Option<usize>,
}

#[derive(Args, Debug, Clone)]
struct InspectArgs {
    #[command(flatten)]
    graph: GraphArgs,
    #[arg(long, required = true)]
    input: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum LayoutArg {
    Flat,
    ByClass,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum FormatArg {
    Json,
    Csv,
}

#[derive(Debug, Clone, Serialize)]
struct MetaBuild {
    json_dir: PathBuf,
    config: GraphConfig,
    layout: &'static str,
    format: &'static str,
    draw: bool,
    point_sets: usize,
    failed: Vec<FailureDto>,
    total_edges: usize,
}

#[derive(Debug, Clone, Serialize)]
struct FailureDto {
    id: String,
    error: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::Build(args) => run_build(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run_build(args: BuildArgs) -> Result<()> {
    let cfg = args.graph.config();
    cfg.validate().context("rejecting graph configuration")?;
    ensure_dir_exists(&args.json_dir, "json")?;

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output directory {}", args.out.display()))?;

    let (layout, layout_name) = match args.layout {
        LayoutArg::Flat => (OutputLayout::Flat, "flat"),
        LayoutArg::ByClass => (OutputLayout::ByClass, "by-class"),
    };
    let format = match args.format {
        FormatArg::Json => ArtifactFormat::Json,
        FormatArg::Csv => ArtifactFormat::Csv,
    };

    let source = JsonRecordSource::new(&args.json_dir);
    let writer = FsArtifactWriter::new(&args.out)
        .with_layout(layout)
        .with_format(format);

    let visualizer = args.draw.then(|| {
        let vis = PngVisualizer::new(args.out.join("render"));
        match &args.image_dir {
            Some(dir) => vis.with_image_dir(dir),
            None => vis,
        }
    });

    let report = run_batch(
        &source,
        &writer,
        &cfg,
        BatchOptions {
            visualizer: visualizer.as_ref().map(|v| v as &dyn Visualizer),
            jobs: args.jobs,
        },
    )
    .with_context(|| format!("processing {}", args.json_dir.display()))?;

    let failed: Vec<FailureDto> = report
        .failed()
        .map(|(key, err)| FailureDto {
            id: key.id.clone(),
            error: describe(err),
        })
        .collect();
    for f in &failed {
        error!(id = %f.id, "{}", f.error);
    }

    let meta_path = args.out.join(META_FILE);
    write_json(
        &meta_path,
        &MetaBuild {
            json_dir: args.json_dir.clone(),
            config: cfg,
            layout: layout_name,
            format: format.extension(),
            draw: args.draw,
            point_sets: report.outcomes.len(),
            failed: failed.clone(),
            total_edges: report.total_edges(),
        },
    )?;

    info!(
        point_sets = report.outcomes.len(),
        failed = failed.len(),
        total_edges = report.total_edges(),
        "batch finished"
    );

    if !failed.is_empty() {
        bail!(
            "{} of {} point sets failed; see {}",
            failed.len(),
            report.outcomes.len(),
            meta_path.display()
        );
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let cfg = args.graph.config();
    cfg.validate().context("rejecting graph configuration")?;
    ensure_file_exists(&args.input, "input")?;

    let name = args
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("input path has no file name: {}", args.input.display()))?;
    let Some(id) = point_set_id(name) else {
        bail!("cannot derive a point set id from '{name}'");
    };
    let key = ArtifactKey::new(id);

    let points = load_record_file(&args.input)
        .with_context(|| format!("loading records from {}", args.input.display()))?;
    let graph = build_graph_for(&points, &cfg)?;

    let artifact = EdgeListArtifact::new(&key, &points, graph.edges);
    let json = serde_json::to_string_pretty(&artifact).context("serializing edge list")?;
    println!("{json}");
    Ok(())
}

/// Error message followed by its source chain, `: `-separated.
fn describe(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut cur = err.source();
    while let Some(e) = cur {
        out.push_str(": ");
        out.push_str(&e.to_string());
        cur = e.source();
    }
    out
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}

fn ensure_dir_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} directory does not exist: {}", what, path.display());
    }
    if !path.is_dir() {
        bail!("{} path is not a directory: {}", what, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use cg_io::{ArtifactFormat, ArtifactKey, FsArtifactWriter, OutputLayout, point_set_id};

    use super::META_FILE;

    #[test]
    fn run_summary_never_shadows_an_artifact() {
        let id = point_set_id(META_FILE).expect("id");
        assert_ne!(format!("{id}.json"), META_FILE);

        for layout in [OutputLayout::Flat, OutputLayout::ByClass] {
            for format in [ArtifactFormat::Json, ArtifactFormat::Csv] {
                let writer = FsArtifactWriter::new("out")
                    .with_layout(layout)
                    .with_format(format);
                let path = writer.artifact_path(&ArtifactKey::new(id));
                assert_ne!(path, writer.out_dir().join(META_FILE));
            }
        }
    }
}
