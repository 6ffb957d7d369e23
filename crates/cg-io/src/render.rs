use std::path::{Path, PathBuf};

use cg_core::{Point2f, PointSet};
use cg_graph::AdjacencyRelation;
use image::{Rgb, RgbImage};
use tracing::debug;

use crate::error::{Error, Result};
use crate::source::ArtifactKey;
use crate::writer::write_atomic;

const NODE_COLOR: Rgb<u8> = Rgb([173, 216, 230]);
const EDGE_COLOR: Rgb<u8> = Rgb([70, 110, 170]);
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const MARGIN: f32 = 16.0;
const MAX_CANVAS: u32 = 8192;

/// Optional rendering of a finished graph. Never affects the edge list.
pub trait Visualizer: Sync {
    fn render(
        &self,
        key: &ArtifactKey,
        points: &PointSet,
        adjacency: &AdjacencyRelation,
    ) -> Result<PathBuf>;
}

/// Draws nodes and edges into `<out>/<id>.png`.
///
/// With an image directory configured and `<image_dir>/<id>.png` present,
/// the graph is overlaid on that patch in pixel coordinates; otherwise a
/// white canvas spanning the points' bounding box is used.
#[derive(Debug, Clone)]
pub struct PngVisualizer {
    out_dir: PathBuf,
    image_dir: Option<PathBuf>,
}

impl PngVisualizer {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            image_dir: None,
        }
    }

    pub fn with_image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.image_dir = Some(dir.into());
        self
    }

    pub fn output_path(&self, key: &ArtifactKey) -> PathBuf {
        self.out_dir.join(format!("{}.png", key.id))
    }

    fn background(&self, key: &ArtifactKey) -> Result<Option<RgbImage>> {
        let Some(dir) = &self.image_dir else {
            return Ok(None);
        };
        let path = dir.join(format!("{}.png", key.id));
        if !path.is_file() {
            debug!(path = %path.display(), "no background patch, using blank canvas");
            return Ok(None);
        }
        let img = image::open(&path).map_err(|source| Error::Image {
            path: path.clone(),
            source,
        })?;
        Ok(Some(img.to_rgb8()))
    }
}

impl Visualizer for PngVisualizer {
    fn render(
        &self,
        key: &ArtifactKey,
        points: &PointSet,
        adjacency: &AdjacencyRelation,
    ) -> Result<PathBuf> {
        let canvas = match self.background(key)? {
            Some(img) => Canvas::over(img),
            None => Canvas::blank(points.points()),
        };
        let img = canvas.draw(points.points(), adjacency);

        let path = self.output_path(key);
        save_png(&path, &img)?;
        Ok(path)
    }
}

struct Canvas {
    img: RgbImage,
    origin: Point2f,
}

impl Canvas {
    fn over(img: RgbImage) -> Self {
        Self {
            img,
            origin: Point2f::default(),
        }
    }

    fn blank(points: &[Point2f]) -> Self {
        let mut min = Point2f::new(f32::INFINITY, f32::INFINITY);
        let mut max = Point2f::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for p in points.iter().filter(|p| p.is_finite()) {
            min = Point2f::new(min.x.min(p.x), min.y.min(p.y));
            max = Point2f::new(max.x.max(p.x), max.y.max(p.y));
        }
        if !min.is_finite() {
            min = Point2f::default();
            max = Point2f::default();
        }

        let width = canvas_extent(max.x - min.x);
        let height = canvas_extent(max.y - min.y);
        Self {
            img: RgbImage::from_pixel(width, height, BACKGROUND),
            origin: Point2f::new(min.x - MARGIN, min.y - MARGIN),
        }
    }

    fn draw(mut self, points: &[Point2f], adjacency: &AdjacencyRelation) -> RgbImage {
        for (i, j) in adjacency.iter_edges() {
            let (a, b) = (points[i], points[j]);
            if a.is_finite() && b.is_finite() {
                let (la, lb) = (self.local(a), self.local(b));
                draw_line(&mut self.img, la, lb, EDGE_COLOR);
            }
        }
        for &p in points.iter().filter(|p| p.is_finite()) {
            let q = self.local(p);
            draw_dot(&mut self.img, q.x, q.y, NODE_COLOR);
        }
        self.img
    }

    fn local(&self, p: Point2f) -> Point2f {
        Point2f::new(p.x - self.origin.x, p.y - self.origin.y)
    }
}

fn canvas_extent(span: f32) -> u32 {
    let v = (span + 2.0 * MARGIN).ceil().max(1.0);
    (v as u32).min(MAX_CANVAS)
}

fn save_png(path: &Path, img: &RgbImage) -> Result<()> {
    let mut bytes = std::io::Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageFormat::Png)
        .map_err(|source| Error::Image {
            path: path.to_path_buf(),
            source,
        })?;
    write_atomic(path, bytes.get_ref())
}

/// Samples the segment once per pixel, after clipping it to the image.
fn draw_line(img: &mut RgbImage, a: Point2f, b: Point2f, color: Rgb<u8>) {
    let Some((a, b)) = clip_segment(img, a, b) else {
        return;
    };
    let d = b - a;
    let steps = d.x.abs().max(d.y.abs()).ceil().max(1.0) as usize;
    for s in 0..=steps {
        let t = s as f32 / steps as f32;
        put(img, (a.x + d.x * t).round() as i64, (a.y + d.y * t).round() as i64, color);
    }
}

/// Liang-Barsky clip of `a..b` against the image rectangle (one pixel of slack).
fn clip_segment(img: &RgbImage, a: Point2f, b: Point2f) -> Option<(Point2f, Point2f)> {
    let (ax, ay) = (f64::from(a.x), f64::from(a.y));
    let (dx, dy) = (f64::from(b.x) - ax, f64::from(b.y) - ay);
    let (xmax, ymax) = (f64::from(img.width()), f64::from(img.height()));
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [(-dx, ax + 1.0), (dx, xmax - ax), (-dy, ay + 1.0), (dy, ymax - ay)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f64| Point2f::new((ax + dx * t) as f32, (ay + dy * t) as f32);
    Some((at(t0), at(t1)))
}

fn draw_dot(img: &mut RgbImage, x: f32, y: f32, color: Rgb<u8>) {
    let xi = x.round() as i64;
    let yi = y.round() as i64;

    for dy in -1..=1 {
        for dx in -1..=1 {
            put(img, xi + dx, yi + dy, color);
        }
    }
}

#[inline]
fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x < 0 || y < 0 {
        return;
    }
    let (ux, uy) = (x as u64, y as u64);
    if ux >= u64::from(img.width()) || uy >= u64::from(img.height()) {
        return;
    }
    img.put_pixel(ux as u32, uy as u32, color);
}

#[cfg(test)]
mod tests {
    use cg_core::{Point2f, PointSet};
    use cg_graph::{GraphConfig, build_graph_for};
    use image::{Rgb, RgbImage};

    use super::{BACKGROUND, EDGE_COLOR, NODE_COLOR, PngVisualizer, Visualizer, draw_line};
    use crate::ArtifactKey;

    fn triangle() -> PointSet {
        PointSet::from_pairs([
            ("a", Point2f::new(10.0, 10.0)),
            ("b", Point2f::new(40.0, 10.0)),
            ("c", Point2f::new(10.0, 30.0)),
        ])
        .expect("unique ids")
    }

    #[test]
    fn blank_canvas_covers_points() {
        let td = tempfile::tempdir().expect("tempdir");
        let set = triangle();
        let graph = build_graph_for(&set, &GraphConfig::default()).expect("valid config");

        let vis = PngVisualizer::new(td.path().join("png"));
        let key = ArtifactKey::new("tri");
        let path = vis.render(&key, &set, &graph.adjacency).expect("render");
        assert_eq!(path, td.path().join("png/tri.png"));

        let img = image::open(&path).expect("png").to_rgb8();
        assert_eq!(img.dimensions(), (30 + 32, 20 + 32));
        // (10, 10) lands at the margin offset.
        assert_eq!(*img.get_pixel(16, 16), NODE_COLOR);
        // Midpoint of the a-b edge.
        assert_eq!(*img.get_pixel(31, 16), EDGE_COLOR);
        assert_eq!(*img.get_pixel(0, 0), BACKGROUND);
    }

    #[test]
    fn overlays_background_patch() {
        let td = tempfile::tempdir().expect("tempdir");
        let patches = td.path().join("imgs");
        std::fs::create_dir_all(&patches).expect("mkdir");
        RgbImage::from_pixel(64, 48, Rgb([0, 0, 0]))
            .save(patches.join("tri.png"))
            .expect("save background");

        let set = triangle();
        let graph = build_graph_for(&set, &GraphConfig::default()).expect("valid config");
        let vis = PngVisualizer::new(td.path()).with_image_dir(&patches);
        let path = vis
            .render(&ArtifactKey::new("tri"), &set, &graph.adjacency)
            .expect("render");

        let img = image::open(&path).expect("png").to_rgb8();
        assert_eq!(img.dimensions(), (64, 48));
        assert_eq!(*img.get_pixel(10, 10), NODE_COLOR);
        assert_eq!(*img.get_pixel(63, 47), Rgb([0, 0, 0]));
    }

    #[test]
    fn empty_and_non_finite_sets_render() {
        let td = tempfile::tempdir().expect("tempdir");
        let set = PointSet::from_pairs([("x", Point2f::new(f32::NAN, 1.0))]).expect("unique ids");
        let graph = build_graph_for(&set, &GraphConfig::default()).expect("valid config");

        let path = PngVisualizer::new(td.path())
            .render(&ArtifactKey::new("nan"), &set, &graph.adjacency)
            .expect("render");
        let img = image::open(&path).expect("png").to_rgb8();
        assert_eq!(img.dimensions(), (32, 32));
    }

    #[test]
    fn long_edges_are_clipped_to_the_canvas() {
        let mut img = RgbImage::from_pixel(10, 10, BACKGROUND);
        draw_line(
            &mut img,
            Point2f::new(-1.0e6, 5.0),
            Point2f::new(1.0e6, 5.0),
            EDGE_COLOR,
        );
        for x in 0..10 {
            assert_eq!(*img.get_pixel(x, 5), EDGE_COLOR);
        }
        assert_eq!(*img.get_pixel(5, 4), BACKGROUND);

        // Entirely outside: nothing drawn.
        let mut img = RgbImage::from_pixel(10, 10, BACKGROUND);
        draw_line(
            &mut img,
            Point2f::new(-1.0e6, -50.0),
            Point2f::new(1.0e6, -50.0),
            EDGE_COLOR,
        );
        assert!(img.pixels().all(|p| *p == BACKGROUND));
    }
}
