//! # Stage Observers
//!
//! Optional hooks called after each pipeline stage. They only look at
//! intermediate results; nothing they do can change the conversion.

use drawing_mesh::{CleanupReport, Mesh, OccupancyVolume};
use drawing_profile::{Contour, ContourSet, OccupancyMask};
use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_polygon_mut;
use imageproc::point::Point;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Receives every intermediate product of a conversion. All hooks default to
/// no-ops.
pub trait StageObserver {
    fn binary_mask(&mut self, _mask: &GrayImage) {}

    fn contours(&mut self, _mask: &GrayImage, _contours: &ContourSet) {}

    fn profile_mask(&mut self, _mask: &OccupancyMask) {}

    fn volume(&mut self, _volume: &OccupancyVolume) {}

    fn raw_mesh(&mut self, _mesh: &Mesh) {}

    fn cleaned_mesh(&mut self, _mesh: &Mesh, _report: &CleanupReport) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StageObserver for NoopObserver {}

const MAIN_COLOR: Rgb<u8> = Rgb([0, 160, 0]);
const HOLE_COLOR: Rgb<u8> = Rgb([220, 0, 0]);

/// Writes `binary_mask.png`, `contours.png` and `profile_mask.png` into a
/// directory. Failures are logged and otherwise ignored.
#[derive(Debug, Clone)]
pub struct DebugImageWriter {
    dir: PathBuf,
}

impl DebugImageWriter {
    /// Creates the writer; the directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn save<F>(&self, name: &str, write: F)
    where
        F: FnOnce(&Path) -> image::ImageResult<()>,
    {
        if let Err(err) = std::fs::create_dir_all(&self.dir) {
            warn!("cannot create debug directory {}: {err}", self.dir.display());
            return;
        }
        let path = self.dir.join(name);
        match write(&path) {
            Ok(()) => debug!("wrote {}", path.display()),
            Err(err) => warn!("cannot write debug image {}: {err}", path.display()),
        }
    }
}

impl StageObserver for DebugImageWriter {
    fn binary_mask(&mut self, mask: &GrayImage) {
        self.save("binary_mask.png", |path| mask.save(path));
    }

    fn contours(&mut self, mask: &GrayImage, contours: &ContourSet) {
        let image = render_contours(mask, contours);
        self.save("contours.png", |path| image.save(path));
    }

    fn profile_mask(&mut self, mask: &OccupancyMask) {
        let image = mask.to_image();
        self.save("profile_mask.png", |path| image.save(path));
    }
}

/// Binary mask dimmed to gray with the main contour in green and holes in
/// red.
pub fn render_contours(mask: &GrayImage, contours: &ContourSet) -> RgbImage {
    let mut image = RgbImage::from_fn(mask.width(), mask.height(), |x, y| {
        let v = if mask.get_pixel(x, y)[0] > 0 { 90 } else { 255 };
        Rgb([v, v, v])
    });
    outline(&mut image, contours.main(), MAIN_COLOR);
    for hole in contours.holes() {
        outline(&mut image, hole, HOLE_COLOR);
    }
    image
}

fn outline(image: &mut RgbImage, contour: &Contour, color: Rgb<u8>) {
    let points: Vec<Point<f32>> = contour
        .points()
        .iter()
        .map(|p| Point::new(p.x as f32, p.y as f32))
        .collect();
    if points.len() >= 2 {
        draw_hollow_polygon_mut(image, &points, color);
    }
}
