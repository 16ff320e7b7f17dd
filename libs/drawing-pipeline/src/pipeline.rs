//! # Conversion Pipeline
//!
//! ```text
//! path ─► load ─► binarize ─► contours ─► profile mask ─► extrude
//!                                                           │
//!   ConversionOutcome::Mesh ◄── clean ◄── isosurface ◄──────┘
//!                                   └──► ConversionOutcome::NoMesh
//! ```
//!
//! Every stage consumes its input completely before the next one starts.
//! Each call allocates fresh buffers, so a failed conversion leaves nothing
//! behind for the next one.

use crate::error::PipelineError;
use crate::observer::StageObserver;
use crate::outcome::{ConversionOutcome, ConversionReport, ConvertedMesh, StageTiming};
use config::constants::DEFAULT_COLOR;
use config::ConversionConfig;
use drawing_mesh::{IsosurfaceMesher, MeshCleaner, OccupancyVolume};
use drawing_profile::{
    binarize, build_profile_mask, extract_contours, foreground_count, load_grayscale,
};
use image::GrayImage;
use log::{debug, info, warn};
use std::path::Path;
use std::time::Instant;

/// Validated configuration plus the stage objects built from it.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: ConversionConfig,
    mesher: IsosurfaceMesher,
    cleaner: MeshCleaner,
}

impl Pipeline {
    /// Builds a pipeline, rejecting out-of-range settings up front.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Config`] naming the first invalid field.
    pub fn new(config: ConversionConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            mesher: IsosurfaceMesher::new(config.isolevel(), &config.mesher),
            cleaner: MeshCleaner::new(config.cleanup),
            config,
        })
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Loads the drawing at `path` and converts it.
    pub fn convert_path(
        &self,
        path: impl AsRef<Path>,
        observer: &mut dyn StageObserver,
    ) -> Result<ConversionOutcome, PipelineError> {
        let path = path.as_ref();
        let start = Instant::now();
        let raster = load_grayscale(path)?;
        let load = StageTiming {
            stage: "load".into(),
            millis: millis(start),
        };
        info!(
            "loaded {} ({}x{}) in {:.1} ms",
            path.display(),
            raster.width(),
            raster.height(),
            load.millis
        );
        self.binarize_and_run(&raster, observer, vec![load])
    }

    /// Converts a grayscale drawing (dark ink on light paper).
    pub fn convert_raster(
        &self,
        raster: &GrayImage,
        observer: &mut dyn StageObserver,
    ) -> Result<ConversionOutcome, PipelineError> {
        self.binarize_and_run(raster, observer, Vec::new())
    }

    /// Converts an already binarized mask (non-zero = material).
    pub fn convert_binary_mask(
        &self,
        mask: &GrayImage,
        observer: &mut dyn StageObserver,
    ) -> Result<ConversionOutcome, PipelineError> {
        self.run(mask, observer, Vec::new())
    }

    fn binarize_and_run(
        &self,
        raster: &GrayImage,
        observer: &mut dyn StageObserver,
        mut timings: Vec<StageTiming>,
    ) -> Result<ConversionOutcome, PipelineError> {
        let start = Instant::now();
        let mask = binarize(raster, &self.config.binarize)?;
        timings.push(StageTiming {
            stage: "binarize".into(),
            millis: millis(start),
        });
        self.run(&mask, observer, timings)
    }

    fn run(
        &self,
        mask: &GrayImage,
        observer: &mut dyn StageObserver,
        mut timings: Vec<StageTiming>,
    ) -> Result<ConversionOutcome, PipelineError> {
        let cfg = &self.config;
        let mut report = ConversionReport {
            image_width: mask.width(),
            image_height: mask.height(),
            foreground_pixels: foreground_count(mask),
            isolevel: self.mesher.level(),
            ..Default::default()
        };
        observer.binary_mask(mask);

        let mut clock = Clock::start(&mut timings);

        let contours = extract_contours(mask, &cfg.contour)?;
        clock.lap("contours");
        report.main_contour_area = contours.main().area();
        report.main_contour_points = contours.main().len();
        report.hole_areas = contours.holes().iter().map(|h| h.area()).collect();
        observer.contours(mask, &contours);

        let profile = build_profile_mask(&contours, mask.width(), mask.height(), &cfg.profile);
        clock.lap("profile");
        report.hole_ratio = profile.hole_ratio();
        info!(
            "profile mask: {:.1}% material, hole ratio {:.3}",
            profile.material_ratio() * 100.0,
            report.hole_ratio
        );
        observer.profile_mask(&profile);

        let volume =
            OccupancyVolume::extrude(&profile, cfg.extrusion.depth, cfg.extrusion.policy)?;
        clock.lap("extrude");
        let (height, width, depth) = volume.shape();
        let (min, max) = volume.value_range();
        report.volume_shape = [height, width, depth];
        report.material_fraction = volume.fraction_above(self.mesher.level());
        info!(
            "volume {}x{}x{} ({:?}): values [{}, {}], {:.2}% above level {}",
            height,
            width,
            depth,
            cfg.extrusion.policy,
            min,
            max,
            report.material_fraction * 100.0,
            self.mesher.level()
        );
        observer.volume(&volume);

        let extracted = self.mesher.extract(&volume);
        clock.lap("isosurface");
        drop(volume);
        let mut mesh = match extracted {
            Ok(mesh) => mesh,
            Err(reason) => {
                warn!("no mesh produced: {reason}");
                return Ok(ConversionOutcome::NoMesh { reason });
            }
        };
        report.raw_vertices = mesh.vertex_count();
        report.raw_triangles = mesh.triangle_count();
        observer.raw_mesh(&mesh);

        report.cleanup = self.cleaner.clean(&mut mesh);
        clock.lap("cleanup");
        mesh.set_uniform_color(DEFAULT_COLOR);
        observer.cleaned_mesh(&mesh, &report.cleanup);

        report.timings = timings;
        info!(
            "mesh: {} vertices, {} triangles (raw {} / {}), {:.1} ms",
            mesh.vertex_count(),
            mesh.triangle_count(),
            report.raw_vertices,
            report.raw_triangles,
            report.total_millis()
        );
        Ok(ConversionOutcome::Mesh(ConvertedMesh { mesh, report }))
    }
}

/// Records the time since the previous lap under a stage name.
struct Clock<'a> {
    last: Instant,
    timings: &'a mut Vec<StageTiming>,
}

impl<'a> Clock<'a> {
    fn start(timings: &'a mut Vec<StageTiming>) -> Self {
        Self {
            last: Instant::now(),
            timings,
        }
    }

    fn lap(&mut self, stage: &str) {
        let millis = millis(self.last);
        debug!("{stage}: {millis:.1} ms");
        self.timings.push(StageTiming {
            stage: stage.to_string(),
            millis,
        });
        self.last = Instant::now();
    }
}

fn millis(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1e3
}
