use config::constants::DEFAULT_COLOR;
use config::{ContourPolicy, ConversionConfig, ExtrusionPolicy};
use drawing_mesh::{CleanupReport, Mesh, MeshExtractionError, OccupancyVolume};
use drawing_pipeline::{
    ConversionOutcome, ConvertedMesh, DebugImageWriter, NoopObserver, Pipeline, PipelineError,
    StageObserver,
};
use drawing_profile::{ContourError, ContourSet, InputError, OccupancyMask};
use image::{GrayImage, Luma};

// =============================================================================
// FIXTURES
// =============================================================================

/// 100×100 binary mask: filled 60×60 square minus a centred 10×10 hole.
fn square_with_hole() -> GrayImage {
    GrayImage::from_fn(100, 100, |x, y| {
        let square = (20..80).contains(&x) && (20..80).contains(&y);
        let hole = (45..55).contains(&x) && (45..55).contains(&y);
        if square && !hole {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

fn config(edit: impl FnOnce(&mut ConversionConfig)) -> ConversionConfig {
    let mut cfg = ConversionConfig::default();
    cfg.extrusion.depth = 20;
    edit(&mut cfg);
    cfg
}

fn convert_mask(cfg: ConversionConfig, mask: &GrayImage) -> ConvertedMesh {
    Pipeline::new(cfg)
        .unwrap()
        .convert_binary_mask(mask, &mut NoopObserver)
        .unwrap()
        .into_mesh()
        .expect("mesh")
}

/// Remembers which stages ran.
#[derive(Default)]
struct Recorder {
    stages: Vec<&'static str>,
    volume_range: Option<(f32, f32)>,
}

impl StageObserver for Recorder {
    fn binary_mask(&mut self, _mask: &GrayImage) {
        self.stages.push("binary_mask");
    }

    fn contours(&mut self, _mask: &GrayImage, _contours: &ContourSet) {
        self.stages.push("contours");
    }

    fn profile_mask(&mut self, _mask: &OccupancyMask) {
        self.stages.push("profile_mask");
    }

    fn volume(&mut self, volume: &OccupancyVolume) {
        self.stages.push("volume");
        self.volume_range = Some(volume.value_range());
    }

    fn raw_mesh(&mut self, _mesh: &Mesh) {
        self.stages.push("raw_mesh");
    }

    fn cleaned_mesh(&mut self, _mesh: &Mesh, _report: &CleanupReport) {
        self.stages.push("cleaned_mesh");
    }
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn square_with_hole_has_a_through_hole() {
    let converted = convert_mask(config(|_| {}), &square_with_hole());
    let mesh = &converted.mesh;
    let report = &converted.report;

    assert!(mesh.triangle_count() > 0);
    assert_eq!(report.hole_count(), 1);
    assert_eq!(report.volume_shape, [100, 100, 20]);
    assert_eq!(report.isolevel, 0.5);

    // Without end caps the outer wall and the hole wall are separate tubes.
    assert_eq!(report.cleanup.components, 2);
    assert_eq!(report.cleanup.non_manifold_edges, 0);

    // The hole wall runs through the full depth.
    let (min, max) = mesh.bounding_box();
    let near_axis: Vec<f64> = mesh
        .vertices()
        .iter()
        .filter(|v| v.x.abs() < 50.0 && v.y.abs() < 50.0)
        .map(|v| v.z)
        .collect();
    assert!(!near_axis.is_empty());
    let wall_min = near_axis.iter().copied().fold(f64::INFINITY, f64::min);
    let wall_max = near_axis.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert!(wall_max - wall_min > 0.9 * (max.z - min.z));
}

#[test]
fn padded_square_with_hole_is_genus_one() {
    let converted = convert_mask(config(|c| c.mesher.pad_boundary = true), &square_with_hole());
    let cleanup = converted.report.cleanup;

    assert!(cleanup.watertight);
    assert_eq!(cleanup.components, 1);
    assert_eq!(cleanup.euler_characteristic, 0);
}

#[test]
fn all_zero_mask_stops_before_extrusion() {
    let pipeline = Pipeline::new(config(|_| {})).unwrap();
    let mut recorder = Recorder::default();

    let err = pipeline
        .convert_binary_mask(&GrayImage::new(100, 100), &mut recorder)
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Contour(ContourError::NotFound { .. })
    ));
    assert_eq!(recorder.stages, vec!["binary_mask"]);
}

#[test]
fn all_foreground_mask_produces_no_mesh() {
    let pipeline = Pipeline::new(config(|_| {})).unwrap();
    let mut recorder = Recorder::default();
    let full = GrayImage::from_pixel(100, 100, Luma([255]));

    let outcome = pipeline.convert_binary_mask(&full, &mut recorder).unwrap();

    match outcome {
        ConversionOutcome::NoMesh {
            reason: MeshExtractionError::NoSurface { min, max, .. },
        } => {
            assert_eq!(min, 1.0);
            assert_eq!(max, 1.0);
        }
        other => panic!("expected NoMesh, got {other:?}"),
    }
    assert_eq!(recorder.volume_range, Some((1.0, 1.0)));
    assert!(!recorder.stages.contains(&"raw_mesh"));
}

#[test]
fn observer_sees_every_stage_in_order() {
    let pipeline = Pipeline::new(config(|_| {})).unwrap();
    let mut recorder = Recorder::default();

    let outcome = pipeline
        .convert_binary_mask(&square_with_hole(), &mut recorder)
        .unwrap();

    assert!(outcome.is_mesh());
    assert_eq!(
        recorder.stages,
        vec![
            "binary_mask",
            "contours",
            "profile_mask",
            "volume",
            "raw_mesh",
            "cleaned_mesh"
        ]
    );
}

#[test]
fn outer_only_policy_fills_the_hole() {
    let cfg = config(|c| c.contour.policy = ContourPolicy::OuterOnly);
    let converted = convert_mask(cfg, &square_with_hole());

    assert_eq!(converted.report.hole_count(), 0);
    assert_eq!(converted.report.hole_ratio, 1.0 - 0.36);
    assert_eq!(converted.report.cleanup.components, 1);
}

#[test]
fn tapered_policy_builds_a_closed_lens() {
    let cfg = config(|c| c.extrusion.policy = ExtrusionPolicy::Tapered);
    let converted = convert_mask(cfg, &square_with_hole());

    assert_eq!(converted.report.isolevel, 0.3);
    assert!(converted.report.cleanup.watertight);
    assert_eq!(converted.report.cleanup.euler_characteristic, 0);
}

#[test]
fn finished_mesh_is_painted_and_has_normals() {
    let converted = convert_mask(config(|_| {}), &square_with_hole());
    let mesh = &converted.mesh;

    let colors = mesh.colors().unwrap();
    assert_eq!(colors.len(), mesh.vertex_count());
    assert!(colors.iter().all(|c| *c == DEFAULT_COLOR));
    assert_eq!(mesh.normals().unwrap().len(), mesh.vertex_count());
    assert!((mesh.max_extent() - 200.0).abs() < 2.0);
}

#[test]
fn scanned_raster_converts() {
    let raster = GrayImage::from_fn(80, 60, |x, y| {
        if (10..70).contains(&x) && (10..50).contains(&y) {
            Luma([30])
        } else {
            Luma([240])
        }
    });
    let pipeline = Pipeline::new(config(|_| {})).unwrap();
    let converted = pipeline
        .convert_raster(&raster, &mut NoopObserver)
        .unwrap()
        .into_mesh()
        .unwrap();

    assert_eq!(converted.report.foreground_pixels, 60 * 40);
    assert_eq!(converted.report.timings[0].stage, "binarize");
    assert_eq!(converted.report.cleanup.components, 1);
}

#[test]
fn converted_file_reports_every_stage_timing() {
    let dir = std::env::temp_dir().join(format!("drawing-pipeline-load-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("plate.png");
    GrayImage::from_fn(60, 50, |x, y| {
        if (10..50).contains(&x) && (10..40).contains(&y) {
            Luma([30])
        } else {
            Luma([240])
        }
    })
    .save(&path)
    .unwrap();

    let pipeline = Pipeline::new(config(|c| c.extrusion.depth = 4)).unwrap();
    let converted = pipeline
        .convert_path(&path, &mut NoopObserver)
        .unwrap()
        .into_mesh()
        .unwrap();
    std::fs::remove_dir_all(&dir).ok();

    let stages: Vec<&str> = converted
        .report
        .timings
        .iter()
        .map(|t| t.stage.as_str())
        .collect();
    assert_eq!(
        stages,
        vec!["load", "binarize", "contours", "profile", "extrude", "isosurface", "cleanup"]
    );
}

#[test]
fn part_touching_the_image_edge_converts() {
    let mask = GrayImage::from_fn(60, 60, |x, y| {
        if x < 40 && (10..50).contains(&y) {
            Luma([255])
        } else {
            Luma([0])
        }
    });
    let converted = convert_mask(config(|c| c.mesher.pad_boundary = true), &mask);

    assert_eq!(converted.report.main_contour_area, 39.0 * 39.0);
    assert!(converted.report.cleanup.watertight);
    assert_eq!(converted.report.cleanup.euler_characteristic, 2);
}

#[test]
fn blank_page_is_an_input_error() {
    let pipeline = Pipeline::new(config(|_| {})).unwrap();
    let err = pipeline
        .convert_raster(&GrayImage::from_pixel(40, 40, Luma([255])), &mut NoopObserver)
        .unwrap_err();
    assert!(matches!(err, PipelineError::Input(InputError::EmptyMask { .. })));
}

#[test]
fn missing_file_is_an_input_error() {
    let pipeline = Pipeline::new(ConversionConfig::default()).unwrap();
    let err = pipeline
        .convert_path("no/such/drawing.png", &mut NoopObserver)
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Input(InputError::Unreadable { .. })
    ));
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let err = Pipeline::new(config(|c| c.extrusion.depth = 0)).unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));
    assert!(err.to_string().contains("extrusion.depth"));
}

#[test]
fn debug_writer_dumps_intermediate_images() {
    let dir = std::env::temp_dir().join(format!("drawing-pipeline-debug-{}", std::process::id()));
    let pipeline = Pipeline::new(config(|c| c.extrusion.depth = 4)).unwrap();
    let mut writer = DebugImageWriter::new(&dir);

    pipeline
        .convert_binary_mask(&square_with_hole(), &mut writer)
        .unwrap();

    for name in ["binary_mask.png", "contours.png", "profile_mask.png"] {
        assert!(dir.join(name).is_file(), "missing {name}");
    }
    let profile = image::open(dir.join("profile_mask.png")).unwrap().to_luma8();
    assert_eq!(profile.get_pixel(50, 50)[0], 0);
    assert_eq!(profile.get_pixel(30, 30)[0], 255);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn report_serializes_to_json() {
    let converted = convert_mask(config(|c| c.extrusion.depth = 4), &square_with_hole());
    let json = serde_json::to_value(&converted.report).unwrap();

    assert_eq!(json["hole_areas"].as_array().unwrap().len(), 1);
    assert_eq!(json["volume_shape"][2], 4);
    assert!(json["cleanup"]["triangles"].as_u64().unwrap() > 0);
}
