//! Tests for conversion configuration validation and serialisation.

use super::*;

fn field_of(err: ConfigError) -> &'static str {
    match err {
        ConfigError::OutOfRange { field, .. } => field,
    }
}

fn mutated(edit: impl FnOnce(&mut ConversionConfig)) -> ConversionConfig {
    let mut cfg = ConversionConfig::default();
    edit(&mut cfg);
    cfg
}

#[test]
fn defaults_validate() {
    assert_eq!(ConversionConfig::default().validate(), Ok(()));
}

#[test]
fn isolevel_follows_extrusion_policy() {
    let mut cfg = ConversionConfig::default();
    assert_eq!(cfg.isolevel(), HOLE_PRESERVING_ISOLEVEL);

    cfg.extrusion.policy = ExtrusionPolicy::Tapered;
    assert_eq!(cfg.isolevel(), TAPERED_ISOLEVEL);

    cfg.mesher.isolevel = Some(0.42);
    assert_eq!(cfg.isolevel(), 0.42);
}

#[test]
fn rejects_each_out_of_range_field() {
    let cases = [
        ("binarize.threshold", mutated(|c| c.binarize.threshold = 0)),
        ("binarize.close_radius", mutated(|c| c.binarize.close_radius = 17)),
        ("contour.simplify_ratio", mutated(|c| c.contour.simplify_ratio = 0.5)),
        ("contour.min_hole_area", mutated(|c| c.contour.min_hole_area = -1.0)),
        ("profile.close_radius", mutated(|c| c.profile.close_radius = 200)),
        ("profile.blur_sigma", mutated(|c| c.profile.blur_sigma = 0.0)),
        ("profile.cut", mutated(|c| c.profile.cut = 1.0)),
        ("extrusion.depth", mutated(|c| c.extrusion.depth = 4096)),
        ("mesher.isolevel", mutated(|c| c.mesher.isolevel = Some(1.0))),
        ("mesher.spacing", mutated(|c| c.mesher.spacing = [2.0, 0.0, 2.0])),
        ("mesher.target_size", mutated(|c| c.mesher.target_size = -5.0)),
        ("cleanup.degenerate_area", mutated(|c| c.cleanup.degenerate_area = -1.0)),
        ("cleanup.merge_distance", mutated(|c| c.cleanup.merge_distance = -1.0)),
        ("cleanup.smoothing_iterations", mutated(|c| c.cleanup.smoothing_iterations = 101)),
        ("cleanup.smoothing_lambda", mutated(|c| c.cleanup.smoothing_lambda = 1.5)),
    ];

    for (expected, cfg) in cases {
        let err = cfg.validate().expect_err(expected);
        assert_eq!(field_of(err), expected);
    }
}

#[test]
fn rejects_nan() {
    let mut cfg = ConversionConfig::default();
    cfg.cleanup.smoothing_lambda = f64::NAN;
    assert!(cfg.validate().is_err());
}

#[test]
fn error_message_names_field_and_range() {
    let mut cfg = ConversionConfig::default();
    cfg.profile.cut = 2.0;
    let message = cfg.validate().unwrap_err().to_string();
    assert!(message.contains("profile.cut"));
    assert!(message.contains("(0, 1)"));
}

#[test]
fn partial_json_fills_defaults() {
    let json = r#"{ "extrusion": { "depth": 20, "policy": "tapered" },
                    "contour": { "policy": "outer-only" } }"#;
    let cfg: ConversionConfig = serde_json::from_str(json).unwrap();

    assert_eq!(cfg.extrusion.depth, 20);
    assert_eq!(cfg.extrusion.policy, ExtrusionPolicy::Tapered);
    assert_eq!(cfg.contour.policy, ContourPolicy::OuterOnly);
    assert_eq!(cfg.binarize, BinarizeConfig::default());
    assert_eq!(cfg.cleanup, CleanupConfig::default());
    assert!(cfg.validate().is_ok());
}

#[test]
fn json_roundtrip_preserves_overrides() {
    let mut cfg = ConversionConfig::default();
    cfg.mesher.pad_boundary = true;
    cfg.mesher.isolevel = Some(0.4);

    let text = serde_json::to_string(&cfg).unwrap();
    let back: ConversionConfig = serde_json::from_str(&text).unwrap();
    assert_eq!(back, cfg);
}
