use config::ConversionConfig;
use drawing_profile::{
    binarize, build_profile_mask, extract_contours, load_grayscale, ContourError, InputError,
};
use glam::DVec2;
use image::{GrayImage, Luma};

/// White paper with a dark plate and a paper-coloured window in its middle.
fn scanned_plate() -> GrayImage {
    GrayImage::from_fn(120, 100, |x, y| {
        let plate = (20..100).contains(&x) && (15..85).contains(&y);
        let window = (50..70).contains(&x) && (40..60).contains(&y);
        if plate && !window {
            Luma([20])
        } else {
            Luma([235])
        }
    })
}

#[test]
fn scanned_plate_keeps_its_window() {
    let cfg = ConversionConfig::default();
    let raster = scanned_plate();

    let mask = binarize(&raster, &cfg.binarize).unwrap();
    let contours = extract_contours(&mask, &cfg.contour).unwrap();
    assert_eq!(contours.hole_count(), 1);
    assert!(contours.holes()[0].contains(DVec2::new(60.0, 50.0)));

    let profile = build_profile_mask(&contours, mask.width(), mask.height(), &cfg.profile);
    assert!(profile.is_binary());
    assert_eq!(profile.get(60, 50), 0.0);
    assert_eq!(profile.get(30, 30), 1.0);
    assert_eq!(profile.get(5, 5), 0.0);
    assert!(profile.hole_ratio() > 0.0 && profile.material_ratio() > 0.4);
}

#[test]
fn tightly_cropped_scan_keeps_edge_material() {
    let cfg = ConversionConfig::default();
    let raster = GrayImage::from_fn(80, 60, |x, y| {
        let window = (30..50).contains(&x) && (20..40).contains(&y);
        if window {
            Luma([235])
        } else {
            Luma([20])
        }
    });

    let mask = binarize(&raster, &cfg.binarize).unwrap();
    let contours = extract_contours(&mask, &cfg.contour).unwrap();
    assert_eq!(contours.hole_count(), 1);

    let profile = build_profile_mask(&contours, mask.width(), mask.height(), &cfg.profile);
    assert_eq!(profile.get(0, 0), 1.0);
    assert_eq!(profile.get(79, 59), 1.0);
    assert_eq!(profile.get(40, 30), 0.0);
    assert!(profile.material_ratio() > 0.8);
}

#[test]
fn blank_page_fails_before_tracing() {
    let cfg = ConversionConfig::default();
    let raster = GrayImage::from_pixel(64, 64, Luma([255]));
    assert!(matches!(
        binarize(&raster, &cfg.binarize),
        Err(InputError::EmptyMask { .. })
    ));
}

#[test]
fn all_zero_mask_has_no_contour() {
    let cfg = ConversionConfig::default();
    let err = extract_contours(&GrayImage::new(100, 100), &cfg.contour).unwrap_err();
    assert!(matches!(err, ContourError::NotFound { .. }));
}

#[test]
fn loads_from_disk() {
    let dir = std::env::temp_dir().join(format!("drawing-profile-it-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("plate.png");
    scanned_plate().save(&path).unwrap();

    let raster = load_grayscale(&path).unwrap();
    assert_eq!(raster.dimensions(), (120, 100));
    assert_eq!(raster.get_pixel(30, 30)[0], 20);

    std::fs::remove_dir_all(&dir).ok();
}
