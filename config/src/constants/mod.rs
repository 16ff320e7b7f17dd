//! Centralized constants shared across the drawing-to-mesh pipeline.
//!
//! Every tunable literal of the pipeline lives here so that stage crates stay
//! declarative. Most items carry a small usage example.

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for general floating-point comparisons.
///
/// # Examples
/// ```
/// use config::constants::EPSILON;
/// assert!((1.0_f64 - (1.0 + 1e-11)).abs() < EPSILON);
/// ```
pub const EPSILON: f64 = 1e-10;

/// Distance under which two mesh vertices are considered coincident.
///
/// # Examples
/// ```
/// use config::constants::VERTEX_MERGE_EPSILON;
/// let a = [0.0_f64, 0.0, 0.0];
/// let b = [0.0_f64, 0.0, 5e-9];
/// assert!((a[2] - b[2]).abs() < VERTEX_MERGE_EPSILON);
/// ```
pub const VERTEX_MERGE_EPSILON: f64 = 1e-8;

/// Triangle area at or below which a triangle is treated as degenerate.
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-12;

// =============================================================================
// RASTER CONSTANTS
// =============================================================================

/// Intensity below which a pixel counts as ink (foreground).
///
/// Drawings are dark lines on light paper, so the comparison is inverted.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_INK_THRESHOLD;
/// let paper = 240u8;
/// let ink = 20u8;
/// assert!(ink < DEFAULT_INK_THRESHOLD && paper >= DEFAULT_INK_THRESHOLD);
/// ```
pub const DEFAULT_INK_THRESHOLD: u8 = 128;

/// Radius of the square structuring element used for morphological closing.
///
/// A radius of 1 is the 3×3 square.
pub const DEFAULT_CLOSE_RADIUS: u8 = 1;

/// Largest accepted closing radius.
pub const MAX_CLOSE_RADIUS: u8 = 16;

/// Polygon simplification tolerance as a fraction of the contour arc length.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_SIMPLIFY_RATIO;
/// let perimeter = 400.0;
/// assert_eq!(perimeter * DEFAULT_SIMPLIFY_RATIO, 4.0);
/// ```
pub const DEFAULT_SIMPLIFY_RATIO: f64 = 0.01;

/// Standard deviation of the Gaussian blur applied to the profile mask.
pub const DEFAULT_PROFILE_BLUR_SIGMA: f32 = 0.5;

/// Re-threshold cut applied after blurring the profile mask.
///
/// Low enough that thin material bridges survive the blur, high enough that
/// blurred hole interiors fall below it.
pub const DEFAULT_PROFILE_CUT: f32 = 0.3;

// =============================================================================
// VOLUME CONSTANTS
// =============================================================================

/// Default number of voxels along the extrusion axis.
pub const DEFAULT_DEPTH: usize = 100;

/// Smallest depth the isosurface extractor can work with.
pub const MIN_DEPTH: usize = 2;

/// Upper bound on extrusion depth; volume memory grows as h·w·depth.
pub const MAX_DEPTH: usize = 1024;

/// Isolevel used for replicated (hole-preserving) volumes.
///
/// # Examples
/// ```
/// use config::constants::HOLE_PRESERVING_ISOLEVEL;
/// assert!(HOLE_PRESERVING_ISOLEVEL > 0.0 && HOLE_PRESERVING_ISOLEVEL < 1.0);
/// ```
pub const HOLE_PRESERVING_ISOLEVEL: f64 = 0.5;

/// Isolevel used for depth-tapered volumes.
pub const TAPERED_ISOLEVEL: f64 = 0.3;

/// Voxel-to-world scale along (x, y, z).
pub const DEFAULT_VOXEL_SPACING: [f64; 3] = [2.0, 2.0, 2.0];

/// Largest bounding-box extent of a normalized mesh, in world units.
pub const DEFAULT_TARGET_SIZE: f64 = 200.0;

// =============================================================================
// CLEANUP CONSTANTS
// =============================================================================

/// Number of Laplacian smoothing passes.
pub const DEFAULT_SMOOTHING_ITERATIONS: u32 = 1;

/// Upper bound on smoothing passes.
pub const MAX_SMOOTHING_ITERATIONS: u32 = 100;

/// Relaxation factor of one Laplacian smoothing pass.
///
/// Small enough to soften voxel stair-stepping without eroding profile edges.
pub const DEFAULT_SMOOTHING_LAMBDA: f64 = 0.05;

// =============================================================================
// PRESENTATION CONSTANTS
// =============================================================================

/// Uniform RGBA color painted on finished meshes.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_COLOR;
/// assert_eq!(DEFAULT_COLOR[3], 1.0);
/// ```
pub const DEFAULT_COLOR: [f32; 4] = [0.7, 0.8, 0.9, 1.0];
