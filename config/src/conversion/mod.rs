//! Explicit, validated parameters for one drawing conversion.
//!
//! [`ConversionConfig`] groups one section per pipeline stage. Every field has
//! a default taken from [`crate::constants`], and [`ConversionConfig::validate`]
//! rejects values outside the documented ranges before any stage runs.
//!
//! The structure is serde-friendly; missing fields fall back to defaults, so a
//! JSON document only needs to name what it overrides.
//!
//! ```
//! use config::conversion::{ConversionConfig, ExtrusionPolicy};
//!
//! let mut cfg = ConversionConfig::default();
//! cfg.extrusion.policy = ExtrusionPolicy::Tapered;
//! assert!(cfg.validate().is_ok());
//! assert_eq!(cfg.isolevel(), 0.3);
//! ```

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// POLICIES
// =============================================================================

/// Which contours become part of the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContourPolicy {
    /// Main contour plus the hole borders nested directly inside it.
    #[default]
    HoleAware,
    /// Main contour only; interior borders are ignored.
    OuterOnly,
}

/// How the 2D occupancy mask is carried along the depth axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtrusionPolicy {
    /// Every slice is an exact copy of the mask (prismatic solid).
    #[default]
    HolePreserving,
    /// Slices are weighted by a triangular falloff peaking at mid-depth.
    Tapered,
}

impl ExtrusionPolicy {
    /// Isolevel that separates material from empty space for this policy.
    ///
    /// # Examples
    /// ```
    /// use config::conversion::ExtrusionPolicy;
    /// assert_eq!(ExtrusionPolicy::HolePreserving.default_isolevel(), 0.5);
    /// ```
    pub fn default_isolevel(self) -> f64 {
        match self {
            ExtrusionPolicy::HolePreserving => HOLE_PRESERVING_ISOLEVEL,
            ExtrusionPolicy::Tapered => TAPERED_ISOLEVEL,
        }
    }
}

// =============================================================================
// STAGE SECTIONS
// =============================================================================

/// Raster → binary mask.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinarizeConfig {
    /// Pixels with intensity strictly below this value are ink. Range 1..=255.
    pub threshold: u8,
    /// Closing radius (square element of side `2r + 1`). Range 0..=16.
    pub close_radius: u8,
}

impl Default for BinarizeConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_INK_THRESHOLD,
            close_radius: DEFAULT_CLOSE_RADIUS,
        }
    }
}

/// Binary mask → contour set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourConfig {
    pub policy: ContourPolicy,
    /// Simplification tolerance as a fraction of arc length. Range [0, 0.5).
    pub simplify_ratio: f64,
    /// Holes with a smaller enclosed area are dropped. Range >= 0.
    pub min_hole_area: f64,
    /// Reject holes that are not fully inside the main contour.
    pub require_nested_holes: bool,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            policy: ContourPolicy::default(),
            simplify_ratio: DEFAULT_SIMPLIFY_RATIO,
            min_hole_area: 0.0,
            require_nested_holes: false,
        }
    }
}

/// Contour set → occupancy mask cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Closing radius applied to the filled profile. Range 0..=16.
    pub close_radius: u8,
    /// Gaussian blur standard deviation. Range (0, 10].
    pub blur_sigma: f32,
    /// Blurred values above the cut become material. Range (0, 1).
    pub cut: f32,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            close_radius: DEFAULT_CLOSE_RADIUS,
            blur_sigma: DEFAULT_PROFILE_BLUR_SIGMA,
            cut: DEFAULT_PROFILE_CUT,
        }
    }
}

/// Occupancy mask → occupancy volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrusionConfig {
    /// Voxels along the extrusion axis. Range 2..=1024.
    pub depth: usize,
    pub policy: ExtrusionPolicy,
}

impl Default for ExtrusionConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            policy: ExtrusionPolicy::default(),
        }
    }
}

/// Occupancy volume → raw mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MesherConfig {
    /// Explicit isolevel in (0, 1); `None` picks the extrusion policy default.
    pub isolevel: Option<f64>,
    /// Voxel-to-world scale along (x, y, z); each component > 0.
    pub spacing: [f64; 3],
    /// Largest bounding-box extent after normalization; > 0.
    pub target_size: f64,
    /// Surround the volume with empty voxels so the surface closes at the
    /// volume border.
    pub pad_boundary: bool,
}

impl Default for MesherConfig {
    fn default() -> Self {
        Self {
            isolevel: None,
            spacing: DEFAULT_VOXEL_SPACING,
            target_size: DEFAULT_TARGET_SIZE,
            pad_boundary: false,
        }
    }
}

/// Raw mesh → cleaned mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Triangles with area at or below this are removed. Range >= 0.
    pub degenerate_area: f64,
    /// Vertices closer than this are merged. Range >= 0.
    pub merge_distance: f64,
    /// Laplacian passes. Range 0..=100.
    pub smoothing_iterations: u32,
    /// Relaxation factor per pass. Range [0, 1].
    pub smoothing_lambda: f64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            degenerate_area: DEGENERATE_AREA_EPSILON,
            merge_distance: VERTEX_MERGE_EPSILON,
            smoothing_iterations: DEFAULT_SMOOTHING_ITERATIONS,
            smoothing_lambda: DEFAULT_SMOOTHING_LAMBDA,
        }
    }
}

// =============================================================================
// CONVERSION CONFIG
// =============================================================================

/// All parameters of one drawing conversion.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    pub binarize: BinarizeConfig,
    pub contour: ContourConfig,
    pub profile: ProfileConfig,
    pub extrusion: ExtrusionConfig,
    pub mesher: MesherConfig,
    pub cleanup: CleanupConfig,
}

impl ConversionConfig {
    /// Isolevel used for extraction: the explicit override, or the extrusion
    /// policy's default.
    pub fn isolevel(&self) -> f64 {
        self.mesher
            .isolevel
            .unwrap_or_else(|| self.extrusion.policy.default_isolevel())
    }

    /// Checks every field against its documented range.
    ///
    /// # Examples
    /// ```
    /// use config::conversion::{ConfigError, ConversionConfig};
    ///
    /// let mut cfg = ConversionConfig::default();
    /// cfg.extrusion.depth = 1;
    /// assert!(matches!(
    ///     cfg.validate(),
    ///     Err(ConfigError::OutOfRange { field: "extrusion.depth", .. })
    /// ));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.binarize;
        check(b.threshold >= 1, "binarize.threshold", b.threshold, "1..=255")?;
        check(
            b.close_radius <= MAX_CLOSE_RADIUS,
            "binarize.close_radius",
            b.close_radius,
            "0..=16",
        )?;

        let c = &self.contour;
        check(
            (0.0..0.5).contains(&c.simplify_ratio),
            "contour.simplify_ratio",
            c.simplify_ratio,
            "[0, 0.5)",
        )?;
        check(
            c.min_hole_area >= 0.0,
            "contour.min_hole_area",
            c.min_hole_area,
            ">= 0",
        )?;

        let p = &self.profile;
        check(
            p.close_radius <= MAX_CLOSE_RADIUS,
            "profile.close_radius",
            p.close_radius,
            "0..=16",
        )?;
        check(
            p.blur_sigma > 0.0 && p.blur_sigma <= 10.0,
            "profile.blur_sigma",
            p.blur_sigma,
            "(0, 10]",
        )?;
        check(p.cut > 0.0 && p.cut < 1.0, "profile.cut", p.cut, "(0, 1)")?;

        let e = &self.extrusion;
        check(
            (MIN_DEPTH..=MAX_DEPTH).contains(&e.depth),
            "extrusion.depth",
            e.depth as f64,
            "2..=1024",
        )?;

        let level = self.isolevel();
        check(level > 0.0 && level < 1.0, "mesher.isolevel", level, "(0, 1)")?;
        for component in self.mesher.spacing {
            check(component > 0.0, "mesher.spacing", component, "> 0")?;
        }
        check(
            self.mesher.target_size > 0.0,
            "mesher.target_size",
            self.mesher.target_size,
            "> 0",
        )?;

        let k = &self.cleanup;
        check(
            k.degenerate_area >= 0.0,
            "cleanup.degenerate_area",
            k.degenerate_area,
            ">= 0",
        )?;
        check(
            k.merge_distance >= 0.0,
            "cleanup.merge_distance",
            k.merge_distance,
            ">= 0",
        )?;
        check(
            k.smoothing_iterations <= MAX_SMOOTHING_ITERATIONS,
            "cleanup.smoothing_iterations",
            k.smoothing_iterations,
            "0..=100",
        )?;
        check(
            (0.0..=1.0).contains(&k.smoothing_lambda),
            "cleanup.smoothing_lambda",
            k.smoothing_lambda,
            "[0, 1]",
        )?;

        Ok(())
    }
}

/// Returns `OutOfRange` for `field` unless `ok` holds. NaN never passes the
/// range comparisons above, so it is rejected too.
fn check(
    ok: bool,
    field: &'static str,
    value: impl Into<f64>,
    expected: &'static str,
) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value: value.into(),
            expected,
        })
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Error returned when a configuration value is outside its valid range.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `field` holds `value`, which is outside `expected`.
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OutOfRange {
                field,
                value,
                expected,
            } => write!(f, "{field} must be in {expected}: {value}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests;
