//! # Contour Extraction
//!
//! Binary mask → contour set (one main profile plus its holes).
//!
//! ## Algorithm
//!
//! 1. The mask is framed by one background pixel on every side, so parts
//!    touching the image edge still get a closed outer border.
//! 2. Border following (Suzuki–Abe) traces every outer and hole border and
//!    records which border encloses it.
//! 3. Every border is simplified with Douglas–Peucker at a tolerance
//!    proportional to its arc length; borders left without area are dropped.
//! 4. The top-level outer border with the largest area is the main contour,
//!    so small stray marks around the part are ignored.
//! 5. With [`ContourPolicy::HoleAware`], hole borders whose parent is the main
//!    contour become holes, in discovery order.


use crate::error::ContourError;
use config::constants::EPSILON;
use config::{ContourConfig, ContourPolicy};
use geo::{Coord, Intersects, LineString, Polygon};
use glam::DVec2;
use image::{imageops, GrayImage};
use imageproc::contours::{self, find_contours, BorderType};
use imageproc::geometry::{approximate_polygon_dp, arc_length, contour_area, oriented_contour_area};
use imageproc::point::Point;
use log::{debug, info, warn};

// =============================================================================
// CONTOUR
// =============================================================================

/// Closed polygon over integer pixel coordinates.
///
/// The closing edge from the last point back to the first is implicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    points: Vec<Point<i32>>,
}

impl Contour {
    /// Creates a contour, dropping a repeated closing point if present.
    pub fn new(mut points: Vec<Point<i32>>) -> Self {
        while points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Self { points }
    }

    /// Axis-aligned rectangle with corners `(x0, y0)` and `(x1, y1)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use drawing_profile::Contour;
    ///
    /// let square = Contour::rectangle(0, 0, 10, 10);
    /// assert_eq!(square.area(), 100.0);
    /// ```
    pub fn rectangle(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ])
    }

    #[inline]
    pub fn points(&self) -> &[Point<i32>] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shoelace area; the sign follows the winding.
    pub fn signed_area(&self) -> f64 {
        oriented_contour_area(&self.points)
    }

    /// Enclosed area.
    pub fn area(&self) -> f64 {
        contour_area(&self.points)
    }

    /// Perimeter including the closing edge.
    pub fn arc_length(&self) -> f64 {
        arc_length(&self.points, true)
    }

    /// True when `p` lies inside the polygon or on its boundary.
    pub fn contains(&self, p: DVec2) -> bool {
        !self.points.is_empty() && self.polygon().intersects(&Coord { x: p.x, y: p.y })
    }

    /// True when every vertex of `other` lies inside or on this polygon.
    pub fn encloses(&self, other: &Contour) -> bool {
        if self.points.is_empty() {
            return false;
        }
        let polygon = self.polygon();
        other.points.iter().all(|p| {
            polygon.intersects(&Coord {
                x: f64::from(p.x),
                y: f64::from(p.y),
            })
        })
    }

    /// Simplified copy at `ratio` × arc length tolerance, or `None` when the
    /// result no longer encloses any area. A zero ratio keeps every point.
    pub fn simplified(&self, ratio: f64) -> Option<Contour> {
        if self.points.len() < 3 {
            return None;
        }
        let epsilon = ratio * self.arc_length();
        let reduced = if epsilon > 0.0 {
            Contour::new(approximate_polygon_dp(&self.points, epsilon, true))
        } else {
            self.clone()
        };
        (reduced.len() >= 3 && reduced.area() > EPSILON).then_some(reduced)
    }

    fn polygon(&self) -> Polygon<f64> {
        let ring: Vec<(f64, f64)> = self
            .points
            .iter()
            .map(|p| (f64::from(p.x), f64::from(p.y)))
            .collect();
        Polygon::new(LineString::from(ring), Vec::new())
    }
}

// =============================================================================
// CONTOUR SET
// =============================================================================

/// Main profile contour and the holes cut out of it.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourSet {
    main: Contour,
    holes: Vec<Contour>,
}

impl ContourSet {
    /// Creates a set. Holes are subtracted in the given order.
    pub fn new(main: Contour, holes: Vec<Contour>) -> Self {
        Self { main, holes }
    }

    #[inline]
    pub fn main(&self) -> &Contour {
        &self.main
    }

    #[inline]
    pub fn holes(&self) -> &[Contour] {
        &self.holes
    }

    #[inline]
    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    /// Indices of holes with a vertex outside the main polygon.
    pub fn stray_holes(&self) -> Vec<usize> {
        self.holes
            .iter()
            .enumerate()
            .filter(|(_, hole)| !self.main.encloses(hole))
            .map(|(index, _)| index)
            .collect()
    }
}

// =============================================================================
// EXTRACTION
// =============================================================================

/// Traces `mask` (non-zero = foreground) and returns its profile contours.
///
/// # Errors
///
/// - [`ContourError::NotFound`] when no border encloses a non-zero area.
/// - [`ContourError::HoleOutsideMain`] when `cfg.require_nested_holes` is set
///   and a hole leaves the main polygon.
///
/// # Example
///
/// ```rust
/// use config::ContourConfig;
/// use drawing_profile::extract_contours;
/// use image::{GrayImage, Luma};
///
/// let mut mask = GrayImage::new(40, 40);
/// for y in 5..35 {
///     for x in 5..35 {
///         if !(15..25).contains(&x) || !(15..25).contains(&y) {
///             mask.put_pixel(x, y, Luma([255]));
///         }
///     }
/// }
/// let set = extract_contours(&mask, &ContourConfig::default()).unwrap();
/// assert_eq!(set.hole_count(), 1);
/// ```
pub fn extract_contours(mask: &GrayImage, cfg: &ContourConfig) -> Result<ContourSet, ContourError> {
    let traced = trace_borders(mask);
    let simplified: Vec<Option<Contour>> = traced
        .iter()
        .map(|border| Contour::new(border.points.clone()).simplified(cfg.simplify_ratio))
        .collect();

    let (main_index, main) = traced
        .iter()
        .enumerate()
        .filter(|(_, border)| border.border_type == BorderType::Outer && border.parent.is_none())
        .filter_map(|(index, _)| simplified[index].as_ref().map(|c| (index, c)))
        .max_by(|a, b| a.1.area().total_cmp(&b.1.area()))
        .ok_or(ContourError::NotFound {
            traced: traced.len(),
        })?;

    let holes: Vec<Contour> = match cfg.policy {
        ContourPolicy::OuterOnly => Vec::new(),
        ContourPolicy::HoleAware => traced
            .iter()
            .enumerate()
            .filter(|(_, border)| {
                border.border_type == BorderType::Hole && border.parent == Some(main_index)
            })
            .filter_map(|(index, _)| simplified[index].clone())
            .filter(|hole| hole.area() >= cfg.min_hole_area)
            .collect(),
    };

    let set = ContourSet::new(main.clone(), holes);

    let stray = set.stray_holes();
    if let Some(&index) = stray.first() {
        if cfg.require_nested_holes {
            return Err(ContourError::HoleOutsideMain { index });
        }
        warn!("{} hole(s) extend past the main contour", stray.len());
    }

    info!(
        "main contour: area {:.1}, {} points; {} hole(s) ({} borders traced)",
        set.main().area(),
        set.main().len(),
        set.hole_count(),
        traced.len()
    );
    for (i, hole) in set.holes().iter().enumerate() {
        debug!("hole {}: area {:.1}", i + 1, hole.area());
    }

    Ok(set)
}

/// Border following over `mask` framed by one background pixel, so the
/// outside of the image counts as background. Points are returned in `mask`
/// coordinates.
fn trace_borders(mask: &GrayImage) -> Vec<contours::Contour<i32>> {
    let (width, height) = mask.dimensions();
    let mut canvas = GrayImage::new(width + 2, height + 2);
    imageops::replace(&mut canvas, mask, 1, 1);

    let max_x = width.saturating_sub(1) as i32;
    let max_y = height.saturating_sub(1) as i32;
    let mut traced = find_contours::<i32>(&canvas);
    for border in &mut traced {
        for p in &mut border.points {
            *p = Point::new((p.x - 1).clamp(0, max_x), (p.y - 1).clamp(0, max_y));
        }
    }
    traced
}
