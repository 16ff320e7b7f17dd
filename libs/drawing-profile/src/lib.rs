//! # Drawing Profile
//!
//! Raster technical drawing → 2D occupancy profile.
//!
//! ## Architecture
//!
//! ```text
//! image file → raster (grayscale) → binarize (ink mask)
//!            → contour (main + holes) → profile (occupancy mask in {0, 1})
//! ```
//!
//! Every stage is a plain function over `image` buffers; configuration comes
//! from the workspace `config` crate.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use config::ConversionConfig;
//! use drawing_profile::{binarize, build_profile_mask, extract_contours, load_grayscale};
//!
//! let cfg = ConversionConfig::default();
//! let raster = load_grayscale("part.png")?;
//! let mask = binarize(&raster, &cfg.binarize)?;
//! let contours = extract_contours(&mask, &cfg.contour)?;
//! let profile = build_profile_mask(&contours, mask.width(), mask.height(), &cfg.profile);
//! ```

pub mod binarize;
pub mod contour;
pub mod error;
pub mod profile;
pub mod raster;

pub use binarize::{binarize, foreground_count};
pub use contour::{extract_contours, Contour, ContourSet};
pub use error::{ContourError, InputError};
pub use profile::{build_profile_mask, clean_profile, rasterize_profile, OccupancyMask};
pub use raster::load_grayscale;
