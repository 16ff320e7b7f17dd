//! # Config Crate
//!
//! Centralized configuration for the drawing-to-mesh pipeline.
//! Literal tuning values live in [`constants`]; the per-conversion parameter
//! structure with its validation lives in [`conversion`].
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::DEFAULT_TARGET_SIZE;
//! use config::conversion::ConversionConfig;
//!
//! let cfg = ConversionConfig::default();
//! cfg.validate().expect("defaults are valid");
//! assert_eq!(cfg.mesher.target_size, DEFAULT_TARGET_SIZE);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every threshold, kernel size and smoothing
//!   factor is defined once
//! - **Validated Up Front**: out-of-range values are rejected before any stage
//!   allocates buffers
//! - **Serialisable**: a JSON document may override any subset of fields

pub mod constants;
pub mod conversion;

pub use conversion::{
    BinarizeConfig, CleanupConfig, ConfigError, ContourConfig, ContourPolicy, ConversionConfig,
    ExtrusionConfig, ExtrusionPolicy, MesherConfig, ProfileConfig,
};
