//! # Drawing Pipeline
//!
//! One drawing in, one mesh (or a typed reason for none) out.
//!
//! ## Architecture
//!
//! ```text
//! drawing-profile (raster → occupancy mask)
//!        ↓
//! drawing-mesh (volume → isosurface → cleanup)
//!        ↓
//! ConversionOutcome { Mesh(mesh + report) | NoMesh(reason) }
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use config::ConversionConfig;
//! use drawing_pipeline::{NoopObserver, Pipeline};
//!
//! let pipeline = Pipeline::new(ConversionConfig::default())?;
//! let outcome = pipeline.convert_path("bracket.png", &mut NoopObserver)?;
//! if let Some(converted) = outcome.mesh() {
//!     println!("{} triangles", converted.mesh.triangle_count());
//! }
//! ```

pub mod error;
pub mod observer;
pub mod outcome;
pub mod pipeline;

pub use error::PipelineError;
pub use observer::{render_contours, DebugImageWriter, NoopObserver, StageObserver};
pub use outcome::{ConversionOutcome, ConversionReport, ConvertedMesh, StageTiming};
pub use pipeline::Pipeline;
