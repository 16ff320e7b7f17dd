//! # Pipeline Errors
//!
//! Fatal failures of a single conversion.

use config::ConfigError;
use drawing_mesh::VolumeError;
use drawing_profile::{ContourError, InputError};
use thiserror::Error;

/// A conversion that cannot continue.
///
/// "No surface at the chosen level" is not in here; it is the
/// [`crate::ConversionOutcome::NoMesh`] outcome.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Contour(#[from] ContourError),

    #[error(transparent)]
    Volume(#[from] VolumeError),
}
