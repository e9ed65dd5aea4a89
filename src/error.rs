//! Error types for fader3d.

use thiserror::Error;

/// fader3d error type.
#[derive(Error, Debug)]
pub enum FaderError {
    /// The engine or a collaborator could not be set up: malformed
    /// calibration values, or no queryable geometry context. Fatal,
    /// never retried.
    #[error("configuration error: {0}")]
    Config(String),

    /// The sampling surface has a degenerate parametric bounding box.
    /// Fatal for the current sampling call only.
    #[error("invalid surface: {0}")]
    InvalidSurface(String),

    /// A geometry collaborator failed; the underlying error propagates
    /// unchanged. A silently wrong attenuation value is worse than an
    /// explicit failure.
    #[error(transparent)]
    Geometry(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, FaderError>;
