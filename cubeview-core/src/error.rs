/// Error types shared by the camera core and the render backends
use thiserror::Error;

/// A camera configuration that cannot produce a well-formed view matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("eye and look-at target coincide")]
    Coincident,
    #[error("up vector has zero length")]
    ZeroUp,
    #[error("up vector is parallel to the view direction")]
    UpParallelToView,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("frame rate must be at least 1")]
    ZeroFrameRate,
    #[error("unknown control scheme {0:?} (expected \"orbit\" or \"ortho\")")]
    UnknownScheme(String),
}

/// Failures reported by a rasterization backend
#[derive(Debug, Error)]
pub enum RenderError {
    /// The graphics context could not be acquired at startup.
    #[error("no graphics context available")]
    ContextUnavailable,
    #[error("shader error: {0}")]
    Shader(String),
    #[error("backend error: {0}")]
    Backend(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
