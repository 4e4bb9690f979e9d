/// Cubeview Core Library - camera control and per-frame matrix logic
///
/// This library holds everything the cube viewers share: the camera state and
/// its presets, the rotate and zoom controls, the static cube mesh, and the
/// render driver that recomputes view and projection matrices each frame for
/// whatever rasterization backend a front end supplies.

pub mod camera;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod preset;
pub mod render;
pub mod rotator;
pub mod schedule;
pub mod view_volume;

#[cfg(test)]
mod mock_backend;

// Re-export commonly used types
pub use camera::CameraState;
pub use config::{Scheme, ViewerConfig};
pub use controller::{CameraController, Command, KeyOutcome};
pub use error::{CameraError, ConfigError, RenderError};
pub use geometry::{Mesh, Triangle, Vertex};
pub use preset::{ViewPreset, ViewPresets};
pub use render::{FrameMatrices, RenderBackend, RenderDriver};
pub use rotator::RotationStep;
pub use schedule::{CancellationToken, FrameTicker, FrameTime};
pub use view_volume::{ViewVolume, ZoomDirection, ZoomOutcome};
