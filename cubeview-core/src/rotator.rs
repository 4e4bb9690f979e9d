/// Camera rotations driven by the `A`/`D` keys
use nalgebra::{Matrix4, Rotation3, Unit, Vector3};

use crate::camera::CameraState;
use crate::config::Scheme;
use crate::error::CameraError;

/// A signed rotation angle in radians; the sign encodes direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationStep(pub f64);

impl RotationStep {
    /// Positive step of the scheme's size (the `D` key)
    pub fn clockwise(scheme: Scheme) -> Self {
        Self(scheme.rotate_step())
    }

    /// Negative step of the scheme's size (the `A` key)
    pub fn counter_clockwise(scheme: Scheme) -> Self {
        Self(-scheme.rotate_step())
    }

    pub fn radians(self) -> f64 {
        self.0
    }
}

/// Rotate the scheme's way
pub fn rotate(scheme: Scheme, camera: &mut CameraState, step: RotationStep) -> Result<(), CameraError> {
    match scheme {
        Scheme::Orbit => orbit_about_y(camera, step),
        Scheme::Ortho => roll_up(camera, step),
    }
}

/// Rotate both eye and up about the world Y axis
///
/// The eye goes through the homogeneous rotation as a point (w = 1), the up
/// vector as a direction (w = 0).
pub fn orbit_about_y(camera: &mut CameraState, step: RotationStep) -> Result<(), CameraError> {
    let rotation = Matrix4::new_rotation(Vector3::y() * step.radians());
    let eye = rotation.transform_point(&camera.eye());
    let up = rotation.transform_vector(&camera.up());
    camera.set_eye_up(eye, up)
}

/// Roll the up vector about the line of sight, leaving eye and target alone
///
/// The axis runs from the target back to the eye, so the rotation plane
/// follows the current view: looking down from +Y it is the X-Z plane, from
/// -X the Y-Z plane, from +Z the X-Y plane.
pub fn roll_up(camera: &mut CameraState, step: RotationStep) -> Result<(), CameraError> {
    let axis = Unit::new_normalize(camera.back_axis());
    let rotation = Rotation3::from_axis_angle(&axis, step.radians());
    camera.set_up(rotation * camera.up())
}
