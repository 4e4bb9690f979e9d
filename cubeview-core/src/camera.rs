/// Camera state and view matrix construction
use nalgebra::{Matrix4, Point3, Vector3};

use crate::error::CameraError;

/// Squared sine of the smallest angle allowed between `up` and the view direction
const PARALLEL_EPSILON: f64 = 1e-12;

/// Eye position, look-at target and up direction
///
/// Every constructor and mutator checks that the triple can produce a
/// well-formed look-at matrix: the eye is away from the target and `up` is a
/// non-zero vector that is not parallel to the view direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    eye: Point3<f64>,
    at: Point3<f64>,
    up: Vector3<f64>,
}

impl CameraState {
    pub fn new(eye: Point3<f64>, at: Point3<f64>, up: Vector3<f64>) -> Result<Self, CameraError> {
        validate(&eye, &at, &up)?;
        Ok(Self { eye, at, up })
    }

    pub fn eye(&self) -> Point3<f64> {
        self.eye
    }

    pub fn at(&self) -> Point3<f64> {
        self.at
    }

    pub fn up(&self) -> Vector3<f64> {
        self.up
    }

    /// Unit vector from the target back towards the eye
    pub fn back_axis(&self) -> Vector3<f64> {
        (self.eye - self.at).normalize()
    }

    /// Replace all three values at once
    pub fn set(&mut self, eye: Point3<f64>, at: Point3<f64>, up: Vector3<f64>) -> Result<(), CameraError> {
        *self = Self::new(eye, at, up)?;
        Ok(())
    }

    /// Replace eye and up, keeping the target
    pub fn set_eye_up(&mut self, eye: Point3<f64>, up: Vector3<f64>) -> Result<(), CameraError> {
        self.set(eye, self.at, up)
    }

    pub fn set_up(&mut self, up: Vector3<f64>) -> Result<(), CameraError> {
        self.set(self.eye, self.at, up)
    }

    /// Right-handed look-at view matrix
    pub fn view_matrix(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(&self.eye, &self.at, &self.up)
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            eye: Point3::new(0.0, 0.0, 0.1),
            at: Point3::origin(),
            up: Vector3::y(),
        }
    }
}

fn validate(eye: &Point3<f64>, at: &Point3<f64>, up: &Vector3<f64>) -> Result<(), CameraError> {
    let forward = at - eye;
    if forward.norm_squared() == 0.0 {
        return Err(CameraError::Coincident);
    }
    let up_len2 = up.norm_squared();
    if up_len2 == 0.0 {
        return Err(CameraError::ZeroUp);
    }
    // |f x u|^2 = |f|^2 |u|^2 sin^2(theta)
    let cross = forward.cross(up).norm_squared();
    if cross <= PARALLEL_EPSILON * forward.norm_squared() * up_len2 {
        return Err(CameraError::UpParallelToView);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_camera() {
        let camera = CameraState::default();
        assert_eq!(camera.eye(), Point3::new(0.0, 0.0, 0.1));
        assert_eq!(camera.at(), Point3::origin());
        assert_eq!(camera.up(), Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_view_matrix_maps_eye_to_origin() {
        let camera = CameraState::new(
            Point3::new(1.0, 1.0, 1.0),
            Point3::origin(),
            Vector3::y(),
        )
        .unwrap();
        let view = camera.view_matrix();
        assert_relative_eq!(
            view.transform_point(&camera.eye()),
            Point3::origin(),
            epsilon = 1e-12
        );
        // The target lies straight ahead on -Z
        let target = view.transform_point(&camera.at());
        assert_relative_eq!(target.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(target.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(target.z, -(3f64.sqrt()), epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_degenerate_cameras() {
        let origin = Point3::origin();
        assert_eq!(
            CameraState::new(origin, origin, Vector3::y()),
            Err(CameraError::Coincident)
        );
        assert_eq!(
            CameraState::new(Point3::new(0.0, 0.0, 1.0), origin, Vector3::zeros()),
            Err(CameraError::ZeroUp)
        );
        assert_eq!(
            CameraState::new(Point3::new(0.0, 2.0, 0.0), origin, Vector3::new(0.0, -3.0, 0.0)),
            Err(CameraError::UpParallelToView)
        );
    }

    #[test]
    fn test_failed_mutation_keeps_state() {
        let mut camera = CameraState::default();
        let before = camera;
        assert!(camera.set_up(Vector3::new(0.0, 0.0, 1.0)).is_err());
        assert_eq!(camera, before);
    }
}
