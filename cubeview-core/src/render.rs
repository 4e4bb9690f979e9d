/// Per-frame matrix recomputation and the backend it draws through
use nalgebra::Matrix4;

use crate::controller::CameraController;
use crate::error::RenderError;
use crate::geometry::Mesh;

/// A rasterization backend that takes a static colored mesh and a pair of
/// 4x4 uniforms
///
/// Matrices are column-major. A backend starts with an identity projection;
/// `set_projection` is only called by schemes that have a view volume.
pub trait RenderBackend {
    fn upload_mesh(&mut self, mesh: &Mesh) -> Result<(), RenderError>;
    fn clear(&mut self);
    fn set_model_view(&mut self, matrix: &Matrix4<f32>);
    fn set_projection(&mut self, matrix: &Matrix4<f32>);
    /// Draw `index_count` indices of the uploaded mesh as a triangle list
    fn draw_indexed(&mut self, index_count: usize) -> Result<(), RenderError>;
}

/// Matrices computed for a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    pub model_view: Matrix4<f32>,
    pub projection: Option<Matrix4<f32>>,
}

impl FrameMatrices {
    pub fn compute(controller: &CameraController) -> Self {
        Self {
            model_view: controller.camera().view_matrix().cast::<f32>(),
            projection: controller
                .view_volume()
                .map(|volume| volume.projection_matrix().cast::<f32>()),
        }
    }

    /// `projection * model_view`, with identity standing in for a missing projection
    pub fn combined(&self) -> Matrix4<f32> {
        match &self.projection {
            Some(projection) => projection * self.model_view,
            None => self.model_view,
        }
    }
}

/// Redraws the static mesh from the current camera state
pub struct RenderDriver<B: RenderBackend> {
    backend: B,
    index_count: usize,
    frames: u64,
}

impl<B: RenderBackend> RenderDriver<B> {
    /// Upload `mesh` once; every later frame draws it unchanged
    pub fn new(mut backend: B, mesh: &Mesh) -> Result<Self, RenderError> {
        backend.upload_mesh(mesh)?;
        log::debug!(
            "uploaded mesh: {} vertices, {} indices",
            mesh.vertex_count(),
            mesh.index_count()
        );
        Ok(Self {
            backend,
            index_count: mesh.index_count(),
            frames: 0,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }

    /// Clear, upload fresh matrices and issue one indexed draw
    pub fn frame(&mut self, controller: &CameraController) -> Result<FrameMatrices, RenderError> {
        let matrices = FrameMatrices::compute(controller);

        self.backend.clear();
        self.backend.set_model_view(&matrices.model_view);
        if let Some(projection) = &matrices.projection {
            self.backend.set_projection(projection);
        }
        self.backend.draw_indexed(self.index_count)?;

        self.frames += 1;
        Ok(matrices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Scheme;
    use crate::mock_backend::{BackendCall, MockBackend};
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn driver(scheme: Scheme) -> RenderDriver<MockBackend> {
        RenderDriver::new(MockBackend::new(), &Mesh::cube(scheme.mesh_scale())).unwrap()
    }

    #[test]
    fn test_mesh_uploaded_once() {
        let mut driver = driver(Scheme::Ortho);
        let controller = CameraController::new(Scheme::Ortho);
        driver.frame(&controller).unwrap();
        driver.frame(&controller).unwrap();
        let uploads = driver
            .backend()
            .calls
            .iter()
            .filter(|call| matches!(call, BackendCall::UploadMesh { .. }))
            .count();
        assert_eq!(uploads, 1);
        assert_eq!(driver.frames_drawn(), 2);
    }

    #[test]
    fn test_ortho_frame_call_sequence() {
        let mut driver = driver(Scheme::Ortho);
        let controller = CameraController::new(Scheme::Ortho);
        driver.backend_mut().calls.clear();

        let matrices = driver.frame(&controller).unwrap();
        assert_eq!(
            driver.backend().calls,
            vec![
                BackendCall::Clear,
                BackendCall::SetModelView(matrices.model_view),
                BackendCall::SetProjection(matrices.projection.unwrap()),
                BackendCall::DrawIndexed(36),
            ]
        );
    }

    #[test]
    fn test_orbit_frame_has_no_projection() {
        let mut driver = driver(Scheme::Orbit);
        let controller = CameraController::new(Scheme::Orbit);
        let matrices = driver.frame(&controller).unwrap();
        assert!(matrices.projection.is_none());
        assert!(!driver
            .backend()
            .calls
            .iter()
            .any(|call| matches!(call, BackendCall::SetProjection(_))));
        assert_eq!(matrices.combined(), matrices.model_view);
    }

    #[test]
    fn test_idle_frames_are_identical() {
        for scheme in [Scheme::Orbit, Scheme::Ortho] {
            let mut driver = driver(scheme);
            let controller = CameraController::new(scheme);
            let first = driver.frame(&controller).unwrap();
            for _ in 0..5 {
                assert_eq!(driver.frame(&controller).unwrap(), first);
            }
            let draws = driver
                .backend()
                .calls
                .iter()
                .filter(|call| **call == BackendCall::DrawIndexed(36))
                .count();
            assert_eq!(draws, 6);
        }
    }

    #[test]
    fn test_default_view_matrix() {
        let controller = CameraController::new(Scheme::Ortho);
        let matrices = FrameMatrices::compute(&controller);
        // Default eye sits 0.1 in front of the origin looking down -Z
        let origin = matrices.model_view.transform_point(&Point3::origin());
        assert_relative_eq!(origin, Point3::new(0.0, 0.0, -0.1), epsilon = 1e-6);
    }

    #[test]
    fn test_frame_reflects_key_presses() {
        let mut driver = driver(Scheme::Ortho);
        let mut controller = CameraController::new(Scheme::Ortho);
        let idle = driver.frame(&controller).unwrap();

        controller.handle_key('W');
        let zoomed = driver.frame(&controller).unwrap();
        assert_eq!(zoomed.model_view, idle.model_view);
        assert!(zoomed.projection != idle.projection);

        controller.handle_key('T');
        let top = driver.frame(&controller).unwrap();
        assert!(top.model_view != zoomed.model_view);
    }

    #[test]
    fn test_draw_failure_propagates() {
        let mut driver = driver(Scheme::Ortho);
        driver.backend_mut().fail_draws = true;
        let controller = CameraController::new(Scheme::Ortho);
        assert!(matches!(
            driver.frame(&controller),
            Err(RenderError::Backend(_))
        ));
        assert_eq!(driver.frames_drawn(), 0);
    }
}
