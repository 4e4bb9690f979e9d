/// Recording backend for unit tests (no graphics context required)
use nalgebra::Matrix4;

use crate::error::RenderError;
use crate::geometry::Mesh;
use crate::render::RenderBackend;

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    UploadMesh { vertices: usize, indices: usize },
    Clear,
    SetModelView(Matrix4<f32>),
    SetProjection(Matrix4<f32>),
    DrawIndexed(usize),
}

#[derive(Debug, Default)]
pub struct MockBackend {
    pub calls: Vec<BackendCall>,
    pub fail_draws: bool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderBackend for MockBackend {
    fn upload_mesh(&mut self, mesh: &Mesh) -> Result<(), RenderError> {
        self.calls.push(BackendCall::UploadMesh {
            vertices: mesh.vertex_count(),
            indices: mesh.index_count(),
        });
        Ok(())
    }

    fn clear(&mut self) {
        self.calls.push(BackendCall::Clear);
    }

    fn set_model_view(&mut self, matrix: &Matrix4<f32>) {
        self.calls.push(BackendCall::SetModelView(*matrix));
    }

    fn set_projection(&mut self, matrix: &Matrix4<f32>) {
        self.calls.push(BackendCall::SetProjection(*matrix));
    }

    fn draw_indexed(&mut self, index_count: usize) -> Result<(), RenderError> {
        if self.fail_draws {
            return Err(RenderError::Backend("draw failed".to_string()));
        }
        self.calls.push(BackendCall::DrawIndexed(index_count));
        Ok(())
    }
}
