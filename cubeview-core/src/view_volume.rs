/// Orthographic view volume and the zoom controls that resize it
use nalgebra::Matrix4;

use crate::config::ZOOM_STEP;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomOutcome {
    Applied,
    /// Zooming further in would collapse the volume; bounds left unchanged.
    Clamped,
}

/// Clipping bounds of an orthographic projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewVolume {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub near: f64,
    pub far: f64,
    step: f64,
}

impl ViewVolume {
    pub fn new(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
            step: ZOOM_STEP,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn zoom(&mut self, direction: ZoomDirection) -> ZoomOutcome {
        match direction {
            ZoomDirection::In => self.zoom_in(),
            ZoomDirection::Out => self.zoom_out(),
        }
    }

    /// Move every side bound one step towards the center
    ///
    /// Refused when the resulting width or height would be half a step or
    /// less, so `left < right` and `bottom < top` always hold.
    pub fn zoom_in(&mut self) -> ZoomOutcome {
        let min_extent = self.step * 0.5;
        let width = (self.right - self.step) - (self.left + self.step);
        let height = (self.top - self.step) - (self.bottom + self.step);
        if width <= min_extent || height <= min_extent {
            log::debug!(
                "zoom in clamped at {:.3} x {:.3}",
                self.width(),
                self.height()
            );
            return ZoomOutcome::Clamped;
        }

        self.left += self.step;
        self.right -= self.step;
        self.bottom += self.step;
        self.top -= self.step;
        ZoomOutcome::Applied
    }

    /// Move every side bound one step away from the center
    pub fn zoom_out(&mut self) -> ZoomOutcome {
        self.left -= self.step;
        self.right += self.step;
        self.bottom -= self.step;
        self.top += self.step;
        ZoomOutcome::Applied
    }

    pub fn projection_matrix(&self) -> Matrix4<f64> {
        Matrix4::new_orthographic(self.left, self.right, self.bottom, self.top, self.near, self.far)
    }
}

impl Default for ViewVolume {
    fn default() -> Self {
        Self::new(-2.0, 2.0, -2.0, 2.0, -10.0, 10.0)
    }
}
