/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use cubeview_core::{Mesh, RenderBackend, RenderError};
use nalgebra::{Matrix4, Point3, Vector3};
use std::io::Write;

/// Character luminosity ramp, darkest to lightest (index 0 is the background)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: usize = 2;

/// A covered cell: interpolated vertex color plus NDC depth
#[derive(Debug, Clone, Copy)]
struct Fragment {
    color: Vector3<f32>,
    depth: f32,
}

/// Software rasterizer that draws an indexed, vertex-colored mesh into a
/// character grid
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    fragments: Vec<Option<Fragment>>,
    mesh: Option<Mesh>,
    model_view: Matrix4<f32>,
    projection: Matrix4<f32>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            fragments: vec![None; width * height],
            mesh: None,
            model_view: Matrix4::identity(),
            projection: Matrix4::identity(),
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.fragments = vec![None; width * height];
    }

    /// Glyph at a cell, `' '` when nothing covers it
    pub fn glyph_at(&self, x: usize, y: usize) -> char {
        self.fragments
            .get(y * self.width + x)
            .copied()
            .flatten()
            .map_or(' ', |fragment| glyph(&fragment.color))
    }

    /// Square drawing area centered in the grid: (origin x, origin y, columns, rows)
    fn viewport(&self) -> (f32, f32, f32, f32) {
        let cols = self.width.min(self.height * CELL_ASPECT);
        let rows = cols / CELL_ASPECT;
        let x0 = (self.width - cols) / 2;
        let y0 = (self.height - rows) / 2;
        (x0 as f32, y0 as f32, cols as f32, rows as f32)
    }

    /// Transform a vertex to (screen x, screen y, NDC depth)
    fn project(&self, mvp: &Matrix4<f32>, position: &Point3<f32>) -> Option<(f32, f32, f32)> {
        let clip = mvp * position.to_homogeneous();

        // Prevent division by near-zero w values
        if clip.w.abs() < 1e-6 {
            return None;
        }
        let ndc = clip.xyz() / clip.w;

        let (x0, y0, cols, rows) = self.viewport();
        let screen_x = x0 + (ndc.x + 1.0) * 0.5 * cols;
        let screen_y = y0 + (1.0 - ndc.y) * 0.5 * rows;
        Some((screen_x, screen_y, ndc.z))
    }

    fn rasterize_triangle(&mut self, coords: [(f32, f32, f32); 3], colors: [Vector3<f32>; 3]) {
        let [v0, v1, v2] = coords;

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i64;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i64;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i64;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i64;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i64 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                else {
                    // Degenerate (edge-on) triangle
                    return;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                if !(-1.0..=1.0).contains(&depth) {
                    continue;
                }

                let idx = y as usize * self.width + x as usize;
                let closer = self.fragments[idx].map_or(true, |f| depth < f.depth);
                if closer {
                    let color = colors[0] * w0 + colors[1] * w1 + colors[2] * w2;
                    self.fragments[idx] = Some(Fragment { color, depth });
                }
            }
        }
    }

    /// Write the grid to `writer`, one row per terminal line starting at row 0
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<Color> = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                match self.fragments[y * self.width + x] {
                    Some(fragment) => {
                        let color = terminal_color(&fragment.color);
                        if current != Some(color) {
                            writer.queue(SetForegroundColor(color))?;
                            current = Some(color);
                        }
                        writer.queue(Print(glyph(&fragment.color)))?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl RenderBackend for AsciiRenderer {
    fn upload_mesh(&mut self, mesh: &Mesh) -> Result<(), RenderError> {
        if mesh.indices.iter().any(|&i| i as usize >= mesh.vertex_count()) {
            return Err(RenderError::Backend("index out of range".to_string()));
        }
        self.mesh = Some(mesh.clone());
        Ok(())
    }

    fn clear(&mut self) {
        self.fragments.fill(None);
    }

    fn set_model_view(&mut self, matrix: &Matrix4<f32>) {
        self.model_view = *matrix;
    }

    fn set_projection(&mut self, matrix: &Matrix4<f32>) {
        self.projection = *matrix;
    }

    fn draw_indexed(&mut self, index_count: usize) -> Result<(), RenderError> {
        let Some(mesh) = self.mesh.take() else {
            return Err(RenderError::Backend("draw before mesh upload".to_string()));
        };
        let mvp = self.projection * self.model_view;

        let triangle_count = index_count.min(mesh.index_count()) / 3;
        for triangle in mesh.triangles().take(triangle_count) {
            let mut coords = [(0.0, 0.0, 0.0); 3];
            let mut clipped = false;
            for (slot, vertex) in coords.iter_mut().zip(&triangle.vertices) {
                match self.project(&mvp, &vertex.position) {
                    Some(projected) => *slot = projected,
                    None => clipped = true,
                }
            }
            if !clipped {
                let colors = triangle.vertices.map(|v| v.color);
                self.rasterize_triangle(coords, colors);
            }
        }

        self.mesh = Some(mesh);
        Ok(())
    }
}

fn luminance(color: &Vector3<f32>) -> f32 {
    0.299 * color.x + 0.587 * color.y + 0.114 * color.z
}

/// Map a covered cell's color to a ramp glyph, never the background
fn glyph(color: &Vector3<f32>) -> char {
    let steps = (LUMINOSITY_RAMP.len() - 2) as f32;
    let index = 1 + (luminance(color).clamp(0.0, 1.0) * steps).round() as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

/// Lift colors off pure black so the darkest corner stays visible
fn terminal_color(color: &Vector3<f32>) -> Color {
    let channel = |c: f32| (40.0 + c.clamp(0.0, 1.0) * 215.0) as u8;
    Color::Rgb {
        r: channel(color.x),
        g: channel(color.y),
        b: channel(color.z),
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeview_core::{CameraController, RenderDriver, Scheme};

    fn rendered(scheme: Scheme, keys: &str) -> AsciiRenderer {
        let mut controller = CameraController::new(scheme);
        for key in keys.chars() {
            controller.handle_key(key);
        }
        let mut driver =
            RenderDriver::new(AsciiRenderer::new(80, 40), &Mesh::cube(scheme.mesh_scale())).unwrap();
        driver.frame(&controller).unwrap();
        driver.into_backend()
    }

    fn covered(renderer: &AsciiRenderer) -> usize {
        renderer.fragments.iter().filter(|f| f.is_some()).count()
    }

    #[test]
    fn test_ortho_cube_covers_center_only() {
        let renderer = rendered(Scheme::Ortho, "");
        // Viewport is 80x40 cells; the cube spans the middle half of [-2, 2]
        assert_ne!(renderer.glyph_at(40, 20), ' ');
        assert_eq!(renderer.glyph_at(1, 1), ' ');
        assert_eq!(renderer.glyph_at(78, 38), ' ');
        assert!(covered(&renderer) > 0);
    }

    #[test]
    fn test_zoom_in_grows_the_cube() {
        let base = covered(&rendered(Scheme::Ortho, ""));
        let zoomed = covered(&rendered(Scheme::Ortho, "WWWWW"));
        assert!(zoomed > base, "{} <= {}", zoomed, base);
    }

    #[test]
    fn test_orbit_scheme_draws() {
        let renderer = rendered(Scheme::Orbit, "F");
        assert_ne!(renderer.glyph_at(40, 20), ' ');
    }

    #[test]
    fn test_draw_requires_mesh() {
        let mut renderer = AsciiRenderer::new(10, 10);
        assert!(matches!(
            renderer.draw_indexed(36),
            Err(RenderError::Backend(_))
        ));
    }

    #[test]
    fn test_clear_empties_grid() {
        let mut renderer = rendered(Scheme::Ortho, "");
        renderer.clear();
        assert_eq!(covered(&renderer), 0);
    }

    #[test]
    fn test_glyph_ramp() {
        assert_eq!(glyph(&Vector3::new(0.0, 0.0, 0.0)), '.');
        assert_eq!(glyph(&Vector3::new(1.0, 1.0, 1.0)), '@');
        assert_eq!(terminal_color(&Vector3::zeros()), Color::Rgb { r: 40, g: 40, b: 40 });
    }

    #[test]
    fn test_draw_writes_every_row() {
        let renderer = rendered(Scheme::Ortho, "I");
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        assert!(!out.is_empty());
    }
}
