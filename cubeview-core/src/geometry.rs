/// Indexed, vertex-colored geometry for the cube viewers
use nalgebra::{Point3, Vector3};

/// Corners of the unit cube, front face (z = +1) first
pub const CUBE_POSITIONS: [[f32; 3]; 8] = [
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
];

/// One RGB color per corner: the corners of the RGB cube in binary order
pub const CUBE_COLORS: [[f32; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0],
    [0.0, 1.0, 1.0],
    [1.0, 0.0, 0.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 1.0, 1.0],
];

/// Twelve triangles, two per face
pub const CUBE_INDICES: [u8; 36] = [
    0, 3, 1, 1, 3, 2, // front
    4, 7, 5, 5, 7, 6, // back
    3, 7, 2, 2, 7, 6, // right
    4, 0, 5, 5, 0, 1, // left
    1, 2, 5, 5, 2, 6, // top
    0, 3, 4, 4, 3, 7, // bottom
];

/// A vertex with position and color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub color: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, color: Vector3<f32>) -> Self {
        Self { position, color }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }
}

/// Static indexed mesh: shared vertex positions and colors plus a `u8` index list
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Point3<f32>>,
    pub colors: Vec<Vector3<f32>>,
    pub indices: Vec<u8>,
}

impl Mesh {
    /// The colored cube, with every corner coordinate multiplied by `scale`
    pub fn cube(scale: f32) -> Self {
        Self {
            positions: CUBE_POSITIONS
                .iter()
                .map(|&[x, y, z]| Point3::new(x, y, z) * scale)
                .collect(),
            colors: CUBE_COLORS
                .iter()
                .map(|&[r, g, b]| Vector3::new(r, g, b))
                .collect(),
            indices: CUBE_INDICES.to_vec(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn vertex(&self, index: u8) -> Vertex {
        let i = index as usize;
        Vertex::new(self.positions[i], self.colors[i])
    }

    /// Resolve the index list into triangles
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| Triangle::new(self.vertex(tri[0]), self.vertex(tri[1]), self.vertex(tri[2])))
    }

    /// Positions flattened to `x, y, z` triples for buffer upload
    pub fn position_data(&self) -> Vec<f32> {
        self.positions.iter().flat_map(|p| [p.x, p.y, p.z]).collect()
    }

    /// Colors flattened to `r, g, b` triples for buffer upload
    pub fn color_data(&self) -> Vec<f32> {
        self.colors.iter().flat_map(|c| [c.x, c.y, c.z]).collect()
    }
}
