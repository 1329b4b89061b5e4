//! # Procedural Geometry
//!
//! Flat geometry buffers and a few generated primitives, mainly for GUI
//! widgets and markers that are built in code rather than loaded from disk.
//!
//! ```
//! use mhcore::gfx::geometry::generate_cube;
//!
//! let cube = generate_cube(1.0);
//! assert_eq!(cube.vertex_count(), 24);
//! assert_eq!(cube.triangle_count(), 12);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::object::MeshLayout;

/// Generated geometry in the same flat layout [`Object3D`](crate::gfx::scene::Object3D) stores.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryData {
    /// `x, y, z` per vertex
    pub vertices: Vec<f32>,
    /// `x, y, z` per vertex
    pub normals: Vec<f32>,
    /// `u, v` per vertex
    pub uvs: Vec<f32>,
    /// Three vertex indices per triangle (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Layout of a smooth-shaded mesh that can hold this geometry.
    pub fn layout(&self) -> MeshLayout {
        MeshLayout::new(self.vertex_count(), self.triangle_count())
    }

    fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> u32 {
        let index = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&position);
        self.normals.extend_from_slice(&normal);
        self.uvs.extend_from_slice(&uv);
        index
    }

    fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }
}
