//! # Vertex Data Structures
//!
//! Interleaved vertex format handed to the renderer for upload.

/// A 3D vertex with position, normal and texture coordinate.
///
/// `#[repr(C)]` plus `Pod` lets a `&[Vertex3D]` be reinterpreted as bytes with
/// [`bytemuck::cast_slice`] without copying.
///
/// ```
/// use mhcore::gfx::scene::vertex::Vertex3D;
///
/// let vertices = [Vertex3D {
///     position: [0.0, 1.0, 0.0],
///     normal: [0.0, 1.0, 0.0],
///     uv: [0.5, 0.5],
/// }];
/// let bytes: &[u8] = bytemuck::cast_slice(&vertices);
/// assert_eq!(bytes.len(), Vertex3D::STRIDE);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// 3D normal vector [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
    /// Texture coordinate [u, v]
    pub uv: [f32; 2],
}

impl Vertex3D {
    /// Size of one vertex in bytes.
    pub const STRIDE: usize = std::mem::size_of::<Vertex3D>();

    /// Byte offset of the normal attribute
    pub const NORMAL_OFFSET: usize = std::mem::size_of::<[f32; 3]>();

    /// Byte offset of the uv attribute
    pub const UV_OFFSET: usize = 2 * std::mem::size_of::<[f32; 3]>();
}
