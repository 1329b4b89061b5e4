use std::collections::HashMap;
use std::num::NonZeroU32;

use cgmath::{Deg, InnerSpace, Matrix4, Vector3, Zero};
use log::{debug, warn};

use super::vertex::Vertex3D;
use crate::errors::{CoreError, Result};
use crate::gfx::picking::{Aabb, PickColor};

/// Handle of a texture owned by the resource loader. Zero means "no texture"
/// and is therefore not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(NonZeroU32);

impl TextureId {
    /// Wraps a raw texture name, mapping 0 to `None`.
    pub fn from_raw(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

/// Element counts of every buffer in a mesh. Fixed for the lifetime of the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshLayout {
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Equal to `vertex_count` for smooth shading, `triangle_count` for flat shading
    pub normal_count: usize,
    pub primary_color_count: usize,
    pub secondary_color_count: usize,
}

impl MeshLayout {
    /// Layout with one normal and one colour of each kind per vertex.
    pub fn new(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertex_count,
            triangle_count,
            normal_count: vertex_count,
            primary_color_count: vertex_count,
            secondary_color_count: vertex_count,
        }
    }

    pub fn with_normal_count(mut self, normal_count: usize) -> Self {
        self.normal_count = normal_count;
        self
    }

    pub fn with_color_counts(mut self, primary: usize, secondary: usize) -> Self {
        self.primary_color_count = primary;
        self.secondary_color_count = secondary;
        self
    }

    fn validate(&self) -> Result<()> {
        // zero-initialised triangles point at vertex 0, which must exist
        if self.vertex_count == 0 && self.triangle_count > 0 {
            return Err(CoreError::InvalidArgument {
                what: "triangle_count",
                reason: format!(
                    "a mesh without vertices cannot have {} triangles",
                    self.triangle_count
                ),
            });
        }
        Ok(())
    }
}

/// A named set of triangles within one mesh, such as "l-eye" or "head".
#[derive(Debug, Clone, PartialEq)]
pub struct FaceGroup {
    name: String,
    index: usize,
    /// Display colour (RGBA) the renderer may use for the whole group
    pub color: Option<[u8; 4]>,
}

impl FaceGroup {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the group in [`Object3D::face_groups`].
    pub fn index(&self) -> usize {
        self.index
    }
}

/// A single renderable triangle mesh.
///
/// Buffer sizes are set at construction and never change. Every setter either
/// replaces a whole buffer with data of exactly the right length or rejects
/// the call without touching anything.
#[derive(Debug, Clone)]
pub struct Object3D {
    layout: MeshLayout,
    vertices: Box<[f32]>,
    normals: Box<[f32]>,
    uvs: Box<[f32]>,
    triangles: Box<[u32]>,
    primary_colors: Box<[u8]>,
    secondary_colors: Box<[u8]>,

    location: Vector3<f32>,
    rotation: Vector3<f32>,
    scale: Vector3<f32>,

    texture: Option<TextureId>,
    text: Option<String>,
    pick_color: PickColor,

    face_groups: Vec<FaceGroup>,
    group_lookup: HashMap<String, usize>,
    /// Group of each triangle, `None` while unassigned
    triangle_groups: Box<[Option<usize>]>,

    /// Ignore scene lights when shading
    pub shadeless: bool,
    pub visible: bool,
    pub pickable: bool,
    /// Drawn with the mouse-driven camera rather than the fixed GUI camera
    pub uses_movable_camera: bool,
}

impl Object3D {
    /// Creates a mesh with zeroed buffers; normals and colours are per-vertex.
    pub fn new(location: Vector3<f32>, vertex_count: usize, triangle_count: usize) -> Result<Self> {
        Self::with_layout(location, MeshLayout::new(vertex_count, triangle_count))
    }

    /// Creates a mesh with zeroed buffers sized by `layout`.
    pub fn with_layout(location: Vector3<f32>, layout: MeshLayout) -> Result<Self> {
        layout.validate()?;

        let object = Self {
            vertices: zeroed("vertex", layout.vertex_count, 3)?,
            normals: zeroed("normal", layout.normal_count, 3)?,
            uvs: zeroed("uv", layout.vertex_count, 2)?,
            triangles: zeroed("triangle", layout.triangle_count, 3)?,
            primary_colors: zeroed("primary color", layout.primary_color_count, 3)?,
            secondary_colors: zeroed("secondary color", layout.secondary_color_count, 4)?,
            triangle_groups: zeroed("triangle group", layout.triangle_count, 1)?,
            layout,
            location,
            rotation: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            texture: None,
            text: None,
            pick_color: PickColor::NONE,
            face_groups: Vec::new(),
            group_lookup: HashMap::new(),
            shadeless: false,
            visible: true,
            pickable: true,
            uses_movable_camera: true,
        };

        debug!(
            "Created mesh with {} vertices, {} triangles at ({}, {}, {})",
            layout.vertex_count, layout.triangle_count, location.x, location.y, location.z
        );
        Ok(object)
    }

    // Counts

    pub fn layout(&self) -> MeshLayout {
        self.layout
    }

    pub fn vertex_count(&self) -> usize {
        self.layout.vertex_count
    }

    pub fn triangle_count(&self) -> usize {
        self.layout.triangle_count
    }

    pub fn normal_count(&self) -> usize {
        self.layout.normal_count
    }

    pub fn primary_color_count(&self) -> usize {
        self.layout.primary_color_count
    }

    pub fn secondary_color_count(&self) -> usize {
        self.layout.secondary_color_count
    }

    // Buffer access

    /// Vertex coordinates, `x, y, z` per vertex
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Texture coordinates, `u, v` per vertex
    pub fn uvs(&self) -> &[f32] {
        &self.uvs
    }

    /// Vertex indices, three per triangle
    pub fn triangles(&self) -> &[u32] {
        &self.triangles
    }

    /// RGB bytes, three per colour
    pub fn primary_colors(&self) -> &[u8] {
        &self.primary_colors
    }

    /// RGBA bytes, four per colour
    pub fn secondary_colors(&self) -> &[u8] {
        &self.secondary_colors
    }

    pub fn set_vertices(&mut self, coords: &[f32]) -> Result<()> {
        write_exact("vertex", &mut self.vertices, coords)
    }

    pub fn set_normals(&mut self, normals: &[f32]) -> Result<()> {
        write_exact("normal", &mut self.normals, normals)
    }

    pub fn set_uvs(&mut self, uvs: &[f32]) -> Result<()> {
        write_exact("uv", &mut self.uvs, uvs)
    }

    pub fn set_primary_colors(&mut self, rgb: &[u8]) -> Result<()> {
        write_exact("primary color", &mut self.primary_colors, rgb)
    }

    pub fn set_secondary_colors(&mut self, rgba: &[u8]) -> Result<()> {
        write_exact("secondary color", &mut self.secondary_colors, rgba)
    }

    /// Replaces the index buffer. Every index must address an existing vertex;
    /// out-of-range indices are rejected rather than left to the renderer.
    pub fn set_triangles(&mut self, indices: &[u32]) -> Result<()> {
        check_length("triangle", self.triangles.len(), indices.len())?;

        let vertex_count = self.layout.vertex_count;
        if let Some(position) = indices
            .iter()
            .position(|&index| index as usize >= vertex_count)
        {
            warn!(
                "Rejected index buffer: index {} in triangle {} is out of range",
                indices[position],
                position / 3
            );
            return Err(CoreError::IndexOutOfRange {
                triangle: position / 3,
                index: indices[position],
                vertex_count,
            });
        }

        self.triangles.copy_from_slice(indices);
        Ok(())
    }

    pub fn vertex(&self, index: usize) -> Option<[f32; 3]> {
        let v = self.vertices.get(element_range(index, 3)?)?;
        Some([v[0], v[1], v[2]])
    }

    /// Moves a single vertex in place.
    pub fn set_vertex(&mut self, index: usize, position: [f32; 3]) -> Result<()> {
        if index >= self.layout.vertex_count {
            return Err(CoreError::InvalidArgument {
                what: "vertex index",
                reason: format!(
                    "{index} is out of range for a mesh with {} vertices",
                    self.layout.vertex_count
                ),
            });
        }
        self.vertices[index * 3..index * 3 + 3].copy_from_slice(&position);
        Ok(())
    }

    pub fn triangle(&self, index: usize) -> Option<[u32; 3]> {
        let t = self.triangles.get(element_range(index, 3)?)?;
        Some([t[0], t[1], t[2]])
    }

    // Transform

    pub fn set_translation(&mut self, x: f32, y: f32, z: f32) {
        self.location = Vector3::new(x, y, z);
    }

    /// Euler angles in degrees, applied around x, then y, then z.
    pub fn set_rotation(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Vector3::new(x, y, z);
    }

    pub fn set_scale(&mut self, x: f32, y: f32, z: f32) {
        self.scale = Vector3::new(x, y, z);
    }

    pub fn location(&self) -> Vector3<f32> {
        self.location
    }

    pub fn rotation(&self) -> Vector3<f32> {
        self.rotation
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    /// Object-to-world matrix: points are scaled, then rotated, then translated.
    pub fn transform_matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.location);
        let r = Matrix4::from_angle_x(Deg(self.rotation.x))
            * Matrix4::from_angle_y(Deg(self.rotation.y))
            * Matrix4::from_angle_z(Deg(self.rotation.z));
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s // Order matters: T * R * S
    }

    // Texture, text and picking

    pub fn set_texture(&mut self, texture: Option<TextureId>) {
        self.texture = texture;
    }

    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    /// Replaces the text label; the previous label is dropped.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn clear_text(&mut self) {
        self.text = None;
    }

    /// The colour this object is drawn with in the picking pass.
    pub fn pick_color(&self) -> PickColor {
        self.pick_color
    }

    pub(crate) fn set_pick_color(&mut self, color: PickColor) {
        self.pick_color = color;
    }

    // Face groups

    /// Registers a new, empty face group and returns its index.
    pub fn add_face_group(&mut self, name: impl Into<String>) -> Result<usize> {
        let name = name.into();
        if self.group_lookup.contains_key(&name) {
            return Err(CoreError::InvalidArgument {
                what: "face group",
                reason: format!("a group named {name:?} already exists"),
            });
        }

        let index = self.face_groups.len();
        self.group_lookup.insert(name.clone(), index);
        self.face_groups.push(FaceGroup {
            name,
            index,
            color: None,
        });
        Ok(index)
    }

    pub fn face_groups(&self) -> &[FaceGroup] {
        &self.face_groups
    }

    pub fn face_group(&self, name: &str) -> Option<&FaceGroup> {
        self.group_lookup.get(name).map(|&i| &self.face_groups[i])
    }

    pub fn face_group_mut(&mut self, name: &str) -> Option<&mut FaceGroup> {
        let index = *self.group_lookup.get(name)?;
        self.face_groups.get_mut(index)
    }

    /// The group a triangle belongs to, if it has been assigned one.
    pub fn triangle_group(&self, triangle: usize) -> Option<&FaceGroup> {
        let index = (*self.triangle_groups.get(triangle)?)?;
        self.face_groups.get(index)
    }

    /// Moves one triangle into the group at `group`.
    pub fn set_triangle_group(&mut self, triangle: usize, group: usize) -> Result<()> {
        self.check_group_index(group)?;
        let triangle_count = self.layout.triangle_count;
        let slot = self
            .triangle_groups
            .get_mut(triangle)
            .ok_or_else(|| CoreError::InvalidArgument {
                what: "triangle index",
                reason: format!(
                    "{triangle} is out of range for a mesh with {triangle_count} triangles"
                ),
            })?;
        *slot = Some(group);
        Ok(())
    }

    /// Assigns every triangle to a group in one call, one group index per triangle.
    pub fn set_triangle_groups(&mut self, groups: &[usize]) -> Result<()> {
        check_length("triangle group", self.triangle_groups.len(), groups.len())?;
        for &group in groups {
            self.check_group_index(group)?;
        }

        for (slot, &group) in self.triangle_groups.iter_mut().zip(groups) {
            *slot = Some(group);
        }
        Ok(())
    }

    fn check_group_index(&self, group: usize) -> Result<()> {
        if group >= self.face_groups.len() {
            return Err(CoreError::InvalidArgument {
                what: "face group index",
                reason: format!(
                    "{group} is out of range for a mesh with {} groups",
                    self.face_groups.len()
                ),
            });
        }
        Ok(())
    }

    /// One flag per face group, set for the groups named in `names`.
    pub fn group_mask(&self, names: &[&str]) -> Result<Vec<bool>> {
        let mut mask = vec![false; self.face_groups.len()];
        for name in names {
            let index = self
                .group_lookup
                .get(*name)
                .ok_or_else(|| CoreError::InvalidArgument {
                    what: "face group",
                    reason: format!("no group named {name:?}"),
                })?;
            mask[*index] = true;
        }
        Ok(mask)
    }

    /// One flag per triangle, set for triangles in any of the named groups.
    pub fn face_mask_for_groups(&self, names: &[&str]) -> Result<Vec<bool>> {
        let groups = self.group_mask(names)?;
        Ok(self
            .triangle_groups
            .iter()
            .map(|group| group.is_some_and(|g| groups[g]))
            .collect())
    }

    /// Indices of the triangles in any of the named groups, ascending.
    pub fn faces_for_groups(&self, names: &[&str]) -> Result<Vec<usize>> {
        Ok(mask_indices(&self.face_mask_for_groups(names)?))
    }

    /// One flag per vertex, set for vertices used by a triangle in the named groups.
    pub fn vertex_mask_for_groups(&self, names: &[&str]) -> Result<Vec<bool>> {
        let faces = self.face_mask_for_groups(names)?;
        let mut mask = vec![false; self.layout.vertex_count];
        for (triangle, _) in self
            .triangles
            .chunks_exact(3)
            .zip(faces)
            .filter(|(_, selected)| *selected)
        {
            for &index in triangle {
                mask[index as usize] = true;
            }
        }
        Ok(mask)
    }

    /// Indices of the vertices used by the named groups, ascending.
    pub fn vertices_for_groups(&self, names: &[&str]) -> Result<Vec<usize>> {
        Ok(mask_indices(&self.vertex_mask_for_groups(names)?))
    }

    // Derived geometry

    /// Recomputes the normal buffer from the current vertices and triangles.
    ///
    /// With one normal per vertex the result is smooth (area weighted);
    /// with one normal per triangle it is flat. Degenerate normals are zero.
    pub fn calculate_normals(&mut self) -> Result<()> {
        let layout = self.layout;
        if layout.normal_count == layout.vertex_count {
            self.calculate_vertex_normals();
        } else if layout.normal_count == layout.triangle_count {
            self.calculate_face_normals();
        } else {
            return Err(CoreError::InvalidArgument {
                what: "normal_count",
                reason: format!(
                    "{} normals match neither {} vertices nor {} triangles",
                    layout.normal_count, layout.vertex_count, layout.triangle_count
                ),
            });
        }
        Ok(())
    }

    fn face_normal(&self, triangle: [u32; 3]) -> Vector3<f32> {
        let point = |i: u32| {
            let i = i as usize * 3;
            Vector3::new(self.vertices[i], self.vertices[i + 1], self.vertices[i + 2])
        };
        let (v0, v1, v2) = (point(triangle[0]), point(triangle[1]), point(triangle[2]));
        (v1 - v0).cross(v2 - v0)
    }

    fn calculate_face_normals(&mut self) {
        let normals: Vec<Vector3<f32>> = self
            .triangles
            .chunks_exact(3)
            .map(|t| normalize_or_zero(self.face_normal([t[0], t[1], t[2]])))
            .collect();
        for (slot, n) in self.normals.chunks_exact_mut(3).zip(normals) {
            slot.copy_from_slice(&[n.x, n.y, n.z]);
        }
    }

    fn calculate_vertex_normals(&mut self) {
        let mut sums = vec![Vector3::zero(); self.layout.vertex_count];

        for t in self.triangles.chunks_exact(3) {
            // unnormalised cross product weights each face by its area
            let face = self.face_normal([t[0], t[1], t[2]]);
            for &index in t {
                sums[index as usize] += face;
            }
        }

        for (slot, sum) in self.normals.chunks_exact_mut(3).zip(sums) {
            let n = normalize_or_zero(sum);
            slot.copy_from_slice(&[n.x, n.y, n.z]);
        }
    }

    /// Axis-aligned bounds in object space, `None` for a mesh without vertices.
    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_coords(&self.vertices)
    }

    /// Bounds after applying [`transform_matrix`](Self::transform_matrix).
    pub fn world_bounding_box(&self) -> Option<Aabb> {
        self.bounding_box()
            .map(|aabb| aabb.transform(&self.transform_matrix()))
    }

    /// Interleaves positions, normals and uvs for upload.
    ///
    /// Only meaningful for smooth-shaded meshes; flat-shaded layouts are rejected.
    pub fn interleaved_vertices(&self) -> Result<Vec<Vertex3D>> {
        if self.layout.normal_count != self.layout.vertex_count {
            return Err(CoreError::InvalidArgument {
                what: "normal_count",
                reason: "interleaving needs one normal per vertex".to_string(),
            });
        }

        Ok(self
            .vertices
            .chunks_exact(3)
            .zip(self.normals.chunks_exact(3))
            .zip(self.uvs.chunks_exact(2))
            .map(|((p, n), uv)| Vertex3D {
                position: [p[0], p[1], p[2]],
                normal: [n[0], n[1], n[2]],
                uv: [uv[0], uv[1]],
            })
            .collect())
    }
}

fn mask_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &set)| set.then_some(i))
        .collect()
}

fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    let length = v.magnitude();
    if length > f32::EPSILON {
        v / length
    } else {
        Vector3::zero()
    }
}

/// Slice range of element `index` in a buffer with `stride` values per element.
fn element_range(index: usize, stride: usize) -> Option<std::ops::Range<usize>> {
    let start = index.checked_mul(stride)?;
    Some(start..start.checked_add(stride)?)
}

fn zeroed<T: Copy + Default>(
    buffer: &'static str,
    count: usize,
    stride: usize,
) -> Result<Box<[T]>> {
    let len = count
        .checked_mul(stride)
        .ok_or(CoreError::AllocationError {
            buffer,
            len: usize::MAX,
        })?;

    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| CoreError::AllocationError { buffer, len })?;
    data.resize(len, T::default());
    Ok(data.into_boxed_slice())
}

fn check_length(buffer: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        warn!(
            "Rejected {} buffer write: expected {} elements, got {}",
            buffer, expected, actual
        );
        return Err(CoreError::LengthMismatch {
            buffer,
            expected,
            actual,
        });
    }
    Ok(())
}

fn write_exact<T: Copy>(buffer: &'static str, dst: &mut [T], src: &[T]) -> Result<()> {
    check_length(buffer, dst.len(), src.len())?;
    dst.copy_from_slice(src);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    const TRIANGLE: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];

    fn triangle_mesh() -> Object3D {
        let mut mesh = Object3D::new(Vector3::zero(), 3, 1).unwrap();
        mesh.set_vertices(&TRIANGLE).unwrap();
        mesh.set_triangles(&[0, 1, 2]).unwrap();
        mesh
    }

    #[test]
    fn new_mesh_is_zeroed_with_default_flags() {
        let mesh = Object3D::new(Vector3::new(1.0, 2.0, 3.0), 4, 2).unwrap();

        assert_eq!(mesh.vertices(), &[0.0; 12]);
        assert_eq!(mesh.normals().len(), 12);
        assert_eq!(mesh.uvs().len(), 8);
        assert_eq!(mesh.triangles(), &[0; 6]);
        assert_eq!(mesh.primary_colors().len(), 12);
        assert_eq!(mesh.secondary_colors().len(), 16);

        assert_eq!(mesh.location(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.rotation(), Vector3::zero());
        assert_eq!(mesh.scale(), Vector3::new(1.0, 1.0, 1.0));
        assert!(mesh.visible);
        assert!(mesh.pickable);
        assert!(mesh.uses_movable_camera);
        assert!(!mesh.shadeless);
        assert_eq!(mesh.texture(), None);
        assert_eq!(mesh.text(), None);
        assert_eq!(mesh.pick_color(), PickColor::NONE);
    }

    #[test]
    fn single_triangle_round_trips() {
        let mesh = triangle_mesh();
        assert_eq!(mesh.vertices(), &TRIANGLE);
        assert_eq!(mesh.triangles(), &[0, 1, 2]);
        assert_eq!(mesh.triangle(0), Some([0, 1, 2]));
        assert_eq!(mesh.triangle(1), None);
        assert_eq!(mesh.vertex(1), Some([1.0, 0.0, 0.0]));
        assert!(mesh.visible && mesh.pickable);
    }

    #[test]
    fn wrong_length_vertices_leave_buffer_unchanged() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let vertex_count = rng.random_range(1..20);
            let mut mesh = Object3D::new(Vector3::zero(), vertex_count, 0).unwrap();

            let good: Vec<f32> = (0..vertex_count * 3).map(|i| i as f32).collect();
            mesh.set_vertices(&good).unwrap();

            let mut len = rng.random_range(0..80);
            if len == vertex_count * 3 {
                len += 1;
            }
            let bad = vec![-1.0; len];
            let err = mesh.set_vertices(&bad).unwrap_err();
            assert_eq!(
                err,
                CoreError::LengthMismatch {
                    buffer: "vertex",
                    expected: vertex_count * 3,
                    actual: len,
                }
            );
            assert_eq!(mesh.vertices(), good.as_slice());
        }
    }

    #[test]
    fn attribute_setters_require_exact_length() {
        let mut mesh = Object3D::new(Vector3::zero(), 2, 0).unwrap();

        assert!(mesh.set_normals(&[0.0; 6]).is_ok());
        assert!(mesh.set_normals(&[0.0; 5]).is_err());
        assert!(mesh.set_uvs(&[0.5; 4]).is_ok());
        assert!(mesh.set_uvs(&[0.5; 6]).is_err());
        assert!(mesh.set_primary_colors(&[255; 6]).is_ok());
        assert!(mesh.set_primary_colors(&[255; 8]).is_err());
        assert!(mesh.set_secondary_colors(&[7; 8]).is_ok());
        assert!(mesh.set_secondary_colors(&[7; 6]).is_err());

        assert_eq!(mesh.uvs(), &[0.5; 4]);
        assert_eq!(mesh.primary_colors(), &[255; 6]);
        assert_eq!(mesh.secondary_colors(), &[7; 8]);
    }

    #[test]
    fn out_of_range_triangles_are_rejected() {
        let mut mesh = triangle_mesh();

        let err = mesh.set_triangles(&[0, 1, 3]).unwrap_err();
        assert_eq!(
            err,
            CoreError::IndexOutOfRange {
                triangle: 0,
                index: 3,
                vertex_count: 3,
            }
        );
        assert_eq!(mesh.triangles(), &[0, 1, 2]);

        assert!(matches!(
            mesh.set_triangles(&[0, 1]),
            Err(CoreError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn every_stored_index_is_in_range() {
        let mut rng = rand::rng();
        let vertex_count = 10;
        let mut mesh = Object3D::new(Vector3::zero(), vertex_count, 8).unwrap();

        for _ in 0..100 {
            let indices: Vec<u32> = (0..24).map(|_| rng.random_range(0..12)).collect();
            let _ = mesh.set_triangles(&indices);
            assert!(mesh
                .triangles()
                .iter()
                .all(|&i| (i as usize) < vertex_count));
        }
    }

    #[test]
    fn triangles_without_vertices_are_invalid() {
        let err = Object3D::new(Vector3::zero(), 0, 1).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { what: "triangle_count", .. }));
        assert!(Object3D::new(Vector3::zero(), 0, 0).is_ok());
    }

    #[test]
    fn oversized_counts_fail_to_allocate() {
        let err = Object3D::new(Vector3::zero(), usize::MAX, 0).unwrap_err();
        assert!(matches!(err, CoreError::AllocationError { buffer: "vertex", .. }));
    }

    #[test]
    fn set_vertex_updates_in_place() {
        let mut mesh = triangle_mesh();
        mesh.set_vertex(2, [5.0, 6.0, 7.0]).unwrap();
        assert_eq!(mesh.vertex(2), Some([5.0, 6.0, 7.0]));
        assert!(mesh.set_vertex(3, [0.0; 3]).is_err());
        assert_eq!(mesh.vertices().len(), 9);
    }

    #[test]
    fn element_access_out_of_range_is_none() {
        let mesh = triangle_mesh();
        assert_eq!(mesh.vertex(3), None);
        assert_eq!(mesh.vertex(usize::MAX), None);
        assert_eq!(mesh.vertex(usize::MAX / 3), None);
        assert_eq!(mesh.triangle(1), None);
        assert_eq!(mesh.triangle(usize::MAX / 3 + 1), None);
        assert_eq!(mesh.triangle(0), Some([0, 1, 2]));
    }

    /// Two quads side by side: triangles 0-1 form "left", 2-3 form "right".
    fn grouped_mesh() -> Object3D {
        let mut mesh = Object3D::new(Vector3::zero(), 6, 4).unwrap();
        mesh.set_triangles(&[0, 1, 4, 0, 4, 3, 1, 2, 5, 1, 5, 4]).unwrap();
        let left = mesh.add_face_group("left").unwrap();
        let right = mesh.add_face_group("right").unwrap();
        mesh.set_triangle_groups(&[left, left, right, right]).unwrap();
        mesh
    }

    #[test]
    fn face_groups_are_looked_up_by_name() {
        let mut mesh = grouped_mesh();
        assert_eq!(mesh.face_groups().len(), 2);
        assert_eq!(mesh.face_group("right").map(FaceGroup::index), Some(1));
        assert!(mesh.face_group("head").is_none());
        assert_eq!(mesh.triangle_group(0).map(FaceGroup::name), Some("left"));

        mesh.face_group_mut("left").unwrap().color = Some([255, 0, 0, 255]);
        assert_eq!(mesh.face_group("left").unwrap().color, Some([255, 0, 0, 255]));

        let err = mesh.add_face_group("left").unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { what: "face group", .. }));
    }

    #[test]
    fn group_queries_select_faces_and_vertices() {
        let mesh = grouped_mesh();

        assert_eq!(mesh.group_mask(&["right"]).unwrap(), vec![false, true]);
        assert_eq!(
            mesh.face_mask_for_groups(&["left"]).unwrap(),
            vec![true, true, false, false]
        );
        assert_eq!(mesh.faces_for_groups(&["right"]).unwrap(), vec![2, 3]);
        assert_eq!(mesh.vertices_for_groups(&["left"]).unwrap(), vec![0, 1, 3, 4]);
        assert_eq!(mesh.vertices_for_groups(&["right"]).unwrap(), vec![1, 2, 4, 5]);
        assert_eq!(mesh.vertices_for_groups(&["left", "right"]).unwrap().len(), 6);
        assert!(mesh.faces_for_groups(&[]).unwrap().is_empty());
    }

    #[test]
    fn unassigned_triangles_belong_to_no_group() {
        let mut mesh = Object3D::new(Vector3::zero(), 6, 4).unwrap();
        let group = mesh.add_face_group("body").unwrap();
        mesh.set_triangle_group(3, group).unwrap();

        assert_eq!(mesh.triangle_group(0), None);
        assert_eq!(mesh.faces_for_groups(&["body"]).unwrap(), vec![3]);
    }

    #[test]
    fn bad_group_assignments_are_rejected() {
        let mut mesh = grouped_mesh();

        assert!(mesh.set_triangle_group(4, 0).is_err());
        assert!(mesh.set_triangle_group(0, 2).is_err());
        assert!(mesh.set_triangle_groups(&[0, 1, 2, 0]).is_err());
        assert!(matches!(
            mesh.set_triangle_groups(&[0, 1]).unwrap_err(),
            CoreError::LengthMismatch { expected: 4, actual: 2, .. }
        ));
        assert_eq!(mesh.faces_for_groups(&["left"]).unwrap(), vec![0, 1]);

        assert!(mesh.group_mask(&["head"]).is_err());
    }

    #[test]
    fn text_is_replaced() {
        let mut mesh = triangle_mesh();
        mesh.set_text("first");
        mesh.set_text(String::from("second"));
        assert_eq!(mesh.text(), Some("second"));
        mesh.clear_text();
        assert_eq!(mesh.text(), None);
    }

    #[test]
    fn texture_zero_means_none() {
        assert_eq!(TextureId::from_raw(0), None);
        let mut mesh = triangle_mesh();
        mesh.set_texture(TextureId::from_raw(7));
        assert_eq!(mesh.texture().map(TextureId::get), Some(7));
    }

    #[test]
    fn transform_scales_then_rotates_then_translates() {
        let mut mesh = triangle_mesh();
        mesh.set_scale(2.0, 2.0, 2.0);
        mesh.set_rotation(0.0, 0.0, 90.0);
        mesh.set_translation(1.0, 0.0, 0.0);

        let p = mesh.transform_matrix() * cgmath::Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!((p.y - 2.0).abs() < 1e-5);
        assert!(p.z.abs() < 1e-5);
    }

    #[test]
    fn smooth_normals_face_the_viewer() {
        let mut mesh = triangle_mesh();
        mesh.calculate_normals().unwrap();
        for n in mesh.normals().chunks_exact(3) {
            assert!((n[2] - 1.0).abs() < 1e-6);
            assert!(n[0].abs() < 1e-6 && n[1].abs() < 1e-6);
        }
    }

    #[test]
    fn flat_normals_one_per_triangle() {
        let layout = MeshLayout::new(3, 1).with_normal_count(1);
        let mut mesh = Object3D::with_layout(Vector3::zero(), layout).unwrap();
        mesh.set_vertices(&TRIANGLE).unwrap();
        mesh.set_triangles(&[0, 2, 1]).unwrap();
        mesh.calculate_normals().unwrap();
        assert_eq!(mesh.normals(), &[0.0, 0.0, -1.0]);
        assert!(mesh.interleaved_vertices().is_err());
    }

    #[test]
    fn inconsistent_normal_count_is_rejected() {
        let layout = MeshLayout::new(4, 2).with_normal_count(3);
        let mut mesh = Object3D::with_layout(Vector3::zero(), layout).unwrap();
        assert!(mesh.calculate_normals().is_err());
    }

    #[test]
    fn bounding_boxes() {
        let mut mesh = triangle_mesh();
        let aabb = mesh.bounding_box().unwrap();
        assert_eq!(aabb.min, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 0.0));

        mesh.set_translation(0.0, 0.0, 5.0);
        let world = mesh.world_bounding_box().unwrap();
        assert_eq!(world.min.z, 5.0);

        let empty = Object3D::new(Vector3::zero(), 0, 0).unwrap();
        assert!(empty.bounding_box().is_none());
    }

    #[test]
    fn interleaving_pairs_attributes() {
        let mut mesh = triangle_mesh();
        mesh.set_uvs(&[0.0, 0.0, 1.0, 0.0, 0.0, 1.0]).unwrap();
        mesh.calculate_normals().unwrap();

        let vertices = mesh.interleaved_vertices().unwrap();
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(vertices[1].uv, [1.0, 0.0]);
        assert_eq!(vertices[2].normal, [0.0, 0.0, 1.0]);
    }
}
