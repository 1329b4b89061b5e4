//! # Object Picking
//!
//! Two ways of finding the object under the mouse:
//!
//! 1. **Colour picking** (primary): every object gets a unique [`PickColor`] when it
//!    is added to the scene. The renderer draws each object flat-shaded in its pick
//!    colour into an off-screen buffer, reads back the pixel under the cursor and
//!    reports it with [`Scene::set_picked_color`](crate::gfx::scene::Scene::set_picked_color).
//! 2. **Ray picking** (fallback): a [`Ray`] is tested against each object's
//!    world-space [`Aabb`] and the nearest hit wins.
//!
//! ```
//! use mhcore::gfx::picking::{PickColor, PickColorAllocator};
//!
//! let mut allocator = PickColorAllocator::new();
//! let first = allocator.allocate().unwrap();
//! assert_eq!(first.rgb(), [0, 0, 1]);
//! assert_eq!(first.index(), Some(0));
//! assert_eq!(PickColor::NONE.index(), None);
//! ```

use cgmath::{ElementWise, InnerSpace, Matrix4, Vector3, Vector4};
use log::warn;

use crate::errors::{CoreError, Result};

/// Largest colour value the 24-bit encoding can hold.
const MAX_PICK_VALUE: u32 = 0x00FF_FFFF;

/// A 24-bit colour identifying one object. Black is reserved for "nothing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PickColor([u8; 3]);

impl PickColor {
    /// The background colour; decodes to no object.
    pub const NONE: PickColor = PickColor([0, 0, 0]);

    /// Number of distinct objects the encoding can address.
    pub const CAPACITY: u32 = MAX_PICK_VALUE;

    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        Self(rgb)
    }

    pub fn rgb(self) -> [u8; 3] {
        self.0
    }

    /// The colour as RGBA bytes with full alpha, ready for a flat-colour draw.
    pub fn rgba(self) -> [u8; 4] {
        [self.0[0], self.0[1], self.0[2], 255]
    }

    /// Packed `0xRRGGBB` value.
    pub fn value(self) -> u32 {
        (u32::from(self.0[0]) << 16) | (u32::from(self.0[1]) << 8) | u32::from(self.0[2])
    }

    fn from_value(value: u32) -> Self {
        Self([(value >> 16) as u8, (value >> 8) as u8, value as u8])
    }

    /// The 0-based allocation index this colour encodes, or `None` for black.
    pub fn index(self) -> Option<usize> {
        match self.value() {
            0 => None,
            value => Some(value as usize - 1),
        }
    }
}

/// Hands out pick colours in increasing order.
#[derive(Debug, Clone)]
pub struct PickColorAllocator {
    next: u32,
}

impl PickColorAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Starts allocating at an arbitrary packed value.
    #[cfg(test)]
    pub(crate) fn starting_at(next: u32) -> Self {
        Self { next }
    }

    /// Returns the next unused colour, or an error once the space is used up.
    pub fn allocate(&mut self) -> Result<PickColor> {
        if self.next > MAX_PICK_VALUE {
            warn!("Pick colour space exhausted after {} objects", MAX_PICK_VALUE);
            return Err(CoreError::PickColorSpaceExhausted {
                capacity: PickColor::CAPACITY,
            });
        }
        let color = PickColor::from_value(self.next);
        self.next += 1;
        Ok(color)
    }
}

impl Default for PickColorAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point along the ray at distance `t`
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Aabb {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Bounds of a flat `x, y, z, x, y, z, ...` coordinate list.
    pub fn from_coords(coords: &[f32]) -> Option<Self> {
        let mut points = coords
            .chunks_exact(3)
            .map(|p| Vector3::new(p[0], p[1], p[2]));
        let first = points.next()?;

        let (min, max) = points.fold((first, first), |(min, max), v| {
            (
                Vector3::new(min.x.min(v.x), min.y.min(v.y), min.z.min(v.z)),
                Vector3::new(max.x.max(v.x), max.y.max(v.y), max.z.max(v.z)),
            )
        });
        Some(Self::new(min, max))
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Slab test. Returns the distance to the nearest hit in front of the origin.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let entry = [
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        ];
        let exit = [
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        ];
        let t_near = entry[0].max(entry[1]).max(entry[2]);
        let t_far = exit[0].min(exit[1]).min(exit[2]);

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Bounds of this box after transforming all 8 corners.
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        let mut coords = Vec::with_capacity(24);
        for &x in &[self.min.x, self.max.x] {
            for &y in &[self.min.y, self.max.y] {
                for &z in &[self.min.z, self.max.z] {
                    let p = matrix * Vector4::new(x, y, z, 1.0);
                    coords.extend_from_slice(&[p.x / p.w, p.y / p.w, p.z / p.w]);
                }
            }
        }
        // 8 corners are always present
        Self::from_coords(&coords).unwrap_or(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_are_distinct_and_decode_back() {
        let mut allocator = PickColorAllocator::new();
        let colors: Vec<PickColor> = (0..1000).map(|_| allocator.allocate().unwrap()).collect();

        for (i, color) in colors.iter().enumerate() {
            assert_ne!(*color, PickColor::NONE);
            assert_eq!(color.index(), Some(i));
        }
        let unique: std::collections::HashSet<_> = colors.iter().collect();
        assert_eq!(unique.len(), colors.len());
    }

    #[test]
    fn byte_layout_is_big_endian_rgb() {
        let color = PickColor::from_value(0x01_02_03);
        assert_eq!(color.rgb(), [1, 2, 3]);
        assert_eq!(color.rgba(), [1, 2, 3, 255]);
        assert_eq!(PickColor::from_rgb([1, 2, 3]).value(), 0x01_02_03);
    }

    #[test]
    fn allocator_exhausts_at_24_bits() {
        let mut allocator = PickColorAllocator::starting_at(MAX_PICK_VALUE);
        let last = allocator.allocate().unwrap();
        assert_eq!(last.rgb(), [255, 255, 255]);
        assert_eq!(last.index(), Some(MAX_PICK_VALUE as usize - 1));

        let err = allocator.allocate().unwrap_err();
        assert_eq!(
            err,
            CoreError::PickColorSpaceExhausted {
                capacity: PickColor::CAPACITY
            }
        );
        // still exhausted, nothing wrapped around
        assert!(allocator.allocate().is_err());
    }

    #[test]
    fn aabb_from_coords() {
        let aabb = Aabb::from_coords(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0]).unwrap();
        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(aabb.center(), Vector3::new(0.0, 0.0, 0.0));
        assert!(Aabb::from_coords(&[]).is_none());
    }

    #[test]
    fn ray_aabb_intersection() {
        let aabb = Aabb::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

        let hit = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        let distance = aabb.intersect_ray(&hit).unwrap();
        assert!((distance - 4.0).abs() < 1e-5);
        assert!((hit.point_at(distance).z + 1.0).abs() < 1e-5);

        let miss = Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&miss).is_none());

        let behind = Ray::new(Vector3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&behind).is_none());
    }

    #[test]
    fn transformed_aabb_moves_with_translation() {
        let aabb = Aabb::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));
        let moved = aabb.transform(&Matrix4::from_translation(Vector3::new(10.0, 0.0, 0.0)));
        assert_eq!(moved.min, Vector3::new(9.0, -1.0, -1.0));
        assert_eq!(moved.max, Vector3::new(11.0, 1.0, 1.0));
    }
}
