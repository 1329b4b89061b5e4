//! # Primitive Shape Generation
//!
//! All shapes come with outward normals and uv coordinates in `[0, 1]`.

use std::f32::consts::PI;

use super::GeometryData;

/// Cube of edge length `size` centred at the origin.
///
/// Each face has its own four vertices so normals stay sharp at the edges.
pub fn generate_cube(size: f32) -> GeometryData {
    let h = size * 0.5;
    let mut data = GeometryData::new();

    // (normal, tangent u, tangent v) per face; u x v == normal
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];

    for (n, u, v) in faces {
        let corner = |su: f32, sv: f32| {
            [
                (n[0] + su * u[0] + sv * v[0]) * h,
                (n[1] + su * u[1] + sv * v[1]) * h,
                (n[2] + su * u[2] + sv * v[2]) * h,
            ]
        };
        let a = data.push_vertex(corner(-1.0, -1.0), n, [0.0, 0.0]);
        let b = data.push_vertex(corner(1.0, -1.0), n, [1.0, 0.0]);
        let c = data.push_vertex(corner(1.0, 1.0), n, [1.0, 1.0]);
        let d = data.push_vertex(corner(-1.0, 1.0), n, [0.0, 1.0]);
        data.push_triangle(a, b, c);
        data.push_triangle(c, d, a);
    }

    data
}

/// Plane in the XY plane facing +Z, centred at the origin.
pub fn generate_plane(
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
) -> GeometryData {
    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);
    let mut data = GeometryData::new();

    for y in 0..=h_segs {
        let v = y as f32 / h_segs as f32;
        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            data.push_vertex(
                [(u - 0.5) * width, (v - 0.5) * height, 0.0],
                [0.0, 0.0, 1.0],
                [u, v],
            );
        }
    }

    let row = w_segs + 1;
    for y in 0..h_segs {
        for x in 0..w_segs {
            let i = y * row + x;
            data.push_triangle(i, i + 1, i + row);
            data.push_triangle(i + 1, i + row + 1, i + row);
        }
    }

    data
}

/// UV sphere of the given radius centred at the origin.
pub fn generate_sphere(
    radius: f32,
    longitude_segments: u32,
    latitude_segments: u32,
) -> GeometryData {
    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);
    let mut data = GeometryData::new();

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32;
        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;
            let n = [theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()];
            data.push_vertex(
                [n[0] * radius, n[1] * radius, n[2] * radius],
                n,
                [long as f32 / long_segs as f32, lat as f32 / lat_segs as f32],
            );
        }
    }

    let row = long_segs + 1;
    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * row + long;
            let second = first + row;
            data.push_triangle(first, first + 1, second);
            data.push_triangle(second, first + 1, second + 1);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices_in_range(data: &GeometryData) -> bool {
        data.indices.iter().all(|&i| (i as usize) < data.vertex_count())
    }

    #[test]
    fn cube_generation() {
        let cube = generate_cube(2.0);
        assert_eq!(cube.vertex_count(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.triangle_count(), 12); // 6 faces * 2 triangles
        assert_eq!(cube.normals.len(), cube.vertices.len());
        assert_eq!(cube.uvs.len(), cube.vertex_count() * 2);
        assert!(cube.vertices.iter().all(|c| c.abs() == 1.0));
        assert!(indices_in_range(&cube));
    }

    #[test]
    fn plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertex_count(), 9); // 3x3 grid
        assert_eq!(plane.triangle_count(), 8); // 4 quads * 2 triangles
        assert!(indices_in_range(&plane));
    }

    #[test]
    fn sphere_generation() {
        let sphere = generate_sphere(2.0, 8, 6);
        assert_eq!(sphere.vertex_count(), 9 * 7);
        assert_eq!(sphere.triangle_count(), 8 * 6 * 2);
        for p in sphere.vertices.chunks_exact(3) {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((r - 2.0).abs() < 1e-4);
        }
        assert!(indices_in_range(&sphere));
    }

    #[test]
    fn layout_matches_buffers() {
        let layout = generate_cube(1.0).layout();
        assert_eq!(layout.vertex_count, 24);
        assert_eq!(layout.triangle_count, 12);
        assert_eq!(layout.normal_count, 24);
    }
}
