// Host-side tests for primitive mesh generation.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/textures.rs"]
mod textures;
#[path = "../src/scene/mod.rs"]
mod scene;

use glam::Vec3;
use scene::{MeshData, PolyhedronKind, Shape};

fn all_shapes() -> Vec<Shape> {
    vec![
        Shape::cuboid(1.0, 2.0, 3.0),
        Shape::RoundedBox {
            size: Vec3::new(1.8, 3.6, 0.2),
            radius: 0.15,
        },
        Shape::plane(4.0, 2.5),
        Shape::Circle {
            radius: 1.0,
            segments: 24,
        },
        Shape::sphere(2.0, 16),
        Shape::Cylinder {
            radius_top: 0.5,
            radius_bottom: 0.5,
            height: 0.1,
            segments: 32,
        },
        Shape::Cylinder {
            radius_top: 0.0,
            radius_bottom: 1.0,
            height: 2.0,
            segments: 12,
        },
        Shape::Torus {
            radius: 0.5,
            tube: 0.05,
            radial_segments: 8,
            tubular_segments: 32,
        },
        Shape::Polyhedron {
            kind: PolyhedronKind::Tetrahedron,
            radius: 1.0,
        },
        Shape::Polyhedron {
            kind: PolyhedronKind::Octahedron,
            radius: 1.0,
        },
        Shape::Polyhedron {
            kind: PolyhedronKind::Icosahedron,
            radius: 1.0,
        },
        Shape::Polyhedron {
            kind: PolyhedronKind::Dodecahedron,
            radius: 1.0,
        },
    ]
}

fn tri(m: &MeshData, t: usize) -> [Vec3; 3] {
    let p = |i: u32| Vec3::from(m.vertices[i as usize].position);
    [p(m.indices[3 * t]), p(m.indices[3 * t + 1]), p(m.indices[3 * t + 2])]
}

#[test]
fn indices_form_triangles_within_bounds() {
    for shape in all_shapes() {
        let m = shape.mesh();
        assert!(!m.vertices.is_empty(), "{:?}", shape);
        assert_eq!(m.indices.len() % 3, 0, "{:?}", shape);
        assert!(m.triangle_count() > 0);
        let n = m.vertices.len() as u32;
        assert!(m.indices.iter().all(|&i| i < n), "{:?}", shape);
    }
}

#[test]
fn normals_are_unit_length() {
    for shape in all_shapes() {
        for v in shape.mesh().vertices {
            let len = Vec3::from(v.normal).length();
            assert!((len - 1.0).abs() < 1e-3, "{:?}: |n|={}", shape, len);
        }
    }
}

#[test]
fn box_faces_wind_outward() {
    let m = Shape::cuboid(2.0, 1.0, 0.5).mesh();
    assert_eq!(m.triangle_count(), 12);
    for t in 0..m.triangle_count() {
        let [a, b, c] = tri(&m, t);
        let face_normal = (b - a).cross(c - a);
        let centroid = (a + b + c) / 3.0;
        assert!(face_normal.dot(centroid) > 0.0, "triangle {} faces inward", t);
    }
}

#[test]
fn box_extents_match_size() {
    let m = Shape::cuboid(2.0, 4.0, 6.0).mesh();
    let max = m
        .vertices
        .iter()
        .fold(Vec3::ZERO, |acc, v| acc.max(Vec3::from(v.position).abs()));
    assert_eq!(max, Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn polyhedra_sit_on_their_sphere() {
    let expected = [
        (PolyhedronKind::Tetrahedron, 4),
        (PolyhedronKind::Octahedron, 8),
        (PolyhedronKind::Icosahedron, 20),
        (PolyhedronKind::Dodecahedron, 36),
    ];
    for (kind, triangles) in expected {
        let m = Shape::Polyhedron { kind, radius: 0.8 }.mesh();
        assert_eq!(m.triangle_count(), triangles, "{:?}", kind);
        for v in &m.vertices {
            assert!((Vec3::from(v.position).length() - 0.8).abs() < 1e-4);
        }
        for t in 0..m.triangle_count() {
            let [a, b, c] = tri(&m, t);
            let n = Vec3::from(m.vertices[m.indices[3 * t] as usize].normal);
            assert!(n.dot(a + b + c) > 0.0, "{:?} triangle {} faces inward", kind, t);
            assert!((b - a).cross(c - a).dot(n) > 0.0, "{:?} winding disagrees with normal", kind);
        }
    }
}

#[test]
fn sphere_vertices_lie_on_radius() {
    let m = Shape::sphere(50.0, 32).mesh();
    for v in &m.vertices {
        assert!((Vec3::from(v.position).length() - 50.0).abs() < 1e-2);
    }
}

#[test]
fn plane_faces_positive_z() {
    let m = Shape::plane(25.0, 25.0).mesh();
    let [a, b, c] = tri(&m, 0);
    assert!((b - a).cross(c - a).z > 0.0);
    assert!(m.vertices.iter().all(|v| v.position[2] == 0.0));
}

#[test]
fn shape_keys_identify_geometry() {
    assert_eq!(Shape::cuboid(1.0, 1.0, 1.0).key(), Shape::cuboid(1.0, 1.0, 1.0).key());
    assert_ne!(Shape::cuboid(1.0, 1.0, 1.0).key(), Shape::cuboid(1.0, 1.0, 2.0).key());
    let rounded = Shape::RoundedBox {
        size: Vec3::ONE,
        radius: 0.1,
    };
    assert_ne!(rounded.key(), Shape::cuboid(1.0, 1.0, 1.0).key());
    assert_ne!(Shape::sphere(1.0, 8).key(), Shape::sphere(1.0, 16).key());
}
