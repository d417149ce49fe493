use glam::Vec3;
use smallvec::{smallvec, SmallVec};
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    fn push(&mut self, position: Vec3, normal: Vec3, uv: [f32; 2]) -> u32 {
        let i = self.vertices.len() as u32;
        self.vertices.push(Vertex {
            position: position.to_array(),
            normal: normal.to_array(),
            uv,
        });
        i
    }

    /// Index a `(cols + 1) x (rows + 1)` vertex grid starting at `base`.
    fn grid(&mut self, base: u32, cols: u32, rows: u32) {
        let stride = cols + 1;
        for y in 0..rows {
            for x in 0..cols {
                let a = base + y * stride + x;
                let b = a + stride;
                self.indices
                    .extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
            }
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolyhedronKind {
    Tetrahedron,
    Octahedron,
    Icosahedron,
    Dodecahedron,
}

/// Primitive geometry, sized in local units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Box { size: Vec3 },
    /// Drawn as a plain box; the corner radius only feeds the cache key.
    RoundedBox { size: Vec3, radius: f32 },
    /// XY plane facing +Z.
    Plane { width: f32, height: f32 },
    Circle { radius: f32, segments: u32 },
    Sphere { radius: f32, width_segments: u32, height_segments: u32 },
    /// Y-up cylinder.
    Cylinder { radius_top: f32, radius_bottom: f32, height: f32, segments: u32 },
    /// Ring in the XY plane.
    Torus { radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32 },
    Polyhedron { kind: PolyhedronKind, radius: f32 },
}

pub type ShapeKey = SmallVec<[u32; 6]>;

impl Shape {
    pub fn cuboid(x: f32, y: f32, z: f32) -> Self {
        Shape::Box { size: Vec3::new(x, y, z) }
    }

    pub fn plane(width: f32, height: f32) -> Self {
        Shape::Plane { width, height }
    }

    pub fn sphere(radius: f32, segments: u32) -> Self {
        Shape::Sphere {
            radius,
            width_segments: segments,
            height_segments: segments,
        }
    }

    /// Identity for GPU buffer reuse: equal keys produce identical meshes.
    pub fn key(&self) -> ShapeKey {
        let b = f32::to_bits;
        match *self {
            Shape::Box { size } => smallvec![0, b(size.x), b(size.y), b(size.z)],
            Shape::RoundedBox { size, radius } => {
                smallvec![1, b(size.x), b(size.y), b(size.z), b(radius)]
            }
            Shape::Plane { width, height } => smallvec![2, b(width), b(height)],
            Shape::Circle { radius, segments } => smallvec![3, b(radius), segments],
            Shape::Sphere {
                radius,
                width_segments,
                height_segments,
            } => smallvec![4, b(radius), width_segments, height_segments],
            Shape::Cylinder {
                radius_top,
                radius_bottom,
                height,
                segments,
            } => smallvec![5, b(radius_top), b(radius_bottom), b(height), segments],
            Shape::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => smallvec![6, b(radius), b(tube), radial_segments, tubular_segments],
            Shape::Polyhedron { kind, radius } => smallvec![7, kind as u32, b(radius)],
        }
    }

    pub fn mesh(&self) -> MeshData {
        match *self {
            Shape::Box { size } | Shape::RoundedBox { size, .. } => cuboid(size),
            Shape::Plane { width, height } => plane(width, height),
            Shape::Circle { radius, segments } => circle(radius, segments.max(3)),
            Shape::Sphere {
                radius,
                width_segments,
                height_segments,
            } => sphere(radius, width_segments.max(3), height_segments.max(2)),
            Shape::Cylinder {
                radius_top,
                radius_bottom,
                height,
                segments,
            } => cylinder(radius_top, radius_bottom, height, segments.max(3)),
            Shape::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => torus(radius, tube, radial_segments.max(3), tubular_segments.max(3)),
            Shape::Polyhedron { kind, radius } => polyhedron(kind, radius),
        }
    }
}

fn cuboid(size: Vec3) -> MeshData {
    let half = size * 0.5;
    // (normal, u, v) with u x v == normal so faces wind CCW from outside
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let mut m = MeshData::default();
    for (n, u, v) in faces {
        let base = m.vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = (n + u * su + v * sv) * half;
            m.push(p, n, [(su + 1.0) * 0.5, (1.0 - sv) * 0.5]);
        }
        m.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    m
}

fn plane(width: f32, height: f32) -> MeshData {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let mut m = MeshData::default();
    m.push(Vec3::new(-hw, -hh, 0.0), Vec3::Z, [0.0, 1.0]);
    m.push(Vec3::new(hw, -hh, 0.0), Vec3::Z, [1.0, 1.0]);
    m.push(Vec3::new(hw, hh, 0.0), Vec3::Z, [1.0, 0.0]);
    m.push(Vec3::new(-hw, hh, 0.0), Vec3::Z, [0.0, 0.0]);
    m.indices.extend_from_slice(&[0, 1, 2, 0, 2, 3]);
    m
}

fn circle(radius: f32, segments: u32) -> MeshData {
    let mut m = MeshData::default();
    let center = m.push(Vec3::ZERO, Vec3::Z, [0.5, 0.5]);
    for i in 0..=segments {
        let a = i as f32 / segments as f32 * TAU;
        let (s, c) = a.sin_cos();
        m.push(
            Vec3::new(c * radius, s * radius, 0.0),
            Vec3::Z,
            [(c + 1.0) * 0.5, 1.0 - (s + 1.0) * 0.5],
        );
    }
    for i in 1..=segments {
        m.indices.extend_from_slice(&[center, i, i + 1]);
    }
    m
}

fn sphere(radius: f32, ws: u32, hs: u32) -> MeshData {
    let mut m = MeshData::default();
    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let n = Vec3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            m.push(n * radius, n, [u, v]);
        }
    }
    m.grid(0, ws, hs);
    m
}

fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> MeshData {
    let mut m = MeshData::default();
    let half = height * 0.5;
    let slope = if height > 0.0 {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };
    for row in 0..=1u32 {
        let v = row as f32;
        let r = radius_top + (radius_bottom - radius_top) * v;
        for ix in 0..=segments {
            let u = ix as f32 / segments as f32;
            let (s, c) = (u * TAU).sin_cos();
            let n = Vec3::new(s, slope, c).normalize_or_zero();
            m.push(Vec3::new(r * s, half - v * height, r * c), n, [u, v]);
        }
    }
    m.grid(0, segments, 1);
    for (y, r, n) in [(half, radius_top, Vec3::Y), (-half, radius_bottom, Vec3::NEG_Y)] {
        if r <= 0.0 {
            continue;
        }
        let center = m.push(Vec3::new(0.0, y, 0.0), n, [0.5, 0.5]);
        for ix in 0..=segments {
            let (s, c) = (ix as f32 / segments as f32 * TAU).sin_cos();
            m.push(Vec3::new(r * s, y, r * c), n, [(s + 1.0) * 0.5, (c + 1.0) * 0.5]);
        }
        for ix in 0..segments {
            let a = center + 1 + ix;
            if n.y > 0.0 {
                m.indices.extend_from_slice(&[a, a + 1, center]);
            } else {
                m.indices.extend_from_slice(&[a + 1, a, center]);
            }
        }
    }
    m
}

fn torus(radius: f32, tube: f32, radial: u32, tubular: u32) -> MeshData {
    let mut m = MeshData::default();
    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let ring = radius + tube * v.cos();
            let p = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            m.push(
                p,
                (p - center).normalize_or_zero(),
                [i as f32 / tubular as f32, j as f32 / radial as f32],
            );
        }
    }
    m.grid(0, tubular, radial);
    m
}

const PHI: f32 = 1.618_034;
const INV_PHI: f32 = 0.618_034;

const TETRA_VERTS: [[f32; 3]; 4] = [[1.0, 1.0, 1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, -1.0], [1.0, -1.0, -1.0]];
const TETRA_FACES: [u32; 12] = [2, 1, 0, 0, 3, 2, 1, 3, 0, 2, 3, 1];

const OCTA_VERTS: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];
const OCTA_FACES: [u32; 24] = [
    0, 2, 4, 0, 4, 3, 0, 3, 5, 0, 5, 2, 1, 2, 5, 1, 5, 3, 1, 3, 4, 1, 4, 2,
];

const ICOSA_VERTS: [[f32; 3]; 12] = [
    [-1.0, PHI, 0.0],
    [1.0, PHI, 0.0],
    [-1.0, -PHI, 0.0],
    [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI],
    [0.0, 1.0, PHI],
    [0.0, -1.0, -PHI],
    [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0],
    [PHI, 0.0, 1.0],
    [-PHI, 0.0, -1.0],
    [-PHI, 0.0, 1.0],
];
const ICOSA_FACES: [u32; 60] = [
    0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, 1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1,
    8, 3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, 4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
];

const DODECA_VERTS: [[f32; 3]; 20] = [
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    [0.0, -INV_PHI, -PHI],
    [0.0, -INV_PHI, PHI],
    [0.0, INV_PHI, -PHI],
    [0.0, INV_PHI, PHI],
    [-INV_PHI, -PHI, 0.0],
    [-INV_PHI, PHI, 0.0],
    [INV_PHI, -PHI, 0.0],
    [INV_PHI, PHI, 0.0],
    [-PHI, 0.0, -INV_PHI],
    [PHI, 0.0, -INV_PHI],
    [-PHI, 0.0, INV_PHI],
    [PHI, 0.0, INV_PHI],
];
const DODECA_FACES: [u32; 108] = [
    3, 11, 7, 3, 7, 15, 3, 15, 13, 7, 19, 17, 7, 17, 6, 7, 6, 15, 17, 4, 8, 17, 8, 10, 17, 10, 6,
    8, 0, 16, 8, 16, 2, 8, 2, 10, 0, 12, 1, 0, 1, 18, 0, 18, 16, 6, 10, 2, 6, 2, 13, 6, 13, 15, 2,
    16, 18, 2, 18, 3, 2, 3, 13, 18, 1, 9, 18, 9, 11, 18, 11, 3, 4, 14, 12, 4, 12, 0, 4, 0, 8, 11,
    9, 5, 11, 5, 19, 11, 19, 7, 19, 5, 14, 19, 14, 4, 19, 4, 17, 1, 12, 14, 1, 14, 5, 1, 5, 9,
];

/// Flat-shaded polyhedron with every vertex projected onto the sphere of
/// `radius`.
fn polyhedron(kind: PolyhedronKind, radius: f32) -> MeshData {
    let (verts, faces): (&[[f32; 3]], &[u32]) = match kind {
        PolyhedronKind::Tetrahedron => (&TETRA_VERTS, &TETRA_FACES),
        PolyhedronKind::Octahedron => (&OCTA_VERTS, &OCTA_FACES),
        PolyhedronKind::Icosahedron => (&ICOSA_VERTS, &ICOSA_FACES),
        PolyhedronKind::Dodecahedron => (&DODECA_VERTS, &DODECA_FACES),
    };
    let project = |i: u32| Vec3::from(verts[i as usize]).normalize() * radius;
    let mut m = MeshData::default();
    for tri in faces.chunks_exact(3) {
        let (mut a, b, mut c) = (project(tri[0]), project(tri[1]), project(tri[2]));
        let mut n = (b - a).cross(c - a).normalize_or_zero();
        if n.dot(a + b + c) < 0.0 {
            std::mem::swap(&mut a, &mut c);
            n = -n;
        }
        for p in [a, b, c] {
            let d = p.normalize_or_zero();
            let uv = [d.z.atan2(d.x) / TAU + 0.5, 0.5 - d.y.asin() / PI];
            let i = m.push(p, n, uv);
            m.indices.push(i);
        }
    }
    m
}
