use super::{BuildContext, Station};
use crate::constants::{STAR_COUNT, STAR_SEED};
use crate::scene::{
    BasicMaterial, Color, NodeId, SceneGraph, Shape, SkyGradient, StandardMaterial, Transform,
};
use crate::scroll::ScrollProgress;
use crate::travel::StationId;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SKY: SkyGradient = SkyGradient {
    top: [0.15, 0.18, 0.25],
    bottom: [0.22, 0.25, 0.28],
    offset: 20.0,
    exponent: 0.4,
};

const FRAME_THICKNESS: f32 = 0.08;
const FRAME_WIDTH: f32 = 4.0;
const FRAME_HEIGHT: f32 = 6.0;

/// Star positions and radii. Deterministic for a given seed.
pub fn star_field(seed: u64, count: usize) -> Vec<(Vec3, f32)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let pos = Vec3::new(
                (rng.gen::<f32>() - 0.5) * 50.0,
                (rng.gen::<f32>() - 0.5) * 30.0 + 5.0,
                (rng.gen::<f32>() - 0.5) * 30.0 - 10.0,
            );
            let size = rng.gen::<f32>() * 0.08 + 0.02;
            (pos, size)
        })
        .collect()
}

/// Opening vignette: sky dome, a soft halo, a few stars and an empty doorway
/// frame. Nothing here moves.
pub struct IntroStation {
    stars: Vec<NodeId>,
}

impl IntroStation {
    pub fn build(ctx: &mut BuildContext<'_>, root: NodeId) -> Self {
        let g = &mut *ctx.graph;
        g.add_mesh(root, "intro.sky", Transform::default(), Shape::sphere(50.0, 32), SKY);

        let halo = g.add_group(root, "intro.halo", Transform::at(0.0, 10.0, -18.0));
        for (radius, hex, opacity) in [
            (1.5, 0xc0c8d0, 0.8),
            (2.8, 0xa8b0b8, 0.25),
            (4.2, 0x909098, 0.08),
        ] {
            g.add_mesh(
                halo,
                "intro.halo.layer",
                Transform::default(),
                Shape::sphere(radius, 32),
                BasicMaterial::translucent(Color::hex(hex), opacity),
            );
        }

        let stars = star_field(STAR_SEED, STAR_COUNT)
            .into_iter()
            .map(|(pos, size)| {
                g.add_mesh(
                    root,
                    "intro.star",
                    Transform::at(pos.x, pos.y, pos.z),
                    Shape::sphere(size, 8),
                    BasicMaterial::translucent(Color::hex(0xd0d8e0), 0.7),
                )
            })
            .collect();

        let frame = g.add_group(root, "intro.frame", Transform::default());
        let bar = StandardMaterial::color(Color::hex(0xe0e0e0));
        let t = FRAME_THICKNESS;
        for y in [FRAME_HEIGHT / 2.0, -FRAME_HEIGHT / 2.0] {
            g.add_mesh(
                frame,
                "intro.frame.h",
                Transform::at(0.0, y, 0.0),
                Shape::cuboid(FRAME_WIDTH + t * 2.0, t, t),
                bar,
            );
        }
        for x in [-FRAME_WIDTH / 2.0, FRAME_WIDTH / 2.0] {
            g.add_mesh(
                frame,
                "intro.frame.v",
                Transform::at(x, 0.0, 0.0),
                Shape::cuboid(t, FRAME_HEIGHT, t),
                bar,
            );
        }

        Self { stars }
    }

    pub fn stars(&self) -> &[NodeId] {
        &self.stars
    }
}

impl Station for IntroStation {
    fn id(&self) -> StationId {
        StationId::Intro
    }

    fn advance(&mut self, _graph: &mut SceneGraph, _dt: f32, _scroll: ScrollProgress) {}
}
