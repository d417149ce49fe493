use super::{BuildContext, Station, StationClock, TitleBar};
use crate::scene::{
    BasicMaterial, Color, NodeId, SceneGraph, Shape, StandardMaterial, Transform,
};
use crate::scroll::ScrollProgress;
use crate::travel::StationId;
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_6, TAU};

const AMBER: u32 = 0xf59e0b;
const GOLD: u32 = 0xfbbf24;
const BRONZE: u32 = 0xd97706;

pub const COIN_COUNT: usize = 7;
pub const COIN_ORBIT_RADIUS: f32 = 5.0;
const SPARKLE_COUNT: usize = 15;

/// Position of coin `index` on its orbit at time `t`.
pub fn coin_position(index: usize, t: f32) -> Vec3 {
    let angle = index as f32 / COIN_COUNT as f32 * TAU + t * 0.5;
    Vec3::new(
        angle.cos() * COIN_ORBIT_RADIUS,
        (t * 2.0 + index as f32).sin() * 0.3,
        angle.sin() * COIN_ORBIT_RADIUS,
    )
}

fn sparkle_position(index: usize, t: f32) -> Vec3 {
    let i = index as f32;
    let angle = i / SPARKLE_COUNT as f32 * TAU + t * 0.3;
    Vec3::new(
        angle.cos() * (6.0 + (t + i).sin() * 0.5),
        (t * 2.0 + i * 0.5).sin() * 2.0,
        angle.sin() * (6.0 + (t + i).cos() * 0.5),
    )
}

/// Finance-app showcase: a glowing dashboard screen ringed by orbiting coins
/// and sparkles.
pub struct FinanceStation {
    clock: StationClock,
    title: TitleBar,
    screen_frame: NodeId,
    glow: NodeId,
    coins: Vec<NodeId>,
    sparkles: Vec<NodeId>,
}

impl FinanceStation {
    pub fn build(ctx: &mut BuildContext<'_>, root: NodeId) -> Self {
        let g = &mut *ctx.graph;

        let title = TitleBar::build(
            g,
            root,
            (-1..=1).map(|x| (x as f32 * 0.6, Vec3::new(0.4, 0.7, 0.1))),
            StandardMaterial::glowing(Color::hex(AMBER), 0.3),
            Some((-0.7, Vec3::new(2.5, 0.08, 0.05))),
        );

        let screen = g.add_group(root, "finance.screen", Transform::default());
        let screen_frame = g.add_mesh(
            screen,
            "finance.screen.frame",
            Transform::default(),
            Shape::RoundedBox {
                size: Vec3::new(5.0, 3.0, 0.2),
                radius: 0.1,
            },
            StandardMaterial::color(Color::hex(0x1a1a1a)).with_finish(0.8, 0.2),
        );
        g.add_mesh(
            screen,
            "finance.screen.display",
            Transform::at(0.0, 0.0, 0.11),
            Shape::plane(4.6, 2.6),
            StandardMaterial::glowing(Color::hex(AMBER), 0.2),
        );
        let glow = g.add_mesh(
            screen,
            "finance.screen.glow",
            Transform::at(0.0, 0.0, -0.2),
            Shape::plane(6.0, 4.0),
            BasicMaterial::translucent(Color::hex(AMBER), 0.1),
        );
        for (pos, size, hex, glow_k) in [
            (Vec3::new(-1.5, 0.8, 0.12), (1.2, 0.6), GOLD, 0.3),
            (Vec3::new(1.5, 0.8, 0.12), (1.2, 0.6), 0xfb923c, 0.3),
            (Vec3::new(0.0, -0.5, 0.12), (3.0, 1.0), BRONZE, 0.2),
        ] {
            g.add_mesh(
                screen,
                "finance.screen.panel",
                Transform::at(pos.x, pos.y, pos.z),
                Shape::plane(size.0, size.1),
                StandardMaterial::glowing(Color::hex(hex), glow_k),
            );
        }

        let coins = (0..COIN_COUNT)
            .map(|i| {
                let p = coin_position(i, 0.0);
                let coin = g.add_group(root, "finance.coin", Transform::at(p.x, p.y, p.z));
                g.add_mesh(
                    coin,
                    "finance.coin.body",
                    Transform::default(),
                    Shape::Cylinder {
                        radius_top: 0.4,
                        radius_bottom: 0.4,
                        height: 0.08,
                        segments: 32,
                    },
                    StandardMaterial::color(Color::hex(GOLD))
                        .with_emissive(Color::hex(AMBER), 0.4)
                        .with_finish(0.9, 0.1),
                );
                g.add_mesh(
                    coin,
                    "finance.coin.rim",
                    Transform::default(),
                    Shape::Torus {
                        radius: 0.4,
                        tube: 0.02,
                        radial_segments: 8,
                        tubular_segments: 32,
                    },
                    StandardMaterial::color(Color::hex(BRONZE)).with_finish(0.9, 0.2),
                );
                g.add_mesh(
                    coin,
                    "finance.coin.mark",
                    Transform::at(0.0, 0.05, 0.0).with_rotation(FRAC_PI_2, 0.0, 0.0),
                    Shape::Torus {
                        radius: 0.15,
                        tube: 0.03,
                        radial_segments: 8,
                        tubular_segments: 16,
                    },
                    StandardMaterial::color(Color::hex(0x92400e)),
                );
                coin
            })
            .collect();

        let sparkles = (0..SPARKLE_COUNT)
            .map(|_| {
                g.add_mesh(
                    root,
                    "finance.sparkle",
                    Transform::default(),
                    Shape::sphere(0.1, 8),
                    BasicMaterial::translucent(Color::hex(GOLD), 0.8),
                )
            })
            .collect();

        g.add_point_light(root, "finance.light.key", Vec3::new(0.0, 5.0, 5.0), Color::hex(AMBER), 1.5);
        g.add_point_light(root, "finance.light.right", Vec3::new(5.0, 0.0, 0.0), Color::hex(GOLD), 0.5);
        g.add_point_light(root, "finance.light.left", Vec3::new(-5.0, 0.0, 0.0), Color::hex(BRONZE), 0.5);

        Self {
            clock: StationClock::default(),
            title,
            screen_frame,
            glow,
            coins,
            sparkles,
        }
    }

    pub fn coins(&self) -> &[NodeId] {
        &self.coins
    }
}

impl Station for FinanceStation {
    fn id(&self) -> StationId {
        StationId::Finance
    }

    fn advance(&mut self, graph: &mut SceneGraph, dt: f32, _scroll: ScrollProgress) {
        let t = self.clock.tick(dt);
        self.title.advance(graph, t);

        graph.transform_mut(self.screen_frame).rotation.y = (t * 0.2).sin() * 0.05;
        graph
            .transform_mut(self.glow)
            .set_uniform_scale(1.0 + (t * 2.0).sin() * 0.02);

        for (i, &coin) in self.coins.iter().enumerate() {
            let tr = graph.transform_mut(coin);
            tr.translation = coin_position(i, t);
            tr.rotation.y = t * 2.0;
            tr.rotation.x = FRAC_PI_6;
        }

        for (i, &s) in self.sparkles.iter().enumerate() {
            let tr = graph.transform_mut(s);
            tr.translation = sparkle_position(i, t);
            tr.set_uniform_scale(0.05 + (t * 4.0 + i as f32).sin() * 0.03);
        }
    }
}
