use super::{BuildContext, Station, StationClock, TitleBar};
use crate::constants::*;
use crate::scene::{
    BasicMaterial, Color, NodeId, SceneGraph, Shape, StandardMaterial, TextureMap, Transform,
};
use crate::scroll::ScrollProgress;
use crate::travel::StationId;
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

const GREEN: u32 = 0x4ade80;
const TANK_THICKNESS: f32 = 0.15;
const BALL_THICKNESS: f32 = 0.1;

/// Scroll progress remapped onto the game window, clamped to `[0, 1]`.
#[inline]
pub fn local_progress(scroll: ScrollProgress) -> f32 {
    ((scroll.get() - GAME_WINDOW_START) / (GAME_WINDOW_END - GAME_WINDOW_START)).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectilePose {
    pub x: f32,
    pub y: f32,
    pub rotation_z: f32,
    pub scale: f32,
    pub visible: bool,
}

/// Cannonball pose along its arc for local progress `p`. A pure function of
/// `p`, so scrolling back replays the path in reverse.
pub fn projectile_pose(p: f32) -> ProjectilePose {
    let p = p.clamp(0.0, 1.0);
    let arc = (p * PI).sin();
    ProjectilePose {
        x: PROJECTILE_X_START + (PROJECTILE_X_END - PROJECTILE_X_START) * p,
        y: PROJECTILE_Y_START + arc * PROJECTILE_ARC_HEIGHT,
        rotation_z: p * PROJECTILE_TURNS * TAU,
        scale: PROJECTILE_SCALE_BASE + arc * PROJECTILE_SCALE_VARIANCE,
        visible: p > PROJECTILE_VISIBLE_MIN && p < PROJECTILE_VISIBLE_MAX,
    }
}

/// Game showcase: a tank sprite on a textured floor firing a cannonball
/// whose flight is scrubbed by scroll position.
pub struct GameStation {
    clock: StationClock,
    title: TitleBar,
    tank: NodeId,
    tank_face: NodeId,
    ball: NodeId,
    floor: NodeId,
}

impl GameStation {
    pub fn build(ctx: &mut BuildContext<'_>, root: NodeId) -> Self {
        let tank_tex = ctx.texture(TEX_TANK);
        let ball_tex = ctx.texture(TEX_CANNONBALL);
        let floor_tex = ctx.texture(TEX_FLOOR);
        let g = &mut *ctx.graph;

        let title = TitleBar::build(
            g,
            root,
            (-3..=3).enumerate().map(|(i, x)| {
                let h = 0.5 + (i as f32 * 0.8).sin().abs() * 0.3;
                (x as f32 * 0.4, Vec3::new(0.25, h, 0.1))
            }),
            StandardMaterial::glowing(Color::hex(GREEN), 0.2),
            Some((-0.6, Vec3::new(1.5, 0.08, 0.05))),
        );

        let tank = g.add_group(
            root,
            "game.tank",
            Transform::at(-3.0, -0.5, 0.0).with_rotation(0.0, 0.2, 0.0),
        );
        let tank_face = g.add_mesh(
            tank,
            "game.tank.front",
            Transform::at(0.0, 0.0, TANK_THICKNESS / 2.0),
            Shape::plane(4.0, 2.5),
            BasicMaterial::translucent(Color::hex(GREEN), 0.8)
                .with_map(TextureMap::new(tank_tex).transparent()),
        );
        g.add_mesh(
            tank,
            "game.tank.back",
            Transform::at(0.0, 0.0, -TANK_THICKNESS / 2.0).with_rotation(0.0, PI, 0.0),
            Shape::plane(4.0, 2.5),
            BasicMaterial::color(Color::hex(0x2a3a2a)),
        );
        for (x, ry) in [(2.0, FRAC_PI_2), (-2.0, -FRAC_PI_2)] {
            g.add_mesh(
                tank,
                "game.tank.edge",
                Transform::at(x, 0.0, 0.0).with_rotation(0.0, ry, 0.0),
                Shape::plane(TANK_THICKNESS, 2.5),
                BasicMaterial::color(Color::hex(0x1a2a1a)),
            );
        }

        let ball = g.add_group(root, "game.cannonball", Transform::at(0.0, PROJECTILE_Y_START, 0.0));
        g.add_mesh(
            ball,
            "game.cannonball.front",
            Transform::at(0.0, 0.0, BALL_THICKNESS / 2.0),
            Shape::plane(0.8, 0.8),
            BasicMaterial::color(Color::hex(0x1a1a1a))
                .with_map(TextureMap::new(ball_tex).transparent()),
        );
        g.add_mesh(
            ball,
            "game.cannonball.back",
            Transform::at(0.0, 0.0, -BALL_THICKNESS / 2.0).with_rotation(0.0, PI, 0.0),
            Shape::plane(0.8, 0.8),
            BasicMaterial::color(Color::hex(0x0a0a0a)),
        );

        let floor = g.add_mesh(
            root,
            "game.floor",
            Transform::at(0.0, -1.8, 0.0).with_rotation(-FRAC_PI_2, 0.0, 0.0),
            Shape::plane(25.0, 25.0),
            BasicMaterial::color(Color::hex(0x1a1f1a))
                .with_map(TextureMap::new(floor_tex).repeat(4.0, 4.0)),
        );

        g.add_point_light(root, "game.light", Vec3::new(0.0, 5.0, 5.0), Color::hex(GREEN), 0.6);

        Self {
            clock: StationClock::default(),
            title,
            tank,
            tank_face,
            ball,
            floor,
        }
    }

    pub fn cannonball(&self) -> NodeId {
        self.ball
    }

    pub fn tank(&self) -> NodeId {
        self.tank
    }

    pub fn tank_face(&self) -> NodeId {
        self.tank_face
    }

    pub fn floor(&self) -> NodeId {
        self.floor
    }
}

impl Station for GameStation {
    fn id(&self) -> StationId {
        StationId::Game
    }

    fn advance(&mut self, graph: &mut SceneGraph, dt: f32, scroll: ScrollProgress) {
        let t = self.clock.tick(dt);
        self.title.advance(graph, t);
        graph.transform_mut(self.tank).rotation.y = (t * 0.3).sin() * 0.03;

        let pose = projectile_pose(local_progress(scroll));
        let ball = graph.transform_mut(self.ball);
        ball.translation.x = pose.x;
        ball.translation.y = pose.y;
        ball.rotation.z = pose.rotation_z;
        ball.set_uniform_scale(pose.scale);
        graph.set_visible(self.ball, pose.visible);
    }
}
