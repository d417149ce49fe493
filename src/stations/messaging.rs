use super::{BuildContext, Label, Station, StationClock, TitleBar};
use crate::constants::TEX_PARLEY_SCREEN;
use crate::scene::{
    BasicMaterial, Color, NodeId, SceneGraph, Shape, StandardMaterial, TextureMap, Transform,
};
use crate::scroll::ScrollProgress;
use crate::travel::StationId;
use glam::Vec3;

const BLUE: u32 = 0x3b82f6;
const GREEN: u32 = 0x22c55e;

/// Chat bubble text and whether it sits on the left of the phone.
pub const CHAT_LINES: [(&str, bool); 3] = [
    ("Hey! Can you send the update?", true),
    ("ETA 10 mins.", true),
    ("On it", false),
];

struct Bubble {
    node: NodeId,
    base: Vec3,
}

/// Messaging-app showcase: a phone mockup with a screenshot screen and chat
/// bubbles drifting beside it.
pub struct MessagingStation {
    clock: StationClock,
    title: TitleBar,
    phone: NodeId,
    screen: NodeId,
    bubbles: Vec<Bubble>,
    labels: Vec<Label>,
}

impl MessagingStation {
    pub fn build(ctx: &mut BuildContext<'_>, root: NodeId) -> Self {
        let screen_tex = ctx.texture(TEX_PARLEY_SCREEN);
        let g = &mut *ctx.graph;

        let title = TitleBar::build(
            g,
            root,
            (-2..=2).map(|x| {
                let x = x as f32;
                (x * 0.5, Vec3::new(0.3, 0.6 + x.abs() * 0.1, 0.1))
            }),
            StandardMaterial::glowing(Color::hex(BLUE), 0.3),
            Some((-0.8, Vec3::new(2.0, 0.1, 0.05))),
        );

        let phone = g.add_group(root, "messaging.phone", Transform::default());
        g.add_mesh(
            phone,
            "messaging.phone.body",
            Transform::default(),
            Shape::RoundedBox {
                size: Vec3::new(3.0, 6.0, 0.3),
                radius: 0.2,
            },
            StandardMaterial::color(Color::hex(0x1a1a1a)).with_finish(0.8, 0.2),
        );
        let screen = g.add_mesh(
            phone,
            "messaging.phone.screen",
            Transform::at(0.0, 0.0, 0.16),
            Shape::plane(2.6, 5.4),
            BasicMaterial::color(Color::hex(0x111827)).with_map(TextureMap::new(screen_tex)),
        );
        g.add_mesh(
            phone,
            "messaging.phone.notch",
            Transform::at(0.0, 2.55, 0.17),
            Shape::plane(0.8, 0.15),
            BasicMaterial::color(Color::BLACK),
        );
        g.add_mesh(
            phone,
            "messaging.phone.camera",
            Transform::at(0.0, 2.55, 0.18),
            Shape::Circle {
                radius: 0.05,
                segments: 16,
            },
            BasicMaterial::color(Color::hex(0x222222)),
        );

        let mut bubbles = Vec::with_capacity(CHAT_LINES.len());
        let mut labels = Vec::with_capacity(CHAT_LINES.len());
        for (i, &(text, is_left)) in CHAT_LINES.iter().enumerate() {
            let base = Vec3::new(if is_left { -4.0 } else { 4.0 }, -1.0 + i as f32 * 1.5, 0.0);
            let hex = if is_left { BLUE } else { GREEN };
            let node = g.add_group(root, "messaging.bubble", Transform::at(base.x, base.y, base.z));
            g.add_mesh(
                node,
                "messaging.bubble.body",
                Transform::default(),
                Shape::RoundedBox {
                    size: Vec3::new(2.4, 0.9, 0.1),
                    radius: 0.25,
                },
                StandardMaterial::glowing(Color::hex(hex), 0.2).with_opacity(0.85),
            );
            let anchor = g.add_group(node, "messaging.bubble.label", Transform::at(0.0, 0.0, 0.1));
            bubbles.push(Bubble { node, base });
            labels.push(Label { anchor, text });
        }

        g.add_point_light(root, "messaging.light.blue", Vec3::new(5.0, 5.0, 5.0), Color::hex(BLUE), 1.0);
        g.add_point_light(
            root,
            "messaging.light.green",
            Vec3::new(-5.0, -5.0, 5.0),
            Color::hex(GREEN),
            0.5,
        );

        Self {
            clock: StationClock::default(),
            title,
            phone,
            screen,
            bubbles,
            labels,
        }
    }

    pub fn phone(&self) -> NodeId {
        self.phone
    }

    pub fn screen(&self) -> NodeId {
        self.screen
    }
}

impl Station for MessagingStation {
    fn id(&self) -> StationId {
        StationId::Messaging
    }

    fn advance(&mut self, graph: &mut SceneGraph, dt: f32, _scroll: ScrollProgress) {
        let t = self.clock.tick(dt);
        self.title.advance(graph, t);

        let phone = graph.transform_mut(self.phone);
        phone.rotation.y = (t * 0.3).sin() * 0.08;
        phone.translation.y = (t * 0.5).sin() * 0.1;

        for (i, b) in self.bubbles.iter().enumerate() {
            let i = i as f32;
            let tr = graph.transform_mut(b.node);
            tr.translation.y = b.base.y + (t * 0.4 + i).sin() * 0.08;
            tr.translation.x = b.base.x + (t * 0.25 + i).sin() * 0.03;
        }
    }

    fn labels(&self) -> &[Label] {
        &self.labels
    }
}
