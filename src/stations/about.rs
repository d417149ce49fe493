use super::{BuildContext, Station, StationClock, TitleBar};
use crate::scene::{
    BasicMaterial, Color, NodeId, PolyhedronKind, SceneGraph, Shape, StandardMaterial, Transform,
};
use crate::scroll::ScrollProgress;
use crate::travel::StationId;
use glam::Vec3;

const VIOLET: u32 = 0x8b5cf6;
const CYAN: u32 = 0x06b6d4;
const PINK: u32 = 0xec4899;
const EMERALD: u32 = 0x10b981;

/// About/contact finale: floating polyhedra in front of a faint grid.
pub struct AboutStation {
    clock: StationClock,
    title: TitleBar,
    shapes: Vec<NodeId>,
    lines: NodeId,
}

impl AboutStation {
    pub fn build(ctx: &mut BuildContext<'_>, root: NodeId) -> Self {
        let g = &mut *ctx.graph;

        let title = TitleBar::build(
            g,
            root,
            (-4..=4).enumerate().map(|(i, x)| {
                let h = 0.4 + (i as f32 * 0.5).sin() * 0.2;
                (x as f32 * 0.35, Vec3::new(0.2, h, 0.08))
            }),
            StandardMaterial::glowing(Color::hex(VIOLET), 0.2),
            None,
        );

        let cluster = g.add_group(root, "about.shapes", Transform::at(0.0, 0.0, -5.0));
        let shapes = [
            (PolyhedronKind::Octahedron, 0.8, Vec3::new(-6.0, 2.0, 0.0), VIOLET),
            (PolyhedronKind::Icosahedron, 0.6, Vec3::new(6.0, -1.0, 0.0), CYAN),
            (PolyhedronKind::Tetrahedron, 0.7, Vec3::new(-5.0, -2.0, 2.0), PINK),
            (PolyhedronKind::Dodecahedron, 0.5, Vec3::new(5.0, 1.0, -2.0), EMERALD),
        ]
        .into_iter()
        .map(|(kind, radius, pos, hex)| {
            g.add_mesh(
                cluster,
                "about.shape",
                Transform::at(pos.x, pos.y, pos.z),
                Shape::Polyhedron { kind, radius },
                StandardMaterial::glowing(Color::hex(hex), 0.3).with_opacity(0.8),
            )
        })
        .collect();

        let lines = g.add_group(root, "about.lines", Transform::at(0.0, 0.0, -3.0));
        for (i, y) in [-3.0, -1.5, 0.0, 1.5, 3.0].into_iter().enumerate() {
            g.add_mesh(
                lines,
                "about.lines.h",
                Transform::at(0.0, y, 0.0),
                Shape::cuboid(12.0, 0.02, 0.02),
                BasicMaterial::translucent(Color::WHITE, 0.1 + i as f32 * 0.05),
            );
        }
        for (i, x) in [-5.0, -2.5, 0.0, 2.5, 5.0].into_iter().enumerate() {
            g.add_mesh(
                lines,
                "about.lines.v",
                Transform::at(x, 0.0, 0.0),
                Shape::cuboid(0.02, 8.0, 0.02),
                BasicMaterial::translucent(Color::WHITE, 0.1 + i as f32 * 0.03),
            );
        }

        g.add_point_light(root, "about.light.key", Vec3::new(0.0, 5.0, 5.0), Color::hex(VIOLET), 1.0);
        g.add_point_light(root, "about.light.left", Vec3::new(-5.0, 0.0, 0.0), Color::hex(CYAN), 0.5);
        g.add_point_light(root, "about.light.right", Vec3::new(5.0, 0.0, 0.0), Color::hex(PINK), 0.5);

        Self {
            clock: StationClock::default(),
            title,
            shapes,
            lines,
        }
    }

    pub fn shapes(&self) -> &[NodeId] {
        &self.shapes
    }
}

impl Station for AboutStation {
    fn id(&self) -> StationId {
        StationId::About
    }

    fn advance(&mut self, graph: &mut SceneGraph, dt: f32, _scroll: ScrollProgress) {
        let t = self.clock.tick(dt);
        self.title.advance(graph, t);

        for (i, &s) in self.shapes.iter().enumerate() {
            let i = i as f32;
            let tr = graph.transform_mut(s);
            tr.rotation.x = t * 0.2 + i;
            tr.rotation.y = t * 0.3 + i * 0.5;
            tr.translation.y = (t * 0.5 + i).sin() * 0.5 + (i - 1.5) * 2.0;
        }

        graph.transform_mut(self.lines).rotation.z = (t * 0.2).sin() * 0.05;
    }
}
