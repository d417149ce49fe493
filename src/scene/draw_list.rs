use super::{Color, NodeId, NodeKind, SceneGraph, Shape, Surface};
use crate::textures::TextureRegistry;
use glam::{Mat4, Vec3};

#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub node: NodeId,
    pub shape: Shape,
    pub model: Mat4,
    pub surface: Surface,
    /// Distance in front of the camera; larger is further away.
    pub view_depth: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightItem {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
}

/// Everything the renderer needs for one frame, in draw order.
#[derive(Debug, Default)]
pub struct DrawList {
    pub opaque: Vec<DrawItem>,
    pub transparent: Vec<DrawItem>,
    pub lights: Vec<LightItem>,
    world: Vec<Mat4>,
    visible: Vec<bool>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from the current graph state. Hidden subtrees are skipped and
    /// transparent items are sorted back to front.
    pub fn rebuild(&mut self, graph: &SceneGraph, textures: &TextureRegistry, view: Mat4) {
        self.opaque.clear();
        self.transparent.clear();
        self.lights.clear();
        graph.resolve_world(&mut self.world, &mut self.visible);

        for (id, node) in graph.iter() {
            if !self.visible[id.index()] {
                continue;
            }
            let model = self.world[id.index()];
            match &node.kind {
                NodeKind::Group => {}
                NodeKind::PointLight(light) => self.lights.push(LightItem {
                    position: model.transform_point3(Vec3::ZERO),
                    color: light.color,
                    intensity: light.intensity,
                }),
                NodeKind::Mesh(mesh) => {
                    let surface = mesh.material.resolve(textures);
                    let center = view.transform_point3(model.transform_point3(Vec3::ZERO));
                    let item = DrawItem {
                        node: id,
                        shape: mesh.shape,
                        model,
                        surface,
                        view_depth: -center.z,
                    };
                    if surface.transparent {
                        self.transparent.push(item);
                    } else {
                        self.opaque.push(item);
                    }
                }
            }
        }

        self.transparent
            .sort_by(|a, b| b.view_depth.total_cmp(&a.view_depth));
    }

    pub fn len(&self) -> usize {
        self.opaque.len() + self.transparent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn items(&self) -> impl Iterator<Item = &DrawItem> {
        self.opaque.iter().chain(self.transparent.iter())
    }
}
