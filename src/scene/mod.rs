//! Scene-object arena.
//!
//! Every persistent mesh, light and group lives in a flat `Vec` and is
//! addressed by a stable [`NodeId`]. Stations build their nodes once and then
//! only mutate transforms/visibility in their per-frame pass; nothing is
//! re-created while the loop runs.

use glam::{EulerRot, Mat4, Quat, Vec3};

pub mod draw_list;
mod material;
mod mesh;

pub use material::*;
pub use mesh::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Local transform. Rotation is XYZ Euler angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: Vec3::new(x, y, z),
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vec3::new(x, y, z);
        self
    }

    pub fn with_uniform_scale(mut self, s: f32) -> Self {
        self.scale = Vec3::splat(s);
        self
    }

    pub fn set_uniform_scale(&mut self, s: f32) {
        self.scale = Vec3::splat(s);
    }

    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, q, self.translation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeshNode {
    pub shape: Shape,
    pub material: Material,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh(MeshNode),
    PointLight(PointLight),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: &'static str,
    pub parent: Option<NodeId>,
    pub transform: Transform,
    pub visible: bool,
    pub kind: NodeKind,
}

/// Flat node arena. A node's parent always has a smaller index, so a single
/// forward pass resolves world transforms.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(
        &mut self,
        parent: Option<NodeId>,
        name: &'static str,
        transform: Transform,
        kind: NodeKind,
    ) -> NodeId {
        debug_assert!(parent.map_or(true, |p| p.index() < self.nodes.len()));
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            name,
            parent,
            transform,
            visible: true,
            kind,
        });
        id
    }

    pub fn add_root_group(&mut self, name: &'static str, transform: Transform) -> NodeId {
        self.push(None, name, transform, NodeKind::Group)
    }

    pub fn add_group(&mut self, parent: NodeId, name: &'static str, transform: Transform) -> NodeId {
        self.push(Some(parent), name, transform, NodeKind::Group)
    }

    pub fn add_mesh(
        &mut self,
        parent: NodeId,
        name: &'static str,
        transform: Transform,
        shape: Shape,
        material: impl Into<Material>,
    ) -> NodeId {
        let kind = NodeKind::Mesh(MeshNode {
            shape,
            material: material.into(),
        });
        self.push(Some(parent), name, transform, kind)
    }

    pub fn add_point_light(
        &mut self,
        parent: NodeId,
        name: &'static str,
        position: Vec3,
        color: Color,
        intensity: f32,
    ) -> NodeId {
        let transform = Transform {
            translation: position,
            ..Default::default()
        };
        self.push(
            Some(parent),
            name,
            transform,
            NodeKind::PointLight(PointLight { color, intensity }),
        )
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn transform(&self, id: NodeId) -> &Transform {
        &self.nodes[id.index()].transform
    }

    #[inline]
    pub fn transform_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.nodes[id.index()].transform
    }

    #[inline]
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        self.nodes[id.index()].visible = visible;
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    pub fn children(&self, parent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(move |(_, n)| n.parent == Some(parent))
            .map(|(id, _)| id)
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.iter().find(|(_, n)| n.name == name).map(|(id, _)| id)
    }

    /// World matrices and effective visibility for every node, indexed by
    /// `NodeId::index`.
    pub fn resolve_world(&self, matrices: &mut Vec<Mat4>, visible: &mut Vec<bool>) {
        matrices.clear();
        visible.clear();
        for node in &self.nodes {
            let local = node.transform.matrix();
            let (m, v) = match node.parent {
                Some(p) => (matrices[p.index()] * local, visible[p.index()] && node.visible),
                None => (local, node.visible),
            };
            matrices.push(m);
            visible.push(v);
        }
    }

    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut m = self.nodes[id.index()].transform.matrix();
        let mut cursor = self.nodes[id.index()].parent;
        while let Some(p) = cursor {
            m = self.nodes[p.index()].transform.matrix() * m;
            cursor = self.nodes[p.index()].parent;
        }
        m
    }

    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).transform_point3(Vec3::ZERO)
    }

    pub fn is_visible_in_world(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(c) = cursor {
            let node = &self.nodes[c.index()];
            if !node.visible {
                return false;
            }
            cursor = node.parent;
        }
        true
    }
}
