//! The five decorative stations along the travel axis.
//!
//! Each station builds its nodes once under the group the composer placed at
//! its offset, keeps the handles it animates, and exposes a single
//! [`Station::advance`] that is a closed-form function of its own clock (and,
//! for the game station, of scroll progress).

use crate::asset_path::AssetResolver;
use crate::scene::{Color, NodeId, SceneGraph, Shape, StandardMaterial, Transform};
use crate::scroll::ScrollProgress;
use crate::textures::{TextureId, TextureRegistry};
use crate::travel::StationId;
use glam::Vec3;

mod about;
mod finance;
mod game;
mod intro;
mod messaging;

pub use about::AboutStation;
pub use finance::{coin_position, FinanceStation, COIN_COUNT, COIN_ORBIT_RADIUS};
pub use game::{local_progress, projectile_pose, GameStation, ProjectilePose};
pub use intro::{star_field, IntroStation};
pub use messaging::{MessagingStation, CHAT_LINES};

pub trait Station {
    fn id(&self) -> StationId;

    /// Advance the idle animation by `dt` seconds and write the resulting
    /// transforms into `graph`.
    fn advance(&mut self, graph: &mut SceneGraph, dt: f32, scroll: ScrollProgress);

    /// Text anchored to scene nodes, drawn by the HTML label layer.
    fn labels(&self) -> &[Label] {
        &[]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label {
    pub anchor: NodeId,
    pub text: &'static str,
}

/// Per-station elapsed time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StationClock {
    elapsed: f32,
}

impl StationClock {
    pub fn tick(&mut self, dt: f32) -> f32 {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.elapsed
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Shared state while stations create their nodes.
pub struct BuildContext<'a> {
    pub graph: &'a mut SceneGraph,
    pub textures: &'a mut TextureRegistry,
    pub assets: &'a AssetResolver,
}

impl BuildContext<'_> {
    /// Request a texture by logical asset path.
    pub fn texture(&mut self, logical_path: &str) -> TextureId {
        self.textures.request(self.assets.resolve(logical_path))
    }
}

pub fn build_station(id: StationId, ctx: &mut BuildContext<'_>, root: NodeId) -> Box<dyn Station> {
    match id {
        StationId::Intro => Box::new(IntroStation::build(ctx, root)),
        StationId::Messaging => Box::new(MessagingStation::build(ctx, root)),
        StationId::Game => Box::new(GameStation::build(ctx, root)),
        StationId::Finance => Box::new(FinanceStation::build(ctx, root)),
        StationId::About => Box::new(AboutStation::build(ctx, root)),
    }
}

pub(crate) const SUBTITLE_GREY: u32 = 0x64748b;

/// Row of glowing bars standing in for a station title, gently swaying.
pub(crate) struct TitleBar {
    group: NodeId,
}

impl TitleBar {
    pub(crate) fn build(
        graph: &mut SceneGraph,
        parent: NodeId,
        bars: impl IntoIterator<Item = (f32, Vec3)>,
        material: StandardMaterial,
        subtitle: Option<(f32, Vec3)>,
    ) -> Self {
        let group = graph.add_group(parent, "title", Transform::at(0.0, 4.0, 0.0));
        for (x, size) in bars {
            graph.add_mesh(
                group,
                "title.bar",
                Transform::at(x, 0.0, 0.0),
                Shape::Box { size },
                material,
            );
        }
        if let Some((y, size)) = subtitle {
            graph.add_mesh(
                group,
                "title.subtitle",
                Transform::at(0.0, y, 0.0),
                Shape::Box { size },
                StandardMaterial::color(Color::hex(SUBTITLE_GREY)),
            );
        }
        Self { group }
    }

    pub(crate) fn advance(&self, graph: &mut SceneGraph, t: f32) {
        graph.transform_mut(self.group).rotation.y = (t * 0.2).sin() * 0.02;
    }
}
