// Host-side tests for the stations and the scene composer.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod scroll {
    include!("../src/scroll.rs");
}
mod travel {
    include!("../src/travel.rs");
}
mod asset_path {
    include!("../src/asset_path.rs");
}
#[path = "../src/textures.rs"]
mod textures;
#[path = "../src/scene/mod.rs"]
mod scene;
#[path = "../src/stations/mod.rs"]
mod stations;
mod composer {
    include!("../src/composer.rs");
}

use asset_path::AssetResolver;
use composer::SceneComposer;
use constants::*;
use glam::Vec3;
use scene::draw_list::DrawList;
use scene::NodeKind;
use scroll::ScrollProgress;
use stations::*;
use std::f32::consts::PI;
use textures::TextureRegistry;
use travel::{StationId, StationLayout, TravelSmoothing};

const FRAME: f32 = 1.0 / 60.0;

fn compose() -> (SceneComposer, TextureRegistry) {
    compose_with_base(None)
}

fn compose_with_base(base: Option<&str>) -> (SceneComposer, TextureRegistry) {
    let mut textures = TextureRegistry::new();
    let composer = SceneComposer::new(
        StationLayout::default(),
        TravelSmoothing::default(),
        &mut textures,
        &AssetResolver::new(base),
    );
    (composer, textures)
}

fn cannonball_pose(c: &SceneComposer) -> (Vec3, Vec3, Vec3, bool) {
    let g = c.graph();
    let ball = g.find("game.cannonball").unwrap();
    let t = g.transform(ball);
    (t.translation, t.rotation, t.scale, g.node(ball).visible)
}

#[test]
fn local_progress_maps_the_game_window() {
    assert_eq!(local_progress(ScrollProgress::new(0.0)), 0.0);
    assert_eq!(local_progress(ScrollProgress::new(GAME_WINDOW_START)), 0.0);
    assert!((local_progress(ScrollProgress::new(0.5)) - 0.5).abs() < 1e-6);
    assert_eq!(local_progress(ScrollProgress::new(GAME_WINDOW_END)), 1.0);
    assert_eq!(local_progress(ScrollProgress::new(0.9)), 1.0);
}

#[test]
fn projectile_endpoints_are_hidden() {
    let start = projectile_pose(0.0);
    assert_eq!(start.x, PROJECTILE_X_START);
    assert!((start.y - PROJECTILE_Y_START).abs() < 1e-6);
    assert!(!start.visible);
    let end = projectile_pose(1.0);
    assert!((end.x - PROJECTILE_X_END).abs() < 1e-5);
    assert!(!end.visible);
    assert!(!projectile_pose(0.01).visible);
    assert!(!projectile_pose(0.99).visible);
}

#[test]
fn projectile_peaks_mid_flight() {
    let mid = projectile_pose(0.5);
    assert!(mid.visible);
    assert!((mid.x - 6.0).abs() < 1e-5);
    assert!((mid.y - (PROJECTILE_Y_START + PROJECTILE_ARC_HEIGHT)).abs() < 1e-5);
    assert!((mid.scale - 1.0).abs() < 1e-5);
}

#[test]
fn projectile_arc_is_symmetric() {
    for i in 0..=50 {
        let p = i as f32 / 100.0;
        let a = projectile_pose(p);
        let b = projectile_pose(1.0 - p);
        assert!((a.y - b.y).abs() < 1e-4, "p={}", p);
        assert!((a.scale - b.scale).abs() < 1e-4);
        assert_eq!(a.visible, b.visible);
    }
}

#[test]
fn projectile_spins_three_turns() {
    assert_eq!(projectile_pose(0.0).rotation_z, 0.0);
    assert!((projectile_pose(1.0).rotation_z - 6.0 * PI).abs() < 1e-4);
    assert_eq!(projectile_pose(2.0), projectile_pose(1.0));
}

#[test]
fn cannonball_is_scrubbable_in_both_directions() {
    let (mut c, _) = compose();
    c.tick(FRAME, ScrollProgress::new(0.45));
    let first = cannonball_pose(&c);

    for p in [0.5, 0.6, 0.64, 0.4, 0.2, 0.45] {
        c.tick(FRAME, ScrollProgress::new(p));
    }
    let again = cannonball_pose(&c);
    assert_eq!(first.0, again.0);
    assert_eq!(first.1, again.1);
    assert_eq!(first.2, again.2);
    assert!(again.3);
}

#[test]
fn cannonball_hidden_outside_game_window() {
    let (mut c, _) = compose();
    let ball = c.graph().find("game.cannonball").unwrap();
    c.tick(FRAME, ScrollProgress::new(0.1));
    assert!(!c.graph().is_visible_in_world(ball));
    c.tick(FRAME, ScrollProgress::new(0.5));
    assert!(c.graph().is_visible_in_world(ball));
    c.tick(FRAME, ScrollProgress::new(0.9));
    assert!(!c.graph().is_visible_in_world(ball));
}

#[test]
fn coins_orbit_at_fixed_radius() {
    for i in 0..COIN_COUNT {
        for t in [0.0, 0.7, 3.2, 100.0] {
            let p = coin_position(i, t);
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((r - COIN_ORBIT_RADIUS).abs() < 1e-3);
            assert!(p.y.abs() <= 0.3 + 1e-6);
        }
    }
}

#[test]
fn coins_are_spread_evenly() {
    let flat = |v: Vec3| Vec3::new(v.x, 0.0, v.z);
    let a = flat(coin_position(0, 0.0));
    let b = flat(coin_position(1, 0.0));
    let angle = a.angle_between(b);
    assert!((angle - 2.0 * PI / COIN_COUNT as f32).abs() < 1e-3);
}

#[test]
fn star_field_is_deterministic() {
    let a = star_field(STAR_SEED, STAR_COUNT);
    let b = star_field(STAR_SEED, STAR_COUNT);
    assert_eq!(a, b);
    assert_eq!(a.len(), STAR_COUNT);
    assert_ne!(a, star_field(STAR_SEED + 1, STAR_COUNT));
    for (pos, size) in a {
        assert!(pos.x.abs() <= 25.0);
        assert!((-10.0..=20.0).contains(&pos.y));
        assert!((-25.0..=5.0).contains(&pos.z));
        assert!((0.02..=0.1).contains(&size));
    }
}

#[test]
fn station_clock_ignores_bad_steps() {
    let mut clock = StationClock::default();
    clock.tick(0.5);
    clock.tick(-1.0);
    clock.tick(f32::NAN);
    clock.tick(f32::INFINITY);
    assert_eq!(clock.tick(0.25), 0.75);
    assert_eq!(clock.elapsed(), 0.75);
}

#[test]
fn composer_places_stations_along_travel_axis() {
    let (c, _) = compose();
    assert_eq!(c.stations().len(), 5);
    for (id, z) in StationLayout::default().entries() {
        let group = c.station_group(*id).unwrap();
        assert_eq!(c.graph().world_position(group), Vec3::new(0.0, 0.0, *z));
        assert_eq!(c.graph().node(group).parent, Some(c.travel_group()));
    }
    let ids: Vec<StationId> = c.stations().iter().map(|s| s.id()).collect();
    assert_eq!(ids, StationId::ALL.to_vec());
}

#[test]
fn travel_group_follows_smoothed_progress() {
    let (mut c, _) = compose();
    c.tick(FRAME, ScrollProgress::END);
    let z = c.graph().transform(c.travel_group()).translation.z;
    assert!((z - 10.0).abs() < 1e-4);
    for _ in 0..600 {
        c.tick(FRAME, ScrollProgress::END);
    }
    let z = c.graph().transform(c.travel_group()).translation.z;
    assert!((z - 100.0).abs() < 1e-2);
    assert_eq!(z, c.travel().current());

    // the About station now sits in front of the camera at z = 0
    let about = c.station_group(StationId::About).unwrap();
    assert!(c.graph().world_position(about).z.abs() < 1e-2);
}

#[test]
fn textures_requested_once_with_base_path() {
    let (_, textures) = compose_with_base(Some("/app/"));
    assert_eq!(textures.len(), 4);
    let mut urls: Vec<String> = Vec::new();
    let mut t = textures;
    for (_, url) in t.start_pending() {
        urls.push(url);
    }
    urls.sort();
    assert_eq!(
        urls,
        vec![
            "/app/textures/parley-screen.png",
            "/app/textures/tanksinc-cannonball.png",
            "/app/textures/tanksinc-floor.png",
            "/app/textures/tanksinc-tank.png",
        ]
    );
}

#[test]
fn chat_labels_follow_bubbles() {
    let (mut c, _) = compose();
    let labels: Vec<Label> = c.labels().copied().collect();
    assert_eq!(labels.len(), CHAT_LINES.len());
    for (label, (text, _)) in labels.iter().zip(CHAT_LINES.iter()) {
        assert_eq!(label.text, *text);
    }
    let before = c.graph().world_position(labels[0].anchor);
    for _ in 0..30 {
        c.tick(FRAME, ScrollProgress::START);
    }
    let after = c.graph().world_position(labels[0].anchor);
    assert_ne!(before, after, "bubbles should bob");
}

#[test]
fn scene_fits_renderer_limits() {
    let (mut c, textures) = compose();
    c.tick(FRAME, ScrollProgress::new(0.5));
    let lights = c
        .graph()
        .iter()
        .filter(|(_, n)| matches!(n.kind, NodeKind::PointLight(_)))
        .count();
    assert!(lights <= MAX_POINT_LIGHTS);

    let mut list = DrawList::new();
    list.rebuild(c.graph(), &textures, glam::Mat4::IDENTITY);
    assert!(!list.is_empty());
    assert!(list.len() <= MAX_DRAW_ITEMS);
}

#[test]
fn finance_coins_move_over_time() {
    let (mut c, _) = compose();
    let coin = c.graph().find("finance.coin").unwrap();
    let before = c.graph().transform(coin).translation;
    for _ in 0..60 {
        c.tick(FRAME, ScrollProgress::START);
    }
    let after = c.graph().transform(coin).translation;
    assert_ne!(before, after);
    let r = (after.x * after.x + after.z * after.z).sqrt();
    assert!((r - COIN_ORBIT_RADIUS).abs() < 1e-3);
}

#[test]
fn game_window_does_not_move_other_stations() {
    let (mut a, _) = compose();
    let (mut b, _) = compose();
    for _ in 0..10 {
        a.tick(FRAME, ScrollProgress::new(0.2));
        b.tick(FRAME, ScrollProgress::new(0.2));
    }
    let phone_a = a.graph().find("messaging.phone").unwrap();
    let phone_b = b.graph().find("messaging.phone").unwrap();
    assert_eq!(a.graph().transform(phone_a), b.graph().transform(phone_b));
}

#[test]
fn intro_stays_still_over_time() {
    let (mut c, _) = compose();
    let star = c.graph().find("intro.star").unwrap();
    let frame = c.graph().find("intro.frame").unwrap();
    let star_before = *c.graph().transform(star);
    let frame_before = *c.graph().transform(frame);
    for _ in 0..120 {
        c.tick(FRAME, ScrollProgress::new(0.5));
    }
    assert_eq!(c.graph().transform(star), &star_before);
    assert_eq!(c.graph().transform(frame), &frame_before);
}
