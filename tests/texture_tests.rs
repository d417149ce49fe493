// Host-side tests for texture bookkeeping, decoding and material fallback.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/textures.rs"]
mod textures;
#[path = "../src/scene/mod.rs"]
mod scene;

use scene::{BasicMaterial, Color, Material, Shading, TextureMap};
use std::io::Cursor;
use textures::*;

fn tiny_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 200, 30, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn image(width: u32, height: u32) -> DecodedImage {
    DecodedImage {
        width,
        height,
        rgba: vec![255; (width * height * 4) as usize],
    }
}

#[test]
fn repeated_requests_share_a_slot() {
    let mut reg = TextureRegistry::new();
    let a = reg.request("/textures/tank.png");
    let b = reg.request("/textures/tank.png".to_string());
    let c = reg.request("/textures/floor.png");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(reg.len(), 2);
    assert_eq!(reg.url(c), Some("/textures/floor.png"));
    assert_eq!(reg.state(a), Some(TextureState::Requested));
}

#[test]
fn pending_loads_start_once() {
    let mut reg = TextureRegistry::new();
    let a = reg.request("/a.png");
    reg.request("/b.png");
    let jobs = reg.start_pending();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0], (a, "/a.png".to_string()));
    assert_eq!(reg.state(a), Some(TextureState::Loading));
    assert!(reg.start_pending().is_empty());
}

#[test]
fn successful_load_is_uploaded_once() {
    let mut reg = TextureRegistry::new();
    let id = reg.request("/a.png");
    reg.start_pending();
    assert!(reg.complete(id, Ok(image(2, 2))));
    assert!(reg.is_ready(id));
    let uploads = reg.drain_uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].0, id);
    assert_eq!(uploads[0].1.width, 2);
    assert!(reg.drain_uploads().is_empty());
    assert!(reg.is_ready(id));
}

#[test]
fn failed_load_is_permanent() {
    let mut reg = TextureRegistry::new();
    let id = reg.request("/missing.png");
    reg.start_pending();
    assert!(reg.complete(id, Err(TextureLoadError::Status(404))));
    assert_eq!(reg.state(id), Some(TextureState::Failed));
    // no retry, and a late success cannot revive it
    assert!(reg.start_pending().is_empty());
    assert!(!reg.complete(id, Ok(image(1, 1))));
    assert_eq!(reg.state(id), Some(TextureState::Failed));
    assert!(reg.drain_uploads().is_empty());
}

#[test]
fn closed_registry_discards_late_results() {
    let mut reg = TextureRegistry::new();
    let id = reg.request("/a.png");
    let other = reg.request("/b.png");
    reg.start_pending();
    assert!(reg.complete(other, Ok(image(1, 1))));
    reg.close();
    assert!(reg.is_closed());
    assert!(!reg.complete(id, Ok(image(1, 1))));
    assert_eq!(reg.state(id), Some(TextureState::Loading));
    assert!(reg.drain_uploads().is_empty());
    reg.request("/c.png");
    assert!(reg.start_pending().is_empty());
}

#[test]
fn decode_png_yields_rgba_pixels() {
    let img = decode_png(&tiny_png(3, 2)).unwrap();
    assert_eq!((img.width, img.height), (3, 2));
    assert_eq!(img.rgba.len(), 3 * 2 * 4);
    assert_eq!(&img.rgba[..4], &[10, 200, 30, 255]);
}

#[test]
fn decode_rejects_garbage() {
    let err = decode_png(b"definitely not a png").unwrap_err();
    assert!(matches!(err, TextureLoadError::Decode(_)));
}

#[test]
fn material_uses_fallback_color_until_ready() {
    let mut reg = TextureRegistry::new();
    let id = reg.request("/textures/parley-screen.png");
    let material = Material::from(
        BasicMaterial::color(Color::hex(0x111827)).with_map(TextureMap::new(id)),
    );

    let before = material.resolve(&reg);
    assert_eq!(before.shading, Shading::Unlit);
    assert_eq!(before.color, Color::hex(0x111827));
    assert_eq!(before.texture, None);

    reg.start_pending();
    reg.complete(id, Ok(image(4, 4)));
    let after = material.resolve(&reg);
    assert_eq!(after.color, Color::WHITE);
    assert_eq!(after.texture, Some(id));
}

#[test]
fn failed_texture_keeps_fallback_forever() {
    let mut reg = TextureRegistry::new();
    let id = reg.request("/textures/tanksinc-tank.png");
    let material = Material::from(
        BasicMaterial::translucent(Color::hex(0x4ade80), 0.8)
            .with_map(TextureMap::new(id).transparent()),
    );
    reg.start_pending();
    reg.complete(id, Err(TextureLoadError::Fetch("offline".into())));
    for _ in 0..3 {
        let s = material.resolve(&reg);
        assert_eq!(s.texture, None);
        assert_eq!(s.color, Color::hex(0x4ade80));
        assert_eq!(s.opacity, 0.8);
        assert!(s.transparent);
    }
}

#[test]
fn repeat_is_carried_to_the_surface() {
    let mut reg = TextureRegistry::new();
    let id = reg.request("/textures/tanksinc-floor.png");
    let material = Material::from(
        BasicMaterial::color(Color::hex(0x1a1f1a)).with_map(TextureMap::new(id).repeat(4.0, 4.0)),
    );
    reg.start_pending();
    reg.complete(id, Ok(image(8, 8)));
    let s = material.resolve(&reg);
    assert_eq!(s.uv_repeat, [4.0, 4.0]);
    assert!(!s.transparent);
}

#[test]
fn load_errors_describe_the_failure() {
    assert_eq!(TextureLoadError::Status(404).to_string(), "server answered 404");
    assert!(TextureLoadError::Decode("bad header".into())
        .to_string()
        .contains("bad header"));
}
