// Host-side tests for asset path resolution.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod asset_path {
    include!("../src/asset_path.rs");
}

use asset_path::*;

#[test]
fn no_base_path_leaves_logical_path_unchanged() {
    assert_eq!(resolve_asset_path(None, "/textures/tank.png"), "/textures/tank.png");
}

#[test]
fn base_path_is_prefixed() {
    assert_eq!(
        resolve_asset_path(Some("/app"), "/textures/tank.png"),
        "/app/textures/tank.png"
    );
}

#[test]
fn trailing_slash_on_base_does_not_double_up() {
    assert_eq!(
        resolve_asset_path(Some("/app/"), "/textures/tank.png"),
        "/app/textures/tank.png"
    );
    assert_eq!(AssetResolver::new(Some("/app/")).base_path(), "/app");
}

#[test]
fn relative_path_gets_a_separator() {
    assert_eq!(resolve_asset_path(Some("/app"), "textures/floor.png"), "/app/textures/floor.png");
    assert_eq!(resolve_asset_path(None, "textures/floor.png"), "/textures/floor.png");
}

#[test]
fn empty_base_behaves_like_none() {
    let a = AssetResolver::new(Some(""));
    let b = AssetResolver::default();
    assert_eq!(a, b);
    assert_eq!(a.resolve("/x.png"), "/x.png");
}

#[test]
fn resolver_is_reusable() {
    let r = AssetResolver::new(Some("/portfolio"));
    let urls: Vec<String> = ["/a.png", "/b.png"].iter().map(|p| r.resolve(p)).collect();
    assert_eq!(urls, vec!["/portfolio/a.png", "/portfolio/b.png"]);
}
