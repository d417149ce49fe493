// Host-side tests for scroll progress normalization.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod scroll {
    include!("../src/scroll.rs");
}

use scroll::*;

fn metrics(scroll_y: f64, document_height: f64, viewport_height: f64) -> ScrollMetrics {
    ScrollMetrics {
        scroll_y,
        document_height,
        viewport_height,
    }
}

#[test]
fn progress_spans_zero_to_one() {
    // five 100vh sections in an 800px viewport
    let doc = 5.0 * 800.0;
    assert_eq!(ScrollProgress::from_metrics(metrics(0.0, doc, 800.0)).get(), 0.0);
    assert_eq!(ScrollProgress::from_metrics(metrics(3200.0, doc, 800.0)).get(), 1.0);
    let mid = ScrollProgress::from_metrics(metrics(1600.0, doc, 800.0)).get();
    assert!((mid - 0.5).abs() < 1e-6);
}

#[test]
fn zero_scroll_range_yields_zero() {
    assert_eq!(ScrollProgress::from_metrics(metrics(0.0, 800.0, 800.0)), ScrollProgress::START);
    // document shorter than the viewport
    assert_eq!(ScrollProgress::from_metrics(metrics(10.0, 500.0, 800.0)), ScrollProgress::START);
}

#[test]
fn overscroll_is_clamped() {
    let doc = 4000.0;
    assert_eq!(ScrollProgress::from_metrics(metrics(-40.0, doc, 800.0)).get(), 0.0);
    assert_eq!(ScrollProgress::from_metrics(metrics(3400.0, doc, 800.0)).get(), 1.0);
}

#[test]
fn progress_is_monotonic_in_scroll_offset() {
    let mut last = -1.0;
    for step in 0..=320 {
        let p = ScrollProgress::from_metrics(metrics(step as f64 * 10.0, 4000.0, 800.0)).get();
        assert!(p >= last, "progress went backwards at step {}", step);
        assert!((0.0..=1.0).contains(&p));
        last = p;
    }
}

#[test]
fn nan_and_out_of_range_values_are_sanitized() {
    assert_eq!(ScrollProgress::new(f32::NAN).get(), 0.0);
    assert_eq!(ScrollProgress::new(-3.0).get(), 0.0);
    assert_eq!(ScrollProgress::new(7.0).get(), 1.0);
    assert_eq!(ScrollProgress::from_metrics(metrics(f64::NAN, 4000.0, 800.0)).get(), 0.0);
}

#[test]
fn tracker_keeps_latest_sample() {
    let mut t = ScrollTracker::new();
    assert_eq!(t.latest(), ScrollProgress::START);
    assert_eq!(t.sample_count(), 0);

    let p = t.sample(metrics(800.0, 4000.0, 800.0));
    assert!((p.get() - 0.25).abs() < 1e-6);
    t.sample(metrics(2400.0, 4000.0, 800.0));
    assert!((t.latest().get() - 0.75).abs() < 1e-6);
    assert_eq!(t.sample_count(), 2);
}

#[test]
fn resize_changes_progress_for_same_offset() {
    let mut t = ScrollTracker::new();
    let before = t.sample(metrics(1000.0, 4000.0, 800.0)).get();
    let after = t.sample(metrics(1000.0, 4000.0, 1000.0)).get();
    assert!(after > before);
}
