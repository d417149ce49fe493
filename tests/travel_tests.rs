// Host-side tests for the station layout and smoothed camera travel.
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

use scroll::ScrollProgress;
use travel::*;

const FRAME: f32 = 1.0 / 60.0;

#[test]
fn default_layout_has_five_stations_25_apart() {
    let layout = StationLayout::default();
    let ids: Vec<StationId> = layout.entries().iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, StationId::ALL.to_vec());
    assert_eq!(layout.offset(StationId::Intro), Some(0.0));
    assert_eq!(layout.offset(StationId::Game), Some(-50.0));
    assert_eq!(layout.offset(StationId::About), Some(-100.0));
    assert_eq!(layout.total_distance(), 100.0);
}

#[test]
fn layout_validation() {
    assert_eq!(StationLayout::new(vec![]), Err(LayoutError::Empty));
    assert!(matches!(
        StationLayout::new(vec![(StationId::Intro, 0.0), (StationId::Messaging, 5.0)]),
        Err(LayoutError::NotMonotonic { .. })
    ));
    assert_eq!(
        StationLayout::new(vec![(StationId::Intro, f32::NAN)]),
        Err(LayoutError::NonFinite("intro"))
    );
    let ok = StationLayout::new(vec![(StationId::Intro, 0.0), (StationId::About, -40.0)]).unwrap();
    assert_eq!(ok.total_distance(), 40.0);
}

#[test]
fn per_frame_travel_closes_ten_percent_each_frame() {
    let mut travel = CameraTravel::new(100.0, TravelSmoothing::default());
    for n in 1..=60 {
        travel.step(ScrollProgress::END, FRAME);
        let expected = 100.0 * (1.0 - 0.9f32.powi(n));
        assert!(
            (travel.current() - expected).abs() < 1e-3,
            "frame {}: {} vs {}",
            n,
            travel.current(),
            expected
        );
    }
}

#[test]
fn travel_never_overshoots() {
    let mut travel = CameraTravel::new(100.0, TravelSmoothing::default());
    let mut last = 0.0;
    for _ in 0..500 {
        let z = travel.step(ScrollProgress::END, FRAME);
        assert!(z >= last);
        assert!(z <= 100.0);
        last = z;
    }
    assert!((last - 100.0).abs() < 1e-3);
}

#[test]
fn per_frame_ignores_frame_duration() {
    let mut a = CameraTravel::new(100.0, TravelSmoothing::default());
    let mut b = CameraTravel::new(100.0, TravelSmoothing::default());
    for _ in 0..10 {
        a.step(ScrollProgress::new(0.5), FRAME);
        b.step(ScrollProgress::new(0.5), 0.1);
    }
    assert_eq!(a.current(), b.current());
}

#[test]
fn time_scaled_matches_per_frame_at_reference_rate() {
    let smoothing = TravelSmoothing::parse("time").unwrap();
    assert!((smoothing.alpha(FRAME) - 0.1).abs() < 1e-5);
    assert!((smoothing.alpha(2.0 * FRAME) - 0.19).abs() < 1e-5);
    assert_eq!(smoothing.alpha(0.0), 0.0);
    assert_eq!(smoothing.alpha(-1.0), 0.0);
}

#[test]
fn time_scaled_is_frame_rate_independent() {
    let smoothing = TravelSmoothing::parse("time-scaled").unwrap();
    let mut fast = CameraTravel::new(100.0, smoothing);
    let mut slow = CameraTravel::new(100.0, smoothing);
    for _ in 0..60 {
        fast.step(ScrollProgress::END, FRAME);
    }
    for _ in 0..30 {
        slow.step(ScrollProgress::END, 2.0 * FRAME);
    }
    assert!((fast.current() - slow.current()).abs() < 1e-2);
}

#[test]
fn scrolling_back_returns_toward_start() {
    let mut travel = CameraTravel::new(100.0, TravelSmoothing::default());
    for _ in 0..200 {
        travel.step(ScrollProgress::END, FRAME);
    }
    for _ in 0..200 {
        travel.step(ScrollProgress::START, FRAME);
    }
    assert!(travel.current().abs() < 1e-3);
}

#[test]
fn target_is_progress_times_distance() {
    let travel = CameraTravel::new(-100.0, TravelSmoothing::default());
    assert_eq!(travel.target_for(ScrollProgress::new(0.25)), 25.0);
    assert_eq!(travel.current(), 0.0);
}

#[test]
fn smoothing_parse_rejects_unknown() {
    assert_eq!(TravelSmoothing::parse("frame"), Some(TravelSmoothing::default()));
    assert_eq!(TravelSmoothing::parse("lerp"), None);
}
