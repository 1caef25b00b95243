// Host-side tests for pointer sampling and normalization.

use portal_core::{
    normalize, AxisRanges, OutputRange, PointerSample, PointerSampler, PortalError,
    ViewportBounds,
};

const EPS: f32 = 1e-4;

fn ranges() -> AxisRanges {
    AxisRanges::symmetric(6.0, 4.0)
}

fn sample(x: f32, y: f32) -> PointerSample {
    PointerSample {
        x,
        y,
        timestamp_ms: 0.0,
    }
}

#[test]
fn center_of_full_hd_maps_to_origin() {
    let out = normalize(&sample(960.0, 540.0), ViewportBounds::new(1920.0, 1080.0), &ranges());
    assert!(out.x.abs() < EPS, "x = {}", out.x);
    assert!(out.y.abs() < EPS, "y = {}", out.y);
}

#[test]
fn top_left_maps_to_range_minimum() {
    let out = normalize(&sample(0.0, 0.0), ViewportBounds::new(1920.0, 1080.0), &ranges());
    assert_eq!(out.x, -6.0);
    assert_eq!(out.y, -4.0);
}

#[test]
fn bottom_right_maps_to_range_maximum() {
    let out = normalize(
        &sample(1920.0, 1080.0),
        ViewportBounds::new(1920.0, 1080.0),
        &ranges(),
    );
    assert!((out.x - 6.0).abs() < EPS);
    assert!((out.y - 4.0).abs() < EPS);
}

#[test]
fn output_stays_inside_range_for_in_viewport_positions() {
    let bounds = ViewportBounds::new(1280.0, 720.0);
    let r = ranges();
    for xi in 0..=64 {
        for yi in 0..=36 {
            let x = xi as f32 * 20.0;
            let y = yi as f32 * 20.0;
            let out = normalize(&sample(x, y), bounds, &r);
            assert!(out.x >= r.x.min && out.x <= r.x.max, "x={x} -> {}", out.x);
            assert!(out.y >= r.y.min && out.y <= r.y.max, "y={y} -> {}", out.y);
        }
    }
}

#[test]
fn positions_outside_viewport_are_clamped() {
    let bounds = ViewportBounds::new(800.0, 600.0);
    let far = normalize(&sample(5000.0, -300.0), bounds, &ranges());
    assert_eq!(far.x, 6.0);
    assert_eq!(far.y, -4.0);
    let neg = normalize(&sample(-1.0, 9999.0), bounds, &ranges());
    assert_eq!(neg.x, -6.0);
    assert_eq!(neg.y, 4.0);
}

#[test]
fn unmeasured_bounds_fall_back_to_full_hd() {
    let out = normalize(&sample(960.0, 540.0), ViewportBounds::new(0.0, 0.0), &ranges());
    assert!(out.x.abs() < EPS);
    assert!(out.y.abs() < EPS);
    let nan = normalize(
        &sample(1920.0, 0.0),
        ViewportBounds::new(f32::NAN, 1080.0),
        &ranges(),
    );
    assert!((nan.x - 6.0).abs() < EPS);
    assert!(nan.x.is_finite() && nan.y.is_finite());
}

#[test]
fn sampler_clamps_raw_coordinates_to_viewport() {
    let mut s = PointerSampler::new(ViewportBounds::new(1000.0, 500.0));
    let got = s.record(1200.0, -40.0, 12.0);
    assert_eq!(got.x, 1000.0);
    assert_eq!(got.y, 0.0);
    assert_eq!(s.latest(), Some(got));
}

#[test]
fn sampler_without_movement_rests_at_midpoint() {
    let s = PointerSampler::new(ViewportBounds::new(1000.0, 500.0));
    let out = s.normalized(&ranges());
    assert_eq!(out.x, 0.0);
    assert_eq!(out.y, 0.0);
}

#[test]
fn resize_is_used_by_subsequent_normalization() {
    let mut s = PointerSampler::new(ViewportBounds::new(1920.0, 1080.0));
    s.record(960.0, 540.0, 0.0);
    let before = s.normalized(&ranges());
    assert!(before.x.abs() < EPS);

    // Same pixel position is now the right edge of a narrower window
    s.resize(960.0, 540.0);
    let after = s.normalized(&ranges());
    assert!((after.x - 6.0).abs() < EPS, "after.x = {}", after.x);
    assert!((after.y - 4.0).abs() < EPS, "after.y = {}", after.y);
    assert_eq!(s.bounds(), ViewportBounds::new(960.0, 540.0));
}

#[test]
fn output_range_rejects_empty_or_inverted_intervals() {
    assert!(OutputRange::new(-1.0, 1.0).is_ok());
    assert_eq!(
        OutputRange::new(2.0, 2.0),
        Err(PortalError::InvalidRange { min: 2.0, max: 2.0 })
    );
    assert!(OutputRange::new(3.0, -3.0).is_err());
    assert!(OutputRange::new(f32::NAN, 1.0).is_err());
}
