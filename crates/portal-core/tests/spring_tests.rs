// Host-side tests for spring smoothing and the parallax chain.

use portal_core::{
    AxisRanges, NormalizedOffset, ParallaxMapper, PortalError, SceneBinder, SmoothedOffset,
    Spring, SpringConfig, ViewportBounds,
};

const DT: f32 = 1.0 / 60.0;

fn tested_pairs() -> Vec<(f32, f32)> {
    let mut out = Vec::new();
    for k in [35.0, 40.0, 45.0, 50.0] {
        for c in [12.0, 15.0, 18.0, 20.0] {
            out.push((k, c));
        }
    }
    out
}

#[test]
fn converges_for_all_tested_parameters() {
    for (k, c) in tested_pairs() {
        let cfg = SpringConfig::new(k, c).unwrap();
        let mut s = Spring::new(cfg, 0.0);
        let mut settled_at = None;
        for i in 0..600 {
            s.step(6.0, DT);
            if (s.value - 6.0).abs() < 0.01 {
                settled_at = Some(i);
                break;
            }
        }
        assert!(
            settled_at.is_some(),
            "k={k} c={c} did not settle, value={}",
            s.value
        );
    }
}

#[test]
fn never_diverges_and_overshoot_is_bounded() {
    for (k, c) in tested_pairs() {
        let cfg = SpringConfig::new(k, c).unwrap();
        let mut s = Spring::new(cfg, -6.0);
        for _ in 0..1200 {
            let v = s.step(6.0, DT);
            assert!(v.is_finite());
            // Under-damped overshoot stays well below the step size
            assert!(v <= 6.0 + 12.0 * 0.25, "k={k} c={c} overshot to {v}");
        }
    }
}

#[test]
fn critically_damped_does_not_overshoot() {
    let cfg = SpringConfig::new(36.0, 12.0).unwrap();
    assert!((cfg.damping_ratio() - 1.0).abs() < 1e-6);
    let mut s = Spring::new(cfg, 0.0);
    for _ in 0..600 {
        let v = s.step(1.0, DT);
        assert!(v <= 1.0 + 1e-3, "overshoot {v}");
    }
}

#[test]
fn under_damped_spring_can_overshoot() {
    let cfg = SpringConfig::new(50.0, 2.0).unwrap();
    let mut s = Spring::new(cfg, 0.0);
    let mut peak = 0.0f32;
    for _ in 0..300 {
        peak = peak.max(s.step(1.0, DT));
    }
    assert!(peak > 1.0, "expected overshoot, peak={peak}");
}

#[test]
fn stays_stable_across_long_frame_gaps() {
    let cfg = SpringConfig::new(50.0, 12.0).unwrap();
    let mut s = Spring::new(cfg, 0.0);
    // Throttled tab delivering one frame every few seconds
    for _ in 0..20 {
        let v = s.step(4.0, 3.0);
        assert!(v.is_finite());
        assert!(v.abs() < 10.0, "value escaped: {v}");
    }
    assert!((s.value - 4.0).abs() < 0.05);
}

#[test]
fn zero_or_invalid_dt_leaves_state_untouched() {
    let cfg = SpringConfig::new(40.0, 15.0).unwrap();
    let mut s = Spring::new(cfg, 1.5);
    assert_eq!(s.step(5.0, 0.0), 1.5);
    assert_eq!(s.step(5.0, -1.0), 1.5);
    assert_eq!(s.step(5.0, f32::NAN), 1.5);
    assert_eq!(s.step(f32::INFINITY, DT), 1.5);
    assert_eq!(s.velocity, 0.0);
}

#[test]
fn snaps_to_target_at_rest() {
    let cfg = SpringConfig::new(40.0, 15.0).unwrap();
    let mut s = Spring::new(cfg, 0.0);
    for _ in 0..600 {
        s.step(2.0, DT);
    }
    assert_eq!(s.value, 2.0);
    assert_eq!(s.velocity, 0.0);
    assert!(s.is_at_rest(2.0));
}

#[test]
fn smoothed_value_lags_target() {
    let cfg = SpringConfig::new(40.0, 15.0).unwrap();
    let mut off = SmoothedOffset::new(cfg, NormalizedOffset::default());
    let target = NormalizedOffset { x: 6.0, y: -4.0 };
    let v = off.step(target, DT);
    assert!(v.x > 0.0 && v.x < 6.0);
    assert!(v.y < 0.0 && v.y > -4.0);
    assert!(!off.is_at_rest(target));
}

#[test]
fn rejects_invalid_spring_parameters() {
    assert!(matches!(
        SpringConfig::new(0.0, 10.0),
        Err(PortalError::InvalidSpring { .. })
    ));
    assert!(SpringConfig::new(40.0, -1.0).is_err());
    assert!(SpringConfig::with_mass(40.0, 15.0, 0.0).is_err());
    assert!(SpringConfig::new(f32::NAN, 15.0).is_err());
}

#[test]
fn mapper_reads_latest_sample_on_every_tick() {
    let cfg = SpringConfig::new(40.0, 15.0).unwrap();
    let mut m = ParallaxMapper::new(
        ViewportBounds::new(1920.0, 1080.0),
        AxisRanges::symmetric(6.0, 4.0),
        cfg,
        SceneBinder::default(),
    );
    m.record(0.0, 0.0, 0.0);
    m.tick(DT);
    assert!(m.smoothed().x < 0.0);

    // Pointer jumps to the far edge between ticks: the next tick must chase it
    m.record(1920.0, 1080.0, 16.0);
    assert_eq!(m.target(), NormalizedOffset { x: 6.0, y: 4.0 });
    for _ in 0..600 {
        m.tick(DT);
    }
    assert!((m.smoothed().x - 6.0).abs() < 0.01);
    assert!((m.smoothed().y - 4.0).abs() < 0.01);
    assert!(m.is_settled());
}
