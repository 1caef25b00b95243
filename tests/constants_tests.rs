// Host-side tests for page wiring and forest look constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn fog_and_vignette_are_well_formed() {
    assert!(FOG_NEAR > 0.0);
    assert!(FOG_FAR > FOG_NEAR);
    assert!((0.0..1.0).contains(&VIGNETTE_OFFSET));
    assert!((0.0..=1.0).contains(&VIGNETTE_DARKNESS));
    assert!((0.0..=1.0).contains(&AMBIENT));
}

#[test]
fn colors_are_normalized() {
    for c in [FOG_COLOR, LIGHT_TINT, GROUND_COLOR] {
        for ch in c {
            assert!((0.0..=1.0).contains(&ch));
        }
    }
    for ch in CLEAR_COLOR {
        assert!((0.0..=1.0).contains(&ch));
    }
    // #0a0f2c
    assert!((FOG_COLOR[0] - 10.0 / 255.0).abs() < 1e-3);
    assert!((FOG_COLOR[1] - 15.0 / 255.0).abs() < 1e-3);
    assert!((FOG_COLOR[2] - 44.0 / 255.0).abs() < 1e-3);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn frame_and_mesh_limits() {
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC <= 0.5);
    assert!(PRISM_SIDES >= 3);
    assert!(CORRIDOR_PERSPECTIVE_PX > 0.0);
    assert!(GROUND_HALF_EXTENT > FOG_FAR, "ground edge hidden by fog");
}

#[test]
fn dom_hooks_are_distinct() {
    let ids = [
        CORRIDOR_RIG_ID,
        FOREST_CANVAS_ID,
        INTRO_OVERLAY_ID,
        INTRO_TUNNEL_ID,
        INTRO_SKIP_ID,
        ENTER_PORTAL_ID,
        PORTAL_OVERLAY_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.starts_with('#'), "ids are bare: {a}");
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert!(SPOTLIGHT_VAR_X.starts_with("--"));
    assert!(SPOTLIGHT_VAR_Y.starts_with("--"));
    assert!(PARALLAX_SELECTOR.starts_with('[') && PARALLAX_SELECTOR.ends_with(']'));
}
