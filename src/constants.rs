/// Page wiring and forest look constants for the browser front-end.
///
/// Motion tuning lives in `portal_core::constants`; this file only holds
/// what the DOM and the renderer need.
// Document hooks
pub const SCENE_ATTR: &str = "data-scene"; // on <body>, names the page preset
pub const SEED_ATTR: &str = "data-seed"; // on <body>, optional forest seed
pub const PARALLAX_SELECTOR: &str = "[data-parallax]";
pub const CORRIDOR_RIG_ID: &str = "corridor-rig";
pub const FOREST_CANVAS_ID: &str = "forest-canvas";
pub const INTRO_OVERLAY_ID: &str = "intro-overlay";
pub const INTRO_TUNNEL_ID: &str = "intro-tunnel";
pub const INTRO_SKIP_ID: &str = "intro-skip";
pub const ENTER_PORTAL_ID: &str = "enter-portal";
pub const PORTAL_OVERLAY_ID: &str = "portal-overlay";
pub const HIDDEN_CLASS: &str = "hidden";
pub const WARPING_CLASS: &str = "warping"; // on <body> while the portal plays

// Spotlight custom properties written on <body>
pub const SPOTLIGHT_VAR_X: &str = "--pointer-x";
pub const SPOTLIGHT_VAR_Y: &str = "--pointer-y";

// Corridor rig
pub const CORRIDOR_PERSPECTIVE_PX: f32 = 1400.0;

// Frame loop
pub const MAX_FRAME_DT_SEC: f32 = 0.25; // dt handed to the mapper is capped here

// Forest look
pub const CLEAR_COLOR: [f64; 3] = [0.0, 0.0, 0.0];
pub const FOG_COLOR: [f32; 3] = [0.039, 0.059, 0.173]; // #0a0f2c
pub const FOG_NEAR: f32 = 4.0;
pub const FOG_FAR: f32 = 20.0;
pub const VIGNETTE_OFFSET: f32 = 0.22;
pub const VIGNETTE_DARKNESS: f32 = 0.82;
pub const LIGHT_DIR: [f32; 3] = [5.0, 10.0, 2.0]; // toward the point light
pub const LIGHT_TINT: [f32; 3] = [0.647, 0.431, 1.0]; // #a56eff
pub const AMBIENT: f32 = 0.2;
pub const GROUND_COLOR: [f32; 3] = [0.008, 0.008, 0.039]; // #02020a
pub const GROUND_HALF_EXTENT: f32 = 100.0;

// Mesh resolution
pub const PRISM_SIDES: u16 = 8;
pub const DISC_SEGMENTS: u16 = 64; // mist layers
pub const LEAF_CURVE_STEPS: u16 = 12; // samples per leaf edge
