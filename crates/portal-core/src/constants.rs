use glam::Vec3;

// Shared parallax/camera tuning constants used by every scene preset.

// Viewport fallback when the host has not measured the window yet
pub const FALLBACK_VIEWPORT_WIDTH: f32 = 1920.0;
pub const FALLBACK_VIEWPORT_HEIGHT: f32 = 1080.0;

// Spring integration
pub const SPRING_MASS: f32 = 1.0;
pub const SPRING_REST_DELTA: f32 = 0.01; // distance from target considered at rest
pub const SPRING_REST_SPEED: f32 = 0.01; // speed (units/sec) considered at rest
pub const SPRING_SUBSTEP_SEC: f32 = 1.0 / 120.0; // fixed integration step
pub const SPRING_MAX_FRAME_SEC: f32 = 0.25; // longer gaps are truncated

// Spring presets (stiffness, damping)
pub const SPRING_SOFT: (f32, f32) = (35.0, 12.0);
pub const SPRING_OVERLAY: (f32, f32) = (40.0, 15.0);
pub const SPRING_FOREST: (f32, f32) = (45.0, 18.0);
pub const SPRING_CORRIDOR: (f32, f32) = (50.0, 20.0);

// Output ranges, in px (overlays) or degrees (camera tilt)
pub const RANGE_WIDE_X: f32 = 6.0;
pub const RANGE_WIDE_Y: f32 = 4.0;
pub const RANGE_HUB_X: f32 = 5.0;
pub const RANGE_HUB_Y: f32 = 3.0;

// Intro wormhole timeline (seconds)
pub const WORMHOLE_PLAY_SEC: f32 = 2.6; // tunnel spin + fade delay
pub const WORMHOLE_FADE_SEC: f32 = 0.8; // overlay fade-out
pub const WORMHOLE_FAILSAFE_SEC: f32 = 3.6; // forced completion if the fade never reports
pub const TUNNEL_SPIN_SEC: f32 = 2.4;
pub const TUNNEL_SPIN_DEG: f32 = 720.0;
pub const TUNNEL_END_SCALE: f32 = 0.05;

// Enter-portal transition
pub const PORTAL_WARP_SEC: f32 = 5.0;
pub const PORTAL_ROUTE: &str = "/portfolio";

// Forest camera and intro dolly
pub const FOREST_FOV_DEG: f32 = 50.0;
pub const FOREST_ZNEAR: f32 = 0.1;
pub const FOREST_ZFAR: f32 = 1000.0;
pub const DOLLY_FROM: Vec3 = Vec3::new(0.0, 3.0, 11.0);
pub const DOLLY_TO: Vec3 = Vec3::new(0.0, 2.0, 8.0);
pub const DOLLY_LOOK_AT: Vec3 = Vec3::new(0.0, 1.8, 0.0);
pub const DOLLY_SEC: f32 = 2.6;

// Forest layout
pub const TREE_COUNT: usize = 18;
pub const TRUNK_COUNT: usize = 24;
pub const LEAVES_PER_BRANCH: usize = 4;

pub const LEAF_PALETTE: [[f32; 3]; 6] = [
    [0.0, 1.0, 1.0],     // cyan
    [1.0, 0.0, 1.0],     // magenta
    [0.224, 1.0, 0.078], // neon lime
    [0.302, 0.816, 0.882],
    [0.545, 0.0, 1.0],   // violet
    [1.0, 0.412, 0.706], // hot pink
];

pub const TRUNK_COLOR: [f32; 3] = [0.039, 0.039, 0.082];
pub const BRANCH_COLOR: [f32; 3] = [0.051, 0.051, 0.102];
pub const BARE_TRUNK_COLOR: [f32; 3] = [0.024, 0.024, 0.051];

// Atmosphere
pub const MIST_LAYER_COLORS: [[f32; 3]; 3] = [
    [0.302, 0.816, 0.882], // #4dd0e1
    [0.0, 1.0, 1.0],       // #00ffff
    [1.0, 0.412, 0.706],   // #ff69b4
];
pub const MIST_HEIGHT: f32 = 0.6;
pub const MIST_BASE_RADIUS: f32 = 18.0; // shrinks by MIST_RADIUS_STEP per layer
pub const MIST_RADIUS_STEP: f32 = 3.0;
pub const MIST_DRIFT: f32 = 2.0; // max horizontal drift of a layer

pub const SPARKLE_COUNT: usize = 120;
pub const SPARKLE_BOX: Vec3 = Vec3::new(40.0, 8.0, 40.0); // x and z centered, y from the ground up
pub const SPARKLE_BOB: f32 = 0.25; // vertical drift amplitude
pub const SPARKLE_SPEED: f32 = 0.3;
pub const SPARKLE_SIZE: f32 = 0.05;
pub const SPARKLE_OPACITY: f32 = 0.7;
pub const SPARKLE_COLOR: [f32; 3] = [0.667, 1.0, 1.0]; // #aaffff
