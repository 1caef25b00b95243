//! Seeded layout of the bioluminescent forest scene and its per-frame
//! animation (tree and leaf sway, leaf pulse, drifting mist, fireflies).
//!
//! All randomness comes from the caller's RNG, so a fixed seed reproduces the
//! same forest.

use crate::constants::{
    BARE_TRUNK_COLOR, BRANCH_COLOR, LEAF_PALETTE, LEAVES_PER_BRANCH, MIST_BASE_RADIUS, MIST_DRIFT,
    MIST_HEIGHT, MIST_LAYER_COLORS, MIST_RADIUS_STEP, SPARKLE_BOB, SPARKLE_BOX, SPARKLE_COLOR,
    SPARKLE_COUNT, SPARKLE_OPACITY, SPARKLE_SIZE, SPARKLE_SPEED, TREE_COUNT, TRUNK_COLOR,
    TRUNK_COUNT,
};
use glam::{Mat4, Quat, Vec3};
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForestParams {
    pub tree_count: usize,
    pub trunk_count: usize,
    pub sparkle_count: usize,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            tree_count: TREE_COUNT,
            trunk_count: TRUNK_COUNT,
            sparkle_count: SPARKLE_COUNT,
        }
    }
}

/// Branch segment in tree-local space (tree base at the origin).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Branch {
    pub start: Vec3,
    pub end: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Leaf {
    /// Tree-local position.
    pub position: Vec3,
    pub scale: f32,
    pub pulse_speed: f32,
    pub phase: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    pub position: Vec3,
    pub height: f32,
    pub trunk_radius: f32,
    pub branches: Vec<Branch>,
    pub leaves: Vec<Leaf>,
    pub leaf_color: [f32; 3],
    pub sway_phase: f32,
}

/// Background trunk without branches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BareTrunk {
    pub position: Vec3,
    pub height: f32,
}

/// Firefly resting point; it bobs around `base` over time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sparkle {
    pub base: Vec3,
    pub speed: f32,
    pub phase: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Forest {
    pub trees: Vec<Tree>,
    pub trunks: Vec<BareTrunk>,
    pub sparkles: Vec<Sparkle>,
}

/// Translucent ground disc at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MistLayer {
    pub center: Vec3,
    pub radius: f32,
    pub color: [f32; 3],
    pub opacity: f32,
}

/// One drawable copy of a unit mesh.
///
/// Segments use a unit prism (radius 1, y in \[0, 1\]) whose top ring is
/// scaled by `taper`; leaves use the unit leaf; mist uses the unit disc and
/// sparkles the unit diamond. Unlit instances skip the light and show
/// their flat color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instance {
    pub model: Mat4,
    pub color: [f32; 3],
    pub emissive: f32,
    pub taper: f32,
    pub opacity: f32,
    pub unlit: bool,
}

impl Instance {
    /// Opaque, lit instance without glow.
    pub fn solid(model: Mat4, color: [f32; 3], taper: f32) -> Self {
        Self {
            model,
            color,
            emissive: 0.0,
            taper,
            opacity: 1.0,
            unlit: false,
        }
    }
}

/// Per-frame draw lists. `segments` and `leaves` are opaque; `mist` and
/// `sparkles` are blended and go after them.
#[derive(Clone, Debug, Default)]
pub struct ForestInstances {
    pub segments: Vec<Instance>,
    pub leaves: Vec<Instance>,
    pub mist: Vec<Instance>,
    pub sparkles: Vec<Instance>,
}

impl ForestInstances {
    pub fn clear(&mut self) {
        self.segments.clear();
        self.leaves.clear();
        self.mist.clear();
        self.sparkles.clear();
    }
}

fn ring_point<R: Rng>(rng: &mut R, r_min: f32, r_span: f32) -> Vec3 {
    let r = r_min + rng.gen::<f32>() * r_span;
    let a = rng.gen::<f32>() * TAU;
    Vec3::new(a.cos() * r, 0.0, a.sin() * r)
}

fn generate_tree<R: Rng>(rng: &mut R, index: usize) -> Tree {
    let position = ring_point(rng, 5.0, 16.0);
    let height = 6.0 + rng.gen::<f32>() * 8.0;
    let trunk_radius = 0.15 + rng.gen::<f32>() * 0.1;
    let leaf_color = LEAF_PALETTE[index % LEAF_PALETTE.len()];

    // Branches sit in the upper part of the trunk
    let branch_count = 4 + (rng.gen::<f32>() * 4.0).floor() as usize;
    let mut branches = Vec::with_capacity(branch_count);
    let mut leaves = Vec::with_capacity(branch_count * LEAVES_PER_BRANCH);
    for b in 0..branch_count {
        let frac = b as f32 / branch_count as f32;
        let start = Vec3::new(0.0, height * (0.4 + frac * 0.55), 0.0);
        let angle = frac * TAU + rng.gen::<f32>();
        let length = 1.2 + rng.gen::<f32>() * 2.0;
        let horizontal = length * (0.6 + rng.gen::<f32>() * 0.3);
        let rise = length * (0.3 + rng.gen::<f32>() * 0.4);
        let end = start + Vec3::new(angle.cos() * horizontal, rise, angle.sin() * horizontal);
        branches.push(Branch { start, end });

        for li in 0..LEAVES_PER_BRANCH {
            let a = (li as f32 / LEAVES_PER_BRANCH as f32) * TAU + rng.gen::<f32>() * 0.5;
            let dist = 0.15 + rng.gen::<f32>() * 0.25;
            let dy = (rng.gen::<f32>() - 0.5) * 0.4;
            leaves.push(Leaf {
                position: end + Vec3::new(a.cos() * dist, dy, a.sin() * dist),
                scale: 0.12 + rng.gen::<f32>() * 0.06,
                pulse_speed: 0.6 + rng.gen::<f32>() * 0.5,
                phase: rng.gen::<f32>() * TAU,
            });
        }
    }

    Tree {
        position,
        height,
        trunk_radius,
        branches,
        leaves,
        leaf_color,
        sway_phase: rng.gen::<f32>() * TAU,
    }
}

pub fn generate<R: Rng>(rng: &mut R, params: &ForestParams) -> Forest {
    let trees = (0..params.tree_count)
        .map(|i| generate_tree(rng, i))
        .collect::<Vec<_>>();
    let trunks = (0..params.trunk_count)
        .map(|_| {
            let position = ring_point(rng, 6.0, 18.0);
            BareTrunk {
                position,
                height: 4.0 + rng.gen::<f32>() * 10.0,
            }
        })
        .collect::<Vec<_>>();
    let sparkles = (0..params.sparkle_count)
        .map(|_| generate_sparkle(rng))
        .collect::<Vec<_>>();
    log::info!(
        "[forest] trees={} trunks={} leaves={} sparkles={}",
        trees.len(),
        trunks.len(),
        trees.iter().map(|t| t.leaves.len()).sum::<usize>(),
        sparkles.len()
    );
    Forest {
        trees,
        trunks,
        sparkles,
    }
}

fn generate_sparkle<R: Rng>(rng: &mut R) -> Sparkle {
    // Keep the bob inside the box
    let span_y = SPARKLE_BOX.y - 2.0 * SPARKLE_BOB;
    Sparkle {
        base: Vec3::new(
            (rng.gen::<f32>() - 0.5) * SPARKLE_BOX.x,
            SPARKLE_BOB + rng.gen::<f32>() * span_y,
            (rng.gen::<f32>() - 0.5) * SPARKLE_BOX.z,
        ),
        speed: SPARKLE_SPEED * (0.5 + rng.gen::<f32>()),
        phase: rng.gen::<f32>() * TAU,
    }
}

/// Slow sway as (rotation about x, rotation about z) in radians.
#[inline]
pub fn tree_sway(time_sec: f32, phase: f32) -> (f32, f32) {
    let rx = (time_sec * 0.18 + phase * 0.8).cos() * 0.025;
    let rz = (time_sec * 0.2 + phase).sin() * 0.03;
    (rx, rz)
}

/// Per-leaf flutter as (rotation about x, rotation about z) in radians.
#[inline]
pub fn leaf_sway(time_sec: f32, leaf: &Leaf) -> (f32, f32) {
    let rx = (time_sec * 0.6 + leaf.phase).sin() * 0.08;
    let rz = (time_sec * 0.5 + leaf.phase * 0.7).cos() * 0.06;
    (rx, rz)
}

/// Mist layer `index` at `time_sec`. Layers shrink with depth and drift
/// slowly around the clearing.
pub fn mist_layer(index: usize, time_sec: f32) -> MistLayer {
    let i = index as f32;
    MistLayer {
        center: Vec3::new(
            (time_sec * 0.02 + i).sin() * MIST_DRIFT,
            MIST_HEIGHT,
            (time_sec * 0.015 + i * 0.5).cos() * MIST_DRIFT,
        ),
        radius: MIST_BASE_RADIUS - i * MIST_RADIUS_STEP,
        color: MIST_LAYER_COLORS[index % MIST_LAYER_COLORS.len()],
        opacity: 0.12 + 0.08 * (time_sec * 0.4 + i).sin(),
    }
}

/// Firefly position at `time_sec`.
#[inline]
pub fn sparkle_position(time_sec: f32, s: &Sparkle) -> Vec3 {
    s.base + Vec3::Y * ((time_sec * s.speed * TAU + s.phase).sin() * SPARKLE_BOB)
}

/// Firefly opacity at `time_sec`, twinkling below `SPARKLE_OPACITY`.
#[inline]
pub fn sparkle_opacity(time_sec: f32, s: &Sparkle) -> f32 {
    SPARKLE_OPACITY * (0.7 + 0.3 * (time_sec * s.speed * 3.0 + s.phase * 1.7).sin())
}

/// Leaf glow pulse in \[0, 1\].
#[inline]
pub fn leaf_pulse(time_sec: f32, leaf: &Leaf) -> f32 {
    0.5 + 0.5 * (time_sec * leaf.pulse_speed + leaf.phase * 1.13).sin()
}

/// Model matrix placing the unit prism between `start` and `end`.
fn segment_model(start: Vec3, end: Vec3, radius: f32) -> Mat4 {
    let dir = end - start;
    let length = dir.length();
    let rot = if length > 1e-6 {
        Quat::from_rotation_arc(Vec3::Y, dir / length)
    } else {
        Quat::IDENTITY
    };
    Mat4::from_scale_rotation_translation(Vec3::new(radius, length, radius), rot, start)
}

impl Forest {
    pub fn leaf_count(&self) -> usize {
        self.trees.iter().map(|t| t.leaves.len()).sum()
    }

    /// Fill `out` with every instance of the scene at `time_sec`.
    pub fn instances_into(&self, time_sec: f32, out: &mut ForestInstances) {
        out.clear();
        let leaf_tilt = Quat::from_rotation_x(-FRAC_PI_2 + 0.25);
        for tree in &self.trees {
            let (rx, rz) = tree_sway(time_sec, tree.sway_phase);
            let root = Mat4::from_rotation_translation(
                Quat::from_euler(glam::EulerRot::XYZ, rx, 0.0, rz),
                tree.position,
            );
            out.segments.push(Instance::solid(
                root * segment_model(Vec3::ZERO, Vec3::Y * tree.height, tree.trunk_radius),
                TRUNK_COLOR,
                0.6,
            ));
            for b in &tree.branches {
                out.segments.push(Instance::solid(
                    root * segment_model(b.start, b.end, 0.05),
                    BRANCH_COLOR,
                    0.6,
                ));
            }
            for leaf in &tree.leaves {
                let p = leaf_pulse(time_sec, leaf);
                let s = leaf.scale * (1.0 + 0.05 * p);
                let (lx, lz) = leaf_sway(time_sec, leaf);
                let sway = Quat::from_euler(glam::EulerRot::XYZ, lx, 0.0, lz);
                out.leaves.push(Instance {
                    emissive: 0.6 + 0.8 * p,
                    ..Instance::solid(
                        root * Mat4::from_scale_rotation_translation(
                            Vec3::splat(s),
                            sway * leaf_tilt,
                            leaf.position,
                        ),
                        tree.leaf_color,
                        1.0,
                    )
                });
            }
        }
        for trunk in &self.trunks {
            out.segments.push(Instance::solid(
                segment_model(
                    trunk.position,
                    trunk.position + Vec3::Y * trunk.height,
                    0.12,
                ),
                BARE_TRUNK_COLOR,
                0.08 / 0.12,
            ));
        }
        for i in 0..MIST_LAYER_COLORS.len() {
            let layer = mist_layer(i, time_sec);
            out.mist.push(Instance {
                opacity: layer.opacity,
                unlit: true,
                ..Instance::solid(
                    Mat4::from_scale_rotation_translation(
                        Vec3::new(layer.radius, 1.0, layer.radius),
                        Quat::IDENTITY,
                        layer.center,
                    ),
                    layer.color,
                    1.0,
                )
            });
        }
        for s in &self.sparkles {
            out.sparkles.push(Instance {
                opacity: sparkle_opacity(time_sec, s),
                unlit: true,
                ..Instance::solid(
                    Mat4::from_scale_rotation_translation(
                        Vec3::splat(SPARKLE_SIZE),
                        Quat::IDENTITY,
                        sparkle_position(time_sec, s),
                    ),
                    SPARKLE_COLOR,
                    1.0,
                )
            });
        }
    }

    pub fn instances(&self, time_sec: f32) -> ForestInstances {
        let mut out = ForestInstances::default();
        self.instances_into(time_sec, &mut out);
        out
    }
}
