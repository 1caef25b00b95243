// Host-side tests for seeded forest generation.

use portal_core::constants::MIST_LAYER_COLORS;
use portal_core::forest::{
    generate, leaf_pulse, leaf_sway, mist_layer, sparkle_opacity, sparkle_position, tree_sway,
    ForestParams,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn forest(seed: u64) -> portal_core::forest::Forest {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(&mut rng, &ForestParams::default())
}

#[test]
fn same_seed_reproduces_the_same_forest() {
    assert_eq!(forest(42), forest(42));
}

#[test]
fn different_seeds_differ() {
    assert_ne!(forest(1), forest(2));
}

#[test]
fn layout_respects_generation_ranges() {
    let f = forest(7);
    assert_eq!(f.trees.len(), 18);
    assert_eq!(f.trunks.len(), 24);
    for tree in &f.trees {
        let r = (tree.position.x.powi(2) + tree.position.z.powi(2)).sqrt();
        assert!((5.0 - 1e-3..=21.0 + 1e-3).contains(&r), "tree radius {r}");
        assert_eq!(tree.position.y, 0.0);
        assert!((6.0..=14.0).contains(&tree.height));
        assert!((0.15..=0.25).contains(&tree.trunk_radius));
        assert!((4..=7).contains(&tree.branches.len()));
        assert_eq!(tree.leaves.len(), tree.branches.len() * 4);
        for b in &tree.branches {
            assert!(b.start.y >= tree.height * 0.4 - 1e-4);
            assert!(b.end.y > b.start.y, "branches rise");
        }
    }
    for t in &f.trunks {
        let r = (t.position.x.powi(2) + t.position.z.powi(2)).sqrt();
        assert!((6.0 - 1e-3..=24.0 + 1e-3).contains(&r), "trunk radius {r}");
        assert!((4.0..=14.0).contains(&t.height));
    }
}

#[test]
fn leaf_colors_cycle_through_palette() {
    let f = forest(3);
    assert_eq!(f.trees[0].leaf_color, f.trees[6].leaf_color);
    assert_ne!(f.trees[0].leaf_color, f.trees[1].leaf_color);
}

#[test]
fn instances_cover_every_segment_and_leaf() {
    let f = forest(11);
    let inst = f.instances(1.0);
    let branch_total: usize = f.trees.iter().map(|t| t.branches.len()).sum();
    assert_eq!(
        inst.segments.len(),
        f.trees.len() + branch_total + f.trunks.len()
    );
    assert_eq!(inst.leaves.len(), f.leaf_count());
    for l in &inst.leaves {
        assert!((0.6..=1.4 + 1e-6).contains(&l.emissive));
        assert!(l.model.is_finite());
    }
}

#[test]
fn sway_and_pulse_stay_small_and_bounded() {
    let f = forest(5);
    for step in 0..200 {
        let t = step as f32 * 0.37;
        let (rx, rz) = tree_sway(t, 1.3);
        assert!(rx.abs() <= 0.025 + 1e-6);
        assert!(rz.abs() <= 0.03 + 1e-6);
        for leaf in &f.trees[0].leaves {
            let p = leaf_pulse(t, leaf);
            assert!((0.0..=1.0).contains(&p));
        }
    }
}

#[test]
fn leaves_flutter_within_small_angles() {
    let f = forest(9);
    let leaf = f.trees[0].leaves[0];
    let mut seen = Vec::new();
    for step in 0..300 {
        let t = step as f32 * 0.11;
        let (rx, rz) = leaf_sway(t, &leaf);
        assert!(rx.abs() <= 0.08 + 1e-6, "rx {rx}");
        assert!(rz.abs() <= 0.06 + 1e-6, "rz {rz}");
        seen.push((rx, rz));
    }
    assert_ne!(seen[0], seen[10], "sway moves over time");
}

#[test]
fn leaf_instances_follow_the_sway() {
    let f = forest(9);
    let a = f.instances(0.0);
    let b = f.instances(1.7);
    let ra = a.leaves[0].model.to_scale_rotation_translation().1;
    let rb = b.leaves[0].model.to_scale_rotation_translation().1;
    assert!(!ra.abs_diff_eq(rb, 1e-4));
}

#[test]
fn mist_layers_shrink_and_drift_gently() {
    for step in 0..200 {
        let t = step as f32 * 1.3;
        for i in 0..3 {
            let m = mist_layer(i, t);
            assert_eq!(m.radius, 18.0 - 3.0 * i as f32);
            assert_eq!(m.color, MIST_LAYER_COLORS[i]);
            assert_eq!(m.center.y, 0.6);
            assert!(m.center.x.abs() <= 2.0 + 1e-6);
            assert!(m.center.z.abs() <= 2.0 + 1e-6);
            assert!((0.04 - 1e-6..=0.2 + 1e-6).contains(&m.opacity));
        }
    }
    assert_ne!(mist_layer(0, 0.0).center, mist_layer(0, 30.0).center);
    assert_eq!(mist_layer(1, 4.0), mist_layer(1, 4.0));
}

#[test]
fn sparkles_are_seeded_and_stay_in_their_box() {
    let f = forest(21);
    assert_eq!(f.sparkles.len(), 120);
    assert_eq!(f.sparkles, forest(21).sparkles);
    assert_ne!(f.sparkles, forest(22).sparkles);
    for s in &f.sparkles {
        for step in 0..100 {
            let t = step as f32 * 0.37;
            let p = sparkle_position(t, s);
            assert!(p.x.abs() <= 20.0, "x {}", p.x);
            assert!(p.z.abs() <= 20.0, "z {}", p.z);
            assert!((0.0..=8.0).contains(&p.y), "y {}", p.y);
            let o = sparkle_opacity(t, s);
            assert!(o > 0.0 && o <= 0.7 + 1e-6, "opacity {o}");
        }
    }
}

#[test]
fn translucent_layers_are_separate_from_opaque_geometry() {
    let f = forest(4);
    let inst = f.instances(2.0);
    assert_eq!(inst.mist.len(), 3);
    assert_eq!(inst.sparkles.len(), f.sparkles.len());
    for i in inst.mist.iter().chain(&inst.sparkles) {
        assert!(i.unlit);
        assert!(i.opacity < 1.0);
        assert!(i.model.is_finite());
    }
    for i in inst.segments.iter().chain(&inst.leaves) {
        assert!(!i.unlit);
        assert_eq!(i.opacity, 1.0);
    }
}

#[test]
fn sparkle_count_follows_params() {
    let mut rng = StdRng::seed_from_u64(1);
    let params = ForestParams {
        sparkle_count: 0,
        ..ForestParams::default()
    };
    let f = generate(&mut rng, &params);
    assert!(f.sparkles.is_empty());
    assert!(f.instances(0.0).sparkles.is_empty());
}
