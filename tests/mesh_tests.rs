// Host-side tests for the forest unit meshes.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod mesh {
    include!("../src/render/mesh.rs");
}

use mesh::*;

fn indices_in_range(m: &MeshData) -> bool {
    m.indices.iter().all(|&i| (i as usize) < m.vertices.len())
}

#[test]
fn prism_spans_unit_height_and_radius() {
    let m = unit_prism(8);
    assert_eq!(m.vertices.len(), 8 * 4);
    assert_eq!(m.index_count(), 8 * 6);
    assert!(indices_in_range(&m));
    for v in &m.vertices {
        let [x, y, z] = v.position;
        assert!((x * x + z * z - 1.0).abs() < 1e-5);
        assert!(y == 0.0 || y == 1.0);
        let [nx, ny, nz] = v.normal;
        assert_eq!(ny, 0.0);
        assert!((nx * nx + nz * nz - 1.0).abs() < 1e-5);
    }
}

#[test]
fn prism_clamps_degenerate_side_counts() {
    assert_eq!(unit_prism(0).vertices.len(), 3 * 4);
    assert_eq!(unit_prism(2).index_count(), 3 * 6);
}

#[test]
fn leaf_outline_runs_from_base_to_tip() {
    let m = unit_leaf(12);
    assert_eq!(m.vertices.len(), 1 + 2 * 12);
    assert_eq!(m.index_count(), 2 * 12 * 3);
    assert!(indices_in_range(&m));
    assert_eq!(m.vertices[1].position, [0.0, 0.0, 0.0]);
    let ys = m.vertices.iter().map(|v| v.position[1]);
    let top = ys.clone().fold(f32::MIN, f32::max);
    let bottom = ys.fold(f32::MAX, f32::min);
    assert!((top - 1.4).abs() < 1e-6);
    assert_eq!(bottom, 0.0);
    // Quadratic edges bulge to half the control offset
    let widest = m
        .vertices
        .iter()
        .map(|v| v.position[0].abs())
        .fold(0.0f32, f32::max);
    assert!((widest - 0.3).abs() < 1e-3, "widest {widest}");
    assert!(m.vertices.iter().all(|v| v.position[2] == 0.0));
}

#[test]
fn disc_has_unit_radius_on_the_ground_plane() {
    let m = unit_disc(64);
    assert_eq!(m.vertices.len(), 65);
    assert_eq!(m.index_count(), 64 * 3);
    assert!(indices_in_range(&m));
    for v in &m.vertices[1..] {
        let [x, y, z] = v.position;
        assert_eq!(y, 0.0);
        assert!((x * x + z * z - 1.0).abs() < 1e-5);
        assert_eq!(v.normal, [0.0, 1.0, 0.0]);
    }
    assert_eq!(unit_disc(1).vertices.len(), 4);
}

#[test]
fn diamond_is_a_closed_octahedron() {
    let m = unit_diamond();
    assert_eq!(m.vertices.len(), 6);
    assert_eq!(m.index_count(), 24);
    assert!(indices_in_range(&m));
    // Every edge of a closed mesh is shared by exactly two triangles
    let mut edges = std::collections::HashMap::new();
    for tri in m.indices.chunks(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            *edges.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        }
    }
    assert_eq!(edges.len(), 12);
    assert!(edges.values().all(|&n| n == 2));
}

#[test]
fn ground_is_flat_and_facing_up() {
    let m = ground_quad(50.0);
    assert!(indices_in_range(&m));
    for v in &m.vertices {
        assert_eq!(v.position[1], 0.0);
        assert_eq!(v.normal, [0.0, 1.0, 0.0]);
        assert_eq!(v.position[0].abs(), 50.0);
    }
}

#[test]
fn vertex_layout_is_tightly_packed() {
    assert_eq!(std::mem::size_of::<Vertex>(), 24);
    let m = unit_leaf(4);
    let bytes: &[u8] = bytemuck::cast_slice(&m.vertices);
    assert_eq!(bytes.len(), m.vertices.len() * 24);
}
