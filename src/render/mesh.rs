// Unit meshes for the forest. Kept free of GPU types so host tests can
// include this file directly.

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Open prism of radius 1 spanning y in [0, 1].
///
/// Sides do not share vertices so each face keeps a flat normal, which
/// reads as faceted bark under the point light. The top ring is narrowed
/// per instance in the vertex shader.
pub fn unit_prism(sides: u16) -> MeshData {
    let sides = sides.max(3);
    let ring = |i: u16| {
        let a = i as f32 / sides as f32 * std::f32::consts::TAU;
        (a.cos(), a.sin())
    };
    let mut mesh = MeshData::default();
    for i in 0..sides {
        let (x0, z0) = ring(i);
        let (x1, z1) = ring((i + 1) % sides);
        let mid = (i as f32 + 0.5) / sides as f32 * std::f32::consts::TAU;
        let normal = [mid.cos(), 0.0, mid.sin()];
        let base = mesh.vertices.len() as u16;
        for position in [[x0, 0.0, z0], [x1, 0.0, z1], [x1, 1.0, z1], [x0, 1.0, z0]] {
            mesh.vertices.push(Vertex { position, normal });
        }
        mesh.indices
            .extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
    }
    mesh
}

/// Leaf outline in the XY plane, pointing up +y: two quadratic edges
/// meeting at the base (0, 0) and the tip (0, 1.4).
pub fn unit_leaf(steps: u16) -> MeshData {
    let steps = steps.max(2);
    let quad = |p0: [f32; 2], c: [f32; 2], p1: [f32; 2], t: f32| {
        let u = 1.0 - t;
        [
            u * u * p0[0] + 2.0 * u * t * c[0] + t * t * p1[0],
            u * u * p0[1] + 2.0 * u * t * c[1] + t * t * p1[1],
        ]
    };
    let mut outline = Vec::with_capacity(2 * steps as usize);
    for i in 0..steps {
        let t = i as f32 / steps as f32;
        outline.push(quad([0.0, 0.0], [0.6, 0.8], [0.0, 1.4], t));
    }
    for i in 0..steps {
        let t = i as f32 / steps as f32;
        outline.push(quad([0.0, 1.4], [-0.6, 0.8], [0.0, 0.0], t));
    }
    fan([0.0, 0.7, 0.0], [0.0, 0.0, 1.0], outline.iter().map(|p| [p[0], p[1], 0.0]))
}

/// Disc of radius 1 on y = 0, facing up.
pub fn unit_disc(segments: u16) -> MeshData {
    let segments = segments.max(3);
    let ring = (0..segments).map(|i| {
        let a = i as f32 / segments as f32 * std::f32::consts::TAU;
        [a.cos(), 0.0, a.sin()]
    });
    fan([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], ring)
}

/// Octahedron of radius 1, used for fireflies.
pub fn unit_diamond() -> MeshData {
    let vertices = [
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
    ]
    .into_iter()
    .map(|position| Vertex {
        position,
        normal: position,
    })
    .collect();
    MeshData {
        vertices,
        indices: vec![
            2, 4, 0, 2, 0, 5, 2, 5, 1, 2, 1, 4, //
            3, 0, 4, 3, 5, 0, 3, 1, 5, 3, 4, 1,
        ],
    }
}

/// Triangle fan from `center` around a closed outline.
fn fan(center: [f32; 3], normal: [f32; 3], outline: impl Iterator<Item = [f32; 3]>) -> MeshData {
    let mut vertices = vec![Vertex {
        position: center,
        normal,
    }];
    vertices.extend(outline.map(|position| Vertex { position, normal }));
    let n = (vertices.len() - 1) as u16;
    let mut indices = Vec::with_capacity(n as usize * 3);
    for i in 0..n {
        indices.extend_from_slice(&[0, 1 + i, 1 + (i + 1) % n]);
    }
    MeshData { vertices, indices }
}

/// Flat square on y = 0 with the given half extent.
pub fn ground_quad(half_extent: f32) -> MeshData {
    let h = half_extent;
    let normal = [0.0, 1.0, 0.0];
    let vertices = [[-h, 0.0, -h], [h, 0.0, -h], [h, 0.0, h], [-h, 0.0, h]]
        .into_iter()
        .map(|position| Vertex { position, normal })
        .collect();
    MeshData {
        vertices,
        indices: vec![0, 2, 1, 0, 3, 2],
    }
}
