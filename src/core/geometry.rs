//! CPU-side geometry for the two scene variants.
//!
//! Geometry is generated once and never mutated afterwards; the renderer
//! uploads it and only refers to it by id from then on.

use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topology {
    Triangles,
    Points,
}

/// Per-element random values fed to the shader as `aRandom`.
///
/// `item_size` is 1 for the planet (one scalar per vertex) and 3 for the
/// particle field (a jitter vector per particle).
#[derive(Clone, Debug)]
pub struct RandomAttribute {
    item_size: usize,
    values: Vec<f32>,
}

impl RandomAttribute {
    pub fn item_size(&self) -> usize {
        self.item_size
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Number of elements (vertices or particles) covered by the attribute.
    pub fn count(&self) -> usize {
        if self.item_size == 0 {
            0
        } else {
            self.values.len() / self.item_size
        }
    }

    fn item(&self, index: usize) -> [f32; 3] {
        let mut out = [0.0; 3];
        let start = index * self.item_size;
        for (k, slot) in out.iter_mut().take(self.item_size.min(3)).enumerate() {
            *slot = self.values[start + k];
        }
        out
    }
}

/// Interleaved vertex as consumed by `scene.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub random: [f32; 3],
}

#[derive(Clone, Debug)]
pub struct GeometryData {
    topology: Topology,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    indices: Option<Vec<u32>>,
    random: RandomAttribute,
}

impl GeometryData {
    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    pub fn random(&self) -> &RandomAttribute {
        &self.random
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Interleave attributes for upload. Missing normals become zero.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, p)| Vertex {
                position: *p,
                normal: self.normals.get(i).copied().unwrap_or([0.0; 3]),
                random: self.random.item(i),
            })
            .collect()
    }
}

/// UV sphere with one random scalar in `[0, 1)` per vertex.
///
/// Produces `(width_segments + 1) * (height_segments + 1)` vertices; the
/// degenerate triangles touching the poles are not emitted.
pub fn sphere<R: Rng + ?Sized>(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
    rng: &mut R,
) -> GeometryData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let row = ws as usize + 1;
    let vertex_count = row * (hs as usize + 1);

    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);

    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        // pole vertices sit in the middle of their segment
        let u_offset = if iy == 0 {
            0.5 / ws as f32
        } else if iy == hs {
            -0.5 / ws as f32
        } else {
            0.0
        };
        let theta = v * std::f32::consts::PI;
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let phi = u * std::f32::consts::TAU;
            let x = -radius * phi.cos() * theta.sin();
            let y = radius * theta.cos();
            let z = radius * phi.sin() * theta.sin();
            positions.push([x, y, z]);
            let n = glam::Vec3::new(x, y, z).normalize_or_zero();
            normals.push(n.to_array());
            uvs.push([u + u_offset, 1.0 - v]);
        }
    }

    let mut indices = Vec::with_capacity(6 * ws as usize * (hs as usize - 1));
    let at = |iy: u32, ix: u32| iy * row as u32 + ix;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = at(iy, ix + 1);
            let b = at(iy, ix);
            let c = at(iy + 1, ix);
            let d = at(iy + 1, ix + 1);
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    let values = (0..vertex_count).map(|_| rng.gen::<f32>()).collect();

    GeometryData {
        topology: Topology::Triangles,
        positions,
        normals,
        uvs,
        indices: Some(indices),
        random: RandomAttribute {
            item_size: 1,
            values,
        },
    }
}

/// Point cloud of `count` particles spread uniformly through a cube of edge
/// `spread` centred on the origin, each with a jitter vector in `[-1, 1)^3`.
pub fn particles<R: Rng + ?Sized>(count: usize, spread: f32, rng: &mut R) -> GeometryData {
    let half = spread * 0.5;
    let mut positions = Vec::with_capacity(count);
    let mut values = Vec::with_capacity(count * 3);
    for _ in 0..count {
        positions.push([
            rng.gen_range(-half..half),
            rng.gen_range(-half..half),
            rng.gen_range(-half..half),
        ]);
        for _ in 0..3 {
            values.push(rng.gen::<f32>() * 2.0 - 1.0);
        }
    }

    GeometryData {
        topology: Topology::Points,
        positions,
        normals: Vec::new(),
        uvs: Vec::new(),
        indices: None,
        random: RandomAttribute {
            item_size: 3,
            values,
        },
    }
}
