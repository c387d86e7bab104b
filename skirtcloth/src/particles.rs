use glam::Vec3;
use std::collections::HashMap;

/// Welds coincident vertices into cloth particles.
///
/// Particles are the distinct positions in order of first appearance. Equality is
/// exact per component, except that `-0.0` and `0.0` are the same position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleMap {
    pub positions: Vec<Vec3>,
    /// Particle index of every source vertex.
    pub vertex_to_particle: Vec<usize>,
    /// First source vertex of every particle.
    pub particle_to_vertex: Vec<usize>,
}

impl ParticleMap {
    pub fn from_positions(vertices: &[Vec3]) -> Self {
        let mut index: HashMap<[u32; 3], usize> = HashMap::with_capacity(vertices.len());
        let mut out = Self {
            positions: Vec::new(),
            vertex_to_particle: Vec::with_capacity(vertices.len()),
            particle_to_vertex: Vec::new(),
        };

        for (vertex, &v) in vertices.iter().enumerate() {
            let particle = *index.entry(position_key(v)).or_insert_with(|| {
                out.positions.push(v);
                out.particle_to_vertex.push(vertex);
                out.positions.len() - 1
            });
            out.vertex_to_particle.push(particle);
        }

        out
    }

    pub fn particle_count(&self) -> usize {
        self.positions.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_to_particle.len()
    }

    /// Per-vertex copy of per-particle values. Returns `None` when `values` does
    /// not have one entry per particle.
    pub fn expand<T: Clone>(&self, values: &[T]) -> Option<Vec<T>> {
        if values.len() != self.particle_count() {
            return None;
        }
        Some(
            self.vertex_to_particle
                .iter()
                .map(|&p| values[p].clone())
                .collect(),
        )
    }
}

fn position_key(v: Vec3) -> [u32; 3] {
    // Adding zero folds -0.0 into 0.0.
    [
        (v.x + 0.0).to_bits(),
        (v.y + 0.0).to_bits(),
        (v.z + 0.0).to_bits(),
    ]
}
