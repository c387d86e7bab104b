use crate::{ClothCoefficient, Error};
use glam::Vec3;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// Solver settings of a cloth component.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
pub struct ClothParameters {
    pub stretching_stiffness: f32,
    pub bending_stiffness: f32,
    pub use_tethers: bool,
    pub use_gravity: bool,
    pub damping: f32,
    pub external_acceleration: Vec3,
    pub random_acceleration: Vec3,
    pub world_velocity_scale: f32,
    pub world_acceleration_scale: f32,
    pub friction: f32,
    pub collision_mass_scale: f32,
    pub enable_continuous_collision: bool,
    pub use_virtual_particles: bool,
    pub solver_frequency: f32,
    pub sleep_threshold: f32,
}

impl Default for ClothParameters {
    fn default() -> Self {
        Self {
            stretching_stiffness: 1.0,
            bending_stiffness: 0.0,
            use_tethers: true,
            use_gravity: true,
            damping: 0.0,
            external_acceleration: Vec3::ZERO,
            random_acceleration: Vec3::ZERO,
            world_velocity_scale: 0.5,
            world_acceleration_scale: 1.0,
            friction: 0.5,
            collision_mass_scale: 0.0,
            enable_continuous_collision: true,
            use_virtual_particles: true,
            solver_frequency: 120.0,
            sleep_threshold: 0.1,
        }
    }
}

impl ClothParameters {
    /// Settings that keep a skirt from reacting to avatar locomotion.
    pub fn apply_recommended(&mut self) {
        self.stretching_stiffness = 0.8;
        self.bending_stiffness = 0.8;
        self.damping = 0.2;
        self.world_velocity_scale = 0.0;
        self.world_acceleration_scale = 0.0;
        self.friction = 0.0;
        self.sleep_threshold = 1.0;
    }

    pub fn recommended() -> Self {
        let mut out = Self::default();
        out.apply_recommended();
        out
    }
}

/// How preset coefficients are matched to the particles of another cloth.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum VertexMatching {
    /// Same particle index.
    #[default]
    Index,
    /// Nearest preset particle; ties go to the lowest index.
    Position,
}

/// Saved cloth setup that can be reapplied to other meshes.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
pub struct ClothPreset {
    pub parameters: ClothParameters,
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub coefficients: Vec<ClothCoefficient>,
}

impl ClothPreset {
    pub fn capture(
        parameters: ClothParameters,
        vertices: &[Vec3],
        normals: &[Vec3],
        coefficients: &[ClothCoefficient],
    ) -> Result<Self, Error> {
        let out = Self {
            parameters,
            vertices: vertices.to_vec(),
            normals: normals.to_vec(),
            coefficients: coefficients.to_vec(),
        };
        out.validate()?;
        Ok(out)
    }

    pub fn validate(&self) -> Result<(), Error> {
        let n = self.vertices.len();
        if !self.normals.is_empty() && self.normals.len() != n {
            return Err(Error::attribute_length("normals", n, self.normals.len()));
        }
        if self.coefficients.len() != n {
            return Err(Error::attribute_length(
                "coefficients",
                n,
                self.coefficients.len(),
            ));
        }
        Ok(())
    }

    /// Coefficients for a cloth whose particles sit at `particles`.
    pub fn coefficients_for(
        &self,
        particles: &[Vec3],
        matching: VertexMatching,
    ) -> Result<Vec<ClothCoefficient>, Error> {
        self.validate()?;
        match matching {
            VertexMatching::Index => {
                if self.coefficients.len() < particles.len() {
                    log::warn!(
                        "preset has {} coefficients for {} particles; the rest stay unbounded",
                        self.coefficients.len(),
                        particles.len()
                    );
                }
                Ok((0..particles.len())
                    .map(|i| {
                        self.coefficients
                            .get(i)
                            .copied()
                            .unwrap_or(ClothCoefficient::UNBOUNDED)
                    })
                    .collect())
            }
            VertexMatching::Position => {
                if self.vertices.is_empty() {
                    return Err(Error::EmptyPreset);
                }
                Ok(particles
                    .iter()
                    .map(|&p| self.coefficients[nearest_index(&self.vertices, p)])
                    .collect())
            }
        }
    }

    /// Appends `other`'s particles and coefficients; parameters stay as they are.
    ///
    /// When only one side has normals the other side is filled with zero
    /// normals.
    pub fn concat(&mut self, other: &ClothPreset) -> Result<(), Error> {
        self.validate()?;
        other.validate()?;

        if !self.normals.is_empty() || !other.normals.is_empty() {
            self.normals.resize(self.vertices.len(), Vec3::ZERO);
            if other.normals.is_empty() {
                self.normals
                    .resize(self.vertices.len() + other.vertices.len(), Vec3::ZERO);
            } else {
                self.normals.extend_from_slice(&other.normals);
            }
        }
        self.vertices.extend_from_slice(&other.vertices);
        self.coefficients.extend_from_slice(&other.coefficients);
        Ok(())
    }
}

fn nearest_index(points: &[Vec3], target: Vec3) -> usize {
    let mut best = 0usize;
    let mut best_d = f32::INFINITY;
    for (i, p) in points.iter().enumerate() {
        let d = p.distance_squared(target);
        if d < best_d {
            best = i;
            best_d = d;
        }
    }
    best
}
