use crate::spread::SpreadFrame;
use crate::{Aabb, Error, MeshSnapshot, ParticleMap};
use glam::{Quat, Vec3};

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
pub struct SpreadDeformConfig {
    /// Depth below the top of the baked mesh where spreading starts.
    pub start_height: f32,
    pub angle_degrees: f32,
    /// Allow angles up to 90 degrees instead of 45.
    pub extend_angle: bool,
}

impl Default for SpreadDeformConfig {
    fn default() -> Self {
        Self {
            start_height: 0.1,
            angle_degrees: 30.0,
            extend_angle: false,
        }
    }
}

impl SpreadDeformConfig {
    pub fn effective_angle(&self) -> f32 {
        let limit = if self.extend_angle { 90.0 } else { 45.0 };
        self.angle_degrees.clamp(0.0, limit)
    }
}

/// Bends the free part of a skirt outward along the spread cone.
///
/// `baked` is the posed mesh used to find the pinned ring and the top edge;
/// `source` is the bind-pose mesh whose vertices are moved. Vertices are taken
/// into the hips frame with `hips_rotation` before spreading and back afterwards.
pub fn spread_mesh(
    source: &MeshSnapshot,
    baked: &MeshSnapshot,
    config: &SpreadDeformConfig,
    avatar_offset: Vec3,
    axis_center: Vec3,
    hips_rotation: Quat,
) -> Result<MeshSnapshot, Error> {
    source.validate()?;
    if !hips_rotation.is_finite() || hips_rotation.length_squared() == 0.0 {
        return Err(Error::InvalidValue {
            message: format!("hips rotation {hips_rotation:?} is not a usable rotation"),
        });
    }
    let rotation = hips_rotation.normalize();
    let rotation_inv = rotation.inverse();

    let world_vertices: Vec<Vec3> = ParticleMap::from_positions(&baked.vertices)
        .positions
        .into_iter()
        .map(|v| v + avatar_offset)
        .collect();
    let top_y = Aabb::from_points(&baked.vertices).max.y - config.start_height + avatar_offset.y;

    let frame = SpreadFrame {
        world_vertices: &world_vertices,
        avatar_position: avatar_offset,
        axis_center,
        top_y,
        angle_degrees: config.effective_angle(),
    };

    let mut moved = 0usize;
    let vertices = source
        .vertices
        .iter()
        .map(|&v| {
            let local = rotation * v;
            if local.y + avatar_offset.y > top_y {
                return rotation_inv * local;
            }
            moved += 1;
            rotation_inv * (frame.spread(local).to - avatar_offset)
        })
        .collect();

    let mut out = source.clone();
    out.name = format!("{}_spread", source.name);
    out.vertices = vertices;
    out.recalculate_bounds();

    log::debug!(
        "spread {} of {} vertices of '{}' below y = {}",
        moved,
        source.vertex_count(),
        source.name,
        top_y
    );

    Ok(out)
}
