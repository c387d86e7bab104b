use glam::{Quat, Vec3};

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// Distance under which a point counts as touching a volume.
pub const CONTAINMENT_EPSILON: f32 = 0.001;

/// World-space selection volume used to pick skirt vertices.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum Volume {
    Sphere {
        center: Vec3,
        radius: f32,
    },
    Capsule {
        start: Vec3,
        end: Vec3,
        radius: f32,
    },
    Box {
        center: Vec3,
        half_extents: Vec3,
        rotation: Quat,
    },
}

impl Volume {
    /// Closest point on or inside the volume; `point` itself when it is inside.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        match *self {
            Volume::Sphere { center, radius } => clamp_to_ball(point, center, radius),
            Volume::Capsule { start, end, radius } => {
                let axis = end - start;
                let len_sq = axis.length_squared();
                let t = if len_sq > 0.0 {
                    ((point - start).dot(axis) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                clamp_to_ball(point, start + axis * t, radius)
            }
            Volume::Box {
                center,
                half_extents,
                rotation,
            } => {
                let local = rotation.inverse() * (point - center);
                let clamped = local.clamp(-half_extents, half_extents);
                if clamped == local {
                    point
                } else {
                    center + rotation * clamped
                }
            }
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.closest_point(point).distance(point) < CONTAINMENT_EPSILON
    }
}

fn clamp_to_ball(point: Vec3, center: Vec3, radius: f32) -> Vec3 {
    let offset = point - center;
    let radius = radius.max(0.0);
    if offset.length_squared() <= radius * radius {
        point
    } else {
        center + offset.normalize_or_zero() * radius
    }
}

pub(crate) fn inside_any(volumes: &[Volume], point: Vec3) -> bool {
    volumes.iter().any(|v| v.contains(point))
}

pub(crate) fn outside_all(volumes: &[Volume], point: Vec3) -> bool {
    volumes.iter().all(|v| !v.contains(point))
}
