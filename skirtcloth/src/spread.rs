//! Cone-spread projection of free cloth vertices.
//!
//! A free vertex hangs from the rim of the pinned ring directly above it. The
//! spread cone opens downward from that rim point with a fixed half-angle, and the
//! vertex may swing out to the point on the cone at its current distance from
//! the rim.

use glam::Vec3;

/// Fixed inputs shared by every vertex of one spread evaluation.
#[derive(Copy, Clone, Debug)]
pub struct SpreadFrame<'a> {
    /// World-space positions of the mesh; those above `top_y` form the pinned ring.
    pub world_vertices: &'a [Vec3],
    pub avatar_position: Vec3,
    /// Only x and z are used; the axis is vertical.
    pub axis_center: Vec3,
    pub top_y: f32,
    /// Half-angle of the cone measured from straight down, in degrees.
    pub angle_degrees: f32,
}

/// Result of spreading one vertex. All points are in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spread {
    pub position: Vec3,
    pub from: Vec3,
    pub to: Vec3,
}

impl Spread {
    pub fn max_distance(&self) -> f32 {
        (self.to - self.position).length()
    }
}

impl SpreadFrame<'_> {
    pub fn world_center(&self) -> Vec3 {
        Vec3::new(self.axis_center.x, self.avatar_position.y, self.axis_center.z)
    }

    /// Pinned vertex closest to `position`, by full 3D distance from the centre.
    pub fn nearest_fixed(&self, position: Vec3) -> Option<Vec3> {
        let center = self.world_center();
        let relative = position - center;
        let mut best: Option<(f32, Vec3)> = None;
        for &v in self.world_vertices.iter().filter(|v| v.y > self.top_y) {
            let d = relative.distance(v - center);
            if best.is_none_or(|(best_d, _)| d < best_d) {
                best = Some((d, v));
            }
        }
        best.map(|(_, v)| v)
    }

    /// Spreads a vertex given relative to the avatar root.
    ///
    /// Without any pinned vertex the cone starts on the axis itself.
    pub fn spread(&self, local_position: Vec3) -> Spread {
        let position = local_position + self.avatar_position;
        let center = self.world_center();

        let radius = self
            .nearest_fixed(position)
            .map(|v| horizontal(v - center).length())
            .unwrap_or(0.0);
        let dir = horizontal(position - center).normalize_or_zero();

        let from = Vec3::new(center.x, self.top_y, center.z) + dir * radius;
        let length = position.distance(from);

        let (sin, cos) = self.angle_degrees.to_radians().sin_cos();
        let to = from + dir * (sin * length) - Vec3::Y * (cos * length);

        Spread { position, from, to }
    }
}

pub(crate) fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}
