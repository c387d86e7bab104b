use crate::spread::{SpreadFrame, horizontal};
use crate::{Aabb, BoneLookup, Error, MeshSnapshot, ParticleMap};
use glam::Vec3;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// Distance value meaning "no constraint".
pub const UNBOUNDED: f32 = f32::MAX;

/// Weights at or below this sum disable a blend.
pub const MIN_TOTAL_WEIGHT: f32 = 0.001;

/// Cone angle used when only the basic top-edge setup is requested.
pub const BASIC_SPREAD_ANGLE: f32 = 80.0;

/// Per-particle constraint handed to the cloth simulator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct ClothCoefficient {
    pub max_distance: f32,
    pub collision_sphere_distance: f32,
}

impl ClothCoefficient {
    pub const UNBOUNDED: Self = Self {
        max_distance: UNBOUNDED,
        collision_sphere_distance: UNBOUNDED,
    };
}

impl Default for ClothCoefficient {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// World-space reference geometry of a baked skirt.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintContext {
    /// Distinct baked positions shifted by the avatar position.
    pub world_vertices: Vec<Vec3>,
    pub avatar_position: Vec3,
    /// World position of the vertical axis the skirt hangs around.
    pub center: Vec3,
    pub world_top: Vec3,
    pub world_bottom: Vec3,
}

impl PaintContext {
    pub fn new(baked: &MeshSnapshot, avatar_position: Vec3, center: Vec3) -> Self {
        let world_vertices: Vec<Vec3> = ParticleMap::from_positions(&baked.vertices)
            .positions
            .into_iter()
            .map(|v| v + avatar_position)
            .collect();
        let bounds = Aabb::from_points(&world_vertices);
        let mid = bounds.center();
        Self {
            world_vertices,
            avatar_position,
            center,
            world_top: Vec3::new(mid.x, bounds.max.y, mid.z),
            world_bottom: Vec3::new(mid.x, bounds.min.y, mid.z),
        }
    }

    /// Context centred on `center_bone` of a posed avatar.
    pub fn from_bones<B: BoneLookup + ?Sized>(
        baked: &MeshSnapshot,
        bones: &B,
        center_bone: &str,
    ) -> Result<Self, Error> {
        let center = bones.world_position(center_bone)?;
        Ok(Self::new(baked, bones.world_offset(), center))
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
pub struct InsideRadius {
    pub radius: f32,
}

impl Default for InsideRadius {
    fn default() -> Self {
        Self { radius: 0.05 }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
pub struct SpreadingCone {
    pub angle_degrees: f32,
}

impl Default for SpreadingCone {
    fn default() -> Self {
        Self {
            angle_degrees: 45.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum RuleKind {
    /// Horizontal distance from the centre axis beyond an inner radius.
    InsideRadius(InsideRadius),
    /// Distance to the spread cone target.
    SpreadingCone(SpreadingCone),
}

impl RuleKind {
    pub fn distance(&self, ctx: &PaintContext, local_position: Vec3, fixed_height: f32) -> f32 {
        match self {
            RuleKind::InsideRadius(rule) => {
                let offset = horizontal(local_position + ctx.avatar_position - ctx.center);
                (offset.length() - rule.radius).max(0.0)
            }
            RuleKind::SpreadingCone(rule) => SpreadFrame {
                world_vertices: &ctx.world_vertices,
                avatar_position: ctx.avatar_position,
                axis_center: ctx.center,
                top_y: ctx.world_top.y - fixed_height,
                angle_degrees: rule.angle_degrees,
            }
            .spread(local_position)
            .max_distance(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct PaintRule {
    pub kind: RuleKind,
    /// Share of this rule in the max distance blend.
    #[cfg_attr(feature = "json", serde(default))]
    pub weight: f32,
    /// Share of this rule in the surface penetration blend.
    #[cfg_attr(feature = "json", serde(default))]
    pub surface_penetration_weight: f32,
}

impl PaintRule {
    pub fn new(kind: RuleKind, weight: f32) -> Self {
        Self {
            kind,
            weight,
            surface_penetration_weight: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
pub struct PainterConfig {
    /// Band below the top edge whose vertices are pinned.
    pub height: f32,
    pub bias: f32,
    pub surface_penetration_bias: f32,
    /// Blend `rules`; otherwise a single wide spreading cone is used.
    pub advanced: bool,
    pub paint_surface_penetration: bool,
    pub rules: Vec<PaintRule>,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            height: 0.1,
            bias: 0.0,
            surface_penetration_bias: 0.0,
            advanced: false,
            paint_surface_penetration: false,
            rules: vec![
                PaintRule::new(RuleKind::SpreadingCone(SpreadingCone::default()), 0.0),
                PaintRule::new(RuleKind::InsideRadius(InsideRadius::default()), 0.0),
            ],
        }
    }
}

/// Coefficients painted onto a baked mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintedCloth {
    pub particles: ParticleMap,
    /// One coefficient per particle.
    pub coefficients: Vec<ClothCoefficient>,
}

impl PaintedCloth {
    /// Coefficients in source vertex order; coincident vertices share a value.
    pub fn per_vertex(&self) -> Vec<ClothCoefficient> {
        self.particles
            .vertex_to_particle
            .iter()
            .map(|&p| self.coefficients[p])
            .collect()
    }
}

impl PainterConfig {
    pub fn max_distance(&self, ctx: &PaintContext, local_position: Vec3) -> f32 {
        let threshold_y = ctx.world_top.y - self.height;
        if local_position.y + ctx.avatar_position.y > threshold_y {
            return 0.0;
        }

        if !self.advanced {
            let basic = RuleKind::SpreadingCone(SpreadingCone {
                angle_degrees: BASIC_SPREAD_ANGLE,
            });
            return basic.distance(ctx, local_position, self.height);
        }

        self.blend(ctx, local_position, |r| r.weight, self.bias)
    }

    pub fn surface_penetration(&self, ctx: &PaintContext, local_position: Vec3) -> f32 {
        if !self.paint_surface_penetration || !self.advanced {
            return UNBOUNDED;
        }
        self.blend(
            ctx,
            local_position,
            |r| r.surface_penetration_weight,
            self.surface_penetration_bias,
        )
    }

    fn blend(
        &self,
        ctx: &PaintContext,
        local_position: Vec3,
        weight: impl Fn(&PaintRule) -> f32,
        bias: f32,
    ) -> f32 {
        let total: f32 = self.rules.iter().map(&weight).sum();
        if total <= MIN_TOTAL_WEIGHT {
            return UNBOUNDED;
        }
        self.rules
            .iter()
            .map(|r| r.kind.distance(ctx, local_position, self.height) * weight(r) / total)
            .sum::<f32>()
            + bias
    }

    pub fn coefficient(&self, ctx: &PaintContext, local_position: Vec3) -> ClothCoefficient {
        ClothCoefficient {
            max_distance: self.max_distance(ctx, local_position),
            collision_sphere_distance: self.surface_penetration(ctx, local_position),
        }
    }

    /// Paints one coefficient per distinct position of `baked`.
    pub fn paint(&self, ctx: &PaintContext, baked: &MeshSnapshot) -> PaintedCloth {
        let particles = ParticleMap::from_positions(&baked.vertices);
        let coefficients: Vec<ClothCoefficient> = particles
            .positions
            .iter()
            .map(|&v| self.coefficient(ctx, v))
            .collect();

        log::debug!(
            "painted {} particles ({} pinned) for '{}'",
            coefficients.len(),
            coefficients.iter().filter(|c| c.max_distance == 0.0).count(),
            baked.name
        );

        PaintedCloth {
            particles,
            coefficients,
        }
    }
}
