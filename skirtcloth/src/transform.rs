use crate::Error;
use glam::{Quat, Vec3};
use std::collections::HashMap;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// Position, rotation and scale of a bone or mesh root.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * (point * self.scale) + self.position
    }

    /// Rotates `direction`; scale and translation do not apply to directions.
    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation * direction
    }
}

/// Read-only access to a posed avatar.
///
/// Bone positions are relative to the avatar root; `world_offset` is the root's
/// world position.
pub trait BoneLookup {
    fn world_offset(&self) -> Vec3;

    fn bone(&self, name: &str) -> Option<Transform>;

    fn require_bone(&self, name: &str) -> Result<Transform, Error> {
        self.bone(name).ok_or_else(|| Error::MissingBone {
            name: name.to_string(),
        })
    }

    fn world_position(&self, name: &str) -> Result<Vec3, Error> {
        Ok(self.require_bone(name)?.position + self.world_offset())
    }
}

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
pub struct BoneFrame {
    pub world_offset: Vec3,
    pub bones: HashMap<String, Transform>,
}

impl BoneFrame {
    pub fn new(world_offset: Vec3) -> Self {
        Self {
            world_offset,
            bones: HashMap::new(),
        }
    }

    pub fn with_bone(mut self, name: impl Into<String>, transform: Transform) -> Self {
        self.bones.insert(name.into(), transform);
        self
    }
}

impl BoneLookup for BoneFrame {
    fn world_offset(&self) -> Vec3 {
        self.world_offset
    }

    fn bone(&self, name: &str) -> Option<Transform> {
        self.bones.get(name).copied()
    }
}
