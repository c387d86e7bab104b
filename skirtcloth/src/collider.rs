use crate::{Error, HumanBone};

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum ColliderShape {
    Sphere,
    Capsule,
}

/// A collider to attach to a bone.
///
/// Sphere colliders with `paired` set form a tapered capsule between the two
/// spheres in the cloth solver.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct ColliderSpec {
    pub bone: HumanBone,
    pub shape: ColliderShape,
    pub radius: f32,
    pub paired: Option<HumanBone>,
    pub is_trigger: bool,
}

impl ColliderSpec {
    /// Name of the child object holding the collider on `bone`.
    pub fn object_name(bone: HumanBone, shape: ColliderShape) -> String {
        let kind = match shape {
            ColliderShape::Sphere => "SphereCollider",
            ColliderShape::Capsule => "CapsuleCollider",
        };
        format!("Skirt_{bone}_{kind}")
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
pub struct ColliderOption {
    pub sphere: bool,
    pub capsule: bool,
    /// Bones to pair this sphere with, each with an enable flag.
    pub pairs: Vec<(HumanBone, bool)>,
}

/// Per-bone collider choices for the left side and centre; the right side is
/// mirrored from the left when planning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
pub struct ColliderPlan {
    pub create: bool,
    pub entries: Vec<(HumanBone, ColliderOption)>,
}

impl Default for ColliderPlan {
    fn default() -> Self {
        let option = |sphere: bool, pairs: &[(HumanBone, bool)]| ColliderOption {
            sphere,
            capsule: false,
            pairs: pairs.to_vec(),
        };
        Self {
            create: true,
            entries: vec![
                (
                    HumanBone::Spine,
                    option(
                        false,
                        &[
                            (HumanBone::Hips, false),
                            (HumanBone::LeftUpperLeg, true),
                            (HumanBone::RightUpperLeg, true),
                        ],
                    ),
                ),
                (
                    HumanBone::Hips,
                    option(
                        true,
                        &[
                            (HumanBone::LeftUpperLeg, true),
                            (HumanBone::RightUpperLeg, true),
                        ],
                    ),
                ),
                (
                    HumanBone::LeftUpperLeg,
                    option(true, &[(HumanBone::LeftLowerLeg, true)]),
                ),
                (
                    HumanBone::LeftLowerLeg,
                    option(false, &[(HumanBone::LeftFoot, true)]),
                ),
                (HumanBone::LeftHand, option(false, &[])),
            ],
        }
    }
}

impl ColliderPlan {
    /// The default plan with a lower-leg sphere, optionally paired down to the foot.
    pub fn basic(lower_leg_colliders: bool) -> Self {
        let mut out = Self::default();
        if let Some(option) = out.option_mut(HumanBone::LeftLowerLeg) {
            option.sphere = true;
            option.capsule = false;
            option.pairs = vec![(HumanBone::LeftFoot, lower_leg_colliders)];
        }
        out
    }

    pub fn option_mut(&mut self, bone: HumanBone) -> Option<&mut ColliderOption> {
        self.entries
            .iter_mut()
            .find(|(b, _)| *b == bone)
            .map(|(_, option)| option)
    }

    fn mirrored(&self) -> Vec<(HumanBone, ColliderOption)> {
        let right = self
            .entries
            .iter()
            .filter(|(bone, _)| bone.is_left())
            .map(|(bone, option)| {
                (
                    bone.to_right(),
                    ColliderOption {
                        sphere: option.sphere,
                        capsule: option.capsule,
                        pairs: option
                            .pairs
                            .iter()
                            .map(|&(b, enabled)| (b.to_right(), enabled))
                            .collect(),
                    },
                )
            });
        self.entries.iter().cloned().chain(right).collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColliderSetup {
    pub capsules: Vec<ColliderSpec>,
    pub sphere_pairs: Vec<ColliderSpec>,
}

impl ColliderSetup {
    /// Every distinct collider object the setup needs, in first-use order.
    pub fn objects(&self) -> Vec<(HumanBone, ColliderShape)> {
        let mut out: Vec<(HumanBone, ColliderShape)> = Vec::new();
        let pairs = self.sphere_pairs.iter().flat_map(|s| {
            std::iter::once(s.bone)
                .chain(s.paired)
                .map(|b| (b, ColliderShape::Sphere))
        });
        let capsules = self.capsules.iter().map(|c| (c.bone, ColliderShape::Capsule));
        for object in pairs.chain(capsules) {
            if !out.contains(&object) {
                out.push(object);
            }
        }
        out
    }
}

/// Expands `plan` into concrete colliders with `radius` as the initial radius.
pub fn plan_colliders(plan: &ColliderPlan, radius: f32) -> Result<ColliderSetup, Error> {
    if !(radius.is_finite() && radius >= 0.0) {
        return Err(Error::InvalidValue {
            message: format!("collider radius must be a non-negative number, got {radius}"),
        });
    }
    if !plan.create {
        return Ok(ColliderSetup::default());
    }

    let mirrored = plan.mirrored();

    let capsules = mirrored
        .iter()
        .filter(|(_, option)| option.capsule)
        .map(|&(bone, _)| ColliderSpec {
            bone,
            shape: ColliderShape::Capsule,
            radius,
            paired: None,
            is_trigger: true,
        })
        .collect();

    let mut sphere_pairs = Vec::new();
    for (bone, option) in mirrored.iter().filter(|(_, option)| option.sphere) {
        let sphere = |paired| ColliderSpec {
            bone: *bone,
            shape: ColliderShape::Sphere,
            radius,
            paired,
            is_trigger: true,
        };
        let enabled: Vec<HumanBone> = option
            .pairs
            .iter()
            .filter(|(_, enabled)| *enabled)
            .map(|(b, _)| *b)
            .collect();
        if enabled.is_empty() {
            sphere_pairs.push(sphere(None));
        } else {
            sphere_pairs.extend(enabled.into_iter().map(|b| sphere(Some(b))));
        }
    }

    let setup = ColliderSetup {
        capsules,
        sphere_pairs,
    };
    log::debug!(
        "planned {} sphere pairs and {} capsules",
        setup.sphere_pairs.len(),
        setup.capsules.len()
    );
    Ok(setup)
}
