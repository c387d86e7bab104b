use std::fmt;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// Humanoid bones a skirt setup refers to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum HumanBone {
    Spine,
    Hips,
    LeftUpperLeg,
    LeftLowerLeg,
    LeftFoot,
    RightUpperLeg,
    RightLowerLeg,
    RightFoot,
    LeftHand,
    RightHand,
}

impl HumanBone {
    pub const SKIRT_BONES: [HumanBone; 10] = [
        HumanBone::Spine,
        HumanBone::Hips,
        HumanBone::LeftUpperLeg,
        HumanBone::LeftLowerLeg,
        HumanBone::LeftFoot,
        HumanBone::RightUpperLeg,
        HumanBone::RightLowerLeg,
        HumanBone::RightFoot,
        HumanBone::LeftHand,
        HumanBone::RightHand,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HumanBone::Spine => "Spine",
            HumanBone::Hips => "Hips",
            HumanBone::LeftUpperLeg => "LeftUpperLeg",
            HumanBone::LeftLowerLeg => "LeftLowerLeg",
            HumanBone::LeftFoot => "LeftFoot",
            HumanBone::RightUpperLeg => "RightUpperLeg",
            HumanBone::RightLowerLeg => "RightLowerLeg",
            HumanBone::RightFoot => "RightFoot",
            HumanBone::LeftHand => "LeftHand",
            HumanBone::RightHand => "RightHand",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::SKIRT_BONES.into_iter().find(|b| b.name() == name)
    }

    pub fn is_left(self) -> bool {
        matches!(
            self,
            HumanBone::LeftUpperLeg
                | HumanBone::LeftLowerLeg
                | HumanBone::LeftFoot
                | HumanBone::LeftHand
        )
    }

    pub fn is_right(self) -> bool {
        matches!(
            self,
            HumanBone::RightUpperLeg
                | HumanBone::RightLowerLeg
                | HumanBone::RightFoot
                | HumanBone::RightHand
        )
    }

    /// Right-side counterpart of a left bone; other bones map to themselves.
    pub fn to_right(self) -> Self {
        match self {
            HumanBone::LeftUpperLeg => HumanBone::RightUpperLeg,
            HumanBone::LeftLowerLeg => HumanBone::RightLowerLeg,
            HumanBone::LeftFoot => HumanBone::RightFoot,
            HumanBone::LeftHand => HumanBone::RightHand,
            other => other,
        }
    }
}

/// Side markers tried in order when mirroring a bone or collider name.
const MIRROR_PATTERNS: [(&str, &str); 10] = [
    ("Left", "Right"),
    ("_LEFT", "_RIGHT"),
    (".LEFT", ".RIGHT"),
    (" LEFT", " RIGHT"),
    ("_L", "_R"),
    ("_l", "_r"),
    (".L", ".R"),
    (".l", ".r"),
    (" L", " R"),
    (" l", " r"),
];

/// Name of the opposite-side counterpart of `name`, for rigs that are not
/// described by [`HumanBone`].
///
/// The first marker found on either side is swapped everywhere in the name.
/// Returns `None` when the name carries no side marker.
pub fn mirror_name(name: &str) -> Option<String> {
    MIRROR_PATTERNS.iter().find_map(|&(left, right)| {
        if name.contains(left) {
            Some(name.replace(left, right))
        } else if name.contains(right) {
            Some(name.replace(right, left))
        } else {
            None
        }
    })
}

impl fmt::Display for HumanBone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
