//! Mesh geometry for turning a skinned skirt into a simulated cloth.
//!
//! The crate works on plain mesh snapshots: it extracts and merges meshes while
//! keeping every vertex channel and blend shape aligned, and paints the
//! per-particle constraints a cloth solver needs. Scene access, physics and
//! asset I/O belong to the host.

#![forbid(unsafe_code)]

mod cleanup;
mod collider;
mod deform;
mod error;
mod extract;
mod humanoid;
mod merge;
mod mesh;
mod painter;
mod particles;
mod preset;
mod remap;
mod settle;
mod spread;
mod transform;
mod vertex_color;
mod volume;

#[cfg(feature = "json")]
pub mod json;

pub use cleanup::*;
pub use collider::*;
pub use deform::*;
pub use error::*;
pub use extract::*;
pub use humanoid::*;
pub use merge::*;
pub use mesh::{Aabb, BlendShape, BlendShapeFrame, BoneWeight, MAX_UV_CHANNELS, MeshSnapshot};
pub use painter::*;
pub use particles::*;
pub use preset::*;
pub use remap::IndexRemap;
pub use settle::*;
pub use spread::{Spread, SpreadFrame};
pub use transform::*;
pub use vertex_color::*;
pub use volume::{CONTAINMENT_EPSILON, Volume};



#[cfg(test)]
mod merge_tests;


#[cfg(test)]
mod painter_tests;



#[cfg(test)]
mod preset_tests;


#[cfg(test)]
mod volume_tests;
