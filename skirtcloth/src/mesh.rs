use crate::Error;
use glam::{Mat4, Vec2, Vec3, Vec4};

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// Number of texture coordinate channels a mesh can carry.
pub const MAX_UV_CHANNELS: usize = 8;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
pub struct BoneWeight {
    pub bones: [u32; 4],
    pub weights: [f32; 4],
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Bounds of `points`; zero-sized at the origin when `points` is empty.
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self::default();
        };
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Self { min, max }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
pub struct BlendShapeFrame {
    pub weight: f32,
    pub delta_vertices: Vec<Vec3>,
    pub delta_normals: Vec<Vec3>,
    pub delta_tangents: Vec<Vec3>,
}

impl BlendShapeFrame {
    pub fn zeroed(weight: f32, vertex_count: usize) -> Self {
        Self {
            weight,
            delta_vertices: vec![Vec3::ZERO; vertex_count],
            delta_normals: vec![Vec3::ZERO; vertex_count],
            delta_tangents: vec![Vec3::ZERO; vertex_count],
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
pub struct BlendShape {
    pub name: String,
    pub frames: Vec<BlendShapeFrame>,
}

/// A skinned mesh as plain values.
///
/// Every per-vertex channel other than `vertices` is either empty or exactly
/// `vertices.len()` long. `bind_poses` is indexed by bone, not by vertex.
/// Operations never mutate a snapshot; they return a new one.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
pub struct MeshSnapshot {
    pub name: String,
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tangents: Vec<Vec4>,
    pub colors: Vec<Vec4>,
    pub uvs: [Vec<Vec2>; MAX_UV_CHANNELS],
    pub bone_weights: Vec<BoneWeight>,
    pub bind_poses: Vec<Mat4>,
    pub sub_meshes: Vec<Vec<u32>>,
    pub blend_shapes: Vec<BlendShape>,
    pub bounds: Aabb,
}

impl MeshSnapshot {
    pub fn new(name: impl Into<String>, vertices: Vec<Vec3>, sub_meshes: Vec<Vec<u32>>) -> Self {
        let bounds = Aabb::from_points(&vertices);
        Self {
            name: name.into(),
            vertices,
            sub_meshes,
            bounds,
            ..Self::default()
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.sub_meshes.iter().map(|s| s.len() / 3).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.sub_meshes.is_empty()
    }

    pub fn recalculate_bounds(&mut self) {
        self.bounds = Aabb::from_points(&self.vertices);
    }

    pub fn blend_shape(&self, name: &str) -> Option<&BlendShape> {
        self.blend_shapes.iter().find(|s| s.name == name)
    }

    /// Appends `frame` to the shape called `name`, creating the shape on first use.
    pub fn add_blend_shape_frame(&mut self, name: &str, frame: BlendShapeFrame) {
        match self.blend_shapes.iter_mut().find(|s| s.name == name) {
            Some(shape) => shape.frames.push(frame),
            None => self.blend_shapes.push(BlendShape {
                name: name.to_string(),
                frames: vec![frame],
            }),
        }
    }

    /// Checks the parallel-array, triangle and blend shape invariants.
    pub fn validate(&self) -> Result<(), Error> {
        let n = self.vertices.len();

        check_channel("normals", self.normals.len(), n)?;
        check_channel("tangents", self.tangents.len(), n)?;
        check_channel("colors", self.colors.len(), n)?;
        check_channel("bone_weights", self.bone_weights.len(), n)?;
        for (channel, uv) in self.uvs.iter().enumerate() {
            check_channel(&uv_channel_name(channel), uv.len(), n)?;
        }

        for (sub_mesh, indices) in self.sub_meshes.iter().enumerate() {
            if indices.len() % 3 != 0 {
                return Err(Error::MalformedTriangleList {
                    sub_mesh,
                    len: indices.len(),
                });
            }
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= n) {
                return Err(Error::IndexOutOfRange {
                    sub_mesh,
                    index,
                    vertex_count: n,
                });
            }
        }

        for shape in &self.blend_shapes {
            for (frame_index, frame) in shape.frames.iter().enumerate() {
                for (attribute, len) in [
                    ("delta_vertices", frame.delta_vertices.len()),
                    ("delta_normals", frame.delta_normals.len()),
                    ("delta_tangents", frame.delta_tangents.len()),
                ] {
                    if len != n {
                        return Err(Error::BlendShapeFrameLength {
                            shape: shape.name.clone(),
                            frame: frame_index,
                            attribute: attribute.to_string(),
                            expected: n,
                            actual: len,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

pub(crate) fn uv_channel_name(channel: usize) -> String {
    if channel == 0 {
        "uv".to_string()
    } else {
        format!("uv{}", channel + 1)
    }
}

fn check_channel(attribute: &str, len: usize, vertex_count: usize) -> Result<(), Error> {
    if len != 0 && len != vertex_count {
        return Err(Error::attribute_length(attribute, vertex_count, len));
    }
    Ok(())
}
