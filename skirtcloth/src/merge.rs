use crate::{BlendShape, BlendShapeFrame, BoneWeight, Error, MeshSnapshot};
use glam::{Vec2, Vec3, Vec4};

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// How blend shapes are reconciled when two meshes are merged.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum BlendShapeMerge {
    /// Keep only the first mesh's shapes, padded with zero deltas over the
    /// second mesh's vertices. Shapes that exist only on the second mesh are
    /// dropped.
    #[default]
    FirstOnly,
    /// Keep shapes from both meshes. A shape present on both sides with the same
    /// frame count is joined frame by frame; every other shape is padded with
    /// zero deltas over the vertices of the side that lacks it.
    Union,
}

/// Concatenates `first` and `second` into one mesh.
///
/// Channels present on only one side are default-filled on the other side.
/// Bind poses come from `first` only; both meshes are assumed to share a rig.
/// Sub-meshes of `second` are appended with their indices offset by the vertex
/// count of `first`.
pub fn merge_meshes(
    first: &MeshSnapshot,
    second: &MeshSnapshot,
    blend_shapes: BlendShapeMerge,
) -> Result<MeshSnapshot, Error> {
    first.validate()?;
    second.validate()?;

    let n1 = first.vertex_count();
    let n2 = second.vertex_count();
    let offset = u32::try_from(n1).map_err(|_| Error::InvalidValue {
        message: format!("mesh '{}' has too many vertices to merge", first.name),
    })?;

    let mut out = MeshSnapshot {
        name: format!("{}_and_{}", first.name, second.name),
        vertices: concat_channel(&first.vertices, n1, &second.vertices, n2, Vec3::ZERO),
        normals: concat_channel(&first.normals, n1, &second.normals, n2, Vec3::ZERO),
        tangents: concat_channel(&first.tangents, n1, &second.tangents, n2, Vec4::ZERO),
        colors: concat_channel(&first.colors, n1, &second.colors, n2, Vec4::ONE),
        bone_weights: concat_channel(
            &first.bone_weights,
            n1,
            &second.bone_weights,
            n2,
            BoneWeight::default(),
        ),
        bind_poses: first.bind_poses.clone(),
        ..MeshSnapshot::default()
    };
    for ((dst, a), b) in out.uvs.iter_mut().zip(&first.uvs).zip(&second.uvs) {
        *dst = concat_channel(a, n1, b, n2, Vec2::ZERO);
    }

    out.sub_meshes = first.sub_meshes.clone();
    out.sub_meshes.extend(
        second
            .sub_meshes
            .iter()
            .map(|indices| indices.iter().map(|&i| i + offset).collect()),
    );

    out.blend_shapes = match blend_shapes {
        BlendShapeMerge::FirstOnly => {
            let dropped: Vec<&str> = second
                .blend_shapes
                .iter()
                .filter(|s| first.blend_shape(&s.name).is_none())
                .map(|s| s.name.as_str())
                .collect();
            if !dropped.is_empty() {
                log::warn!(
                    "merging '{}' into '{}' drops blend shapes {:?}",
                    second.name,
                    first.name,
                    dropped
                );
            }
            first
                .blend_shapes
                .iter()
                .map(|shape| pad_shape(shape, 0, n2))
                .collect()
        }
        BlendShapeMerge::Union => union_shapes(first, second),
    };

    out.recalculate_bounds();

    log::debug!(
        "merged '{}' ({} vertices) and '{}' ({} vertices) into {} sub-meshes",
        first.name,
        n1,
        second.name,
        n2,
        out.sub_meshes.len()
    );

    Ok(out)
}

fn concat_channel<T: Clone>(a: &[T], n1: usize, b: &[T], n2: usize, fill: T) -> Vec<T> {
    if a.is_empty() && b.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(n1 + n2);
    if a.is_empty() {
        out.resize(n1, fill.clone());
    } else {
        out.extend_from_slice(a);
    }
    if b.is_empty() {
        out.resize(n1 + n2, fill);
    } else {
        out.extend_from_slice(b);
    }
    out
}

fn pad_frame(frame: &BlendShapeFrame, before: usize, after: usize) -> BlendShapeFrame {
    let pad = |deltas: &[Vec3]| -> Vec<Vec3> {
        let mut out = Vec::with_capacity(before + deltas.len() + after);
        out.resize(before, Vec3::ZERO);
        out.extend_from_slice(deltas);
        out.resize(before + deltas.len() + after, Vec3::ZERO);
        out
    };
    BlendShapeFrame {
        weight: frame.weight,
        delta_vertices: pad(&frame.delta_vertices),
        delta_normals: pad(&frame.delta_normals),
        delta_tangents: pad(&frame.delta_tangents),
    }
}

fn pad_shape(shape: &BlendShape, before: usize, after: usize) -> BlendShape {
    BlendShape {
        name: shape.name.clone(),
        frames: shape
            .frames
            .iter()
            .map(|f| pad_frame(f, before, after))
            .collect(),
    }
}

fn join_frames(a: &BlendShapeFrame, b: &BlendShapeFrame) -> BlendShapeFrame {
    let join = |x: &[Vec3], y: &[Vec3]| -> Vec<Vec3> { x.iter().chain(y).copied().collect() };
    BlendShapeFrame {
        weight: a.weight,
        delta_vertices: join(&a.delta_vertices, &b.delta_vertices),
        delta_normals: join(&a.delta_normals, &b.delta_normals),
        delta_tangents: join(&a.delta_tangents, &b.delta_tangents),
    }
}

fn union_shapes(first: &MeshSnapshot, second: &MeshSnapshot) -> Vec<BlendShape> {
    let n1 = first.vertex_count();
    let n2 = second.vertex_count();
    let mut out = Vec::with_capacity(first.blend_shapes.len() + second.blend_shapes.len());

    for shape in &first.blend_shapes {
        match second.blend_shape(&shape.name) {
            Some(other) if other.frames.len() == shape.frames.len() => out.push(BlendShape {
                name: shape.name.clone(),
                frames: shape
                    .frames
                    .iter()
                    .zip(&other.frames)
                    .map(|(a, b)| join_frames(a, b))
                    .collect(),
            }),
            Some(other) => {
                log::warn!(
                    "blend shape '{}' has {} frames on '{}' but {} on '{}'; keeping the first mesh's frames",
                    shape.name,
                    shape.frames.len(),
                    first.name,
                    other.frames.len(),
                    second.name
                );
                out.push(pad_shape(shape, 0, n2));
            }
            None => out.push(pad_shape(shape, 0, n2)),
        }
    }

    for shape in &second.blend_shapes {
        if first.blend_shape(&shape.name).is_none() {
            out.push(pad_shape(shape, n1, 0));
        }
    }

    out
}
