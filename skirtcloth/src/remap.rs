use crate::mesh::uv_channel_name;
use crate::{Aabb, BlendShapeFrame, Error, MAX_UV_CHANNELS, MeshSnapshot};
use glam::Vec2;

/// Compaction of a vertex index space.
///
/// Kept indices map densely onto `0..kept_count()` in ascending order of the old
/// index; dropped indices map to `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexRemap {
    table: Vec<Option<u32>>,
    kept: usize,
}

impl IndexRemap {
    /// Builds the remap for `vertex_count` vertices. `kept` may contain duplicates
    /// and may be in any order.
    pub fn from_kept<I>(vertex_count: usize, kept: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut mask = vec![false; vertex_count];
        for index in kept {
            let slot = mask
                .get_mut(index as usize)
                .ok_or_else(|| Error::InvalidValue {
                    message: format!(
                        "kept vertex {index} is outside a mesh of {vertex_count} vertices"
                    ),
                })?;
            *slot = true;
        }
        Ok(Self::from_mask(&mask))
    }

    pub fn from_mask(mask: &[bool]) -> Self {
        let mut next = 0u32;
        let table = mask
            .iter()
            .map(|&keep| {
                keep.then(|| {
                    let new_index = next;
                    next += 1;
                    new_index
                })
            })
            .collect();
        Self {
            table,
            kept: next as usize,
        }
    }

    /// Size of the old index space.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn kept_count(&self) -> usize {
        self.kept
    }

    pub fn get(&self, old: u32) -> Option<u32> {
        self.table.get(old as usize).copied().flatten()
    }

    pub fn is_kept(&self, old: u32) -> bool {
        self.get(old).is_some()
    }

    /// The table in the `-1 = not present` form used by host tooling.
    pub fn to_signed_table(&self) -> Vec<i64> {
        self.table
            .iter()
            .map(|entry| entry.map_or(-1, i64::from))
            .collect()
    }

    /// Keeps the entries of a per-vertex channel whose index survives, in order.
    /// Empty channels stay empty.
    pub fn filter<T: Clone>(&self, attribute: &str, values: &[T]) -> Result<Vec<T>, Error> {
        if values.is_empty() {
            return Ok(Vec::new());
        }
        if values.len() != self.table.len() {
            return Err(Error::attribute_length(
                attribute,
                self.table.len(),
                values.len(),
            ));
        }
        Ok(values
            .iter()
            .zip(&self.table)
            .filter(|(_, entry)| entry.is_some())
            .map(|(value, _)| value.clone())
            .collect())
    }

    pub fn remap_indices(&self, indices: &[u32]) -> Result<Vec<u32>, Error> {
        indices
            .iter()
            .map(|&index| self.get(index).ok_or(Error::DroppedIndex { index }))
            .collect()
    }
}

/// Rebuilds `source` with only the vertices kept by `remap`.
///
/// `sub_meshes` still holds old indices; they are rewritten through `remap`.
/// Bind poses are copied as-is and bounds are recomputed.
pub(crate) fn compact_mesh(
    source: &MeshSnapshot,
    remap: &IndexRemap,
    sub_meshes: &[Vec<u32>],
) -> Result<MeshSnapshot, Error> {
    let mut uvs: [Vec<Vec2>; MAX_UV_CHANNELS] = Default::default();
    for (channel, (dst, src)) in uvs.iter_mut().zip(&source.uvs).enumerate() {
        *dst = remap.filter(&uv_channel_name(channel), src)?;
    }

    let mut out = MeshSnapshot {
        name: source.name.clone(),
        vertices: remap.filter("vertices", &source.vertices)?,
        normals: remap.filter("normals", &source.normals)?,
        tangents: remap.filter("tangents", &source.tangents)?,
        colors: remap.filter("colors", &source.colors)?,
        uvs,
        bone_weights: remap.filter("bone_weights", &source.bone_weights)?,
        bind_poses: source.bind_poses.clone(),
        sub_meshes: sub_meshes
            .iter()
            .map(|indices| remap.remap_indices(indices))
            .collect::<Result<_, _>>()?,
        blend_shapes: Vec::new(),
        bounds: Aabb::default(),
    };

    // A mesh without vertices carries no blend shapes.
    let shapes = if remap.kept_count() == 0 {
        &[][..]
    } else {
        &source.blend_shapes[..]
    };
    for shape in shapes {
        for frame in &shape.frames {
            let frame = BlendShapeFrame {
                weight: frame.weight,
                delta_vertices: remap.filter("delta_vertices", &frame.delta_vertices)?,
                delta_normals: remap.filter("delta_normals", &frame.delta_normals)?,
                delta_tangents: remap.filter("delta_tangents", &frame.delta_tangents)?,
            };
            out.add_blend_shape_frame(&shape.name, frame);
        }
    }

    out.recalculate_bounds();
    Ok(out)
}
