use crate::remap::compact_mesh;
use crate::volume::{inside_any, outside_all};
use crate::{Error, IndexRemap, MeshSnapshot, Transform, Volume};
use glam::Vec3;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// Builds a new mesh from the triangles of `mesh` that pass the predicates.
///
/// `vertex_predicate` sees world-space positions and normals (meshes without
/// normals pass `Vec3::ZERO`). With `include_boundary` a triangle survives when any
/// of its vertices matches, otherwise all three must match. Every vertex of a
/// surviving triangle is kept. Sub-meshes that end up empty are dropped.
pub fn extract_mesh<P, S>(
    mesh: &MeshSnapshot,
    local_to_world: &Transform,
    mut vertex_predicate: P,
    mut sub_mesh_predicate: S,
    include_boundary: bool,
) -> Result<MeshSnapshot, Error>
where
    P: FnMut(Vec3, Vec3) -> bool,
    S: FnMut(usize) -> bool,
{
    mesh.validate()?;

    let mut matches: Vec<Option<bool>> = vec![None; mesh.vertex_count()];
    let mut is_match = |index: u32| -> bool {
        let i = index as usize;
        *matches[i].get_or_insert_with(|| {
            let vertex = local_to_world.transform_point(mesh.vertices[i]);
            let normal = mesh
                .normals
                .get(i)
                .map(|n| local_to_world.transform_direction(*n))
                .unwrap_or(Vec3::ZERO);
            vertex_predicate(vertex, normal)
        })
    };

    let mut sub_meshes: Vec<Vec<u32>> = Vec::new();
    for (sub_mesh, indices) in mesh.sub_meshes.iter().enumerate() {
        if !sub_mesh_predicate(sub_mesh) {
            continue;
        }
        let mut kept: Vec<u32> = Vec::new();
        for tri in indices.chunks_exact(3) {
            let keep = if include_boundary {
                tri.iter().any(|&i| is_match(i))
            } else {
                tri.iter().all(|&i| is_match(i))
            };
            if keep {
                kept.extend_from_slice(tri);
            }
        }
        if !kept.is_empty() {
            sub_meshes.push(kept);
        }
    }

    let remap = IndexRemap::from_kept(mesh.vertex_count(), sub_meshes.iter().flatten().copied())?;
    let out = compact_mesh(mesh, &remap, &sub_meshes)?;

    log::debug!(
        "extracted {} of {} triangles, {} of {} vertices from '{}'",
        out.triangle_count(),
        mesh.triangle_count(),
        out.vertex_count(),
        mesh.vertex_count(),
        mesh.name
    );

    Ok(out)
}

/// Which part of a garment mesh becomes the skirt.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
pub struct SkirtSelection {
    /// Per sub-mesh switch; sub-meshes past the end are included.
    pub sub_mesh_filter: Vec<bool>,
    pub include: Vec<Volume>,
    pub exclude: Vec<Volume>,
    pub include_boundary: bool,
}

impl Default for SkirtSelection {
    fn default() -> Self {
        Self {
            sub_mesh_filter: Vec::new(),
            include: Vec::new(),
            exclude: Vec::new(),
            include_boundary: true,
        }
    }
}

impl SkirtSelection {
    fn sub_mesh_enabled(&self, sub_mesh: usize) -> bool {
        self.sub_mesh_filter.get(sub_mesh).copied().unwrap_or(true)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkirtSplit {
    pub skirt: MeshSnapshot,
    /// Everything outside the selection; `None` when no triangle is left over.
    pub other: Option<MeshSnapshot>,
}

/// Cuts `mesh` into the selected skirt and the remaining geometry.
///
/// The remainder uses the inverted boundary policy so the two parts meet along
/// the cut without a gap.
pub fn split_skirt(
    mesh: &MeshSnapshot,
    local_to_world: &Transform,
    selection: &SkirtSelection,
) -> Result<SkirtSplit, Error> {
    let mut skirt = extract_mesh(
        mesh,
        local_to_world,
        |vertex, _| {
            selection.include.is_empty()
                || (inside_any(&selection.include, vertex)
                    && outside_all(&selection.exclude, vertex))
        },
        |sub_mesh| selection.sub_mesh_enabled(sub_mesh),
        selection.include_boundary,
    )?;
    skirt.name = format!("{}_skirt", mesh.name);

    let mut other = extract_mesh(
        mesh,
        local_to_world,
        |vertex, _| {
            !selection.include.is_empty()
                && (outside_all(&selection.include, vertex)
                    || inside_any(&selection.exclude, vertex))
        },
        |_| true,
        !selection.include_boundary,
    )?;
    other.name = format!("{}_other", mesh.name);

    let other = (other.triangle_count() > 0).then_some(other);
    Ok(SkirtSplit { skirt, other })
}

/// Drops faces whose normal points back towards the world origin, the inner
/// layer of double-sided skirts.
pub fn remove_inner_faces(
    mesh: &MeshSnapshot,
    local_to_world: &Transform,
    include_boundary: bool,
) -> Result<MeshSnapshot, Error> {
    let mut out = extract_mesh(
        mesh,
        local_to_world,
        |vertex, normal| vertex.normalize_or_zero().dot(normal.normalize_or_zero()) > 0.0,
        |_| true,
        include_boundary,
    )?;
    out.name = format!("{}_single", mesh.name);
    Ok(out)
}
