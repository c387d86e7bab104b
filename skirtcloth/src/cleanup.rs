use crate::remap::compact_mesh;
use crate::{Error, IndexRemap, MeshSnapshot};
use std::fmt;

/// Drops vertices that no triangle references.
///
/// Unlike extraction this keeps every sub-mesh, empty ones included, so material
/// slots stay aligned.
pub fn remove_unreferenced_vertices(mesh: &MeshSnapshot) -> Result<MeshSnapshot, Error> {
    mesh.validate()?;

    let remap = IndexRemap::from_kept(
        mesh.vertex_count(),
        mesh.sub_meshes.iter().flatten().copied(),
    )?;
    let mut out = compact_mesh(mesh, &remap, &mesh.sub_meshes)?;

    for (sub_mesh, indices) in out.sub_meshes.iter().enumerate() {
        if let Some(triangle) = indices
            .chunks_exact(3)
            .position(|t| t[0] == t[1] || t[1] == t[2] || t[2] == t[0])
        {
            return Err(Error::DegenerateTriangle { sub_mesh, triangle });
        }
    }

    out.name = format!("{}_clean", mesh.name);
    log::debug!(
        "removed {} unreferenced vertices from '{}'",
        mesh.vertex_count() - out.vertex_count(),
        mesh.name
    );
    Ok(out)
}

/// Performance rank of a cloth by its vertex count.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum ClothRank {
    Excellent,
    Good,
    Poor,
    VeryPoor,
}

impl ClothRank {
    pub fn from_vertex_count(vertex_count: usize) -> Self {
        match vertex_count {
            200.. => ClothRank::VeryPoor,
            100.. => ClothRank::Poor,
            50.. => ClothRank::Good,
            _ => ClothRank::Excellent,
        }
    }
}

impl fmt::Display for ClothRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClothRank::Excellent => "Excellent",
            ClothRank::Good => "Good",
            ClothRank::Poor => "Poor",
            ClothRank::VeryPoor => "Very Poor",
        })
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MeshMetrics {
    pub vertex_count: usize,
    pub unreferenced_vertex_count: usize,
    pub polygon_count: usize,
    pub sub_mesh_count: usize,
    pub rank: ClothRank,
}

impl MeshMetrics {
    pub fn of(mesh: &MeshSnapshot) -> Self {
        let mut referenced = vec![false; mesh.vertex_count()];
        for &i in mesh.sub_meshes.iter().flatten() {
            if let Some(slot) = referenced.get_mut(i as usize) {
                *slot = true;
            }
        }
        let referenced = referenced.iter().filter(|&&r| r).count();
        Self {
            vertex_count: mesh.vertex_count(),
            unreferenced_vertex_count: mesh.vertex_count() - referenced,
            polygon_count: mesh.triangle_count(),
            sub_mesh_count: mesh.sub_meshes.len(),
            rank: ClothRank::from_vertex_count(mesh.vertex_count()),
        }
    }
}
