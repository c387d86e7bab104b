use crate::{ClothCoefficient, Error, MeshSnapshot, ParticleMap};

/// Reads coefficients painted into vertex colors.
///
/// Red scaled by `max_distance_scale` becomes the max distance and green scaled
/// by `surface_penetration_scale` the collision sphere distance. Coincident
/// vertices take the color of the first one.
pub fn coefficients_from_vertex_colors(
    mesh: &MeshSnapshot,
    max_distance_scale: f32,
    surface_penetration_scale: f32,
) -> Result<Vec<ClothCoefficient>, Error> {
    if mesh.colors.is_empty() && !mesh.vertices.is_empty() {
        return Err(Error::MissingChannel {
            channel: "colors".to_string(),
        });
    }
    mesh.validate()?;

    let particles = ParticleMap::from_positions(&mesh.vertices);
    Ok(particles
        .particle_to_vertex
        .iter()
        .map(|&v| {
            let color = mesh.colors[v];
            ClothCoefficient {
                max_distance: color.x * max_distance_scale,
                collision_sphere_distance: color.y * surface_penetration_scale,
            }
        })
        .collect())
}
