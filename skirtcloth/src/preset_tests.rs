use crate::{ClothCoefficient, ClothParameters, ClothPreset, Error, VertexMatching};
use glam::Vec3;

fn coefficient(max_distance: f32) -> ClothCoefficient {
    ClothCoefficient {
        max_distance,
        collision_sphere_distance: max_distance * 2.0,
    }
}

fn preset() -> ClothPreset {
    ClothPreset::capture(
        ClothParameters::recommended(),
        &[Vec3::ZERO, Vec3::X, Vec3::Y],
        &[],
        &[coefficient(0.0), coefficient(0.1), coefficient(0.2)],
    )
    .unwrap()
}

#[test]
fn recommended_parameters_quiet_the_cloth() {
    let p = ClothParameters::recommended();

    assert_eq!(p.stretching_stiffness, 0.8);
    assert_eq!(p.bending_stiffness, 0.8);
    assert_eq!(p.damping, 0.2);
    assert_eq!(p.world_velocity_scale, 0.0);
    assert_eq!(p.world_acceleration_scale, 0.0);
    assert_eq!(p.friction, 0.0);
    assert_eq!(p.sleep_threshold, 1.0);
    assert_eq!(p.solver_frequency, ClothParameters::default().solver_frequency);
}

#[test]
fn capture_rejects_misaligned_coefficients() {
    let err = ClothPreset::capture(
        ClothParameters::default(),
        &[Vec3::ZERO, Vec3::X],
        &[],
        &[coefficient(0.0)],
    )
    .unwrap_err();

    assert!(matches!(
        err,
        Error::AttributeLength {
            expected: 2,
            actual: 1,
            ..
        }
    ));
}

#[test]
fn index_matching_truncates_or_pads() {
    let preset = preset();

    let shorter = preset
        .coefficients_for(&[Vec3::ZERO; 2], VertexMatching::Index)
        .unwrap();
    assert_eq!(shorter, vec![coefficient(0.0), coefficient(0.1)]);

    let longer = preset
        .coefficients_for(&[Vec3::ZERO; 4], VertexMatching::Index)
        .unwrap();
    assert_eq!(longer[2], coefficient(0.2));
    assert_eq!(longer[3], ClothCoefficient::UNBOUNDED);
}

#[test]
fn position_matching_picks_the_nearest_preset_vertex() {
    let preset = preset();
    let particles = [
        Vec3::new(0.9, 0.1, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
        Vec3::new(-1.0, 0.0, 0.0),
    ];

    let matched = preset
        .coefficients_for(&particles, VertexMatching::Position)
        .unwrap();

    assert_eq!(
        matched,
        vec![coefficient(0.1), coefficient(0.2), coefficient(0.0)]
    );
}

#[test]
fn position_ties_go_to_the_lowest_index() {
    let preset = preset();

    // Equidistant from X and Y.
    let matched = preset
        .coefficients_for(&[Vec3::new(1.0, 1.0, 0.0)], VertexMatching::Position)
        .unwrap();

    assert_eq!(matched, vec![coefficient(0.1)]);
}

#[test]
fn position_matching_needs_vertices() {
    let empty = ClothPreset::default();

    let err = empty
        .coefficients_for(&[Vec3::ZERO], VertexMatching::Position)
        .unwrap_err();
    assert!(matches!(err, Error::EmptyPreset));
}

#[test]
fn presets_concatenate() {
    let mut combined = preset();
    combined.concat(&preset()).unwrap();

    assert_eq!(combined.vertices.len(), 6);
    assert!(combined.normals.is_empty());
    assert_eq!(combined.coefficients[5], coefficient(0.2));
    assert_eq!(combined.parameters, ClothParameters::recommended());
    combined.validate().unwrap();
}

#[test]
fn concat_fills_normals_missing_on_one_side() {
    let without = ClothPreset::capture(
        ClothParameters::default(),
        &[Vec3::ZERO],
        &[],
        &[coefficient(0.0)],
    )
    .unwrap();
    let with = ClothPreset::capture(
        ClothParameters::default(),
        &[Vec3::X],
        &[Vec3::Y],
        &[coefficient(0.1)],
    )
    .unwrap();

    let mut first = without.clone();
    first.concat(&with).unwrap();
    assert_eq!(first.normals, vec![Vec3::ZERO, Vec3::Y]);
    first.validate().unwrap();

    let mut second = with.clone();
    second.concat(&without).unwrap();
    assert_eq!(second.normals, vec![Vec3::Y, Vec3::ZERO]);
    second
        .coefficients_for(&[Vec3::X], VertexMatching::Position)
        .unwrap();
}

#[test]
fn concat_rejects_an_invalid_preset() {
    let mut broken = preset();
    broken.coefficients.pop();

    let mut target = preset();
    assert!(matches!(
        target.concat(&broken),
        Err(Error::AttributeLength { .. })
    ));
    assert_eq!(target.vertices.len(), 3);
}
