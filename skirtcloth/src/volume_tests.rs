use crate::Volume;
use glam::{Quat, Vec3};

#[test]
fn sphere_contains_interior_and_surface_points() {
    let sphere = Volume::Sphere {
        center: Vec3::new(0.0, 1.0, 0.0),
        radius: 0.5,
    };

    assert!(sphere.contains(Vec3::new(0.0, 1.2, 0.0)));
    assert!(sphere.contains(Vec3::new(0.5, 1.0, 0.0)));
    assert!(!sphere.contains(Vec3::new(0.6, 1.0, 0.0)));
    assert_eq!(
        sphere.closest_point(Vec3::new(2.0, 1.0, 0.0)),
        Vec3::new(0.5, 1.0, 0.0)
    );
}

#[test]
fn capsule_clamps_to_its_segment() {
    let capsule = Volume::Capsule {
        start: Vec3::ZERO,
        end: Vec3::new(0.0, 2.0, 0.0),
        radius: 0.25,
    };

    assert!(capsule.contains(Vec3::new(0.2, 1.0, 0.0)));
    assert!(capsule.contains(Vec3::new(0.0, 2.2, 0.0)));
    assert!(!capsule.contains(Vec3::new(0.0, 2.3, 0.0)));
    assert!(!capsule.contains(Vec3::new(0.3, 1.0, 0.0)));
}

#[test]
fn rotated_box_uses_its_local_frame() {
    let cube = Volume::Box {
        center: Vec3::ZERO,
        half_extents: Vec3::new(1.0, 0.1, 0.1),
        rotation: Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
    };

    // The long axis now points along world y.
    assert!(cube.contains(Vec3::new(0.0, 0.9, 0.0)));
    assert!(!cube.contains(Vec3::new(0.9, 0.0, 0.0)));
}
