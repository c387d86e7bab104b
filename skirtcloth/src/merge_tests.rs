use crate::{BlendShapeFrame, BlendShapeMerge, MeshSnapshot, merge_meshes};
use glam::{Mat4, Vec3, Vec4};

fn triangle(name: &str, x: f32) -> MeshSnapshot {
    MeshSnapshot::new(
        name,
        vec![
            Vec3::new(x, 0.0, 0.0),
            Vec3::new(x + 1.0, 0.0, 0.0),
            Vec3::new(x, 1.0, 0.0),
        ],
        vec![vec![0, 1, 2]],
    )
}

fn with_shape(mut mesh: MeshSnapshot, shape: &str, frames: usize) -> MeshSnapshot {
    for f in 0..frames {
        let mut frame = BlendShapeFrame::zeroed((f + 1) as f32 * 50.0, mesh.vertex_count());
        frame.delta_vertices = vec![Vec3::Y; mesh.vertex_count()];
        mesh.add_blend_shape_frame(shape, frame);
    }
    mesh
}

#[test]
fn merging_two_triangles_offsets_the_second_sub_mesh() {
    let a = triangle("a", 0.0);
    let b = triangle("b", 5.0);

    let merged = merge_meshes(&a, &b, BlendShapeMerge::FirstOnly).unwrap();

    assert_eq!(merged.name, "a_and_b");
    assert_eq!(merged.vertex_count(), 6);
    assert_eq!(merged.sub_meshes, vec![vec![0, 1, 2], vec![3, 4, 5]]);
    assert_eq!(merged.bounds.max, Vec3::new(6.0, 1.0, 0.0));
}

#[test]
fn second_mesh_indices_are_offset_by_first_vertex_count() {
    let mut a = triangle("a", 0.0);
    a.vertices.push(Vec3::new(0.0, 0.0, 1.0));
    let mut b = triangle("b", 0.0);
    b.sub_meshes = vec![vec![2, 1, 0], vec![0, 0, 1]];

    let merged = merge_meshes(&a, &b, BlendShapeMerge::FirstOnly).unwrap();

    assert_eq!(merged.sub_meshes.len(), 3);
    for (merged_sub, original) in merged.sub_meshes[1..].iter().zip(&b.sub_meshes) {
        let expected: Vec<u32> = original.iter().map(|i| i + 4).collect();
        assert_eq!(merged_sub, &expected);
    }
}

#[test]
fn one_sided_channels_are_default_filled() {
    let mut a = triangle("a", 0.0);
    a.normals = vec![Vec3::Z; 3];
    let mut b = triangle("b", 2.0);
    b.colors = vec![Vec4::new(1.0, 0.0, 0.0, 1.0); 3];
    b.uvs[2] = vec![glam::Vec2::ONE; 3];

    let merged = merge_meshes(&a, &b, BlendShapeMerge::FirstOnly).unwrap();

    for len in [
        merged.vertices.len(),
        merged.normals.len(),
        merged.colors.len(),
        merged.uvs[2].len(),
    ] {
        assert_eq!(len, 6);
    }
    assert!(merged.tangents.is_empty());
    assert!(merged.uvs[0].is_empty());
    assert_eq!(merged.normals[4], Vec3::ZERO);
    assert_eq!(merged.colors[0], Vec4::ONE);
    assert_eq!(merged.uvs[2][1], glam::Vec2::ZERO);
    assert_eq!(merged.uvs[2][5], glam::Vec2::ONE);
    merged.validate().unwrap();
}

#[test]
fn bind_poses_come_from_the_first_mesh() {
    let mut a = triangle("a", 0.0);
    a.bind_poses = vec![Mat4::IDENTITY];
    let mut b = triangle("b", 0.0);
    b.bind_poses = vec![Mat4::from_scale(Vec3::splat(2.0)); 3];

    let merged = merge_meshes(&a, &b, BlendShapeMerge::FirstOnly).unwrap();

    assert_eq!(merged.bind_poses, vec![Mat4::IDENTITY]);
}

#[test]
fn mismatched_channel_length_is_rejected() {
    let mut a = triangle("a", 0.0);
    a.normals = vec![Vec3::Z; 2];
    let b = triangle("b", 0.0);

    assert!(merge_meshes(&a, &b, BlendShapeMerge::FirstOnly).is_err());
}

#[test]
fn first_only_pads_first_shapes_and_drops_second_only_shapes() {
    let a = with_shape(triangle("a", 0.0), "Smile", 2);
    let b = with_shape(triangle("b", 0.0), "Frown", 1);

    let merged = merge_meshes(&a, &b, BlendShapeMerge::FirstOnly).unwrap();

    assert_eq!(merged.blend_shapes.len(), 1);
    let smile = merged.blend_shape("Smile").unwrap();
    assert_eq!(smile.frames.len(), 2);
    for frame in &smile.frames {
        assert_eq!(frame.delta_vertices.len(), 6);
        assert_eq!(frame.delta_normals.len(), 6);
        assert_eq!(&frame.delta_vertices[..3], &[Vec3::Y; 3]);
        assert_eq!(&frame.delta_vertices[3..], &[Vec3::ZERO; 3]);
    }
    merged.validate().unwrap();
}

#[test]
fn union_joins_shared_shapes_and_pads_the_rest() {
    let a = with_shape(triangle("a", 0.0), "Smile", 1);
    let b = with_shape(with_shape(triangle("b", 0.0), "Smile", 1), "Frown", 1);

    let merged = merge_meshes(&a, &b, BlendShapeMerge::Union).unwrap();

    let names: Vec<&str> = merged.blend_shapes.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Smile", "Frown"]);

    let smile = merged.blend_shape("Smile").unwrap();
    assert_eq!(smile.frames[0].delta_vertices, vec![Vec3::Y; 6]);

    let frown = merged.blend_shape("Frown").unwrap();
    assert_eq!(&frown.frames[0].delta_vertices[..3], &[Vec3::ZERO; 3]);
    assert_eq!(&frown.frames[0].delta_vertices[3..], &[Vec3::Y; 3]);
    merged.validate().unwrap();
}

#[test]
fn union_with_different_frame_counts_keeps_first_frames() {
    let a = with_shape(triangle("a", 0.0), "Smile", 2);
    let b = with_shape(triangle("b", 0.0), "Smile", 1);

    let merged = merge_meshes(&a, &b, BlendShapeMerge::Union).unwrap();

    let smile = merged.blend_shape("Smile").unwrap();
    assert_eq!(smile.frames.len(), 2);
    assert_eq!(&smile.frames[1].delta_vertices[3..], &[Vec3::ZERO; 3]);
}
