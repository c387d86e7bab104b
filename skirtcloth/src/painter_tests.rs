use crate::{
    BoneFrame, ClothCoefficient, Error, InsideRadius, MeshSnapshot, PaintContext, PaintRule,
    PainterConfig, RuleKind, SpreadingCone, Transform, UNBOUNDED,
};
use glam::Vec3;

fn assert_approx(actual: f32, expected: f32) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= 0.001,
        "expected {expected}, got {actual} (diff {diff})"
    );
}

/// Two rings of radius 0.5 at y = 1 and y = 0; the first lower vertex is duplicated.
fn baked_skirt() -> MeshSnapshot {
    let ring = |y: f32| {
        [
            Vec3::new(0.5, y, 0.0),
            Vec3::new(0.0, y, 0.5),
            Vec3::new(-0.5, y, 0.0),
            Vec3::new(0.0, y, -0.5),
        ]
    };
    let mut vertices = ring(1.0).to_vec();
    vertices.extend(ring(0.0));
    vertices.push(Vec3::new(0.5, 0.0, 0.0));
    MeshSnapshot::new(
        "skirt_baked",
        vertices,
        vec![vec![0, 4, 1, 1, 4, 5, 1, 5, 2, 2, 5, 6]],
    )
}

fn context() -> PaintContext {
    PaintContext::new(&baked_skirt(), Vec3::ZERO, Vec3::ZERO)
}

fn advanced(rules: Vec<PaintRule>) -> PainterConfig {
    PainterConfig {
        advanced: true,
        rules,
        ..PainterConfig::default()
    }
}

const LOW: Vec3 = Vec3::new(0.5, 0.0, 0.0);
const HIGH: Vec3 = Vec3::new(0.5, 1.0, 0.0);

#[test]
fn context_uses_distinct_positions_and_top_centre() {
    let ctx = context();

    assert_eq!(ctx.world_vertices.len(), 8);
    assert_eq!(ctx.world_top, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(ctx.world_bottom, Vec3::ZERO);
}

#[test]
fn vertices_in_the_top_band_are_pinned_whatever_the_rules() {
    let ctx = context();
    let configs = [
        PainterConfig::default(),
        advanced(vec![]),
        advanced(vec![PaintRule::new(
            RuleKind::InsideRadius(InsideRadius { radius: 0.0 }),
            1.0,
        )]),
        PainterConfig {
            bias: 3.0,
            ..advanced(vec![PaintRule::new(
                RuleKind::SpreadingCone(SpreadingCone::default()),
                1.0,
            )])
        },
    ];

    for config in &configs {
        assert_eq!(config.max_distance(&ctx, HIGH), 0.0);
        assert_eq!(config.max_distance(&ctx, Vec3::new(0.0, 0.95, 0.5)), 0.0);
    }
}

#[test]
fn zero_total_weight_is_unbounded() {
    let ctx = context();
    let config = PainterConfig {
        bias: 1.0,
        ..advanced(vec![
            PaintRule::new(RuleKind::InsideRadius(InsideRadius::default()), 0.0005),
            PaintRule::new(RuleKind::SpreadingCone(SpreadingCone::default()), 0.0),
        ])
    };

    assert_eq!(config.max_distance(&ctx, LOW), UNBOUNDED);
}

#[test]
fn inside_radius_measures_horizontal_distance_past_the_radius() {
    let ctx = context();
    let config = PainterConfig {
        bias: 0.05,
        ..advanced(vec![PaintRule::new(
            RuleKind::InsideRadius(InsideRadius { radius: 0.1 }),
            2.0,
        )])
    };

    assert_approx(config.max_distance(&ctx, LOW), 0.45);
    let inner = RuleKind::InsideRadius(InsideRadius { radius: 0.8 });
    assert_eq!(inner.distance(&ctx, LOW, config.height), 0.0);
}

#[test]
fn rules_are_blended_by_weight() {
    let ctx = context();
    let config = advanced(vec![
        PaintRule::new(
            RuleKind::SpreadingCone(SpreadingCone { angle_degrees: 0.0 }),
            1.0,
        ),
        PaintRule::new(RuleKind::InsideRadius(InsideRadius { radius: 0.1 }), 3.0),
    ]);

    // (0 * 1 + 0.4 * 3) / 4
    assert_approx(config.max_distance(&ctx, LOW), 0.3);
}

#[test]
fn basic_mode_uses_a_wide_spreading_cone() {
    let ctx = context();
    let basic = PainterConfig::default();
    let cone = advanced(vec![PaintRule::new(
        RuleKind::SpreadingCone(SpreadingCone::default()),
        1.0,
    )]);

    assert_approx(basic.max_distance(&ctx, LOW), 1.157_018);
    assert_approx(cone.max_distance(&ctx, LOW), 0.688_83);
}

#[test]
fn surface_penetration_needs_advanced_mode_and_its_own_weights() {
    let ctx = context();
    let mut rule = PaintRule::new(RuleKind::InsideRadius(InsideRadius { radius: 0.1 }), 1.0);

    let mut config = advanced(vec![rule]);
    assert_eq!(config.surface_penetration(&ctx, LOW), UNBOUNDED);

    config.paint_surface_penetration = true;
    assert_eq!(config.surface_penetration(&ctx, LOW), UNBOUNDED);

    rule.surface_penetration_weight = 1.0;
    config.rules = vec![rule];
    config.surface_penetration_bias = 0.1;
    assert_approx(config.surface_penetration(&ctx, LOW), 0.5);

    config.advanced = false;
    assert_eq!(config.surface_penetration(&ctx, LOW), UNBOUNDED);
}

#[test]
fn height_rule_compares_world_heights() {
    let baked = baked_skirt();
    let ctx = PaintContext::new(&baked, Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 2.0, 0.0));
    let config = PainterConfig::default();

    assert_approx(ctx.world_top.y, 3.0);
    assert_eq!(config.max_distance(&ctx, HIGH), 0.0);
    assert!(config.max_distance(&ctx, LOW) > 0.0);
}

#[test]
fn paint_is_per_particle_and_expands_to_vertices() {
    let baked = baked_skirt();
    let ctx = context();
    let config = advanced(vec![PaintRule::new(
        RuleKind::InsideRadius(InsideRadius { radius: 0.1 }),
        1.0,
    )]);

    let painted = config.paint(&ctx, &baked);
    assert_eq!(painted.coefficients.len(), 8);

    let per_vertex = painted.per_vertex();
    assert_eq!(per_vertex.len(), baked.vertex_count());
    assert_eq!(per_vertex[4], per_vertex[8]);
    assert_eq!(per_vertex[0].max_distance, 0.0);
    assert_approx(per_vertex[8].max_distance, 0.4);
    assert_eq!(per_vertex[8].collision_sphere_distance, UNBOUNDED);

    assert_eq!(config.paint(&ctx, &baked), painted);
}

#[test]
fn context_from_bones_offsets_the_centre_bone() {
    let baked = baked_skirt();
    let bones = BoneFrame::new(Vec3::new(1.0, 0.0, 0.0))
        .with_bone("Hips", Transform::from_position(Vec3::new(0.0, 1.0, 0.0)));

    let ctx = PaintContext::from_bones(&baked, &bones, "Hips").unwrap();
    assert_eq!(ctx.center, Vec3::new(1.0, 1.0, 0.0));
    assert_eq!(ctx.world_vertices[0], Vec3::new(1.5, 1.0, 0.0));

    let err = PaintContext::from_bones(&baked, &bones, "Spine").unwrap_err();
    assert!(matches!(err, Error::MissingBone { name } if name == "Spine"));
}

#[test]
fn default_coefficient_is_unbounded() {
    assert_eq!(ClothCoefficient::default(), ClothCoefficient::UNBOUNDED);
    assert_eq!(ClothCoefficient::default().max_distance, f32::MAX);
}
