use glam::Vec3;
use serde_json::json;
use skirtcloth::{BoneFrame, MeshMetrics, MeshSnapshot, PaintContext, PainterConfig, UNBOUNDED};
use std::path::PathBuf;

fn parse_vec3(text: &str) -> Vec3 {
    let parts: Vec<f32> = text
        .split(',')
        .map(|s| s.trim().parse().expect("parse vector component"))
        .collect();
    assert_eq!(parts.len(), 3, "expected x,y,z but got '{text}'");
    Vec3::new(parts[0], parts[1], parts[2])
}

fn finite_or_null(value: f32) -> serde_json::Value {
    if value == UNBOUNDED {
        serde_json::Value::Null
    } else {
        json!(value)
    }
}

fn main() {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut positional = Vec::<String>::new();
    let mut offset = Vec3::ZERO;
    let mut center: Option<Vec3> = None;
    let mut bones_path: Option<PathBuf> = None;
    let mut center_bone = "Hips".to_string();

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--offset" => {
                offset = parse_vec3(args.get(i + 1).expect("--offset value"));
                i += 2;
            }
            "--center" => {
                center = Some(parse_vec3(args.get(i + 1).expect("--center value")));
                i += 2;
            }
            "--bones" => {
                bones_path = args.get(i + 1).map(PathBuf::from);
                i += 2;
            }
            "--center-bone" => {
                center_bone = args.get(i + 1).cloned().expect("--center-bone value");
                i += 2;
            }
            other => {
                positional.push(other.to_string());
                i += 1;
            }
        }
    }

    let mesh_path = positional
        .first()
        .map(PathBuf::from)
        .expect("usage: paint_dump <mesh.json> [painter.json] [--offset x,y,z] [--center x,y,z] [--bones bones.json] [--center-bone Hips]");
    let mesh_json = std::fs::read_to_string(&mesh_path).expect("read mesh json");
    let baked = MeshSnapshot::from_json_str(&mesh_json).expect("parse mesh json");

    let config = match positional.get(1) {
        Some(path) => {
            let text = std::fs::read_to_string(path).expect("read painter json");
            PainterConfig::from_json_str(&text).expect("parse painter json")
        }
        None => PainterConfig::default(),
    };

    let ctx = match bones_path {
        Some(path) => {
            let text = std::fs::read_to_string(path).expect("read bones json");
            let bones = BoneFrame::from_json_str(&text).expect("parse bones json");
            PaintContext::from_bones(&baked, &bones, &center_bone).expect("resolve centre bone")
        }
        None => PaintContext::new(&baked, offset, center.unwrap_or(offset)),
    };

    let painted = config.paint(&ctx, &baked);
    let metrics = MeshMetrics::of(&baked);

    let vertices: Vec<_> = painted
        .per_vertex()
        .iter()
        .enumerate()
        .map(|(i, c)| {
            json!({
                "i": i,
                "particle": painted.particles.vertex_to_particle[i],
                "position": baked.vertices[i].to_array(),
                "maxDistance": finite_or_null(c.max_distance),
                "collisionSphereDistance": finite_or_null(c.collision_sphere_distance),
            })
        })
        .collect();

    let out = json!({
        "mesh": baked.name,
        "rank": metrics.rank.to_string(),
        "particles": painted.particles.particle_count(),
        "worldTop": ctx.world_top.to_array(),
        "worldBottom": ctx.world_bottom.to_array(),
        "center": ctx.center.to_array(),
        "vertices": vertices,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&out).expect("serialize output")
    );
}
