use anyhow::Result;
use plinth_io::{
    DEFAULT_TESSELLATION_TOLERANCE, GltfMaterial, MIN_TESSELLATION_TOLERANCE, export_gltf,
    export_obj, export_step, mesh_triangles, triangulate_solid,
};
use plinth_topology::Workplane;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let stamp = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(duration) => duration.as_nanos(),
        Err(_) => 0,
    };
    path.push(format!("plinth_{stamp}_{file_name}"));
    path
}

#[test]
fn export_step_creates_file() -> Result<()> {
    let solid = Workplane::named("XY")?.box_solid(1.0, 2.0, 3.0)?;
    let path = temp_path("box.step");

    export_step(&solid, &path)?;

    let text = fs::read_to_string(&path)?;
    assert!(text.contains("ISO-10303-21"));

    let _ = fs::remove_file(&path);
    Ok(())
}

#[test]
fn triangulation_produces_mesh() -> Result<()> {
    let solid = Workplane::named("XY")?.box_solid(1.0, 2.0, 3.0)?;
    let mesh = triangulate_solid(&solid, DEFAULT_TESSELLATION_TOLERANCE)?;
    assert!(!mesh.positions().is_empty());
    assert!(mesh.faces().len() > 0);

    let triangles = mesh_triangles(&mesh);
    assert!(triangles.triangle_count() >= 12);
    let Some((min, max)) = triangles.bounds else {
        panic!("mesh has no bounds");
    };
    for (axis, half) in [0.5, 1.0, 1.5].into_iter().enumerate() {
        assert!((min[axis] + half).abs() < 1.0e-6);
        assert!((max[axis] - half).abs() < 1.0e-6);
    }
    Ok(())
}

#[test]
fn box_normals_point_outward() -> Result<()> {
    let solid = Workplane::named("XY")?.box_solid(1.0, 2.0, 3.0)?;
    let triangles = mesh_triangles(&triangulate_solid(&solid, DEFAULT_TESSELLATION_TOLERANCE)?);
    for (p, n) in triangles.positions.iter().zip(&triangles.normals) {
        let dot = p[0] * n[0] + p[1] * n[1] + p[2] * n[2];
        assert!(dot > 0.0, "position {p:?} normal {n:?}");
    }
    Ok(())
}

#[test]
fn export_gltf_writes_document_and_buffer() -> Result<()> {
    let solid = Workplane::named("XY")?.box_solid(1.0, 2.0, 3.0)?;
    let path = temp_path("box.gltf");
    let material = GltfMaterial::new("simple_box", [0.25, 1.0, 0.75], 0.5);

    export_gltf(&solid, &path, DEFAULT_TESSELLATION_TOLERANCE, Some(&material))?;

    let document: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    let bin_path = path.with_extension("bin");
    let bin_len = fs::metadata(&bin_path)?.len();
    assert_eq!(document["buffers"][0]["byteLength"], serde_json::json!(bin_len));
    assert_eq!(document["materials"][0]["alphaMode"], "BLEND");

    let _ = fs::remove_file(&path);
    let _ = fs::remove_file(&bin_path);
    Ok(())
}

#[test]
fn export_obj_writes_faces() -> Result<()> {
    let solid = Workplane::named("XY")?.box_solid(1.0, 2.0, 3.0)?;
    let path = temp_path("box.obj");

    export_obj(&solid, &path, DEFAULT_TESSELLATION_TOLERANCE)?;

    let text = fs::read_to_string(&path)?;
    assert!(text.lines().any(|line| line.starts_with("v ")));
    assert!(text.lines().any(|line| line.starts_with("f ")));

    let _ = fs::remove_file(&path);
    Ok(())
}

#[test]
fn unusable_tolerance_is_an_error() -> Result<()> {
    let solid = Workplane::named("XY")?.box_solid(1.0, 2.0, 3.0)?;
    for tol in [0.0, -1.0, MIN_TESSELLATION_TOLERANCE / 2.0, f64::NAN, f64::INFINITY] {
        let err = triangulate_solid(&solid, tol).unwrap_err();
        assert!(err.to_string().contains("tessellation tolerance"), "{err}");
    }
    assert!(triangulate_solid(&solid, MIN_TESSELLATION_TOLERANCE).is_ok());

    let path = temp_path("rejected.gltf");
    assert!(export_gltf(&solid, &path, 0.0, None).is_err());
    assert!(export_obj(&solid, temp_path("rejected.obj"), -1.0).is_err());
    assert!(!path.exists());
    Ok(())
}
