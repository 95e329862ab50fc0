use anyhow::{Context, Result, bail};
use plinth_topology::Solid;
use std::fs::File;
use std::path::Path;
use truck_base::cgmath64::{EuclideanSpace, InnerSpace, Point3, Vector3};
use truck_meshalgo::prelude::*;
use truck_polymesh::{PolygonMesh, obj};

pub const DEFAULT_TESSELLATION_TOLERANCE: f64 = 0.01;
/// Smallest chord tolerance the tessellator accepts.
pub const MIN_TESSELLATION_TOLERANCE: f64 = 1.0e-6;

/// Tessellates `solid`, merging coincident attributes. Fails on a tolerance
/// that is not finite or below [`MIN_TESSELLATION_TOLERANCE`], and on an
/// empty result.
pub fn triangulate_solid(solid: &Solid, tol: f64) -> Result<PolygonMesh> {
    if !tol.is_finite() || tol < MIN_TESSELLATION_TOLERANCE {
        bail!(
            "tessellation tolerance must be finite and >= {MIN_TESSELLATION_TOLERANCE}, got {tol}"
        );
    }
    let mut mesh = solid.triangulation(tol).to_polygon();
    if mesh.positions().is_empty() {
        bail!("triangulation produced empty mesh");
    }
    mesh.add_naive_normals(true);
    mesh.put_together_same_attrs(truck_base::tolerance::TOLERANCE);
    mesh.remove_unused_attrs();
    Ok(mesh)
}

/// Unindexed triangle soup with one flat normal per corner, the layout the
/// glTF writer consumes.
#[derive(Clone, Debug, Default)]
pub struct MeshTriangles {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub bounds: Option<([f64; 3], [f64; 3])>,
}

impl MeshTriangles {
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

pub fn mesh_triangles(mesh: &PolygonMesh) -> MeshTriangles {
    let positions = mesh.positions();
    let mut tris: Vec<[usize; 3]> = mesh
        .tri_faces()
        .iter()
        .map(|tri| [tri[0].pos, tri[1].pos, tri[2].pos])
        .collect();
    for quad in mesh.quad_faces() {
        tris.push([quad[0].pos, quad[1].pos, quad[2].pos]);
        tris.push([quad[0].pos, quad[2].pos, quad[3].pos]);
    }
    for face in mesh.faces().other_faces() {
        if face.len() < 3 {
            continue;
        }
        for idx in 1..(face.len() - 1) {
            tris.push([face[0].pos, face[idx].pos, face[idx + 1].pos]);
        }
    }

    let center = centroid(positions);
    let mut out = MeshTriangles {
        bounds: bounds(positions),
        ..Default::default()
    };
    for mut tri in tris {
        let p0 = positions[tri[0]];
        let p1 = positions[tri[1]];
        let p2 = positions[tri[2]];
        let mut normal = (p1 - p0).cross(p2 - p0);
        let tri_center = Point3::from_vec((p0.to_vec() + p1.to_vec() + p2.to_vec()) / 3.0);
        if normal.dot(tri_center - center) < 0.0 {
            tri.swap(1, 2);
            normal = -normal;
        }
        let normal = if normal.magnitude2() > 0.0 {
            normal.normalize()
        } else {
            Vector3::unit_z()
        };
        for idx in tri {
            let p = positions[idx];
            out.positions.push([p.x as f32, p.y as f32, p.z as f32]);
            out.normals
                .push([normal.x as f32, normal.y as f32, normal.z as f32]);
        }
    }
    out
}

pub fn export_obj(solid: &Solid, path: impl AsRef<Path>, tol: f64) -> Result<()> {
    let path = path.as_ref();
    let mesh = triangulate_solid(solid, tol)?;
    ensure_parent_dir(path)?;

    let file = File::create(path).with_context(|| format!("create OBJ file {}", path.display()))?;
    obj::write(&mesh, file).with_context(|| format!("write OBJ file {}", path.display()))?;
    Ok(())
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output directory {}", parent.display()))?;
        }
    }
    Ok(())
}

fn bounds(points: &[Point3]) -> Option<([f64; 3], [f64; 3])> {
    let mut iter = points.iter();
    let first = iter.next()?;
    let mut min = [first.x, first.y, first.z];
    let mut max = min;
    for p in iter {
        for (axis, value) in [p.x, p.y, p.z].into_iter().enumerate() {
            min[axis] = min[axis].min(value);
            max[axis] = max[axis].max(value);
        }
    }
    Some((min, max))
}

fn centroid(points: &[Point3]) -> Point3 {
    if points.is_empty() {
        return Point3::origin();
    }
    let sum = points
        .iter()
        .fold(Vector3::new(0.0, 0.0, 0.0), |acc, p| acc + p.to_vec());
    Point3::from_vec(sum / points.len() as f64)
}
