//! glTF 2.0 writer: a `.gltf` JSON document plus a sibling `.bin` buffer.

use anyhow::{Context, Result, bail};
use plinth_topology::Solid;
use serde_json::{Value, json};
use std::path::Path;

use crate::mesh::{MeshTriangles, ensure_parent_dir, mesh_triangles, triangulate_solid};

const FLOAT: u32 = 5126;
const ARRAY_BUFFER: u32 = 34962;
const TRIANGLES: u32 = 4;

/// PBR material attached to the exported primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct GltfMaterial {
    pub name: String,
    /// Linear RGBA; the alpha channel is opacity.
    pub base_color: [f64; 4],
}

impl GltfMaterial {
    pub fn new(name: impl Into<String>, rgb: [f64; 3], alpha: f64) -> Self {
        Self {
            name: name.into(),
            base_color: [rgb[0], rgb[1], rgb[2], alpha],
        }
    }

    pub fn alpha_mode(&self) -> &'static str {
        if self.base_color[3] < 1.0 {
            "BLEND"
        } else {
            "OPAQUE"
        }
    }

    fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "pbrMetallicRoughness": {
                "baseColorFactor": self.base_color,
                "metallicFactor": 0.0,
                "roughnessFactor": 0.8
            },
            "alphaMode": self.alpha_mode(),
            "doubleSided": self.base_color[3] < 1.0
        })
    }
}

pub fn export_gltf(
    solid: &Solid,
    path: impl AsRef<Path>,
    tol: f64,
    material: Option<&GltfMaterial>,
) -> Result<()> {
    let path = path.as_ref();
    let triangles = mesh_triangles(&triangulate_solid(solid, tol)?);
    if triangles.is_empty() {
        bail!("triangulation produced no triangles");
    }
    ensure_parent_dir(path)?;

    let bin_path = path.with_extension("bin");
    let bin_name = bin_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("mesh.bin")
        .to_string();
    let (document, buffer) = gltf_document(&triangles, &bin_name, material);

    let text = serde_json::to_string_pretty(&document)?;
    std::fs::write(path, text).with_context(|| format!("write glTF file {}", path.display()))?;
    std::fs::write(&bin_path, buffer)
        .with_context(|| format!("write glTF buffer {}", bin_path.display()))?;
    Ok(())
}

pub(crate) fn gltf_document(
    triangles: &MeshTriangles,
    bin_name: &str,
    material: Option<&GltfMaterial>,
) -> (Value, Vec<u8>) {
    let mut buffer = Vec::with_capacity(triangles.positions.len() * 24);
    for p in &triangles.positions {
        for c in p {
            buffer.extend_from_slice(&c.to_le_bytes());
        }
    }
    let position_length = buffer.len();
    for n in &triangles.normals {
        for c in n {
            buffer.extend_from_slice(&c.to_le_bytes());
        }
    }
    let normal_length = buffer.len() - position_length;

    let ([x0, y0, z0], [x1, y1, z1]) = triangles.bounds.unwrap_or_default();
    let min = [x0 as f32, y0 as f32, z0 as f32];
    let max = [x1 as f32, y1 as f32, z1 as f32];
    let count = triangles.positions.len();

    let mut primitive = json!({
        "attributes": { "POSITION": 0, "NORMAL": 1 },
        "mode": TRIANGLES
    });
    let mut document = json!({
        "asset": { "generator": "plinth", "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{ "mesh": 0 }],
        "meshes": [],
        "accessors": [
            {
                "bufferView": 0,
                "componentType": FLOAT,
                "count": count,
                "type": "VEC3",
                "min": min,
                "max": max
            },
            {
                "bufferView": 1,
                "componentType": FLOAT,
                "count": count,
                "type": "VEC3"
            }
        ],
        "bufferViews": [
            {
                "buffer": 0,
                "byteOffset": 0,
                "byteLength": position_length,
                "target": ARRAY_BUFFER
            },
            {
                "buffer": 0,
                "byteOffset": position_length,
                "byteLength": normal_length,
                "target": ARRAY_BUFFER
            }
        ],
        "buffers": [{ "byteLength": buffer.len(), "uri": bin_name }]
    });

    if let Some(material) = material {
        primitive["material"] = json!(0);
        document["materials"] = json!([material.to_json()]);
        document["nodes"][0]["name"] = json!(material.name);
    }
    document["meshes"] = json!([{ "primitives": [primitive] }]);

    (document, buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle() -> MeshTriangles {
        MeshTriangles {
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 2.0, 0.0]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            bounds: Some(([0.0, 0.0, 0.0], [1.0, 2.0, 0.0])),
        }
    }

    #[test]
    fn buffer_holds_positions_then_normals() {
        let (document, buffer) = gltf_document(&single_triangle(), "tri.bin", None);
        assert_eq!(buffer.len(), 3 * 12 * 2);
        assert_eq!(document["bufferViews"][1]["byteOffset"], json!(36));
        assert_eq!(document["buffers"][0]["uri"], json!("tri.bin"));
        assert_eq!(document["accessors"][0]["max"], json!([1.0, 2.0, 0.0]));
        assert!(document.get("materials").is_none());
    }

    #[test]
    fn translucent_material_blends() {
        let material = GltfMaterial::new("simple_box", [0.25, 1.0, 0.75], 0.5);
        let (document, _) = gltf_document(&single_triangle(), "tri.bin", Some(&material));
        let m = &document["materials"][0];
        assert_eq!(m["alphaMode"], json!("BLEND"));
        assert_eq!(
            m["pbrMetallicRoughness"]["baseColorFactor"],
            json!([0.25, 1.0, 0.75, 0.5])
        );
        assert_eq!(document["meshes"][0]["primitives"][0]["material"], json!(0));
        assert_eq!(document["nodes"][0]["name"], json!("simple_box"));
    }

    #[test]
    fn opaque_material() {
        let material = GltfMaterial::new("solid", [1.0, 0.0, 0.0], 1.0);
        assert_eq!(material.alpha_mode(), "OPAQUE");
    }
}
