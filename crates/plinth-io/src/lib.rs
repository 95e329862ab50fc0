pub mod gltf;
pub mod mesh;
pub mod step;

pub use gltf::{GltfMaterial, export_gltf};
pub use mesh::{
    DEFAULT_TESSELLATION_TOLERANCE, MIN_TESSELLATION_TOLERANCE, MeshTriangles, export_obj,
    mesh_triangles, triangulate_solid,
};
pub use step::{export_step, step_document};
