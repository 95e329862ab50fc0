use anyhow::{Context, Result};
use plinth_base::Guid;
use plinth_io::{DEFAULT_TESSELLATION_TOLERANCE, GltfMaterial, export_gltf};
use plinth_topology::{Solid, solid_bounds};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::style::{Color, DisplayStyle};
use crate::viewer::{Viewer, check_request};

pub const MANIFEST_FILE: &str = "scene.json";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneEntry {
    pub id: Guid,
    pub label: String,
    pub color: Color,
    pub alpha: f64,
    pub bounds: Option<Bounds>,
    /// glTF file, relative to the scene directory.
    pub mesh: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneManifest {
    pub objects: Vec<SceneEntry>,
}

impl SceneManifest {
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(MANIFEST_FILE);
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("read scene manifest {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parse scene manifest {}", path.display()))
    }
}

/// Headless host: every shown object is tessellated into a glTF file carrying
/// its color and opacity, and listed in `scene.json`.
pub struct SceneExporter {
    dir: PathBuf,
    tolerance: f64,
    manifest: SceneManifest,
    names: HashSet<String>,
}

impl SceneExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            tolerance: DEFAULT_TESSELLATION_TOLERANCE,
            manifest: SceneManifest::default(),
            names: HashSet::new(),
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn manifest(&self) -> &SceneManifest {
        &self.manifest
    }

    /// First free file stem for `label`. Nothing is reserved until the
    /// object's files have been written.
    fn next_name(&self, label: &str) -> String {
        let base = file_stem_for(label);
        let mut name = base.clone();
        let mut n = 1;
        while self.names.contains(&name) {
            n += 1;
            name = format!("{base}_{n}");
        }
        name
    }

    fn write_manifest(&self) -> Result<()> {
        let path = self.dir.join(MANIFEST_FILE);
        let text = serde_json::to_string_pretty(&self.manifest)?;
        std::fs::write(&path, text)
            .with_context(|| format!("write scene manifest {}", path.display()))
    }
}

impl Viewer for SceneExporter {
    fn show_object(&mut self, solid: &Solid, label: &str, style: &DisplayStyle) -> Result<()> {
        let label = check_request(label, style)?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create scene directory {}", self.dir.display()))?;

        let name = self.next_name(label);
        let mesh = format!("{name}.gltf");
        let path = self.dir.join(&mesh);
        let material = GltfMaterial::new(label, style.color.channels(), style.alpha);
        debug!(label, tolerance = self.tolerance, "tessellating shown object");
        export_gltf(solid, &path, self.tolerance, Some(&material))
            .with_context(|| format!("export shown object '{label}'"))?;
        self.names.insert(name);

        let bounds = solid_bounds(solid).map(|(min, max)| Bounds {
            min: [min.x, min.y, min.z],
            max: [max.x, max.y, max.z],
        });
        self.manifest.objects.push(SceneEntry {
            id: Guid::new(),
            label: label.to_string(),
            color: style.color,
            alpha: style.alpha,
            bounds,
            mesh,
        });
        self.write_manifest()?;

        info!(label, path = %path.display(), alpha = style.alpha, "object shown");
        Ok(())
    }
}

/// Maps a label to a file-safe stem: anything outside `[A-Za-z0-9_-]` becomes `_`.
fn file_stem_for(label: &str) -> String {
    let stem: String = label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "object".to_string()
    } else {
        stem
    }
}
