use anyhow::{Context, Result};
use plinth_topology::Solid;
use std::path::Path;
use truck_stepio::out::{CompleteStepDisplay, StepHeaderDescriptor, StepModel};

use crate::mesh::ensure_parent_dir;

const STEP_ORGANIZATION: &str = "plinth";

/// Renders `solid` as a complete ISO-10303-21 document whose header names
/// `file_name`.
pub fn step_document(solid: &Solid, file_name: &str) -> String {
    let header = StepHeaderDescriptor {
        file_name: file_name.to_string(),
        organization_system: STEP_ORGANIZATION.to_string(),
        ..Default::default()
    };
    let compressed = solid.compress();
    CompleteStepDisplay::new(StepModel::from(&compressed), header).to_string()
}

pub fn export_step(solid: &Solid, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("model.step");
    let document = step_document(solid, file_name);

    ensure_parent_dir(path)?;
    std::fs::write(path, document).with_context(|| format!("write STEP file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use plinth_topology::Workplane;

    #[test]
    fn header_names_file_and_organization() -> Result<()> {
        let solid = Workplane::named("XY")?.box_solid(1.0, 2.0, 3.0)?;
        let document = step_document(&solid, "simple_box.step");
        assert!(document.contains("simple_box.step"));
        assert!(document.contains(STEP_ORGANIZATION));
        assert!(document.contains("ISO-10303-21"));
        Ok(())
    }
}
