use anyhow::Result;
use plinth_view::{SceneExporter, show_simple_box};

fn main() -> Result<()> {
    let mut viewer = SceneExporter::new("out/simple_box");
    show_simple_box(&mut viewer)?;
    Ok(())
}
