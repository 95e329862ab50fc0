//! The `simple_box` scene: a 1 x 2 x 3 box on the XY workplane, shown in
//! translucent mint green.

use anyhow::Result;
use plinth_topology::{Solid, Workplane};

use crate::style::{Color, DisplayStyle};
use crate::viewer::Viewer;

pub const SIMPLE_BOX_PLANE: &str = "XY";
pub const SIMPLE_BOX_LABEL: &str = "simple_box";
pub const SIMPLE_BOX_DIMENSIONS: [f64; 3] = [1.0, 2.0, 3.0];

pub fn simple_box_style() -> DisplayStyle {
    DisplayStyle {
        color: Color::rgb(0.25, 1.0, 0.75),
        alpha: 0.5,
    }
}

pub fn show_simple_box<V: Viewer + ?Sized>(viewer: &mut V) -> Result<()> {
    show_simple_box_with(viewer, |workplane, [length, width, height]| {
        Ok(workplane.box_solid(length, width, height)?)
    })
}

/// Runs the scene with a caller-supplied box constructor.
pub fn show_simple_box_with<V, F>(viewer: &mut V, build: F) -> Result<()>
where
    V: Viewer + ?Sized,
    F: FnOnce(Workplane, [f64; 3]) -> Result<Solid>,
{
    let solid = build(Workplane::named(SIMPLE_BOX_PLANE)?, SIMPLE_BOX_DIMENSIONS)?;
    viewer.show_object(&solid, SIMPLE_BOX_LABEL, &simple_box_style())
}
