use thiserror::Error;
use truck_modeling::builder;

pub use plinth_geometry::{Plane, PlaneName};
pub use truck_modeling::{Point3, Shell, Solid, Vector3, Vertex};

mod workplane;

pub use workplane::{Centered, Workplane};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] plinth_base::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub struct SolidBuilder;

impl SolidBuilder {
    /// Sweeps `corner` along `a`, then `b`, then `c`. The three vectors are
    /// expected to form a right-handed frame so the shell faces outward.
    pub fn cuboid(corner: Point3, a: Vector3, b: Vector3, c: Vector3) -> Solid {
        let v = builder::vertex(corner);
        let e = builder::tsweep(&v, a);
        let f = builder::tsweep(&e, b);
        builder::tsweep(&f, c)
    }
}

/// Axis-aligned bounds of the solid's vertices, `None` for a solid without
/// vertices.
pub fn solid_bounds(solid: &Solid) -> Option<(Point3, Point3)> {
    let mut points = solid
        .boundaries()
        .iter()
        .flat_map(|shell| shell.vertex_iter())
        .map(|v| v.point());
    let first = points.next()?;
    let mut min = first;
    let mut max = first;
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        min.z = min.z.min(p.z);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
        max.z = max.z.max(p.z);
    }
    Some((min, max))
}
