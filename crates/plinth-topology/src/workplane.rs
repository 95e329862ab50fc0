use plinth_base::{ensure_finite, ensure_positive};
use plinth_geometry::{Plane, PlaneName};

use crate::{Point3, Result, Solid, SolidBuilder};

/// Which local axes a primitive is centered on. An axis that is not centered
/// starts at the workplane origin and extends in the positive direction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Centered {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl Centered {
    pub const ALL: Self = Self::new(true, true, true);
    pub const NONE: Self = Self::new(false, false, false);

    pub const fn new(x: bool, y: bool, z: bool) -> Self {
        Self { x, y, z }
    }
}

impl Default for Centered {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<bool> for Centered {
    fn from(value: bool) -> Self {
        Self::new(value, value, value)
    }
}

/// A reference plane that anchors solid construction.
///
/// ```ignore
/// let solid = Workplane::named("XY")?.box_solid(1.0, 2.0, 3.0)?;
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Workplane {
    plane: Plane,
    centered: Centered,
}

impl Workplane {
    pub fn new(plane: Plane) -> Self {
        Self {
            plane,
            centered: Centered::default(),
        }
    }

    pub fn named(name: &str) -> Result<Self> {
        let name: PlaneName = name.parse()?;
        Ok(Self::from(name))
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn centered(mut self, centered: impl Into<Centered>) -> Self {
        self.centered = centered.into();
        self
    }

    pub fn offset(mut self, distance: f64) -> Self {
        self.plane = self.plane.offset(distance);
        self
    }

    pub fn with_origin(mut self, origin: Point3) -> Self {
        self.plane = self.plane.with_origin(origin);
        self
    }

    /// Builds a box measuring `length` along the plane's x direction, `width`
    /// along its y direction and `height` along its normal. Fails on a
    /// non-positive dimension or a non-finite workplane origin.
    pub fn box_solid(&self, length: f64, width: f64, height: f64) -> Result<Solid> {
        ensure_positive("length", length)?;
        ensure_positive("width", width)?;
        ensure_positive("height", height)?;
        let origin = self.plane.origin();
        ensure_finite("origin.x", origin.x)?;
        ensure_finite("origin.y", origin.y)?;
        ensure_finite("origin.z", origin.z)?;

        let start = |size: f64, centered: bool| if centered { -0.5 * size } else { 0.0 };
        let corner = self.plane.to_world(Point3::new(
            start(length, self.centered.x),
            start(width, self.centered.y),
            start(height, self.centered.z),
        ));

        Ok(SolidBuilder::cuboid(
            corner,
            self.plane.x_dir() * length,
            self.plane.y_dir() * width,
            self.plane.normal() * height,
        ))
    }
}

impl Default for Workplane {
    fn default() -> Self {
        Self::new(Plane::default())
    }
}

impl From<PlaneName> for Workplane {
    fn from(name: PlaneName) -> Self {
        Self::new(Plane::named(name))
    }
}
