use std::fmt;
use std::str::FromStr;

use plinth_base::{Error, Result, Tolerance};
use truck_geometry::base::{EuclideanSpace, InnerSpace, Point3, Vector3};

/// The reference planes a workplane can be opened on by name.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PlaneName {
    XY,
    YZ,
    ZX,
    XZ,
    YX,
    ZY,
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl PlaneName {
    pub const ALL: [PlaneName; 12] = [
        PlaneName::XY,
        PlaneName::YZ,
        PlaneName::ZX,
        PlaneName::XZ,
        PlaneName::YX,
        PlaneName::ZY,
        PlaneName::Front,
        PlaneName::Back,
        PlaneName::Left,
        PlaneName::Right,
        PlaneName::Top,
        PlaneName::Bottom,
    ];

    /// `(x_dir, normal)` of the plane.
    pub fn axes(self) -> (Vector3, Vector3) {
        let x = Vector3::unit_x();
        let y = Vector3::unit_y();
        let z = Vector3::unit_z();
        match self {
            PlaneName::XY | PlaneName::Front => (x, z),
            PlaneName::YZ => (y, x),
            PlaneName::ZX => (z, y),
            PlaneName::XZ | PlaneName::Bottom => (x, -y),
            PlaneName::YX => (y, -z),
            PlaneName::ZY | PlaneName::Left => (z, -x),
            PlaneName::Back => (-x, -z),
            PlaneName::Right => (-z, x),
            PlaneName::Top => (x, y),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlaneName::XY => "XY",
            PlaneName::YZ => "YZ",
            PlaneName::ZX => "ZX",
            PlaneName::XZ => "XZ",
            PlaneName::YX => "YX",
            PlaneName::ZY => "ZY",
            PlaneName::Front => "front",
            PlaneName::Back => "back",
            PlaneName::Left => "left",
            PlaneName::Right => "right",
            PlaneName::Top => "top",
            PlaneName::Bottom => "bottom",
        }
    }
}

impl fmt::Display for PlaneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaneName {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        // Axis pairs are case-sensitive: "xy" is not "XY".
        if let Some(name) = PlaneName::ALL[..6]
            .iter()
            .find(|name| name.as_str() == trimmed)
        {
            return Ok(*name);
        }
        PlaneName::ALL[6..]
            .iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| Error::InvalidParameter(format!("unknown plane name '{trimmed}'")))
    }
}

/// An oriented reference plane: an origin, a local x direction and a normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    origin: Point3,
    x_dir: Vector3,
    normal: Vector3,
}

impl Plane {
    pub fn new(origin: Point3, x_dir: Vector3, normal: Vector3) -> Result<Self> {
        let tol = Tolerance::default();
        if x_dir.magnitude() <= tol.linear {
            return Err(Error::InvalidParameter("x_dir must be non-zero".to_string()));
        }
        if normal.magnitude() <= tol.linear {
            return Err(Error::InvalidParameter("normal must be non-zero".to_string()));
        }
        let x_dir = x_dir.normalize();
        let normal = normal.normalize();
        if x_dir.dot(normal).abs() > tol.angular {
            return Err(Error::InvalidParameter(
                "x_dir must be perpendicular to normal".to_string(),
            ));
        }
        Ok(Self {
            origin,
            x_dir,
            normal,
        })
    }

    pub fn named(name: PlaneName) -> Self {
        let (x_dir, normal) = name.axes();
        Self {
            origin: Point3::origin(),
            x_dir,
            normal,
        }
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    pub fn x_dir(&self) -> Vector3 {
        self.x_dir
    }

    pub fn y_dir(&self) -> Vector3 {
        self.normal.cross(self.x_dir)
    }

    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    pub fn with_origin(mut self, origin: Point3) -> Self {
        self.origin = origin;
        self
    }

    /// Moves the plane along its normal.
    pub fn offset(mut self, distance: f64) -> Self {
        self.origin += self.normal * distance;
        self
    }

    /// Maps plane-local coordinates to world coordinates.
    pub fn to_world(&self, local: Point3) -> Point3 {
        self.origin + self.x_dir * local.x + self.y_dir() * local.y + self.normal * local.z
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::named(PlaneName::XY)
    }
}
