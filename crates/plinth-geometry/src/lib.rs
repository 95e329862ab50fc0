pub use truck_geometry::base::{Point3, Vector3};

pub mod plane;

pub use plane::{Plane, PlaneName};
