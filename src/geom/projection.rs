use crate::Point;
use crate::Vector;

/// Orthonormal basis for mapping between a plane's 2D (u, v) coordinates
/// and 3D world coordinates.
///
/// This is the parametric domain of a planar face: `project` takes a world
/// point to (u, v), `unproject` evaluates (u, v) back to the plane.
#[derive(Debug, Clone, Copy)]
pub struct PlaneBasis {
    pub origin: Point,
    pub u: Vector,
    pub v: Vector,
}

impl PlaneBasis {
    /// Creates a `PlaneBasis` from an origin point and a plane normal.
    ///
    /// Returns `None` if the normal has zero length.
    pub fn from_normal(origin: Point, normal: Vector) -> Option<Self> {
        let n = normal.normalize()?;

        // Pick a helper axis not parallel to the normal
        let helper = if n.dz.abs() < 0.9 {
            Vector::new(0.0, 0.0, 1.0)
        } else {
            Vector::new(0.0, 1.0, 0.0)
        };

        let u = helper.cross(&n).normalize()?;
        let v = n.cross(&u).normalize()?;

        Some(Self { origin, u, v })
    }

    /// Projects a 3D point onto the plane, returning (u, v) coordinates.
    pub fn project(&self, p: Point) -> (f64, f64) {
        let r = p - self.origin;
        (r.dot(&self.u), r.dot(&self.v))
    }

    /// Evaluates (u, v) coordinates back to a 3D point on the plane.
    pub fn unproject(&self, u: f64, v: f64) -> Point {
        self.origin + self.u * u + self.v * v
    }
}
