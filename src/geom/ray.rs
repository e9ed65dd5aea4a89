//! Ray casting infrastructure.
//!
//! Provides a Ray struct and ray-polygon intersection tests used by the
//! obstruction query when counting walls crossed by a signal path.

use crate::geom::EPS;
use crate::{Point, Polygon, Vector};

/// A ray defined by an origin point and a direction vector.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray
    pub origin: Point,
    /// Direction vector (normalized, so ray parameters are distances)
    pub direction: Vector,
}

impl Ray {
    /// Creates a new ray from origin point and direction vector.
    ///
    /// The direction vector is automatically normalized. Returns `None`
    /// for a zero-length direction.
    pub fn new(origin: Point, direction: Vector) -> Option<Self> {
        let normalized = direction.normalize()?;
        Some(Self {
            origin,
            direction: normalized,
        })
    }

    /// Creates a ray from two points (origin towards target).
    ///
    /// Returns `None` when the points coincide, so callers can detect a
    /// degenerate segment before any direction arithmetic happens.
    pub fn from_points(origin: Point, target: Point) -> Option<Self> {
        Self::new(origin, target - origin)
    }

    /// Returns the point along the ray at parameter t.
    pub fn point_at(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }

    /// Calculates the intersection of this ray with a polygon.
    ///
    /// Returns `Some((t, point))` where `t` is the distance from the origin
    /// along the ray. Only intersections in front of the origin (t > 0)
    /// are reported; the ray extends to infinity, so callers that query a
    /// bounded segment must filter on `t` themselves.
    pub fn intersect_polygon(&self, polygon: &Polygon) -> Option<(f64, Point)> {
        let (a, b, c, d) = polygon.plane_coefficients();
        let plane_normal = Vector::new(a, b, c);

        // Ray parallel to the plane
        let denom = plane_normal.dot(&self.direction);
        if denom.abs() < EPS {
            return None;
        }

        // Substitute ray P = origin + t * direction into the plane equation
        // a*x + b*y + c*z + d = 0 and solve for t.
        let origin_dot = a * self.origin.x + b * self.origin.y + c * self.origin.z + d;
        let t = -origin_dot / denom;

        // Small epsilon avoids self-intersection at the origin
        if t < EPS {
            return None;
        }

        let intersection_point = self.point_at(t);

        if polygon.is_point_inside(intersection_point, true) {
            Some((t, intersection_point))
        } else {
            None
        }
    }
}
