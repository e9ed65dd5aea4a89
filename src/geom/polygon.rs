use crate::geom::EPS;
use crate::geom::projection::PlaneBasis;
use crate::{FaderError, Point, Result, Vector};
use std::fmt;

/// A planar polygon with at least 3 vertices.
///
/// Used both as obstruction geometry (wall faces crossed by rays) and as
/// a bounded sampling surface. The vertex order defines the boundary; the
/// polygon may be non-convex but must not self-intersect.
#[derive(Debug, Clone)]
pub struct Polygon {
    pub name: String,
    pts: Vec<Point>,
    /// Unit normal of the polygon's plane.
    pub vn: Vector,
    basis: PlaneBasis,
    /// Vertices projected onto the plane basis, for 2D containment tests.
    boundary2d: Vec<(f64, f64)>,
}

impl Polygon {
    /// Creates a polygon from at least 3 non-collinear, coplanar vertices.
    pub fn new(name: &str, pts: Vec<Point>) -> Result<Self> {
        if pts.len() < 3 {
            return Err(FaderError::Config(format!(
                "polygon {} needs at least 3 vertices, got {}",
                name,
                pts.len()
            )));
        }

        // Find a normal from the first non-collinear vertex triple
        let mut vn = None;
        for i in 1..pts.len() - 1 {
            if let Some(n) = Vector::normal(pts[0], pts[i], pts[i + 1]) {
                vn = Some(n);
                break;
            }
        }
        let vn = vn.ok_or_else(|| {
            FaderError::Config(format!("polygon {} vertices are collinear", name))
        })?;

        let basis = PlaneBasis::from_normal(pts[0], vn)
            .ok_or_else(|| FaderError::Config(format!("polygon {} has no plane basis", name)))?;

        let boundary2d = pts.iter().map(|p| basis.project(*p)).collect();

        Ok(Self {
            name: name.to_string(),
            pts,
            vn,
            basis,
            boundary2d,
        })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.pts
    }

    pub fn basis(&self) -> &PlaneBasis {
        &self.basis
    }

    /// Returns the plane equation coefficients (a, b, c, d) such that
    /// a*x + b*y + c*z + d = 0 for all points on the plane.
    pub fn plane_coefficients(&self) -> (f64, f64, f64, f64) {
        let p0 = self.pts[0];
        let d = -(self.vn.dx * p0.x + self.vn.dy * p0.y + self.vn.dz * p0.z);
        (self.vn.dx, self.vn.dy, self.vn.dz, d)
    }

    /// Checks if a point lies inside the polygon.
    ///
    /// The point must lie on the polygon's plane. If `boundary_in` is true,
    /// points on the boundary (edges or vertices) are considered inside.
    pub fn is_point_inside(&self, ptest: Point, boundary_in: bool) -> bool {
        // Plane membership first
        let (a, b, c, d) = self.plane_coefficients();
        let dist = a * ptest.x + b * ptest.y + c * ptest.z + d;
        if dist.abs() > EPS {
            return false;
        }

        let (u, v) = self.basis.project(ptest);

        // Boundary check against each edge
        let n = self.boundary2d.len();
        for i in 0..n {
            let p1 = self.boundary2d[i];
            let p2 = self.boundary2d[(i + 1) % n];
            if point_on_segment_2d((u, v), p1, p2) {
                return boundary_in;
            }
        }

        // Even-odd crossing test in the plane's 2D coordinates
        let mut inside = false;
        for i in 0..n {
            let (u1, v1) = self.boundary2d[i];
            let (u2, v2) = self.boundary2d[(i + 1) % n];
            if (v1 > v) != (v2 > v) {
                let u_cross = u1 + (v - v1) / (v2 - v1) * (u2 - u1);
                if u < u_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon({}, {} vertices)", self.name, self.pts.len())
    }
}

/// Checks if a 2D point lies on the segment p1-p2 (within geometric precision).
fn point_on_segment_2d(p: (f64, f64), p1: (f64, f64), p2: (f64, f64)) -> bool {
    let (px, py) = p;
    let (x1, y1) = p1;
    let (x2, y2) = p2;

    let dx = x2 - x1;
    let dy = y2 - y1;
    let len_sq = dx * dx + dy * dy;
    if len_sq < EPS * EPS {
        return (px - x1).abs() < EPS && (py - y1).abs() < EPS;
    }

    let t = ((px - x1) * dx + (py - y1) * dy) / len_sq;
    if !(-EPS..=1.0 + EPS).contains(&t) {
        return false;
    }

    let cx = x1 + t * dx;
    let cy = y1 + t * dy;
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt() < EPS
}
