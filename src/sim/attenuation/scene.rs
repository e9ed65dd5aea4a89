//! In-crate geometry collaborators.
//!
//! [`WallScene`] answers obstruction queries against a set of wall
//! polygons, and [`PlanarFace`] exposes a planar polygon as a bounded
//! sampling surface. A host application with its own geometry kernel
//! would implement [`GeometryQuery`] and
//! [`SurfaceGeometry`](super::sampler::SurfaceGeometry) instead.

use crate::geom::ray::Ray;
use crate::{Point, Polygon, Result, Vector};

use super::calculator::{GeometryQuery, ObstructionId, RayHit};
use super::sampler::{BoundingBoxUv, SurfaceGeometry};

/// One physical wall, possibly exposing several polygons (both faces of
/// a thick wall, or segments of a bent wall). All polygons share the
/// wall's id, so a ray crossing two faces still counts one wall.
#[derive(Debug, Clone)]
pub struct Wall {
    pub id: ObstructionId,
    pub name: String,
    polygons: Vec<Polygon>,
}

impl Wall {
    pub fn new(name: &str, polygons: Vec<Polygon>) -> Self {
        Self {
            id: ObstructionId::new(),
            name: name.to_string(),
            polygons,
        }
    }

    /// Builds a vertical single-face wall from a 2D footprint segment
    /// (x1, y1) -> (x2, y2) extruded to the given height.
    pub fn vertical(name: &str, x1: f64, y1: f64, x2: f64, y2: f64, height: f64) -> Result<Self> {
        let pts = vec![
            Point::new(x1, y1, 0.0),
            Point::new(x2, y2, 0.0),
            Point::new(x2, y2, height),
            Point::new(x1, y1, height),
        ];
        let polygon = Polygon::new(name, pts)?;
        Ok(Self::new(name, vec![polygon]))
    }

    /// Builds a vertical wall with two parallel faces separated by the
    /// given thickness. A ray passing through the wall crosses both
    /// faces; both hits carry the same obstruction id.
    pub fn vertical_thick(
        name: &str,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        height: f64,
        thickness: f64,
    ) -> Result<Self> {
        // In-plane normal of the footprint segment
        let along = Vector::new(x2 - x1, y2 - y1, 0.0);
        let n = Vector::new(0.0, 0.0, 1.0).cross(&along).normalize().ok_or_else(|| {
            crate::FaderError::Config(format!("wall {name} footprint has zero length"))
        })?;
        let half = n * (thickness / 2.0);

        let face = |sign: f64, suffix: &str| -> Result<Polygon> {
            let o = half * sign;
            let pts = vec![
                Point::new(x1 + o.dx, y1 + o.dy, 0.0),
                Point::new(x2 + o.dx, y2 + o.dy, 0.0),
                Point::new(x2 + o.dx, y2 + o.dy, height),
                Point::new(x1 + o.dx, y1 + o.dy, height),
            ];
            Polygon::new(&format!("{name}/{suffix}"), pts)
        };

        let polygons = vec![face(1.0, "a")?, face(-1.0, "b")?];
        Ok(Self::new(name, polygons))
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }
}

/// Obstruction geometry made of wall polygons.
///
/// The scene holds walls only, so query results are pre-filtered to the
/// obstruction category the calculator expects; no kind check happens at
/// query time.
#[derive(Debug, Clone, Default)]
pub struct WallScene {
    walls: Vec<Wall>,
}

impl WallScene {
    pub fn new(walls: Vec<Wall>) -> Self {
        Self { walls }
    }

    pub fn add_wall(&mut self, wall: Wall) {
        self.walls.push(wall);
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }
}

impl GeometryQuery for WallScene {
    /// Reports every wall face crossed by the ray from `start` through
    /// `end`. The ray extends to infinity past `end` (the caller applies
    /// the segment bound); a zero-length segment yields no hits.
    fn intersections(&self, start: Point, end: Point) -> Result<Vec<RayHit>> {
        let Some(ray) = Ray::from_points(start, end) else {
            return Ok(vec![]);
        };

        let mut hits = Vec::new();
        for wall in &self.walls {
            for polygon in &wall.polygons {
                if let Some((t, _)) = ray.intersect_polygon(polygon) {
                    hits.push(RayHit {
                        obstruction: wall.id.clone(),
                        proximity: t,
                    });
                }
            }
        }
        Ok(hits)
    }
}

/// A planar polygon exposed as a bounded sampling surface.
///
/// The parametric domain is the polygon's plane basis; the trimmed
/// boundary is the polygon itself, so a non-convex face trims away the
/// parts of its bounding box that lie outside.
#[derive(Debug, Clone)]
pub struct PlanarFace {
    polygon: Polygon,
}

impl PlanarFace {
    pub fn new(polygon: Polygon) -> Self {
        Self { polygon }
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }
}

impl SurfaceGeometry for PlanarFace {
    fn bounding_box_uv(&self) -> Result<BoundingBoxUv> {
        let basis = self.polygon.basis();
        let mut u_min = f64::INFINITY;
        let mut u_max = f64::NEG_INFINITY;
        let mut v_min = f64::INFINITY;
        let mut v_max = f64::NEG_INFINITY;

        for pt in self.polygon.vertices() {
            let (u, v) = basis.project(*pt);
            u_min = u_min.min(u);
            u_max = u_max.max(u);
            v_min = v_min.min(v);
            v_max = v_max.max(v);
        }

        Ok(BoundingBoxUv {
            u_min,
            u_max,
            v_min,
            v_max,
        })
    }

    fn is_inside(&self, u: f64, v: f64) -> bool {
        let pt = self.polygon.basis().unproject(u, v);
        self.polygon.is_point_inside(pt, true)
    }

    fn evaluate(&self, u: f64, v: f64) -> Point {
        self.polygon.basis().unproject(u, v)
    }

    fn normal(&self) -> Vector {
        self.polygon.vn
    }
}
