use log::debug;

use crate::geom::EPS;
use crate::{FaderError, Point, Result, Vector};

use super::calculator::{AttenuationCalculator, GeometryQuery};
use super::field::{SampledField, UvPoint};

/// Parametric bounding box of a bounded surface.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBoxUv {
    pub u_min: f64,
    pub u_max: f64,
    pub v_min: f64,
    pub v_max: f64,
}

impl BoundingBoxUv {
    pub fn width(&self) -> f64 {
        self.u_max - self.u_min
    }

    pub fn height(&self) -> f64 {
        self.v_max - self.v_min
    }
}

/// Answers surface-evaluation queries for one bounded surface.
///
/// A bounding box may cover points outside an irregularly trimmed face,
/// so `is_inside` must reject those; `evaluate` maps in-bounds parameters
/// to 3D world coordinates.
pub trait SurfaceGeometry {
    fn bounding_box_uv(&self) -> Result<BoundingBoxUv>;
    fn is_inside(&self, u: f64, v: f64) -> bool;
    fn evaluate(&self, u: f64, v: f64) -> Point;
    /// Unit normal of the surface, along which sample points are offset.
    fn normal(&self) -> Vector;
}

/// Configuration for sampling a surface.
#[derive(Debug, Clone, Copy)]
pub struct SamplerConfig {
    /// Number of grid steps per axis. The grid has `resolution + 1`
    /// candidate points per axis, inclusive of both edges: corner and
    /// edge coverage is preferred over precise uniform spacing.
    pub resolution: usize,
    /// Offset applied to source and sample points along the surface
    /// normal, in native length units. Keeps the cast rays from grazing
    /// the sampling surface itself.
    pub offset_height: f64,
}

impl SamplerConfig {
    pub fn new() -> Self {
        Self {
            resolution: 5,
            offset_height: 5.0,
        }
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Samples the attenuation field over a bounded surface.
///
/// Walks the full Cartesian grid of `(resolution + 1)^2` candidate points
/// over the surface's parametric bounding box, skips points outside the
/// trimmed boundary, and evaluates the calculator for the rest. Values
/// are appended in enumeration order (u outer, v inner).
///
/// Fails with an invalid-surface error when the bounding box is
/// degenerate. An empty field (no candidate inside the trimmed region)
/// is a valid outcome, not an error. Any calculator failure fails the
/// whole pass; no partial field is returned.
pub fn sample_face<F: SurfaceGeometry, G: GeometryQuery>(
    face: &F,
    source: Point,
    calc: &AttenuationCalculator<G>,
    config: &SamplerConfig,
) -> Result<SampledField> {
    if config.resolution == 0 {
        return Err(FaderError::Config(
            "sampler resolution must be positive".to_string(),
        ));
    }

    let bb = face.bounding_box_uv()?;
    if bb.width() <= EPS || bb.height() <= EPS {
        return Err(FaderError::InvalidSurface(format!(
            "degenerate parametric bounding box: {:.3} x {:.3}",
            bb.width(),
            bb.height()
        )));
    }

    let u_step = bb.width() / config.resolution as f64;
    let v_step = bb.height() / config.resolution as f64;

    let offset = face.normal() * config.offset_height;
    let source_offset = source + offset;

    let mut field = SampledField::new();

    // Integer-indexed loops keep the candidate count at (resolution + 1)^2
    // regardless of rounding; the last index is clamped onto the box edge
    // so both endpoints are exact.
    for i in 0..=config.resolution {
        let u = if i == config.resolution {
            bb.u_max
        } else {
            bb.u_min + i as f64 * u_step
        };
        for j in 0..=config.resolution {
            let v = if j == config.resolution {
                bb.v_max
            } else {
                bb.v_min + j as f64 * v_step
            };

            if !face.is_inside(u, v) {
                continue;
            }

            let target = face.evaluate(u, v) + offset;
            let value = calc.attenuation(source_offset, target)?;

            field.push(UvPoint::new(u, v), value);
        }
    }

    debug!(
        "sampled {} of {} candidate points",
        field.len(),
        (config.resolution + 1) * (config.resolution + 1)
    );

    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::attenuation::calculator::RayHit;
    use crate::sim::attenuation::config::AttenuationSettings;
    use crate::units::LengthUnit;

    /// Flat horizontal face at z = 0 with a rectangular parametric domain
    /// and a pluggable trim predicate.
    struct FakeFace {
        bb: BoundingBoxUv,
        trim: fn(f64, f64) -> bool,
    }

    impl FakeFace {
        fn square_10() -> Self {
            Self {
                bb: BoundingBoxUv {
                    u_min: 0.0,
                    u_max: 10.0,
                    v_min: 0.0,
                    v_max: 10.0,
                },
                trim: |_, _| true,
            }
        }
    }

    impl SurfaceGeometry for FakeFace {
        fn bounding_box_uv(&self) -> Result<BoundingBoxUv> {
            Ok(self.bb)
        }

        fn is_inside(&self, u: f64, v: f64) -> bool {
            (self.trim)(u, v)
        }

        fn evaluate(&self, u: f64, v: f64) -> Point {
            Point::new(u, v, 0.0)
        }

        fn normal(&self) -> Vector {
            Vector::new(0.0, 0.0, 1.0)
        }
    }

    /// Scene with no obstructions.
    struct EmptyScene;

    impl GeometryQuery for EmptyScene {
        fn intersections(&self, _start: Point, _end: Point) -> Result<Vec<RayHit>> {
            Ok(vec![])
        }
    }

    fn calc(scene: &EmptyScene) -> AttenuationCalculator<'_, EmptyScene> {
        AttenuationCalculator::new(scene, AttenuationSettings::default(), LengthUnit::Feet)
            .unwrap()
    }

    #[test]
    fn test_full_grid_sample_count() -> Result<()> {
        let face = FakeFace::square_10();
        let scene = EmptyScene;
        let calc = calc(&scene);

        let field = sample_face(&face, Point::new(0., 0., 0.), &calc, &SamplerConfig::new())?;

        // Resolution 5 over [0, 10]^2: 36 samples at u, v in {0, 2, .., 10}
        assert_eq!(field.len(), 36);
        for (pt, _) in field.iter() {
            let u_ok = [0.0, 2.0, 4.0, 6.0, 8.0, 10.0]
                .iter()
                .any(|x| (pt.u - x).abs() < 1e-12);
            let v_ok = [0.0, 2.0, 4.0, 6.0, 8.0, 10.0]
                .iter()
                .any(|x| (pt.v - x).abs() < 1e-12);
            assert!(u_ok && v_ok, "unexpected sample point {pt}");
        }
        Ok(())
    }

    #[test]
    fn test_enumeration_order_stable() -> Result<()> {
        let face = FakeFace::square_10();
        let scene = EmptyScene;
        let calc = calc(&scene);

        let f1 = sample_face(&face, Point::new(0., 0., 0.), &calc, &SamplerConfig::new())?;
        let f2 = sample_face(&face, Point::new(0., 0., 0.), &calc, &SamplerConfig::new())?;

        assert_eq!(f1.points, f2.points);
        assert_eq!(f1.values, f2.values);
        // u is the outer loop
        assert_eq!(f1.points[0], UvPoint::new(0.0, 0.0));
        assert_eq!(f1.points[1], UvPoint::new(0.0, 2.0));
        assert_eq!(f1.points[6], UvPoint::new(2.0, 0.0));
        Ok(())
    }

    #[test]
    fn test_degenerate_bounding_box() {
        let face = FakeFace {
            bb: BoundingBoxUv {
                u_min: 3.0,
                u_max: 3.0,
                v_min: 0.0,
                v_max: 10.0,
            },
            trim: |_, _| true,
        };
        let scene = EmptyScene;
        let calc = calc(&scene);

        let result = sample_face(&face, Point::new(0., 0., 0.), &calc, &SamplerConfig::new());
        assert!(matches!(result, Err(FaderError::InvalidSurface(_))));
    }

    #[test]
    fn test_trimmed_face_skips_outside_points() -> Result<()> {
        let face = FakeFace {
            bb: BoundingBoxUv {
                u_min: 0.0,
                u_max: 10.0,
                v_min: 0.0,
                v_max: 10.0,
            },
            trim: |u, _| u < 5.0,
        };
        let scene = EmptyScene;
        let calc = calc(&scene);

        let field = sample_face(&face, Point::new(0., 0., 0.), &calc, &SamplerConfig::new())?;

        // u in {0, 2, 4} survives: 3 columns x 6 rows
        assert_eq!(field.len(), 18);
        Ok(())
    }

    #[test]
    fn test_everything_trimmed_gives_empty_field() -> Result<()> {
        let face = FakeFace {
            bb: BoundingBoxUv {
                u_min: 0.0,
                u_max: 10.0,
                v_min: 0.0,
                v_max: 10.0,
            },
            trim: |_, _| false,
        };
        let scene = EmptyScene;
        let calc = calc(&scene);

        let field = sample_face(&face, Point::new(0., 0., 0.), &calc, &SamplerConfig::new())?;
        assert!(field.is_empty());
        Ok(())
    }

    #[test]
    fn test_sub_tolerance_bounding_box_is_degenerate() {
        // Narrower than the geometric tolerance, wider than machine epsilon.
        let face = FakeFace {
            bb: BoundingBoxUv {
                u_min: 0.0,
                u_max: 1e-12,
                v_min: 0.0,
                v_max: 10.0,
            },
            trim: |_, _| true,
        };
        let scene = EmptyScene;
        let calc = calc(&scene);

        let result = sample_face(&face, Point::new(0., 0., 0.), &calc, &SamplerConfig::new());
        assert!(matches!(result, Err(FaderError::InvalidSurface(_))));
    }

    #[test]
    fn test_grid_edges_land_exactly_on_bounds() -> Result<()> {
        // Box extents whose step does not divide evenly in binary.
        let face = FakeFace {
            bb: BoundingBoxUv {
                u_min: 0.0,
                u_max: 0.3,
                v_min: 0.0,
                v_max: 0.7,
            },
            trim: |_, _| true,
        };
        let scene = EmptyScene;
        let calc = calc(&scene);

        let config = SamplerConfig {
            resolution: 3,
            offset_height: 5.0,
        };
        let field = sample_face(&face, Point::new(0., 0., 0.), &calc, &config)?;

        let last = field.points.last().unwrap();
        assert_eq!(last.u, 0.3);
        assert_eq!(last.v, 0.7);
        Ok(())
    }

    #[test]
    fn test_query_failure_mid_pass_fails_whole_pass() {
        // Query succeeds for the first rays, then dies; no partial field
        // may escape.
        struct FlakyScene {
            remaining: std::cell::Cell<usize>,
        }

        impl GeometryQuery for FlakyScene {
            fn intersections(&self, _start: Point, _end: Point) -> Result<Vec<RayHit>> {
                if self.remaining.get() == 0 {
                    return Err(anyhow::anyhow!("scene query connection lost").into());
                }
                self.remaining.set(self.remaining.get() - 1);
                Ok(vec![])
            }
        }

        let face = FakeFace::square_10();
        let scene = FlakyScene {
            remaining: std::cell::Cell::new(3),
        };
        let calc =
            AttenuationCalculator::new(&scene, AttenuationSettings::default(), LengthUnit::Feet)
                .unwrap();

        let result = sample_face(&face, Point::new(-1., -1., 0.), &calc, &SamplerConfig::new());
        assert!(matches!(result, Err(FaderError::Geometry(_))));
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let face = FakeFace::square_10();
        let scene = EmptyScene;
        let calc = calc(&scene);

        let config = SamplerConfig {
            resolution: 0,
            offset_height: 5.0,
        };
        let result = sample_face(&face, Point::new(0., 0., 0.), &calc, &config);
        assert!(matches!(result, Err(FaderError::Config(_))));
    }

    #[test]
    fn test_offset_applied_to_both_endpoints() -> Result<()> {
        // With the source directly under a corner sample at the offset
        // height, the offset ray is horizontal and air loss reflects the
        // in-plane distance only.
        let face = FakeFace::square_10();
        let scene = EmptyScene;
        let calc = AttenuationCalculator::new(
            &scene,
            AttenuationSettings::new(0.0, 1.0),
            LengthUnit::Metres,
        )?;

        let field = sample_face(&face, Point::new(0., 0., 0.), &calc, &SamplerConfig::new())?;
        // First sample is at (0, 0): offset source (0,0,5), target (0,0,5)
        assert!((field.values[0] - 0.0).abs() < 1e-12);
        // Sample at (0, 2): distance 2 in the plane
        assert!((field.values[1] - 2.0).abs() < 1e-12);
        Ok(())
    }
}
