use log::debug;

use crate::{Point, Result};

use super::calculator::{AttenuationCalculator, GeometryQuery};
use super::field::{FieldSchema, SampledField};
use super::sampler::{SamplerConfig, SurfaceGeometry, sample_face};

/// Receives a completed field for rendering or registration.
///
/// Called exactly once per sampling pass, after the field is fully
/// assembled; there is no incremental delivery. A sink failure fails the
/// whole pass.
pub trait VisualizationSink {
    fn publish<F: SurfaceGeometry>(
        &mut self,
        face_name: &str,
        face: &F,
        schema: &FieldSchema,
        field: &SampledField,
    ) -> Result<()>;
}

/// One sampling pass: samples a face and hands the field to the sink.
///
/// The session owns the sink and the result schema for its lifetime and
/// is discarded after the sink acknowledges the field, so no state leaks
/// across invocations.
pub struct PaintSession<S: VisualizationSink> {
    sink: S,
    schema: FieldSchema,
}

impl<S: VisualizationSink> PaintSession<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            schema: FieldSchema::attenuation(),
        }
    }

    pub fn with_schema(sink: S, schema: FieldSchema) -> Self {
        Self { sink, schema }
    }

    /// Calculates the attenuation field on the given face and publishes
    /// it. Returns the field so callers can inspect it as well.
    pub fn paint_face<F: SurfaceGeometry, G: GeometryQuery>(
        &mut self,
        face_name: &str,
        face: &F,
        source: Point,
        calc: &AttenuationCalculator<G>,
        config: &SamplerConfig,
    ) -> Result<SampledField> {
        let field = sample_face(face, source, calc, config)?;
        debug!("painting {} samples on {}", field.len(), face_name);

        self.sink.publish(face_name, face, &self.schema, &field)?;
        Ok(field)
    }

    /// Consumes the session, returning the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// In-memory sink for tests and headless use.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub published: Vec<(String, FieldSchema, SampledField)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VisualizationSink for MemorySink {
    fn publish<F: SurfaceGeometry>(
        &mut self,
        face_name: &str,
        _face: &F,
        schema: &FieldSchema,
        field: &SampledField,
    ) -> Result<()> {
        self.published
            .push((face_name.to_string(), schema.clone(), field.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::attenuation::config::AttenuationSettings;
    use crate::sim::attenuation::scene::{PlanarFace, Wall, WallScene};
    use crate::units::LengthUnit;
    use crate::{FaderError, Polygon};

    fn floor_face() -> Result<PlanarFace> {
        let pts = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(10.0, 0.0, 0.0),
            Point::new(10.0, 10.0, 0.0),
            Point::new(0.0, 10.0, 0.0),
        ];
        Ok(PlanarFace::new(Polygon::new("floor", pts)?))
    }

    #[test]
    fn test_paint_publishes_once() -> Result<()> {
        let scene = WallScene::default();
        let calc =
            AttenuationCalculator::new(&scene, AttenuationSettings::default(), LengthUnit::Feet)?;
        let face = floor_face()?;

        let mut session = PaintSession::new(MemorySink::new());
        let field = session.paint_face(
            "floor",
            &face,
            Point::new(5.0, 5.0, 0.0),
            &calc,
            &SamplerConfig::new(),
        )?;

        let sink = session.into_sink();
        assert_eq!(sink.published.len(), 1);

        let (name, schema, published) = &sink.published[0];
        assert_eq!(name, "floor");
        assert_eq!(schema.name, "Attenuation");
        assert_eq!(schema.unit_name, "dB");
        assert_eq!(published.len(), field.len());
        Ok(())
    }

    #[test]
    fn test_sink_failure_fails_pass() -> Result<()> {
        struct BrokenSink;
        impl VisualizationSink for BrokenSink {
            fn publish<F: SurfaceGeometry>(
                &mut self,
                _face_name: &str,
                _face: &F,
                _schema: &FieldSchema,
                _field: &SampledField,
            ) -> Result<()> {
                Err(anyhow::anyhow!("sink connection lost").into())
            }
        }

        let scene = WallScene::default();
        let calc =
            AttenuationCalculator::new(&scene, AttenuationSettings::default(), LengthUnit::Feet)?;
        let face = floor_face()?;

        let mut session = PaintSession::new(BrokenSink);
        let result = session.paint_face(
            "floor",
            &face,
            Point::new(5.0, 5.0, 0.0),
            &calc,
            &SamplerConfig::new(),
        );
        assert!(matches!(result, Err(FaderError::Geometry(_))));
        Ok(())
    }

    #[test]
    fn test_query_failure_publishes_nothing() -> Result<()> {
        use std::cell::Cell;

        use crate::sim::attenuation::calculator::RayHit;

        // Query dies partway through the grid: the pass fails and the
        // sink never sees a partial field.
        struct FlakyScene {
            remaining: Cell<usize>,
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

        let scene = FlakyScene {
            remaining: Cell::new(5),
        };
        let calc =
            AttenuationCalculator::new(&scene, AttenuationSettings::default(), LengthUnit::Feet)?;
        let face = floor_face()?;

        let mut session = PaintSession::new(MemorySink::new());
        let result = session.paint_face(
            "floor",
            &face,
            Point::new(-1.0, -1.0, 0.0),
            &calc,
            &SamplerConfig::new(),
        );
        assert!(matches!(result, Err(FaderError::Geometry(_))));
        assert!(session.into_sink().published.is_empty());
        Ok(())
    }

    #[test]
    fn test_session_with_walls() -> Result<()> {
        // A wall across the middle of the floor: samples beyond it lose
        // more than samples on the source side.
        let wall = Wall::vertical("middle", 0.0, 5.0, 10.0, 5.0, 20.0)?;
        let scene = WallScene::new(vec![wall]);
        let calc =
            AttenuationCalculator::new(&scene, AttenuationSettings::default(), LengthUnit::Feet)?;
        let face = floor_face()?;

        let mut session = PaintSession::new(MemorySink::new());
        let field = session.paint_face(
            "floor",
            &face,
            Point::new(5.0, 0.0, 0.0),
            &calc,
            &SamplerConfig::new(),
        )?;

        assert_eq!(field.len(), 36);

        // Compare the sample at (u=5, v) nearest the source with the one
        // straight across the wall.
        let mut near = None;
        let mut far = None;
        for (pt, val) in field.iter() {
            if (pt.u - 4.0).abs() < 1e-9 && (pt.v - 4.0).abs() < 1e-9 {
                near = Some(*val);
            }
            if (pt.u - 4.0).abs() < 1e-9 && (pt.v - 6.0).abs() < 1e-9 {
                far = Some(*val);
            }
        }
        let (near, far) = (near.unwrap(), far.unwrap());
        assert!(far > near + 2.9, "wall should add ~3 dB: {near} vs {far}");
        Ok(())
    }
}
