use rerun as rr;

use crate::sim::attenuation::field::{FieldSchema, SampledField};
use crate::sim::attenuation::sampler::SurfaceGeometry;
use crate::sim::attenuation::session::VisualizationSink;
use crate::{Point, Result};

const SESSION_NAME: &str = "Fader3d";

/// Rerun-backed visualization sink.
///
/// Evaluates each field point back to 3D on its face and logs one colored
/// point per sample. Colors follow the attenuation legend: green for the
/// lowest loss in the field, red for the highest.
pub struct RerunSink {
    session: rr::RecordingStream,
    point_radius: f32,
}

impl RerunSink {
    pub fn new(session: rr::RecordingStream) -> Self {
        Self {
            session,
            point_radius: 0.25,
        }
    }

    pub fn with_point_radius(mut self, radius: f32) -> Self {
        self.point_radius = radius;
        self
    }
}

impl VisualizationSink for RerunSink {
    fn publish<F: SurfaceGeometry>(
        &mut self,
        face_name: &str,
        face: &F,
        schema: &FieldSchema,
        field: &SampledField,
    ) -> Result<()> {
        if field.is_empty() {
            return Ok(());
        }

        // value_range is Some for a non-empty field
        let (min, max) = field.value_range().unwrap_or((0.0, 1.0));
        let span = if (max - min).abs() < 1e-12 {
            1.0
        } else {
            max - min
        };

        let mut pts: Vec<Point> = Vec::with_capacity(field.len());
        let mut colors: Vec<rr::Color> = Vec::with_capacity(field.len());
        let mut radii: Vec<f32> = Vec::with_capacity(field.len());
        let mut labels: Vec<String> = Vec::with_capacity(field.len());

        for (pt, value) in field.iter() {
            pts.push(face.evaluate(pt.u, pt.v));
            let t = ((value - min) / span).clamp(0.0, 1.0) as f32;
            let (r, g, b) = attenuation_color(t);
            colors.push(rr::Color(rr::Rgba32::from_linear_unmultiplied_rgba_f32(
                r, g, b, 1.0,
            )));
            radii.push(self.point_radius);
            labels.push(format!("{:.1} {}", value, schema.unit_name));
        }

        let name = format!("{}/{}/{}", SESSION_NAME, schema.name, face_name);
        self.session
            .log_static(
                name,
                &rr::Points3D::new(pts)
                    .with_radii(radii)
                    .with_colors(colors)
                    .with_labels(labels),
            )
            .map_err(anyhow::Error::from)?;

        Ok(())
    }
}

/// Maps a normalized value (0-1) to the green-yellow-red legend ramp.
fn attenuation_color(t: f32) -> (f32, f32, f32) {
    if t < 0.5 {
        // Green to yellow
        let s = t * 2.0;
        (s, 1.0, 0.0)
    } else {
        // Yellow to red
        let s = (t - 0.5) * 2.0;
        (1.0, 1.0 - s, 0.0)
    }
}
