//! Signal attenuation simulation.
//!
//! Estimates how much a radio/acoustic signal weakens between a source
//! point and targets spread over a building surface. The model is
//! deliberately simple: loss per metre of air path plus a fixed loss per
//! distinct wall crossed by the straight source→target ray. Reflection,
//! diffraction and frequency dependence are out of scope.
//!
//! Pipeline: [`sampler::sample_face`] walks a uniform grid over a face's
//! parametric domain, calls [`calculator::AttenuationCalculator`] once per
//! in-bounds point, and a [`session::PaintSession`] hands the assembled
//! field to a visualization sink.

pub mod calculator;
pub mod config;
pub mod field;
pub mod sampler;
pub mod scene;
pub mod session;

pub use calculator::{AttenuationCalculator, GeometryQuery, ObstructionId, RayHit};
pub use config::AttenuationSettings;
pub use field::{FieldSchema, SampledField, UvPoint};
pub use sampler::{BoundingBoxUv, SamplerConfig, SurfaceGeometry, sample_face};
pub use scene::{PlanarFace, Wall, WallScene};
pub use session::{MemorySink, PaintSession, VisualizationSink};
