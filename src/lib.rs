pub mod draw;
pub mod error;
pub mod geom;
pub mod sim;
pub mod units;

// Prelude
pub use error::{FaderError, Result};
pub use geom::point::Point;
pub use geom::polygon::Polygon;
pub use geom::vector::Vector;
pub use sim::attenuation::calculator::{
    AttenuationCalculator, GeometryQuery, ObstructionId, RayHit,
};
pub use sim::attenuation::config::AttenuationSettings;
pub use sim::attenuation::field::{FieldSchema, SampledField, UvPoint};
pub use sim::attenuation::sampler::{BoundingBoxUv, SamplerConfig, SurfaceGeometry, sample_face};
pub use sim::attenuation::scene::{PlanarFace, Wall, WallScene};
pub use sim::attenuation::session::{MemorySink, PaintSession, VisualizationSink};
pub use units::LengthUnit;
