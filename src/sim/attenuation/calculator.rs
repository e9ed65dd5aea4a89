use std::collections::HashSet;
use std::fmt;

use log::debug;
use uuid::Uuid;

use crate::units::LengthUnit;
use crate::{Point, Result};

use super::config::AttenuationSettings;

/// Opaque identifier of one physical obstruction (one wall instance).
///
/// Two hits carrying the same id refer to the same wall, no matter which
/// of its faces the ray crossed. Used only for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObstructionId(String);

impl ObstructionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ObstructionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ObstructionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ObstructionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One ray/obstruction intersection reported by a geometry query.
#[derive(Debug, Clone)]
pub struct RayHit {
    /// The obstruction that was crossed.
    pub obstruction: ObstructionId,
    /// Distance from the segment start to the crossing, in native units.
    pub proximity: f64,
}

/// Answers ray-intersection queries against the obstruction geometry.
///
/// Implementations must report every obstruction surface crossed by the
/// ray starting at `start` and passing through `end`. The same obstruction
/// may appear more than once (a ray can graze a wall's geometry near an
/// edge); the calculator deduplicates. Results are pre-filtered to the
/// obstruction category the engine is configured for (walls), so no
/// dynamic kind check happens downstream.
pub trait GeometryQuery {
    fn intersections(&self, start: Point, end: Point) -> Result<Vec<RayHit>>;
}

/// Computes the signal attenuation of one source→target ray.
///
/// Losses come from two terms: distance through air (per metre) and a
/// fixed loss per distinct wall crossed.
pub struct AttenuationCalculator<'a, G: GeometryQuery> {
    geometry: &'a G,
    settings: AttenuationSettings,
    unit: LengthUnit,
}

impl<'a, G: GeometryQuery> AttenuationCalculator<'a, G> {
    /// Binds the calculator to a geometry query and a calibration snapshot.
    ///
    /// Fails with a configuration error when the calibration coefficients
    /// are unusable. The settings are copied and never mutated afterwards.
    pub fn new(geometry: &'a G, settings: AttenuationSettings, unit: LengthUnit) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            geometry,
            settings,
            unit,
        })
    }

    pub fn settings(&self) -> &AttenuationSettings {
        &self.settings
    }

    /// Returns the number of distinct walls crossed between the two points.
    ///
    /// Hits reported beyond the segment length are discarded (the query
    /// may follow infinite-ray semantics); hits exactly at the segment
    /// endpoint count. Repeated hits on the same wall count once.
    fn wall_count(&self, source: Point, target: Point, d: f64) -> Result<usize> {
        let hits = self.geometry.intersections(source, target)?;

        let mut walls: HashSet<ObstructionId> = HashSet::new();
        for hit in hits {
            if hit.proximity <= d {
                debug!("wall {} at {:.2}", hit.obstruction, hit.proximity);
                walls.insert(hit.obstruction);
            }
        }
        Ok(walls.len())
    }

    /// Calculates the signal attenuation [dB] between source and target.
    ///
    /// A degenerate ray (source == target) yields exactly 0: zero air
    /// path and no crossings. No direction vector is normalized before
    /// that case is handled, so there is no undefined-direction fault.
    pub fn attenuation(&self, source: Point, target: Point) -> Result<f64> {
        debug!("{:.2} -> {:.2}", source, target);

        let d = target.distance_to(&source);

        let mut a = self.unit.to_metres(d) * self.settings.air_per_metre_in_db;

        let wall_count = self.wall_count(source, target, d)?;

        a += wall_count as f64 * self.settings.wall_in_db;

        Ok(a)
    }
}
