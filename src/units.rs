//! Length-unit handling.
//!
//! The attenuation formula works in decibels per metre, but geometry
//! collaborators report distances in their own native unit (building
//! models commonly use feet). Conversion happens once per ray, at the
//! point where the air-path loss is computed.

const INCH_TO_MM: f64 = 25.4;
const FOOT_TO_MM: f64 = 12.0 * INCH_TO_MM;

/// Metres per foot (0.3048 exactly).
pub const FOOT_TO_METRE: f64 = FOOT_TO_MM * 0.001;

/// Native length unit of a geometry collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthUnit {
    /// Imperial feet, the internal unit of the original host geometry.
    #[default]
    Feet,
    /// SI metres; no conversion applied.
    Metres,
}

impl LengthUnit {
    /// Converts a length in this unit to metres.
    pub fn to_metres(&self, length: f64) -> f64 {
        match self {
            LengthUnit::Feet => length * FOOT_TO_METRE,
            LengthUnit::Metres => length,
        }
    }
}
