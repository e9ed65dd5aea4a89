use std::fmt;

/// A coordinate in a surface's own 2D parametric domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvPoint {
    pub u: f64,
    pub v: f64,
}

impl UvPoint {
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}

impl fmt::Display for UvPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2);
        write!(f, "({:.prec$},{:.prec$})", self.u, self.v, prec = prec)
    }
}

/// Names the quantity a sampled field carries, for legend/display purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: String,
    pub description: String,
    pub unit_name: String,
}

impl FieldSchema {
    pub fn new(name: &str, description: &str, unit_name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            unit_name: unit_name.to_string(),
        }
    }

    /// The schema for signal attenuation results.
    pub fn attenuation() -> Self {
        Self::new("Attenuation", "Signal attenuation", "dB")
    }
}

/// Per-sample scalar values over a surface's parametric domain.
///
/// Domain points and values are kept as parallel lists in sampling order;
/// the order carries no meaning but is stable within one sampling pass.
/// The field is built by the sampler, handed to a visualization sink once
/// complete, and not retained afterwards.
#[derive(Debug, Clone, Default)]
pub struct SampledField {
    pub points: Vec<UvPoint>,
    pub values: Vec<f64>,
}

impl SampledField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: UvPoint, value: f64) {
        self.points.push(point);
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UvPoint, &f64)> {
        self.points.iter().zip(self.values.iter())
    }

    /// Returns the (min, max) of the sampled values, or `None` for an
    /// empty field.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        if self.values.is_empty() {
            return None;
        }
        let min = self.values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = self
            .values
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}
