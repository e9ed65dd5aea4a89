pub mod point;
pub mod polygon;
pub mod projection;
pub mod ray;
pub mod vector;

/// Geometric precision
pub(crate) const EPS: f64 = 1e-9;
