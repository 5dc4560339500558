// Re-export glam for convenience
pub use glam::*;

// LUX math types
mod interval;
mod ray;
mod vec;

pub use interval::Interval;
pub use ray::Ray;
pub use vec::{approx_eq, reflect, refract, EPSILON};
