//! Glint math: vectors, intervals and the small vector helpers the tracer
//! needs on top of glam.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod vector;

pub use interval::Interval;
pub use vector::{near_zero, reflect, refract, NEAR_ZERO_EPSILON};
