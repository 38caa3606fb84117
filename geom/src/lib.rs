//! Basic 2D geometry used by the editor: points, angles, distances, line segments, and lenient
//! polylines with arclength queries.
//!
//! World-space is in meters, with Y increasing downwards (screen drawing order, not a Cartesian
//! grid).

pub use crate::angle::Angle;
pub use crate::circle::Circle;
pub use crate::distance::Distance;
pub use crate::line::{line_intersection, Line};
pub use crate::polyline::PolyLine;
pub use crate::pt::Pt2D;

mod angle;
mod circle;
mod distance;
mod line;
mod polyline;
mod pt;

// About 0.4 inches... which is quite tiny on the scale of things. :)
pub const EPSILON_DIST: Distance = Distance::const_meters(0.0001);

/// Reduce the precision of an f64. This helps ensure serialization is idempotent (everything is
/// exactly the same before and after saving/loading). Ideally we'd use some kind of proper
/// fixed-precision type instead of f64.
pub fn trim_f64(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
