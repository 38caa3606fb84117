//! Circles are drawn often enough that it's worth sampling the unit circle once, at a tenth of a
//! degree, and reusing those points.

use geom::{PolyLine, Pt2D};

/// Samples per degree
const CIRCLE_RESOLUTION: f64 = 10.0;

lazy_static::lazy_static! {
    /// (sin, cos) for every tenth of a degree in [0, 360]
    static ref CIRCLE_COORDS: Vec<(f64, f64)> = {
        let coords: Vec<(f64, f64)> = (0..=3600)
            .map(|idx| (idx as f64 / CIRCLE_RESOLUTION).to_radians().sin_cos())
            .collect();
        debug!("Cached {} points around the unit circle", coords.len());
        coords
    };
}

/// The index into the cache closest to some angle in degrees. Any angle works; the result wraps
/// around into [0, 3600).
pub fn angle_lookup(angle_deg: f64) -> usize {
    let num_coords = (CIRCLE_COORDS.len() - 1) as i64;
    let idx = (angle_deg * CIRCLE_RESOLUTION + 0.5).floor() as i64;
    idx.rem_euclid(num_coords) as usize
}

/// The point on the unit circle for an index from `angle_lookup`. 0 degrees is +Y and angles
/// increase towards +X.
pub fn unit_circle_point(idx: usize) -> (f64, f64) {
    CIRCLE_COORDS[idx]
}

/// A polygon approximating a circle, with `steps` sides. The first point is repeated at the end.
pub fn vertex_circle_around_position(center: Pt2D, radius: f64, steps: usize) -> PolyLine {
    let mut result = PolyLine::empty();
    if steps == 0 {
        return result;
    }
    let increment = 360.0 / (steps as f64);
    for step in 0..=steps {
        let (x, y) = unit_circle_point(angle_lookup(increment * (step as f64)));
        result.push(Pt2D::new(
            x * radius + center.x(),
            y * radius + center.y(),
        ));
    }
    result
}
