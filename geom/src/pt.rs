use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{trim_f64, Angle, Distance};

/// This represents world-space in meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pt2D {
    x: f64,
    y: f64,
}

impl Pt2D {
    pub fn new(x: f64, y: f64) -> Pt2D {
        if !x.is_finite() || !y.is_finite() {
            panic!("Bad Pt2D {}, {}", x, y);
        }

        Pt2D {
            x: trim_f64(x),
            y: trim_f64(y),
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// True if both coordinates are within `threshold` of the other point's. This is a box test,
    /// not a circle.
    pub fn approx_eq(self, other: Pt2D, threshold: Distance) -> bool {
        let t = threshold.inner_meters();
        (self.x - other.x).abs() < t && (self.y - other.y).abs() < t
    }

    pub fn project_away(self, dist: Distance, theta: Angle) -> Pt2D {
        // If negative, caller should use theta.opposite()
        assert!(dist >= Distance::ZERO);

        let (sin, cos) = theta.normalized_radians().sin_cos();
        Pt2D::new(
            self.x() + dist.inner_meters() * cos,
            self.y() + dist.inner_meters() * sin,
        )
    }

    pub fn angle_to(self, to: Pt2D) -> Angle {
        // DON'T invert y here
        Angle::new_rads((to.y() - self.y()).atan2(to.x() - self.x()))
    }

    /// The 2D Euclidean distance.
    pub fn dist_to(self, to: Pt2D) -> Distance {
        Distance::meters(self.raw_dist_to(to))
    }

    pub(crate) fn raw_dist_to(self, to: Pt2D) -> f64 {
        ((self.x() - to.x()).powi(2) + (self.y() - to.y()).powi(2)).sqrt()
    }

    /// Avoids the square root, for cheap hit-testing.
    pub fn dist_squared_to(self, to: Pt2D) -> f64 {
        (self.x() - to.x()).powi(2) + (self.y() - to.y()).powi(2)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Pt2D {
        Pt2D::new(self.x() + dx, self.y() + dy)
    }

    /// Rotates around the origin.
    pub fn rotate(self, angle: Angle) -> Pt2D {
        let (sin, cos) = angle.normalized_radians().sin_cos();
        Pt2D::new(
            self.x() * cos - self.y() * sin,
            self.x() * sin + self.y() * cos,
        )
    }

    /// Moves this point towards (or away from, when `factor` > 1) `center`.
    pub fn scale_around(self, center: Pt2D, factor: f64) -> Pt2D {
        Pt2D::new(
            center.x() + (self.x() - center.x()) * factor,
            center.y() + (self.y() - center.y()) * factor,
        )
    }
}

impl fmt::Display for Pt2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pt2D({0}, {1})", self.x(), self.y())
    }
}
