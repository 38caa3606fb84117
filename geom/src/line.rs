use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::{Angle, Distance, Pt2D, EPSILON_DIST};

/// A line segment.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
pub struct Line(pub(crate) Pt2D, pub(crate) Pt2D);

impl Line {
    /// Creates a line segment between two points, which must not be the same
    pub fn new(pt1: Pt2D, pt2: Pt2D) -> Result<Line> {
        if pt1.dist_to(pt2) <= EPSILON_DIST {
            bail!("Line from {:?} to {:?} too small", pt1, pt2);
        }
        Ok(Line(pt1, pt2))
    }

    pub fn pt1(&self) -> Pt2D {
        self.0
    }

    pub fn pt2(&self) -> Pt2D {
        self.1
    }

    pub fn length(&self) -> Distance {
        self.pt1().dist_to(self.pt2())
    }

    pub fn angle(&self) -> Angle {
        self.pt1().angle_to(self.pt2())
    }

    /// Perpendicular offset of the whole segment. Positive goes to the right of the direction
    /// of travel (remember Y points down), negative to the left.
    pub fn shift_either_direction(&self, width: f64) -> Line {
        let angle = self.angle().rotate_degs(90.0);
        let dist = Distance::meters(width.abs());
        let angle = if width >= 0.0 { angle } else { angle.opposite() };
        Line(
            self.pt1().project_away(dist, angle),
            self.pt2().project_away(dist, angle),
        )
    }

    /// Returns a point along the line, clamped to the segment.
    pub fn dist_along(&self, dist: Distance) -> Pt2D {
        let percent = dist.safe_percent(self.length()).clamp(0.0, 1.0);
        self.percent_along(percent)
    }

    pub fn percent_along(&self, percent: f64) -> Pt2D {
        Pt2D::new(
            self.pt1().x() + percent * (self.pt2().x() - self.pt1().x()),
            self.pt1().y() + percent * (self.pt2().y() - self.pt1().y()),
        )
    }

    /// The distance along this segment of the point closest to `pt`, in [0, length].
    pub fn dist_along_of_nearest(&self, pt: Pt2D) -> Distance {
        let dx = self.pt2().x() - self.pt1().x();
        let dy = self.pt2().y() - self.pt1().y();
        let len_squared = dx * dx + dy * dy;
        let u = ((pt.x() - self.pt1().x()) * dx + (pt.y() - self.pt1().y()) * dy) / len_squared;
        self.length() * u.clamp(0.0, 1.0)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Line::new(")?;
        writeln!(f, "  Pt2D::new({}, {}),", self.0.x(), self.0.y())?;
        writeln!(f, "  Pt2D::new({}, {}),", self.1.x(), self.1.y())?;
        write!(f, ")")
    }
}

/// Intersection of the infinite lines through both segments. None if they're parallel.
pub fn line_intersection(l1: &Line, l2: &Line) -> Option<Pt2D> {
    let x1 = l1.pt1().x();
    let y1 = l1.pt1().y();
    let x2 = l1.pt2().x();
    let y2 = l1.pt2().y();

    let x3 = l2.pt1().x();
    let y3 = l2.pt1().y();
    let x4 = l2.pt2().x();
    let y4 = l2.pt2().y();

    let numer_x = (x1 * y2 - y1 * x2) * (x3 - x4) - (x1 - x2) * (x3 * y4 - y3 * x4);
    let numer_y = (x1 * y2 - y1 * x2) * (y3 - y4) - (y1 - y2) * (x3 * y4 - y3 * x4);
    let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    // Parallel lines. The threshold is relative to the segment lengths, so tiny segments don't
    // look parallel.
    if denom.abs() <= 1.0e-9 * l1.length().inner_meters() * l2.length().inner_meters() {
        return None;
    }

    Some(Pt2D::new(numer_x / denom, numer_y / denom))
}
