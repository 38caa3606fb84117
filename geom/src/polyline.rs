use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{line_intersection, Angle, Distance, Line, Pt2D, EPSILON_DIST};

/// An ordered sequence of points. Unlike a strict polyline, this may be empty, hold a single
/// point, or repeat points -- shapes coming out of an editor are all of those things at some
/// point, and every operation here has to cope.
///
/// All lengths and offsets are measured in 2D.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolyLine {
    pts: Vec<Pt2D>,
}

impl PolyLine {
    pub fn new(pts: Vec<Pt2D>) -> PolyLine {
        PolyLine { pts }
    }

    pub fn empty() -> PolyLine {
        PolyLine { pts: Vec::new() }
    }

    pub fn points(&self) -> &Vec<Pt2D> {
        &self.pts
    }

    pub fn len(&self) -> usize {
        self.pts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    pub fn first_pt(&self) -> Option<Pt2D> {
        self.pts.first().cloned()
    }

    pub fn last_pt(&self) -> Option<Pt2D> {
        self.pts.last().cloned()
    }

    pub fn clear(&mut self) {
        self.pts.clear();
    }

    pub fn push(&mut self, pt: Pt2D) {
        self.pts.push(pt);
    }

    /// Appends a point, unless it would land on top of the current last point.
    pub fn push_back_no_dupe(&mut self, pt: Pt2D) {
        if self
            .last_pt()
            .map(|last| !last.approx_eq(pt, EPSILON_DIST))
            .unwrap_or(true)
        {
            self.pts.push(pt);
        }
    }

    /// Prepends a point, unless it would land on top of the current first point.
    pub fn push_front_no_dupe(&mut self, pt: Pt2D) {
        if self
            .first_pt()
            .map(|first| !first.approx_eq(pt, EPSILON_DIST))
            .unwrap_or(true)
        {
            self.pts.insert(0, pt);
        }
    }

    /// Every consecutive pair of points, including zero-length pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Pt2D, Pt2D)> + '_ {
        self.pts.windows(2).map(|pair| (pair[0], pair[1]))
    }

    pub fn length(&self) -> Distance {
        Distance::meters(self.raw_length())
    }

    fn raw_length(&self) -> f64 {
        self.segments().map(|(a, b)| a.raw_dist_to(b)).sum()
    }

    pub fn reversed(&self) -> PolyLine {
        let mut pts = self.pts.clone();
        pts.reverse();
        PolyLine::new(pts)
    }

    /// Glues another polyline onto the end of this one, skipping its first point if it matches
    /// our last.
    pub fn extend(mut self, other: &PolyLine) -> PolyLine {
        for pt in &other.pts {
            self.push_back_no_dupe(*pt);
        }
        self
    }

    /// True if there are at least 2 points and the first equals the last.
    pub fn is_closed(&self) -> bool {
        self.pts.len() >= 2 && self.pts[0] == self.pts[self.pts.len() - 1]
    }

    /// Repeats the first point at the end, if it isn't there already.
    pub fn close_loop(&mut self) {
        if let Some(first) = self.first_pt() {
            if !self.is_closed() && self.pts.len() > 1 {
                self.pts.push(first);
            }
        }
    }

    /// Finds the point at some distance along, plus the segment containing it. Offsets outside
    /// [0, length] are clamped. Zero-length segments are skipped, so the segment is None only
    /// when every point coincides.
    fn locate(&self, dist: f64) -> Option<(Pt2D, Option<Line>)> {
        let first = self.first_pt()?;
        let mut seen = 0.0;
        let mut last_line = None;
        for (pt1, pt2) in self.segments() {
            let len = pt1.raw_dist_to(pt2);
            if len <= 0.0 {
                continue;
            }
            let line = Line(pt1, pt2);
            if seen + len > dist {
                let along = (dist - seen).max(0.0);
                return Some((line.percent_along(along / len), Some(line)));
            }
            seen += len;
            last_line = Some(line);
        }
        match last_line {
            Some(line) => Some((line.pt2(), Some(line))),
            None => Some((first, None)),
        }
    }

    /// The point at some distance along. Out-of-range distances are clamped to the ends.
    pub fn dist_along(&self, dist: Distance) -> Option<Pt2D> {
        self.locate(dist.inner_meters()).map(|(pt, _)| pt)
    }

    /// Like `dist_along`, but also moves the point sideways, perpendicular to the segment it
    /// lands on. Positive goes right.
    pub fn shifted_dist_along(&self, dist: Distance, lateral_offset: f64) -> Option<Pt2D> {
        let (pt, line) = self.locate(dist.inner_meters())?;
        match line {
            Some(line) if lateral_offset != 0.0 => {
                let percent = Line(line.pt1(), pt)
                    .length()
                    .safe_percent(line.length());
                Some(
                    line.shift_either_direction(lateral_offset)
                        .percent_along(percent),
                )
            }
            _ => Some(pt),
        }
    }

    /// The direction of the segment at some distance along.
    pub fn angle_at(&self, dist: Distance) -> Option<Angle> {
        let (_, line) = self.locate(dist.inner_meters())?;
        line.map(|l| l.angle())
    }

    /// Extracts the piece between two distances, in 2D. Both ends are clamped to the polyline.
    /// The result always has at least 2 points if this polyline does.
    pub fn exact_slice_2d(&self, begin: Distance, end: Distance) -> PolyLine {
        if self.pts.len() < 2 {
            return self.clone();
        }
        let total = self.length();
        let begin_pt = if begin > Distance::ZERO {
            self.dist_along(begin)
        } else {
            self.first_pt()
        };
        let end_pt = if end < total {
            self.dist_along(end)
        } else {
            self.last_pt()
        };
        let (begin_pt, end_pt) = match (begin_pt, end_pt) {
            (Some(b), Some(e)) => (b, e),
            _ => return PolyLine::empty(),
        };
        let begin = begin.inner_meters();
        let end = end.inner_meters();

        let mut result = PolyLine::new(vec![begin_pt]);
        let mut seen = 0.0;
        let mut idx = 0;
        // Skip everything before the slice starts
        while idx + 1 < self.pts.len() && seen + self.pts[idx].raw_dist_to(self.pts[idx + 1]) < begin
        {
            seen += self.pts[idx].raw_dist_to(self.pts[idx + 1]);
            idx += 1;
        }
        // Then collect the interior points
        while idx + 1 < self.pts.len() && seen + self.pts[idx].raw_dist_to(self.pts[idx + 1]) < end {
            result.push_back_no_dupe(self.pts[idx + 1]);
            seen += self.pts[idx].raw_dist_to(self.pts[idx + 1]);
            idx += 1;
        }
        result.push_back_no_dupe(end_pt);
        if result.len() == 1 {
            result.push(end_pt);
        }
        result
    }

    /// The distance along of the point on this polyline closest to `pt`.
    pub fn nearest_offset(&self, pt: Pt2D) -> Distance {
        let mut best: Option<(f64, Distance)> = None;
        let mut seen = Distance::ZERO;
        for (pt1, pt2) in self.segments() {
            let len = pt1.dist_to(pt2);
            if len == Distance::ZERO {
                continue;
            }
            let line = Line(pt1, pt2);
            let along = line.dist_along_of_nearest(pt);
            let dist_squared = line.dist_along(along).dist_squared_to(pt);
            if best.map(|(d, _)| dist_squared < d).unwrap_or(true) {
                best = Some((dist_squared, seen + along));
            }
            seen += len;
        }
        best.map(|(_, along)| along).unwrap_or(Distance::ZERO)
    }

    /// Moves every point sideways, perpendicular to the path. Positive goes right. Interior
    /// points are placed where the neighboring shifted segments meet. Duplicate points are
    /// removed first.
    // Things to remember about shifting polylines:
    // - the length before and after probably don't match up
    // - the number of points does match, after deduplication
    pub fn shift_either_direction(&self, width: f64) -> PolyLine {
        let mut pts = self.pts.clone();
        pts.dedup_by(|a, b| a.approx_eq(*b, EPSILON_DIST));
        if pts.len() < 2 || width == 0.0 {
            return PolyLine::new(pts);
        }

        let shifted: Vec<Line> = pts
            .windows(2)
            .map(|pair| Line(pair[0], pair[1]).shift_either_direction(width))
            .collect();

        let mut result = vec![shifted[0].pt1()];
        for pair in shifted.windows(2) {
            // When the lines are perfectly parallel, the middle point is redundant anyway
            result.push(line_intersection(&pair[0], &pair[1]).unwrap_or_else(|| pair[0].pt2()));
        }
        result.push(shifted[shifted.len() - 1].pt2());
        PolyLine::new(result)
    }

    /// Rotates every point around the origin.
    pub fn rotate_2d(&self, angle: Angle) -> PolyLine {
        PolyLine::new(self.pts.iter().map(|pt| pt.rotate(angle)).collect())
    }

    pub fn translate(&self, dx: f64, dy: f64) -> PolyLine {
        PolyLine::new(self.pts.iter().map(|pt| pt.offset(dx, dy)).collect())
    }

    /// Grows or shrinks around the centroid.
    pub fn scale_relative(&self, factor: f64) -> PolyLine {
        match self.centroid() {
            Some(center) => PolyLine::new(
                self.pts
                    .iter()
                    .map(|pt| pt.scale_around(center, factor))
                    .collect(),
            ),
            None => self.clone(),
        }
    }

    /// The area enclosed, treating the points as an implicitly closed ring. 0 for fewer than 3
    /// points.
    pub fn area(&self) -> f64 {
        if self.pts.len() < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for (idx, pt1) in self.pts.iter().enumerate() {
            let pt2 = self.pts[(idx + 1) % self.pts.len()];
            sum += pt1.x() * pt2.y() - pt2.x() * pt1.y();
        }
        (sum / 2.0).abs()
    }

    /// The center of mass of the enclosed area. When there's no area, falls back to the
    /// length-weighted center of the segments, and then to the first point.
    pub fn centroid(&self) -> Option<Pt2D> {
        let first = self.first_pt()?;
        let mut pts = self.pts.clone();
        if !self.is_closed() {
            pts.push(first);
        }

        let mut x = 0.0;
        let mut y = 0.0;
        if self.area() != 0.0 {
            let mut div = 0.0;
            for pair in pts.windows(2) {
                let z = pair[0].x() * pair[1].y() - pair[1].x() * pair[0].y();
                div += z;
                x += (pair[0].x() + pair[1].x()) * z;
                y += (pair[0].y() + pair[1].y()) * z;
            }
            div *= 3.0;
            return Some(Pt2D::new(x / div, y / div));
        }

        let mut length_sum = 0.0;
        for pair in pts.windows(2) {
            let len = pair[0].raw_dist_to(pair[1]);
            x += (pair[0].x() + pair[1].x()) * len / 2.0;
            y += (pair[0].y() + pair[1].y()) * len / 2.0;
            length_sum += len;
        }
        if length_sum == 0.0 {
            return Some(first);
        }
        Some(Pt2D::new(x / length_sum, y / length_sum))
    }

    /// Evenly spaces points along the whole polyline, no more than `step` apart. The first point
    /// is always kept. If `adjust_end` is set, the last point is guaranteed to be kept too. Too
    /// short or empty polylines produce nothing.
    pub fn resample(&self, step: Distance, adjust_end: bool) -> PolyLine {
        let mut result = PolyLine::empty();
        if step <= Distance::ZERO {
            return result;
        }
        let length = self.raw_length();
        if length < EPSILON_DIST.inner_meters() {
            return result;
        }
        let pieces = (length / step.inner_meters()).ceil().max(1.0) as usize;
        for idx in 0..=pieces {
            let dist = length * (idx as f64) / (pieces as f64);
            if let Some(pt) = self.locate(dist).map(|(pt, _)| pt) {
                result.push(pt);
            }
        }
        if adjust_end && result.last_pt() != self.last_pt() {
            if let Some(last) = self.last_pt() {
                result.push(last);
            }
        }
        result
    }
}

impl From<Vec<Pt2D>> for PolyLine {
    fn from(pts: Vec<Pt2D>) -> PolyLine {
        PolyLine::new(pts)
    }
}

impl fmt::Display for PolyLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "PolyLine::new(vec![")?;
        for (idx, pt) in self.pts.iter().enumerate() {
            write!(f, "  Pt2D::new({}, {}),", pt.x(), pt.y())?;
            if idx > 0 {
                write!(
                    f,
                    "    // {}, {}",
                    pt.x() - self.pts[idx - 1].x(),
                    pt.y() - self.pts[idx - 1].y()
                )?;
            }
            writeln!(f)?;
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    use super::*;

    fn pl(raw: &[(f64, f64)]) -> PolyLine {
        PolyLine::new(raw.iter().map(|(x, y)| Pt2D::new(*x, *y)).collect())
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn length_of_degenerate_shapes() {
        assert_eq!(PolyLine::empty().length(), Distance::ZERO);
        assert_eq!(pl(&[(3.0, 4.0)]).length(), Distance::ZERO);
        assert_eq!(pl(&[(3.0, 4.0), (3.0, 4.0)]).length(), Distance::ZERO);
        assert_eq!(pl(&[(0.0, 0.0), (3.0, 4.0)]).length(), Distance::meters(5.0));
    }

    #[test]
    fn dist_along_clamps() {
        let line = pl(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        assert_eq!(
            line.dist_along(Distance::meters(-5.0)),
            Some(Pt2D::new(0.0, 0.0))
        );
        assert_eq!(
            line.dist_along(Distance::meters(15.0)),
            Some(Pt2D::new(10.0, 5.0))
        );
        assert_eq!(
            line.dist_along(Distance::meters(100.0)),
            Some(Pt2D::new(10.0, 10.0))
        );
        assert_eq!(PolyLine::empty().dist_along(Distance::ZERO), None);
    }

    #[test]
    fn shifting_goes_right() {
        // Heading east with Y pointing down, the right side is +Y
        let line = pl(&[(0.0, 0.0), (10.0, 0.0)]);
        assert_eq!(
            line.shifted_dist_along(Distance::meters(5.0), 2.0),
            Some(Pt2D::new(5.0, 2.0))
        );
        assert_eq!(
            line.shift_either_direction(-1.0),
            pl(&[(0.0, -1.0), (10.0, -1.0)])
        );

        let corner = pl(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        assert_eq!(
            corner.shift_either_direction(1.0),
            pl(&[(0.0, 1.0), (9.0, 1.0), (9.0, 10.0)])
        );
    }

    #[test]
    fn shifting_drops_duplicates() {
        let line = pl(&[(0.0, 0.0), (0.0, 0.0), (10.0, 0.0)]);
        assert_eq!(line.shift_either_direction(1.0).len(), 2);
        assert_eq!(pl(&[(1.0, 1.0)]).shift_either_direction(1.0).len(), 1);
    }

    #[test]
    fn exact_slice_2d() {
        let line = pl(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        assert_eq!(
            line.exact_slice_2d(Distance::meters(5.0), Distance::meters(15.0)),
            pl(&[(5.0, 0.0), (10.0, 0.0), (10.0, 5.0)])
        );
        assert_eq!(
            line.exact_slice_2d(Distance::meters(-1.0), Distance::meters(100.0)),
            line
        );
        assert_eq!(
            line.exact_slice_2d(Distance::meters(2.0), Distance::meters(2.0))
                .len(),
            2
        );
    }

    #[test]
    fn nearest_offset() {
        let line = pl(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        assert_eq!(
            line.nearest_offset(Pt2D::new(4.0, 3.0)),
            Distance::meters(4.0)
        );
        assert_eq!(
            line.nearest_offset(Pt2D::new(12.0, 6.0)),
            Distance::meters(16.0)
        );
    }

    #[test]
    fn close_loop_only_once() {
        let mut square = pl(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        square.close_loop();
        assert!(square.is_closed());
        assert_eq!(square.len(), 4);
        square.close_loop();
        assert_eq!(square.len(), 4);
    }

    #[test]
    fn centroid_and_area() {
        let square = pl(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        assert!(close(square.area(), 4.0));
        assert_eq!(square.centroid(), Some(Pt2D::new(1.0, 1.0)));

        let line = pl(&[(0.0, 0.0), (4.0, 0.0)]);
        assert_eq!(line.area(), 0.0);
        assert_eq!(line.centroid(), Some(Pt2D::new(2.0, 0.0)));
        assert_eq!(pl(&[(3.0, 3.0)]).centroid(), Some(Pt2D::new(3.0, 3.0)));
        assert_eq!(PolyLine::empty().centroid(), None);
    }

    #[test]
    fn scale_relative_keeps_centroid() {
        let square = pl(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let scaled = square.scale_relative(2.0);
        assert_eq!(
            scaled,
            pl(&[(-1.0, -1.0), (3.0, -1.0), (3.0, 3.0), (-1.0, 3.0)])
        );
    }

    #[test]
    fn resample_spacing() {
        let line = pl(&[(0.0, 0.0), (10.0, 0.0)]);
        let pts = line.resample(Distance::meters(3.0), true);
        // ceil(10 / 3) = 4 pieces of 2.5
        assert_eq!(pts.len(), 5);
        assert_eq!(pts.points()[1], Pt2D::new(2.5, 0.0));
        assert_eq!(pts.last_pt(), line.last_pt());

        assert!(pl(&[(1.0, 1.0), (1.0, 1.0)])
            .resample(Distance::meters(1.0), true)
            .is_empty());
        assert!(line.resample(Distance::ZERO, true).is_empty());
    }

    #[test]
    fn random_resample_never_exceeds_step() {
        let mut rng = XorShiftRng::seed_from_u64(42);
        for _ in 0..100 {
            let pts: Vec<Pt2D> = (0..rng.gen_range(2..6))
                .map(|_| Pt2D::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0)))
                .collect();
            let line = PolyLine::new(pts);
            let step = Distance::meters(rng.gen_range(0.5..5.0));
            let resampled = line.resample(step, true);
            if line.length() < EPSILON_DIST {
                continue;
            }
            assert_eq!(resampled.first_pt(), line.first_pt());
            assert_eq!(resampled.last_pt(), line.last_pt());
            for (pt1, pt2) in resampled.segments() {
                assert!(pt1.raw_dist_to(pt2) <= step.inner_meters() + 1e-3);
            }
        }
    }
}
