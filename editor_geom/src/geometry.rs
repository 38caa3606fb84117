use geom::{Angle, Distance, PolyLine, Pt2D};

use crate::POSITION_EPS;

/// The compass bearing from `first` to `second`, in degrees. 0 points to -Y and angles increase
/// clockwise on screen, which is what the renderer expects when it draws box lines.
pub fn segment_rotation(first: Pt2D, second: Pt2D) -> f64 {
    (second.x() - first.x())
        .atan2(first.y() - second.y())
        .to_degrees()
}

pub fn segment_length(first: Pt2D, second: Pt2D) -> Distance {
    first.dist_to(second)
}

/// The bearing (in the same convention as `segment_rotation`) of a direction.
pub fn bearing(angle: Angle) -> f64 {
    let (sin, cos) = angle.normalized_radians().sin_cos();
    cos.atan2(-sin).to_degrees()
}

/// Caches for every consecutive pair of points.
pub(crate) fn rotations_and_lengths(shape: &PolyLine) -> (Vec<f64>, Vec<Distance>) {
    shape
        .segments()
        .map(|(pt1, pt2)| (segment_rotation(pt1, pt2), segment_length(pt1, pt2)))
        .unzip()
}

/// A polyline along with the rotation and length of each segment, so the renderer doesn't need
/// to recalculate them every frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    shape: PolyLine,
    rotations: Vec<f64>,
    lengths: Vec<Distance>,
    // Set while scaled. Points and lengths are rounded, so every scale starts over from here
    // instead of compounding the error.
    unscaled: Option<Unscaled>,
}

#[derive(Clone, Debug, PartialEq)]
struct Unscaled {
    shape: PolyLine,
    lengths: Vec<Distance>,
    factor: f64,
}

impl Geometry {
    pub fn new(shape: PolyLine) -> Geometry {
        let mut geom = Geometry::default();
        geom.update_geometry(shape);
        geom
    }

    /// Trusts the caller that the caches describe the shape.
    pub fn precomputed(shape: PolyLine, rotations: Vec<f64>, lengths: Vec<Distance>) -> Geometry {
        Geometry {
            shape,
            rotations,
            lengths,
            unscaled: None,
        }
    }

    pub fn update_geometry(&mut self, shape: PolyLine) {
        self.shape = shape;
        self.recalculate();
    }

    /// Collapses to a single point `pos_over_shape` along the shape, shifted `lateral_offset` to
    /// the right, keeping the direction of the shape there. Empty shapes leave this empty.
    pub fn update_geometry_at_pos(
        &mut self,
        shape: &PolyLine,
        pos_over_shape: Distance,
        lateral_offset: f64,
    ) {
        self.clear();
        let pos = pos_over_shape.clamp_between(Distance::ZERO, shape.length());
        if let Some(pt) = shape.shifted_dist_along(pos, lateral_offset) {
            self.shape.push(pt);
            self.rotations
                .push(shape.angle_at(pos).map(bearing).unwrap_or(0.0));
        }
    }

    /// Shifts the shape sideways, then keeps only the piece between `start` and `end`.
    pub fn update_geometry_window(
        &mut self,
        shape: &PolyLine,
        start: Distance,
        end: Distance,
        lateral_offset: f64,
    ) {
        let shifted = shape.shift_either_direction(lateral_offset);
        let (start, end) = clamp_window(start, end, shifted.length());
        self.update_geometry(shifted.exact_slice_2d(start, end));
    }

    /// When either trim is set, trims the shape and then glues the extra points onto either end.
    /// Without trims, the shape is used as it is and the extra points are ignored.
    pub fn update_geometry_trimmed(
        &mut self,
        shape: PolyLine,
        begin_trim: Option<Distance>,
        end_trim: Option<Distance>,
        extra_first: Option<Pt2D>,
        extra_last: Option<Pt2D>,
    ) {
        if begin_trim.is_none() && end_trim.is_none() {
            self.update_geometry(shape);
            return;
        }
        let (begin, end) = clamp_trims(begin_trim, end_trim, shape.length());
        let mut shape = shape.exact_slice_2d(begin, end);
        if let Some(pt) = extra_first {
            shape.push_front_no_dupe(pt);
        }
        if let Some(pt) = extra_last {
            shape.push_back_no_dupe(pt);
        }
        self.update_geometry(shape);
    }

    pub fn update_single_pos_geometry(&mut self, position: Pt2D, rotation: f64) {
        self.clear();
        self.shape.push(position);
        self.rotations.push(rotation);
    }

    /// Grows or shrinks the shape around its centroid. Rotations don't change. Scaling by `k`
    /// and then by `1 / k` gives back the original shape and lengths.
    pub fn scale_geometry(&mut self, factor: f64) {
        let unscaled = self.unscaled.get_or_insert_with(|| Unscaled {
            shape: self.shape.clone(),
            lengths: self.lengths.clone(),
            factor: 1.0,
        });
        unscaled.factor *= factor;
        self.shape = unscaled.shape.scale_relative(unscaled.factor);
        self.lengths = unscaled
            .lengths
            .iter()
            .map(|length| *length * unscaled.factor)
            .collect();
    }

    pub fn shape(&self) -> &PolyLine {
        &self.shape
    }

    pub fn rotations(&self) -> &Vec<f64> {
        &self.rotations
    }

    pub fn lengths(&self) -> &Vec<Distance> {
        &self.lengths
    }

    pub fn clear(&mut self) {
        self.shape.clear();
        self.rotations.clear();
        self.lengths.clear();
        self.unscaled = None;
    }

    fn recalculate(&mut self) {
        let (rotations, lengths) = rotations_and_lengths(&self.shape);
        self.rotations = rotations;
        self.lengths = lengths;
        self.unscaled = None;
    }
}

/// Normalizes a window over a shape of some length. A negative start means the whole shape.
/// Afterwards, the window always spans at least `POSITION_EPS`.
fn clamp_window(start: Distance, end: Distance, length: Distance) -> (Distance, Distance) {
    let (mut start, mut end) = (start, end);
    if start < Distance::ZERO {
        start = Distance::ZERO;
        end = length;
    }
    clamp_into(start, end, length)
}

/// Like `clamp_window`, but missing or negative trims independently mean "from the very start"
/// and "to the very end".
fn clamp_trims(
    begin: Option<Distance>,
    end: Option<Distance>,
    length: Distance,
) -> (Distance, Distance) {
    let begin = begin
        .filter(|b| *b >= Distance::ZERO)
        .unwrap_or(Distance::ZERO);
    let end = end.filter(|e| *e >= Distance::ZERO).unwrap_or(length);
    clamp_into(begin, end, length)
}

fn clamp_into(start: Distance, end: Distance, length: Distance) -> (Distance, Distance) {
    let mut start = start;
    let mut end = end;
    if start > length - POSITION_EPS {
        start = length - POSITION_EPS;
    }
    if end > length {
        end = length;
    }
    if end <= start {
        end = start + POSITION_EPS;
    }
    (start, end)
}

/// Keeps the ends of a path strictly inside their lanes. When both ends are on the same lane,
/// the end can't come before the start.
pub fn adjust_start_pos_geometric_path(
    start_pos: Option<Distance>,
    start_lane_length: Option<Distance>,
    end_pos: Option<Distance>,
    end_lane_length: Option<Distance>,
    same_lane: bool,
) -> (Option<Distance>, Option<Distance>) {
    let mut end_pos = end_pos;
    if same_lane && start_lane_length.is_some() && end_lane_length.is_some() {
        if let (Some(start), Some(end)) = (start_pos, end_pos) {
            if start >= end {
                end_pos = Some(start + POSITION_EPS);
            }
        }
    }
    (
        keep_inside_lane(start_pos, start_lane_length),
        keep_inside_lane(end_pos, end_lane_length),
    )
}

fn keep_inside_lane(pos: Option<Distance>, lane_length: Option<Distance>) -> Option<Distance> {
    match (pos, lane_length) {
        (Some(mut pos), Some(length)) => {
            if pos < POSITION_EPS {
                pos = POSITION_EPS;
            }
            if pos > length - POSITION_EPS {
                pos = length - POSITION_EPS;
            }
            Some(pos)
        }
        (pos, _) => pos,
    }
}
