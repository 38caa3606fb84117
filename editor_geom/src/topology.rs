use std::fmt;

use anyhow::{bail, Context, Result};
use geom::{Distance, PolyLine, Pt2D};
use lyon_geom::{point, CubicBezierSegment};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeID(pub usize);

impl fmt::Display for EdgeID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Edge #{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JunctionID(pub usize);

impl fmt::Display for JunctionID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Junction #{}", self.0)
    }
}

/// Lanes are numbered from the rightmost one, starting at 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LaneID {
    pub edge: EdgeID,
    pub index: usize,
}

impl fmt::Display for LaneID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Lane #{}/{}", self.edge.0, self.index)
    }
}

/// Everything geometry needs to know about the road network. Queries about IDs that don't exist
/// may panic.
pub trait Topology {
    /// In order, rightmost first
    fn lanes(&self, edge: EdgeID) -> Vec<LaneID>;
    /// The shape as drawn.
    fn lane_shape(&self, lane: LaneID) -> &PolyLine;
    /// The shape before any adjustments for drawing. Usually the same.
    fn raw_lane_shape(&self, lane: LaneID) -> &PolyLine {
        self.lane_shape(lane)
    }
    fn lane_width(&self, lane: LaneID) -> f64;
    fn dst_junction(&self, edge: EdgeID) -> Option<JunctionID>;
    fn outgoing_edges(&self, junction: JunctionID) -> Vec<EdgeID>;
    fn junction_shape(&self, junction: JunctionID) -> &PolyLine;
    /// The edge going back the way this one came, if any
    fn turn_destination(&self, edge: EdgeID) -> Option<EdgeID>;
    /// A smooth curve from the end of `from` to the start of `to`, through a junction.
    /// `extrapolate_begin` and `extrapolate_end` say how far the curve may keep going straight
    /// out of `from` and into `to`.
    #[allow(clippy::too_many_arguments)]
    fn compute_smooth_shape(
        &self,
        junction: JunctionID,
        from: &PolyLine,
        to: &PolyLine,
        num_points: usize,
        is_turnaround: bool,
        extrapolate_begin: f64,
        extrapolate_end: f64,
    ) -> PolyLine;

    fn num_lanes(&self, edge: EdgeID) -> usize {
        self.lanes(edge).len()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub shape: PolyLine,
    pub width: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeID,
    pub src: JunctionID,
    pub dst: JunctionID,
    pub lanes: Vec<Lane>,
    #[serde(default)]
    pub turn_destination: Option<EdgeID>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Junction {
    pub id: JunctionID,
    pub shape: PolyLine,
}

/// A small road network held in memory. IDs are indices.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub junctions: Vec<Junction>,
    pub edges: Vec<Edge>,
}

impl Network {
    pub fn new() -> Network {
        Network::default()
    }

    pub fn load(path: &str) -> Result<Network> {
        let raw = fs_err::read_to_string(path)?;
        let network: Network =
            serde_json::from_str(&raw).with_context(|| format!("parsing network from {}", path))?;
        network.validate()?;
        Ok(network)
    }

    fn validate(&self) -> Result<()> {
        for (idx, j) in self.junctions.iter().enumerate() {
            if j.id.0 != idx {
                bail!("{} is stored at index {}", j.id, idx);
            }
        }
        for (idx, e) in self.edges.iter().enumerate() {
            if e.id.0 != idx {
                bail!("{} is stored at index {}", e.id, idx);
            }
            for j in [e.src, e.dst] {
                if j.0 >= self.junctions.len() {
                    bail!("{} refers to missing {}", e.id, j);
                }
            }
            if let Some(other) = e.turn_destination {
                if other.0 >= self.edges.len() {
                    bail!("{} turns around onto missing {}", e.id, other);
                }
            }
        }
        Ok(())
    }

    pub fn add_junction(&mut self, shape: PolyLine) -> JunctionID {
        let id = JunctionID(self.junctions.len());
        self.junctions.push(Junction { id, shape });
        id
    }

    /// Lanes are given rightmost first, as (shape, width).
    pub fn add_edge(
        &mut self,
        src: JunctionID,
        dst: JunctionID,
        lanes: Vec<(PolyLine, f64)>,
    ) -> EdgeID {
        let id = EdgeID(self.edges.len());
        self.edges.push(Edge {
            id,
            src,
            dst,
            lanes: lanes
                .into_iter()
                .map(|(shape, width)| Lane { shape, width })
                .collect(),
            turn_destination: None,
        });
        id
    }

    pub fn set_turn_destination(&mut self, edge: EdgeID, turn_destination: EdgeID) {
        self.edges[edge.0].turn_destination = Some(turn_destination);
    }

    pub fn get_e(&self, id: EdgeID) -> &Edge {
        &self.edges[id.0]
    }

    pub fn get_j(&self, id: JunctionID) -> &Junction {
        &self.junctions[id.0]
    }

    pub fn get_l(&self, id: LaneID) -> &Lane {
        &self.get_e(id.edge).lanes[id.index]
    }
}

impl Topology for Network {
    fn lanes(&self, edge: EdgeID) -> Vec<LaneID> {
        (0..self.get_e(edge).lanes.len())
            .map(|index| LaneID { edge, index })
            .collect()
    }

    fn lane_shape(&self, lane: LaneID) -> &PolyLine {
        &self.get_l(lane).shape
    }

    fn lane_width(&self, lane: LaneID) -> f64 {
        self.get_l(lane).width
    }

    fn dst_junction(&self, edge: EdgeID) -> Option<JunctionID> {
        self.edges.get(edge.0).map(|e| e.dst)
    }

    fn outgoing_edges(&self, junction: JunctionID) -> Vec<EdgeID> {
        self.edges
            .iter()
            .filter(|e| e.src == junction)
            .map(|e| e.id)
            .collect()
    }

    fn junction_shape(&self, junction: JunctionID) -> &PolyLine {
        &self.get_j(junction).shape
    }

    fn turn_destination(&self, edge: EdgeID) -> Option<EdgeID> {
        self.get_e(edge).turn_destination
    }

    fn compute_smooth_shape(
        &self,
        _: JunctionID,
        from: &PolyLine,
        to: &PolyLine,
        num_points: usize,
        is_turnaround: bool,
        extrapolate_begin: f64,
        extrapolate_end: f64,
    ) -> PolyLine {
        smooth_curve(
            from,
            to,
            num_points,
            is_turnaround,
            extrapolate_begin,
            extrapolate_end,
        )
    }
}

/// A cubic Bezier curve from the last point of `from` to the first point of `to`. The control
/// points are straight out of `from` and straight into `to`, so the curve leaves and enters at
/// the same angle as the lanes. Degenerate lanes just get a straight line.
pub fn smooth_curve(
    from: &PolyLine,
    to: &PolyLine,
    num_points: usize,
    is_turnaround: bool,
    extrapolate_begin: f64,
    extrapolate_end: f64,
) -> PolyLine {
    let (start, end) = match (from.last_pt(), to.first_pt()) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return PolyLine::empty();
        }
    };
    let (start_angle, end_angle) = match (from.angle_at(from.length()), to.angle_at(Distance::ZERO))
    {
        (Some(a1), Some(a2)) if num_points >= 2 => (a1, a2),
        _ => {
            return PolyLine::new(vec![start, end]);
        }
    };

    // Without a turnaround, don't overshoot a short gap
    let half_gap = start.dist_to(end).inner_meters() / 2.0;
    let (ext_begin, ext_end) = if is_turnaround {
        (extrapolate_begin, extrapolate_end)
    } else {
        (extrapolate_begin.min(half_gap), extrapolate_end.min(half_gap))
    };
    let ctrl1 = start.project_away(Distance::meters(ext_begin.max(0.0)), start_angle);
    let ctrl2 = end.project_away(Distance::meters(ext_end.max(0.0)), end_angle.opposite());

    let curve = CubicBezierSegment {
        from: point(start.x(), start.y()),
        ctrl1: point(ctrl1.x(), ctrl1.y()),
        ctrl2: point(ctrl2.x(), ctrl2.y()),
        to: point(end.x(), end.y()),
    };
    let mut result = PolyLine::empty();
    for idx in 0..num_points {
        let pt = curve.sample((idx as f64) / ((num_points - 1) as f64));
        result.push_back_no_dupe(Pt2D::new(pt.x, pt.y));
    }
    result
}
