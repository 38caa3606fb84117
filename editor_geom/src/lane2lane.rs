use std::collections::BTreeMap;

use geom::PolyLine;

use crate::{Geometry, LaneID, Topology};

/// Curves through a junction are only worth computing for reasonably small edges and junctions.
const MAX_SMOOTHED_LANES: usize = 10;
const MIN_SMOOTHED_JUNCTION_AREA: f64 = 4.0;
/// Also how many meters per lane the curve sticks straight out of each end
const SMOOTH_SHAPE_POINTS: usize = 5;

/// The connections from one lane to every lane it can reach through the next junction.
#[derive(Clone, Debug, PartialEq)]
pub struct Lane2laneConnection {
    from_lane: LaneID,
    connections: BTreeMap<LaneID, Geometry>,
}

impl Lane2laneConnection {
    pub fn new(from_lane: LaneID) -> Lane2laneConnection {
        Lane2laneConnection {
            from_lane,
            connections: BTreeMap::new(),
        }
    }

    pub fn from_lane(&self) -> LaneID {
        self.from_lane
    }

    /// Recalculates every connection, replacing whatever was there before.
    pub fn update_lane2lane_connection(&mut self, topology: &dyn Topology) {
        let from_edge = self.from_lane.edge;
        let junction = match topology.dst_junction(from_edge) {
            Some(j) => j,
            None => {
                warn!(
                    "{} doesn't end at a junction, so it has no connections",
                    self.from_lane
                );
                self.connections = BTreeMap::new();
                return;
            }
        };
        let from_lanes = topology.num_lanes(from_edge);
        let smooth = from_lanes <= MAX_SMOOTHED_LANES
            && topology.junction_shape(junction).area() > MIN_SMOOTHED_JUNCTION_AREA;
        let turn_destination = topology.turn_destination(from_edge);
        let extrapolation = |lanes: usize| (SMOOTH_SHAPE_POINTS * lanes) as f64;

        let mut connections = BTreeMap::new();
        for to_edge in topology.outgoing_edges(junction) {
            let to_lanes = topology.num_lanes(to_edge);
            for to_lane in topology.lanes(to_edge) {
                let shape = if smooth {
                    topology.compute_smooth_shape(
                        junction,
                        topology.raw_lane_shape(self.from_lane),
                        topology.raw_lane_shape(to_lane),
                        SMOOTH_SHAPE_POINTS,
                        turn_destination == Some(to_edge),
                        extrapolation(from_lanes),
                        extrapolation(to_lanes),
                    )
                } else {
                    let mut straight = PolyLine::empty();
                    if let Some(pt) = topology.lane_shape(self.from_lane).last_pt() {
                        straight.push(pt);
                    }
                    if let Some(pt) = topology.lane_shape(to_lane).first_pt() {
                        straight.push(pt);
                    }
                    straight
                };
                connections.insert(to_lane, Geometry::new(shape));
            }
        }
        debug!(
            "{} has {} connections through {}",
            self.from_lane,
            connections.len(),
            junction
        );
        self.connections = connections;
    }

    pub fn exist(&self, to_lane: LaneID) -> bool {
        self.connections.contains_key(&to_lane)
    }

    /// Panics if there's no connection to `to_lane`.
    pub fn get_geometry(&self, to_lane: LaneID) -> &Geometry {
        match self.connections.get(&to_lane) {
            Some(geom) => geom,
            None => panic!("No connection from {} to {}", self.from_lane, to_lane),
        }
    }

    pub fn maybe_get_geometry(&self, to_lane: LaneID) -> Option<&Geometry> {
        self.connections.get(&to_lane)
    }

    /// Every lane with a connection, in order.
    pub fn destinations(&self) -> impl Iterator<Item = LaneID> + '_ {
        self.connections.keys().cloned()
    }
}
