use anyhow::{bail, Result};
use serde::Serialize;

use editor_geom::{EdgeID, Lane2laneConnection, LaneID, Network, Topology};

#[derive(Serialize)]
struct Connection {
    to: LaneID,
    points: Vec<[f64; 2]>,
    rotations: Vec<f64>,
}

pub fn run(network: String, edge: usize, lane: usize) -> Result<()> {
    let network = Network::load(&network)?;
    let edge = EdgeID(edge);
    if edge.0 >= network.edges.len() {
        bail!("The network doesn't have {}", edge);
    }
    if lane >= network.num_lanes(edge) {
        bail!("{} only has {} lanes", edge, network.num_lanes(edge));
    }

    let mut conn = Lane2laneConnection::new(LaneID { edge, index: lane });
    conn.update_lane2lane_connection(&network);
    let result: Vec<Connection> = conn
        .destinations()
        .map(|to| {
            let geom = conn.get_geometry(to);
            Connection {
                to,
                points: geom
                    .shape()
                    .points()
                    .iter()
                    .map(|pt| [pt.x(), pt.y()])
                    .collect(),
                rotations: geom.rotations().clone(),
            }
        })
        .collect();
    info!("{} connects to {} lanes", conn.from_lane(), result.len());
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
