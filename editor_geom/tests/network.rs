use editor_geom::geometry::segment_rotation;
use editor_geom::{
    EditorOptions, Geometry, JunctionID, Lane2laneConnection, LaneID, Network, Topology,
    VisualizationSettings,
};
use geom::{Distance, PolyLine, Pt2D};

fn pl(raw: &[(f64, f64)]) -> PolyLine {
    PolyLine::new(raw.iter().map(|(x, y)| Pt2D::new(*x, *y)).collect())
}

/// A file path private to one test, so concurrent runs don't trample each other.
fn scratch_file(test: &str, name: &str) -> String {
    let dir = std::path::Path::new(env!("CARGO_TARGET_TMPDIR"))
        .join(format!("{}_{}", test, std::process::id()));
    fs_err::create_dir_all(&dir).unwrap();
    dir.join(name).to_str().unwrap().to_string()
}

/// A T junction. One edge comes in from the west, and edges leave to the east and the south.
fn t_junction() -> Network {
    let mut net = Network::new();
    let west = net.add_junction(pl(&[(0.0, 0.0)]));
    let middle = net.add_junction(pl(&[
        (20.0, -4.0),
        (28.0, -4.0),
        (28.0, 4.0),
        (20.0, 4.0),
    ]));
    let east = net.add_junction(pl(&[(50.0, 0.0)]));
    let south = net.add_junction(pl(&[(24.0, 50.0)]));
    net.add_edge(west, middle, vec![(pl(&[(0.0, 2.0), (20.0, 2.0)]), 3.0)]);
    net.add_edge(
        middle,
        east,
        vec![
            (pl(&[(28.0, 2.0), (50.0, 2.0)]), 3.0),
            (pl(&[(28.0, -1.0), (50.0, -1.0)]), 3.0),
        ],
    );
    net.add_edge(middle, south, vec![(pl(&[(22.0, 4.0), (22.0, 50.0)]), 3.0)]);
    net
}

#[test]
fn connections_through_a_junction() {
    let net = t_junction();
    let from = net.lanes(net.edges[0].id)[0];
    let mut conn = Lane2laneConnection::new(from);
    let to_south = net.lanes(net.edges[2].id)[0];
    assert!(!conn.exist(to_south));

    conn.update_lane2lane_connection(&net);
    assert_eq!(conn.from_lane(), from);
    assert_eq!(conn.destinations().count(), 3);

    let turn = conn.get_geometry(to_south);
    assert_eq!(turn.shape().first_pt(), Some(Pt2D::new(20.0, 2.0)));
    assert_eq!(turn.shape().last_pt(), Some(Pt2D::new(22.0, 4.0)));
    assert_eq!(turn.rotations().len(), turn.lengths().len());
    // Leaves heading east, arrives heading south
    assert!((turn.rotations()[0] - 90.0).abs() < 30.0);
    assert!((turn.rotations().last().unwrap() - 180.0).abs() < 30.0);

    assert!(conn
        .maybe_get_geometry(LaneID {
            edge: net.edges[0].id,
            index: 0
        })
        .is_none());
}

#[test]
fn network_round_trips_through_json() {
    let net = t_junction();
    let path = scratch_file("network_round_trips_through_json", "t_junction.json");
    fs_err::write(&path, serde_json::to_string(&net).unwrap()).unwrap();
    let loaded = Network::load(&path).unwrap();
    assert_eq!(loaded, net);
    assert_eq!(loaded.outgoing_edges(JunctionID(1)).len(), 2);

    fs_err::write(&path, "{\"junctions\": []}").unwrap();
    assert!(Network::load(&path).is_err());
}

#[test]
fn settings_and_options_from_files() {
    let settings_path = scratch_file("settings_and_options_from_files", "settings.json");
    fs_err::write(
        &settings_path,
        r#"{"lane_width_exaggeration": 3.0, "geometry_points_text_detail": 2.0}"#,
    )
    .unwrap();
    let settings = VisualizationSettings::load(&settings_path).unwrap();
    assert_eq!(settings.lane_width_exaggeration, 3.0);
    assert_eq!(settings.geometry_points_text_detail, 2.0);

    let options_path = scratch_file("settings_and_options_from_files", "options.json");
    fs_err::write(&options_path, "not json").unwrap();
    assert!(EditorOptions::load(&options_path).is_err());
    fs_err::write(&options_path, "{}").unwrap();
    assert!(!EditorOptions::load(&options_path).unwrap().lefthand());
}

#[test]
fn geometry_along_a_lane() {
    let net = t_junction();
    let lane = net.lanes(net.edges[1].id)[0];
    let shape = net.lane_shape(lane);

    let mut geom = Geometry::default();
    geom.update_geometry_window(shape, Distance::meters(2.0), Distance::meters(12.0), 0.5);
    assert_eq!(geom.shape(), &pl(&[(30.0, 2.5), (40.0, 2.5)]));
    assert_eq!(
        geom.rotations(),
        &vec![segment_rotation(Pt2D::new(30.0, 2.5), Pt2D::new(40.0, 2.5))]
    );

    geom.update_geometry_at_pos(shape, Distance::meters(11.0), 0.0);
    assert_eq!(geom.shape(), &pl(&[(39.0, 2.0)]));
    assert!((geom.rotations()[0] - 90.0).abs() < 1e-6);
}
