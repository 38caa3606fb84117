//! A few tools to try out the editor geometry without an editor. Everything reads and writes
//! JSON, so results can be piped into a plotting script.

#[macro_use]
extern crate log;

mod connections;
mod dotted_contour;

use anyhow::Result;
use structopt::StructOpt;

use editor_geom::circle::vertex_circle_around_position;
use editor_geom::DottedContourType;
use geom::Pt2D;

#[derive(StructOpt)]
#[structopt(name = "egcli", about = "The editor geometry multi-tool")]
enum Command {
    /// Outlines a polyline with dashes, printing every drawing command as JSON
    DottedContour {
        /// The path to a JSON list of [x, y] points
        #[structopt()]
        input: String,
        /// The path to JSON visualization settings. Defaults are used if omitted.
        #[structopt(long)]
        settings: Option<String>,
        /// One of inspect, front, green, magenta, remove, select
        #[structopt(long, default_value = "inspect")]
        contour_type: DottedContourType,
        /// Treat the points as a polygon, instead of outlining both sides of a path
        #[structopt(long)]
        closed: bool,
        /// How far the outline is from a path, on each side
        #[structopt(long, default_value = "1.0")]
        width: f64,
        #[structopt(long, default_value = "1.0")]
        exaggeration: f64,
    },
    /// Prints the points of a polygon approximating a circle
    Circle {
        #[structopt(long)]
        x: f64,
        #[structopt(long)]
        y: f64,
        #[structopt(long)]
        radius: f64,
        /// How many sides the polygon has
        #[structopt(long, default_value = "16")]
        steps: usize,
    },
    /// Calculates the connections from one lane through the next junction
    Connections {
        /// The path to a JSON network
        #[structopt()]
        network: String,
        #[structopt(long)]
        edge: usize,
        /// Counting from the rightmost lane, starting at 0
        #[structopt(long)]
        lane: usize,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Command::from_args() {
        Command::DottedContour {
            input,
            settings,
            contour_type,
            closed,
            width,
            exaggeration,
        } => dotted_contour::run(input, settings, contour_type, closed, width, exaggeration)?,
        Command::Circle {
            x,
            y,
            radius,
            steps,
        } => circle(x, y, radius, steps)?,
        Command::Connections {
            network,
            edge,
            lane,
        } => connections::run(network, edge, lane)?,
    }
    Ok(())
}

fn circle(x: f64, y: f64, radius: f64, steps: usize) -> Result<()> {
    if !x.is_finite() || !y.is_finite() || !radius.is_finite() {
        anyhow::bail!("The center and radius must be finite");
    }
    let pts = vertex_circle_around_position(Pt2D::new(x, y), radius, steps);
    info!("Approximated a circle with {} points", pts.len());
    let raw: Vec<[f64; 2]> = pts.points().iter().map(|pt| [pt.x(), pt.y()]).collect();
    println!("{}", serde_json::to_string_pretty(&raw)?);
    Ok(())
}
