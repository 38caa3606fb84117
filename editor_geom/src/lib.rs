//! Geometry for an interactive road network editor: polylines with cached rotations and lengths
//! ready for drawing, dashed outlines to highlight things, smooth connections between lanes, and
//! a few drawing helpers built on top of a minimal `Painter`.

#[macro_use]
extern crate log;

use geom::Distance;

pub use crate::color::Color;
pub use crate::dotted::{DottedContourType, DottedGeometry, DottedGeometryColor, Segment};
pub use crate::geometry::{adjust_start_pos_geometric_path, Geometry};
pub use crate::lane2lane::Lane2laneConnection;
pub use crate::painter::{ColoredBoxLine, DrawCmd, DrawList, Painter};
pub use crate::settings::{
    ArrowSettings, DottedContourSettings, DrivingSide, EditorOptions, VisualizationSettings,
};
pub use crate::topology::{EdgeID, JunctionID, LaneID, Network, Topology};

pub mod circle;
mod color;
pub mod contour;
mod dotted;
pub mod draw;
pub mod geometry;
mod lane2lane;
mod painter;
mod settings;
pub mod topology;

/// Positions closer than this along a lane are considered the same.
pub const POSITION_EPS: Distance = Distance::const_meters(0.1);

/// Dotted outlines around anything longer than this use longer dashes.
pub const MAX_DOTTED_GEOMETRY_LENGTH: f64 = 500.0;
