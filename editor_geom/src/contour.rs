//! Dashed outlines around edges, shapes, circles and rectangles, used to highlight whatever is
//! being inspected or is in front.

use geom::{Angle, PolyLine, Pt2D};

use crate::circle::vertex_circle_around_position;
use crate::{
    DottedContourType, DottedGeometry, DottedGeometryColor, EdgeID, EditorOptions, LaneID,
    Painter, Topology, VisualizationSettings,
};

/// Outlines are drawn above everything else.
pub const DOTTED_CONTOUR_INSPECTED_LAYER: f64 = 1020.0;
pub const DOTTED_CONTOUR_FRONT_LAYER: f64 = 1030.0;

/// Circles this small (after exaggeration) get fewer sides.
const SMALL_CIRCLE_RADIUS: f64 = 2.0;

pub fn contour_layer(contour_type: DottedContourType) -> f64 {
    if contour_type == DottedContourType::Front {
        DOTTED_CONTOUR_FRONT_LAYER
    } else {
        DOTTED_CONTOUR_INSPECTED_LAYER
    }
}

/// Half the width of a lane as drawn.
pub fn lane_half_width(
    settings: &VisualizationSettings,
    topology: &dyn Topology,
    lane: LaneID,
) -> f64 {
    settings.lane_width_exaggeration * topology.lane_width(lane) / 2.0
}

/// Outlines a whole edge. The two long sides follow the outermost lanes, and the ends are only
/// joined when requested.
#[allow(clippy::too_many_arguments)]
pub fn draw_dotted_contour_edge(
    painter: &mut dyn Painter,
    contour_type: DottedContourType,
    settings: &VisualizationSettings,
    options: &EditorOptions,
    topology: &dyn Topology,
    edge: EdgeID,
    draw_front_extreme: bool,
    draw_back_extreme: bool,
) {
    let lanes = topology.lanes(edge);
    let (first, last) = match (lanes.first(), lanes.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            warn!("Not outlining {}, it has no lanes", edge);
            return;
        }
    };
    if lanes.len() == 1 {
        draw_dotted_contour_shape(
            painter,
            contour_type,
            settings,
            topology.lane_shape(first),
            lane_half_width(settings, topology, first),
            1.0,
            draw_front_extreme,
            draw_back_extreme,
            None,
        );
        return;
    }

    let (top_lane, bot_lane) = if options.lefthand() {
        (last, first)
    } else {
        (first, last)
    };
    let mut top = DottedGeometry::new(settings, topology.lane_shape(top_lane).clone(), false);
    let mut bot = DottedGeometry::new(settings, topology.lane_shape(bot_lane).clone(), false);
    top.move_shape_to_side(lane_half_width(settings, topology, top_lane));
    bot.move_shape_to_side(-lane_half_width(settings, topology, bot_lane));
    top.invert_offset();
    let extremes =
        DottedGeometry::extremes(settings, &top, draw_front_extreme, &bot, draw_back_extreme);

    draw_sides(
        painter,
        contour_type,
        settings,
        &top,
        &bot,
        &extremes,
        None,
    );
}

/// Outlines a closed shape, grown or shrunk around its centroid by `exaggeration`.
pub fn draw_dotted_contour_closed_shape(
    painter: &mut dyn Painter,
    contour_type: DottedContourType,
    settings: &VisualizationSettings,
    shape: &PolyLine,
    exaggeration: f64,
    line_width: Option<f64>,
) {
    if exaggeration <= 0.0 {
        warn!(
            "Not outlining a shape with exaggeration {}",
            exaggeration
        );
        return;
    }
    let polygon = shape.scale_relative(exaggeration);
    let dotted = DottedGeometry::new(settings, polygon, true);

    painter.push_matrix();
    painter.translate(0.0, 0.0, contour_layer(contour_type));
    let mut color = DottedGeometryColor::new(settings);
    dotted.draw_dotted_geometry(painter, &mut color, contour_type, line_width);
    painter.pop_matrix();
}

/// Outlines both sides of an open shape, `width * exaggeration` away from it.
#[allow(clippy::too_many_arguments)]
pub fn draw_dotted_contour_shape(
    painter: &mut dyn Painter,
    contour_type: DottedContourType,
    settings: &VisualizationSettings,
    shape: &PolyLine,
    width: f64,
    exaggeration: f64,
    draw_first_extreme: bool,
    draw_last_extreme: bool,
    line_width: Option<f64>,
) {
    let center = DottedGeometry::new(settings, shape.clone(), false);
    let mut top = center.clone();
    let mut bot = center;
    top.move_shape_to_side(width * exaggeration);
    bot.move_shape_to_side(-width * exaggeration);
    top.invert_offset();
    let extremes =
        DottedGeometry::extremes(settings, &top, draw_first_extreme, &bot, draw_last_extreme);

    draw_sides(
        painter,
        contour_type,
        settings,
        &top,
        &bot,
        &extremes,
        line_width,
    );
}

pub fn draw_dotted_contour_circle(
    painter: &mut dyn Painter,
    contour_type: DottedContourType,
    settings: &VisualizationSettings,
    center: Pt2D,
    radius: f64,
    exaggeration: f64,
) {
    let steps = if radius * exaggeration < SMALL_CIRCLE_RADIUS {
        8
    } else {
        16
    };
    let circle = vertex_circle_around_position(center, radius, steps);
    draw_dotted_contour_closed_shape(painter, contour_type, settings, &circle, exaggeration, None);
}

/// Outlines a rectangle `2 * width` by `2 * height`, moved by the offsets, rotated, and then
/// centered on `pos`.
#[allow(clippy::too_many_arguments)]
pub fn draw_dotted_squared_shape(
    painter: &mut dyn Painter,
    contour_type: DottedContourType,
    settings: &VisualizationSettings,
    pos: Pt2D,
    width: f64,
    height: f64,
    offset_x: f64,
    offset_y: f64,
    rotation: f64,
    exaggeration: f64,
) {
    let shape = squared_shape(pos, width, height, offset_x, offset_y, rotation);
    draw_dotted_contour_closed_shape(painter, contour_type, settings, &shape, exaggeration, None);
}

fn squared_shape(
    pos: Pt2D,
    width: f64,
    height: f64,
    offset_x: f64,
    offset_y: f64,
    rotation: f64,
) -> PolyLine {
    PolyLine::new(vec![
        Pt2D::new(width, height),
        Pt2D::new(width, -height),
        Pt2D::new(-width, -height),
        Pt2D::new(-width, height),
    ])
    .translate(offset_x, offset_y)
    .rotate_2d(Angle::degrees(-rotation + 90.0))
    .translate(pos.x(), pos.y())
}

/// Top, then bottom, then the ends. The colors restart for the bottom and are flipped for the
/// ends, so the pattern lines up at the corners.
fn draw_sides(
    painter: &mut dyn Painter,
    contour_type: DottedContourType,
    settings: &VisualizationSettings,
    top: &DottedGeometry,
    bot: &DottedGeometry,
    extremes: &DottedGeometry,
    line_width: Option<f64>,
) {
    painter.push_matrix();
    painter.translate(0.0, 0.0, contour_layer(contour_type));
    let mut color = DottedGeometryColor::new(settings);
    top.draw_dotted_geometry(painter, &mut color, contour_type, line_width);
    color.reset();
    bot.draw_dotted_geometry(painter, &mut color, contour_type, line_width);
    color.change_color();
    extremes.draw_dotted_geometry(painter, &mut color, contour_type, line_width);
    painter.pop_matrix();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn rectangle_corners() {
        let shape = squared_shape(Pt2D::new(10.0, 10.0), 2.0, 1.0, 0.0, 0.0, 90.0);
        assert_eq!(
            shape.points(),
            &vec![
                Pt2D::new(12.0, 11.0),
                Pt2D::new(12.0, 9.0),
                Pt2D::new(8.0, 9.0),
                Pt2D::new(8.0, 11.0),
            ]
        );

        // A rotation of 0 turns the rectangle a quarter turn
        let shape = squared_shape(Pt2D::new(0.0, 0.0), 2.0, 1.0, 1.0, 0.0, 0.0);
        let first = shape.points()[0];
        assert!(close(first.x(), -1.0) && close(first.y(), 3.0));
    }

    #[test]
    fn layers() {
        assert_eq!(
            contour_layer(DottedContourType::Front),
            DOTTED_CONTOUR_FRONT_LAYER
        );
        assert_eq!(
            contour_layer(DottedContourType::Magenta),
            DOTTED_CONTOUR_INSPECTED_LAYER
        );
    }
}
