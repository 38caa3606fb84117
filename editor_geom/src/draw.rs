//! Drawing helpers for geometry being edited: the shapes themselves, handles on their points,
//! and lines between related elements.

use geom::{Circle, Distance, Line, PolyLine, Pt2D};

use crate::geometry::segment_rotation;
use crate::{Color, Geometry, Painter, VisualizationSettings};

/// Points and their labels draw slightly above the shape they belong to.
const GEOMETRY_POINTS_LAYER: f64 = 0.2;
const GEOMETRY_POINTS_TEXT_LAYER: f64 = 0.1;
/// How far apart parent and child have to be before the line between them is abbreviated, and
/// how long the stub is then
const ABBREVIATED_LINE_LENGTH: f64 = 5.0;

/// What the current frame looks like.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewContext {
    pub mouse: Pt2D,
    /// Pixels per meter
    pub scale: f64,
    /// Only draw what's needed to figure out what's under the cursor
    pub draw_for_position_selection: bool,
    /// The user is dragging geometry around
    pub move_mode: bool,
}

impl ViewContext {
    pub fn new(mouse: Pt2D, scale: f64) -> ViewContext {
        ViewContext {
            mouse,
            scale,
            draw_for_position_selection: false,
            move_mode: false,
        }
    }

    /// Zooming in makes circles rounder.
    pub fn circle_resolution(&self) -> usize {
        if self.draw_for_position_selection || self.scale < 1.0 {
            8
        } else if self.scale < 10.0 {
            16
        } else if self.scale < 20.0 {
            32
        } else {
            64
        }
    }

    /// Is the view zoomed in enough to show some detail?
    pub fn draw_detail(&self, detail: f64, exaggeration: f64) -> bool {
        self.scale * exaggeration >= detail
    }
}

/// Draws a geometry as thick lines, or a thin line when zoomed out so far that the thickness
/// wouldn't show. When selecting, just marks the spot under the cursor.
pub fn draw_geometry(
    painter: &mut dyn Painter,
    view: &ViewContext,
    geometry: &Geometry,
    width: f64,
) {
    let shape = geometry.shape();
    if view.draw_for_position_selection {
        if let Some(pt) = nearest_pt_within(shape, view.mouse, width) {
            painter.draw_filled_circle(
                &Circle::new(pt, Distance::meters(width)),
                view.circle_resolution(),
            );
        }
    } else if view.scale * width < 1.0 {
        painter.draw_line(shape);
    } else {
        painter.draw_box_lines(shape, geometry.rotations(), geometry.lengths(), width);
    }
}

/// Just the outline of a thick geometry. With `draw_extremes`, the two sides are joined into one
/// loop.
pub fn draw_contour_geometry(
    painter: &mut dyn Painter,
    geometry: &Geometry,
    width: f64,
    draw_extremes: bool,
) {
    let shape = geometry.shape();
    if shape.len() < 2 || width <= 0.0 {
        return;
    }
    let mut side_a = shape.shift_either_direction(width - 0.1);
    let side_b = shape.shift_either_direction(-width + 0.1);
    if draw_extremes {
        side_a = side_a.extend(&side_b.reversed());
        side_a.close_loop();
        painter.draw_box_lines_uncached(&side_a, 0.1);
    } else {
        painter.draw_box_lines_uncached(&side_a, 0.1);
        painter.draw_box_lines_uncached(&side_b, 0.1);
    }
}

/// Handles on every point of a shape, plus "S" and "E" labels at the ends when zoomed in. Closed
/// shapes only get the "S".
#[allow(clippy::too_many_arguments)]
pub fn draw_geometry_points(
    painter: &mut dyn Painter,
    view: &ViewContext,
    settings: &VisualizationSettings,
    shape: &PolyLine,
    point_color: Color,
    text_color: Color,
    radius: f64,
    exaggeration: f64,
) {
    let radius = radius * exaggeration;
    painter.set_color(point_color);
    for pt in shape.points() {
        let handle = Circle::new(*pt, Distance::meters(radius));
        if view.draw_for_position_selection && !handle.contains_pt(view.mouse) {
            continue;
        }
        painter.push_matrix();
        painter.translate(0.0, 0.0, GEOMETRY_POINTS_LAYER);
        painter.draw_filled_circle(&handle, view.circle_resolution());
        painter.pop_matrix();
    }

    if view.draw_for_position_selection
        || !view.draw_detail(settings.geometry_points_text_detail, exaggeration)
    {
        return;
    }
    let size = 2.0 * radius;
    if let Some(first) = shape.first_pt() {
        painter.draw_text("S", first, GEOMETRY_POINTS_TEXT_LAYER, size, text_color);
    }
    // Closed shapes end where they start
    if let Some(last) = shape.last_pt() {
        if shape.len() > 1 && !shape.is_closed() {
            painter.draw_text("E", last, GEOMETRY_POINTS_TEXT_LAYER, size, text_color);
        }
    }
}

/// While moving things, shows where a new point would be added to a shape.
pub fn draw_moving_hint(
    painter: &mut dyn Painter,
    view: &ViewContext,
    shape: &PolyLine,
    hint_color: Color,
    radius: f64,
    exaggeration: f64,
) {
    if !view.move_mode || view.draw_for_position_selection {
        return;
    }
    let radius = radius * exaggeration;
    let hint = match nearest_pt_within(shape, view.mouse, radius) {
        Some(pt) => pt,
        None => {
            return;
        }
    };
    // Existing points have their own handles
    if shape
        .points()
        .iter()
        .any(|pt| Circle::new(*pt, Distance::meters(radius)).contains_pt(view.mouse))
    {
        return;
    }
    painter.set_color(hint_color);
    painter.push_matrix();
    painter.translate(0.0, 0.0, GEOMETRY_POINTS_LAYER);
    painter.draw_filled_circle(
        &Circle::new(hint, Distance::meters(radius)),
        view.circle_resolution(),
    );
    painter.pop_matrix();
}

/// Like `draw_geometry`, but lanes can have a color per segment.
#[allow(clippy::too_many_arguments)]
pub fn draw_lane_geometry(
    painter: &mut dyn Painter,
    view: &ViewContext,
    shape: &PolyLine,
    rotations: &[f64],
    lengths: &[Distance],
    colors: &[Color],
    width: f64,
    only_contour: bool,
) {
    if view.draw_for_position_selection {
        if let Some(pt) = nearest_pt_within(shape, view.mouse, width) {
            painter.draw_filled_circle(
                &Circle::new(pt, Distance::meters(width)),
                view.circle_resolution(),
            );
        }
    } else if only_contour {
        let geometry = Geometry::precomputed(shape.clone(), rotations.to_vec(), lengths.to_vec());
        draw_contour_geometry(painter, &geometry, width, true);
    } else if colors.is_empty() {
        painter.draw_box_lines(shape, rotations, lengths, width);
    } else {
        painter.draw_box_lines_colored(shape, rotations, lengths, colors, width);
    }
}

/// A line from a parent element towards its child. Unless `draw_entire` is set, only far apart
/// elements get a line, and it's a short stub with an arrow.
pub fn draw_parent_line(
    painter: &mut dyn Painter,
    view: &ViewContext,
    settings: &VisualizationSettings,
    parent: Pt2D,
    child: Pt2D,
    color: Color,
    draw_entire: bool,
) {
    if view.draw_for_position_selection {
        return;
    }
    let dist_squared = parent.dist_squared_to(child);
    if draw_entire {
        draw_full_line(painter, parent, child, color);
    } else if dist_squared > ABBREVIATED_LINE_LENGTH.powi(2) {
        draw_abbreviated_line(painter, settings, parent, child, color);
    }
}

/// A line from a child element towards its parent. Close elements always get the whole line,
/// and far apart ones get a short stub with an arrow, unless `draw_entire` is set.
pub fn draw_child_line(
    painter: &mut dyn Painter,
    view: &ViewContext,
    settings: &VisualizationSettings,
    child: Pt2D,
    parent: Pt2D,
    color: Color,
    draw_entire: bool,
) {
    if view.draw_for_position_selection {
        return;
    }
    let dist_squared = child.dist_squared_to(parent);
    if draw_entire || dist_squared < ABBREVIATED_LINE_LENGTH.powi(2) {
        draw_full_line(painter, child, parent, color);
    } else {
        draw_abbreviated_line(painter, settings, child, parent, color);
    }
}

fn draw_full_line(painter: &mut dyn Painter, from: Pt2D, to: Pt2D, color: Color) {
    painter.push_matrix();
    painter.translate(0.0, 0.0, -1.0);
    draw_two_tone_box_line(painter, from, segment_rotation(from, to), from.dist_to(to), color);
    painter.pop_matrix();
}

fn draw_abbreviated_line(
    painter: &mut dyn Painter,
    settings: &VisualizationSettings,
    from: Pt2D,
    to: Pt2D,
    color: Color,
) {
    let stub = Distance::meters(ABBREVIATED_LINE_LENGTH);
    painter.push_matrix();
    painter.translate(0.0, 0.0, -1.0);
    draw_two_tone_box_line(painter, from, segment_rotation(from, to), stub, color);
    if from.dist_squared_to(to) > (2.0 * ABBREVIATED_LINE_LENGTH).powi(2) {
        let tip = Line::new(from, to)
            .map(|line| line.dist_along(stub))
            .unwrap_or(to);
        let arrows = &settings.arrows;
        painter.set_color(color.changed_brightness(-50));
        painter.draw_triangle_at_end(from, tip, arrows.width, arrows.length, arrows.offset);
        painter.translate(0.0, 0.0, 0.1);
        painter.set_color(color);
        painter.draw_triangle_at_end(
            from,
            tip,
            arrows.width - 0.01,
            arrows.length - 0.01,
            arrows.offset - 0.01,
        );
    }
    painter.pop_matrix();
}

/// A dark outline with the real color just in front of it.
fn draw_two_tone_box_line(
    painter: &mut dyn Painter,
    from: Pt2D,
    rotation: f64,
    length: Distance,
    color: Color,
) {
    painter.set_color(color.changed_brightness(-50));
    painter.draw_box_line(from, rotation, length, 0.05, 0.0);
    painter.translate(0.0, 0.0, 0.1);
    painter.set_color(color);
    painter.draw_box_line(from, rotation, length, 0.04, 0.0);
}

/// Turns the painter so that things drawn along +Y follow a lane with this rotation.
pub fn rotate_over_lane(painter: &mut dyn Painter, rotation: f64) {
    painter.rotate(-rotation + 90.0);
}

/// The point on the shape closest to `pt`, if it's within `max_dist`.
fn nearest_pt_within(shape: &PolyLine, pt: Pt2D, max_dist: f64) -> Option<Pt2D> {
    let nearest = if shape.len() > 1 {
        shape.dist_along(shape.nearest_offset(pt))?
    } else {
        shape.first_pt()?
    };
    if nearest.dist_to(pt).inner_meters() <= max_dist {
        Some(nearest)
    } else {
        None
    }
}
