use geom::{Circle, Distance, PolyLine, Pt2D};
use serde::Serialize;

use crate::geometry::rotations_and_lengths;
use crate::Color;

/// Immediate-mode drawing, in the style of a fixed-function GL pipeline: a matrix stack, a
/// current color, and primitives drawn in world space.
pub trait Painter {
    fn push_matrix(&mut self);
    fn pop_matrix(&mut self);
    /// `dz` moves between layers.
    fn translate(&mut self, dx: f64, dy: f64, dz: f64);
    /// Clockwise, in degrees.
    fn rotate(&mut self, degrees: f64);
    fn set_color(&mut self, color: Color);

    /// A rectangle starting at `origin`, pointing along the bearing `rotation`, `length` long and
    /// `2 * width` wide. `offset` moves it sideways.
    fn draw_box_line(
        &mut self,
        origin: Pt2D,
        rotation: f64,
        length: Distance,
        width: f64,
        offset: f64,
    );
    /// A thin line through every point.
    fn draw_line(&mut self, shape: &PolyLine);
    fn draw_filled_circle(&mut self, circle: &Circle, resolution: usize);
    fn draw_text(&mut self, text: &str, pos: Pt2D, layer: f64, size: f64, color: Color);
    /// An arrowhead at `to`, pointing away from `from`.
    fn draw_triangle_at_end(&mut self, from: Pt2D, to: Pt2D, width: f64, length: f64, offset: f64);

    /// Box lines along a shape, reusing precomputed rotations and lengths.
    fn draw_box_lines(
        &mut self,
        shape: &PolyLine,
        rotations: &[f64],
        lengths: &[Distance],
        width: f64,
    ) {
        for ((pt, rotation), length) in shape.points().iter().zip(rotations).zip(lengths) {
            self.draw_box_line(*pt, *rotation, *length, width, 0.0);
        }
    }

    /// Like `draw_box_lines`, but switching colors per segment. The last color sticks when
    /// there are fewer colors than segments.
    fn draw_box_lines_colored(
        &mut self,
        shape: &PolyLine,
        rotations: &[f64],
        lengths: &[Distance],
        colors: &[Color],
        width: f64,
    ) {
        for (idx, ((pt, rotation), length)) in shape
            .points()
            .iter()
            .zip(rotations)
            .zip(lengths)
            .enumerate()
        {
            if let Some(color) = colors.get(idx) {
                self.set_color(*color);
            }
            self.draw_box_line(*pt, *rotation, *length, width, 0.0);
        }
    }

    /// Box lines along a shape without any cached values.
    fn draw_box_lines_uncached(&mut self, shape: &PolyLine, width: f64) {
        let (rotations, lengths) = rotations_and_lengths(shape);
        self.draw_box_lines(shape, &rotations, &lengths, width);
    }
}

/// Every drawing call, recorded in order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum DrawCmd {
    PushMatrix,
    PopMatrix,
    Translate {
        dx: f64,
        dy: f64,
        dz: f64,
    },
    Rotate(f64),
    SetColor(Color),
    BoxLine {
        origin: Pt2D,
        rotation: f64,
        length: Distance,
        width: f64,
        offset: f64,
    },
    Line(PolyLine),
    FilledCircle {
        circle: Circle,
        resolution: usize,
    },
    Text {
        text: String,
        pos: Pt2D,
        layer: f64,
        size: f64,
        color: Color,
    },
    TriangleAtEnd {
        from: Pt2D,
        to: Pt2D,
        width: f64,
        length: f64,
        offset: f64,
    },
}

/// A box line along with the color it was drawn in.
#[derive(Clone, Debug, PartialEq)]
pub struct ColoredBoxLine {
    pub color: Color,
    pub origin: Pt2D,
    pub rotation: f64,
    pub length: Distance,
    pub width: f64,
}

/// A `Painter` that just remembers what it was asked to draw. Useful for tests and for dumping a
/// scene to a file.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> DrawList {
        DrawList::default()
    }

    pub fn commands(&self) -> &Vec<DrawCmd> {
        &self.cmds
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Every box line, paired with the color active when it was drawn. Box lines drawn before
    /// any color was set are black.
    pub fn box_lines(&self) -> Vec<ColoredBoxLine> {
        let mut color = Color::BLACK;
        let mut result = Vec::new();
        for cmd in &self.cmds {
            match cmd {
                DrawCmd::SetColor(c) => {
                    color = *c;
                }
                DrawCmd::BoxLine {
                    origin,
                    rotation,
                    length,
                    width,
                    ..
                } => {
                    result.push(ColoredBoxLine {
                        color,
                        origin: *origin,
                        rotation: *rotation,
                        length: *length,
                        width: *width,
                    });
                }
                _ => {}
            }
        }
        result
    }

    /// True if every push has a matching pop, and no pop happens without a push.
    pub fn matrix_stack_balanced(&self) -> bool {
        let mut depth: usize = 0;
        for cmd in &self.cmds {
            match cmd {
                DrawCmd::PushMatrix => depth += 1,
                DrawCmd::PopMatrix => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }
        depth == 0
    }
}

impl Painter for DrawList {
    fn push_matrix(&mut self) {
        self.cmds.push(DrawCmd::PushMatrix);
    }

    fn pop_matrix(&mut self) {
        self.cmds.push(DrawCmd::PopMatrix);
    }

    fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.cmds.push(DrawCmd::Translate { dx, dy, dz });
    }

    fn rotate(&mut self, degrees: f64) {
        self.cmds.push(DrawCmd::Rotate(degrees));
    }

    fn set_color(&mut self, color: Color) {
        self.cmds.push(DrawCmd::SetColor(color));
    }

    fn draw_box_line(
        &mut self,
        origin: Pt2D,
        rotation: f64,
        length: Distance,
        width: f64,
        offset: f64,
    ) {
        self.cmds.push(DrawCmd::BoxLine {
            origin,
            rotation,
            length,
            width,
            offset,
        });
    }

    fn draw_line(&mut self, shape: &PolyLine) {
        self.cmds.push(DrawCmd::Line(shape.clone()));
    }

    fn draw_filled_circle(&mut self, circle: &Circle, resolution: usize) {
        self.cmds.push(DrawCmd::FilledCircle {
            circle: *circle,
            resolution,
        });
    }

    fn draw_text(&mut self, text: &str, pos: Pt2D, layer: f64, size: f64, color: Color) {
        self.cmds.push(DrawCmd::Text {
            text: text.to_string(),
            pos,
            layer,
            size,
            color,
        });
    }

    fn draw_triangle_at_end(&mut self, from: Pt2D, to: Pt2D, width: f64, length: f64, offset: f64) {
        self.cmds.push(DrawCmd::TriangleAtEnd {
            from,
            to,
            width,
            length,
            offset,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colored_box_lines() {
        let shape = PolyLine::new(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(10.0, 0.0),
            Pt2D::new(10.0, 10.0),
        ]);
        let mut list = DrawList::new();
        list.draw_box_lines_colored(
            &shape,
            &[90.0, 180.0],
            &[Distance::meters(10.0), Distance::meters(10.0)],
            &[Color::RED],
            0.5,
        );
        let lines = list.box_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.color == Color::RED && l.width == 0.5));
        assert_eq!(lines[1].origin, Pt2D::new(10.0, 0.0));
    }

    #[test]
    fn uncached_box_lines_compute_rotations() {
        let shape = PolyLine::new(vec![Pt2D::new(0.0, 0.0), Pt2D::new(0.0, -4.0)]);
        let mut list = DrawList::new();
        list.draw_box_lines_uncached(&shape, 0.1);
        let lines = list.box_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].rotation, 0.0);
        assert_eq!(lines[0].length, Distance::meters(4.0));
        assert_eq!(lines[0].color, Color::BLACK);
    }

    #[test]
    fn matrix_stack() {
        let mut list = DrawList::new();
        list.push_matrix();
        list.translate(0.0, 0.0, 1.0);
        assert!(!list.matrix_stack_balanced());
        list.pop_matrix();
        assert!(list.matrix_stack_balanced());
        list.pop_matrix();
        assert!(!list.matrix_stack_balanced());
    }
}
