use std::str::FromStr;

use anyhow::{bail, Result};
use geom::{Distance, PolyLine};
use serde::{Deserialize, Serialize};

use crate::geometry::rotations_and_lengths;
use crate::{Color, Painter, VisualizationSettings, MAX_DOTTED_GEOMETRY_LENGTH};

/// Why an outline is being drawn around something.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DottedContourType {
    Inspect,
    Front,
    Green,
    Magenta,
    Remove,
    Select,
}

impl FromStr for DottedContourType {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<DottedContourType> {
        Ok(match raw {
            "inspect" => DottedContourType::Inspect,
            "front" => DottedContourType::Front,
            "green" => DottedContourType::Green,
            "magenta" => DottedContourType::Magenta,
            "remove" => DottedContourType::Remove,
            "select" => DottedContourType::Select,
            _ => bail!("unknown contour type {}", raw),
        })
    }
}

/// Alternates between two colors, so neighboring dashes are distinguishable.
pub struct DottedGeometryColor<'a> {
    settings: &'a VisualizationSettings,
    color_flag: bool,
}

impl<'a> DottedGeometryColor<'a> {
    pub fn new(settings: &'a VisualizationSettings) -> DottedGeometryColor<'a> {
        DottedGeometryColor {
            settings,
            color_flag: true,
        }
    }

    /// The next color for a dash. Only the types with a pair of colors alternate; anything else
    /// is always black.
    pub fn get_color(&mut self, contour_type: DottedContourType) -> Color {
        let dotted = &self.settings.dotted_contour;
        let (first, second) = match contour_type {
            DottedContourType::Inspect => {
                (dotted.first_inspected_color, dotted.second_inspected_color)
            }
            DottedContourType::Front => (dotted.first_front_color, dotted.second_front_color),
            DottedContourType::Green => (Color::GREEN, Color::GREEN.changed_brightness(-30)),
            DottedContourType::Magenta => {
                (Color::MAGENTA, Color::MAGENTA.changed_brightness(-30))
            }
            DottedContourType::Remove | DottedContourType::Select => {
                return Color::BLACK;
            }
        };
        let color = if self.color_flag { first } else { second };
        self.color_flag = !self.color_flag;
        color
    }

    pub fn change_color(&mut self) {
        self.color_flag = !self.color_flag;
    }

    pub fn reset(&mut self) {
        self.color_flag = true;
    }
}

/// A short piece of a dotted outline, resampled into dashes.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    shape: PolyLine,
    rotations: Vec<f64>,
    lengths: Vec<Distance>,
    offset: f64,
}

impl Segment {
    fn new(shape: PolyLine) -> Segment {
        let (rotations, lengths) = rotations_and_lengths(&shape);
        Segment {
            shape,
            rotations,
            lengths,
            offset: -1.0,
        }
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

    /// Either 1 or -1
    pub fn offset(&self) -> f64 {
        self.offset
    }
}

/// A dashed outline, as a list of resampled segments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DottedGeometry {
    segments: Vec<Segment>,
    width: f64,
}

impl DottedGeometry {
    pub fn new(
        settings: &VisualizationSettings,
        shape: PolyLine,
        close_shape: bool,
    ) -> DottedGeometry {
        let mut shape = shape;
        if close_shape && shape.len() > 2 {
            shape.close_loop();
        }
        let step = dash_length(settings, shape.length());
        DottedGeometry {
            segments: split_and_resample(&shape, step),
            width: settings.dotted_contour.segment_width,
        }
    }

    /// Joins the ends of two outlines, usually the two sides of something long.
    pub fn extremes(
        settings: &VisualizationSettings,
        top: &DottedGeometry,
        draw_first_extreme: bool,
        bot: &DottedGeometry,
        draw_last_extreme: bool,
    ) -> DottedGeometry {
        let mut result = DottedGeometry {
            segments: Vec::new(),
            width: settings.dotted_contour.segment_width,
        };
        let step = Distance::meters(settings.dotted_contour.segment_length);
        let (top_first, top_last, bot_first, bot_last) = match (
            top.segments.first(),
            top.segments.last(),
            bot.segments.first(),
            bot.segments.last(),
        ) {
            (Some(a), Some(b), Some(c), Some(d)) => (a, b, c, d),
            _ => {
                return result;
            }
        };

        if draw_first_extreme {
            if let (Some(from), Some(to)) = (top_first.shape.first_pt(), bot_first.shape.first_pt())
            {
                let connector = PolyLine::new(vec![from, to]).resample(step, true);
                result.segments.push(Segment::new(connector));
            }
        }
        if draw_last_extreme {
            if let (Some(from), Some(to)) = (top_last.shape.last_pt(), bot_last.shape.last_pt()) {
                let connector = PolyLine::new(vec![from, to]).resample(step, true);
                let mut segment = Segment::new(connector);
                segment.offset *= -1.0;
                result.segments.push(segment);
            }
        }
        result
    }

    /// Rebuilds around a lane, never closing the shape.
    pub fn update_from_lane_shape(
        &mut self,
        settings: &VisualizationSettings,
        lane_shape: &PolyLine,
    ) {
        self.update_dotted_geometry(settings, lane_shape.clone(), false);
    }

    /// Rebuilds in place. Unlike `new`, long shapes aren't given longer dashes.
    pub fn update_dotted_geometry(
        &mut self,
        settings: &VisualizationSettings,
        shape: PolyLine,
        close_shape: bool,
    ) {
        let mut shape = shape;
        if close_shape && shape.len() > 2 {
            shape.close_loop();
        }
        let step = Distance::meters(settings.dotted_contour.segment_length);
        self.segments = split_and_resample(&shape, step);
        self.width = settings.dotted_contour.segment_width;
    }

    /// Draws every dash, asking `color` for a new color each time. A positive `custom_width`
    /// overrides the width.
    pub fn draw_dotted_geometry(
        &self,
        painter: &mut dyn Painter,
        color: &mut DottedGeometryColor,
        contour_type: DottedContourType,
        custom_width: Option<f64>,
    ) {
        let width = custom_width.filter(|w| *w > 0.0).unwrap_or(self.width);
        for segment in &self.segments {
            for ((pt, rotation), length) in segment
                .shape
                .points()
                .iter()
                .zip(&segment.rotations)
                .zip(&segment.lengths)
            {
                painter.set_color(color.get_color(contour_type));
                painter.draw_box_line(*pt, *rotation, *length, width, 0.0);
            }
        }
    }

    /// Shifts every segment sideways. Positive goes right.
    pub fn move_shape_to_side(&mut self, value: f64) {
        for segment in &mut self.segments {
            let offset = segment.offset;
            *segment = Segment::new(segment.shape.shift_either_direction(value));
            segment.offset = offset;
        }
    }

    pub fn invert_offset(&mut self) {
        for segment in &mut self.segments {
            segment.offset *= -1.0;
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    pub fn segments(&self) -> &Vec<Segment> {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Dashes are normally the configured length, but very long shapes are split into a fixed
/// number of longer dashes instead.
pub fn dash_length(settings: &VisualizationSettings, shape_length: Distance) -> Distance {
    if shape_length > Distance::meters(MAX_DOTTED_GEOMETRY_LENGTH) {
        shape_length / 250.0
    } else {
        Distance::meters(settings.dotted_contour.segment_length)
    }
}

fn split_and_resample(shape: &PolyLine, step: Distance) -> Vec<Segment> {
    shape
        .segments()
        .map(|(pt1, pt2)| Segment::new(PolyLine::new(vec![pt1, pt2]).resample(step, true)))
        .collect()
}

#[cfg(test)]
mod tests {
    use geom::Pt2D;

    use super::*;
    use crate::DrawList;

    fn pl(raw: &[(f64, f64)]) -> PolyLine {
        PolyLine::new(raw.iter().map(|(x, y)| Pt2D::new(*x, *y)).collect())
    }

    #[test]
    fn colors_alternate() {
        let settings = VisualizationSettings::default();
        let dotted = &settings.dotted_contour;
        let mut color = DottedGeometryColor::new(&settings);
        assert_eq!(
            color.get_color(DottedContourType::Inspect),
            dotted.first_inspected_color
        );
        assert_eq!(
            color.get_color(DottedContourType::Inspect),
            dotted.second_inspected_color
        );
        assert_eq!(
            color.get_color(DottedContourType::Front),
            dotted.first_front_color
        );
        color.change_color();
        assert_eq!(
            color.get_color(DottedContourType::Front),
            dotted.first_front_color
        );
        assert_eq!(
            color.get_color(DottedContourType::Green),
            Color::GREEN.changed_brightness(-30)
        );
        color.reset();
        assert_eq!(color.get_color(DottedContourType::Magenta), Color::MAGENTA);
    }

    #[test]
    fn unknown_types_dont_toggle() {
        let settings = VisualizationSettings::default();
        let mut color = DottedGeometryColor::new(&settings);
        assert_eq!(color.get_color(DottedContourType::Green), Color::GREEN);
        assert_eq!(color.get_color(DottedContourType::Remove), Color::BLACK);
        assert_eq!(color.get_color(DottedContourType::Select), Color::BLACK);
        assert_eq!(
            color.get_color(DottedContourType::Green),
            Color::GREEN.changed_brightness(-30)
        );
    }

    #[test]
    fn parse_contour_type() {
        assert_eq!(
            "front".parse::<DottedContourType>().unwrap(),
            DottedContourType::Front
        );
        assert!("sideways".parse::<DottedContourType>().is_err());
    }

    #[test]
    fn split_into_resampled_segments() {
        let settings = VisualizationSettings::default();
        let dotted = DottedGeometry::new(&settings, pl(&[(0.0, 0.0), (10.0, 0.0), (10.0, 3.0)]), false);
        assert_eq!(dotted.segments().len(), 2);
        // 10m at 2m dashes
        assert_eq!(dotted.segments()[0].shape().len(), 6);
        assert_eq!(dotted.segments()[0].rotations().len(), 5);
        // 3m needs 2 dashes of 1.5m
        assert_eq!(
            dotted.segments()[1].lengths(),
            &vec![Distance::meters(1.5), Distance::meters(1.5)]
        );
        assert!(dotted.segments().iter().all(|s| s.offset() == -1.0));
        assert_eq!(dotted.width(), settings.dotted_contour.segment_width);
    }

    #[test]
    fn closing() {
        let settings = VisualizationSettings::default();
        let triangle = pl(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)]);
        assert_eq!(
            DottedGeometry::new(&settings, triangle.clone(), true)
                .segments()
                .len(),
            3
        );
        assert_eq!(
            DottedGeometry::new(&settings, triangle, false)
                .segments()
                .len(),
            2
        );
        // Two points are never closed
        assert_eq!(
            DottedGeometry::new(&settings, pl(&[(0.0, 0.0), (4.0, 0.0)]), true)
                .segments()
                .len(),
            1
        );
        assert!(DottedGeometry::new(&settings, pl(&[(1.0, 1.0)]), true).is_empty());
    }

    #[test]
    fn long_shapes_get_longer_dashes() {
        let settings = VisualizationSettings::default();
        assert_eq!(
            dash_length(&settings, Distance::meters(500.0)),
            Distance::meters(2.0)
        );
        assert_eq!(
            dash_length(&settings, Distance::meters(1000.0)),
            Distance::meters(4.0)
        );

        let dotted = DottedGeometry::new(&settings, pl(&[(0.0, 0.0), (1000.0, 0.0)]), false);
        assert_eq!(dotted.segments()[0].shape().len(), 251);

        // Updating in place doesn't do this
        let mut dotted = DottedGeometry::default();
        dotted.update_dotted_geometry(&settings, pl(&[(0.0, 0.0), (1000.0, 0.0)]), false);
        assert_eq!(dotted.segments()[0].shape().len(), 501);
    }

    #[test]
    fn extremes_join_the_ends() {
        let settings = VisualizationSettings::default();
        let top = DottedGeometry::new(&settings, pl(&[(0.0, 0.0), (10.0, 0.0)]), false);
        let bot = DottedGeometry::new(&settings, pl(&[(0.0, 3.0), (10.0, 3.0)]), false);

        let both = DottedGeometry::extremes(&settings, &top, true, &bot, true);
        assert_eq!(both.segments().len(), 2);
        let first = &both.segments()[0];
        assert_eq!(first.shape().first_pt(), Some(Pt2D::new(0.0, 0.0)));
        assert_eq!(first.shape().last_pt(), Some(Pt2D::new(0.0, 3.0)));
        assert_eq!(first.offset(), -1.0);
        let last = &both.segments()[1];
        assert_eq!(last.shape().first_pt(), Some(Pt2D::new(10.0, 0.0)));
        assert_eq!(last.shape().last_pt(), Some(Pt2D::new(10.0, 3.0)));
        assert_eq!(last.offset(), 1.0);

        assert_eq!(
            DottedGeometry::extremes(&settings, &top, false, &bot, true)
                .segments()
                .len(),
            1
        );
        assert!(
            DottedGeometry::extremes(&settings, &top, true, &DottedGeometry::default(), true)
                .is_empty()
        );
    }

    #[test]
    fn move_to_side() {
        let settings = VisualizationSettings::default();
        let mut dotted = DottedGeometry::new(&settings, pl(&[(0.0, 0.0), (4.0, 0.0)]), false);
        dotted.invert_offset();
        dotted.move_shape_to_side(1.5);
        let segment = &dotted.segments()[0];
        assert_eq!(
            segment.shape(),
            &pl(&[(0.0, 1.5), (2.0, 1.5), (4.0, 1.5)])
        );
        assert_eq!(segment.lengths().len(), 2);
        assert_eq!(segment.offset(), 1.0);
    }

    #[test]
    fn draw_one_color_per_dash() {
        let settings = VisualizationSettings::default();
        let dotted = DottedGeometry::new(&settings, pl(&[(0.0, 0.0), (6.0, 0.0)]), false);
        let mut list = DrawList::new();
        let mut color = DottedGeometryColor::new(&settings);
        dotted.draw_dotted_geometry(&mut list, &mut color, DottedContourType::Front, None);
        let lines = list.box_lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].color, settings.dotted_contour.first_front_color);
        assert_eq!(lines[1].color, settings.dotted_contour.second_front_color);
        assert_eq!(lines[2].color, settings.dotted_contour.first_front_color);
        assert!(lines.iter().all(|l| l.width == 0.2));
        assert_eq!(lines[1].origin, Pt2D::new(2.0, 0.0));

        let mut list = DrawList::new();
        dotted.draw_dotted_geometry(&mut list, &mut color, DottedContourType::Front, Some(1.0));
        assert!(list.box_lines().iter().all(|l| l.width == 1.0));
        let mut list = DrawList::new();
        dotted.draw_dotted_geometry(&mut list, &mut color, DottedContourType::Front, Some(-1.0));
        assert!(list.box_lines().iter().all(|l| l.width == 0.2));
    }
}
