use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::Color;

/// How dashed outlines look.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DottedContourSettings {
    /// Width of every dash
    pub segment_width: f64,
    /// Dashes are resampled to be at most this long
    pub segment_length: f64,
    pub first_inspected_color: Color,
    pub second_inspected_color: Color,
    pub first_front_color: Color,
    pub second_front_color: Color,
}

impl Default for DottedContourSettings {
    fn default() -> DottedContourSettings {
        DottedContourSettings {
            segment_width: 0.2,
            segment_length: 2.0,
            first_inspected_color: Color::rgb(235, 235, 235),
            second_inspected_color: Color::BLACK,
            first_front_color: Color::rgb(0, 0, 255),
            second_front_color: Color::GREEN,
        }
    }
}

/// Arrowheads on parent/child lines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrowSettings {
    pub width: f64,
    pub length: f64,
    pub offset: f64,
}

impl Default for ArrowSettings {
    fn default() -> ArrowSettings {
        ArrowSettings {
            width: 1.0,
            length: 1.0,
            offset: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationSettings {
    pub dotted_contour: DottedContourSettings,
    pub arrows: ArrowSettings,
    /// Multiplies every lane's width when drawing outlines around it
    pub lane_width_exaggeration: f64,
    /// Geometry point labels only show up when zoomed in at least this far
    pub geometry_points_text_detail: f64,
}

impl Default for VisualizationSettings {
    fn default() -> VisualizationSettings {
        VisualizationSettings {
            dotted_contour: DottedContourSettings::default(),
            arrows: ArrowSettings::default(),
            lane_width_exaggeration: 1.0,
            geometry_points_text_detail: 10.0,
        }
    }
}

impl VisualizationSettings {
    pub fn load(path: &str) -> Result<VisualizationSettings> {
        let raw = fs_err::read_to_string(path)?;
        let settings = serde_json::from_str(&raw)
            .with_context(|| format!("parsing visualization settings from {}", path))?;
        Ok(settings)
    }
}

/// Which side of the road vehicles drive on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrivingSide {
    Right,
    Left,
}

impl Default for DrivingSide {
    fn default() -> DrivingSide {
        DrivingSide::Right
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    pub driving_side: DrivingSide,
}

impl EditorOptions {
    pub fn load(path: &str) -> Result<EditorOptions> {
        let raw = fs_err::read_to_string(path)?;
        let options = serde_json::from_str(&raw)
            .with_context(|| format!("parsing editor options from {}", path))?;
        Ok(options)
    }

    pub fn lefthand(&self) -> bool {
        self.driving_side == DrivingSide::Left
    }
}
