use anyhow::{bail, Context, Result};

use editor_geom::contour::{draw_dotted_contour_closed_shape, draw_dotted_contour_shape};
use editor_geom::{DottedContourType, DrawList, VisualizationSettings};
use geom::{PolyLine, Pt2D};

pub fn run(
    input: String,
    settings: Option<String>,
    contour_type: DottedContourType,
    closed: bool,
    width: f64,
    exaggeration: f64,
) -> Result<()> {
    let shape = read_polyline(&input)?;
    let settings = match settings {
        Some(path) => VisualizationSettings::load(&path)?,
        None => VisualizationSettings::default(),
    };

    let list = outline(&shape, &settings, contour_type, closed, width, exaggeration)?;
    info!(
        "Outlined {} points with {} dashes",
        shape.len(),
        list.box_lines().len()
    );
    println!("{}", serde_json::to_string_pretty(&list)?);
    Ok(())
}

fn outline(
    shape: &PolyLine,
    settings: &VisualizationSettings,
    contour_type: DottedContourType,
    closed: bool,
    width: f64,
    exaggeration: f64,
) -> Result<DrawList> {
    if !width.is_finite() || !exaggeration.is_finite() {
        bail!("The width and exaggeration must be finite");
    }
    let mut list = DrawList::new();
    if closed {
        draw_dotted_contour_closed_shape(
            &mut list,
            contour_type,
            settings,
            shape,
            exaggeration,
            None,
        );
    } else {
        draw_dotted_contour_shape(
            &mut list,
            contour_type,
            settings,
            shape,
            width,
            exaggeration,
            true,
            true,
            None,
        );
    }
    Ok(list)
}

pub fn read_polyline(path: &str) -> Result<PolyLine> {
    let raw: Vec<[f64; 2]> = serde_json::from_str(&fs_err::read_to_string(path)?)
        .with_context(|| format!("parsing points from {}", path))?;
    let mut pts = Vec::new();
    for [x, y] in raw {
        if !x.is_finite() || !y.is_finite() {
            bail!("{} has a bad point {}, {}", path, x, y);
        }
        pts.push(Pt2D::new(x, y));
    }
    Ok(PolyLine::new(pts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_sizes_are_rejected() {
        let settings = VisualizationSettings::default();
        let shape = PolyLine::new(vec![Pt2D::new(0.0, 0.0), Pt2D::new(10.0, 0.0)]);
        let inspect = DottedContourType::Inspect;

        assert!(outline(&shape, &settings, inspect, false, f64::NAN, 1.0).is_err());
        assert!(outline(&shape, &settings, inspect, false, 1.0, f64::INFINITY).is_err());
        assert!(outline(&shape, &settings, inspect, true, 1.0, f64::NEG_INFINITY).is_err());

        let list = outline(&shape, &settings, inspect, false, 1.0, 1.0).unwrap();
        assert!(!list.is_empty());
    }
}
