//! Shape outlines for result visualization.
//!
//! Produces geometry for the presentation layer to draw; no rendering here.

use crate::model::input::Dimension;
use crate::model::result::CalculationResult;
use crate::model::shape::{Operation, ShapeKind};
use serde::Serialize;

/// Space left around a plane figure inside its view box.
pub const VIEW_PADDING: f64 = 1.0;

/// Axis-aligned drawing area for plane figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewBox {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl ViewBox {
    fn around(points: &[[f64; 2]]) -> Self {
        let mut min = [f64::INFINITY; 2];
        let mut max = [f64::NEG_INFINITY; 2];
        for point in points {
            for axis in 0..2 {
                min[axis] = min[axis].min(point[axis]);
                max[axis] = max[axis].max(point[axis]);
            }
        }
        Self {
            min: [min[0] - VIEW_PADDING, min[1] - VIEW_PADDING],
            max: [max[0] + VIEW_PADDING, max[1] + VIEW_PADDING],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Sketch {
    /// Closed outline, counter-clockwise from the origin.
    Polygon { points: Vec<[f64; 2]>, view: ViewBox },
    /// Circle centred on the origin.
    Circle { radius: f64, view: ViewBox },
    /// Rectangular solid with one corner on the origin; vertices bottom face first.
    Box { vertices: Vec<[f64; 3]> },
    Sphere { radius: f64 },
    Cylinder { radius: f64, height: f64 },
}

/// Builds the outline for a result.
///
/// Returns `None` when the inputs needed for the outline are absent, or when
/// three triangle sides cannot close.
pub fn sketch_for(result: &CalculationResult) -> Option<Sketch> {
    let get = |dimension: Dimension| result.inputs.get(dimension);

    match result.shape {
        ShapeKind::Square => {
            let side = get(Dimension::Side)?;
            Some(polygon(rectangle_corners(side, side)))
        }
        ShapeKind::Rectangle => {
            let length = get(Dimension::Length)?;
            let width = get(Dimension::Width)?;
            Some(polygon(rectangle_corners(length, width)))
        }
        ShapeKind::Circle => {
            let radius = get(Dimension::Radius)?;
            Some(Sketch::Circle {
                radius,
                view: ViewBox::around(&[[-radius, -radius], [radius, radius]]),
            })
        }
        ShapeKind::Triangle => match result.operation {
            Operation::Perimeter => triangle_from_sides(
                get(Dimension::Base)?,
                get(Dimension::SideB)?,
                get(Dimension::SideC)?,
            )
            .map(polygon),
            _ => {
                let base = get(Dimension::Base)?;
                let height = get(Dimension::Height)?;
                Some(polygon(vec![[0.0, 0.0], [base, 0.0], [base / 2.0, height]]))
            }
        },
        ShapeKind::Cube => {
            let side = get(Dimension::Side)?;
            Some(box_vertices(side, side, side))
        }
        ShapeKind::Cuboid => Some(box_vertices(
            get(Dimension::Length)?,
            get(Dimension::Width)?,
            get(Dimension::Height)?,
        )),
        ShapeKind::Sphere => Some(Sketch::Sphere {
            radius: get(Dimension::Radius)?,
        }),
        ShapeKind::Cylinder => Some(Sketch::Cylinder {
            radius: get(Dimension::Radius)?,
            height: get(Dimension::Height)?,
        }),
    }
}

fn polygon(points: Vec<[f64; 2]>) -> Sketch {
    let view = ViewBox::around(&points);
    Sketch::Polygon { points, view }
}

fn rectangle_corners(length: f64, width: f64) -> Vec<[f64; 2]> {
    vec![[0.0, 0.0], [length, 0.0], [length, width], [0.0, width]]
}

/// Places side A on the x axis and the apex by the law of cosines.
fn triangle_from_sides(a: f64, b: f64, c: f64) -> Option<Vec<[f64; 2]>> {
    if a <= 0.0 || a + b < c || a + c < b || b + c < a {
        return None;
    }
    let x = (a * a + c * c - b * b) / (2.0 * a);
    let y = (c * c - x * x).max(0.0).sqrt();
    Some(vec![[0.0, 0.0], [a, 0.0], [x, y]])
}

fn box_vertices(length: f64, width: f64, height: f64) -> Sketch {
    let mut vertices = Vec::with_capacity(8);
    for z in [0.0, height] {
        for [x, y] in [[0.0, 0.0], [length, 0.0], [length, width], [0.0, width]] {
            vertices.push([x, y, z]);
        }
    }
    Sketch::Box { vertices }
}
