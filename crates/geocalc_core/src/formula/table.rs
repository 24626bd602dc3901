//! Static closed-form formula entries.

use crate::model::result::format_input as n;
use crate::model::shape::{Operation, ShapeKind};
use std::f64::consts::PI;

/// One row of the formula table.
///
/// `evaluate` and `substitute` receive values in the schema order of the
/// same (shape, operation) pair.
#[derive(Clone, Copy)]
pub struct FormulaEntry {
    pub shape: ShapeKind,
    pub operation: Operation,
    /// Human-readable formula, e.g. `π × r²`.
    pub formula: &'static str,
    pub evaluate: fn(&[f64]) -> f64,
    /// Formula with the input values substituted in.
    pub substitute: fn(&[f64]) -> String,
}

impl std::fmt::Debug for FormulaEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormulaEntry")
            .field("shape", &self.shape)
            .field("operation", &self.operation)
            .field("formula", &self.formula)
            .finish()
    }
}

pub static FORMULAS: &[FormulaEntry] = &[
    FormulaEntry {
        shape: ShapeKind::Square,
        operation: Operation::Area,
        formula: "side × side",
        evaluate: |v| v[0] * v[0],
        substitute: |v| format!("{} × {}", n(v[0]), n(v[0])),
    },
    FormulaEntry {
        shape: ShapeKind::Square,
        operation: Operation::Perimeter,
        formula: "4 × side",
        evaluate: |v| 4.0 * v[0],
        substitute: |v| format!("4 × {}", n(v[0])),
    },
    FormulaEntry {
        shape: ShapeKind::Rectangle,
        operation: Operation::Area,
        formula: "length × width",
        evaluate: |v| v[0] * v[1],
        substitute: |v| format!("{} × {}", n(v[0]), n(v[1])),
    },
    FormulaEntry {
        shape: ShapeKind::Rectangle,
        operation: Operation::Perimeter,
        formula: "2 × (length + width)",
        evaluate: |v| 2.0 * (v[0] + v[1]),
        substitute: |v| format!("2 × ({} + {})", n(v[0]), n(v[1])),
    },
    FormulaEntry {
        shape: ShapeKind::Circle,
        operation: Operation::Area,
        formula: "π × r²",
        evaluate: |v| PI * v[0] * v[0],
        substitute: |v| format!("π × {}²", n(v[0])),
    },
    FormulaEntry {
        shape: ShapeKind::Circle,
        operation: Operation::Perimeter,
        formula: "2 × π × r",
        evaluate: |v| 2.0 * PI * v[0],
        substitute: |v| format!("2 × π × {}", n(v[0])),
    },
    FormulaEntry {
        shape: ShapeKind::Triangle,
        operation: Operation::Area,
        formula: "0.5 × base × height",
        evaluate: |v| 0.5 * v[0] * v[1],
        substitute: |v| format!("0.5 × {} × {}", n(v[0]), n(v[1])),
    },
    FormulaEntry {
        shape: ShapeKind::Triangle,
        operation: Operation::Perimeter,
        formula: "side A + side B + side C",
        evaluate: |v| v[0] + v[1] + v[2],
        substitute: |v| format!("{} + {} + {}", n(v[0]), n(v[1]), n(v[2])),
    },
    FormulaEntry {
        shape: ShapeKind::Cube,
        operation: Operation::Volume,
        formula: "side³",
        evaluate: |v| v[0].powi(3),
        substitute: |v| format!("{}³", n(v[0])),
    },
    FormulaEntry {
        shape: ShapeKind::Cube,
        operation: Operation::SurfaceArea,
        formula: "6 × side²",
        evaluate: |v| 6.0 * v[0] * v[0],
        substitute: |v| format!("6 × {}²", n(v[0])),
    },
    FormulaEntry {
        shape: ShapeKind::Cuboid,
        operation: Operation::Volume,
        formula: "length × width × height",
        evaluate: |v| v[0] * v[1] * v[2],
        substitute: |v| format!("{} × {} × {}", n(v[0]), n(v[1]), n(v[2])),
    },
    FormulaEntry {
        shape: ShapeKind::Cuboid,
        operation: Operation::SurfaceArea,
        formula: "2 × (lw + lh + wh)",
        evaluate: |v| 2.0 * (v[0] * v[1] + v[0] * v[2] + v[1] * v[2]),
        substitute: |v| {
            let (l, w, h) = (n(v[0]), n(v[1]), n(v[2]));
            format!("2 × ({l} × {w} + {l} × {h} + {w} × {h})")
        },
    },
    FormulaEntry {
        shape: ShapeKind::Sphere,
        operation: Operation::Volume,
        formula: "(4/3) × π × r³",
        evaluate: |v| (4.0 / 3.0) * PI * v[0].powi(3),
        substitute: |v| format!("(4/3) × π × {}³", n(v[0])),
    },
    FormulaEntry {
        shape: ShapeKind::Sphere,
        operation: Operation::SurfaceArea,
        formula: "4 × π × r²",
        evaluate: |v| 4.0 * PI * v[0] * v[0],
        substitute: |v| format!("4 × π × {}²", n(v[0])),
    },
    FormulaEntry {
        shape: ShapeKind::Cylinder,
        operation: Operation::Volume,
        formula: "π × r² × height",
        evaluate: |v| PI * v[0] * v[0] * v[1],
        substitute: |v| format!("π × {}² × {}", n(v[0]), n(v[1])),
    },
    FormulaEntry {
        shape: ShapeKind::Cylinder,
        operation: Operation::SurfaceArea,
        formula: "2 × π × r × (r + height)",
        evaluate: |v| 2.0 * PI * v[0] * (v[0] + v[1]),
        substitute: |v| {
            let (r, h) = (n(v[0]), n(v[1]));
            format!("2 × π × {r} × ({r} + {h})")
        },
    },
];
