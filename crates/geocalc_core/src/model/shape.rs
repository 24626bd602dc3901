//! Shape families, shape kinds and the quantities computed for them.
//!
//! # Responsibility
//! - Define the closed set of shapes and operations the calculator supports.
//! - Provide stable string ids used by CLI/FFI callers.
//!
//! # Invariants
//! - Every `ShapeKind` and `Operation` belongs to exactly one `ShapeMode`.
//! - String ids are lowercase snake_case and never change once published.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Active shape family. Exactly one is active per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeMode {
    /// Plane figures.
    #[default]
    #[serde(rename = "2d")]
    TwoD,
    /// Solids.
    #[serde(rename = "3d")]
    ThreeD,
}

impl ShapeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TwoD => "2d",
            Self::ThreeD => "3d",
        }
    }

    /// Shapes selectable in this mode, in picker order.
    pub fn shapes(self) -> &'static [ShapeKind] {
        match self {
            Self::TwoD => SHAPES_2D,
            Self::ThreeD => SHAPES_3D,
        }
    }

    /// Operations selectable in this mode, in picker order.
    pub fn operations(self) -> &'static [Operation] {
        match self {
            Self::TwoD => OPERATIONS_2D,
            Self::ThreeD => OPERATIONS_3D,
        }
    }

    /// Shape selected right after switching into this mode.
    pub fn default_shape(self) -> ShapeKind {
        self.shapes()[0]
    }

    /// Operation selected right after switching into this mode.
    pub fn default_operation(self) -> Operation {
        self.operations()[0]
    }

    pub fn parse(value: &str) -> Result<Self, ParseKindError> {
        match normalize(value, "mode")?.as_str() {
            "2d" | "flat" | "plane" => Ok(Self::TwoD),
            "3d" | "solid" => Ok(Self::ThreeD),
            _ => Err(ParseKindError::Unsupported {
                kind: "mode",
                value: value.trim().to_string(),
            }),
        }
    }
}

impl Display for ShapeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const SHAPES_2D: &[ShapeKind] = &[
    ShapeKind::Square,
    ShapeKind::Rectangle,
    ShapeKind::Circle,
    ShapeKind::Triangle,
];
const SHAPES_3D: &[ShapeKind] = &[
    ShapeKind::Cube,
    ShapeKind::Cuboid,
    ShapeKind::Sphere,
    ShapeKind::Cylinder,
];
const OPERATIONS_2D: &[Operation] = &[Operation::Area, Operation::Perimeter];
const OPERATIONS_3D: &[Operation] = &[Operation::Volume, Operation::SurfaceArea];

/// Shape the user picks in the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Square,
    Rectangle,
    Circle,
    Triangle,
    Cube,
    Cuboid,
    Sphere,
    Cylinder,
}

impl ShapeKind {
    /// Every supported shape across both modes.
    pub const ALL: [ShapeKind; 8] = [
        Self::Square,
        Self::Rectangle,
        Self::Circle,
        Self::Triangle,
        Self::Cube,
        Self::Cuboid,
        Self::Sphere,
        Self::Cylinder,
    ];

    /// Stable string id used by CLI/FFI callers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::Cube => "cube",
            Self::Cuboid => "cuboid",
            Self::Sphere => "sphere",
            Self::Cylinder => "cylinder",
        }
    }

    /// User-facing display name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Square => "Square",
            Self::Rectangle => "Rectangle",
            Self::Circle => "Circle",
            Self::Triangle => "Triangle",
            Self::Cube => "Cube",
            Self::Cuboid => "Cuboid",
            Self::Sphere => "Sphere",
            Self::Cylinder => "Cylinder",
        }
    }

    pub fn mode(self) -> ShapeMode {
        match self {
            Self::Square | Self::Rectangle | Self::Circle | Self::Triangle => ShapeMode::TwoD,
            Self::Cube | Self::Cuboid | Self::Sphere | Self::Cylinder => ShapeMode::ThreeD,
        }
    }

    pub fn parse(value: &str) -> Result<Self, ParseKindError> {
        let normalized = normalize(value, "shape")?;
        Self::ALL
            .into_iter()
            .find(|shape| shape.as_str() == normalized)
            .ok_or_else(|| ParseKindError::Unsupported {
                kind: "shape",
                value: value.trim().to_string(),
            })
    }
}

impl Display for ShapeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Physical dimension of a computed quantity, used to pick the unit suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    Length,
    Area,
    Volume,
}

/// Quantity being computed for a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Area,
    Perimeter,
    Volume,
    SurfaceArea,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Self::Area,
        Self::Perimeter,
        Self::Volume,
        Self::SurfaceArea,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Perimeter => "perimeter",
            Self::Volume => "volume",
            Self::SurfaceArea => "surface_area",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Area => "Area",
            Self::Perimeter => "Perimeter",
            Self::Volume => "Volume",
            Self::SurfaceArea => "Surface area",
        }
    }

    pub fn mode(self) -> ShapeMode {
        match self {
            Self::Area | Self::Perimeter => ShapeMode::TwoD,
            Self::Volume | Self::SurfaceArea => ShapeMode::ThreeD,
        }
    }

    pub fn quantity(self) -> QuantityKind {
        match self {
            Self::Perimeter => QuantityKind::Length,
            Self::Area | Self::SurfaceArea => QuantityKind::Area,
            Self::Volume => QuantityKind::Volume,
        }
    }

    /// Accepts `surface_area`, `surface-area` and `surfacearea`.
    pub fn parse(value: &str) -> Result<Self, ParseKindError> {
        let normalized = normalize(value, "operation")?.replace(['-', ' '], "_");
        match normalized.as_str() {
            "area" => Ok(Self::Area),
            "perimeter" => Ok(Self::Perimeter),
            "volume" => Ok(Self::Volume),
            "surface_area" | "surfacearea" => Ok(Self::SurfaceArea),
            _ => Err(ParseKindError::Unsupported {
                kind: "operation",
                value: value.trim().to_string(),
            }),
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse errors for shape/operation/mode ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseKindError {
    Empty(&'static str),
    Unsupported { kind: &'static str, value: String },
}

impl Display for ParseKindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(kind) => write!(f, "{kind} value must not be empty"),
            Self::Unsupported { kind, value } => write!(f, "{kind} is unsupported: `{value}`"),
        }
    }
}

impl Error for ParseKindError {}

fn normalize(value: &str, kind: &'static str) -> Result<String, ParseKindError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ParseKindError::Empty(kind));
    }
    Ok(trimmed.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::{Operation, ParseKindError, QuantityKind, ShapeKind, ShapeMode};

    #[test]
    fn every_shape_round_trips_through_its_id() {
        for shape in ShapeKind::ALL {
            assert_eq!(
                ShapeKind::parse(shape.as_str()).expect("known shape id"),
                shape
            );
        }
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(
            ShapeKind::parse("  Cylinder ").expect("cylinder parse"),
            ShapeKind::Cylinder
        );
        assert_eq!(
            Operation::parse("Surface-Area").expect("surface area parse"),
            Operation::SurfaceArea
        );
        assert_eq!(ShapeMode::parse("3D").expect("3d parse"), ShapeMode::ThreeD);
    }

    #[test]
    fn parse_rejects_empty_and_unknown_values() {
        assert_eq!(
            ShapeKind::parse("   ").expect_err("empty must fail"),
            ParseKindError::Empty("shape")
        );
        assert_eq!(
            Operation::parse("diagonal").expect_err("unknown must fail"),
            ParseKindError::Unsupported {
                kind: "operation",
                value: "diagonal".to_string()
            }
        );
    }

    #[test]
    fn mode_families_partition_shapes_and_operations() {
        for mode in [ShapeMode::TwoD, ShapeMode::ThreeD] {
            assert!(mode.shapes().iter().all(|shape| shape.mode() == mode));
            assert!(mode.operations().iter().all(|op| op.mode() == mode));
        }
        assert_eq!(
            ShapeMode::TwoD.shapes().len() + ShapeMode::ThreeD.shapes().len(),
            ShapeKind::ALL.len()
        );
    }

    #[test]
    fn quantity_kind_follows_operation() {
        assert_eq!(Operation::Perimeter.quantity(), QuantityKind::Length);
        assert_eq!(Operation::SurfaceArea.quantity(), QuantityKind::Area);
        assert_eq!(Operation::Volume.quantity(), QuantityKind::Volume);
    }
}
