//! Per-shape input schema.
//!
//! # Responsibility
//! - List the numeric fields each (shape, operation) pair requires, in form order.
//! - Provide form defaults and validate an `InputSet` before computation.
//!
//! # Invariants
//! - Field lists match the formula table's required inputs exactly.
//! - Every field has `minimum == 0.0`.
//! - Pairs from different shape modes have no schema.

use crate::error::{CalcError, CalcResult};
use crate::model::input::{check_value, Dimension, InputError, InputSet};
use crate::model::shape::{Operation, ShapeKind};
use serde::Serialize;

/// One form field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub dimension: Dimension,
    pub label: &'static str,
    pub default: f64,
    pub minimum: f64,
}

impl FieldSpec {
    const fn new(dimension: Dimension, default: f64) -> Self {
        Self::labeled(dimension, dimension.label(), default)
    }

    const fn labeled(dimension: Dimension, label: &'static str, default: f64) -> Self {
        Self {
            dimension,
            label,
            default,
            minimum: 0.0,
        }
    }
}

const SQUARE: &[FieldSpec] = &[FieldSpec::new(Dimension::Side, 10.0)];
const RECTANGLE: &[FieldSpec] = &[
    FieldSpec::new(Dimension::Length, 12.0),
    FieldSpec::new(Dimension::Width, 5.0),
];
const CIRCLE: &[FieldSpec] = &[FieldSpec::new(Dimension::Radius, 7.0)];
const TRIANGLE_AREA: &[FieldSpec] = &[
    FieldSpec::new(Dimension::Base, 10.0),
    FieldSpec::new(Dimension::Height, 8.0),
];
const TRIANGLE_PERIMETER: &[FieldSpec] = &[
    FieldSpec::labeled(Dimension::Base, "Side A (base)", 10.0),
    FieldSpec::new(Dimension::SideB, 5.0),
    FieldSpec::new(Dimension::SideC, 5.0),
];
const CUBE: &[FieldSpec] = &[FieldSpec::new(Dimension::Side, 10.0)];
const CUBOID: &[FieldSpec] = &[
    FieldSpec::new(Dimension::Length, 10.0),
    FieldSpec::new(Dimension::Width, 5.0),
    FieldSpec::new(Dimension::Height, 4.0),
];
const SPHERE: &[FieldSpec] = &[FieldSpec::new(Dimension::Radius, 7.0)];
const CYLINDER: &[FieldSpec] = &[
    FieldSpec::new(Dimension::Radius, 5.0),
    FieldSpec::new(Dimension::Height, 10.0),
];

/// Returns the ordered form fields for one (shape, operation) pair.
///
/// # Errors
/// - `ConfigurationMismatch` when shape and operation belong to different modes.
pub fn fields_for(shape: ShapeKind, operation: Operation) -> CalcResult<&'static [FieldSpec]> {
    use Operation::*;
    use ShapeKind::*;

    let fields = match (shape, operation) {
        (Square, Area | Perimeter) => SQUARE,
        (Rectangle, Area | Perimeter) => RECTANGLE,
        (Circle, Area | Perimeter) => CIRCLE,
        (Triangle, Area) => TRIANGLE_AREA,
        (Triangle, Perimeter) => TRIANGLE_PERIMETER,
        (Cube, Volume | SurfaceArea) => CUBE,
        (Cuboid, Volume | SurfaceArea) => CUBOID,
        (Sphere, Volume | SurfaceArea) => SPHERE,
        (Cylinder, Volume | SurfaceArea) => CYLINDER,
        _ => return Err(CalcError::ConfigurationMismatch { shape, operation }),
    };
    Ok(fields)
}

/// Builds a fresh input set holding the schema defaults.
pub fn default_inputs(shape: ShapeKind, operation: Operation) -> CalcResult<InputSet> {
    let mut inputs = InputSet::new();
    for field in fields_for(shape, operation)? {
        inputs.insert(field.dimension, field.default)?;
    }
    Ok(inputs)
}

/// Inputs checked against a schema, held in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInputs {
    shape: ShapeKind,
    operation: Operation,
    fields: &'static [FieldSpec],
    values: Vec<f64>,
}

impl ValidatedInputs {
    /// Pair whose schema these values were checked against.
    pub fn pair(&self) -> (ShapeKind, Operation) {
        (self.shape, self.operation)
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Values in schema order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        self.fields
            .iter()
            .position(|field| field.dimension == dimension)
            .map(|index| self.values[index])
    }

    /// Copies the validated values back into a plain input set.
    pub fn to_input_set(&self) -> InputSet {
        InputSet::from_checked(
            self.fields
                .iter()
                .zip(&self.values)
                .map(|(field, value)| (field.dimension, *value)),
        )
    }
}

/// Checks `inputs` against the schema of (shape, operation).
///
/// Fields outside the schema are ignored.
///
/// # Errors
/// - `ConfigurationMismatch` when the pair has no schema.
/// - `InvalidInput` when a required field is missing, negative or not finite.
pub fn validate(
    shape: ShapeKind,
    operation: Operation,
    inputs: &InputSet,
) -> CalcResult<ValidatedInputs> {
    let fields = fields_for(shape, operation)?;
    let mut values = Vec::with_capacity(fields.len());
    for field in fields {
        let value = inputs
            .get(field.dimension)
            .ok_or(InputError::Missing(field.dimension))?;
        if value < field.minimum {
            return Err(InputError::Negative {
                dimension: field.dimension,
                value,
            }
            .into());
        }
        values.push(check_value(field.dimension, value)?);
    }
    Ok(ValidatedInputs {
        shape,
        operation,
        fields,
        values,
    })
}

/// Checks that `dimension` is an input of (shape, operation).
pub fn ensure_in_schema(
    shape: ShapeKind,
    operation: Operation,
    dimension: Dimension,
) -> CalcResult<&'static FieldSpec> {
    fields_for(shape, operation)?
        .iter()
        .find(|field| field.dimension == dimension)
        .ok_or_else(|| InputError::NotInSchema(dimension).into())
}

#[cfg(test)]
mod tests {
    use super::{default_inputs, ensure_in_schema, fields_for, validate};
    use crate::error::CalcError;
    use crate::model::input::{Dimension, InputError, InputSet};
    use crate::model::shape::{Operation, ShapeKind};

    fn dimensions(shape: ShapeKind, operation: Operation) -> Vec<Dimension> {
        fields_for(shape, operation)
            .expect("schema exists")
            .iter()
            .map(|field| field.dimension)
            .collect()
    }

    #[test]
    fn triangle_fields_depend_on_operation() {
        assert_eq!(
            dimensions(ShapeKind::Triangle, Operation::Area),
            vec![Dimension::Base, Dimension::Height]
        );
        assert_eq!(
            dimensions(ShapeKind::Triangle, Operation::Perimeter),
            vec![Dimension::Base, Dimension::SideB, Dimension::SideC]
        );
    }

    #[test]
    fn every_field_has_zero_minimum() {
        for shape in ShapeKind::ALL {
            for operation in shape.mode().operations() {
                let fields = fields_for(shape, *operation).expect("schema exists");
                assert!(fields.iter().all(|field| field.minimum == 0.0));
                assert!(fields.iter().all(|field| field.default >= 0.0));
            }
        }
    }

    #[test]
    fn cross_mode_pairs_have_no_schema() {
        assert_eq!(
            fields_for(ShapeKind::Square, Operation::Volume).expect_err("2d shape, 3d op"),
            CalcError::ConfigurationMismatch {
                shape: ShapeKind::Square,
                operation: Operation::Volume
            }
        );
    }

    #[test]
    fn default_inputs_follow_schema() {
        let inputs = default_inputs(ShapeKind::Cylinder, Operation::Volume).expect("defaults");
        assert_eq!(inputs.get(Dimension::Radius), Some(5.0));
        assert_eq!(inputs.get(Dimension::Height), Some(10.0));
        assert_eq!(inputs.len(), 2);
    }

    #[test]
    fn validate_reports_missing_field() {
        let inputs = InputSet::new()
            .with(Dimension::Length, 3.0)
            .expect("valid value");
        let err = validate(ShapeKind::Rectangle, Operation::Area, &inputs)
            .expect_err("width is missing");
        assert_eq!(
            err,
            CalcError::InvalidInput(InputError::Missing(Dimension::Width))
        );
        assert!(err.is_user_recoverable());
    }

    #[test]
    fn validate_orders_values_by_schema_and_ignores_extras() {
        let inputs = InputSet::new()
            .with(Dimension::SideC, 3.0)
            .and_then(|set| set.with(Dimension::Base, 1.0))
            .and_then(|set| set.with(Dimension::SideB, 2.0))
            .and_then(|set| set.with(Dimension::Radius, 99.0))
            .expect("valid values");
        let validated =
            validate(ShapeKind::Triangle, Operation::Perimeter, &inputs).expect("complete");
        assert_eq!(validated.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(validated.get(Dimension::Radius), None);
        assert_eq!(
            validated.pair(),
            (ShapeKind::Triangle, Operation::Perimeter)
        );

        let copied = validated.to_input_set();
        assert_eq!(copied.len(), 3);
        assert_eq!(copied.get(Dimension::Base), Some(1.0));
        assert_eq!(copied.get(Dimension::SideC), Some(3.0));
        assert!(!copied.contains(Dimension::Radius));
    }

    #[test]
    fn ensure_in_schema_rejects_foreign_field() {
        let err = ensure_in_schema(ShapeKind::Circle, Operation::Area, Dimension::Height)
            .expect_err("circle has no height");
        assert_eq!(
            err,
            CalcError::InvalidInput(InputError::NotInSchema(Dimension::Height))
        );
    }
}
