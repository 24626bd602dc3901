//! Formula table: (shape, operation, inputs) to value and derivation steps.
//!
//! # Responsibility
//! - Evaluate the closed-form formula of every supported pair.
//! - Narrate the substitution as ordered, human-readable steps.
//!
//! # Invariants
//! - Every pair reachable through a shape mode has exactly one entry.
//! - `compute` is pure: identical arguments yield identical output.
//! - Inputs are validated against the schema before any entry runs.
//!
//! # See also
//! - `crate::schema` for field order, which entry closures index by position.

mod table;

pub use table::{FormulaEntry, FORMULAS};

use crate::error::{CalcError, CalcResult};
use crate::model::input::InputSet;
use crate::model::result::{display_unit, format_input, format_rounded, quantity_unit};
use crate::model::shape::{Operation, ShapeKind};
use crate::schema::{validate, ValidatedInputs};

/// Value and narrative produced by one formula evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Computation {
    pub value: f64,
    pub steps: Vec<String>,
}

/// Looks up the table entry for one pair.
pub fn formula_for(shape: ShapeKind, operation: Operation) -> CalcResult<&'static FormulaEntry> {
    FORMULAS
        .iter()
        .find(|entry| entry.shape == shape && entry.operation == operation)
        .ok_or(CalcError::ConfigurationMismatch { shape, operation })
}

/// Validates `inputs` and evaluates the matching formula.
///
/// `unit` only labels the steps; it never changes the value.
///
/// # Errors
/// - `InvalidInput` for missing, negative or non-finite required fields.
/// - `ConfigurationMismatch` when the pair has no schema or table entry.
pub fn compute(
    shape: ShapeKind,
    operation: Operation,
    inputs: &InputSet,
    unit: &str,
) -> CalcResult<Computation> {
    let validated = validate(shape, operation, inputs)?;
    compute_validated(shape, operation, &validated, unit)
}

/// Evaluates an already validated input set.
///
/// # Errors
/// - `ConfigurationMismatch` when the pair has no table entry, or when
///   `inputs` were validated for a different pair.
pub fn compute_validated(
    shape: ShapeKind,
    operation: Operation,
    inputs: &ValidatedInputs,
    unit: &str,
) -> CalcResult<Computation> {
    let entry = formula_for(shape, operation)?;
    // Why: table entries index values positionally; another pair's schema
    // may hold fewer values than this entry reads.
    if inputs.pair() != (shape, operation) {
        return Err(CalcError::ConfigurationMismatch { shape, operation });
    }
    let values = inputs.values();
    let value = (entry.evaluate)(values);
    let symbol = symbol(operation);
    let unit_label = display_unit(unit);

    let given = inputs
        .fields()
        .iter()
        .zip(values)
        .map(|(field, value)| format!("{} = {} {unit_label}", field.label, format_input(*value)))
        .collect::<Vec<_>>()
        .join(", ");

    let steps = vec![
        format!("Given {given}"),
        format!(
            "{} of {} = {}",
            operation.label(),
            shape.label().to_ascii_lowercase(),
            entry.formula
        ),
        format!("{symbol} = {}", (entry.substitute)(values)),
        format!(
            "{symbol} = {} {}",
            format_rounded(value),
            quantity_unit(unit, operation.quantity())
        ),
    ];

    Ok(Computation { value, steps })
}

fn symbol(operation: Operation) -> &'static str {
    match operation {
        Operation::Area => "A",
        Operation::Perimeter => "P",
        Operation::Volume => "V",
        Operation::SurfaceArea => "SA",
    }
}

#[cfg(test)]
mod tests {
    use super::{compute, compute_validated, formula_for, FORMULAS};
    use crate::error::CalcError;
    use crate::model::input::{Dimension, InputSet};
    use crate::model::shape::{Operation, ShapeKind};
    use crate::schema::{fields_for, validate};

    #[test]
    fn validated_inputs_are_bound_to_their_pair() {
        let inputs = InputSet::new()
            .with(Dimension::Side, 2.0)
            .expect("valid side");
        let validated =
            validate(ShapeKind::Square, Operation::Area, &inputs).expect("square area inputs");

        let err = compute_validated(ShapeKind::Cuboid, Operation::Volume, &validated, "cm")
            .expect_err("square inputs cannot feed a cuboid");
        assert_eq!(
            err,
            CalcError::ConfigurationMismatch {
                shape: ShapeKind::Cuboid,
                operation: Operation::Volume,
            }
        );

        let err = compute_validated(ShapeKind::Square, Operation::Perimeter, &validated, "cm")
            .expect_err("same shape, other operation");
        assert!(matches!(err, CalcError::ConfigurationMismatch { .. }));

        let area = compute_validated(ShapeKind::Square, Operation::Area, &validated, "cm")
            .expect("matching pair");
        assert_eq!(area.value, 4.0);
    }

    #[test]
    fn table_has_one_entry_per_reachable_pair() {
        for shape in ShapeKind::ALL {
            for operation in shape.mode().operations() {
                let matches = FORMULAS
                    .iter()
                    .filter(|entry| entry.shape == shape && entry.operation == *operation)
                    .count();
                assert_eq!(matches, 1, "{shape:?}/{operation:?}");
            }
        }
        assert_eq!(FORMULAS.len(), 16);
    }

    #[test]
    fn table_and_schema_cover_the_same_pairs() {
        for shape in ShapeKind::ALL {
            for operation in Operation::ALL {
                assert_eq!(
                    formula_for(shape, operation).is_ok(),
                    fields_for(shape, operation).is_ok(),
                    "{shape:?}/{operation:?}"
                );
            }
        }
    }

    #[test]
    fn steps_narrate_inputs_formula_and_result() {
        let inputs = InputSet::new()
            .with(Dimension::Side, 10.0)
            .expect("valid side");
        let computation =
            compute(ShapeKind::Square, Operation::Area, &inputs, "cm").expect("square area");

        assert_eq!(
            computation.steps,
            vec![
                "Given Side length = 10 cm".to_string(),
                "Area of square = side × side".to_string(),
                "A = 10 × 10".to_string(),
                "A = 100.00 cm²".to_string(),
            ]
        );
    }

    #[test]
    fn invalid_input_is_reported_before_lookup() {
        let err = compute(ShapeKind::Circle, Operation::Area, &InputSet::new(), "cm")
            .expect_err("radius missing");
        assert!(matches!(err, CalcError::InvalidInput(_)));
    }

    #[test]
    fn mismatched_pair_is_a_configuration_error() {
        let err = formula_for(ShapeKind::Sphere, Operation::Perimeter)
            .expect_err("no 2d op on a sphere");
        assert!(!err.is_user_recoverable());
    }
}
