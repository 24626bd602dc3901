//! Calculation result records and history summaries.
//!
//! # Responsibility
//! - Define the immutable record produced by one submitted calculation.
//! - Define the summary row appended to the session history.
//! - Format values and unit labels for display.
//!
//! # Invariants
//! - `value` keeps full floating-point precision; only display rounds.
//! - Records are never mutated after creation.

use crate::model::input::InputSet;
use crate::model::shape::{Operation, QuantityKind, ShapeKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label used when the user leaves the unit blank.
pub const FALLBACK_UNIT: &str = "unit";

/// Stable identifier of one calculation.
pub type CalculationId = Uuid;

/// Outcome of one submitted calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub id: CalculationId,
    pub shape: ShapeKind,
    pub operation: Operation,
    /// Full-precision result.
    pub value: f64,
    /// Ordered derivation narrative.
    pub steps: Vec<String>,
    /// Inputs exactly as validated for this calculation.
    pub inputs: InputSet,
    /// Length unit label shared by all inputs.
    pub unit: String,
    /// Unix epoch milliseconds.
    pub timestamp_ms: i64,
}

impl CalculationResult {
    /// Result rounded to two decimals.
    pub fn display_value(&self) -> String {
        format_rounded(self.value)
    }

    /// Unit of the computed quantity, e.g. `cm²` for an area.
    pub fn quantity_unit(&self) -> String {
        quantity_unit(&self.unit, self.operation.quantity())
    }

    /// Summary row for the session history.
    pub fn summary(&self) -> HistoryEntry {
        HistoryEntry {
            id: self.id,
            timestamp_ms: self.timestamp_ms,
            shape: self.shape,
            operation: self.operation,
            unit: self.unit.clone(),
            value: self.value,
        }
    }
}

/// One row of the append-only session history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: CalculationId,
    pub timestamp_ms: i64,
    pub shape: ShapeKind,
    pub operation: Operation,
    pub unit: String,
    pub value: f64,
}

impl HistoryEntry {
    pub fn display_value(&self) -> String {
        format_rounded(self.value)
    }

    pub fn quantity_unit(&self) -> String {
        quantity_unit(&self.unit, self.operation.quantity())
    }
}

/// Appends the power suffix matching `quantity` to a length unit.
pub fn quantity_unit(unit: &str, quantity: QuantityKind) -> String {
    let base = display_unit(unit);
    match quantity {
        QuantityKind::Length => base.to_string(),
        QuantityKind::Area => format!("{base}²"),
        QuantityKind::Volume => format!("{base}³"),
    }
}

/// Returns the unit label, or [`FALLBACK_UNIT`] when it is blank.
pub fn display_unit(unit: &str) -> &str {
    let trimmed = unit.trim();
    if trimmed.is_empty() {
        FALLBACK_UNIT
    } else {
        trimmed
    }
}

/// Two-decimal rendering used for every displayed result.
pub fn format_rounded(value: f64) -> String {
    format!("{value:.2}")
}

/// Compact rendering for echoed inputs: `10` rather than `10.00`.
pub fn format_input(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::{format_input, format_rounded, quantity_unit};
    use crate::model::shape::QuantityKind;

    #[test]
    fn quantity_unit_adds_power_suffix() {
        assert_eq!(quantity_unit("cm", QuantityKind::Length), "cm");
        assert_eq!(quantity_unit("m", QuantityKind::Area), "m²");
        assert_eq!(quantity_unit("mm", QuantityKind::Volume), "mm³");
    }

    #[test]
    fn blank_unit_falls_back_to_generic_label() {
        assert_eq!(quantity_unit("  ", QuantityKind::Area), "unit²");
    }

    #[test]
    fn formatting_rounds_results_but_not_inputs() {
        assert_eq!(format_rounded(std::f64::consts::PI * 49.0), "153.94");
        assert_eq!(format_rounded(100.0), "100.00");
        assert_eq!(format_input(10.0), "10");
        assert_eq!(format_input(2.5), "2.5");
    }
}
