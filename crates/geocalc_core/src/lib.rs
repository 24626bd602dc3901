//! Core domain logic for geocalc.
//! This crate is the single source of truth for formula and input invariants.

pub mod config;
pub mod error;
pub mod export;
pub mod formula;
pub mod logging;
pub mod model;
pub mod schema;
pub mod service;
pub mod sketch;

pub use config::{SessionConfig, PRESET_UNITS};
pub use error::{CalcError, CalcResult};
pub use export::{render_history, render_report, report_fields};
pub use formula::{compute, formula_for, Computation, FormulaEntry, FORMULAS};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::input::{parse_assignments, Dimension, InputError, InputSet};
pub use model::result::{CalculationId, CalculationResult, HistoryEntry};
pub use model::shape::{Operation, ParseKindError, QuantityKind, ShapeKind, ShapeMode};
pub use schema::{default_inputs, fields_for, validate, FieldSpec, ValidatedInputs};
pub use service::session::{
    CalculationSession, Clock, FixedClock, SessionError, SessionResult, SessionState, SystemClock,
};
pub use sketch::{sketch_for, Sketch, ViewBox};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
