//! Plain-text report rendering for the export boundary.
//!
//! # Responsibility
//! - Flatten a result into ordered `key: value` pairs.
//! - Render reports and history tables as plain text lines.
//!
//! # Invariants
//! - Output is plain UTF-8 text; no binary document format is produced.
//! - Inputs are listed in schema order.

use crate::model::result::{display_unit, format_input, CalculationResult, HistoryEntry};
use crate::schema::fields_for;

pub const REPORT_TITLE: &str = "Calculation Report";
pub const REPORT_FOOTER: &str = "Generated by geocalc";
pub const EMPTY_HISTORY: &str = "No calculations yet.";

/// Ordered `key: value` pairs describing one result.
pub fn report_fields(result: &CalculationResult) -> Vec<(String, String)> {
    let unit = display_unit(&result.unit);
    let mut fields = vec![
        ("Shape".to_string(), result.shape.label().to_string()),
        ("Operation".to_string(), result.operation.label().to_string()),
    ];

    let labeled = fields_for(result.shape, result.operation).unwrap_or(&[]);
    for field in labeled {
        if let Some(value) = result.inputs.get(field.dimension) {
            fields.push((
                field.label.to_string(),
                format!("{} {unit}", format_input(value)),
            ));
        }
    }

    fields.push((
        "Result".to_string(),
        format!("{} {}", result.display_value(), result.quantity_unit()),
    ));
    fields.push(("Timestamp (ms)".to_string(), result.timestamp_ms.to_string()));
    fields.push(("Id".to_string(), result.id.to_string()));
    fields
}

/// Full report: title, key/value lines, numbered steps, footer.
pub fn render_report(result: &CalculationResult) -> String {
    let mut lines = vec![REPORT_TITLE.to_string(), String::new()];
    lines.extend(
        report_fields(result)
            .into_iter()
            .map(|(key, value)| format!("{key}: {value}")),
    );

    if !result.steps.is_empty() {
        lines.push(String::new());
        lines.push("Steps:".to_string());
        lines.extend(
            result
                .steps
                .iter()
                .enumerate()
                .map(|(index, step)| format!("{}. {step}", index + 1)),
        );
    }

    lines.push(String::new());
    lines.push(REPORT_FOOTER.to_string());
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Fixed-width history table, oldest first.
pub fn render_history(history: &[HistoryEntry]) -> String {
    if history.is_empty() {
        return format!("{EMPTY_HISTORY}\n");
    }

    let mut text = format!(
        "{:<4} {:<15} {:<10} {:<13} {:>14} {}\n",
        "#", "timestamp_ms", "shape", "operation", "result", "unit"
    );
    for (index, entry) in history.iter().enumerate() {
        text.push_str(&format!(
            "{:<4} {:<15} {:<10} {:<13} {:>14} {}\n",
            index + 1,
            entry.timestamp_ms,
            entry.shape.as_str(),
            entry.operation.as_str(),
            entry.display_value(),
            entry.quantity_unit()
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::{render_history, render_report, report_fields, EMPTY_HISTORY, REPORT_TITLE};
    use crate::config::SessionConfig;
    use crate::model::input::{Dimension, InputSet};
    use crate::model::shape::{Operation, ShapeKind, ShapeMode};
    use crate::service::session::{CalculationSession, FixedClock};

    fn cylinder_session() -> CalculationSession<FixedClock> {
        let config = SessionConfig {
            mode: ShapeMode::ThreeD,
            unit: "m".to_string(),
        };
        let mut session = CalculationSession::with_clock(config, FixedClock(42));
        let inputs = InputSet::new()
            .with(Dimension::Radius, 5.0)
            .and_then(|set| set.with(Dimension::Height, 10.0))
            .expect("valid inputs");
        session
            .submit_with(ShapeKind::Cylinder, Operation::Volume, &inputs)
            .expect("cylinder volume");
        session
    }

    #[test]
    fn report_fields_list_inputs_in_schema_order() {
        let session = cylinder_session();
        let result = session.current().expect("current result");
        let keys = report_fields(result)
            .into_iter()
            .map(|(key, _)| key)
            .collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec![
                "Shape",
                "Operation",
                "Radius",
                "Height",
                "Result",
                "Timestamp (ms)",
                "Id"
            ]
        );
    }

    #[test]
    fn report_contains_result_and_numbered_steps() {
        let session = cylinder_session();
        let report = render_report(session.current().expect("current result"));
        assert!(report.starts_with(REPORT_TITLE));
        assert!(report.contains("Result: 785.40 m³"));
        assert!(report.contains("Radius: 5 m"));
        assert!(report.contains("1. Given Radius = 5 m, Height = 10 m"));
        assert!(report.ends_with("Generated by geocalc\n"));
    }

    #[test]
    fn history_table_has_one_row_per_entry() {
        let session = cylinder_session();
        let table = render_history(session.history());
        assert_eq!(table.lines().count(), 2);
        assert!(table.contains("cylinder"));
        assert!(table.contains("785.40"));

        assert_eq!(render_history(&[]), format!("{EMPTY_HISTORY}\n"));
    }
}
