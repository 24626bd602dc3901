//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the calculator session to Dart via FRB as an opaque handle.
//! - Flatten core types into string/number envelopes the UI can render.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Enum values cross the boundary as stable lowercase ids.
//! - Failures are reported through `ok=false` envelopes, never thrown.

use geocalc_core::{
    core_version as core_version_inner, fields_for as fields_for_inner,
    init_logging as init_logging_inner, render_report, sketch_for, CalculationResult,
    CalculationSession, Dimension, FieldSpec, HistoryEntry, LogTarget, Operation,
    SessionConfig, SessionState, ShapeKind, ShapeMode, Sketch, PRESET_UNITS,
};
use log::warn;

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error|off` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let result = LogTarget::directory(log_dir.as_str())
        .and_then(|target| init_logging_inner(level.as_str(), target));
    match result {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Unit labels offered by the unit picker.
#[flutter_rust_bridge::frb(sync)]
pub fn preset_units() -> Vec<String> {
    PRESET_UNITS.iter().map(|unit| unit.to_string()).collect()
}

/// One picker option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceItem {
    /// Stable id sent back on selection.
    pub id: String,
    /// User-facing label.
    pub label: String,
}

/// Shapes and operations selectable in `mode` (`2d|3d`).
///
/// Unknown modes yield empty lists.
#[flutter_rust_bridge::frb(sync)]
pub fn mode_choices(mode: String) -> (Vec<ChoiceItem>, Vec<ChoiceItem>) {
    let Ok(mode) = ShapeMode::parse(&mode) else {
        return (Vec::new(), Vec::new());
    };
    let shapes = mode
        .shapes()
        .iter()
        .map(|shape| ChoiceItem {
            id: shape.as_str().to_string(),
            label: shape.label().to_string(),
        })
        .collect();
    let operations = mode
        .operations()
        .iter()
        .map(|operation| ChoiceItem {
            id: operation.as_str().to_string(),
            label: operation.label().to_string(),
        })
        .collect();
    (shapes, operations)
}

/// One form field, optionally carrying its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldItem {
    pub name: String,
    pub label: String,
    pub default_value: f64,
    pub minimum: f64,
    /// Current form value; `None` in schema-only listings.
    pub value: Option<f64>,
}

/// Schema listing envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldsResponse {
    pub ok: bool,
    pub fields: Vec<FieldItem>,
    pub message: String,
}

/// Lists the form fields of one (shape, operation) pair.
///
/// # FFI contract
/// - Sync call, pure.
/// - Returns `ok=false` for unknown ids or mismatched families.
#[flutter_rust_bridge::frb(sync)]
pub fn fields_for(shape: String, operation: String) -> FieldsResponse {
    let parsed = ShapeKind::parse(&shape)
        .map_err(|err| err.to_string())
        .and_then(|shape| {
            Operation::parse(&operation)
                .map(|operation| (shape, operation))
                .map_err(|err| err.to_string())
        })
        .and_then(|(shape, operation)| {
            fields_for_inner(shape, operation).map_err(|err| err.to_string())
        });

    match parsed {
        Ok(fields) => FieldsResponse {
            ok: true,
            fields: fields.iter().map(|field| to_field_item(field, None)).collect(),
            message: String::new(),
        },
        Err(message) => FieldsResponse {
            ok: false,
            fields: Vec::new(),
            message: format!("fields_for failed: {message}"),
        },
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the action was applied.
    pub ok: bool,
    /// Human-readable validation message; empty on success.
    pub message: String,
}

impl ActionResponse {
    fn success() -> Self {
        Self {
            ok: true,
            message: String::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }

    fn from_result<E: std::fmt::Display>(action: &str, result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::success(),
            Err(err) => Self::failure(format!("{action} failed: {err}")),
        }
    }
}

/// One echoed input of a result.
#[derive(Debug, Clone, PartialEq)]
pub struct InputItem {
    pub name: String,
    pub label: String,
    pub value: f64,
}

/// Result card contents.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub id: String,
    pub shape: String,
    pub shape_label: String,
    pub operation: String,
    pub operation_label: String,
    /// Full-precision value.
    pub value: f64,
    /// Value rounded to two decimals.
    pub display_value: String,
    /// Unit of the computed quantity, e.g. `cm²`.
    pub quantity_unit: String,
    pub steps: Vec<String>,
    pub inputs: Vec<InputItem>,
    pub timestamp_ms: i64,
}

/// Submit envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitResponse {
    pub ok: bool,
    pub result: Option<ResultView>,
    pub message: String,
}

/// One history table row.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryItem {
    pub id: String,
    pub timestamp_ms: i64,
    pub shape: String,
    pub operation: String,
    pub display_value: String,
    pub quantity_unit: String,
}

/// Drawing instructions for the visualization tab.
#[derive(Debug, Clone, PartialEq)]
pub struct SketchView {
    /// `polygon|circle|box|sphere|cylinder`.
    pub kind: String,
    /// 2D polygon corners or 3D box vertices, flattened per point.
    pub points: Vec<Vec<f64>>,
    pub radius: Option<f64>,
    pub height: Option<f64>,
    /// `[min_x, min_y, max_x, max_y]` for plane figures.
    pub view_box: Option<Vec<f64>>,
}

/// Full screen state for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub mode: String,
    pub shape: String,
    pub operation: String,
    pub unit: String,
    /// `idle|has_result`.
    pub state: String,
    pub fields: Vec<FieldItem>,
    pub current: Option<ResultView>,
    pub history_len: u32,
}

/// Caller-owned calculator session handle.
///
/// # FFI contract
/// - Opaque on the Dart side; all access goes through methods.
/// - Methods are sync, non-blocking and never panic.
#[flutter_rust_bridge::frb(opaque)]
pub struct GeometrySession {
    inner: CalculationSession,
}

impl GeometrySession {
    /// Creates a session. Unknown `mode` ids fall back to `2d`.
    #[flutter_rust_bridge::frb(sync)]
    pub fn new(mode: Option<String>, unit: Option<String>) -> GeometrySession {
        let mut config = SessionConfig::default();
        if let Some(raw) = mode {
            match ShapeMode::parse(&raw) {
                Ok(mode) => config.mode = mode,
                Err(err) => warn!("event=session_new module=ffi status=fallback reason={err}"),
            }
        }
        if let Some(unit) = unit {
            config.unit = unit;
        }
        Self {
            inner: CalculationSession::new(config),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn set_mode(&mut self, mode: String) -> ActionResponse {
        match ShapeMode::parse(&mode) {
            Ok(mode) => {
                self.inner.set_mode(mode);
                ActionResponse::success()
            }
            Err(err) => ActionResponse::failure(format!("set_mode failed: {err}")),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn select_shape(&mut self, shape: String) -> ActionResponse {
        let result = ShapeKind::parse(&shape)
            .map_err(|err| err.to_string())
            .and_then(|shape| self.inner.select_shape(shape).map_err(|err| err.to_string()));
        ActionResponse::from_result("select_shape", result)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn select_operation(&mut self, operation: String) -> ActionResponse {
        let result = Operation::parse(&operation)
            .map_err(|err| err.to_string())
            .and_then(|operation| {
                self.inner
                    .select_operation(operation)
                    .map_err(|err| err.to_string())
            });
        ActionResponse::from_result("select_operation", result)
    }

    /// Sets one form field; rejected values leave the form unchanged.
    #[flutter_rust_bridge::frb(sync)]
    pub fn set_field(&mut self, name: String, value: f64) -> ActionResponse {
        let result = Dimension::parse(&name)
            .map_err(|err| err.to_string())
            .and_then(|dimension| {
                self.inner
                    .set_field(dimension, value)
                    .map_err(|err| err.to_string())
            });
        ActionResponse::from_result("set_field", result)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn set_unit(&mut self, unit: String) {
        self.inner.set_unit(&unit);
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn reset_inputs(&mut self) {
        self.inner.reset_inputs();
    }

    /// Computes the current form and records it in history.
    #[flutter_rust_bridge::frb(sync)]
    pub fn submit(&mut self) -> SubmitResponse {
        match self.inner.submit() {
            Ok(result) => SubmitResponse {
                ok: true,
                result: Some(to_result_view(result)),
                message: String::new(),
            },
            Err(err) => SubmitResponse {
                ok: false,
                result: None,
                message: format!("submit failed: {err}"),
            },
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn snapshot(&self) -> SessionSnapshot {
        let inputs = self.inner.inputs();
        SessionSnapshot {
            mode: self.inner.mode().as_str().to_string(),
            shape: self.inner.shape().as_str().to_string(),
            operation: self.inner.operation().as_str().to_string(),
            unit: self.inner.unit().to_string(),
            state: match self.inner.state() {
                SessionState::Idle => "idle",
                SessionState::HasResult => "has_result",
            }
            .to_string(),
            fields: self
                .inner
                .fields()
                .iter()
                .map(|field| to_field_item(field, inputs.get(field.dimension)))
                .collect(),
            current: self.inner.current().map(to_result_view),
            history_len: u32::try_from(self.inner.history().len()).unwrap_or(u32::MAX),
        }
    }

    /// History rows, oldest first.
    #[flutter_rust_bridge::frb(sync)]
    pub fn history(&self) -> Vec<HistoryItem> {
        self.inner.history().iter().map(to_history_item).collect()
    }

    /// Plain-text report of the most recent result; empty when none exists.
    #[flutter_rust_bridge::frb(sync)]
    pub fn export_report(&self) -> String {
        self.inner
            .last_result()
            .map(render_report)
            .unwrap_or_default()
    }

    /// Visualization of the current result, if it has one.
    #[flutter_rust_bridge::frb(sync)]
    pub fn current_sketch(&self) -> Option<SketchView> {
        self.inner
            .current()
            .and_then(sketch_for)
            .map(to_sketch_view)
    }
}

fn to_field_item(field: &FieldSpec, value: Option<f64>) -> FieldItem {
    FieldItem {
        name: field.dimension.as_str().to_string(),
        label: field.label.to_string(),
        default_value: field.default,
        minimum: field.minimum,
        value,
    }
}

fn to_result_view(result: &CalculationResult) -> ResultView {
    let labels = fields_for_inner(result.shape, result.operation).unwrap_or(&[]);
    ResultView {
        id: result.id.to_string(),
        shape: result.shape.as_str().to_string(),
        shape_label: result.shape.label().to_string(),
        operation: result.operation.as_str().to_string(),
        operation_label: result.operation.label().to_string(),
        value: result.value,
        display_value: result.display_value(),
        quantity_unit: result.quantity_unit(),
        steps: result.steps.clone(),
        inputs: labels
            .iter()
            .filter_map(|field| {
                result.inputs.get(field.dimension).map(|value| InputItem {
                    name: field.dimension.as_str().to_string(),
                    label: field.label.to_string(),
                    value,
                })
            })
            .collect(),
        timestamp_ms: result.timestamp_ms,
    }
}

fn to_history_item(entry: &HistoryEntry) -> HistoryItem {
    HistoryItem {
        id: entry.id.to_string(),
        timestamp_ms: entry.timestamp_ms,
        shape: entry.shape.as_str().to_string(),
        operation: entry.operation.as_str().to_string(),
        display_value: entry.display_value(),
        quantity_unit: entry.quantity_unit(),
    }
}

fn to_sketch_view(sketch: Sketch) -> SketchView {
    let empty = SketchView {
        kind: String::new(),
        points: Vec::new(),
        radius: None,
        height: None,
        view_box: None,
    };
    match sketch {
        Sketch::Polygon { points, view } => SketchView {
            kind: "polygon".to_string(),
            points: points.iter().map(|point| point.to_vec()).collect(),
            view_box: Some(vec![view.min[0], view.min[1], view.max[0], view.max[1]]),
            ..empty
        },
        Sketch::Circle { radius, view } => SketchView {
            kind: "circle".to_string(),
            radius: Some(radius),
            view_box: Some(vec![view.min[0], view.min[1], view.max[0], view.max[1]]),
            ..empty
        },
        Sketch::Box { vertices } => SketchView {
            kind: "box".to_string(),
            points: vertices.iter().map(|vertex| vertex.to_vec()).collect(),
            ..empty
        },
        Sketch::Sphere { radius } => SketchView {
            kind: "sphere".to_string(),
            radius: Some(radius),
            ..empty
        },
        Sketch::Cylinder { radius, height } => SketchView {
            kind: "cylinder".to_string(),
            radius: Some(radius),
            height: Some(height),
            ..empty
        },
    }
}
