//! Calculation session use-case service.
//!
//! # Responsibility
//! - Own the current shape/operation/unit selection and form inputs.
//! - Turn each user action into exactly one state transition.
//! - Record submitted results as current and append them to history.
//!
//! # Invariants
//! - Input values always satisfy the active schema's `>= 0` contract.
//! - Changing mode, shape or operation resets inputs to schema defaults.
//! - History only grows; one successful submit appends exactly one entry.
//! - A failed action leaves the session unchanged.

use crate::config::SessionConfig;
use crate::error::CalcError;
use crate::formula::compute_validated;
use crate::model::input::{parse_assignments, Dimension, InputError, InputSet};
use crate::model::result::{CalculationResult, HistoryEntry};
use crate::model::shape::{Operation, ShapeKind, ShapeMode};
use crate::schema::{default_inputs, ensure_in_schema, fields_for, validate, FieldSpec};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Timestamp source for submitted results.
pub trait Clock {
    /// Current time as Unix epoch milliseconds.
    fn now_ms(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Clock pinned to one instant, for deterministic callers.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

/// Whether the displayed result matches the current inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Inputs edited (or nothing submitted) since the last result.
    Idle,
    /// The last submitted result reflects the current inputs.
    HasResult,
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Session-level errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    ShapeNotInMode { shape: ShapeKind, mode: ShapeMode },
    OperationNotInMode { operation: Operation, mode: ShapeMode },
    Calc(CalcError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShapeNotInMode { shape, mode } => {
                write!(f, "{} is not available in {mode} mode", shape.as_str())
            }
            Self::OperationNotInMode { operation, mode } => {
                write!(f, "{} is not available in {mode} mode", operation.as_str())
            }
            Self::Calc(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Calc(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CalcError> for SessionError {
    fn from(value: CalcError) -> Self {
        Self::Calc(value)
    }
}

impl From<InputError> for SessionError {
    fn from(value: InputError) -> Self {
        Self::Calc(CalcError::InvalidInput(value))
    }
}

/// Explicit, caller-owned calculator session.
///
/// Single-threaded: each method runs to completion and is the whole
/// transition for one user action.
#[derive(Debug)]
pub struct CalculationSession<C: Clock = SystemClock> {
    mode: ShapeMode,
    shape: ShapeKind,
    operation: Operation,
    unit: String,
    inputs: InputSet,
    state: SessionState,
    last_result: Option<CalculationResult>,
    history: Vec<HistoryEntry>,
    clock: C,
}

impl CalculationSession<SystemClock> {
    /// Creates a session with empty history and no current result.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for CalculationSession<SystemClock> {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl<C: Clock> CalculationSession<C> {
    pub fn with_clock(config: SessionConfig, clock: C) -> Self {
        let shape = config.mode.default_shape();
        let operation = config.mode.default_operation();
        Self {
            mode: config.mode,
            shape,
            operation,
            unit: config.unit.trim().to_string(),
            inputs: fresh_inputs(shape, operation),
            state: SessionState::Idle,
            last_result: None,
            history: Vec::new(),
            clock,
        }
    }

    pub fn mode(&self) -> ShapeMode {
        self.mode
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn inputs(&self) -> &InputSet {
        &self.inputs
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Form fields of the current selection.
    pub fn fields(&self) -> &'static [FieldSpec] {
        fields_for(self.shape, self.operation).unwrap_or(&[])
    }

    /// Result matching the current inputs, if any.
    pub fn current(&self) -> Option<&CalculationResult> {
        match self.state {
            SessionState::HasResult => self.last_result.as_ref(),
            SessionState::Idle => None,
        }
    }

    /// Most recent result, even if inputs changed since.
    pub fn last_result(&self) -> Option<&CalculationResult> {
        self.last_result.as_ref()
    }

    /// Summaries of every submitted calculation, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Switches between 2D and 3D shapes.
    ///
    /// Selects the mode's first shape and operation and resets inputs.
    /// Re-selecting the active mode is a no-op.
    pub fn set_mode(&mut self, mode: ShapeMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.shape = mode.default_shape();
        self.operation = mode.default_operation();
        self.rebuild_inputs();
        debug!("event=mode_switch module=session mode={mode}");
    }

    /// Selects a shape of the active mode and resets inputs to its defaults.
    pub fn select_shape(&mut self, shape: ShapeKind) -> SessionResult<()> {
        if shape.mode() != self.mode {
            return Err(SessionError::ShapeNotInMode {
                shape,
                mode: self.mode,
            });
        }
        if shape != self.shape {
            self.shape = shape;
            self.rebuild_inputs();
            debug!(
                "event=shape_select module=session shape={}",
                shape.as_str()
            );
        }
        Ok(())
    }

    /// Selects an operation of the active mode and resets inputs to its defaults.
    pub fn select_operation(&mut self, operation: Operation) -> SessionResult<()> {
        if operation.mode() != self.mode {
            return Err(SessionError::OperationNotInMode {
                operation,
                mode: self.mode,
            });
        }
        if operation != self.operation {
            self.operation = operation;
            self.rebuild_inputs();
            debug!(
                "event=operation_select module=session operation={}",
                operation.as_str()
            );
        }
        Ok(())
    }

    /// Sets one field of the current form.
    ///
    /// # Errors
    /// - `NotInSchema` when the field is not an input of the current shape.
    /// - `Negative`/`NotFinite` for out-of-contract values.
    pub fn set_field(&mut self, dimension: Dimension, value: f64) -> SessionResult<()> {
        let outcome = ensure_in_schema(self.shape, self.operation, dimension)
            .map_err(SessionError::from)
            .and_then(|_| self.inputs.insert(dimension, value).map_err(Into::into));
        match outcome {
            Ok(()) => {
                self.state = SessionState::Idle;
                Ok(())
            }
            Err(err) => {
                log_rejection(dimension.as_str(), &err);
                Err(err)
            }
        }
    }

    /// Applies `name=value` assignment text to the current form.
    ///
    /// All assignments are checked first; nothing changes unless every one
    /// is accepted.
    pub fn apply_assignments(&mut self, text: &str) -> SessionResult<usize> {
        let assignments = parse_assignments(text).map_err(|err| {
            let err = SessionError::from(err);
            log_rejection("assignment", &err);
            err
        })?;

        let mut staged = self.inputs.clone();
        for (dimension, value) in &assignments {
            let outcome = ensure_in_schema(self.shape, self.operation, *dimension)
                .map_err(SessionError::from)
                .and_then(|_| staged.insert(*dimension, *value).map_err(Into::into));
            if let Err(err) = outcome {
                log_rejection(dimension.as_str(), &err);
                return Err(err);
            }
        }

        self.inputs = staged;
        self.state = SessionState::Idle;
        Ok(assignments.len())
    }

    /// Restores the schema defaults of the current selection.
    pub fn reset_inputs(&mut self) {
        self.rebuild_inputs();
    }

    /// Sets the free-form unit label applied to every input.
    pub fn set_unit(&mut self, unit: &str) {
        self.unit = unit.trim().to_string();
        self.state = SessionState::Idle;
    }

    /// Computes the current selection and records the result.
    pub fn submit(&mut self) -> SessionResult<&CalculationResult> {
        let inputs = self.inputs.clone();
        self.submit_with(self.shape, self.operation, &inputs)
    }

    /// Computes an explicit (shape, operation, inputs) triple and records it.
    ///
    /// The triple must belong to the active mode. On success the shape,
    /// operation and inputs follow the submitted triple; on failure nothing
    /// changes.
    ///
    /// # Errors
    /// - `ShapeNotInMode`/`OperationNotInMode` when the triple is outside the active mode.
    /// - `InvalidInput` when a required field is missing or out of contract.
    pub fn submit_with(
        &mut self,
        shape: ShapeKind,
        operation: Operation,
        inputs: &InputSet,
    ) -> SessionResult<&CalculationResult> {
        // Why: only the mode toggle switches between plane and solid shapes.
        if let Err(err) = self.ensure_in_mode(shape, operation) {
            log_rejection("selection", &err);
            return Err(err);
        }

        let computed = validate(shape, operation, inputs).and_then(|validated| {
            compute_validated(shape, operation, &validated, &self.unit)
                .map(|computation| (validated, computation))
        });
        let (validated, computation) = match computed {
            Ok(value) => value,
            Err(err) => {
                if err.is_user_recoverable() {
                    warn!(
                        "event=calc_submit module=session status=rejected shape={} operation={} reason={}",
                        shape.as_str(),
                        operation.as_str(),
                        err.code()
                    );
                } else {
                    error!(
                        "event=calc_submit module=session status=error shape={} operation={} reason={}",
                        shape.as_str(),
                        operation.as_str(),
                        err.code()
                    );
                }
                return Err(err.into());
            }
        };

        let result = CalculationResult {
            id: Uuid::new_v4(),
            shape,
            operation,
            value: computation.value,
            steps: computation.steps,
            inputs: validated.to_input_set(),
            unit: self.unit.clone(),
            timestamp_ms: self.clock.now_ms(),
        };

        self.shape = shape;
        self.operation = operation;
        self.inputs = result.inputs.clone();
        self.history.push(result.summary());
        self.state = SessionState::HasResult;
        info!(
            "event=calc_submit module=session status=ok shape={} operation={} history_len={}",
            shape.as_str(),
            operation.as_str(),
            self.history.len()
        );

        Ok(self.last_result.insert(result))
    }

    fn ensure_in_mode(&self, shape: ShapeKind, operation: Operation) -> SessionResult<()> {
        if shape.mode() != self.mode {
            return Err(SessionError::ShapeNotInMode {
                shape,
                mode: self.mode,
            });
        }
        if operation.mode() != self.mode {
            return Err(SessionError::OperationNotInMode {
                operation,
                mode: self.mode,
            });
        }
        Ok(())
    }

    fn rebuild_inputs(&mut self) {
        self.inputs = fresh_inputs(self.shape, self.operation);
        self.state = SessionState::Idle;
    }
}

fn fresh_inputs(shape: ShapeKind, operation: Operation) -> InputSet {
    default_inputs(shape, operation).unwrap_or_else(|err| {
        error!(
            "event=schema_defaults module=session status=error shape={} operation={} reason={}",
            shape.as_str(),
            operation.as_str(),
            err.code()
        );
        InputSet::new()
    })
}

fn log_rejection(field: &str, err: &SessionError) {
    let reason = match err {
        SessionError::Calc(calc) => calc.code(),
        SessionError::ShapeNotInMode { .. } | SessionError::OperationNotInMode { .. } => {
            "mode_mismatch"
        }
    };
    warn!("event=input_rejected module=session field={field} reason={reason}");
}
