//! Calculation error taxonomy.
//!
//! # Invariants
//! - `InvalidInput` is user-recoverable and never reaches the formula table.
//! - `ConfigurationMismatch` is a programming error: schema and formula
//!   table disagree, or a caller mixed shape and operation families.

use crate::model::input::InputError;
use crate::model::shape::{Operation, ShapeKind};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CalcResult<T> = Result<T, CalcError>;

#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    InvalidInput(InputError),
    ConfigurationMismatch {
        shape: ShapeKind,
        operation: Operation,
    },
}

impl CalcError {
    /// Whether the user can fix this by editing the form.
    pub fn is_user_recoverable(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Stable short code for metadata-only logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(err) => err.code(),
            Self::ConfigurationMismatch { .. } => "configuration_mismatch",
        }
    }
}

impl Display for CalcError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::ConfigurationMismatch { shape, operation } => write!(
                f,
                "no formula for {} / {}",
                shape.as_str(),
                operation.as_str()
            ),
        }
    }
}

impl Error for CalcError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::ConfigurationMismatch { .. } => None,
        }
    }
}

impl From<InputError> for CalcError {
    fn from(value: InputError) -> Self {
        Self::InvalidInput(value)
    }
}
