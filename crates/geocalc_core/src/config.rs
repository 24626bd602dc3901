//! Session configuration.

use crate::model::shape::ShapeMode;
use serde::{Deserialize, Serialize};

/// Unit labels offered by unit pickers. Any other free-form label is accepted.
pub const PRESET_UNITS: &[&str] = &["cm", "m", "mm", "in"];

/// Initial settings for a new calculation session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Shape family active on start.
    pub mode: ShapeMode,
    /// Length unit label applied to every input.
    pub unit: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: ShapeMode::TwoD,
            unit: PRESET_UNITS[0].to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SessionConfig;
    use crate::model::shape::ShapeMode;

    #[test]
    fn default_is_flat_shapes_in_centimetres() {
        let config = SessionConfig::default();
        assert_eq!(config.mode, ShapeMode::TwoD);
        assert_eq!(config.unit, "cm");
    }
}
