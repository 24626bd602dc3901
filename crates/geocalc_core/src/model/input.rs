//! Dimension fields and the user-editable input mapping.
//!
//! # Responsibility
//! - Name every numeric field a shape can require.
//! - Hold the raw values a user typed, rejecting invalid ones at the boundary.
//! - Parse `name=value` assignment text coming from terminal callers.
//!
//! # Invariants
//! - Every stored value is finite and `>= 0`.
//! - Deserialization enforces the same rules as `InputSet::insert`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static ASSIGNMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z][A-Za-z_]*)\s*=\s*([^\s,;]+)").expect("valid assignment regex")
});

/// Named numeric field of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Side,
    Length,
    Width,
    Radius,
    Base,
    Height,
    SideB,
    SideC,
}

impl Dimension {
    pub const ALL: [Dimension; 8] = [
        Self::Side,
        Self::Length,
        Self::Width,
        Self::Radius,
        Self::Base,
        Self::Height,
        Self::SideB,
        Self::SideC,
    ];

    /// Stable field id.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Side => "side",
            Self::Length => "length",
            Self::Width => "width",
            Self::Radius => "radius",
            Self::Base => "base",
            Self::Height => "height",
            Self::SideB => "side_b",
            Self::SideC => "side_c",
        }
    }

    /// User-facing form label (without unit).
    pub const fn label(self) -> &'static str {
        match self {
            Self::Side => "Side length",
            Self::Length => "Length",
            Self::Width => "Width",
            Self::Radius => "Radius",
            Self::Base => "Base",
            Self::Height => "Height",
            Self::SideB => "Side B",
            Self::SideC => "Side C",
        }
    }

    /// Parses a field id. Case-insensitive; `sideB`/`sideC` are accepted.
    pub fn parse(value: &str) -> Result<Self, InputError> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "side" | "s" => Ok(Self::Side),
            "length" | "l" => Ok(Self::Length),
            "width" | "w" => Ok(Self::Width),
            "radius" | "r" => Ok(Self::Radius),
            "base" | "side_a" | "sidea" => Ok(Self::Base),
            "height" | "h" => Ok(Self::Height),
            "side_b" | "sideb" => Ok(Self::SideB),
            "side_c" | "sidec" => Ok(Self::SideC),
            _ => Err(InputError::UnknownField(value.trim().to_string())),
        }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for user-entered numeric fields.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// A field required by the schema has no value.
    Missing(Dimension),
    /// Value is below the schema minimum of zero.
    Negative { dimension: Dimension, value: f64 },
    /// Value is NaN or infinite.
    NotFinite(Dimension),
    /// Field id does not name any known dimension.
    UnknownField(String),
    /// Field exists but is not part of the active shape's schema.
    NotInSchema(Dimension),
    /// Raw text could not be read as a number.
    InvalidNumber { field: String, raw: String },
    /// Text is not a list of `name=value` pairs.
    MalformedAssignment(String),
}

impl InputError {
    /// Stable short code for metadata-only logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing(_) => "missing",
            Self::Negative { .. } => "negative",
            Self::NotFinite(_) => "not_finite",
            Self::UnknownField(_) => "unknown_field",
            Self::NotInSchema(_) => "not_in_schema",
            Self::InvalidNumber { .. } => "invalid_number",
            Self::MalformedAssignment(_) => "malformed_assignment",
        }
    }
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(dimension) => write!(f, "missing value for `{dimension}`"),
            Self::Negative { dimension, value } => {
                write!(f, "`{dimension}` must be >= 0, got {value}")
            }
            Self::NotFinite(dimension) => write!(f, "`{dimension}` must be a finite number"),
            Self::UnknownField(field) => write!(f, "unknown field: `{field}`"),
            Self::NotInSchema(dimension) => {
                write!(f, "`{dimension}` is not an input of the selected shape")
            }
            Self::InvalidNumber { field, raw } => {
                write!(f, "`{field}` is not a number: `{raw}`")
            }
            Self::MalformedAssignment(text) => {
                write!(f, "expected `name=value` pairs, got `{text}`")
            }
        }
    }
}

impl Error for InputError {}

/// Checks the non-negative finite contract shared by every field.
pub fn check_value(dimension: Dimension, value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite(dimension));
    }
    if value < 0.0 {
        return Err(InputError::Negative { dimension, value });
    }
    Ok(value)
}

/// User-editable mapping from field to value.
///
/// Holds whatever the form currently shows; checking it against a shape's
/// schema happens in [`crate::schema::validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<Dimension, f64>",
    into = "BTreeMap<Dimension, f64>"
)]
pub struct InputSet {
    values: BTreeMap<Dimension, f64>,
}

impl InputSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores one value, replacing any previous value for the field.
    ///
    /// Rejected values leave the set unchanged.
    pub fn insert(&mut self, dimension: Dimension, value: f64) -> Result<(), InputError> {
        let value = check_value(dimension, value)?;
        self.values.insert(dimension, value);
        Ok(())
    }

    /// Builds a set from values that already passed `check_value`.
    pub(crate) fn from_checked(values: impl IntoIterator<Item = (Dimension, f64)>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Builder-style `insert` for literals in callers and tests.
    pub fn with(mut self, dimension: Dimension, value: f64) -> Result<Self, InputError> {
        self.insert(dimension, value)?;
        Ok(self)
    }

    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        self.values.get(&dimension).copied()
    }

    pub fn contains(&self, dimension: Dimension) -> bool {
        self.values.contains_key(&dimension)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        self.values.iter().map(|(dimension, value)| (*dimension, *value))
    }

    /// Drops every field not listed in `keep`.
    pub fn retain_only(&mut self, keep: &[Dimension]) {
        self.values.retain(|dimension, _| keep.contains(dimension));
    }
}

impl TryFrom<BTreeMap<Dimension, f64>> for InputSet {
    type Error = InputError;

    fn try_from(values: BTreeMap<Dimension, f64>) -> Result<Self, Self::Error> {
        let mut set = InputSet::new();
        for (dimension, value) in values {
            set.insert(dimension, value)?;
        }
        Ok(set)
    }
}

impl From<InputSet> for BTreeMap<Dimension, f64> {
    fn from(set: InputSet) -> Self {
        set.values
    }
}

/// Parses `radius=7, height=10` style text into field assignments.
///
/// Pairs may be separated by whitespace, `,` or `;`. Values are not range
/// checked here; that happens when they are inserted.
pub fn parse_assignments(text: &str) -> Result<Vec<(Dimension, f64)>, InputError> {
    let mut assignments = Vec::new();
    let mut cursor = 0;

    for captures in ASSIGNMENT_RE.captures_iter(text) {
        let whole = captures.get(0).expect("group 0 always participates");
        ensure_separator_only(&text[cursor..whole.start()])?;
        cursor = whole.end();

        let field = &captures[1];
        let raw = &captures[2];
        let dimension = Dimension::parse(field)?;
        let value = raw.parse::<f64>().map_err(|_| InputError::InvalidNumber {
            field: field.to_string(),
            raw: raw.to_string(),
        })?;
        assignments.push((dimension, value));
    }
    ensure_separator_only(&text[cursor..])?;

    Ok(assignments)
}

fn ensure_separator_only(gap: &str) -> Result<(), InputError> {
    if gap
        .chars()
        .all(|ch| ch.is_whitespace() || ch == ',' || ch == ';')
    {
        Ok(())
    } else {
        Err(InputError::MalformedAssignment(gap.trim().to_string()))
    }
}
