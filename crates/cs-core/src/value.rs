use std::fmt;

use serde::{Deserialize, Serialize};

/// A loosely typed scalar: a decoded dataset cell or a config value that
/// may arrive as a number or as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Decodes raw cell text: blank is `Empty`, numeric text is `Number`.
    pub fn from_cell_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Number(value),
            _ => Self::Text(raw.to_string()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(value) => value.trim().is_empty(),
            _ => false,
        }
    }

    /// Strict integer reading used for configuration values. Finite numbers
    /// truncate toward zero and must fit in an `i64`; text must be a base-10
    /// integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Number(value) => float_to_i64(*value),
            Self::Text(value) => value.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Lenient integer reading used for integer-typed cut fields: anything
    /// that reads as a finite float is truncated.
    pub fn to_integer_string(&self) -> Option<String> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(value) => value.trim().parse::<f64>().ok()?,
            Self::Bool(value) => f64::from(u8::from(*value)),
            Self::Empty => return None,
        };
        float_to_i64(value).map(|integer| integer.to_string())
    }
}

/// `i64::MIN` and `i64::MAX + 1` are exact in `f64`.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

fn float_to_i64(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    if truncated.is_finite() && (I64_LOWER..I64_UPPER).contains(&truncated) {
        Some(truncated as i64)
    } else {
        None
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(value) => write!(f, "{}", value),
            Self::Number(value) => write!(f, "{}", value),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
