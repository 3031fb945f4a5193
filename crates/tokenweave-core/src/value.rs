//! Literal token values.
//!
//! Authored token values are either strings (`"#2196F3"`, `"16px"`,
//! `"{color.rawColors.blue.500}"`) or JSON numbers (`700`, `1.5`).
//! [`TokenValue`] keeps that distinction so numbers survive into the JSON
//! dump as numbers. [`Dimension`] is the parsed form of a length such as
//! `16px`.

use std::fmt;

/// A literal or reference value as authored in a token source.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Text(String),
    Number(f64),
}

impl TokenValue {
    /// Returns the string content for [`TokenValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(text) => Some(text),
            TokenValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            TokenValue::Text(_) => None,
            TokenValue::Number(number) => Some(*number),
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Text(text) => f.write_str(text),
            TokenValue::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(text: &str) -> Self {
        TokenValue::Text(text.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(text: String) -> Self {
        TokenValue::Text(text)
    }
}

impl From<f64> for TokenValue {
    fn from(number: f64) -> Self {
        TokenValue::Number(number)
    }
}

/// A numeric length with an optional unit suffix.
///
/// A unitless number has an empty unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    amount: f64,
    unit: String,
}

impl Dimension {
    pub fn new(amount: f64, unit: impl Into<String>) -> Self {
        Self {
            amount,
            unit: unit.into(),
        }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn is_unitless(&self) -> bool {
        self.unit.is_empty()
    }

    pub fn is_px(&self) -> bool {
        self.unit == "px"
    }

    /// Returns a copy of this dimension with a different unit.
    pub fn with_unit(&self, unit: impl Into<String>) -> Self {
        Self::new(self.amount, unit)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit)
    }
}
