//! Closed value type
//!
//! Widgets expose their internal value and element state persists its
//! entries through the same small set of variants. Anything that is not one
//! of these kinds cannot be bound or stored.

use super::math::Color;

/// A value held by a retained control or persisted in element state
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Checked state, pressed state, open state
    Bool(bool),
    /// Integer slider or parsed integer input
    Int(i32),
    /// Float slider or parsed float input
    Float(f32),
    /// Text content
    Text(String),
    /// RGBA color
    Color(Color),
}

impl Value {
    /// Name of the variant, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Color(_) => "color",
        }
    }

    /// Borrow the text payload, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Types that can round-trip through a [`Value`]
///
/// Implemented for every value kind the binder supports. A failed
/// conversion means the stored variant does not match the requested type.
pub trait StateValue: Clone + PartialEq {
    /// Wrap into the closed value type
    fn into_value(self) -> Value;

    /// Extract from the closed value type
    fn from_value(value: &Value) -> Option<Self>;

    /// Whether two values are the same for change detection
    ///
    /// Unlike `==`, this must be reflexive: a value is always the same as
    /// itself, NaN included.
    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

fn same_float(a: f32, b: f32) -> bool {
    a == b || a.to_bits() == b.to_bits()
}

impl StateValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl StateValue for i32 {
    fn into_value(self) -> Value {
        Value::Int(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl StateValue for f32 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    fn same(&self, other: &Self) -> bool {
        same_float(*self, *other)
    }
}

impl StateValue for String {
    fn into_value(self) -> Value {
        Value::Text(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_text().map(str::to_owned)
    }
}

impl StateValue for Color {
    fn into_value(self) -> Value {
        Value::Color(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Color(v) => Some(*v),
            _ => None,
        }
    }

    fn same(&self, other: &Self) -> bool {
        self.iter().zip(other.iter()).all(|(a, b)| same_float(*a, *b))
    }
}
