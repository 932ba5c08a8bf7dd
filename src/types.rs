//! Core value types for scene data.
//!
//! Everything fetched from or written to the host travels as a [`SceneValue`],
//! a closed set of primitive variants. Components that need to route values by
//! type switch on [`ValueKind`] explicitly instead of inspecting host type
//! names.

use serde::{Deserialize, Serialize};

/// A primitive scene value: the only shapes that cross the host boundary.
///
/// Serializes untagged, so a JSON object of primitives maps directly onto
/// an option mapping (see [`crate::options`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SceneValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Classification tag for a [`SceneValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Str,
}

impl SceneValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            SceneValue::Bool(_) => ValueKind::Bool,
            SceneValue::Int(_) => ValueKind::Int,
            SceneValue::Float(_) => ValueKind::Float,
            SceneValue::Str(_) => ValueKind::Str,
        }
    }

    /// The defined default substituted when a typed output refuses a value:
    /// `false`, `0`, `0.0`, or the empty string.
    pub fn default_of(kind: ValueKind) -> SceneValue {
        match kind {
            ValueKind::Bool => SceneValue::Bool(false),
            ValueKind::Int => SceneValue::Int(0),
            ValueKind::Float => SceneValue::Float(0.0),
            ValueKind::Str => SceneValue::Str(String::new()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SceneValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SceneValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view: integers widen to `f64`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            SceneValue::Float(v) => Some(*v),
            SceneValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SceneValue::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl std::fmt::Display for SceneValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneValue::Bool(v) => write!(f, "{v}"),
            SceneValue::Int(v) => write!(f, "{v}"),
            SceneValue::Float(v) => write!(f, "{v}"),
            SceneValue::Str(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for SceneValue {
    fn from(v: bool) -> Self {
        SceneValue::Bool(v)
    }
}

impl From<i64> for SceneValue {
    fn from(v: i64) -> Self {
        SceneValue::Int(v)
    }
}

impl From<f64> for SceneValue {
    fn from(v: f64) -> Self {
        SceneValue::Float(v)
    }
}

impl From<&str> for SceneValue {
    fn from(v: &str) -> Self {
        SceneValue::Str(v.to_string())
    }
}

impl From<String> for SceneValue {
    fn from(v: String) -> Self {
        SceneValue::Str(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(SceneValue::Bool(true).kind(), ValueKind::Bool);
        assert_eq!(SceneValue::Int(7).kind(), ValueKind::Int);
        assert_eq!(SceneValue::Float(1.5).kind(), ValueKind::Float);
        assert_eq!(SceneValue::from("tx").kind(), ValueKind::Str);
    }

    #[test]
    fn test_defined_defaults() {
        assert_eq!(SceneValue::default_of(ValueKind::Bool), SceneValue::Bool(false));
        assert_eq!(SceneValue::default_of(ValueKind::Int), SceneValue::Int(0));
        assert_eq!(SceneValue::default_of(ValueKind::Float), SceneValue::Float(0.0));
        assert_eq!(
            SceneValue::default_of(ValueKind::Str),
            SceneValue::Str(String::new())
        );
    }

    #[test]
    fn test_accessors() {
        assert_eq!(SceneValue::Bool(true).as_bool(), Some(true));
        assert_eq!(SceneValue::Int(42).as_int(), Some(42));
        assert_eq!(SceneValue::Float(2.5).as_float(), Some(2.5));
        assert_eq!(SceneValue::Int(3).as_float(), Some(3.0));
        assert_eq!(SceneValue::from("hello").as_str(), Some("hello"));
        assert_eq!(SceneValue::Bool(true).as_int(), None);
    }
}
