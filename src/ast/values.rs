//! Literal and parameter value nodes.

use serde::{Deserialize, Serialize};

/// The semantic type tag of a value node.
///
/// The tag is fixed by which variant was constructed, never inferred from
/// the payload: a `Decimal` holding `0.0` still reports `Float`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    String,
    Long,
    Float,
    Boolean,
    Null,
    Parameter,
}

impl ValueType {
    /// The tag name used by mapping stores and result converters.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Long => "long",
            ValueType::Float => "float",
            ValueType::Boolean => "boolean",
            ValueType::Null => "null",
            ValueType::Parameter => "parameter",
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A literal value in a query tree.
///
/// `Parameter` carries the placeholder name of a late-bound value; the
/// rendered statement receives a positional placeholder and the name is
/// collected into the rendered query's parameter list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    String(String),
    Int(i64),
    Decimal(f64),
    Boolean(bool),
    Null,
    Parameter(String),
}

impl Value {
    /// The semantic type tag for this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::String(_) => ValueType::String,
            Value::Int(_) => ValueType::Long,
            Value::Decimal(_) => ValueType::Float,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Null => ValueType::Null,
            Value::Parameter(_) => ValueType::Parameter,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Value::Int(n) => write!(f, "{}", n),
            Value::Decimal(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => write!(f, "NULL"),
            Value::Parameter(name) => write!(f, ":{}", name),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Decimal(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
