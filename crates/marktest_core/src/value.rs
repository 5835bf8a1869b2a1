//! Define the value model shared by coerced arguments and method results.
//!
//! ## Notes
//! - Verification compares the **canonical string form** ([`fmt::Display`]) of a result against the
//!   scenario's expected literal, so the rendering here is part of the engine's observable contract.
//! - Floats always render with a fractional part (`2.0`, not `2`), using Rust's shortest round-trip form.
//! - [`Value::Unit`] (no result) renders as `null`.

use std::fmt;

use crate::kinds::ParamKind;

/// A coerced argument or a method's return value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Absence of a result.
    Unit,
}

impl Value {
    /// Return the parameter kind this value satisfies, if any.
    ///
    /// ## Returns
    /// - `None` for [`Value::Unit`], which can never be passed as an argument.
    pub fn kind(&self) -> Option<ParamKind> {
        match self {
            Value::Str(_) => Some(ParamKind::Str),
            Value::Int(_) => Some(ParamKind::Int),
            Value::Float(_) => Some(ParamKind::Float),
            Value::Bool(_) => Some(ParamKind::Bool),
            Value::Unit => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Short name of the variant, used in type mismatch diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "null",
            other => other.kind().map_or("null", crate::kinds::as_str),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Unit => f.write_str("null"),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unit
    }
}
