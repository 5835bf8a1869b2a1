//! Coerce scenario literals into typed argument values.
//!
//! Scenario parameters are always declared as string literals; conversion happens at invocation time,
//! keyed on the parameter kind the method was registered with.
//!
//! ## Rules
//!
//! | Kind              | Behavior                                                      |
//! |-------------------|---------------------------------------------------------------|
//! | `Str`             | passed through unchanged                                      |
//! | `Int`             | base-10 signed `i64`; optional leading sign; no trimming      |
//! | `Float`           | decimal `f64`; no trimming                                    |
//! | `Bool`            | case-insensitive `true` is `true`, **anything else** `false`  |
//! | `Other(_)`        | passed through unchanged as a string                          |
//!
//! The boolean rule is permissive on purpose: malformed literals such as `"yes"` coerce to `false` rather
//! than failing. Only the numeric kinds can produce a [`ConversionError`].

use thiserror::Error;

use crate::kinds::ParamKind;
use crate::value::Value;

/// A scenario literal could not be parsed as the declared numeric kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert '{literal}' to {kind}")]
pub struct ConversionError {
    pub literal: String,
    pub kind: ParamKind,
}

impl ConversionError {
    pub fn new(literal: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            literal: literal.into(),
            kind,
        }
    }
}

/// Convert `literal` into a [`Value`] of the given kind.
///
/// ## Parameters
/// - `literal`: the scenario's parameter literal, exactly as declared.
/// - `kind`: the first declared parameter kind of the target method.
///
/// ## Returns
/// - `Ok(value)` whose variant matches `kind` (or `Value::Str` for unrecognized kinds).
/// - `Err(ConversionError)` when an `Int`/`Float` literal does not parse.
pub fn coerce(literal: &str, kind: ParamKind) -> Result<Value, ConversionError> {
    match kind {
        ParamKind::Str | ParamKind::Other(_) => Ok(Value::Str(literal.to_string())),
        ParamKind::Int => literal
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| ConversionError::new(literal, kind)),
        ParamKind::Float => literal
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| ConversionError::new(literal, kind)),
        ParamKind::Bool => Ok(Value::Bool(literal.eq_ignore_ascii_case("true"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_passthrough() {
        assert_eq!(coerce(" java ", ParamKind::Str), Ok(Value::from(" java ")));
    }

    #[test]
    fn test_int_parse() {
        assert_eq!(coerce("10", ParamKind::Int), Ok(Value::Int(10)));
        assert_eq!(coerce("-42", ParamKind::Int), Ok(Value::Int(-42)));
        assert_eq!(coerce("+7", ParamKind::Int), Ok(Value::Int(7)));
    }

    #[test]
    fn test_int_rejects_garbage() {
        let err = coerce("abc", ParamKind::Int).unwrap_err();
        assert_eq!(err.literal, "abc");
        assert_eq!(err.kind, ParamKind::Int);
        assert_eq!(err.to_string(), "cannot convert 'abc' to int");
    }

    #[test]
    fn test_int_does_not_trim() {
        assert!(coerce(" 1", ParamKind::Int).is_err());
        assert!(coerce("1.5", ParamKind::Int).is_err());
    }

    #[test]
    fn test_float_parse() {
        assert_eq!(coerce("2.5", ParamKind::Float), Ok(Value::Float(2.5)));
        assert_eq!(coerce("3", ParamKind::Float), Ok(Value::Float(3.0)));
        assert!(coerce("two", ParamKind::Float).is_err());
    }

    #[test]
    fn test_bool_is_permissive() {
        assert_eq!(coerce("true", ParamKind::Bool), Ok(Value::Bool(true)));
        assert_eq!(coerce("TRUE", ParamKind::Bool), Ok(Value::Bool(true)));
        assert_eq!(coerce("false", ParamKind::Bool), Ok(Value::Bool(false)));
        assert_eq!(coerce("yes", ParamKind::Bool), Ok(Value::Bool(false)));
        assert_eq!(coerce("", ParamKind::Bool), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_unrecognized_kind_falls_back_to_string() {
        let kind = ParamKind::Other("Duration");
        assert_eq!(coerce("5s", kind), Ok(Value::from("5s")));
    }
}
