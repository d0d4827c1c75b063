//! Declared field types and the coercion of raw strings into them

use std::fmt;

use serde::Serialize;

use crate::error::EnvError;

/// Semantic type a configuration field is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Any string, including the empty string (`String`)
    Text,
    /// Base-10 signed 64-bit integer (`i64`)
    Integer,
    /// IEEE 754 double (`f64`)
    Float,
}

impl FieldType {
    /// Value a field holds before (or instead of) being bound.
    pub fn zero(self) -> Value {
        match self {
            Self::Text => Value::Text(String::new()),
            Self::Integer => Value::Integer(0),
            Self::Float => Value::Float(0.0),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
        })
    }
}

/// A coerced field value, tagged with its type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Value {
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Text(_) => FieldType::Text,
            Self::Integer(_) => FieldType::Integer,
            Self::Float(_) => FieldType::Float,
        }
    }
}

/// Renders the environment-string form of the value.
///
/// For `Text` and `Integer` this reproduces the accepted raw string
/// (an explicit `+` sign or leading zeros are the exceptions).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Convert a raw environment string into the declared type.
pub fn coerce(field: &str, key: &str, ty: FieldType, raw: &str) -> Result<Value, EnvError> {
    let coerced = match ty {
        FieldType::Text => Some(Value::Text(raw.to_string())),
        FieldType::Integer => raw.parse::<i64>().ok().map(Value::Integer),
        FieldType::Float => raw.parse::<f64>().ok().map(Value::Float),
    };
    coerced.ok_or_else(|| EnvError::Coercion {
        key: key.to_string(),
        field: field.to_string(),
        value: raw.to_string(),
        declared: ty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integer(raw: &str) -> Result<Value, EnvError> {
        coerce("Concurrency", "CONCURRENCY", FieldType::Integer, raw)
    }

    #[test]
    fn test_text_is_identity() {
        let value = coerce("Name", "NAME", FieldType::Text, "hello world").unwrap();
        assert_eq!(value, Value::Text("hello world".to_string()));

        let empty = coerce("Name", "NAME", FieldType::Text, "").unwrap();
        assert_eq!(empty, Value::Text(String::new()));
    }

    #[test]
    fn test_integer_accepts_signed_literals() {
        assert_eq!(integer("42").unwrap(), Value::Integer(42));
        assert_eq!(integer("-7").unwrap(), Value::Integer(-7));
        assert_eq!(integer("+3").unwrap(), Value::Integer(3));
    }

    #[test]
    fn test_integer_rejects_non_integers() {
        for raw in ["4.2", "abc", "", " 42", "42 ", "1e3", "99999999999999999999"] {
            let result = integer(raw);
            assert!(
                matches!(result, Err(EnvError::Coercion { .. })),
                "expected coercion error for {raw:?}"
            );
        }
    }

    #[test]
    fn test_coercion_error_carries_context() {
        match integer("abc") {
            Err(EnvError::Coercion {
                key,
                field,
                value,
                declared,
            }) => {
                assert_eq!(key, "CONCURRENCY");
                assert_eq!(field, "Concurrency");
                assert_eq!(value, "abc");
                assert_eq!(declared, FieldType::Integer);
            }
            other => panic!("Expected Coercion error, got {other:?}"),
        }
    }

    #[test]
    fn test_float_accepts_decimal_and_scientific() {
        let parse = |raw| coerce("Version", "VERSION", FieldType::Float, raw).unwrap();
        assert_eq!(parse("1.5"), Value::Float(1.5));
        assert_eq!(parse("-2"), Value::Float(-2.0));
        assert_eq!(parse("1e3"), Value::Float(1000.0));
        assert_eq!(parse(".25"), Value::Float(0.25));
    }

    #[test]
    fn test_float_rejects_garbage() {
        for raw in ["", "1.2.3", "one", "1,5"] {
            assert!(coerce("Version", "VERSION", FieldType::Float, raw).is_err());
        }
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(FieldType::Text.zero(), Value::Text(String::new()));
        assert_eq!(FieldType::Integer.zero(), Value::Integer(0));
        assert_eq!(FieldType::Float.zero(), Value::Float(0.0));
    }

    #[test]
    fn test_display_round_trips_text_and_integer() {
        for raw in ["staging", "", "-7", "42"] {
            let text = coerce("F", "K", FieldType::Text, raw).unwrap();
            assert_eq!(text.to_string(), raw);
        }
        for raw in ["-7", "42", "0"] {
            assert_eq!(integer(raw).unwrap().to_string(), raw);
        }
    }

    #[test]
    fn test_serialize_untagged() {
        let json = serde_json::to_string(&Value::Integer(3)).unwrap();
        assert_eq!(json, "3");
        let json = serde_json::to_string(&FieldType::Float).unwrap();
        assert_eq!(json, "\"float\"");
    }
}
