use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Declared type of a model field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Integer,
    Float,
    Boolean,
}

impl FieldType {
    /// JSON Schema `type` keyword for this field type
    pub fn json_type(&self) -> &'static str {
        match self {
            FieldType::Text => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "number",
            FieldType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Text => write!(f, "text"),
            FieldType::Integer => write!(f, "integer"),
            FieldType::Float => write!(f, "float"),
            FieldType::Boolean => write!(f, "boolean"),
        }
    }
}

/// A value that passed validation for its declared field type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Text(s) => Value::String(s),
            FieldValue::Integer(n) => Value::from(n),
            FieldValue::Float(n) => Value::from(n),
            FieldValue::Boolean(b) => Value::Bool(b),
        }
    }
}

/// One argument of [`Pet::try_new`](crate::Pet::try_new).
///
/// Holds a JSON value, or a non-finite float that JSON cannot represent so
/// it can still be reported as received.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Json(Value),
    NonFinite(f64),
}

impl From<Value> for FieldInput {
    fn from(value: Value) -> Self {
        FieldInput::Json(value)
    }
}

macro_rules! json_field_input {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FieldInput {
                fn from(value: $t) -> Self {
                    FieldInput::Json(Value::from(value))
                }
            }
        )*
    };
}

json_field_input!(
    bool, &str, String, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize
);

impl From<f64> for FieldInput {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            FieldInput::Json(Value::from(value))
        } else {
            FieldInput::NonFinite(value)
        }
    }
}

impl From<f32> for FieldInput {
    fn from(value: f32) -> Self {
        Self::from(f64::from(value))
    }
}

/// Kind of a received JSON value, used when reporting what was supplied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Kind of `value`; numbers are split into integers and floats
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(n) if n.is_f64() => ValueKind::Float,
            Value::Number(_) => ValueKind::Integer,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        f.write_str(name)
    }
}
