//! Input coercion rules
//!
//! Every accepted conversion from a JSON input value to a declared
//! [`FieldType`] is listed in [`coerce`]. Values must match their declared
//! type exactly; the single widening is integer input for a float field.

use serde_json::Value;

use super::IssueCode;
use crate::types::{FieldType, FieldValue};

/// Convert `value` to `field_type`, or return the issue code describing the mismatch.
pub fn coerce(value: &Value, field_type: FieldType) -> Result<FieldValue, IssueCode> {
    match field_type {
        FieldType::Text => match value {
            Value::String(s) => Ok(FieldValue::Text(s.clone())),
            _ => Err(IssueCode::type_mismatch(field_type)),
        },
        FieldType::Integer => match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(FieldValue::Integer(i))
                } else if n.is_u64() {
                    Err(IssueCode::IntOutOfRange)
                } else {
                    Err(IssueCode::IntType)
                }
            }
            _ => Err(IssueCode::type_mismatch(field_type)),
        },
        FieldType::Float => match value {
            Value::Number(n) => n
                .as_f64()
                .filter(|f| f.is_finite())
                .map(FieldValue::Float)
                .ok_or(IssueCode::FloatType),
            _ => Err(IssueCode::type_mismatch(field_type)),
        },
        FieldType::Boolean => match value {
            Value::Bool(b) => Ok(FieldValue::Boolean(*b)),
            _ => Err(IssueCode::type_mismatch(field_type)),
        },
    }
}
