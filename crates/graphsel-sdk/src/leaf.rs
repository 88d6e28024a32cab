//! Decoding of scalar and enum leaves.

use crate::error::DecodeError;
use serde_json::Value;

/// A value that can sit at a leaf of a selection.
///
/// `decode` reads the JSON payload of the field; `mock` is the placeholder
/// handed out while a selection is only collecting fields.
pub trait LeafValue: Sized {
    fn decode(value: &Value) -> Result<Self, DecodeError>;
    fn mock() -> Self;
}

impl LeafValue for String {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Null => Err(DecodeError::MissingValue),
            other => Err(DecodeError::mismatch("string", other)),
        }
    }

    fn mock() -> Self {
        String::new()
    }
}

impl LeafValue for bool {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Null => Err(DecodeError::MissingValue),
            other => Err(DecodeError::mismatch("boolean", other)),
        }
    }

    fn mock() -> Self {
        false
    }
}

impl LeafValue for i64 {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Number(n) => n.as_i64().ok_or_else(|| DecodeError::mismatch("integer", value)),
            Value::Null => Err(DecodeError::MissingValue),
            other => Err(DecodeError::mismatch("integer", other)),
        }
    }

    fn mock() -> Self {
        0
    }
}

impl LeafValue for i32 {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let wide = i64::decode(value)?;
        i32::try_from(wide).map_err(|_| DecodeError::TypeMismatch {
            expected: "32-bit integer",
            found: wide.to_string(),
        })
    }

    fn mock() -> Self {
        0
    }
}

impl LeafValue for f64 {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Number(n) => n.as_f64().ok_or_else(|| DecodeError::mismatch("float", value)),
            Value::Null => Err(DecodeError::MissingValue),
            other => Err(DecodeError::mismatch("float", other)),
        }
    }

    fn mock() -> Self {
        0.0
    }
}

/// Untyped scalars keep the raw JSON. Null is still a missing value: a
/// nullable untyped scalar decodes as `Option<Value>`.
impl LeafValue for Value {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Null => Err(DecodeError::MissingValue),
            other => Ok(other.clone()),
        }
    }

    fn mock() -> Self {
        Value::Null
    }
}

impl LeafValue for chrono::DateTime<chrono::Utc> {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let raw = String::decode(value)?;
        chrono::DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(|e| DecodeError::InvalidScalar {
                type_name: "DateTime",
                message: e.to_string(),
            })
    }

    fn mock() -> Self {
        chrono::DateTime::<chrono::Utc>::default()
    }
}

impl<T: LeafValue> LeafValue for Option<T> {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Null => Ok(None),
            other => T::decode(other).map(Some),
        }
    }

    fn mock() -> Self {
        None
    }
}

impl<T: LeafValue> LeafValue for Vec<T> {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| T::decode(item).map_err(|e| e.within(i.to_string())))
                .collect(),
            Value::Null => Err(DecodeError::MissingValue),
            other => Err(DecodeError::mismatch("list", other)),
        }
    }

    fn mock() -> Self {
        Vec::new()
    }
}

/// Implement [`LeafValue`] and [`IntoArgument`](crate::IntoArgument) for a
/// custom scalar type through its serde impls. The mock is `Default::default()`.
///
/// ```ignore
/// #[derive(Default, serde::Serialize, serde::Deserialize)]
/// pub struct Cursor(String);
/// graphsel_sdk::leaf_scalar!(Cursor);
/// ```
#[macro_export]
macro_rules! leaf_scalar {
    ($ty:ty) => {
        impl $crate::LeafValue for $ty {
            fn decode(
                value: &$crate::__private::serde_json::Value,
            ) -> ::std::result::Result<Self, $crate::DecodeError> {
                if value.is_null() {
                    return Err($crate::DecodeError::MissingValue);
                }
                $crate::__private::serde_json::from_value(value.clone()).map_err(|e| {
                    $crate::DecodeError::InvalidScalar {
                        type_name: stringify!($ty),
                        message: e.to_string(),
                    }
                })
            }

            fn mock() -> Self {
                ::std::default::Default::default()
            }
        }

        impl $crate::IntoArgument for $ty {
            fn into_argument(self) -> $crate::ArgumentValue {
                match $crate::__private::serde_json::to_value(&self) {
                    Ok(value) => $crate::ArgumentValue::from_json(&value),
                    Err(_) => $crate::ArgumentValue::Null,
                }
            }
        }
    };
}
