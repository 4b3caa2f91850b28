//! Typed access into an already-parsed JSON tree.
//!
//! Every decoder reads its payload through these helpers so that a field of
//! the wrong JSON type is an explicit `None`/`Err` at the call site instead of
//! a silent cast failure.

use crate::error::Error;

/// A parsed JSON document. Built with `preserve_order`, so object iteration
/// follows the order keys appeared on the wire.
pub type DynamicValue = serde_json::Value;

pub type DynamicObject = serde_json::Map<String, DynamicValue>;

pub fn parse_document(bytes: &[u8]) -> Result<DynamicValue, Error> {
    let value = serde_json::from_slice(bytes)?;
    Ok(value)
}

pub fn as_object<'a>(value: &'a DynamicValue, field: &str) -> Result<&'a DynamicObject, Error> {
    value.as_object().ok_or_else(|| Error::UnexpectedType {
        field: field.to_owned(),
        expected: "object",
    })
}

/// Returns the value under `key`. An explicit `null` counts as missing.
pub fn extract_field<'a>(object: &'a DynamicObject, key: &str) -> Result<&'a DynamicValue, Error> {
    optional_field(object, key)
        .ok_or_else(|| Error::FieldNotExist(key.to_owned()))
}

pub fn optional_field<'a>(object: &'a DynamicObject, key: &str) -> Option<&'a DynamicValue> {
    object.get(key).filter(|value| !value.is_null())
}

pub fn extract_object<'a>(
    object: &'a DynamicObject,
    key: &str,
) -> Result<&'a DynamicObject, Error> {
    as_object(extract_field(object, key)?, key)
}

pub fn extract_array<'a>(
    object: &'a DynamicObject,
    key: &str,
) -> Result<&'a Vec<DynamicValue>, Error> {
    extract_field(object, key)?
        .as_array()
        .ok_or_else(|| Error::UnexpectedType {
            field: key.to_owned(),
            expected: "array",
        })
}

pub fn extract_str<'a>(object: &'a DynamicObject, key: &str) -> Result<&'a str, Error> {
    extract_field(object, key)?
        .as_str()
        .ok_or_else(|| Error::UnexpectedType {
            field: key.to_owned(),
            expected: "string",
        })
}

pub fn extract_int(object: &DynamicObject, key: &str) -> Result<i64, Error> {
    int_value(extract_field(object, key)?).ok_or_else(|| Error::UnexpectedType {
        field: key.to_owned(),
        expected: "integer",
    })
}

pub fn optional_str<'a>(object: &'a DynamicObject, key: &str) -> Option<&'a str> {
    object.get(key).and_then(DynamicValue::as_str)
}

pub fn optional_int(object: &DynamicObject, key: &str) -> Option<i64> {
    object.get(key).and_then(int_value)
}

/// Integral JSON numbers only; `12.5` and `"12"` are not integers.
pub fn int_value(value: &DynamicValue) -> Option<i64> {
    value.as_i64()
}

/// Any JSON number, integers widened.
pub fn float_value(value: &DynamicValue) -> Option<f64> {
    match value {
        DynamicValue::Number(number) => number.as_f64(),
        _ => None,
    }
}
