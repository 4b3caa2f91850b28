use crate::types::DynamicValue;

/// Decodes a composite key that is itself JSON text.
///
/// - `"google"` -> `["google"]`
/// - `["spring-sale","google","cpc"]` -> `["spring-sale", "google", "cpc"]`
///
/// Anything else yields an empty tuple; the caller decides what an unlabeled
/// key means.
pub fn parse_key_tuple(raw: &str) -> Vec<String> {
    if let Ok(values) = serde_json::from_str::<Vec<String>>(raw) {
        return values;
    }

    if let Ok(value) = serde_json::from_str::<String>(raw) {
        return vec![value];
    }

    Vec::new()
}

/// Like [`parse_key_tuple`], except that a key which is not JSON text at all
/// is read as a single bare dimension. Keys that are JSON of any other shape
/// stay unlabeled.
pub fn parse_dimension_key(raw: &str) -> Vec<String> {
    let values = parse_key_tuple(raw);
    if !values.is_empty()
        || raw.trim().is_empty()
        || serde_json::from_str::<DynamicValue>(raw).is_ok()
    {
        return values;
    }

    vec![raw.to_owned()]
}

pub fn join_label(values: &[String], separator: &str) -> String {
    values.join(separator)
}
