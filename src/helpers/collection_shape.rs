use tracing::debug;

use crate::{error::Error, types::DynamicValue};

/// Entries of a wire mapping, in encounter order.
pub type KeyedEntries<T> = Vec<(String, T)>;

/// Reads a field that is semantically a mapping but arrives as `[]` when the
/// backend has no data for it.
///
/// An object is decoded entry by entry; an entry `decode` rejects is dropped
/// without affecting its siblings. An empty array is an empty mapping. A
/// non-empty array, or any scalar, is a shape violation for the whole field.
pub fn normalize_mapping<T, F>(
    value: &DynamicValue,
    field: &str,
    mut decode: F,
) -> Result<KeyedEntries<T>, Error>
where
    F: FnMut(&str, &DynamicValue) -> Option<T>,
{
    match value {
        DynamicValue::Object(object) => {
            let entries = object
                .iter()
                .filter_map(|(key, item)| match decode(key, item) {
                    Some(decoded) => Some((key.to_owned(), decoded)),
                    None => {
                        debug!("Dropping entry {} of {}: {}", key, field, item);
                        None
                    },
                })
                .collect();
            Ok(entries)
        },
        DynamicValue::Array(items) if items.is_empty() => Ok(Vec::new()),
        DynamicValue::Array(items) => Err(Error::ShapeMismatch(format!(
            "{}: expected mapping, got array of {} items",
            field,
            items.len()
        ))),
        _ => Err(Error::ShapeMismatch(format!(
            "{}: expected mapping or empty array, got {}",
            field, value
        ))),
    }
}
