pub use self::{
    collection_shape::{normalize_mapping, KeyedEntries},
    flexible_scalar::{decode_flexible, payment_status_or_default, FlexibleScalar},
    key_tuple::{join_label, parse_dimension_key, parse_key_tuple},
    period_key::parse_period_key,
};

mod collection_shape;
mod flexible_scalar;
mod key_tuple;
mod period_key;
