pub use self::{
    date_pattern::{DatePattern, WeekEncoding},
    dynamic_value::{
        as_object, extract_array, extract_field, extract_int, extract_object,
        extract_str, float_value, int_value, optional_field, optional_int,
        optional_str, parse_document, DynamicObject, DynamicValue,
    },
    period_unit::PeriodUnit,
};

pub(crate) use self::date_pattern::{parse_day, parse_gmt_timestamp};

mod date_pattern;
mod dynamic_value;
mod period_unit;
