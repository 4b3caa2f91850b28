use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::{error::Error, model::PaymentStatus, types::DynamicValue};

/// A scalar the backend spells in more than one JSON type.
pub trait FlexibleScalar: Sized {
    fn decode_flexible(value: &DynamicValue) -> Result<Self, Error>;
}

pub fn decode_flexible<T: FlexibleScalar>(value: &DynamicValue) -> Result<T, Error> {
    T::decode_flexible(value)
}

impl FlexibleScalar for BigDecimal {
    /// Numeric strings first, then JSON numbers. Integers convert exactly;
    /// floats go through their shortest round-trip text so `12.5` stays
    /// `12.5` instead of picking up binary noise.
    fn decode_flexible(value: &DynamicValue) -> Result<Self, Error> {
        if let DynamicValue::String(text) = value {
            if let Ok(decimal) = BigDecimal::from_str(text) {
                return Ok(decimal);
            }
        }

        match value {
            DynamicValue::Number(number) => {
                if let Some(integer) = number.as_i64() {
                    return Ok(BigDecimal::from(integer));
                }
                if let Some(integer) = number.as_u64() {
                    return Ok(BigDecimal::from(integer));
                }
                let decimal = BigDecimal::from_str(&number.to_string())?;
                Ok(decimal)
            },
            _ => Err(Error::InvalidDecimal(value.to_string())),
        }
    }
}

impl FlexibleScalar for PaymentStatus {
    /// Never fails: `"1"` and `1` are paid, everything else is outstanding.
    fn decode_flexible(value: &DynamicValue) -> Result<Self, Error> {
        let paid = match value {
            DynamicValue::String(text) => text == "1",
            DynamicValue::Number(number) => number.as_i64() == Some(1),
            _ => false,
        };

        Ok(if paid {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Outstanding
        })
    }
}

pub fn payment_status_or_default(value: Option<&DynamicValue>) -> PaymentStatus {
    value
        .and_then(|value| PaymentStatus::decode_flexible(value).ok())
        .unwrap_or(PaymentStatus::Outstanding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decimal(value: DynamicValue) -> BigDecimal {
        decode_flexible::<BigDecimal>(&value).unwrap()
    }

    #[test]
    fn test_decimal_from_string_keeps_scale() {
        let value = decimal(json!("12.50"));

        assert_eq!(value, BigDecimal::from_str("12.5").unwrap());
        assert_eq!(value.to_string(), "12.50");
    }

    #[test]
    fn test_decimal_from_numbers() {
        assert_eq!(decimal(json!(12.5)), BigDecimal::from_str("12.5").unwrap());
        assert_eq!(decimal(json!(12)), BigDecimal::from(12));
        assert_eq!(decimal(json!(0.1)).to_string(), "0.1");
        assert_eq!(
            decimal(json!(u64::MAX)),
            BigDecimal::from_str("18446744073709551615").unwrap()
        );
    }

    #[test]
    fn test_decimal_failure() {
        for value in [json!("twelve"), json!(""), json!(null), json!(true), json!([1])] {
            assert!(
                matches!(
                    decode_flexible::<BigDecimal>(&value),
                    Err(Error::InvalidDecimal(_))
                ),
                "value {} should not decode",
                value
            );
        }
    }

    #[test]
    fn test_payment_status_encodings() {
        assert_eq!(payment_status_or_default(Some(&json!("1"))), PaymentStatus::Paid);
        assert_eq!(payment_status_or_default(Some(&json!(1))), PaymentStatus::Paid);

        for value in [json!("0"), json!(0), json!("paid"), json!(1.5), json!(null)] {
            assert_eq!(
                payment_status_or_default(Some(&value)),
                PaymentStatus::Outstanding
            );
        }
        assert_eq!(payment_status_or_default(None), PaymentStatus::Outstanding);
    }
}
