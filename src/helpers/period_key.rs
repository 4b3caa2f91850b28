use std::{fmt, str::FromStr};

use crate::{error::Error, model::Period};

/// Parses `YYYY-MM`. Exactly two all-digit components around a single
/// hyphen, year in `0..=9999`, month in `1..=12`.
pub fn parse_period_key(value: &str) -> Result<Period, Error> {
    let invalid = || Error::InvalidPeriodKey(value.to_owned());

    let (year, month) = value.split_once('-').ok_or_else(invalid)?;

    if !is_digits(year) || !is_digits(month) {
        return Err(invalid());
    }

    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;

    Period::new(year, month).ok_or_else(invalid)
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|byte| byte.is_ascii_digit())
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(value: &str) -> Result<Period, Self::Err> {
        parse_period_key(value)
    }
}

impl TryFrom<String> for Period {
    type Error = Error;

    fn try_from(value: String) -> Result<Period, Self::Error> {
        parse_period_key(&value)
    }
}

impl From<Period> for String {
    fn from(value: Period) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_period_key() {
        let period = parse_period_key("2024-03").unwrap();

        assert_eq!(period.year(), 2024);
        assert_eq!(period.month(), 3);
    }

    #[test]
    fn test_round_trip() {
        for key in ["2024-01", "1999-12", "0042-07"] {
            assert_eq!(parse_period_key(key).unwrap().to_string(), key);
        }

        for year in [0, 1, 999, 2024, 9999] {
            for month in 1..=12 {
                let period = Period::new(year, month).unwrap();
                assert_eq!(parse_period_key(&period.to_string()).unwrap(), period);

                let encoded = serde_json::to_string(&period).unwrap();
                assert_eq!(serde_json::from_str::<Period>(&encoded).unwrap(), period);
            }
        }

        for year in [-1, -2024, 10000, i32::MAX] {
            assert!(Period::new(year, 3).is_none());
        }
        assert!(matches!(parse_period_key("10000-01"), Err(Error::InvalidPeriodKey(_))));
    }

    #[test]
    fn test_rejects_malformed_keys() {
        for key in [
            "2024", "2024-13", "2024-00", "2024--01", "2024-01-01", "-2024-01",
            "2024-+1", "24a4-01", "", "2024-", "-01", "99999999999-01",
        ] {
            assert!(
                matches!(parse_period_key(key), Err(Error::InvalidPeriodKey(_))),
                "key {:?} should be rejected",
                key
            );
        }
    }

    #[test]
    fn test_serde_uses_key_spelling() {
        let period = Period::new(2024, 5).unwrap();
        let encoded = serde_json::to_string(&period).unwrap();

        assert_eq!(encoded, r#""2024-05""#);
        assert_eq!(serde_json::from_str::<Period>(&encoded).unwrap(), period);
    }
}
