use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl PeriodUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodUnit::Hour => "hour",
            PeriodUnit::Day => "day",
            PeriodUnit::Week => "week",
            PeriodUnit::Month => "month",
            PeriodUnit::Year => "year",
        }
    }
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<PeriodUnit> for String {
    fn from(value: PeriodUnit) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for PeriodUnit {
    type Err = Error;

    fn from_str(value: &str) -> Result<PeriodUnit, Self::Err> {
        match value {
            "hour" => Ok(PeriodUnit::Hour),
            "day" => Ok(PeriodUnit::Day),
            "week" => Ok(PeriodUnit::Week),
            "month" => Ok(PeriodUnit::Month),
            "year" => Ok(PeriodUnit::Year),
            _ => Err(Error::InvalidOption {
                option: format!(
                    "unit '{}'. Valid options: hour, day, week, month, year",
                    value
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_unit_spelling() {
        for unit in [
            PeriodUnit::Hour,
            PeriodUnit::Day,
            PeriodUnit::Week,
            PeriodUnit::Month,
            PeriodUnit::Year,
        ] {
            assert_eq!(PeriodUnit::from_str(unit.as_str()).unwrap(), unit);
        }

        assert!(matches!(
            PeriodUnit::from_str("Week"),
            Err(Error::InvalidOption { .. })
        ));
    }
}
