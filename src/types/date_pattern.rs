use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

use super::PeriodUnit;

/// How an endpoint spells week periods in its date column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekEncoding {
    /// `2024W01W15`, used only by the site metrics endpoint.
    Compact,
    /// Same as day rows.
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    DateTime,
    Date,
    CompactWeek,
}

impl DatePattern {
    pub fn for_unit(unit: PeriodUnit, week_encoding: WeekEncoding) -> DatePattern {
        match (unit, week_encoding) {
            (PeriodUnit::Hour, _) => DatePattern::DateTime,
            (PeriodUnit::Week, WeekEncoding::Compact) => DatePattern::CompactWeek,
            (PeriodUnit::Day, _)
            | (PeriodUnit::Week, WeekEncoding::Plain)
            | (PeriodUnit::Month, _)
            | (PeriodUnit::Year, _) => DatePattern::Date,
        }
    }

    pub fn format(&self) -> &'static str {
        match self {
            DatePattern::DateTime => "%Y-%m-%d %H:%M:%S",
            DatePattern::Date => "%Y-%m-%d",
            DatePattern::CompactWeek => "%YW%mW%d",
        }
    }

    /// Parses the wall-clock value without attaching a zone.
    pub fn parse_local(&self, value: &str) -> Option<NaiveDateTime> {
        match self {
            DatePattern::DateTime => NaiveDateTime::parse_from_str(value, self.format()).ok(),
            DatePattern::Date | DatePattern::CompactWeek => {
                NaiveDate::parse_from_str(value, self.format()).ok()?.and_hms_opt(0, 0, 0)
            },
        }
    }

    pub fn parse(&self, value: &str, time_zone: FixedOffset) -> Option<DateTime<Utc>> {
        let local = self.parse_local(value)?;
        time_zone
            .from_local_datetime(&local)
            .single()
            .map(|date| date.with_timezone(&Utc))
    }
}

pub(crate) fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DatePattern::Date.format()).ok()
}

pub(crate) fn parse_gmt_timestamp(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, DatePattern::DateTime.format())
        .ok()
        .map(|date| date.and_utc())
}
