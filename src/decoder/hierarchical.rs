//! Nested breakdowns keyed by year, and the recent-weeks list.
//!
//! A year entry interleaves detail rows with an aggregate for the same year:
//!
//! ```json
//! {"2024": {"months": {"1": 120, "2": 95}, "total": 215}}
//! ```
//!
//! Both are collected in one walk over the tree.

use tracing::debug;

use crate::{
    error::Error,
    model::{DailyCount, MonthlyCount, Period, WeeklyBreakdown, YearlyBreakdown},
    types::{
        as_object, extract_array, extract_int, optional_field, optional_int,
        parse_day, DynamicObject, DynamicValue,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearlyBreakdownKeys {
    pub detail: &'static str,
    pub aggregate: &'static str,
}

impl YearlyBreakdownKeys {
    pub const MONTHLY_TOTALS: YearlyBreakdownKeys = YearlyBreakdownKeys {
        detail: "months",
        aggregate: "total",
    };

    pub const MONTHLY_AVERAGES: YearlyBreakdownKeys = YearlyBreakdownKeys {
        detail: "months",
        aggregate: "overall",
    };
}

/// A year key that is not an integer skips the whole year. A month key
/// outside `1..=12` only skips that detail row; the year's aggregate is
/// still collected.
pub fn aggregate_yearly_breakdown(
    root: &DynamicValue,
    keys: YearlyBreakdownKeys,
) -> Result<YearlyBreakdown, Error> {
    let years = as_object(root, "breakdown")?;
    let mut breakdown = YearlyBreakdown::default();

    for (year_key, entry) in years {
        let Ok(year) = year_key.parse::<i32>() else {
            debug!("Skipping year key {}", year_key);
            continue;
        };
        let Some(entry) = entry.as_object() else {
            debug!("Skipping year {}: not an object", year);
            continue;
        };

        if let Some(aggregate) = optional_int(entry, keys.aggregate) {
            breakdown.aggregates.insert(year, aggregate);
        }

        let Some(months) = entry.get(keys.detail).and_then(DynamicValue::as_object)
        else {
            continue;
        };
        breakdown.months.extend(monthly_counts(year, months));
    }

    Ok(breakdown)
}

fn monthly_counts(year: i32, months: &DynamicObject) -> Vec<MonthlyCount> {
    months
        .iter()
        .filter_map(|(month_key, value)| {
            let period = month_key
                .parse::<u32>()
                .ok()
                .and_then(|month| Period::new(year, month));
            match (period, value.as_i64()) {
                (Some(period), Some(count)) => Some(MonthlyCount { period, count }),
                _ => {
                    debug!("Skipping month {} of {}: {}", month_key, year, value);
                    None
                },
            }
        })
        .collect()
}

/// Weeks missing `total`, `average` or `days` are dropped, as are weeks
/// whose day list decodes to nothing.
pub fn decode_weekly_breakdowns(weeks: &[DynamicValue]) -> Vec<WeeklyBreakdown> {
    weeks
        .iter()
        .enumerate()
        .filter_map(|(index, week)| {
            let breakdown = week.as_object().and_then(weekly_breakdown);
            if breakdown.is_none() {
                debug!("Dropping week {}: {}", index, week);
            }
            breakdown
        })
        .collect()
}

fn weekly_breakdown(week: &DynamicObject) -> Option<WeeklyBreakdown> {
    let total_count = extract_int(week, "total").ok()?;
    let average_count = extract_int(week, "average").ok()?;
    let days: Vec<DailyCount> = extract_array(week, "days")
        .ok()?
        .iter()
        .filter_map(daily_count)
        .collect();

    let start_day = days.first()?.date;
    let end_day = days.last()?.date;
    let (change_ratio, is_change_unbounded) =
        decode_change_ratio(optional_field(week, "change"));

    Some(WeeklyBreakdown {
        start_day,
        end_day,
        total_count,
        average_count,
        change_ratio,
        is_change_unbounded,
        days,
    })
}

fn daily_count(day: &DynamicValue) -> Option<DailyCount> {
    let day = day.as_object()?;
    let date = day.get("day").and_then(DynamicValue::as_str).and_then(parse_day)?;
    let count = optional_int(day, "count")?;

    Some(DailyCount { date, count })
}

/// Returns `(ratio, is_unbounded)`.
///
/// The object form `{"isInfinity": bool}` wins over any number that comes
/// with it. A bare number is the ratio. Anything else reads as no change.
pub fn decode_change_ratio(change: Option<&DynamicValue>) -> (f64, bool) {
    let Some(change) = change else {
        return (0.0, false);
    };

    if let Some(flag) = change
        .as_object()
        .and_then(|object| object.get("isInfinity"))
        .and_then(DynamicValue::as_bool)
    {
        return if flag { (f64::INFINITY, true) } else { (0.0, false) };
    }

    (change.as_f64().unwrap_or(0.0), false)
}
