use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A calendar month. Ordered by `(year, month)`; the wire spelling is
/// `YYYY-MM` (see `helpers::period_key`), so years are limited to `0..=9999`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Option<Period> {
        if (0..=9999).contains(&year) && (1..=12).contains(&month) {
            Some(Period { year, month })
        } else {
            None
        }
    }

    #[inline]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub fn month(&self) -> u32 {
        self.month
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Outstanding,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Integer(i64),
    Float(f64),
}

impl MetricValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MetricValue::Integer(value) => Some(*value),
            MetricValue::Float(_) => None,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            MetricValue::Integer(value) => *value as f64,
            MetricValue::Float(value) => *value,
        }
    }
}

/// One row of a field-indexed table. A metric the response did not report
/// has no key in `values`; it is never filled with zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint<M: Ord> {
    pub date: DateTime<Utc>,
    pub values: BTreeMap<M, MetricValue>,
}

impl<M: Ord> TimeSeriesPoint<M> {
    pub fn get(&self, metric: &M) -> Option<MetricValue> {
        self.values.get(metric).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BreakdownExtra {
    Coordinates(Coordinates),
    Post { post_id: i64, url: String },
    Link { href: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownItem {
    pub label: String,
    pub secondary_key: Option<String>,
    pub count: i64,
    pub extra: Option<BreakdownExtra>,
}

impl BreakdownItem {
    pub fn new(label: String, count: i64) -> BreakdownItem {
        BreakdownItem {
            label,
            secondary_key: None,
            count,
            extra: None,
        }
    }

    pub fn coordinates(&self) -> Option<&Coordinates> {
        match &self.extra {
            Some(BreakdownExtra::Coordinates(coordinates)) => Some(coordinates),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeMetric {
    pub dimension_values: Vec<String>,
    pub label: String,
    pub count: i64,
    pub related_items: Vec<BreakdownItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub period: Period,
    pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}

/// Detail rows and the per-year aggregates reported next to them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct YearlyBreakdown {
    pub months: Vec<MonthlyCount>,
    pub aggregates: BTreeMap<i32, i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyBreakdown {
    pub start_day: NaiveDate,
    pub end_day: NaiveDate,
    pub total_count: i64,
    pub average_count: i64,
    /// `f64::INFINITY` when `is_change_unbounded` is set.
    pub change_ratio: f64,
    pub is_change_unbounded: bool,
    pub days: Vec<DailyCount>,
}
