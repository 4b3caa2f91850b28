use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::{
    configuration::DecodeContext,
    decoder::{decode_table, ColumnKind, TableMetric},
    error::Error,
    model::TimeSeriesPoint,
    types::{DatePattern, DynamicValue, PeriodUnit, WeekEncoding},
};

use super::StatsResponse;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AdMetric {
    Impressions,
    Revenue,
    Cpm,
}

impl TableMetric for AdMetric {
    const ALL: &'static [Self] =
        &[AdMetric::Impressions, AdMetric::Revenue, AdMetric::Cpm];

    fn column_name(&self) -> &'static str {
        match self {
            AdMetric::Impressions => "impressions",
            AdMetric::Revenue => "revenue",
            AdMetric::Cpm => "cpm",
        }
    }

    fn column_kind(&self) -> ColumnKind {
        match self {
            AdMetric::Impressions => ColumnKind::Integer,
            AdMetric::Revenue | AdMetric::Cpm => ColumnKind::Float,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdRevenue {
    pub period: PeriodUnit,
    pub period_end_date: DateTime<Utc>,
    pub data: Vec<TimeSeriesPoint<AdMetric>>,
}

impl StatsResponse for AdRevenue {
    const PATH_COMPONENT: &'static str = "wordads/stats";

    fn query_properties(
        date: NaiveDate,
        unit: PeriodUnit,
        max_count: usize,
    ) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("unit", String::from(unit)),
            ("date", date.format(DatePattern::Date.format()).to_string()),
            ("quantity", max_count.to_string()),
        ])
    }

    fn decode(context: &DecodeContext, root: &DynamicValue) -> Result<Self, Error> {
        let pattern = DatePattern::for_unit(context.unit, WeekEncoding::Plain);
        let data = decode_table(root, pattern, context.time_zone())?;

        Ok(AdRevenue {
            period: context.unit,
            period_end_date: context.period_end_date,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assembler::test_support::context, model::MetricValue};
    use serde_json::json;

    #[test]
    fn test_query_properties() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let query = AdRevenue::query_properties(date, PeriodUnit::Month, 12);

        assert_eq!(query.get("date").map(String::as_str), Some("2024-03-09"));
        assert_eq!(query.get("unit").map(String::as_str), Some("month"));
        assert_eq!(query.get("quantity").map(String::as_str), Some("12"));
        assert!(!query.contains_key("stat_fields"));
    }

    #[test]
    fn test_decode_widens_currency() {
        let response = AdRevenue::decode(
            &context(PeriodUnit::Day),
            &json!({
                "fields": ["period", "impressions", "revenue", "cpm"],
                "data": [
                    ["2024-01-01", 1500, 3, 2.1],
                    ["2024-01-02", 1.5, "0.4", null]
                ]
            }),
        )
        .unwrap();

        let first = &response.data[0];
        assert_eq!(first.get(&AdMetric::Impressions), Some(MetricValue::Integer(1500)));
        assert_eq!(first.get(&AdMetric::Revenue), Some(MetricValue::Float(3.0)));
        assert_eq!(first.get(&AdMetric::Cpm), Some(MetricValue::Float(2.1)));

        assert!(response.data[1].values.is_empty());
    }

    #[test]
    fn test_weeks_use_plain_dates() {
        let response = AdRevenue::decode(
            &context(PeriodUnit::Week),
            &json!({
                "fields": ["period", "revenue"],
                "data": [["2024-01-15", 1.25], ["2024W01W22", 2.5]]
            }),
        )
        .unwrap();

        assert_eq!(response.data.len(), 1);
        assert_eq!(
            response.data[0].get(&AdMetric::Revenue).map(|value| value.as_f64()),
            Some(1.25)
        );
    }
}
