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
pub enum SiteMetric {
    Views,
    Visitors,
    Likes,
    Comments,
    Posts,
}

impl SiteMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteMetric::Views => "views",
            SiteMetric::Visitors => "visitors",
            SiteMetric::Likes => "likes",
            SiteMetric::Comments => "comments",
            SiteMetric::Posts => "posts",
        }
    }
}

impl TableMetric for SiteMetric {
    const ALL: &'static [Self] = &[
        SiteMetric::Views,
        SiteMetric::Visitors,
        SiteMetric::Likes,
        SiteMetric::Comments,
        SiteMetric::Posts,
    ];

    fn column_name(&self) -> &'static str {
        self.as_str()
    }

    fn column_kind(&self) -> ColumnKind {
        ColumnKind::Integer
    }
}

/// Traffic totals per period, in the order the rows arrived.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteMetrics {
    pub period: PeriodUnit,
    pub period_end_date: DateTime<Utc>,
    pub data: Vec<TimeSeriesPoint<SiteMetric>>,
}

impl StatsResponse for SiteMetrics {
    const PATH_COMPONENT: &'static str = "stats/visits";

    fn query_properties(
        _date: NaiveDate,
        unit: PeriodUnit,
        max_count: usize,
    ) -> BTreeMap<&'static str, String> {
        let stat_fields = SiteMetric::ALL
            .iter()
            .map(SiteMetric::as_str)
            .collect::<Vec<_>>()
            .join(",");

        BTreeMap::from([
            ("unit", String::from(unit)),
            ("quantity", max_count.to_string()),
            ("stat_fields", stat_fields),
        ])
    }

    fn decode(context: &DecodeContext, root: &DynamicValue) -> Result<Self, Error> {
        let pattern = DatePattern::for_unit(context.unit, WeekEncoding::Compact);
        let data = decode_table(root, pattern, context.time_zone())?;

        Ok(SiteMetrics {
            period: context.unit,
            period_end_date: context.period_end_date,
            data,
        })
    }
}
