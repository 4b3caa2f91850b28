use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use crate::{
    configuration::DecodeContext,
    decoder::{
        aggregate_yearly_breakdown, decode_weekly_breakdowns, ColumnKind,
        FieldIndexedTable, TableMetric, YearlyBreakdownKeys, PERIOD_COLUMN,
    },
    error::Error,
    model::{DailyCount, MonthlyCount, WeeklyBreakdown},
    types::{
        as_object, extract_array, extract_field, extract_int, extract_str,
        optional_field, optional_int, optional_str, parse_day,
        parse_gmt_timestamp, DatePattern, DynamicObject, DynamicValue,
    },
};

use super::StatsResponse;

const LAST_TWO_WEEKS_DAYS: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum DailyViews {
    Views,
}

impl TableMetric for DailyViews {
    const ALL: &'static [Self] = &[DailyViews::Views];

    fn column_name(&self) -> &'static str {
        "views"
    }

    fn column_kind(&self) -> ColumnKind {
        ColumnKind::Integer
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDetails {
    pub fetched_date: NaiveDate,
    pub total_views: i64,

    pub recent_weeks: Vec<WeeklyBreakdown>,
    pub daily_averages_per_month: Vec<MonthlyCount>,
    pub monthly_breakdown: Vec<MonthlyCount>,
    pub last_two_weeks: Vec<DailyCount>,
    pub data: Vec<DailyCount>,

    pub highest_month: Option<i64>,
    pub highest_day_average: Option<i64>,
    pub highest_week_average: Option<i64>,

    pub yearly_totals: BTreeMap<i32, i64>,
    pub overall_averages: BTreeMap<i32, i64>,

    pub fields: Option<Vec<String>>,

    /// Absent for deleted posts.
    pub post: Option<PostMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostMetadata {
    pub post_id: i64,
    pub title: String,
    pub author_id: Option<String>,
    pub date_gmt: Option<DateTime<Utc>>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub status: Option<String>,
    pub comment_status: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub modified_gmt: Option<DateTime<Utc>>,
    pub content_filtered: Option<String>,
    pub parent: Option<i64>,
    pub guid: Option<String>,
    pub post_type: Option<String>,
    pub mime_type: Option<String>,
    pub comment_count: Option<String>,
    pub permalink: Option<String>,
}

impl PostMetadata {
    /// `ID` and `post_title` are required; every other attribute is read
    /// only when it has the expected type.
    pub fn from_object(post: &DynamicObject) -> Option<PostMetadata> {
        let text = |key: &str| optional_str(post, key).map(str::to_owned);
        let timestamp = |key: &str| optional_str(post, key).and_then(parse_gmt_timestamp);

        Some(PostMetadata {
            post_id: optional_int(post, "ID")?,
            title: text("post_title")?,
            author_id: text("post_author"),
            date_gmt: timestamp("post_date_gmt"),
            content: text("post_content"),
            excerpt: text("post_excerpt"),
            status: text("post_status"),
            comment_status: text("comment_status"),
            password: text("post_password"),
            name: text("post_name"),
            modified_gmt: timestamp("post_modified_gmt"),
            content_filtered: text("post_content_filtered"),
            parent: optional_int(post, "post_parent"),
            guid: text("guid"),
            post_type: text("post_type"),
            mime_type: text("post_mime_type"),
            comment_count: text("comment_count"),
            permalink: text("permalink"),
        })
    }
}

impl StatsResponse for PostDetails {
    const PATH_COMPONENT: &'static str = "stats/post";

    fn decode(context: &DecodeContext, root: &DynamicValue) -> Result<Self, Error> {
        let object = as_object(root, "root")?;

        let fetched_date = extract_str(object, "date").and_then(|date| {
            parse_day(date).ok_or_else(|| Error::UnexpectedType {
                field: "date".to_owned(),
                expected: "YYYY-MM-DD date",
            })
        })?;
        let total_views = extract_int(object, "views")?;
        let years = extract_field(object, "years")?;
        let averages = extract_field(object, "averages")?;
        let weeks = extract_array(object, "weeks")?;
        let rows = extract_array(object, "data")?;

        let fields = string_list(optional_field(object, "fields"));
        let table = match &fields {
            Some(fields) => FieldIndexedTable::<DailyViews>::new(fields.as_slice())?,
            None => FieldIndexedTable::new(&[PERIOD_COLUMN, "views"])?,
        };
        let time_zone = context.time_zone();
        let daily = |rows: &[DynamicValue]| daily_counts(&table, rows, time_zone);

        let monthly_totals =
            aggregate_yearly_breakdown(years, YearlyBreakdownKeys::MONTHLY_TOTALS)?;
        let monthly_averages =
            aggregate_yearly_breakdown(averages, YearlyBreakdownKeys::MONTHLY_AVERAGES)?;

        let post = optional_field(object, "post")
            .and_then(DynamicValue::as_object)
            .and_then(|post| {
                let metadata = PostMetadata::from_object(post);
                if metadata.is_none() {
                    debug!("Post metadata without ID or title");
                }
                metadata
            });

        Ok(PostDetails {
            fetched_date,
            total_views,
            recent_weeks: decode_weekly_breakdowns(weeks),
            daily_averages_per_month: monthly_averages.months,
            monthly_breakdown: monthly_totals.months,
            last_two_weeks: daily(&rows[rows.len().saturating_sub(LAST_TWO_WEEKS_DAYS)..]),
            data: daily(rows),
            highest_month: optional_int(object, "highest_month"),
            highest_day_average: optional_int(object, "highest_day_average"),
            highest_week_average: optional_int(object, "highest_week_average"),
            yearly_totals: monthly_totals.aggregates,
            overall_averages: monthly_averages.aggregates,
            fields,
            post,
        })
    }
}

/// Rows without a views count carry nothing for a daily series.
fn daily_counts(
    table: &FieldIndexedTable<DailyViews>,
    rows: &[DynamicValue],
    time_zone: FixedOffset,
) -> Vec<DailyCount> {
    table
        .decode_rows(rows, DatePattern::Date, time_zone)
        .into_iter()
        .filter_map(|point| {
            let count = point.get(&DailyViews::Views)?.as_i64()?;
            Some(DailyCount {
                date: point.date.with_timezone(&time_zone).date_naive(),
                count,
            })
        })
        .collect()
}

fn string_list(value: Option<&DynamicValue>) -> Option<Vec<String>> {
    value?
        .as_array()?
        .iter()
        .map(|field| field.as_str().map(str::to_owned))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assembler::{decode_response, test_support::context},
        configuration::Config,
        model::Period,
        types::PeriodUnit,
    };
    use serde_json::json;

    fn day(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn payload() -> DynamicValue {
        let rows: Vec<DynamicValue> = (1..=20)
            .map(|day| json!([format!("2024-01-{:02}", day), day]))
            .collect();

        json!({
            "date": "2024-01-20",
            "views": 210,
            "highest_month": 215,
            "highest_day_average": 18,
            "fields": ["period", "views"],
            "data": rows,
            "years": {
                "2023": { "months": { "12": 40 }, "total": 40 },
                "2024": { "months": { "1": 170 }, "total": 170 }
            },
            "averages": {
                "2024": { "months": { "1": 8 }, "overall": 8 }
            },
            "weeks": [{
                "total": 28,
                "average": 4,
                "change": 0.25,
                "days": [
                    { "day": "2024-01-14", "count": 4 },
                    { "day": "2024-01-20", "count": 4 }
                ]
            }],
            "post": {
                "ID": 42,
                "post_title": "Hello",
                "post_author": "7",
                "post_date_gmt": "2023-05-04 12:30:00",
                "post_modified_gmt": "0000-00-00 00:00:00",
                "post_parent": 0,
                "comment_count": "3",
                "permalink": "https://example.com/hello"
            }
        })
    }

    #[test]
    fn test_decode_post_details() {
        let details: PostDetails =
            decode_response(&context(PeriodUnit::Day), &payload()).unwrap();

        assert_eq!(details.fetched_date, day("2024-01-20"));
        assert_eq!(details.total_views, 210);
        assert_eq!(details.data.len(), 20);
        assert_eq!(details.data[0], DailyCount { date: day("2024-01-01"), count: 1 });
        assert_eq!(details.last_two_weeks.len(), 14);
        assert_eq!(details.last_two_weeks[0].date, day("2024-01-07"));
        assert_eq!(details.monthly_breakdown.len(), 2);
        assert_eq!(details.monthly_breakdown[0].period, Period::new(2023, 12).unwrap());
        assert_eq!(details.yearly_totals.get(&2024), Some(&170));
        assert_eq!(details.daily_averages_per_month.len(), 1);
        assert_eq!(details.overall_averages.get(&2024), Some(&8));
        assert_eq!(details.recent_weeks.len(), 1);
        assert_eq!(details.recent_weeks[0].change_ratio, 0.25);
        assert_eq!(details.highest_month, Some(215));
        assert_eq!(details.highest_week_average, None);
        assert_eq!(
            details.fields,
            Some(vec!["period".to_owned(), "views".to_owned()])
        );

        let post = details.post.unwrap();
        assert_eq!(post.post_id, 42);
        assert_eq!(post.title, "Hello");
        assert_eq!(post.author_id.as_deref(), Some("7"));
        assert_eq!(post.date_gmt.unwrap().to_rfc3339(), "2023-05-04T12:30:00+00:00");
        assert_eq!(post.modified_gmt, None);
        assert_eq!(post.parent, Some(0));
        assert_eq!(post.excerpt, None);
    }

    #[test]
    fn test_dates_ignore_site_time_zone() {
        let time_zone = FixedOffset::east_opt(10 * 3600).unwrap();
        let context = DecodeContext::new(
            Config::default().with_time_zone(time_zone),
            PeriodUnit::Day,
            crate::assembler::test_support::anchor(),
        );
        let details = PostDetails::decode(&context, &payload()).unwrap();

        assert_eq!(details.data[0].date, day("2024-01-01"));
    }

    #[test]
    fn test_post_is_optional() {
        let mut root = payload();
        let object = root.as_object_mut().unwrap();
        object.remove("fields");
        object.insert("post".to_owned(), json!({ "post_title": "No id" }));

        let details = PostDetails::decode(&context(PeriodUnit::Day), &root).unwrap();

        assert!(details.post.is_none());
        assert!(details.fields.is_none());
        assert_eq!(details.data.len(), 20);

        root.as_object_mut().unwrap().remove("post");
        let details = PostDetails::decode(&context(PeriodUnit::Day), &root).unwrap();
        assert!(details.post.is_none());
    }

    #[test]
    fn test_bad_daily_rows_are_dropped() {
        let mut root = payload();
        root["data"] = json!([
            ["2024-01-01", 5],
            ["bad", 6],
            ["2024-01-03", "7"],
            ["2024-01-04", 8]
        ]);

        let details = PostDetails::decode(&context(PeriodUnit::Day), &root).unwrap();

        let counts: Vec<i64> = details.data.iter().map(|row| row.count).collect();
        assert_eq!(counts, vec![5, 8]);
        assert_eq!(details.last_two_weeks, details.data);
    }

    #[test]
    fn test_required_fields() {
        for key in ["date", "views", "years", "averages", "weeks", "data"] {
            let mut root = payload();
            root.as_object_mut().unwrap().remove(key);

            assert!(
                matches!(
                    PostDetails::decode(&context(PeriodUnit::Day), &root),
                    Err(Error::FieldNotExist(field)) if field == key
                ),
                "missing {} should fail",
                key
            );
        }

        let mut root = payload();
        root["date"] = json!("yesterday");
        assert!(PostDetails::decode(&context(PeriodUnit::Day), &root).is_err());

        let mut root = payload();
        root["fields"] = json!(["views"]);
        assert!(matches!(
            PostDetails::decode(&context(PeriodUnit::Day), &root),
            Err(Error::MissingColumn(_))
        ));
    }
}
