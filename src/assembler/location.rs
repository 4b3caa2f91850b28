//! Views by city or by region. Both endpoints share one payload layout and
//! differ only in their path and in the key holding the place name.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    configuration::DecodeContext,
    error::Error,
    model::{BreakdownExtra, BreakdownItem, Coordinates},
    types::{
        as_object, extract_field, extract_object, optional_field, optional_int, optional_str,
        DynamicObject, DynamicValue, PeriodUnit,
    },
};

use super::StatsResponse;

pub trait LocationKind {
    const PATH_COMPONENT: &'static str;
    /// Key of the place name inside each item.
    const NAME_KEY: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City;

impl LocationKind for City {
    const PATH_COMPONENT: &'static str = "stats/location-views/city";
    const NAME_KEY: &'static str = "location";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region;

impl LocationKind for Region {
    const PATH_COMPONENT: &'static str = "stats/location-views/region";
    const NAME_KEY: &'static str = "region";
}

/// Items carry the country code as `secondary_key` and, when both halves
/// were reported, their coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationViews<K> {
    pub period: PeriodUnit,
    pub period_end_date: DateTime<Utc>,
    pub total_views: i64,
    pub other_views: i64,
    pub items: Vec<BreakdownItem>,
    #[serde(skip)]
    _phantomdata: PhantomData<K>,
}

impl<K: LocationKind> StatsResponse for LocationViews<K> {
    const PATH_COMPONENT: &'static str = K::PATH_COMPONENT;

    fn decode(context: &DecodeContext, root: &DynamicValue) -> Result<Self, Error> {
        let summary = extract_object(as_object(root, "root")?, "summary")?;
        let views = extract_field(summary, "views")?;

        let items = match views {
            DynamicValue::Array(items) => decode_items::<K, _>(items.iter()),
            DynamicValue::Object(items) => decode_items::<K, _>(items.values()),
            _ => {
                return Err(Error::UnexpectedType {
                    field: "views".to_owned(),
                    expected: "array",
                })
            },
        };

        Ok(LocationViews {
            period: context.unit,
            period_end_date: context.period_end_date,
            total_views: optional_int(summary, "total_views").unwrap_or(0),
            other_views: optional_int(summary, "other_views").unwrap_or(0),
            items,
            _phantomdata: PhantomData,
        })
    }
}

fn decode_items<'a, K, I>(items: I) -> Vec<BreakdownItem>
where
    K: LocationKind,
    I: Iterator<Item = &'a DynamicValue>,
{
    items
        .filter_map(|item| location_item::<K>(item.as_object()?))
        .collect()
}

fn location_item<K: LocationKind>(item: &DynamicObject) -> Option<BreakdownItem> {
    let name = optional_str(item, K::NAME_KEY)?;
    let count = optional_int(item, "views")?;
    let country_code = optional_str(item, "country_code")?;

    Some(BreakdownItem {
        label: name.to_owned(),
        secondary_key: Some(country_code.to_owned()),
        count,
        extra: optional_field(item, "coordinates")
            .and_then(DynamicValue::as_object)
            .and_then(coordinates)
            .map(BreakdownExtra::Coordinates),
    })
}

/// Both halves or nothing. Numeric halves are kept as their JSON text.
fn coordinates(value: &DynamicObject) -> Option<Coordinates> {
    let text = |key: &str| match optional_field(value, key)? {
        DynamicValue::String(text) => Some(text.to_owned()),
        DynamicValue::Number(number) => Some(number.to_string()),
        _ => None,
    };

    Some(Coordinates {
        latitude: text("latitude")?,
        longitude: text("longitude")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::test_support::{anchor, context};
    use serde_json::json;

    #[test]
    fn test_decode_cities() {
        let response = LocationViews::<City>::decode(
            &context(PeriodUnit::Week),
            &json!({
                "summary": {
                    "total_views": 120,
                    "views": [
                        {
                            "location": "Lisbon",
                            "views": 70,
                            "country_code": "PT",
                            "coordinates": { "latitude": "38.72", "longitude": "-9.14" }
                        },
                        {
                            "location": "Porto",
                            "views": 30,
                            "country_code": "PT",
                            "coordinates": { "latitude": "41.15" }
                        },
                        { "location": "Nowhere", "views": 5 },
                        {
                            "location": "Oslo",
                            "views": 20,
                            "country_code": "NO",
                            "coordinates": { "latitude": 59.91, "longitude": 10.75 }
                        }
                    ]
                }
            }),
        )
        .unwrap();

        assert_eq!(response.period, PeriodUnit::Week);
        assert_eq!(response.period_end_date, anchor());
        assert_eq!(response.total_views, 120);
        assert_eq!(response.other_views, 0);

        let labels: Vec<&str> = response.items.iter().map(|item| item.label.as_str()).collect();
        assert_eq!(labels, vec!["Lisbon", "Porto", "Oslo"]);

        let lisbon = &response.items[0];
        assert_eq!(lisbon.secondary_key.as_deref(), Some("PT"));
        assert_eq!(lisbon.count, 70);
        assert_eq!(
            lisbon.coordinates(),
            Some(&Coordinates {
                latitude: "38.72".to_owned(),
                longitude: "-9.14".to_owned()
            })
        );
        assert_eq!(response.items[1].coordinates(), None);
        assert_eq!(
            response.items[2].coordinates().map(|c| c.longitude.as_str()),
            Some("10.75")
        );
    }

    #[test]
    fn test_decode_regions_from_object() {
        let response = LocationViews::<Region>::decode(
            &context(PeriodUnit::Day),
            &json!({
                "summary": {
                    "other_views": 4,
                    "views": {
                        "0": { "region": "Ontario", "views": 9, "country_code": "CA" },
                        "1": { "location": "Lisbon", "views": 2, "country_code": "PT" }
                    }
                }
            }),
        )
        .unwrap();

        assert_eq!(response.other_views, 4);
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].label, "Ontario");
        assert_eq!(LocationViews::<Region>::PATH_COMPONENT, "stats/location-views/region");
    }

    #[test]
    fn test_missing_summary_is_structural() {
        let context = context(PeriodUnit::Day);

        assert!(matches!(
            LocationViews::<City>::decode(&context, &json!({ "views": [] })),
            Err(Error::FieldNotExist(_))
        ));
        assert!(matches!(
            LocationViews::<City>::decode(&context, &json!({ "summary": {} })),
            Err(Error::FieldNotExist(_))
        ));
        assert!(matches!(
            LocationViews::<City>::decode(&context, &json!({ "summary": { "views": 3 } })),
            Err(Error::UnexpectedType { .. })
        ));
    }
}
