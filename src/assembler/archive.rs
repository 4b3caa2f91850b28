use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::{
    configuration::DecodeContext,
    error::Error,
    model::{BreakdownExtra, BreakdownItem},
    types::{as_object, extract_object, optional_int, optional_str, DynamicValue, PeriodUnit},
};

use super::StatsResponse;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveBreakdown {
    pub period: PeriodUnit,
    pub period_end_date: DateTime<Utc>,
    /// One section per summary key, in wire order. Empty sections are kept.
    pub sections: Vec<ArchiveSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveSection {
    pub name: String,
    pub items: Vec<BreakdownItem>,
    /// Saturates at `i64::MAX`.
    pub total_count: i64,
}

impl ArchiveSection {
    fn new(name: &str, items: Vec<BreakdownItem>) -> ArchiveSection {
        ArchiveSection {
            name: name.to_owned(),
            total_count: items
                .iter()
                .fold(0i64, |total, item| total.saturating_add(item.count)),
            items,
        }
    }
}

impl StatsResponse for ArchiveBreakdown {
    const PATH_COMPONENT: &'static str = "stats/archives";

    fn decode(context: &DecodeContext, root: &DynamicValue) -> Result<Self, Error> {
        let summary = extract_object(as_object(root, "root")?, "summary")?;

        let sections = summary
            .iter()
            .filter_map(|(name, items)| {
                let Some(items) = items.as_array() else {
                    debug!("Skipping archive section {}: not a list", name);
                    return None;
                };
                Some(ArchiveSection::new(
                    name,
                    items.iter().filter_map(archive_item).collect(),
                ))
            })
            .collect();

        Ok(ArchiveBreakdown {
            period: context.unit,
            period_end_date: context.period_end_date,
            sections,
        })
    }
}

fn archive_item(item: &DynamicValue) -> Option<BreakdownItem> {
    let item = item.as_object()?;
    let href = optional_str(item, "href")?;
    let value = optional_str(item, "value")?;
    let views = optional_int(item, "views")?;

    Some(BreakdownItem {
        extra: Some(BreakdownExtra::Link {
            href: href.to_owned(),
        }),
        ..BreakdownItem::new(value.to_owned(), views)
    })
}
