//! One decoder per response family.
//!
//! Every family implements [`StatsResponse`]: it names its endpoint, builds
//! its query parameters, and turns a parsed document into its record. A
//! structural failure is logged here and returned to the caller, which owns
//! what the user sees.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::warn;

use crate::{
    configuration::DecodeContext,
    error::Error,
    types::{parse_document, DynamicValue, PeriodUnit},
};

pub use self::{
    ad_earnings::{AdEarnings, MonthlyEarning},
    ad_revenue::{AdMetric, AdRevenue},
    archive::{ArchiveBreakdown, ArchiveSection},
    location::{City, LocationKind, LocationViews, Region},
    post_details::{PostDetails, PostMetadata},
    site_metrics::{SiteMetric, SiteMetrics},
    utm_metrics::UtmMetrics,
};

mod ad_earnings;
mod ad_revenue;
mod archive;
mod location;
mod post_details;
mod site_metrics;
mod utm_metrics;

pub trait StatsResponse: Sized {
    /// Path of the endpoint, relative to the site's API root.
    const PATH_COMPONENT: &'static str;

    fn query_properties(
        _date: NaiveDate,
        unit: PeriodUnit,
        max_count: usize,
    ) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("unit", String::from(unit)),
            ("quantity", max_count.to_string()),
        ])
    }

    fn decode(context: &DecodeContext, root: &DynamicValue) -> Result<Self, Error>;

    fn from_slice(context: &DecodeContext, bytes: &[u8]) -> Result<Self, Error> {
        let root = parse_document(bytes).inspect_err(|error| {
            warn!("Unparseable {} response: {}", Self::PATH_COMPONENT, error);
        })?;
        decode_response(context, &root)
    }
}

/// Decodes `root`, logging a structural failure before handing it back.
pub fn decode_response<R: StatsResponse>(
    context: &DecodeContext,
    root: &DynamicValue,
) -> Result<R, Error> {
    R::decode(context, root).inspect_err(|error| {
        warn!(
            "Structural failure decoding {} ({}): {}",
            R::PATH_COMPONENT,
            context.unit,
            error
        );
    })
}
