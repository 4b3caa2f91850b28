use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    configuration::DecodeContext,
    error::Error,
    helpers::{join_label, normalize_mapping, parse_dimension_key},
    model::{BreakdownExtra, BreakdownItem, CompositeMetric},
    types::{as_object, extract_field, optional_field, optional_int, optional_str, DynamicValue},
};

use super::StatsResponse;

const TOP_VALUES_KEY: &str = "top_utm_values";
const TOP_POSTS_KEY: &str = "top_posts";

/// Views per UTM combination, most viewed first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UtmMetrics {
    pub metrics: Vec<CompositeMetric>,
}

impl StatsResponse for UtmMetrics {
    const PATH_COMPONENT: &'static str = "stats/utm";

    fn decode(context: &DecodeContext, root: &DynamicValue) -> Result<Self, Error> {
        let object = as_object(root, "root")?;

        let top_values = normalize_mapping(
            extract_field(object, TOP_VALUES_KEY)?,
            TOP_VALUES_KEY,
            |_, count| count.as_i64(),
        )?;
        let mut top_posts = decode_top_posts(optional_field(object, TOP_POSTS_KEY));

        let mut metrics: Vec<CompositeMetric> = top_values
            .into_iter()
            .filter_map(|(key, count)| {
                let dimension_values = parse_dimension_key(&key);
                if dimension_values.is_empty() {
                    debug!("Skipping unlabeled UTM key {}", key);
                    return None;
                }

                Some(CompositeMetric {
                    label: join_label(&dimension_values, &context.config.label_separator),
                    dimension_values,
                    count,
                    related_items: top_posts.remove(&key).unwrap_or_default(),
                })
            })
            .collect();

        // stable: equal counts keep wire order
        metrics.sort_by(|a, b| b.count.cmp(&a.count));

        Ok(UtmMetrics { metrics })
    }
}

/// Top posts are optional per key and as a whole. A malformed list yields
/// no posts at all rather than failing the response.
fn decode_top_posts(value: Option<&DynamicValue>) -> HashMap<String, Vec<BreakdownItem>> {
    let Some(value) = value else {
        return HashMap::new();
    };

    match normalize_mapping(value, TOP_POSTS_KEY, |_, posts| {
        posts.as_array().map(|posts| posts.iter().filter_map(decode_post).collect())
    }) {
        Ok(entries) => entries.into_iter().collect(),
        Err(error) => {
            warn!("Ignoring {}: {}", TOP_POSTS_KEY, error);
            HashMap::new()
        },
    }
}

fn decode_post(post: &DynamicValue) -> Option<BreakdownItem> {
    let post = post.as_object()?;
    let post_id = optional_int(post, "id")?;
    let title = optional_str(post, "title")?;
    let views = optional_int(post, "views")?;
    let href = optional_str(post, "href")?;

    Some(BreakdownItem {
        extra: Some(BreakdownExtra::Post {
            post_id,
            url: href.to_owned(),
        }),
        ..BreakdownItem::new(title.to_owned(), views)
    })
}
