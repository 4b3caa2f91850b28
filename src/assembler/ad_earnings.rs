use bigdecimal::BigDecimal;
use serde::Serialize;
use tracing::debug;

use crate::{
    configuration::DecodeContext,
    error::Error,
    helpers::{decode_flexible, normalize_mapping, parse_period_key, payment_status_or_default},
    model::{PaymentStatus, Period},
    types::{as_object, extract_field, extract_object, optional_field, DynamicValue},
};

use super::StatsResponse;

/// Lifetime ad earnings with one ledger line per month, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdEarnings {
    pub total_earnings: BigDecimal,
    pub total_amount_owed: BigDecimal,
    pub monthly_earnings: Vec<MonthlyEarning>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyEarning {
    pub period: Period,
    pub amount: BigDecimal,
    pub status: PaymentStatus,
    pub pageviews: Option<String>,
}

impl MonthlyEarning {
    /// Decodes the ledger line stored under `key`. A bad period key or
    /// amount drops the line; a missing status reads as outstanding.
    pub fn from_entry(key: &str, line: &DynamicValue) -> Option<MonthlyEarning> {
        let period = parse_period_key(key).ok()?;
        let line = line.as_object()?;
        let amount = decode_flexible(optional_field(line, "amount")?).ok()?;
        let status = payment_status_or_default(optional_field(line, "status"));
        let pageviews = optional_field(line, "pageviews").and_then(|value| match value {
            DynamicValue::String(text) => Some(text.to_owned()),
            DynamicValue::Number(number) => Some(number.to_string()),
            _ => None,
        });

        Some(MonthlyEarning {
            period,
            amount,
            status,
            pageviews,
        })
    }
}

impl StatsResponse for AdEarnings {
    const PATH_COMPONENT: &'static str = "wordads/earnings";

    fn decode(_context: &DecodeContext, root: &DynamicValue) -> Result<Self, Error> {
        let earnings = extract_object(as_object(root, "root")?, "earnings")?;

        let total_earnings = decode_flexible(extract_field(earnings, "total_earnings")?)?;
        let total_amount_owed =
            decode_flexible(extract_field(earnings, "total_amount_owed")?)?;

        let mut monthly_earnings: Vec<MonthlyEarning> =
            normalize_mapping(extract_field(earnings, "wordads")?, "wordads", |key, line| {
                MonthlyEarning::from_entry(key, line)
            })?
            .into_iter()
            .map(|(_, line)| line)
            .collect();
        monthly_earnings.sort_by(|a, b| b.period.cmp(&a.period));
        debug!("Decoded {} ledger lines", monthly_earnings.len());

        Ok(AdEarnings {
            total_earnings,
            total_amount_owed,
            monthly_earnings,
        })
    }
}
