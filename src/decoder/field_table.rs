//! The `{"fields": [...], "data": [[...], ...]}` tabular wire format.
//!
//! Column names are resolved to indices once per response. The period
//! column is mandatory; every other column is optional, and a metric whose
//! column is missing is absent from every decoded row.

use std::collections::{BTreeMap, HashMap};

use chrono::FixedOffset;
use tracing::debug;

use crate::{
    error::Error,
    model::{MetricValue, TimeSeriesPoint},
    types::{
        as_object, extract_array, float_value, int_value, DatePattern, DynamicObject, DynamicValue,
    },
};

pub const PERIOD_COLUMN: &str = "period";

const FIELDS_KEY: &str = "fields";
const DATA_KEY: &str = "data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Counts. Only integral JSON numbers are accepted.
    Integer,
    /// Ratios and currency. Integers are widened.
    Float,
}

/// A metric that may appear as a named column of a field-indexed table.
pub trait TableMetric: Copy + Ord + 'static {
    const ALL: &'static [Self];

    fn column_name(&self) -> &'static str;

    fn column_kind(&self) -> ColumnKind;
}

#[derive(Debug, Clone)]
pub struct FieldIndexedTable<M> {
    period_index: usize,
    columns: Vec<(M, usize)>,
}

impl<M: TableMetric> FieldIndexedTable<M> {
    pub fn new<S: AsRef<str>>(fields: &[S]) -> Result<Self, Error> {
        let mut lookup: HashMap<&str, usize> = HashMap::new();
        for (index, field) in fields.iter().enumerate() {
            lookup.entry(field.as_ref()).or_insert(index);
        }

        let period_index = *lookup
            .get(PERIOD_COLUMN)
            .ok_or_else(|| Error::MissingColumn(PERIOD_COLUMN.to_owned()))?;

        let columns = M::ALL
            .iter()
            .filter_map(|metric| {
                lookup
                    .get(metric.column_name())
                    .map(|index| (*metric, *index))
            })
            .collect();

        Ok(Self {
            period_index,
            columns,
        })
    }

    /// Reads the `fields` list out of a response object. A list holding
    /// anything but strings is a structural failure.
    pub fn from_object(object: &DynamicObject) -> Result<Self, Error> {
        let fields = string_list(extract_array(object, FIELDS_KEY)?)?;
        Self::new(fields.as_slice())
    }

    pub fn is_reported(&self, metric: M) -> bool {
        self.columns.iter().any(|(column, _)| *column == metric)
    }

    /// Rows whose date is missing or unparseable are dropped; the rest keep
    /// their source order.
    pub fn decode_rows(
        &self,
        rows: &[DynamicValue],
        pattern: DatePattern,
        time_zone: FixedOffset,
    ) -> Vec<TimeSeriesPoint<M>> {
        rows.iter()
            .enumerate()
            .filter_map(|(index, row)| {
                let point = self.decode_row(row, pattern, time_zone);
                if point.is_none() {
                    debug!("Dropping table row {}: {}", index, row);
                }
                point
            })
            .collect()
    }

    fn decode_row(
        &self,
        row: &DynamicValue,
        pattern: DatePattern,
        time_zone: FixedOffset,
    ) -> Option<TimeSeriesPoint<M>> {
        let cells = row.as_array()?;
        let date = cells
            .get(self.period_index)
            .and_then(DynamicValue::as_str)
            .and_then(|value| pattern.parse(value, time_zone))?;

        let values: BTreeMap<M, MetricValue> = self
            .columns
            .iter()
            .filter_map(|(metric, index)| {
                let cell = cells.get(*index)?;
                let value = match metric.column_kind() {
                    ColumnKind::Integer => MetricValue::Integer(int_value(cell)?),
                    ColumnKind::Float => MetricValue::Float(float_value(cell)?),
                };
                Some((*metric, value))
            })
            .collect();

        Some(TimeSeriesPoint { date, values })
    }
}

/// Decodes a whole tabular response. Fails only when the `fields`/`data`
/// pair or the period column cannot be found.
pub fn decode_table<M: TableMetric>(
    root: &DynamicValue,
    pattern: DatePattern,
    time_zone: FixedOffset,
) -> Result<Vec<TimeSeriesPoint<M>>, Error> {
    let object = as_object(root, "root")?;
    let table = FieldIndexedTable::<M>::from_object(object)?;
    let rows = extract_array(object, DATA_KEY)?;

    Ok(table.decode_rows(rows, pattern, time_zone))
}

fn string_list(values: &[DynamicValue]) -> Result<Vec<&str>, Error> {
    values
        .iter()
        .map(|value| {
            value.as_str().ok_or_else(|| Error::UnexpectedType {
                field: FIELDS_KEY.to_owned(),
                expected: "array of strings",
            })
        })
        .collect()
}
