pub use self::{
    field_table::{decode_table, ColumnKind, FieldIndexedTable, TableMetric, PERIOD_COLUMN},
    hierarchical::{
        aggregate_yearly_breakdown, decode_change_ratio, decode_weekly_breakdowns,
        YearlyBreakdownKeys,
    },
};

mod field_table;
mod hierarchical;
