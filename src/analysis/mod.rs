//! Analysis module - calendar derivation, aggregation and growth rates

mod aggregate;
mod calendar;
mod growth;

pub use aggregate::{format_hours_label, group_sum, year_series, AggRow, AggregateError, YearPoint};
pub use calendar::{
    day_display, month_display, season_for_month, with_calendar_columns, CalendarError,
    COL_DAY_OF_WEEK, COL_MONTH, COL_SEASON, COL_YEAR,
};
pub use growth::{GrowthRow, GrowthTable};
