//! Calendar Derivation Module
//! Parses Release_Date and appends Year/Month/Season/Day_of_Week columns.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use thiserror::Error;

use crate::data::COL_RELEASE_DATE;

pub const COL_YEAR: &str = "Year";
pub const COL_MONTH: &str = "Month";
pub const COL_SEASON: &str = "Season";
pub const COL_DAY_OF_WEEK: &str = "Day_of_Week";

/// Release dates are day-month-year, e.g. "25-12-2023".
const DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Unparseable release date '{0}' (expected DD-MM-YYYY)")]
    BadDate(String),
}

/// Map a calendar month (1-12) to its season.
pub fn season_for_month(month: u32) -> &'static str {
    match month {
        12 | 1 | 2 => "Winter",
        3..=5 => "Spring",
        6..=8 => "Summer",
        _ => "Fall",
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}

fn day_name(day: u32) -> &'static str {
    match day {
        0 => "Monday",
        1 => "Tuesday",
        2 => "Wednesday",
        3 => "Thursday",
        4 => "Friday",
        5 => "Saturday",
        _ => "Sunday",
    }
}

/// Turn an aggregated Month key ("1".."12") into its English month name.
pub fn month_display(key: &str) -> String {
    match key.parse::<u32>() {
        Ok(m @ 1..=12) => month_name(m).to_string(),
        _ => key.to_string(),
    }
}

/// Turn an aggregated Day_of_Week key ("0".."6", 0 = Monday) into a day name.
pub fn day_display(key: &str) -> String {
    match key.parse::<u32>() {
        Ok(d @ 0..=6) => day_name(d).to_string(),
        _ => key.to_string(),
    }
}

/// Append Year, Month, Season and Day_of_Week columns derived from
/// Release_Date. An unparseable date fails the run.
pub fn with_calendar_columns(df: &DataFrame) -> Result<DataFrame, CalendarError> {
    let dates = df.column(COL_RELEASE_DATE)?.str()?;

    let mut years: Vec<i32> = Vec::with_capacity(df.height());
    let mut months: Vec<i32> = Vec::with_capacity(df.height());
    let mut seasons: Vec<&str> = Vec::with_capacity(df.height());
    let mut weekdays: Vec<i32> = Vec::with_capacity(df.height());

    for raw in dates.into_iter() {
        let raw = raw.ok_or_else(|| CalendarError::BadDate("<null>".to_string()))?;
        let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|_| CalendarError::BadDate(raw.to_string()))?;

        years.push(date.year());
        months.push(date.month() as i32);
        seasons.push(season_for_month(date.month()));
        weekdays.push(date.weekday().num_days_from_monday() as i32);
    }

    let mut out = df.clone();
    out.with_column(Column::new(COL_YEAR.into(), years))?;
    out.with_column(Column::new(COL_MONTH.into(), months))?;
    out.with_column(Column::new(COL_SEASON.into(), seasons))?;
    out.with_column(Column::new(COL_DAY_OF_WEEK.into(), weekdays))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn season_assignment() {
        assert_eq!(season_for_month(1), "Winter");
        assert_eq!(season_for_month(4), "Spring");
        assert_eq!(season_for_month(7), "Summer");
        assert_eq!(season_for_month(10), "Fall");
        assert_eq!(season_for_month(12), "Winter");
    }

    #[test]
    fn display_mappings() {
        assert_eq!(month_display("1"), "January");
        assert_eq!(month_display("12"), "December");
        assert_eq!(day_display("0"), "Monday");
        assert_eq!(day_display("6"), "Sunday");
    }

    #[test]
    fn derives_calendar_columns() {
        let df = df!(
            COL_RELEASE_DATE => ["01-01-2020", "05-06-2021"],
        )
        .unwrap();
        let out = with_calendar_columns(&df).unwrap();

        let years = out.column(COL_YEAR).unwrap().i32().unwrap();
        assert_eq!(years.get(0), Some(2020));
        assert_eq!(years.get(1), Some(2021));

        // 2020-01-01 was a Wednesday, 2021-06-05 a Saturday
        let weekdays = out.column(COL_DAY_OF_WEEK).unwrap().i32().unwrap();
        assert_eq!(weekdays.get(0), Some(2));
        assert_eq!(weekdays.get(1), Some(5));

        let seasons = out.column(COL_SEASON).unwrap().str().unwrap();
        assert_eq!(seasons.get(0), Some("Winter"));
        assert_eq!(seasons.get(1), Some("Summer"));
    }

    #[test]
    fn bad_date_is_fatal() {
        let df = df!(
            COL_RELEASE_DATE => ["2020/01/01"],
        )
        .unwrap();
        let err = with_calendar_columns(&df).unwrap_err();
        assert!(matches!(err, CalendarError::BadDate(_)));
    }
}
