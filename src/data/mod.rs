//! Data module - CSV loading and cleaning

mod cleaner;
mod loader;

pub use cleaner::{CleanReport, DataCleaner};
pub use loader::DataLoader;

/// Column names of the viewership CSV schema.
pub const COL_TITLE: &str = "Title";
pub const COL_HOURS: &str = "Hours_Viewed";
pub const COL_CONTENT_TYPE: &str = "Content_Type";
pub const COL_LANGUAGE: &str = "Language_Indicator";
pub const COL_RELEASE_DATE: &str = "Release_Date";

/// Columns the pipeline cannot run without.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_TITLE,
    COL_HOURS,
    COL_CONTENT_TYPE,
    COL_LANGUAGE,
    COL_RELEASE_DATE,
];
