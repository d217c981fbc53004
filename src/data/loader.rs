//! CSV Data Loader Module
//! Handles CSV file loading and schema validation using Polars.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

use super::REQUIRED_COLUMNS;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("No data loaded")]
    NoData,
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load the viewership CSV and validate that the expected columns exist.
    ///
    /// A missing or malformed file is fatal; there is no recovery path.
    pub fn load(file_path: &Path) -> Result<DataFrame, LoaderError> {
        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        if df.height() == 0 {
            return Err(LoaderError::NoData);
        }

        Self::validate_schema(&df)?;
        Ok(df)
    }

    /// Check that every column the pipeline reads is present.
    fn validate_schema(df: &DataFrame) -> Result<(), LoaderError> {
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        for required in REQUIRED_COLUMNS {
            if !columns.iter().any(|c| c == required) {
                return Err(LoaderError::MissingColumn(required.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_reports_missing_file() {
        let result = DataLoader::load(Path::new("does/not/exist.csv"));
        assert!(matches!(result, Err(LoaderError::CsvError(_))));
    }

    #[test]
    fn load_rejects_missing_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Title,Hours_Viewed").unwrap();
        writeln!(file, "A,100").unwrap();

        let result = DataLoader::load(&path);
        assert!(matches!(result, Err(LoaderError::MissingColumn(_))));
    }

    #[test]
    fn load_accepts_full_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("full.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "Title,Hours_Viewed,Content_Type,Language_Indicator,Release_Date"
        )
        .unwrap();
        writeln!(file, "A,\"2,500\",Movie,English,01-01-2020").unwrap();
        writeln!(file, "B,500,Show,Korean,05-06-2021").unwrap();

        let df = DataLoader::load(&path).unwrap();
        assert_eq!(df.height(), 2);
    }
}
