//! Command-line interface argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// viewlens - content viewership CSV analysis & chart generator
///
/// Loads a viewership CSV (Title, Hours_Viewed, Content_Type,
/// Language_Indicator, Release_Date), cleans it, computes category,
/// calendar and growth-rate aggregations, and writes the corresponding
/// charts plus a JSON summary to the output directory.
///
/// Examples:
///   viewlens data/viewership_2023.csv
///   viewlens data/viewership_2023.csv --output charts --width 1280
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the viewership CSV file
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Directory where charts and the run summary are written
    ///
    /// Created on startup if it does not exist.
    #[arg(short, long, default_value = "results", value_name = "DIR")]
    pub output: PathBuf,

    /// Chart width in pixels
    #[arg(long, default_value = "1000", value_name = "PX")]
    pub width: u32,

    /// Chart height in pixels
    #[arg(long, default_value = "600", value_name = "PX")]
    pub height: u32,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["viewlens", "data.csv"]);
        assert_eq!(args.input, PathBuf::from("data.csv"));
        assert_eq!(args.output, PathBuf::from("results"));
        assert_eq!((args.width, args.height), (1000, 600));
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn overrides() {
        let args = Args::parse_from([
            "viewlens", "data.csv", "-o", "out", "--width", "1280", "-vv",
        ]);
        assert_eq!(args.output, PathBuf::from("out"));
        assert_eq!(args.width, 1280);
        assert_eq!(args.verbose, 2);
    }
}
