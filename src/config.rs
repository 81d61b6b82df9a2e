//! Inputs of one analysis run.

use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "owid-covid-data.csv";
pub const DEFAULT_COUNTRIES: [&str; 3] = ["Kenya", "USA", "India"];
pub const DEFAULT_OUTPUT_DIR: &str = "charts";

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// CSV file with one row per (location, date)
    pub input_path: PathBuf,
    /// Locations kept by the cleaner, matched exactly
    pub countries: Vec<String>,
    /// Directory the chart images are written to
    pub output_dir: PathBuf,
    /// Rows shown in table previews
    pub preview_rows: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            countries: DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            preview_rows: 5,
        }
    }
}
