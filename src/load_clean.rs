use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::error::{CovidError, Result};
use crate::models::{render_head, CovidRecord};

// Load the dataset
pub fn load_data(file_path: &Path, preview_rows: usize) -> Result<Vec<CovidRecord>> {
    let records = read_records(file_path).map_err(|source| CovidError::Load {
        path: file_path.to_path_buf(),
        source,
    })?;

    info!(path = %file_path.display(), rows = records.len(), "dataset loaded");
    println!(
        "Dataset loaded successfully. First few rows:\n{}",
        render_head(&records, preview_rows)
    );
    Ok(records)
}

fn read_records(file_path: &Path) -> std::result::Result<Vec<CovidRecord>, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(file_path)?;

    let mut records: Vec<CovidRecord> = Vec::new();
    for result in rdr.deserialize() {
        let record: CovidRecord = result?;
        records.push(record);
    }
    debug!(rows = records.len(), "parsed csv records");

    Ok(records)
}
