use std::fs;

use tracing::{error, info, info_span};

use crate::clean::clean_and_preview;
use crate::config::AnalysisConfig;
use crate::eda::analyze_data;
use crate::error::Result;
use crate::load_clean::load_data;
use crate::map::choropleth_map;
use crate::vaccination::visualize_vaccinations;

/// Load, clean, analyze and plot, stopping at the first failing stage.
pub fn run(config: &AnalysisConfig) -> Result<()> {
    let _span = info_span!("pipeline", input = %config.input_path.display()).entered();

    let records = match load_data(&config.input_path, config.preview_rows) {
        Ok(records) => records,
        Err(e) => {
            println!("Error loading dataset: {e}");
            error!(error = %e, "load failed, pipeline stopped");
            return Err(e);
        }
    };

    let observations = clean_and_preview(&records, &config.countries, config.preview_rows)?;

    fs::create_dir_all(&config.output_dir)?;
    analyze_data(&observations, &config.output_dir)?;
    visualize_vaccinations(&observations, &config.output_dir)?;
    choropleth_map(&observations, &config.output_dir)?;

    info!(output_dir = %config.output_dir.display(), "all charts written");
    Ok(())
}
