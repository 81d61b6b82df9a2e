use std::path::Path;

use tracing::info;

use crate::charts::{bar_chart, line_chart, mean_by_location, series_by_location, ChartSpec};
use crate::eda_statistics::{describe, format_summary};
use crate::error::Result;
use crate::models::{Observation, RateRow};

pub const CASES_CHART: &str = "total_cases.png";
pub const DEATHS_CHART: &str = "total_deaths.png";
pub const DEATH_RATE_CHART: &str = "death_rate.png";

/// Deaths per case of every row. Rows with zero cases have no defined rate.
pub fn death_rates(observations: &[Observation]) -> Vec<RateRow> {
    observations
        .iter()
        .map(|o| RateRow {
            location: o.location.clone(),
            date: o.date,
            rate: (o.total_cases != 0.0).then(|| o.total_deaths / o.total_cases),
        })
        .collect()
}

// Exploratory Data Analysis (EDA)
pub fn analyze_data(observations: &[Observation], output_dir: &Path) -> Result<()> {
    // Step 1: Basic statistics
    println!("Basic statistics of the dataset:");
    println!("{}", format_summary(&describe(observations)));

    // Step 2: Total cases and deaths over time
    line_chart(
        &output_dir.join(CASES_CHART),
        ChartSpec {
            title: "Total COVID-19 Cases Over Time",
            x_desc: "Date",
            y_desc: "Total Cases",
        },
        &series_by_location(observations, |o| o.total_cases),
    )?;

    line_chart(
        &output_dir.join(DEATHS_CHART),
        ChartSpec {
            title: "Total COVID-19 Deaths Over Time",
            x_desc: "Date",
            y_desc: "Total Deaths",
        },
        &series_by_location(observations, |o| o.total_deaths),
    )?;

    // Step 3: Death rate per country
    let rates = death_rates(observations);
    let undefined = rates.iter().filter(|r| r.rate.is_none()).count();
    if undefined > 0 {
        info!(undefined, "rows without cases excluded from death rate");
    }

    bar_chart(
        &output_dir.join(DEATH_RATE_CHART),
        ChartSpec {
            title: "COVID-19 Death Rate by Country",
            x_desc: "Country",
            y_desc: "Death Rate",
        },
        &mean_by_location(&rates),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(location: &str, cases: f64, deaths: f64) -> Observation {
        Observation {
            location: location.to_string(),
            date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            total_cases: cases,
            total_deaths: deaths,
            total_vaccinations: 0.0,
            population: Some(100.0),
            iso_code: None,
        }
    }

    #[test]
    fn test_death_rate_is_deaths_over_cases() {
        let rates = death_rates(&[obs("USA", 200.0, 5.0)]);
        assert_eq!(rates[0].rate, Some(0.025));
        assert_eq!(rates[0].location, "USA");
    }

    #[test]
    fn test_death_rate_undefined_without_cases() {
        let rates = death_rates(&[obs("Kenya", 0.0, 0.0), obs("India", 0.0, 3.0)]);
        assert_eq!(rates[0].rate, None);
        assert_eq!(rates[1].rate, None);
    }

    #[test]
    fn test_death_rate_leaves_observations_untouched() {
        let rows = vec![obs("India", 10.0, 1.0)];
        let before = rows.clone();
        let _ = death_rates(&rows);
        assert_eq!(rows, before);
    }
}
