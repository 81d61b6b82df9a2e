use std::path::Path;

use crate::charts::{bar_chart, line_chart, mean_by_location, series_by_location, ChartSpec};
use crate::error::{CovidError, Result};
use crate::models::{Observation, RateRow};

pub const VACCINATIONS_CHART: &str = "total_vaccinations.png";
pub const VACCINATION_RATE_CHART: &str = "vaccination_rate.png";

/// Vaccinations per hundred people of every row.
///
/// A row with a missing or zero population has no meaningful rate and fails
/// the whole projection.
pub fn vaccination_rates(observations: &[Observation]) -> Result<Vec<RateRow>> {
    observations
        .iter()
        .map(|o| match o.population {
            Some(population) if population != 0.0 => Ok(RateRow {
                location: o.location.clone(),
                date: o.date,
                rate: Some(o.total_vaccinations / population * 100.0),
            }),
            _ => Err(CovidError::UndefinedPopulation {
                location: o.location.clone(),
                date: o.date,
            }),
        })
        .collect()
}

// Visualizing vaccination progress
pub fn visualize_vaccinations(observations: &[Observation], output_dir: &Path) -> Result<()> {
    line_chart(
        &output_dir.join(VACCINATIONS_CHART),
        ChartSpec {
            title: "Cumulative Vaccinations Over Time",
            x_desc: "Date",
            y_desc: "Total Vaccinations",
        },
        &series_by_location(observations, |o| o.total_vaccinations),
    )?;

    let rates = vaccination_rates(observations)?;
    bar_chart(
        &output_dir.join(VACCINATION_RATE_CHART),
        ChartSpec {
            title: "Vaccination Rate by Country",
            x_desc: "Country",
            y_desc: "Vaccination Rate (%)",
        },
        &mean_by_location(&rates),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(vaccinations: f64, population: Option<f64>) -> Observation {
        Observation {
            location: "India".to_string(),
            date: NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
            total_cases: 0.0,
            total_deaths: 0.0,
            total_vaccinations: vaccinations,
            population,
            iso_code: Some("IND".to_string()),
        }
    }

    #[test]
    fn test_rate_is_percentage_of_population() {
        let rates = vaccination_rates(&[obs(50.0, Some(200.0)), obs(0.0, Some(10.0))]).unwrap();
        assert_eq!(rates[0].rate, Some(25.0));
        assert_eq!(rates[1].rate, Some(0.0));
    }

    #[test]
    fn test_zero_population_raises() {
        let err = vaccination_rates(&[obs(50.0, Some(200.0)), obs(1.0, Some(0.0))]).unwrap_err();
        match err {
            CovidError::UndefinedPopulation { location, date } => {
                assert_eq!(location, "India");
                assert_eq!(date, NaiveDate::from_ymd_opt(2021, 6, 1).unwrap());
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_missing_population_raises() {
        assert!(matches!(
            vaccination_rates(&[obs(1.0, None)]),
            Err(CovidError::UndefinedPopulation { .. })
        ));
    }
}
