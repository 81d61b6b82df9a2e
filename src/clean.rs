use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{CovidError, Result};
use crate::models::{render_head, CovidRecord, Observation};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Keep the rows of `countries`, parse their dates and fill missing running
/// totals with zero.
pub fn clean_data(records: &[CovidRecord], countries: &[String]) -> Result<Vec<Observation>> {
    // Step 1: Filter countries of interest
    let kept: Vec<&CovidRecord> = records
        .iter()
        .filter(|r| countries.iter().any(|c| c == &r.location))
        .collect();

    if kept.is_empty() && !records.is_empty() {
        warn!(?countries, "no rows matched the country list");
    }

    // Step 2: Parse dates and handle missing numeric values
    let mut cleaned = Vec::with_capacity(kept.len());
    for record in kept {
        cleaned.push(Observation {
            location: record.location.clone(),
            date: parse_date(&record.location, &record.date)?,
            total_cases: fill_missing(record.total_cases),
            total_deaths: fill_missing(record.total_deaths),
            total_vaccinations: fill_missing(record.total_vaccinations),
            population: record.population,
            iso_code: record.iso_code.clone(),
        });
    }

    info!(input = records.len(), kept = cleaned.len(), "cleaned dataset");
    Ok(cleaned)
}

/// Same as [`clean_data`], then prints the head of the result.
pub fn clean_and_preview(
    records: &[CovidRecord],
    countries: &[String],
    preview_rows: usize,
) -> Result<Vec<Observation>> {
    let cleaned = clean_data(records, countries)?;
    println!("Data after cleaning:\n{}", render_head(&cleaned, preview_rows));
    Ok(cleaned)
}

// NaN and infinities count as missing
fn fill_missing(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn parse_date(location: &str, value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| CovidError::InvalidDate {
            location: location.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_COUNTRIES;

    fn countries() -> Vec<String> {
        DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect()
    }

    fn record(location: &str, date: &str, cases: Option<f64>, vacc: Option<f64>) -> CovidRecord {
        CovidRecord {
            location: location.to_string(),
            date: date.to_string(),
            total_cases: cases,
            total_deaths: None,
            total_vaccinations: vacc,
            population: Some(50.0),
            iso_code: None,
        }
    }

    fn sample() -> Vec<CovidRecord> {
        vec![
            record("Kenya", "2021-01-01", Some(10.0), None),
            record("France", "2021-01-01", Some(99.0), Some(1.0)),
            record("USA", "2021-01-01", None, Some(7.0)),
            record("World", "2021-01-02", Some(1e6), None),
            record("India", "2021-01-02", Some(3.0), Some(2.0)),
        ]
    }

    #[test]
    fn test_only_allowed_locations_remain() {
        let cleaned = clean_data(&sample(), &countries()).unwrap();
        let locations: Vec<&str> = cleaned.iter().map(|o| o.location.as_str()).collect();
        assert_eq!(locations, vec!["Kenya", "USA", "India"]);
    }

    #[test]
    fn test_missing_totals_become_zero() {
        let cleaned = clean_data(&sample(), &countries()).unwrap();
        assert_eq!(cleaned[0].total_vaccinations, 0.0);
        assert_eq!(cleaned[0].total_deaths, 0.0);
        assert_eq!(cleaned[1].total_cases, 0.0);
        assert_eq!(cleaned[1].total_vaccinations, 7.0);
        assert!(cleaned
            .iter()
            .all(|o| o.total_cases >= 0.0 && o.total_deaths >= 0.0 && o.total_vaccinations >= 0.0));
    }

    #[test]
    fn test_nan_and_infinite_cells_are_filled() {
        let body = "location,date,total_cases,total_deaths,total_vaccinations,population\n\
                   Kenya,2021-01-01,NaN,nan,inf,100\n\
                   USA,2021-01-01,-inf,infinity,NAN,100\n";
        let mut rdr = csv::ReaderBuilder::new().from_reader(body.as_bytes());
        let records: Vec<CovidRecord> = rdr.deserialize().map(|r| r.unwrap()).collect();

        let cleaned = clean_data(&records, &countries()).unwrap();
        assert_eq!(cleaned.len(), 2);
        for obs in &cleaned {
            assert_eq!(obs.total_cases, 0.0);
            assert_eq!(obs.total_deaths, 0.0);
            assert_eq!(obs.total_vaccinations, 0.0);
        }
    }

    #[test]
    fn test_non_finite_values_in_records_are_filled() {
        let rows = vec![record("India", "2021-01-01", Some(f64::NAN), Some(f64::INFINITY))];
        let cleaned = clean_data(&rows, &countries()).unwrap();
        assert_eq!(cleaned[0].total_cases, 0.0);
        assert_eq!(cleaned[0].total_vaccinations, 0.0);
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let once = clean_data(&sample(), &countries()).unwrap();
        let as_records: Vec<CovidRecord> = once.iter().map(CovidRecord::from).collect();
        let twice = clean_data(&as_records, &countries()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_location_match_is_exact() {
        let rows = vec![record("kenya", "2021-01-01", None, None), record("United States", "2021-01-01", None, None)];
        assert!(clean_data(&rows, &countries()).unwrap().is_empty());
    }

    #[test]
    fn test_alternate_date_formats() {
        let rows = vec![
            record("Kenya", "2021/03/04", None, None),
            record("Kenya", "03/05/2021", None, None),
        ];
        let cleaned = clean_data(&rows, &countries()).unwrap();
        assert_eq!(cleaned[0].date, NaiveDate::from_ymd_opt(2021, 3, 4).unwrap());
        assert_eq!(cleaned[1].date, NaiveDate::from_ymd_opt(2021, 3, 5).unwrap());
    }

    #[test]
    fn test_bad_date_on_kept_row_fails() {
        let rows = vec![record("India", "not-a-date", None, None)];
        assert!(matches!(
            clean_data(&rows, &countries()),
            Err(CovidError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_bad_date_on_dropped_row_is_ignored() {
        let rows = vec![record("Chile", "not-a-date", None, None)];
        assert!(clean_data(&rows, &countries()).unwrap().is_empty());
    }
}
