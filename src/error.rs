//! Error type shared by every pipeline stage.

use std::path::PathBuf;

use chrono::NaiveDate;
use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CovidError {
    /// The input CSV could not be opened or parsed
    #[error("could not load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A kept row carries a date none of the accepted formats can parse
    #[error("invalid date {value:?} for {location}")]
    InvalidDate { location: String, value: String },

    /// Vaccination rate requested for a row with missing or zero population
    #[error("population missing or zero for {location} on {date}")]
    UndefinedPopulation { location: String, date: NaiveDate },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any drawing failure reported by the chart backend
    #[error("plot error: {0}")]
    Plot(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for CovidError
where
    E: std::error::Error + Send + Sync,
{
    fn from(error: DrawingAreaErrorKind<E>) -> Self {
        CovidError::Plot(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CovidError>;
