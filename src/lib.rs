//! Exploratory analysis of country-level COVID-19 statistics: load an
//! observations CSV, keep a few countries, fill gaps and chart cases, deaths
//! and vaccinations.

pub mod charts;
pub mod clean;
pub mod config;
pub mod eda;
pub mod eda_statistics;
pub mod error;
pub mod load_clean;
pub mod map;
pub mod models;
pub mod pipeline;
pub mod vaccination;

pub use config::AnalysisConfig;
pub use error::{CovidError, Result};
pub use models::{CovidRecord, Observation, RateRow};
