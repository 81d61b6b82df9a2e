use chrono::NaiveDate;
use serde::Deserialize;

/// One row of the source CSV as read from disk.
///
/// Only the columns the analysis touches are kept; any other column in the
/// file is ignored. Empty or unparseable numeric cells load as `None`, and
/// so do `NaN` and infinite values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CovidRecord {
    pub location: String,
    pub date: String,
    #[serde(default, deserialize_with = "finite_or_missing")]
    pub total_cases: Option<f64>,
    #[serde(default, deserialize_with = "finite_or_missing")]
    pub total_deaths: Option<f64>,
    #[serde(default, deserialize_with = "finite_or_missing")]
    pub total_vaccinations: Option<f64>,
    #[serde(default, deserialize_with = "finite_or_missing")]
    pub population: Option<f64>,
    #[serde(default)]
    pub iso_code: Option<String>,
}

fn finite_or_missing<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<f64> = csv::invalid_option(de)?;
    Ok(value.filter(|v| v.is_finite()))
}

/// A cleaned row: date parsed, the three running totals filled.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub location: String,
    pub date: NaiveDate,
    pub total_cases: f64,
    pub total_deaths: f64,
    pub total_vaccinations: f64,
    pub population: Option<f64>,
    pub iso_code: Option<String>,
}

impl From<&Observation> for CovidRecord {
    fn from(obs: &Observation) -> Self {
        CovidRecord {
            location: obs.location.clone(),
            date: obs.date.format("%Y-%m-%d").to_string(),
            total_cases: Some(obs.total_cases),
            total_deaths: Some(obs.total_deaths),
            total_vaccinations: Some(obs.total_vaccinations),
            population: obs.population,
            iso_code: obs.iso_code.clone(),
        }
    }
}

/// A per-row ratio derived from an observation. `None` marks an undefined
/// value (zero denominator).
#[derive(Debug, Clone, PartialEq)]
pub struct RateRow {
    pub location: String,
    pub date: NaiveDate,
    pub rate: Option<f64>,
}

/// Row types that can be previewed as a text table.
pub trait TableRow {
    fn columns() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

const COLUMNS: [&str; 7] = [
    "location",
    "date",
    "total_cases",
    "total_deaths",
    "total_vaccinations",
    "population",
    "iso_code",
];

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| format!("{v:.1}"))
}

impl TableRow for CovidRecord {
    fn columns() -> &'static [&'static str] {
        &COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.location.clone(),
            self.date.clone(),
            fmt_opt(self.total_cases),
            fmt_opt(self.total_deaths),
            fmt_opt(self.total_vaccinations),
            fmt_opt(self.population),
            self.iso_code.clone().unwrap_or_else(|| "NaN".to_string()),
        ]
    }
}

impl TableRow for Observation {
    fn columns() -> &'static [&'static str] {
        &COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.location.clone(),
            self.date.to_string(),
            format!("{:.1}", self.total_cases),
            format!("{:.1}", self.total_deaths),
            format!("{:.1}", self.total_vaccinations),
            fmt_opt(self.population),
            self.iso_code.clone().unwrap_or_else(|| "NaN".to_string()),
        ]
    }
}

/// Render the first `n` rows as a right-aligned table, index column first.
pub fn render_head<T: TableRow>(rows: &[T], n: usize) -> String {
    let header: Vec<String> = std::iter::once(String::new())
        .chain(T::columns().iter().map(|c| c.to_string()))
        .collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .take(n)
        .enumerate()
        .map(|(idx, row)| std::iter::once(idx.to_string()).chain(row.cells()).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for line in &body {
        for (w, cell) in widths.iter_mut().zip(line) {
            *w = (*w).max(cell.len());
        }
    }

    let format_line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:>w$}"))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut out = vec![format_line(header.as_slice())];
    out.extend(body.iter().map(|line| format_line(line.as_slice())));
    out.push(format!("[{} rows x {} columns]", rows.len(), T::columns().len()));
    out.join("\n")
}
