use statrs::statistics::{Data, Distribution, Max, Median, Min, OrderStatistics};

use crate::models::Observation;

/// Summary of one numeric column, as in a `describe` table. Undefined
/// statistics (empty column, std of a single value) are NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: &'static str,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub lower_quartile: f64,
    pub median: f64,
    pub upper_quartile: f64,
    pub max: f64,
}

const ROW_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

impl ColumnSummary {
    pub fn from_values(name: &'static str, values: Vec<f64>) -> Self {
        let count = values.len();
        if count == 0 {
            return ColumnSummary {
                name,
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                lower_quartile: f64::NAN,
                median: f64::NAN,
                upper_quartile: f64::NAN,
                max: f64::NAN,
            };
        }

        let mut data = Data::new(values);
        ColumnSummary {
            name,
            count,
            mean: Distribution::mean(&data).unwrap_or(f64::NAN),
            std: Distribution::std_dev(&data).unwrap_or(f64::NAN),
            min: Min::min(&data),
            lower_quartile: data.lower_quartile(),
            median: Median::median(&data),
            upper_quartile: data.upper_quartile(),
            max: Max::max(&data),
        }
    }

    fn row(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.lower_quartile,
            self.median,
            self.upper_quartile,
            self.max,
        ]
    }
}

/// Summaries of the numeric columns of the cleaned table. Missing
/// populations are left out of that column's summary.
pub fn describe(observations: &[Observation]) -> Vec<ColumnSummary> {
    let column = |f: fn(&Observation) -> Option<f64>| -> Vec<f64> {
        observations.iter().filter_map(f).collect()
    };

    vec![
        ColumnSummary::from_values("total_cases", column(|o| Some(o.total_cases))),
        ColumnSummary::from_values("total_deaths", column(|o| Some(o.total_deaths))),
        ColumnSummary::from_values("total_vaccinations", column(|o| Some(o.total_vaccinations))),
        ColumnSummary::from_values("population", column(|o| o.population)),
    ]
}

/// Lay the summaries out with statistics as rows and columns side by side.
pub fn format_summary(summaries: &[ColumnSummary]) -> String {
    let width = summaries
        .iter()
        .map(|s| s.name.len())
        .fold(14, usize::max);

    let mut lines = Vec::with_capacity(ROW_LABELS.len() + 1);
    let header: String = summaries
        .iter()
        .map(|s| format!("{:>width$}", s.name))
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(format!("{:<6}{header}", ""));

    let rows: Vec<[f64; 8]> = summaries.iter().map(ColumnSummary::row).collect();
    for (idx, label) in ROW_LABELS.iter().enumerate() {
        let cells = rows
            .iter()
            .map(|r| format!("{:>width$.6e}", r[idx]))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(format!("{label:<6}{cells}"));
    }
    lines.join("\n")
}
