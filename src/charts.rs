//! Line and bar chart primitives shared by the analysis stages.
//!
//! Data preparation (`series_by_location`, `mean_by_location`) is kept apart
//! from drawing.

use std::path::Path;

use chrono::NaiveDate;
use itertools::{Itertools, MinMaxResult};
use ordered_float::OrderedFloat;
use plotters::prelude::*;
use tracing::{info, warn};

use crate::error::Result;
use crate::models::{Observation, RateRow};

pub const CHART_SIZE: (u32, u32) = (1000, 600);

/// Caption and axis labels of one chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
}

/// Time series of one location, ordered by date.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSeries {
    pub location: String,
    pub points: Vec<(NaiveDate, f64)>,
}

/// Group `(date, value)` points per location, locations in order of first
/// appearance.
pub fn series_by_location<F>(observations: &[Observation], value: F) -> Vec<LocationSeries>
where
    F: Fn(&Observation) -> f64,
{
    observations
        .iter()
        .map(|o| o.location.as_str())
        .unique()
        .map(|location| {
            let points = observations
                .iter()
                .filter(|o| o.location == location)
                .map(|o| (o.date, value(o)))
                .sorted_by_key(|(date, _)| *date)
                .collect();
            LocationSeries {
                location: location.to_string(),
                points,
            }
        })
        .collect()
}

/// Mean of the defined rates of each location, locations in order of first
/// appearance. A location without any defined rate is left out.
pub fn mean_by_location(rates: &[RateRow]) -> Vec<(String, f64)> {
    rates
        .iter()
        .map(|r| r.location.as_str())
        .unique()
        .filter_map(|location| {
            let values: Vec<f64> = rates
                .iter()
                .filter(|r| r.location == location)
                .filter_map(|r| r.rate)
                .collect();
            if values.is_empty() {
                warn!(location, "no defined rate, bar omitted");
                return None;
            }
            Some((location.to_string(), statrs::statistics::Statistics::mean(&values)))
        })
        .collect()
}

/// Segment filled by bar `idx`; its label sits at `CenterOf(idx)`.
fn bar_span(idx: usize) -> (SegmentValue<usize>, SegmentValue<usize>) {
    (SegmentValue::Exact(idx), SegmentValue::Exact(idx + 1))
}

fn upper_bound(values: impl Iterator<Item = f64>) -> f64 {
    match values.map(OrderedFloat).max() {
        Some(OrderedFloat(max)) if max > 0.0 => max * 1.1,
        _ => 1.0,
    }
}

pub fn line_chart(path: &Path, spec: ChartSpec<'_>, series: &[LocationSeries]) -> Result<()> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (start, end) = match series.iter().flat_map(|s| s.points.iter().map(|p| p.0)).minmax() {
        MinMaxResult::NoElements => {
            draw_no_data(&root)?;
            return Ok(());
        }
        MinMaxResult::OneElement(day) => (day, day.succ_opt().unwrap_or(day)),
        MinMaxResult::MinMax(first, last) => (first, last),
    };
    let y_max = upper_bound(series.iter().flat_map(|s| s.points.iter().map(|p| p.1)));

    let mut chart = ChartBuilder::on(&root)
        .caption(spec.title, ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(start..end, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_desc)
        .y_desc(spec.y_desc)
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y-%m-%d").to_string())
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 15))
        .draw()?;

    for (idx, s) in series.iter().enumerate() {
        let color = Palette99::pick(idx).mix(1.0);
        chart
            .draw_series(LineSeries::new(s.points.iter().copied(), color.stroke_width(2)))?
            .label(s.location.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    info!(path = %path.display(), title = spec.title, "line chart saved");
    Ok(())
}

pub fn bar_chart(path: &Path, spec: ChartSpec<'_>, bars: &[(String, f64)]) -> Result<()> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    if bars.is_empty() {
        draw_no_data(&root)?;
        return Ok(());
    }

    let y_max = upper_bound(bars.iter().map(|b| b.1));

    let mut chart = ChartBuilder::on(&root)
        .caption(spec.title, ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d((0..bars.len()).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len())
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(idx) => bars.get(*idx).map(|b| b.0.clone()).unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc(spec.x_desc)
        .y_desc(spec.y_desc)
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 15))
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(idx, (_, value))| {
        let (left, right) = bar_span(idx);
        let mut bar = Rectangle::new(
            [(left, 0.0), (right, *value)],
            Palette99::pick(idx).filled(),
        );
        bar.set_margin(0, 0, 20, 20);
        bar
    }))?;

    root.present()?;
    info!(path = %path.display(), title = spec.title, "bar chart saved");
    Ok(())
}

fn draw_no_data(root: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>) -> Result<()> {
    let (w, h) = CHART_SIZE;
    root.draw(&Text::new(
        "No data to display",
        (w as i32 / 2 - 80, h as i32 / 2),
        ("sans-serif", 20).into_font().color(&BLACK),
    ))?;
    root.present()?;
    warn!("chart rendered without data");
    Ok(())
}
