//! World map of the latest total case counts.
//!
//! Countries are placed at their centroid on an equirectangular
//! (longitude, latitude) frame and colored on the Viridis scale.

use std::path::Path;

use itertools::{Itertools, MinMaxResult};
use plotters::prelude::*;
use tracing::{info, warn};

use crate::error::Result;
use crate::models::Observation;

pub const MAP_CHART: &str = "total_cases_map.png";
const MAP_SIZE: (u32, u32) = (1200, 650);
const COLOR_BAR_STEPS: usize = 64;

/// Approximate (longitude, latitude) centroids keyed by ISO 3166-1 alpha-3.
const CENTROIDS: &[(&str, f64, f64)] = &[
    ("AFG", 66.0, 33.9),
    ("ARE", 54.3, 23.9),
    ("ARG", -64.0, -34.0),
    ("AUS", 134.5, -25.7),
    ("AUT", 14.1, 47.6),
    ("BEL", 4.6, 50.6),
    ("BGD", 90.3, 23.8),
    ("BRA", -51.9, -14.2),
    ("CAN", -106.3, 56.1),
    ("CHE", 8.2, 46.8),
    ("CHL", -71.5, -35.7),
    ("CHN", 104.2, 35.9),
    ("COD", 23.7, -2.9),
    ("COL", -74.3, 4.6),
    ("CUB", -79.0, 21.5),
    ("CZE", 15.5, 49.8),
    ("DEU", 10.5, 51.2),
    ("DNK", 9.5, 56.3),
    ("DZA", 2.6, 28.2),
    ("EGY", 30.8, 26.8),
    ("ESP", -3.7, 40.4),
    ("ETH", 40.5, 9.1),
    ("FIN", 25.7, 61.9),
    ("FRA", 2.2, 46.2),
    ("GBR", -3.4, 55.4),
    ("GHA", -1.0, 7.9),
    ("GRC", 21.8, 39.1),
    ("IDN", 113.9, -0.8),
    ("IND", 78.9, 20.6),
    ("IRL", -8.2, 53.4),
    ("IRN", 53.7, 32.4),
    ("IRQ", 43.7, 33.2),
    ("ISR", 34.9, 31.0),
    ("ITA", 12.6, 41.9),
    ("JPN", 138.3, 36.2),
    ("KAZ", 66.9, 48.0),
    ("KEN", 37.9, 0.0),
    ("KOR", 127.8, 35.9),
    ("LKA", 80.8, 7.9),
    ("MAR", -7.1, 31.8),
    ("MEX", -102.6, 23.6),
    ("MYS", 101.98, 4.2),
    ("NGA", 8.7, 9.1),
    ("NLD", 5.3, 52.1),
    ("NOR", 8.5, 60.5),
    ("NPL", 84.1, 28.4),
    ("NZL", 174.9, -40.9),
    ("PAK", 69.3, 30.4),
    ("PER", -75.0, -9.2),
    ("PHL", 121.8, 12.9),
    ("POL", 19.1, 51.9),
    ("PRT", -8.2, 39.4),
    ("ROU", 24.97, 45.9),
    ("RUS", 105.3, 61.5),
    ("SAU", 45.1, 23.9),
    ("SDN", 30.2, 12.9),
    ("SEN", -14.5, 14.5),
    ("SGP", 103.8, 1.35),
    ("SWE", 18.6, 60.1),
    ("THA", 101.0, 15.9),
    ("TUR", 35.2, 38.96),
    ("TZA", 34.9, -6.4),
    ("UGA", 32.3, 1.4),
    ("UKR", 31.2, 48.4),
    ("USA", -95.7, 37.1),
    ("VEN", -66.6, 6.4),
    ("VNM", 108.3, 14.1),
    ("ZAF", 22.9, -30.6),
    ("ZMB", 27.8, -13.1),
    ("ZWE", 29.2, -19.0),
];

/// Centroid of a country, `None` for unknown or aggregate (`OWID_*`) codes.
pub fn centroid(iso_code: &str) -> Option<(f64, f64)> {
    CENTROIDS
        .iter()
        .find(|(code, _, _)| *code == iso_code)
        .map(|&(_, lon, lat)| (lon, lat))
}

/// Rows dated on the most recent date of the table.
pub fn latest_observations(observations: &[Observation]) -> Vec<&Observation> {
    let Some(latest) = observations.iter().map(|o| o.date).max() else {
        return Vec::new();
    };
    observations.iter().filter(|o| o.date == latest).collect()
}

/// Range the color scale is normalized over; never empty.
fn color_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    match values.minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => (0.0, 1.0),
        MinMaxResult::OneElement(v) => (v, v + 1.0),
        MinMaxResult::MinMax(lo, hi) if hi > lo => (lo, hi),
        MinMaxResult::MinMax(lo, _) => (lo, lo + 1.0),
    }
}

// Build a choropleth map of total cases by country (latest date)
pub fn choropleth_map(observations: &[Observation], output_dir: &Path) -> Result<()> {
    let latest = latest_observations(observations);
    let placed: Vec<(&Observation, (f64, f64))> = latest
        .into_iter()
        .filter_map(|o| match o.iso_code.as_deref().and_then(centroid) {
            Some(point) => Some((o, point)),
            None => {
                warn!(location = %o.location, iso_code = ?o.iso_code, "no map position, row skipped");
                None
            }
        })
        .collect();
    let (lo, hi) = color_bounds(placed.iter().map(|(o, _)| o.total_cases));

    let path = output_dir.join(MAP_CHART);
    let root = BitMapBackend::new(&path, MAP_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (map_area, bar_area) = root.split_horizontally(MAP_SIZE.0 as i32 - 150);

    let mut chart = ChartBuilder::on(&map_area)
        .caption("COVID-19 Total Cases by Country", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-180f64..180f64, -90f64..90f64)?;

    chart
        .configure_mesh()
        .x_desc("Longitude")
        .y_desc("Latitude")
        .x_labels(13)
        .y_labels(7)
        .draw()?;

    chart.draw_series(placed.iter().map(|(o, (lon, lat))| {
        let color = ViridisRGB.get_color_normalized(o.total_cases, lo, hi);
        Circle::new((*lon, *lat), 14, color.filled())
    }))?;

    chart.draw_series(placed.iter().map(|(o, (lon, lat))| {
        Text::new(
            o.location.clone(),
            (*lon + 4.0, *lat - 6.0),
            ("sans-serif", 15).into_font().color(&BLACK),
        )
    }))?;

    // Color bar
    let mut scale = ChartBuilder::on(&bar_area)
        .margin_top(60)
        .margin_bottom(60)
        .margin_right(20)
        .y_label_area_size(80)
        .build_cartesian_2d(0f64..1f64, lo..hi)?;

    scale
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc("total_cases")
        .draw()?;

    let step = (hi - lo) / COLOR_BAR_STEPS as f64;
    scale.draw_series((0..COLOR_BAR_STEPS).map(|i| {
        let y0 = lo + step * i as f64;
        let color = ViridisRGB.get_color_normalized(y0, lo, hi);
        Rectangle::new([(0.0, y0), (1.0, y0 + step)], color.filled())
    }))?;

    root.present()?;
    info!(path = %path.display(), countries = placed.len(), "choropleth map saved");
    Ok(())
}
