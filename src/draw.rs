use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;

use crate::track::Series;

const THEME_BG: RGBColor = RGBColor(30, 41, 49);
const THEME_FG: RGBColor = RGBColor(203, 213, 225);
const THEME_GUIDE_GRAY: RGBColor = RGBColor(100, 116, 139);

pub type DrawError = DrawingAreaErrorKind<std::io::Error>;

/// Plots the recorded tracks onto a longitude/latitude chart and writes it as SVG.
#[tracing::instrument(skip(series))]
pub fn draw_tracks(path: &Path, series: &[Series]) -> Result<(), DrawError> {
    let root = SVGBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&THEME_BG)?;

    let (lng_range, lat_range) = bounds(series);
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(
            "Deployment tracks",
            ("sans-serif", 28).into_font().color(&THEME_FG),
        )
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(lng_range, lat_range)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .axis_style(THEME_FG)
        .x_desc("Longitude")
        .y_desc("Latitude")
        .label_style(TextStyle::from(("sans-serif", 16).into_font()).color(&THEME_FG))
        .draw()?;

    for (i, s) in series.iter().enumerate() {
        // planned leg
        chart.draw_series(LineSeries::new(
            [
                (s.origin.lng, s.origin.lat),
                (s.destination.lng, s.destination.lat),
            ],
            THEME_GUIDE_GRAY.mix(0.4),
        ))?;

        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(
                s.datums.iter().map(|d| (d.lng, d.lat)),
                color.stroke_width(3),
            ))?
            .label(s.label.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
            });

        for end in [&s.origin, &s.destination] {
            chart.draw_series(std::iter::once(Circle::new(
                (end.lng, end.lat),
                5,
                THEME_FG.filled(),
            )))?;
            chart.draw_series(std::iter::once(Text::new(
                end.label.clone(),
                (end.lng, end.lat),
                ("sans-serif", 16).into_font().color(&THEME_FG),
            )))?;
        }
    }

    if !series.is_empty() {
        chart
            .configure_series_labels()
            .background_style(THEME_BG.mix(0.8))
            .border_style(THEME_FG)
            .label_font(("sans-serif", 16).into_font().color(&THEME_FG))
            .draw()?;
    }

    root.present()?;
    tracing::debug!(series = series.len(), "chart written");

    Ok(())
}

/// Longitude and latitude ranges covering every route end, padded by a tenth on each side.
fn bounds(series: &[Series]) -> (Range<f64>, Range<f64>) {
    let mut lng = (f64::MAX, f64::MIN);
    let mut lat = (f64::MAX, f64::MIN);
    for p in series.iter().flat_map(|s| [&s.origin, &s.destination]) {
        lng = (lng.0.min(p.lng), lng.1.max(p.lng));
        lat = (lat.0.min(p.lat), lat.1.max(p.lat));
    }

    if lng.0 > lng.1 {
        return (-1.0..1.0, -1.0..1.0);
    }

    (pad(lng), pad(lat))
}

fn pad((min, max): (f64, f64)) -> Range<f64> {
    let margin = ((max - min) * 0.1).max(0.01);
    (min - margin)..(max + margin)
}
