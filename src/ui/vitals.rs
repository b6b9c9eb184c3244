//! Vital-signs trend chart.
//!
//! Draws the charted fields of the generated series as line datasets, x being
//! the day index and the axis labelled with the first, middle and last dates.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use super::common::panel;
use crate::app::App;
use crate::data::{VitalField, VitalsSeries};

/// Vertical padding added around the data range.
const Y_PADDING: f64 = 5.0;

/// Line color for a charted field.
pub fn field_color(field: VitalField) -> Color {
    match field {
        VitalField::Systolic => Color::Rgb(0xef, 0x44, 0x44),
        VitalField::Diastolic => Color::Rgb(0xf5, 0x9e, 0x0b),
        VitalField::HeartRate => Color::Rgb(0x10, 0xb9, 0x81),
        VitalField::OxygenSat => Color::Rgb(0x3b, 0x82, 0xf6),
        VitalField::Temperature | VitalField::Weight | VitalField::Glucose => Color::Gray,
    }
}

/// Y-axis bounds for the charted fields, padded and snapped to multiples of 10.
pub fn y_bounds(series: &VitalsSeries) -> [f64; 2] {
    match series.bounds(&VitalField::CHARTED) {
        Some((lo, hi)) => [
            ((lo - Y_PADDING) / 10.0).floor() * 10.0,
            ((hi + Y_PADDING) / 10.0).ceil() * 10.0,
        ],
        None => [0.0, 1.0],
    }
}

/// Date labels for the x axis: first, middle and last day.
pub fn x_labels(series: &VitalsSeries) -> Vec<String> {
    let samples = &series.samples;
    match samples.len() {
        0 => Vec::new(),
        1 => vec![samples[0].date.format("%m-%d").to_string()],
        n => [0, (n - 1) / 2, n - 1]
            .iter()
            .map(|&i| samples[i].date.format("%m-%d").to_string())
            .collect(),
    }
}

/// Render the trend chart.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let series = app.vitals();
    let title = format!(" Vital Signs Trends ({} days) ", series.len().saturating_sub(1));
    let block = panel(app, title);

    if series.is_empty() {
        frame.render_widget(Paragraph::new("No vitals generated").block(block), area);
        return;
    }

    let points: Vec<(VitalField, Vec<(f64, f64)>)> = VitalField::CHARTED
        .iter()
        .map(|&field| (field, series.points(field)))
        .collect();

    let datasets: Vec<Dataset> = points
        .iter()
        .map(|(field, data)| {
            Dataset::default()
                .name(field.label())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(field_color(*field)))
                .data(data)
        })
        .collect();

    let [y_lo, y_hi] = y_bounds(series);
    let x_max = (series.len() - 1).max(1) as f64;

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(app.theme.muted)
                .bounds([0.0, x_max])
                .labels(x_labels(series)),
        )
        .y_axis(
            Axis::default()
                .style(app.theme.muted)
                .bounds([y_lo, y_hi])
                .labels([
                    Span::raw(format!("{:.0}", y_lo)),
                    Span::raw(format!("{:.0}", (y_lo + y_hi) / 2.0)),
                    Span::raw(format!("{:.0}", y_hi)),
                ]),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::VitalsGenerator;
    use chrono::NaiveDate;

    fn series(window: u16) -> VitalsSeries {
        let today = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        VitalsGenerator::default().generate(window, today, &mut VitalsGenerator::rng(Some(4)))
    }

    #[test]
    fn y_bounds_enclose_charted_values() {
        let s = series(30);
        let [lo, hi] = y_bounds(&s);
        let (min, max) = s.bounds(&VitalField::CHARTED).unwrap();
        assert!(lo <= min - Y_PADDING);
        assert!(hi >= max + Y_PADDING);
        assert_eq!(lo % 10.0, 0.0);
        assert_eq!(hi % 10.0, 0.0);
    }

    #[test]
    fn y_bounds_of_empty_series_are_unit() {
        assert_eq!(y_bounds(&VitalsSeries::default()), [0.0, 1.0]);
    }

    #[test]
    fn x_labels_pick_first_middle_last() {
        let labels = x_labels(&series(30));
        assert_eq!(labels, vec!["03-16", "03-31", "04-15"]);
    }

    #[test]
    fn x_labels_for_single_day() {
        assert_eq!(x_labels(&series(0)), vec!["04-15"]);
        assert!(x_labels(&VitalsSeries::default()).is_empty());
    }

    #[test]
    fn charted_fields_have_distinct_colors() {
        let colors: Vec<Color> = VitalField::CHARTED.iter().map(|f| field_color(*f)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
