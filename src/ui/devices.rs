//! Devices view rendering.
//!
//! Left: per-category connectivity rows with a health bar. Right: the patient
//! status distribution as a proportional segmented bar with a legend.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::common::{panel, ratio_bar};
use crate::app::App;
use crate::data::{distribution_total, StatusSlice};

/// Width of the per-category health bar.
const HEALTH_BAR_WIDTH: usize = 16;

/// Render the Devices view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let columns =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).split(area);
    render_connectivity(frame, app, columns[0]);
    render_distribution(frame, app, columns[1]);
}

fn render_connectivity(frame: &mut Frame, app: &App, area: Rect) {
    let totals = app.device_totals();
    let name_width = app
        .data()
        .devices
        .iter()
        .map(|d| d.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = Vec::new();
    for device in &app.data().devices {
        let (filled, empty) = ratio_bar(device.online_ratio(), HEALTH_BAR_WIDTH);
        lines.push(Line::from(vec![
            Span::styled("● ", app.theme.device_style(device.is_fully_online())),
            Span::styled(
                format!("{:<width$}", device.name, width = name_width),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {:>4}/{:<4} online  ", device.online, device.count)),
            Span::styled(filled, Style::default().fg(app.theme.healthy)),
            Span::styled(empty, app.theme.muted),
        ]));
        lines.push(Line::from(""));
    }

    let title = format!(
        " Device Connectivity Status ({}/{} online) ",
        totals.online, totals.total
    );
    frame.render_widget(Paragraph::new(lines).block(panel(app, title)), area);
}

fn render_distribution(frame: &mut Frame, app: &App, area: Rect) {
    let slices = &app.data().status_distribution;
    let block = panel(app, " Patient Status Distribution ");
    let inner = block.inner(area);
    let bar_width = inner.width.saturating_sub(2);

    let widths = segment_widths(slices, bar_width);
    let bar: Vec<Span> = slices
        .iter()
        .zip(widths.iter())
        .map(|(slice, &width)| {
            Span::styled(
                "█".repeat(usize::from(width)),
                Style::default().fg(slice_color(slice)),
            )
        })
        .collect();

    let mut lines = vec![Line::from(""), Line::from(bar), Line::from("")];
    for slice in slices {
        lines.push(Line::from(vec![
            Span::styled("■ ", Style::default().fg(slice_color(slice))),
            Span::raw(format!("{}: {}%", slice.name, slice.value)),
        ]));
    }

    let total = distribution_total(slices);
    if !slices.is_empty() && total != 100 {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Weights sum to {}%", total),
            Style::default().fg(app.theme.warning),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn slice_color(slice: &StatusSlice) -> Color {
    slice
        .rgb()
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::Gray)
}

/// Split `width` cells between slices in proportion to their weights.
///
/// Uses largest-remainder rounding so the widths always sum to `width`
/// (or to 0 when every weight is 0).
pub fn segment_widths(slices: &[StatusSlice], width: u16) -> Vec<u16> {
    let total = distribution_total(slices);
    if total == 0 || width == 0 {
        return vec![0; slices.len()];
    }

    let width = u32::from(width);
    let mut widths: Vec<u32> = Vec::with_capacity(slices.len());
    let mut remainders: Vec<(usize, u32)> = Vec::with_capacity(slices.len());
    for (i, slice) in slices.iter().enumerate() {
        let scaled = u32::from(slice.value) * width;
        widths.push(scaled / total);
        remainders.push((i, scaled % total));
    }

    let assigned: u32 = widths.iter().sum();
    let mut leftover = width - assigned;
    // Largest remainder first, earlier slices win ties
    remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    for (i, _) in remainders {
        if leftover == 0 {
            break;
        }
        widths[i] += 1;
        leftover -= 1;
    }

    widths.into_iter().map(|w| w as u16).collect()
}
