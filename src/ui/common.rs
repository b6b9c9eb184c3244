//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};

/// Render the header bar.
///
/// Displays: title, last refresh time, online/total devices, active alerts.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let data = app.data();
    let totals = app.device_totals();
    let alerts = data.metrics.active_alerts;

    let alert_style = if alerts > 0 {
        Style::default()
            .fg(app.theme.warning)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", data.title.to_uppercase()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(
            format!(
                "Last updated: {}",
                app.last_refreshed().format("%H:%M:%S")
            ),
            app.theme.muted,
        ),
        Span::raw(" │ "),
        Span::styled("● ", Style::default().fg(app.theme.healthy)),
        Span::raw(format!(
            "{}/{} devices online ({:.0}%)",
            totals.online,
            totals.total,
            totals.online_ratio() * 100.0
        )),
        Span::raw(" │ "),
        Span::styled("▲ ", alert_style),
        Span::styled(format!("{} active alerts", alerts), alert_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!(" {}:{} ", i + 1, view.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows the subtitle, selected patient, clock and available controls, or a
/// temporary status message when one is active.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(err) = app.clock_error() {
        format!(" Clock error: {} | q:quit", err)
    } else {
        let controls = match app.current_view {
            View::Patients => "↑↓:patient Tab:switch e:export ?:help q:quit",
            View::Devices | View::Insights => "Tab:switch e:export ?:help q:quit",
        };
        format!(
            " {} | {} | {} | {}",
            app.data().subtitle,
            app.selected_patient().name,
            app.clock_description(),
            controls
        )
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Views"),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  Tab         Next view"),
        Line::from("  1/2/3       Patients/Devices/Insights"),
        Line::from(""),
        section(" Patients"),
        Line::from("  ↑/↓ j/k     Select patient"),
        Line::from("  Home/End    First/last patient"),
        Line::from("  Click       Select patient card"),
        Line::from(""),
        section(" General"),
        Line::from("  e           Export to JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 20u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

/// A bordered block with the theme's border style.
pub fn panel<'a>(app: &App, title: impl Into<Line<'a>>) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.border_style())
}

/// Text bar of `width` cells filled to `ratio`.
pub fn ratio_bar(ratio: f64, width: usize) -> (String, String) {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    ("█".repeat(filled), "░".repeat(width - filled))
}
