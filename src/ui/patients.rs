//! Patients view rendering.
//!
//! Key-metrics row on top; below it the patient list on the left and the
//! selected patient's detail, vitals trend chart and latest readings on the
//! right.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::common::panel;
use super::vitals;
use crate::app::App;
use crate::data::{latest_readings, DeviceIndicator, Patient, ReadingStatus, RiskTier};

/// Rows occupied by one patient card, including the spacer line.
pub const PATIENT_CARD_HEIGHT: u16 = 4;

/// Render the Patients view.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = Layout::vertical([Constraint::Length(3), Constraint::Min(10)]).split(area);
    render_key_metrics(frame, app, rows[0]);

    let columns =
        Layout::horizontal([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)]).split(rows[1]);
    render_patient_list(frame, app, columns[0]);

    let detail = Layout::vertical([
        Constraint::Length(6), // Selected patient
        Constraint::Min(8),    // Vitals chart
        Constraint::Length(5), // Latest readings
    ])
    .split(columns[1]);

    render_patient_detail(frame, app, detail[0]);
    vitals::render(frame, app, detail[1]);
    render_latest_readings(frame, app, detail[2]);
}

fn render_key_metrics(frame: &mut Frame, app: &App, area: Rect) {
    let metrics = &app.data().metrics;
    let online = app.device_totals().online;

    let tiles = [
        ("Total Patients", metrics.total_patients.to_string()),
        (
            "Improved Outcomes",
            format!("{}%", metrics.improved_outcomes_pct),
        ),
        (
            "Avg Response Time",
            format!("{} min", metrics.avg_response_minutes),
        ),
        ("Active Monitors", online.to_string()),
    ];

    let cells = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for ((label, value), cell) in tiles.into_iter().zip(cells.iter()) {
        let line = Line::from(vec![
            Span::styled(format!("{} ", label), app.theme.muted),
            Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
        ]);
        frame.render_widget(Paragraph::new(line).block(panel(app, "")), *cell);
    }
}

/// Lines for one patient card.
fn patient_card(app: &App, patient: &Patient) -> ListItem<'static> {
    let tier = RiskTier::from_score(patient.risk_score);
    let indicator = DeviceIndicator::for_count(patient.devices.len());

    let mut device_spans: Vec<Span> = (0..indicator.dots)
        .map(|_| Span::styled("●", Style::default().fg(app.theme.healthy)))
        .collect();
    if indicator.overflow > 0 {
        device_spans.push(Span::styled(
            format!("+{}", indicator.overflow),
            app.theme.muted,
        ));
    }

    let mut footer = vec![Span::styled(
        format!("Last reading: {}  ", patient.last_reading),
        app.theme.muted,
    )];
    footer.extend(device_spans);

    ListItem::new(vec![
        Line::from(vec![
            Span::styled(
                patient.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                format!(" {} ", patient.status.label()),
                app.theme.status_style(patient.status),
            ),
            Span::raw(" "),
            Span::styled(format!("{}%", patient.risk_score), app.theme.risk_style(tier)),
        ]),
        Line::from(Span::styled(
            format!("Age: {} · {}", patient.age, patient.conditions_label()),
            app.theme.muted,
        )),
        Line::from(footer),
        Line::from(""),
    ])
}

fn render_patient_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = panel(app, " Patient Monitoring ");
    let inner = block.inner(area);

    let items: Vec<ListItem> = app
        .roster()
        .iter()
        .map(|patient| patient_card(app, patient))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = ListState::default()
        .with_offset(app.patient_list_offset)
        .with_selected(Some(app.selected_index()));
    frame.render_stateful_widget(list, area, &mut state);

    app.patient_list_area = Some(inner);
    app.patient_list_offset = state.offset();
}

fn render_patient_detail(frame: &mut Frame, app: &App, area: Rect) {
    let patient = app.selected_patient();
    let tier = RiskTier::from_score(patient.risk_score);

    let mut devices: Vec<Span> = Vec::new();
    for device in &patient.devices {
        devices.push(Span::styled("● ", Style::default().fg(app.theme.healthy)));
        devices.push(Span::raw(format!("{}   ", device)));
    }

    let lines = vec![
        Line::from(vec![
            Span::styled(
                patient.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(
                format!("Risk Score: {}%", patient.risk_score),
                app.theme.risk_style(tier),
            ),
            Span::styled("  AI-powered assessment", app.theme.muted),
        ]),
        Line::from(Span::styled(
            format!(
                "Age: {} | Conditions: {}",
                patient.age,
                patient.conditions_label()
            ),
            app.theme.muted,
        )),
        Line::from(""),
        Line::from(devices),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(panel(app, " Selected Patient "))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_latest_readings(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel(app, " Latest Readings ");

    let Some(sample) = app.vitals().latest() else {
        frame.render_widget(Paragraph::new("No readings").block(block), area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cells = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(inner);
    for (reading, cell) in latest_readings(sample).iter().zip(cells.iter()) {
        let mark = match reading.status {
            ReadingStatus::Normal => "✔",
            ReadingStatus::Warning => "✖",
        };
        let lines = vec![
            Line::from(Span::styled(reading.label, app.theme.muted)),
            Line::from(vec![
                Span::styled(
                    reading.value.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" {} ", reading.unit)),
                Span::styled(mark, app.theme.reading_style(reading.status)),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), *cell);
    }
}
