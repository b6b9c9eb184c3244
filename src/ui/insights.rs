//! Insights view rendering: one card per clinical decision-support insight.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::common::panel;
use crate::app::App;
use crate::data::Insight;

/// Render the Insights view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let insights = &app.data().insights;
    let outer = panel(app, " Clinical Decision Support Insights ");
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    if insights.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No insights available", app.theme.muted)),
            inner,
        );
        return;
    }

    let constraints = vec![Constraint::Ratio(1, insights.len() as u32); insights.len()];
    let cells = Layout::horizontal(constraints).split(inner);
    for (insight, cell) in insights.iter().zip(cells.iter()) {
        render_card(frame, app, insight, *cell);
    }
}

fn render_card(frame: &mut Frame, app: &App, insight: &Insight, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            insight.title.clone(),
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(insight.body.clone()),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(panel(app, ""))
            .wrap(Wrap { trim: true }),
        area,
    );
}
