//! Terminal rendering with ratatui.
//!
//! [`render`] draws one frame: header, tab bar, the active view, status bar
//! and the help overlay when it is open. Views only read [`App`] state,
//! except the patient list which records its geometry for mouse hits.

pub mod common;
pub mod devices;
pub mod insights;
pub mod patients;
pub mod theme;
pub mod vitals;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, View};

/// Minimum terminal width for a usable display.
pub const MIN_WIDTH: u16 = 60;
/// Minimum terminal height for a usable display.
pub const MIN_HEIGHT: u16 = 12;

/// Draw the whole dashboard into `frame`.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let top = (area.height / 2).saturating_sub(2);
        let centered = Rect::new(area.x, area.y + top, area.width, 5.min(area.height - top));
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(1), // Tabs
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    common::render_tabs(frame, app, chunks[1]);

    match app.current_view {
        View::Patients => patients::render(frame, app, chunks[2]),
        View::Devices => devices::render(frame, app, chunks[2]),
        View::Insights => insights::render(frame, app, chunks[2]),
    }

    common::render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ChannelClock;
    use crate::data::{SampleData, VitalsGenerator};
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn make_app() -> App {
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let vitals =
            VitalsGenerator::default().generate(30, today, &mut VitalsGenerator::rng(Some(3)));
        let (_tx, clock) = ChannelClock::create("test");
        App::new(
            Arc::new(SampleData::builtin()),
            vitals,
            Box::new(clock),
            Theme::dark(),
        )
        .unwrap()
    }

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn selected_patient_is_visible_on_every_view() {
        let mut app = make_app();
        app.select_patient(2).unwrap();
        let name = app.selected_patient().name.clone();

        for view in View::ALL {
            app.set_view(view);
            let screen = draw(&mut app, 140, 45);
            assert!(screen.contains(&name), "{:?} view lacks {}", view, name);
        }
    }

    #[test]
    fn header_shows_device_totals_and_alerts() {
        let mut app = make_app();
        let screen = draw(&mut app, 140, 45);
        assert!(screen.contains("CARECONNECT DASHBOARD"));
        assert!(screen.contains("431/464 devices online (93%)"));
        assert!(screen.contains("3 active alerts"));
    }

    #[test]
    fn status_bar_names_the_clock() {
        let mut app = make_app();
        let screen = draw(&mut app, 160, 45);
        assert!(screen.contains("clock: test"));
    }

    #[test]
    fn patients_view_records_list_area() {
        let mut app = make_app();
        assert!(app.patient_list_area.is_none());
        draw(&mut app, 140, 45);
        assert!(app.patient_list_area.is_some());
    }

    #[test]
    fn devices_view_lists_inventory() {
        let mut app = make_app();
        app.set_view(View::Devices);
        let screen = draw(&mut app, 140, 45);
        for device in &app.data().devices {
            assert!(screen.contains(&device.name), "missing {}", device.name);
        }
        assert!(screen.contains("Normal: 67%"));
    }

    #[test]
    fn insights_view_shows_titles() {
        let mut app = make_app();
        app.set_view(View::Insights);
        let screen = draw(&mut app, 140, 45);
        for insight in &app.data().insights {
            assert!(screen.contains(&insight.title), "missing {}", insight.title);
        }
    }

    #[test]
    fn small_terminal_shows_resize_hint() {
        let mut app = make_app();
        let screen = draw(&mut app, 40, 10);
        assert!(screen.contains("Terminal too small"));
    }

    #[test]
    fn help_overlay_is_drawn_when_open() {
        let mut app = make_app();
        app.toggle_help();
        let screen = draw(&mut app, 140, 45);
        assert!(screen.contains("Keyboard Shortcuts"));
    }
}
