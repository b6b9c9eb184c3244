use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tracing::warn;

use crate::app::{App, View};
use crate::ui::patients::PATIENT_CARD_HEIGHT;

/// File written by the in-app export key.
pub const EXPORT_FILE: &str = "careconnect_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),

        KeyCode::Char('1') => app.set_view(View::Patients),
        KeyCode::Char('2') => app.set_view(View::Devices),
        KeyCode::Char('3') => app.set_view(View::Insights),

        // Patient selection works from any view
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_FILE);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    warn!(error = %e, "export failed");
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        MouseEventKind::Down(MouseButton::Left) => {
            if app.current_view != View::Patients {
                return;
            }
            if let Some(index) = patient_card_at(app, mouse.column, mouse.row) {
                app.select_at(index);
            }
        }

        _ => {}
    }
}

/// Map a screen position to a patient card index using the last rendered list area.
fn patient_card_at(app: &App, column: u16, row: u16) -> Option<usize> {
    let area = app.patient_list_area?;
    let inside = column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height;
    if !inside {
        return None;
    }
    let index = app.patient_list_offset + usize::from((row - area.y) / PATIENT_CARD_HEIGHT);
    (index < app.roster().len()).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ratatui::layout::Rect;

    use crate::clock::ChannelClock;
    use crate::data::{generate_vitals, SampleData};
    use crate::ui::Theme;

    fn make_app() -> App {
        let (_tx, clock) = ChannelClock::create("test");
        App::new(
            Arc::new(SampleData::builtin()),
            generate_vitals(3),
            Box::new(clock),
            Theme::dark(),
        )
        .unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn q_quits() {
        let mut app = make_app();
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn arrows_move_selection() {
        let mut app = make_app();
        handle_key_event(&mut app, key(KeyCode::Down));
        handle_key_event(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.selected_patient().id, 3);
        handle_key_event(&mut app, key(KeyCode::Up));
        assert_eq!(app.selected_patient().id, 2);
        handle_key_event(&mut app, key(KeyCode::End));
        assert_eq!(app.selected_patient().id, 4);
    }

    #[test]
    fn number_keys_switch_views() {
        let mut app = make_app();
        handle_key_event(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.current_view, View::Insights);
        handle_key_event(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.current_view, View::Devices);
        handle_key_event(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.current_view, View::Patients);
    }

    #[test]
    fn any_key_closes_help() {
        let mut app = make_app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);

        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn click_selects_patient_card() {
        let mut app = make_app();
        app.patient_list_area = Some(Rect::new(2, 10, 30, 12));

        // Third card starts at row 10 + 2 * height
        let row = 10 + 2 * PATIENT_CARD_HEIGHT;
        handle_mouse_event(&mut app, click(5, row));
        assert_eq!(app.selected_patient().id, 3);

        // Outside the list
        handle_mouse_event(&mut app, click(40, row));
        assert_eq!(app.selected_patient().id, 3);
    }

    #[test]
    fn click_ignored_on_other_views() {
        let mut app = make_app();
        app.patient_list_area = Some(Rect::new(0, 0, 30, 12));
        app.set_view(View::Devices);
        handle_mouse_event(&mut app, click(1, PATIENT_CARD_HEIGHT));
        assert_eq!(app.selected_patient().id, 1);
    }
}
