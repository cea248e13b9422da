//! Event handling for the dashboard.

use crate::app::App;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Handle keyboard events.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Left | KeyCode::Char('h') => app.adjust_horizon(-1),
        KeyCode::Right | KeyCode::Char('l') => app.adjust_horizon(1),
        KeyCode::Down | KeyCode::Char('j') => app.adjust_horizon(-10),
        KeyCode::Up | KeyCode::Char('k') => app.adjust_horizon(10),
        KeyCode::Char('e') => app.export(),
        KeyCode::Char('r') => {
            app.refresh();
            app.set_status("Forecast refreshed");
        }
        _ => {}
    }
}

/// Poll for events with a timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::sample_app;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys_move_horizon() {
        let (mut app, _dir) = sample_app(30);
        handle_key_event(&mut app, press(KeyCode::Right));
        assert_eq!(app.horizon.days(), 31);
        handle_key_event(&mut app, press(KeyCode::Down));
        assert_eq!(app.horizon.days(), 21);
        handle_key_event(&mut app, press(KeyCode::Left));
        assert_eq!(app.horizon.days(), 20);
        assert_eq!(app.report.as_ref().unwrap().predictions.len(), 20);
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _dir) = sample_app(5);
        handle_key_event(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit);

        let (mut app, _dir) = sample_app(5);
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_export_key() {
        let (mut app, _dir) = sample_app(4);
        handle_key_event(&mut app, press(KeyCode::Char('e')));
        assert!(app.export_path.exists());
    }
}
