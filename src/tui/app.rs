// Application state and input handling
//
// App owns the event store, the calendar view, and the modal stack (one
// deep). Keyboard input is routed in layers: an open modal consumes keys
// first, then global bindings, then the calendar view.

use crate::calendar::CalendarView;
use crate::events::EventStore;
use crate::logging::LogBuffer;
use crate::theme::Theme;
use crate::tui::modal::{Modal, ModalAction};
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};

/// Top-level application state.
pub struct App {
    pub store: EventStore,
    pub calendar: CalendarView,
    pub modal: Option<Modal>,
    pub theme: Theme,
    pub use_theme_background: bool,
    pub log_buffer: LogBuffer,
    pub should_quit: bool,
    /// Transient message shown in the status bar until the next action.
    pub status: Option<String>,
    pub today: NaiveDate,
}

impl App {
    pub fn new(
        store: EventStore,
        theme: Theme,
        use_theme_background: bool,
        week_start: chrono::Weekday,
        log_buffer: LogBuffer,
        today: NaiveDate,
    ) -> Self {
        Self {
            store,
            calendar: CalendarView::new(today, week_start),
            modal: None,
            theme,
            use_theme_background,
            log_buffer,
            should_quit: false,
            status: None,
            today,
        }
    }

    /// Route a key press: modal first, then global bindings, then the
    /// calendar view.
    pub fn on_key(&mut self, key: KeyEvent) {
        self.status = None;

        if self.modal.is_some() {
            self.handle_modal_key(key.code);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.modal = Some(Modal::help()),
            KeyCode::Char('L') => self.modal = Some(Modal::logs()),
            _ => self.handle_calendar_key(key.code),
        }
    }

    fn handle_modal_key(&mut self, key: KeyCode) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };
        match modal.handle_input(key) {
            ModalAction::None => {}
            ModalAction::Close => self.modal = None,
            ModalAction::Submit { editing, draft } => {
                let name = draft.name.clone();
                match editing {
                    Some(id) => {
                        if self.store.update(id, draft) {
                            self.status = Some(format!("Updated \"{}\"", name));
                        } else {
                            tracing::warn!(id, "update for unknown event id");
                            self.status = Some("Event no longer exists".to_string());
                        }
                    }
                    None => {
                        self.store.add(draft);
                        self.status = Some(format!("Added \"{}\"", name));
                    }
                }
                self.modal = None;
            }
            ModalAction::Delete(id) => {
                if self.store.remove(id) {
                    self.status = Some("Event deleted".to_string());
                }
                self.modal = None;
            }
        }
    }

    fn handle_calendar_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Left | KeyCode::Char('h') => self.calendar.move_cursor(-1),
            KeyCode::Right | KeyCode::Char('l') => self.calendar.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.calendar.move_cursor(-7),
            KeyCode::Down | KeyCode::Char('j') => self.calendar.move_cursor(7),
            KeyCode::PageUp | KeyCode::Char('[') => self.calendar.prev_month(),
            KeyCode::PageDown | KeyCode::Char(']') => self.calendar.next_month(),
            KeyCode::Char('t') => self.calendar.go_today(self.today),
            KeyCode::Enter | KeyCode::Char('a') => {
                self.modal = Some(Modal::add_event(self.calendar.cursor()));
            }
            KeyCode::Char('e') => self.edit_selected(),
            _ => {}
        }
    }

    /// Open the edit form for the first event on the selected day.
    fn edit_selected(&mut self) {
        let date = self.calendar.cursor();
        match self.store.events_on(date).first() {
            Some(event) => self.modal = Some(Modal::edit_event(event)),
            None => self.status = Some("No events on this day".to_string()),
        }
    }

    /// Terminal resized: wake every day cell so geometry is re-measured on
    /// the next draw.
    pub fn on_resize(&mut self) {
        self.calendar.schedule_all();
        tracing::trace!("resize scheduled remeasure for all day cells");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventColor, EventDraft, EventKind};
    use crossterm::event::KeyModifiers;

    fn app() -> App {
        App::new(
            EventStore::new(),
            Theme::auto(),
            false,
            chrono::Weekday::Sun,
            LogBuffer::new(),
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn q_quits_only_without_modal() {
        let mut app = app();
        app.modal = Some(Modal::add_event(app.today));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit, "form consumed the q as text input");

        app.modal = None;
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn arrows_move_the_cursor() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.calendar.cursor(), NaiveDate::from_ymd_opt(2026, 3, 16).unwrap());
        press(&mut app, KeyCode::Down);
        assert_eq!(app.calendar.cursor(), NaiveDate::from_ymd_opt(2026, 3, 23).unwrap());
    }

    #[test]
    fn submit_from_form_adds_an_event() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert!(app.modal.is_some());

        for c in "Gym".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert!(app.modal.is_none());
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.events_on(app.today)[0].name, "Gym");
        assert!(app.status.as_deref().unwrap_or("").contains("Added"));
    }

    #[test]
    fn edit_with_no_events_sets_status() {
        let mut app = app();
        press(&mut app, KeyCode::Char('e'));
        assert!(app.modal.is_none());
        assert_eq!(app.status.as_deref(), Some("No events on this day"));
    }

    #[test]
    fn delete_from_edit_form_removes_event() {
        let mut app = app();
        let id = app.store.add(EventDraft {
            name: "Dentist".to_string(),
            date: app.today,
            color: EventColor::Red,
            kind: EventKind::AllDay,
        });

        press(&mut app, KeyCode::Char('e'));
        assert!(app.modal.is_some());
        press(&mut app, KeyCode::Delete);

        assert!(app.modal.is_none());
        assert!(app.store.get(id).is_none());
    }

    #[test]
    fn help_toggles() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(matches!(app.modal, Some(Modal::Help)));
        press(&mut app, KeyCode::Esc);
        assert!(app.modal.is_none());
    }
}
