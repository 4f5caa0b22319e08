// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return
// actions. App just holds Option<Modal>; input routing acts on the
// returned ModalAction. The event form composes a draft and hands it back
// through Submit - it never touches the store or the overflow engine.

use crate::events::{Event, EventColor, EventDraft, EventKind};
use chrono::{Duration, NaiveDate, NaiveTime};
use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    /// Close the modal
    Close,
    /// Form submitted: add (editing = None) or update an event
    Submit {
        editing: Option<u64>,
        draft: EventDraft,
    },
    /// Delete the event being edited
    Delete(u64),
}

/// Available modal types
#[derive(Debug, Clone)]
pub enum Modal {
    /// Help overlay - shows keyboard shortcuts
    Help,
    /// Recent log entries overlay
    Logs,
    /// Add/edit event form
    EventForm(EventForm),
}

impl Modal {
    pub fn help() -> Self {
        Modal::Help
    }

    pub fn logs() -> Self {
        Modal::Logs
    }

    /// Form for a new event on the given day
    pub fn add_event(date: NaiveDate) -> Self {
        Modal::EventForm(EventForm::add(date))
    }

    /// Form pre-filled from an existing event
    pub fn edit_event(event: &Event) -> Self {
        Modal::EventForm(EventForm::edit(event))
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::Logs => match key {
                KeyCode::Esc | KeyCode::Char('L') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::EventForm(form) => form.handle_input(key),
        }
    }
}

/// Which form field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    AllDay,
    Start,
    End,
    Color,
}

/// State of the add/edit event form
#[derive(Debug, Clone)]
pub struct EventForm {
    /// Id of the event being edited; None when adding
    pub editing: Option<u64>,
    pub date: NaiveDate,
    pub name: String,
    pub all_day: bool,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub color: EventColor,
    pub focus: FormField,
    /// Validation message shown until the next keypress
    pub error: Option<&'static str>,
}

impl EventForm {
    pub fn add(date: NaiveDate) -> Self {
        Self {
            editing: None,
            date,
            name: String::new(),
            all_day: false,
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or(NaiveTime::MIN),
            color: EventColor::default(),
            focus: FormField::Name,
            error: None,
        }
    }

    pub fn edit(event: &Event) -> Self {
        let (all_day, start, end) = match event.kind {
            EventKind::AllDay => (
                true,
                NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
                NaiveTime::from_hms_opt(10, 0, 0).unwrap_or(NaiveTime::MIN),
            ),
            EventKind::Timed { start, end } => (false, start, end),
        };
        Self {
            editing: Some(event.id),
            date: event.date,
            name: event.name.clone(),
            all_day,
            start,
            end,
            color: event.color,
            focus: FormField::Name,
            error: None,
        }
    }

    /// Field order; time fields are skipped while all-day is set
    fn next_field(&self, field: FormField) -> FormField {
        match field {
            FormField::Name => FormField::AllDay,
            FormField::AllDay if self.all_day => FormField::Color,
            FormField::AllDay => FormField::Start,
            FormField::Start => FormField::End,
            FormField::End => FormField::Color,
            FormField::Color => FormField::Name,
        }
    }

    fn prev_field(&self, field: FormField) -> FormField {
        match field {
            FormField::Name => FormField::Color,
            FormField::AllDay => FormField::Name,
            FormField::Start => FormField::AllDay,
            FormField::End => FormField::Start,
            FormField::Color if self.all_day => FormField::AllDay,
            FormField::Color => FormField::End,
        }
    }

    fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        self.error = None;

        match key {
            KeyCode::Esc => return ModalAction::Close,
            KeyCode::Enter => return self.submit(),
            KeyCode::Delete => {
                if let Some(id) = self.editing {
                    return ModalAction::Delete(id);
                }
            }
            KeyCode::Tab | KeyCode::Down => self.focus = self.next_field(self.focus),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.prev_field(self.focus),
            _ => self.handle_field_input(key),
        }

        ModalAction::None
    }

    fn handle_field_input(&mut self, key: KeyCode) {
        match (self.focus, key) {
            (FormField::Name, KeyCode::Char(c)) => self.name.push(c),
            (FormField::Name, KeyCode::Backspace) => {
                self.name.pop();
            }
            (FormField::AllDay, KeyCode::Char(' ')) => {
                self.all_day = !self.all_day;
            }
            (FormField::Start, KeyCode::Left) => self.start = shift(self.start, -15),
            (FormField::Start, KeyCode::Right) => self.start = shift(self.start, 15),
            (FormField::End, KeyCode::Left) => self.end = shift(self.end, -15),
            (FormField::End, KeyCode::Right) => self.end = shift(self.end, 15),
            (FormField::Color, KeyCode::Left) => self.color = self.color.prev(),
            (FormField::Color, KeyCode::Right) => self.color = self.color.next(),
            _ => {}
        }
    }

    fn submit(&mut self) -> ModalAction {
        if self.name.trim().is_empty() {
            self.error = Some("Name is required");
            return ModalAction::None;
        }
        if !self.all_day && self.end <= self.start {
            self.error = Some("End time must be after start");
            return ModalAction::None;
        }

        let kind = if self.all_day {
            EventKind::AllDay
        } else {
            EventKind::Timed {
                start: self.start,
                end: self.end,
            }
        };

        ModalAction::Submit {
            editing: self.editing,
            draft: EventDraft {
                name: self.name.trim().to_string(),
                date: self.date,
                color: self.color,
                kind,
            },
        }
    }
}

/// Shift a time by whole minutes, wrapping within the day
fn shift(time: NaiveTime, minutes: i64) -> NaiveTime {
    time.overflowing_add_signed(Duration::minutes(minutes)).0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn type_name(form: &mut EventForm, name: &str) {
        for c in name.chars() {
            form.handle_input(KeyCode::Char(c));
        }
    }

    #[test]
    fn tab_skips_time_fields_when_all_day() {
        let mut form = EventForm::add(date(2026, 3, 10));
        form.handle_input(KeyCode::Tab); // Name -> AllDay
        assert_eq!(form.focus, FormField::AllDay);
        form.handle_input(KeyCode::Char(' ')); // toggle all-day on
        assert!(form.all_day);

        form.handle_input(KeyCode::Tab);
        assert_eq!(form.focus, FormField::Color, "Start/End skipped");

        form.handle_input(KeyCode::BackTab);
        assert_eq!(form.focus, FormField::AllDay);
    }

    #[test]
    fn submit_requires_a_name() {
        let mut form = EventForm::add(date(2026, 3, 10));
        let action = form.handle_input(KeyCode::Enter);
        assert!(matches!(action, ModalAction::None));
        assert!(form.error.is_some());
    }

    #[test]
    fn submit_rejects_inverted_times() {
        let mut form = EventForm::add(date(2026, 3, 10));
        type_name(&mut form, "Gym");
        form.end = form.start; // end == start is invalid for timed events
        let action = form.handle_input(KeyCode::Enter);
        assert!(matches!(action, ModalAction::None));
        assert!(form.error.is_some());
    }

    #[test]
    fn submit_builds_a_draft() {
        let mut form = EventForm::add(date(2026, 3, 10));
        type_name(&mut form, "  Dentist ");
        let action = form.handle_input(KeyCode::Enter);
        match action {
            ModalAction::Submit { editing, draft } => {
                assert_eq!(editing, None);
                assert_eq!(draft.name, "Dentist", "name is trimmed");
                assert_eq!(draft.date, date(2026, 3, 10));
                assert!(matches!(draft.kind, EventKind::Timed { .. }));
            }
            other => panic!("expected Submit, got {:?}", other),
        }
    }

    #[test]
    fn delete_only_when_editing() {
        let mut add_form = EventForm::add(date(2026, 3, 10));
        assert!(matches!(
            add_form.handle_input(KeyCode::Delete),
            ModalAction::None
        ));

        let event = Event {
            id: 3,
            name: "Gym".to_string(),
            date: date(2026, 3, 10),
            color: EventColor::Green,
            kind: EventKind::AllDay,
        };
        let mut edit_form = EventForm::edit(&event);
        assert!(matches!(
            edit_form.handle_input(KeyCode::Delete),
            ModalAction::Delete(3)
        ));
    }

    #[test]
    fn time_shift_wraps_within_day() {
        let midnight = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        let shifted = shift(midnight, -15);
        assert_eq!(shifted, NaiveTime::from_hms_opt(23, 45, 0).unwrap());
    }
}
