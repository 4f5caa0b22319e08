// Calendar event model
//
// Events are plain values held in an in-memory store. Persistence is out of
// scope; the store exists so the TUI and the demo generator share one
// ordered collection with per-day lookup.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Accent color for an event, the palette the form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    #[default]
    Blue,
    Red,
    Green,
}

impl EventColor {
    /// Cycle to the next palette entry (form color picker).
    pub fn next(self) -> Self {
        match self {
            EventColor::Blue => EventColor::Red,
            EventColor::Red => EventColor::Green,
            EventColor::Green => EventColor::Blue,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            EventColor::Blue => EventColor::Green,
            EventColor::Red => EventColor::Blue,
            EventColor::Green => EventColor::Red,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EventColor::Blue => "blue",
            EventColor::Red => "red",
            EventColor::Green => "green",
        }
    }
}

/// All-day banner or a timed slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EventKind {
    AllDay,
    Timed { start: NaiveTime, end: NaiveTime },
}

/// One calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub name: String,
    pub date: NaiveDate,
    pub color: EventColor,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    /// Start time used for intra-day ordering; all-day events sort first.
    fn sort_key(&self) -> (u8, NaiveTime) {
        match self.kind {
            EventKind::AllDay => (0, NaiveTime::MIN),
            EventKind::Timed { start, .. } => (1, start),
        }
    }
}

/// Fields the form produces; the store assigns the id.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub name: String,
    pub date: NaiveDate,
    pub color: EventColor,
    pub kind: EventKind,
}

/// In-memory ordered event collection.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
    next_id: u64,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store from pre-built events (demo data, `--events` file).
    /// Ids continue above the highest seeded id.
    pub fn from_events(events: Vec<Event>) -> Self {
        let next_id = events.iter().map(|e| e.id + 1).max().unwrap_or(0);
        Self { events, next_id }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Insert a new event, returning its assigned id.
    pub fn add(&mut self, draft: EventDraft) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.events.push(Event {
            id,
            name: draft.name,
            date: draft.date,
            color: draft.color,
            kind: draft.kind,
        });
        tracing::debug!(id, "event added");
        id
    }

    /// Replace an existing event's fields, keeping its id.
    /// Returns false when the id is unknown.
    pub fn update(&mut self, id: u64, draft: EventDraft) -> bool {
        match self.events.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                event.name = draft.name;
                event.date = draft.date;
                event.color = draft.color;
                event.kind = draft.kind;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        self.events.len() != before
    }

    pub fn get(&self, id: u64) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events on one day, all-day first, then by start time.
    /// This is the display order the overflow container receives.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        let mut on_day: Vec<&Event> = self.events.iter().filter(|e| e.date == date).collect();
        on_day.sort_by_key(|e| e.sort_key());
        on_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn draft(name: &str, d: NaiveDate, kind: EventKind) -> EventDraft {
        EventDraft {
            name: name.to_string(),
            date: d,
            color: EventColor::Blue,
            kind,
        }
    }

    #[test]
    fn add_assigns_increasing_ids() {
        let mut store = EventStore::new();
        let d = date(2026, 3, 10);
        let a = store.add(draft("a", d, EventKind::AllDay));
        let b = store.add(draft("b", d, EventKind::AllDay));
        assert!(b > a);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn events_on_sorts_all_day_first_then_by_start() {
        let mut store = EventStore::new();
        let d = date(2026, 3, 10);
        store.add(draft(
            "noon",
            d,
            EventKind::Timed {
                start: time(12, 0),
                end: time(13, 0),
            },
        ));
        store.add(draft("banner", d, EventKind::AllDay));
        store.add(draft(
            "early",
            d,
            EventKind::Timed {
                start: time(7, 0),
                end: time(8, 0),
            },
        ));

        let names: Vec<&str> = store.events_on(d).iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["banner", "early", "noon"]);
    }

    #[test]
    fn update_and_remove_by_id() {
        let mut store = EventStore::new();
        let d = date(2026, 3, 10);
        let id = store.add(draft("old", d, EventKind::AllDay));

        assert!(store.update(id, draft("new", d, EventKind::AllDay)));
        assert_eq!(store.get(id).unwrap().name, "new");

        assert!(store.remove(id));
        assert!(!store.remove(id));
        assert!(store.get(id).is_none());
    }

    #[test]
    fn seeded_store_continues_ids_above_seed() {
        let d = date(2026, 3, 10);
        let seeded = vec![Event {
            id: 41,
            name: "seed".to_string(),
            date: d,
            color: EventColor::Green,
            kind: EventKind::AllDay,
        }];
        let mut store = EventStore::from_events(seeded);
        let id = store.add(draft("fresh", d, EventKind::AllDay));
        assert_eq!(id, 42);
    }

    #[test]
    fn event_json_roundtrip() {
        let event = Event {
            id: 7,
            name: "Dentist".to_string(),
            date: date(2026, 3, 12),
            color: EventColor::Red,
            kind: EventKind::Timed {
                start: time(9, 30),
                end: time(10, 15),
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
