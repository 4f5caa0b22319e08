// Demo data: fill a month with sample events to showcase the calendar
//
// Generation is deterministic per month so the overflow behavior is
// reproducible: resize the terminal and the same busy days overflow the
// same way. Busier days near mid-month exercise the "+N more" summary.

use crate::events::{Event, EventColor, EventKind};
use chrono::{Datelike, NaiveDate, NaiveTime};

const NAMES: [&str; 12] = [
    "Standup",
    "Design review",
    "Lunch with Sam",
    "Gym",
    "Dentist",
    "1:1 with Ada",
    "Groceries",
    "Release planning",
    "Book club",
    "Laundry day",
    "Team offsite",
    "Quarterly report due",
];

const COLORS: [EventColor; 3] = [EventColor::Blue, EventColor::Red, EventColor::Green];

/// Tiny deterministic generator; good enough for sample data.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n.max(1)
    }
}

/// Generate sample events for `month`'s page, ids starting at 0.
pub fn month_of_events(month: NaiveDate) -> Vec<Event> {
    let first = month.with_day(1).unwrap_or(month);
    let days = crate::calendar::end_of_month(first).day();

    // Seed from year and month so every visit to a month looks the same.
    let mut rng = Lcg((first.year() as u64) << 8 | u64::from(first.month()));
    let mut events = Vec::new();
    let mut id = 0;

    for day in 1..=days {
        let Some(date) = first.with_day(day) else {
            continue;
        };

        // 0-2 events most days; mid-month days get up to 5 so at least a
        // few cells overflow on typical terminal sizes.
        let busy = (12..=18).contains(&day);
        let count = if busy {
            2 + rng.below(4)
        } else {
            rng.below(3)
        };

        for _ in 0..count {
            let name = NAMES[rng.below(NAMES.len() as u64) as usize].to_string();
            let color = COLORS[rng.below(COLORS.len() as u64) as usize];
            let kind = if rng.below(4) == 0 {
                EventKind::AllDay
            } else {
                let hour = 7 + rng.below(12) as u32;
                let minute = [0, 15, 30, 45][rng.below(4) as usize];
                let start = NaiveTime::from_hms_opt(hour, minute, 0)
                    .unwrap_or(NaiveTime::MIN);
                let end = NaiveTime::from_hms_opt((hour + 1).min(23), minute, 0)
                    .unwrap_or(NaiveTime::MIN);
                EventKind::Timed { start, end }
            };

            events.push(Event {
                id,
                name,
                date,
                color,
                kind,
            });
            id += 1;
        }
    }

    tracing::info!(count = events.len(), month = %first, "generated demo events");
    events
}
