// Month calendar grid
//
// Computes the visible day range for a month (whole weeks, so leading and
// trailing out-of-month days are included), renders the 7-column grid, and
// feeds each day cell's event list through the overflow engine. Every cell
// owns one `OverflowList` keyed by date; cells that leave the grid on month
// change release their observation before being dropped.

use crate::events::{Event, EventColor, EventKind, EventStore};
use crate::overflow::OverflowList;
use crate::theme::Theme;
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};
use std::collections::HashMap;
use unicode_width::UnicodeWidthStr;

/// Days from `week_start` to `date`'s weekday, 0..=6.
fn days_into_week(date: NaiveDate, week_start: Weekday) -> u64 {
    let day = date.weekday().num_days_from_monday();
    let start = week_start.num_days_from_monday();
    u64::from((7 + day - start) % 7)
}

/// First day of the week containing `date`.
pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    date - Days::new(days_into_week(date, week_start))
}

/// Last day of `date`'s month.
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    first + Months::new(1) - Days::new(1)
}

/// Every day shown for `month`'s page: from the start of the week containing
/// the 1st through the end of the week containing the last day. Always a
/// multiple of seven, in display order.
pub fn month_grid(month: NaiveDate, week_start: Weekday) -> Vec<NaiveDate> {
    let first = month.with_day(1).unwrap_or(month);
    let start = start_of_week(first, week_start);
    let end = start_of_week(end_of_month(first), week_start) + Days::new(6);

    let mut days = Vec::new();
    let mut day = start;
    while day <= end {
        days.push(day);
        day = day + Days::new(1);
    }
    days
}

/// Truncate to a display width, appending nothing (cells are tight).
fn fit_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        let mut candidate = out.clone();
        candidate.push(ch);
        if candidate.width() > width.saturating_sub(1) {
            out.push('…');
            return out;
        }
        out = candidate;
    }
    out
}

/// Short "7am" / "12:30pm" label for event lines.
fn time_label(time: chrono::NaiveTime) -> String {
    use chrono::Timelike;
    let (pm, hour12) = time.hour12();
    let suffix = if pm { "pm" } else { "am" };
    if time.minute() == 0 {
        format!("{}{}", hour12, suffix)
    } else {
        format!("{}:{:02}{}", hour12, time.minute(), suffix)
    }
}

/// The month view: cursor, displayed month, and per-day overflow state.
pub struct CalendarView {
    /// First day of the displayed month.
    month: NaiveDate,
    /// Currently selected day.
    cursor: NaiveDate,
    week_start: Weekday,
    /// One overflow container per visible day cell, keyed by date.
    cells: HashMap<NaiveDate, OverflowList<u64>>,
}

impl CalendarView {
    pub fn new(today: NaiveDate, week_start: Weekday) -> Self {
        Self {
            month: today.with_day(1).unwrap_or(today),
            cursor: today,
            week_start,
            cells: HashMap::new(),
        }
    }

    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    /// "March 2026" for the title bar.
    pub fn month_title(&self) -> String {
        self.month.format("%B %Y").to_string()
    }

    /// Switch the displayed month, releasing overflow state for day cells
    /// that are no longer on the page.
    fn set_month(&mut self, month: NaiveDate) {
        let month = month.with_day(1).unwrap_or(month);
        if month == self.month {
            return;
        }
        self.month = month;

        let visible: Vec<NaiveDate> = month_grid(self.month, self.week_start);
        let stale: Vec<NaiveDate> = self
            .cells
            .keys()
            .filter(|d| !visible.contains(d))
            .copied()
            .collect();
        for date in stale {
            if let Some(mut cell) = self.cells.remove(&date) {
                cell.release();
            }
        }
        tracing::debug!(month = %self.month, "calendar page changed");
    }

    pub fn next_month(&mut self) {
        self.set_month(self.month + Months::new(1));
        self.cursor = self.month;
    }

    pub fn prev_month(&mut self) {
        self.set_month(self.month - Months::new(1));
        self.cursor = self.month;
    }

    pub fn go_today(&mut self, today: NaiveDate) {
        self.set_month(today.with_day(1).unwrap_or(today));
        self.cursor = today;
    }

    /// Move the selection by whole days; follows into adjacent months.
    pub fn move_cursor(&mut self, days: i64) {
        let moved = if days >= 0 {
            self.cursor + Days::new(days as u64)
        } else {
            self.cursor - Days::new((-days) as u64)
        };
        self.cursor = moved;
        if moved.with_day(1) != self.month.with_day(1) {
            self.set_month(moved);
        }
    }

    /// Terminal resized: wake every live cell's measurement driver. The
    /// triggers coalesce into at most one pass per cell on the next draw.
    pub fn schedule_all(&mut self) {
        for cell in self.cells.values_mut() {
            cell.schedule();
        }
    }

    /// Render the weekday header and the day grid.
    pub fn render(
        &mut self,
        f: &mut Frame,
        area: Rect,
        store: &EventStore,
        theme: &Theme,
        today: NaiveDate,
    ) {
        if area.height < 2 || area.width < 7 {
            return;
        }

        let days = month_grid(self.month, self.week_start);
        let weeks = days.len() / 7;

        let [header_area, grid_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

        let columns: [Constraint; 7] = [Constraint::Ratio(1, 7); 7];
        let header_cols = Layout::horizontal(columns).split(header_area);
        for (col, slot) in header_cols.iter().enumerate() {
            let date = days[col];
            let name = date.format("%a").to_string();
            let line = Line::styled(
                fit_width(&name, slot.width as usize),
                Style::default().fg(theme.weekday_header),
            );
            f.render_widget(ratatui::widgets::Paragraph::new(line), *slot);
        }

        let row_constraints: Vec<Constraint> = (0..weeks)
            .map(|_| Constraint::Ratio(1, weeks as u32))
            .collect();
        let rows = Layout::vertical(row_constraints).split(grid_area);

        for (week, row) in rows.iter().enumerate() {
            let cols = Layout::horizontal(columns).split(*row);
            for (col, cell_area) in cols.iter().enumerate() {
                let date = days[week * 7 + col];
                self.render_day_cell(f, *cell_area, date, store, theme, today);
            }
        }
    }

    /// One day cell: header line, event list through the overflow engine,
    /// summary line.
    fn render_day_cell(
        &mut self,
        f: &mut Frame,
        area: Rect,
        date: NaiveDate,
        store: &EventStore,
        theme: &Theme,
        today: NaiveDate,
    ) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let in_month = date.month() == self.month.month() && date.year() == self.month.year();
        let is_past = date < today;
        let selected = date == self.cursor;

        let day_fg = if !in_month {
            theme.non_month_day
        } else if is_past {
            theme.past_day
        } else {
            theme.foreground
        };

        let mut number_style = Style::default().fg(day_fg);
        if date == today {
            number_style = Style::default()
                .fg(theme.today)
                .add_modifier(Modifier::BOLD);
        }
        if selected {
            number_style = number_style.add_modifier(Modifier::REVERSED);
        }

        let header = Line::from(vec![Span::styled(format!("{:>2}", date.day()), number_style)]);
        f.render_widget(
            ratatui::widgets::Paragraph::new(header),
            Rect::new(area.x, area.y, area.width, 1),
        );

        // Container bound is whatever rows remain after the header and the
        // always-reserved summary line; the summary renders in its own
        // sibling region and never counts against the bound.
        let body = Rect::new(
            area.x,
            area.y + 1,
            area.width,
            area.height.saturating_sub(2),
        );
        let summary_area = if area.height >= 2 {
            Rect::new(area.x, area.bottom() - 1, area.width, 1)
        } else {
            Rect::new(area.x, area.y, area.width, 0)
        };

        let events = store.events_on(date);
        let width = area.width as usize;
        let dim = !in_month;

        let cell = self.cells.entry(date).or_default();
        cell.render(
            f,
            body,
            summary_area,
            &events,
            |e| e.id,
            |e| event_text(e, theme, width, dim),
            |count| {
                if count == 0 {
                    Line::raw("")
                } else {
                    Line::styled(
                        fit_width(&format!("+{} more", count), width),
                        Style::default().fg(theme.overflow_summary),
                    )
                }
            },
            Style::default(),
        );
    }
}

/// Visual for one event inside a day cell: all-day events render as a solid
/// color bar, timed events as a colored dot plus time and name.
fn event_text(event: &&Event, theme: &Theme, width: usize, dim: bool) -> Text<'static> {
    let accent = match event.color {
        EventColor::Blue => theme.event_blue,
        EventColor::Red => theme.event_red,
        EventColor::Green => theme.event_green,
    };

    let line = match event.kind {
        EventKind::AllDay => {
            let mut style = Style::default().fg(theme.background).bg(accent);
            if dim {
                style = style.add_modifier(Modifier::DIM);
            }
            Line::styled(fit_width(&event.name, width), style)
        }
        EventKind::Timed { start, .. } => {
            let label = format!("{} {}", time_label(start), event.name);
            let mut name_style = Style::default().fg(theme.foreground);
            if dim {
                name_style = name_style.add_modifier(Modifier::DIM);
            }
            Line::from(vec![
                Span::styled("•", Style::default().fg(accent)),
                Span::styled(fit_width(&label, width.saturating_sub(1)), name_style),
            ])
        }
    };
    Text::from(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grid_covers_whole_weeks() {
        // March 2026 starts on a Sunday and ends on a Tuesday.
        let days = month_grid(date(2026, 3, 1), Weekday::Sun);
        assert_eq!(days.len() % 7, 0);
        assert_eq!(days.first().copied(), Some(date(2026, 3, 1)));
        assert_eq!(days.last().copied(), Some(date(2026, 4, 4)));
    }

    #[test]
    fn grid_includes_leading_out_month_days() {
        // May 2026 starts on a Friday: the page starts in April.
        let days = month_grid(date(2026, 5, 15), Weekday::Sun);
        assert_eq!(days.first().copied(), Some(date(2026, 4, 26)));
        assert!(days.contains(&date(2026, 5, 31)));
    }

    #[test]
    fn week_start_monday_shifts_page() {
        let days = month_grid(date(2026, 3, 1), Weekday::Mon);
        // With Monday weeks, March 1st (a Sunday) is the tail of February's
        // last week.
        assert_eq!(days.first().copied(), Some(date(2026, 2, 23)));
    }

    #[test]
    fn end_of_month_handles_lengths() {
        assert_eq!(end_of_month(date(2026, 2, 10)), date(2026, 2, 28));
        assert_eq!(end_of_month(date(2028, 2, 10)), date(2028, 2, 29));
        assert_eq!(end_of_month(date(2026, 12, 31)), date(2026, 12, 31));
    }

    #[test]
    fn cursor_follows_into_adjacent_month() {
        let mut view = CalendarView::new(date(2026, 3, 31), Weekday::Sun);
        view.move_cursor(1);
        assert_eq!(view.cursor(), date(2026, 4, 1));
        assert_eq!(view.month(), date(2026, 4, 1));
    }

    #[test]
    fn month_change_releases_stale_cells() {
        let mut view = CalendarView::new(date(2026, 3, 15), Weekday::Sun);
        // Fabricate a live cell on the March page.
        view.cells.entry(date(2026, 3, 2)).or_default();
        // And one that also appears on the April page (shared week).
        view.cells.entry(date(2026, 4, 1)).or_default();

        view.next_month();

        assert!(!view.cells.contains_key(&date(2026, 3, 2)));
        assert!(view.cells.contains_key(&date(2026, 4, 1)));
    }

    #[test]
    fn fit_width_truncates_with_ellipsis() {
        assert_eq!(fit_width("short", 10), "short");
        assert_eq!(fit_width("a very long event name", 8), "a very …");
    }

    #[test]
    fn time_labels_are_compact() {
        let t = |h, m| chrono::NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert_eq!(time_label(t(7, 0)), "7am");
        assert_eq!(time_label(t(12, 30)), "12:30pm");
        assert_eq!(time_label(t(0, 0)), "12am");
        assert_eq!(time_label(t(15, 5)), "3:05pm");
    }
}
