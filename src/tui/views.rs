// Drawing for the TUI
//
// One draw function composes the frame from App state: title bar, the
// month grid, a status line, and whatever modal is open on top. Modals
// render over a cleared centered rect.

use crate::tui::app::App;
use crate::tui::modal::{EventForm, FormField, Modal};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draw the whole frame.
pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    if app.use_theme_background {
        f.render_widget(
            Block::default().style(Style::default().bg(app.theme.background)),
            area,
        );
    }

    let [title_area, calendar_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    draw_title(f, app, title_area);
    let theme = app.theme.clone();
    app.calendar
        .render(f, calendar_area, &app.store, &theme, app.today);
    draw_status(f, app, status_area);

    match &app.modal {
        Some(Modal::Help) => draw_help(f, app, area),
        Some(Modal::Logs) => draw_logs(f, app, area),
        Some(Modal::EventForm(form)) => {
            let form = form.clone();
            draw_event_form(f, app, area, &form);
        }
        None => {}
    }
}

fn draw_title(f: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " almanac ",
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.calendar.month_title(), Style::default().fg(app.theme.foreground)),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status {
        Some(message) => Line::styled(
            format!(" {}", message),
            Style::default().fg(app.theme.status_bar),
        ),
        None => Line::styled(
            " q quit  ?  help  t today  [/] month  Enter add  e edit  L logs",
            Style::default().fg(app.theme.past_day),
        ),
    };
    f.render_widget(Paragraph::new(line), area);
}

/// Centered rect sized as a percentage of the frame.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, vertical, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, horizontal, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(vertical);
    horizontal
}

fn modal_block(app: &App, title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
        .style(Style::default().bg(app.theme.background))
}

fn draw_help(f: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect(50, 60, area);
    f.render_widget(Clear, popup);

    let key = Style::default()
        .fg(app.theme.highlight)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(app.theme.foreground);
    let row = |k: &str, desc: &str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", k), key),
            Span::styled(desc.to_string(), text),
        ])
    };

    let lines = vec![
        Line::raw(""),
        row("←↓↑→ hjkl", "move selection"),
        row("PgUp / [", "previous month"),
        row("PgDn / ]", "next month"),
        row("t", "jump to today"),
        Line::raw(""),
        row("Enter / a", "add event on selected day"),
        row("e", "edit first event of the day"),
        Line::raw(""),
        row("L", "show recent logs"),
        row("?", "this help"),
        row("q", "quit"),
    ];

    f.render_widget(
        Paragraph::new(lines).block(modal_block(app, "Help")),
        popup,
    );
}

fn draw_logs(f: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let visible = popup.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.recent(visible);

    let lines: Vec<Line> = if entries.is_empty() {
        vec![Line::styled(
            "  no log entries yet",
            Style::default().fg(app.theme.past_day),
        )]
    } else {
        entries
            .iter()
            .map(|e| Line::styled(e.display(), Style::default().fg(app.theme.foreground)))
            .collect()
    };

    f.render_widget(
        Paragraph::new(lines).block(modal_block(app, "Logs")),
        popup,
    );
}

fn draw_event_form(f: &mut Frame, app: &App, area: Rect, form: &EventForm) {
    let popup = centered_rect(50, 50, area);
    f.render_widget(Clear, popup);

    let focused = Style::default()
        .fg(app.theme.highlight)
        .add_modifier(Modifier::BOLD);
    let normal = Style::default().fg(app.theme.foreground);
    let dimmed = Style::default().fg(app.theme.past_day);

    let label = |field: FormField, name: &str| {
        let style = if form.focus == field { focused } else { normal };
        Span::styled(format!("  {:<8}", name), style)
    };

    let marker = |field: FormField| {
        if form.focus == field {
            "▸ "
        } else {
            "  "
        }
    };

    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw(marker(FormField::Name)),
            label(FormField::Name, "Name"),
            Span::styled(form.name.clone(), normal),
            Span::styled(
                if form.focus == FormField::Name { "▏" } else { "" },
                focused,
            ),
        ]),
        Line::from(vec![
            Span::raw(marker(FormField::AllDay)),
            label(FormField::AllDay, "All-day"),
            Span::styled(if form.all_day { "[x]" } else { "[ ]" }, normal),
        ]),
    ];

    if form.all_day {
        lines.push(Line::styled("    (times hidden)", dimmed));
    } else {
        lines.push(Line::from(vec![
            Span::raw(marker(FormField::Start)),
            label(FormField::Start, "Start"),
            Span::styled(form.start.format("%H:%M").to_string(), normal),
        ]));
        lines.push(Line::from(vec![
            Span::raw(marker(FormField::End)),
            label(FormField::End, "End"),
            Span::styled(form.end.format("%H:%M").to_string(), normal),
        ]));
    }

    lines.push(Line::from(vec![
        Span::raw(marker(FormField::Color)),
        label(FormField::Color, "Color"),
        Span::styled(
            format!("◀ {} ▶", form.color.name()),
            Style::default().fg(event_accent(app, form)),
        ),
    ]));

    lines.push(Line::raw(""));
    if let Some(error) = form.error {
        lines.push(Line::styled(
            format!("  {}", error),
            Style::default().fg(app.theme.event_red),
        ));
    } else {
        let hint = if form.editing.is_some() {
            "  Enter save   Del delete   Esc cancel"
        } else {
            "  Enter save   Esc cancel"
        };
        lines.push(Line::styled(hint, dimmed));
    }

    let title = match form.editing {
        Some(_) => format!("Edit event · {}", form.date.format("%b %-d")),
        None => format!("New event · {}", form.date.format("%b %-d")),
    };
    f.render_widget(
        Paragraph::new(lines).block(modal_block(app, &title)),
        popup,
    );
}

fn event_accent(app: &App, form: &EventForm) -> ratatui::style::Color {
    use crate::events::EventColor;
    match form.color {
        EventColor::Blue => app.theme.event_blue,
        EventColor::Red => app.theme.event_red,
        EventColor::Green => app.theme.event_green,
    }
}
