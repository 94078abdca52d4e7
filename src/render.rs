//! Terminal rendering for calendar views.
//!
//! Extension traits that add colored output to sharecal-core types using
//! owo_colors.

use chrono::{Datelike, NaiveDate, TimeZone};
use owo_colors::OwoColorize;
use sharecal_core::Event;
use sharecal_core::datetime::to_local;
use sharecal_core::grid::{MonthGrid, events_for_day};

const WEEKDAY_HEADER: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Short id shown in listings; any unique prefix is accepted back
const SHORT_ID_LEN: usize = 8;

pub trait Render {
    fn render(&self) -> String;
}

/// One line per event: time, title, length and short id
pub fn render_event_line<Tz: TimeZone>(event: &Event, tz: &Tz) -> String {
    let start = to_local(event.start, tz);
    let end = to_local(event.end(), tz);

    let mut line = format!(
        "  {}-{} {} {}",
        start.format("%H:%M"),
        end.format("%H:%M"),
        event.render(),
        format!("[{}]", short_id(&event.id)).dimmed()
    );

    if !event.attendees.is_empty() {
        line.push_str(&format!("\n        {}", event.attendees.join(", ").dimmed()));
    }
    if let Some(desc) = &event.description {
        line.push_str(&format!("\n        {}", desc.italic()));
    }
    line
}

impl Render for Event {
    fn render(&self) -> String {
        self.title.bold().to_string()
    }
}

pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Month grid: 6 rows of 7 days, Sunday first.
///
/// Days outside the month are dimmed, today is highlighted and days with
/// events carry a count.
pub fn render_month<Tz: TimeZone>(
    grid: &MonthGrid,
    events: &[Event],
    tz: &Tz,
    today: NaiveDate,
) -> String {
    let mut lines = Vec::new();

    let title = grid.reference.format("%B %Y").to_string();
    lines.push(format!("{:^35}", title).bold().to_string());
    lines.push(
        WEEKDAY_HEADER
            .iter()
            .map(|d| format!("{:<5}", d))
            .collect::<String>()
            .dimmed()
            .to_string(),
    );

    for week in grid.weeks() {
        let mut row = String::new();
        for &day in week {
            row.push_str(&render_cell(grid, day, events, tz, today));
        }
        lines.push(row.trim_end().to_string());
    }

    lines.join("\n")
}

fn render_cell<Tz: TimeZone>(
    grid: &MonthGrid,
    day: NaiveDate,
    events: &[Event],
    tz: &Tz,
    today: NaiveDate,
) -> String {
    let count = events_for_day(day, events, tz).len();
    let number = format!("{:>2}", day.day());
    let marker = match count {
        0 => "   ".to_string(),
        n if n < 10 => format!("+{} ", n),
        _ => "+9 ".to_string(),
    };

    let number = if day == today {
        number.reversed().to_string()
    } else if !grid.in_month(day) {
        number.dimmed().to_string()
    } else {
        number
    };

    format!("{}{}", number, marker.cyan())
}
