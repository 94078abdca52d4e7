use anyhow::Result;
use owo_colors::OwoColorize;
use sharecal_core::grid::events_for_day;

use crate::context::{Context, parse_date_arg};
use crate::render::render_event_line;

pub fn run(ctx: &Context, date: Option<String>) -> Result<()> {
    let day = parse_date_arg(date.as_deref(), ctx.today)?;
    let events = events_for_day(day, ctx.store.events(), ctx.tz());

    let label = match (day - ctx.today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => day.format("%A, %B %-d, %Y").to_string(),
    };
    println!("{}", label.bold());

    if events.is_empty() {
        println!("{}", "  No events".dimmed());
        return Ok(());
    }

    for event in events {
        println!("{}", render_event_line(event, ctx.tz()));
    }

    Ok(())
}
