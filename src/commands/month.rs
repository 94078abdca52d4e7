use anyhow::Result;
use owo_colors::OwoColorize;
use sharecal_core::grid::{build_month_grid, events_for_day};
use sharecal_core::store::Action;

use crate::context::{Context, parse_date_arg};
use crate::render::{render_event_line, render_month};

pub fn run(ctx: &mut Context, date: Option<String>, prev: u32, next: u32) -> Result<()> {
    let reference = parse_date_arg(date.as_deref(), ctx.today)?;
    ctx.store.dispatch(Action::GoTo(reference))?;

    for _ in 0..prev {
        ctx.store.dispatch(Action::PrevMonth)?;
    }
    for _ in 0..next {
        ctx.store.dispatch(Action::NextMonth)?;
    }

    let grid = build_month_grid(ctx.store.state().reference);
    let events = ctx.store.events();
    let tz = ctx.tz();

    println!("{}", render_month(&grid, events, tz, ctx.today));

    let mut any = false;
    for &day in grid.days.iter().filter(|d| grid.in_month(**d)) {
        let todays = events_for_day(day, events, tz);
        if todays.is_empty() {
            continue;
        }

        println!();
        println!("{}", day.format("%a %b %-d").bold());
        for event in todays {
            println!("{}", render_event_line(event, tz));
        }
        any = true;
    }

    if !any {
        println!();
        println!("{}", "No events this month".dimmed());
    }

    Ok(())
}
