use std::path::Path;

use anyhow::{Context as _, Result};
use owo_colors::OwoColorize;
use sharecal_core::ics::parse_calendar_document;

use crate::context::Context;

pub fn run(ctx: &mut Context, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let records = parse_calendar_document(&content, ctx.tz())?;
    if records.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    let added = ctx.store.import(records)?;
    println!(
        "{}",
        format!("  Imported {} events from {}", added, file.display()).green()
    );

    Ok(())
}
