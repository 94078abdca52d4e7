use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::Utc;
use owo_colors::OwoColorize;
use sharecal_core::constants::{EXPORT_FILENAME, EXPORT_MIME_TYPE};
use sharecal_core::ics::export_calendar_document;

use crate::context::Context;

pub fn run(ctx: &Context, out: Option<PathBuf>) -> Result<()> {
    let dir = out.unwrap_or_else(|| PathBuf::from("."));
    let path = dir.join(EXPORT_FILENAME);

    let document = export_calendar_document(ctx.store.events(), Utc::now());
    std::fs::write(&path, document)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "{}",
        format!(
            "  Exported {} events to {} ({})",
            ctx.store.events().len(),
            path.display(),
            EXPORT_MIME_TYPE
        )
        .green()
    );

    Ok(())
}
