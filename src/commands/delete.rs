use anyhow::Result;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::platform::DialogConfirm;

pub fn run(ctx: &mut Context, id: &str, yes: bool) -> Result<()> {
    let event = ctx.resolve_event(id)?;
    let (id, title) = (event.id.clone(), event.title.clone());

    let deleted = if yes {
        ctx.store.request_delete(&id, &|_: &str| true)?
    } else {
        ctx.store.request_delete(&id, &DialogConfirm)?
    };

    if deleted {
        println!("{}", format!("  Deleted: {}", title).red());
    } else {
        println!("{}", "Kept".dimmed());
    }

    Ok(())
}
