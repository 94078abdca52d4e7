use anyhow::Result;
use owo_colors::OwoColorize;
use sharecal_core::store::Action;

use crate::EventFields;
use crate::commands::add::{apply_fields, open_form};
use crate::context::Context;
use crate::render::render_event_line;

pub fn run(ctx: &mut Context, id: &str, fields: EventFields) -> Result<()> {
    let id = ctx.resolve_event(id)?.id.clone();

    ctx.store.dispatch(Action::OpenEdit(id.clone()))?;
    let mut form = open_form(ctx)?;
    let before = form.clone();
    apply_fields(&mut form, fields);

    if form == before {
        ctx.store.dispatch(Action::CloseModal)?;
        println!("{}", "Nothing to change".dimmed());
        return Ok(());
    }

    ctx.store.dispatch(Action::EditForm(form))?;
    if let Err(e) = ctx.store.dispatch(Action::Save) {
        ctx.store.dispatch(Action::CloseModal)?;
        return Err(e.into());
    }

    let event = ctx.resolve_event(&id)?;
    println!("{}", format!("  Updated: {}", event.title).green());
    println!("{}", render_event_line(event, ctx.tz()));

    Ok(())
}
