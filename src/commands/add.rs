use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use dialoguer::Input;
use owo_colors::OwoColorize;
use sharecal_core::form::EventForm;
use sharecal_core::store::Action;

use crate::EventFields;
use crate::context::{Context, parse_date_arg};
use crate::render::{render_event_line, short_id};

pub fn run(ctx: &mut Context, fields: EventFields) -> Result<()> {
    let interactive = fields.title.is_none() || fields.date.is_none();

    let title = match &fields.title {
        Some(t) => t.clone(),
        None => Input::<String>::new()
            .with_prompt("  Title")
            .default(String::new())
            .show_default(false)
            .interact_text()?,
    };

    let date = match fields.date.as_deref() {
        Some(d) => parse_date_arg(Some(d), ctx.today)?,
        None => prompt_date(ctx.today)?,
    };

    ctx.store.dispatch(Action::OpenCreate(date))?;
    let mut form = open_form(ctx)?;
    form.title = title;

    let fields = if interactive {
        prompt_remaining(fields, &form)?
    } else {
        fields
    };
    apply_fields(&mut form, fields);

    ctx.store.dispatch(Action::EditForm(form))?;
    if let Err(e) = ctx.store.dispatch(Action::Save) {
        ctx.store.dispatch(Action::CloseModal)?;
        return Err(e.into());
    }

    let event = ctx
        .store
        .events()
        .last()
        .context("Saved event is missing")?;

    if interactive {
        println!();
    }
    println!(
        "{}",
        format!("  Created: {} ({})", event.title, short_id(&event.id)).green()
    );
    println!("{}", render_event_line(event, ctx.tz()));

    Ok(())
}

/// The form currently open in the store
pub fn open_form(ctx: &Context) -> Result<EventForm> {
    match &ctx.store.state().modal {
        sharecal_core::store::Modal::Open { form, .. } => Ok(form.clone()),
        sharecal_core::store::Modal::Closed => anyhow::bail!("No event form is open"),
    }
}

/// Overwrite the form fields that were given on the command line
pub fn apply_fields(form: &mut EventForm, fields: EventFields) {
    let EventFields {
        title,
        date,
        time,
        duration,
        description,
        attendees,
    } = fields;

    if let Some(v) = title {
        form.title = v;
    }
    if let Some(v) = date {
        form.date = v;
    }
    if let Some(v) = time {
        form.time = v;
    }
    if let Some(v) = duration {
        form.duration = v;
    }
    if let Some(v) = description {
        form.description = v;
    }
    if let Some(v) = attendees {
        form.attendees = v;
    }
}

fn prompt_date(today: NaiveDate) -> Result<NaiveDate> {
    loop {
        let input: String = Input::new()
            .with_prompt("  Date (YYYY-MM-DD)")
            .default(today.format("%Y-%m-%d").to_string())
            .interact_text()?;
        match parse_date_arg(Some(&input), today) {
            Ok(date) => return Ok(date),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

/// Ask for the optional fields not given as flags, offering the form's defaults
fn prompt_remaining(mut fields: EventFields, form: &EventForm) -> Result<EventFields> {
    if fields.time.is_none() {
        fields.time = Some(
            Input::new()
                .with_prompt("  Time")
                .default(form.time.clone())
                .interact_text()?,
        );
    }
    if fields.duration.is_none() {
        fields.duration = Some(
            Input::new()
                .with_prompt("  Minutes")
                .default(form.duration.clone())
                .interact_text()?,
        );
    }
    if fields.description.is_none() {
        fields.description = Some(
            Input::new()
                .with_prompt("  Description (skip)")
                .default(String::new())
                .show_default(false)
                .interact_text()?,
        );
    }
    if fields.attendees.is_none() {
        fields.attendees = Some(
            Input::new()
                .with_prompt("  Attendees (skip)")
                .default(String::new())
                .show_default(false)
                .interact_text()?,
        );
    }
    Ok(fields)
}
