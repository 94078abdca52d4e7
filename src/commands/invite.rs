use anyhow::Result;
use owo_colors::OwoColorize;
use sharecal_core::invite::compose_invite;
use sharecal_core::ports::MailClient;

use crate::context::Context;
use crate::platform::OpenMailClient;

pub fn run(ctx: &Context, id: &str, open: bool) -> Result<()> {
    let event = ctx.resolve_event(id)?;
    let draft = compose_invite(event, ctx.tz());

    if draft.recipients.is_empty() {
        eprintln!("{}", "This event has no attendees; the draft has no recipients.".yellow());
    }

    let mailto = draft.to_mailto();

    if open {
        OpenMailClient.open_draft(&mailto)?;
        println!("{}", format!("  Opened invite for {}", event.title).green());
    } else {
        println!("{}", "To:".bold());
        println!("  {}", draft.recipients.join(", "));
        println!("{}", "Subject:".bold());
        println!("  {}", draft.subject);
        println!("{}", "Body:".bold());
        for line in draft.body.lines() {
            println!("  {}", line);
        }
        println!();
        println!("{}", mailto.dimmed());
    }

    Ok(())
}
