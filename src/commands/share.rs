use anyhow::Result;
use owo_colors::OwoColorize;
use sharecal_core::constants::MAX_PORTABLE_URL_LEN;
use sharecal_core::ports::Clipboard;
use sharecal_core::share::make_share_link;
use url::Url;

use crate::context::Context;
use crate::platform::CommandClipboard;

pub fn run(ctx: &Context, base_url: Option<Url>) -> Result<()> {
    let base = match base_url {
        Some(url) => url,
        None => ctx.config.share_base_url()?,
    };

    let link = make_share_link(&base, ctx.store.events())?;
    let link = link.as_str();

    println!("{}", link);

    if link.len() > MAX_PORTABLE_URL_LEN {
        eprintln!(
            "{}",
            format!(
                "Warning: this link is {} characters long; some browsers and mail clients cut links over {}.",
                link.len(),
                MAX_PORTABLE_URL_LEN
            )
            .yellow()
        );
    }
    eprintln!(
        "{}",
        "Anyone with this link can read every event in it.".dimmed()
    );

    match CommandClipboard.write_text(link) {
        Ok(()) => eprintln!("{}", "Copied to clipboard".green()),
        Err(e) => {
            tracing::debug!(error = %e, "clipboard copy failed");
            eprintln!("{}", "Copy the link above to share your calendar.".yellow());
        }
    }

    Ok(())
}
