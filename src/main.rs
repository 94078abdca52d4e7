mod commands;
mod context;
mod platform;
mod render;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use url::Url;

use crate::context::Context;

#[derive(Parser)]
#[command(name = "sharecal")]
#[command(about = "A personal calendar you can share as a link or export as .ics")]
struct Cli {
    /// Open a shared calendar link; its events replace your local ones
    #[arg(long, global = true, value_name = "URL")]
    shared: Option<Url>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Calendar(CalendarCommand),
    /// Show or change configuration
    Config {
        /// Set the IANA timezone (e.g. "Europe/Berlin")
        #[arg(long)]
        timezone: Option<String>,

        /// Set the page share links point at
        #[arg(long)]
        share_base_url: Option<Url>,
    },
}

/// Commands that work on the event store
#[derive(Subcommand)]
enum CalendarCommand {
    /// Show a month as a 6-week grid
    Month {
        /// Any date in the month to show (YYYY-MM-DD). Defaults to today.
        date: Option<String>,

        /// Go back this many months
        #[arg(long, default_value_t = 0, conflicts_with = "next")]
        prev: u32,

        /// Go forward this many months
        #[arg(long, default_value_t = 0)]
        next: u32,
    },
    /// List the events of one day
    Day {
        /// Date (YYYY-MM-DD). Defaults to today.
        date: Option<String>,
    },
    /// Create an event
    Add(EventFields),
    /// Change an event; only the given fields are replaced
    Edit {
        /// Event id (any unique prefix)
        id: String,

        #[command(flatten)]
        fields: EventFields,
    },
    /// Delete an event
    Delete {
        /// Event id (any unique prefix)
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Print a link containing the whole calendar and copy it to the clipboard
    Share {
        /// Page the link should point at (defaults to share_base_url from the config)
        #[arg(long)]
        base_url: Option<Url>,
    },
    /// Write all events to calendar.ics
    Export {
        /// Directory to write into. Defaults to the current directory.
        #[arg(short, long)]
        out: Option<std::path::PathBuf>,
    },
    /// Build a mail draft inviting an event's attendees
    Invite {
        /// Event id (any unique prefix)
        id: String,

        /// Open the draft in the default mail client
        #[arg(long)]
        open: bool,
    },
    /// Add the events of an .ics file
    Import {
        file: std::path::PathBuf,
    },
}

/// Event form fields as flags
#[derive(Args, Debug, Default)]
pub struct EventFields {
    #[arg(short, long)]
    pub title: Option<String>,

    /// Date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Start time (HH:MM)
    #[arg(long)]
    pub time: Option<String>,

    /// Length in minutes
    #[arg(long)]
    pub duration: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Comma-separated email addresses
    #[arg(short, long)]
    pub attendees: Option<String>,
}

fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();

    match cli.command {
        // Config works without opening the store
        Commands::Config {
            timezone,
            share_base_url,
        } => commands::config::run(timezone, share_base_url),
        Commands::Calendar(command) => {
            let mut ctx = Context::open(cli.shared.as_ref())?;
            run_calendar_command(&mut ctx, command)
        }
    }
}

fn run_calendar_command(ctx: &mut Context, command: CalendarCommand) -> Result<()> {
    match command {
        CalendarCommand::Month { date, prev, next } => commands::month::run(ctx, date, prev, next),
        CalendarCommand::Day { date } => commands::day::run(ctx, date),
        CalendarCommand::Add(fields) => commands::add::run(ctx, fields),
        CalendarCommand::Edit { id, fields } => commands::edit::run(ctx, &id, fields),
        CalendarCommand::Delete { id, yes } => commands::delete::run(ctx, &id, yes),
        CalendarCommand::Share { base_url } => commands::share::run(ctx, base_url),
        CalendarCommand::Export { out } => commands::export::run(ctx, out),
        CalendarCommand::Invite { id, open } => commands::invite::run(ctx, &id, open),
        CalendarCommand::Import { file } => commands::import::run(ctx, &file),
    }
}

/// Log to stderr, filtered by RUST_LOG (warnings only by default)
fn init_logging() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {}", e))?;

    Ok(())
}
