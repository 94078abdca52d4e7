use anyhow::{Context as _, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use owo_colors::OwoColorize;
use sharecal_core::Event;
use sharecal_core::config::SharecalConfig;
use sharecal_core::storage::FileStore;
use sharecal_core::store::Store;
use url::Url;

/// Everything a command needs: config, the opened store and "today"
pub struct Context {
    pub config: SharecalConfig,
    pub store: Store<FileStore, Tz>,
    pub today: NaiveDate,
}

impl Context {
    pub fn open(shared: Option<&Url>) -> Result<Self> {
        let config = SharecalConfig::load()?;
        let tz = resolve_timezone(&config)?;
        let today = Utc::now().with_timezone(&tz).date_naive();
        let store = Store::open(FileStore::new(config.data_path()?), shared, tz, today)
            .context("Failed to load events")?;

        tracing::debug!(
            data_dir = %store.storage().dir().display(),
            timezone = %store.tz(),
            "store opened"
        );

        if store.from_snapshot() {
            eprintln!(
                "{}",
                format!(
                    "Loaded {} events from the shared link (replacing your local calendar)",
                    store.events().len()
                )
                .yellow()
            );
        } else if shared.is_some() {
            eprintln!(
                "{}",
                "The shared link has no readable calendar; using your local events".yellow()
            );
        }

        Ok(Context {
            config,
            store,
            today,
        })
    }

    pub fn tz(&self) -> &Tz {
        self.store.tz()
    }

    /// Find an event by exact id or by a unique id prefix
    pub fn resolve_event(&self, id: &str) -> Result<&Event> {
        resolve_event(self.store.events(), id)
    }
}

/// Configured zone, else the system zone, else UTC
pub fn resolve_timezone(config: &SharecalConfig) -> Result<Tz> {
    if let Some(tz) = config.timezone()? {
        return Ok(tz);
    }

    match iana_time_zone::get_timezone() {
        Ok(name) => match name.parse::<Tz>() {
            Ok(tz) => Ok(tz),
            Err(_) => {
                tracing::warn!(zone = %name, "unknown system timezone, using UTC");
                Ok(Tz::UTC)
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "could not determine system timezone, using UTC");
            Ok(Tz::UTC)
        }
    }
}

pub fn resolve_event<'a>(events: &'a [Event], id: &str) -> Result<&'a Event> {
    if let Some(event) = events.iter().find(|e| e.id == id) {
        return Ok(event);
    }

    let matches: Vec<&Event> = events.iter().filter(|e| e.id.starts_with(id)).collect();
    match matches.as_slice() {
        [event] => Ok(event),
        [] => anyhow::bail!("No event with id '{}'", id),
        _ => anyhow::bail!(
            "Id '{}' is ambiguous ({} events match). Use more characters.",
            id,
            matches.len()
        ),
    }
}

/// Parse a `YYYY-MM-DD` argument, defaulting to `today`
pub fn parse_date_arg(date: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}'. Expected YYYY-MM-DD", s)),
        None => Ok(today),
    }
}
