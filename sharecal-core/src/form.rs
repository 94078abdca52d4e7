//! Event form controller.
//!
//! The form holds raw text exactly as the user typed it. Everything is
//! normalized on save, so a malformed field never produces an invalid event.

use chrono::{NaiveDate, NaiveTime, TimeZone};

use crate::constants::{DEFAULT_DURATION_MINUTES, DEFAULT_TIME};
use crate::datetime::{local_to_utc, to_local};
use crate::error::{ShareCalError, ShareCalResult};
use crate::event::{Event, normalize_title, parse_attendees};
use crate::ports::Confirm;

/// Raw form fields
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventForm {
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub duration: String,
    pub description: String,
    /// Comma-separated email addresses
    pub attendees: String,
}

impl EventForm {
    /// Blank form for a new event on `date`
    pub fn open_create(date: NaiveDate) -> Self {
        EventForm {
            date: date.format("%Y-%m-%d").to_string(),
            time: DEFAULT_TIME.to_string(),
            duration: DEFAULT_DURATION_MINUTES.to_string(),
            ..Default::default()
        }
    }

    /// Form prefilled from `event`, with its start shown in `tz`
    pub fn open_edit<Tz: TimeZone>(event: &Event, tz: &Tz) -> Self {
        let local = to_local(event.start, tz);

        EventForm {
            title: event.title.clone(),
            date: local.format("%Y-%m-%d").to_string(),
            time: local.format("%H:%M").to_string(),
            duration: event.duration.to_string(),
            description: event.description.clone().unwrap_or_default(),
            attendees: event.attendees.join(", "),
        }
    }

    /// Build the event this form describes, under `id`
    pub fn to_event<Tz: TimeZone>(&self, id: String, tz: &Tz) -> ShareCalResult<Event> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|_| {
            ShareCalError::InvalidForm(format!(
                "Invalid date '{}'. Expected YYYY-MM-DD",
                self.date
            ))
        })?;
        let time = parse_time(&self.time)?;

        let description = self.description.trim();

        Ok(Event {
            id,
            title: normalize_title(&self.title),
            start: local_to_utc(date.and_time(time), tz),
            duration: parse_duration(&self.duration),
            description: (!description.is_empty()).then(|| description.to_string()),
            attendees: parse_attendees(&self.attendees),
        })
    }
}

/// Save the form into `events`.
///
/// With `editing_id` the matching event is replaced in place and keeps its
/// id. If that event has disappeared in the meantime the edit is appended
/// under the same id rather than dropped. Without `editing_id` a new event
/// with a fresh id is appended.
pub fn save<Tz: TimeZone>(
    form: &EventForm,
    editing_id: Option<&str>,
    events: &mut Vec<Event>,
    tz: &Tz,
) -> ShareCalResult<Event> {
    let id = editing_id.map_or_else(Event::new_id, str::to_string);
    let event = form.to_event(id, tz)?;

    match events.iter_mut().find(|e| e.id == event.id) {
        Some(existing) => *existing = event.clone(),
        None => events.push(event.clone()),
    }

    Ok(event)
}

/// Remove the event with `id` after the user confirms.
///
/// Returns whether anything was removed. Unknown ids are a no-op and do
/// not prompt.
pub fn delete_event(events: &mut Vec<Event>, id: &str, confirm: &impl Confirm) -> bool {
    let Some(event) = events.iter().find(|e| e.id == id) else {
        return false;
    };

    if !confirm.confirm(&format!("Delete \"{}\"?", event.title)) {
        return false;
    }

    remove_event(events, id)
}

/// Remove without asking; idempotent
pub fn remove_event(events: &mut Vec<Event>, id: &str) -> bool {
    let before = events.len();
    events.retain(|e| e.id != id);
    events.len() != before
}

/// Leading integer of `input` when positive, otherwise the default
pub fn parse_duration(input: &str) -> u32 {
    let digits: String = input
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();

    digits
        .parse::<u32>()
        .ok()
        .filter(|d| *d > 0)
        .unwrap_or(DEFAULT_DURATION_MINUTES)
}

fn parse_time(input: &str) -> ShareCalResult<NaiveTime> {
    let input = input.trim();
    let input = if input.is_empty() { DEFAULT_TIME } else { input };

    NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .map_err(|_| ShareCalError::InvalidForm(format!("Invalid time '{}'. Expected HH:MM", input)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_TITLE;
    use chrono::Utc;
    use chrono_tz::Asia::Tokyo;
    use std::cell::Cell;

    fn filled_form() -> EventForm {
        EventForm {
            title: "Sync".to_string(),
            date: "2024-03-15".to_string(),
            time: "09:00".to_string(),
            duration: "30".to_string(),
            description: "Weekly sync".to_string(),
            attendees: "alice@example.com, bob@example.com".to_string(),
        }
    }

    #[test]
    fn test_open_create_defaults() {
        let form = EventForm::open_create(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(form.date, "2024-03-15");
        assert_eq!(form.time, "09:00");
        assert_eq!(form.duration, "60");
        assert!(form.title.is_empty());
    }

    #[test]
    fn test_save_creates_event() {
        let mut events = Vec::new();
        let event = save(&filled_form(), None, &mut events, &Utc).unwrap();

        assert_eq!(events, vec![event.clone()]);
        assert_eq!(event.title, "Sync");
        assert_eq!(event.start, Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap());
        assert_eq!(event.duration, 30);
        assert_eq!(event.description.as_deref(), Some("Weekly sync"));
        assert_eq!(event.attendees, vec!["alice@example.com", "bob@example.com"]);
    }

    #[test]
    fn test_save_converts_local_time() {
        let mut events = Vec::new();
        let event = save(&filled_form(), None, &mut events, &Tokyo).unwrap();
        assert_eq!(event.start, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_empty_title_gets_placeholder() {
        let mut form = filled_form();
        form.title = "   ".to_string();
        let event = save(&form, None, &mut Vec::new(), &Utc).unwrap();
        assert_eq!(event.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_bad_duration_defaults_to_60() {
        for input in ["abc", "", "0", "-15"] {
            let mut form = filled_form();
            form.duration = input.to_string();
            let event = save(&form, None, &mut Vec::new(), &Utc).unwrap();
            assert_eq!(event.duration, 60, "input {:?}", input);
        }
        assert_eq!(parse_duration("45min"), 45);
        assert_eq!(parse_duration(" 90 "), 90);
    }

    #[test]
    fn test_blank_description_is_none() {
        let mut form = filled_form();
        form.description = "  \n".to_string();
        let event = save(&form, None, &mut Vec::new(), &Utc).unwrap();
        assert_eq!(event.description, None);
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let mut form = filled_form();
        form.date = "15/03/2024".to_string();
        let mut events = Vec::new();
        assert!(matches!(
            save(&form, None, &mut events, &Utc),
            Err(ShareCalError::InvalidForm(_))
        ));
        assert!(events.is_empty());
    }

    #[test]
    fn test_blank_time_uses_default() {
        let mut form = filled_form();
        form.time = String::new();
        let event = save(&form, None, &mut Vec::new(), &Utc).unwrap();
        assert_eq!(event.start, Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_edit_preserves_id_and_length() {
        let mut events = Vec::new();
        let first = save(&filled_form(), None, &mut events, &Utc).unwrap();
        let second = save(&filled_form(), None, &mut events, &Utc).unwrap();

        let mut form = EventForm::open_edit(&first, &Utc);
        assert_eq!(form.attendees, "alice@example.com, bob@example.com");
        form.title = "Renamed".to_string();
        form.time = "10:15".to_string();
        form.attendees = String::new();

        let edited = save(&form, Some(&first.id), &mut events, &Utc).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(edited.id, first.id);
        assert_eq!(events[0], edited);
        assert_eq!(events[1], second);
        assert_eq!(edited.title, "Renamed");
        assert_eq!(edited.start, Utc.with_ymd_and_hms(2024, 3, 15, 10, 15, 0).unwrap());
        assert!(edited.attendees.is_empty());
    }

    #[test]
    fn test_open_edit_round_trips_through_save() {
        let mut events = Vec::new();
        let original = save(&filled_form(), None, &mut events, &Tokyo).unwrap();

        let form = EventForm::open_edit(&original, &Tokyo);
        let resaved = save(&form, Some(&original.id), &mut events, &Tokyo).unwrap();

        assert_eq!(resaved, original);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut events = Vec::new();
        let event = save(&filled_form(), None, &mut events, &Utc).unwrap();

        assert!(!delete_event(&mut events, &event.id, &|_: &str| false));
        assert_eq!(events.len(), 1);

        assert!(delete_event(&mut events, &event.id, &|_: &str| true));
        assert!(events.is_empty());
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut events = Vec::new();
        save(&filled_form(), None, &mut events, &Utc).unwrap();
        let before = events.clone();

        let asked = Cell::new(false);
        let confirm = |_: &str| {
            asked.set(true);
            true
        };

        assert!(!delete_event(&mut events, "missing", &confirm));
        assert!(!asked.get());
        assert_eq!(events, before);
    }
}
