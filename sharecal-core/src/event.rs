//! Calendar event types.
//!
//! `Event` is the only thing sharecal persists. `EventRecord` is its lenient
//! twin, used when reading data that sharecal did not write itself (shared
//! snapshots, imported .ics files) and normalized into `Event`s before use.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DURATION_MINUTES, DEFAULT_TITLE};

/// A calendar event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Opaque unique id, stable for the event's lifetime
    pub id: String,
    pub title: String,
    /// Start instant, serialized as RFC 3339 in UTC
    pub start: DateTime<Utc>,
    /// Length in minutes, always > 0
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub attendees: Vec<String>,
}

impl Event {
    pub fn new_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.start + Duration::minutes(i64::from(self.duration))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// An event-shaped record from an untrusted source.
///
/// Only `start` is required; everything else is filled in by [`normalize_records`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attendees: Vec<String>,
}

impl From<Event> for EventRecord {
    fn from(event: Event) -> Self {
        EventRecord {
            id: Some(event.id),
            title: Some(event.title),
            start: event.start,
            duration: Some(i64::from(event.duration)),
            description: event.description,
            attendees: event.attendees,
        }
    }
}

/// Turn records into events that satisfy every `Event` invariant.
///
/// Records without an id, or whose id was already taken by an earlier
/// record, get a fresh one. A list of valid events comes back unchanged.
pub fn normalize_records(records: Vec<EventRecord>) -> Vec<Event> {
    let mut seen: HashSet<String> = HashSet::new();

    records
        .into_iter()
        .map(|record| {
            let id = match record.id {
                Some(id) if !id.trim().is_empty() && !seen.contains(&id) => id,
                _ => Event::new_id(),
            };
            seen.insert(id.clone());

            Event {
                id,
                title: record
                    .title
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
                start: record.start,
                duration: record
                    .duration
                    .and_then(|d| u32::try_from(d).ok())
                    .filter(|d| *d > 0)
                    .unwrap_or(DEFAULT_DURATION_MINUTES),
                description: record.description,
                attendees: record
                    .attendees
                    .iter()
                    .filter_map(|a| normalize_attendee(a))
                    .collect(),
            }
        })
        .collect()
}

/// Trimmed title, or the placeholder when nothing is left
pub fn normalize_title(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Split comma-separated addresses, dropping blanks
pub fn parse_attendees(input: &str) -> Vec<String> {
    input.split(',').filter_map(normalize_attendee).collect()
}

/// Trimmed address, or `None` when it is blank or contains control
/// characters (a line break would end the ATTENDEE content line early)
pub fn normalize_attendee(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_control) {
        return None;
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: Option<&str>) -> EventRecord {
        EventRecord {
            id: id.map(str::to_string),
            title: Some("Standup".to_string()),
            start: Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap(),
            duration: Some(15),
            description: None,
            attendees: vec![],
        }
    }

    #[test]
    fn test_end_adds_duration() {
        let event = normalize_records(vec![record(Some("a"))]).remove(0);
        assert_eq!(
            event.end(),
            Utc.with_ymd_and_hms(2024, 3, 15, 9, 15, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_attendees_trims_and_drops_empty() {
        assert_eq!(
            parse_attendees(" alice@example.com, ,bob@example.com ,,"),
            vec!["alice@example.com", "bob@example.com"]
        );
        assert!(parse_attendees("   ").is_empty());
    }

    #[test]
    fn test_attendees_with_control_characters_are_dropped() {
        assert_eq!(
            parse_attendees("a@example.com\nBEGIN:VALARM, b@example.com"),
            vec!["b@example.com"]
        );

        let mut r = record(Some("a"));
        r.attendees = vec!["a@x.com\nb".to_string(), "c@x.com\r".to_string(), "d@x.com".to_string()];
        let event = normalize_records(vec![r]).remove(0);
        assert_eq!(event.attendees, vec!["c@x.com", "d@x.com"]);
    }

    #[test]
    fn test_normalize_assigns_missing_and_duplicate_ids() {
        let events = normalize_records(vec![record(None), record(Some("x")), record(Some("x"))]);

        assert!(!events[0].id.is_empty());
        assert_eq!(events[1].id, "x");
        assert_ne!(events[2].id, "x");

        let unique: HashSet<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_normalize_fixes_title_and_duration() {
        let mut r = record(Some("a"));
        r.title = Some("   ".to_string());
        r.duration = Some(-5);
        r.attendees = vec![" carol@example.com ".to_string(), String::new()];

        let event = normalize_records(vec![r]).remove(0);
        assert_eq!(event.title, DEFAULT_TITLE);
        assert_eq!(event.duration, DEFAULT_DURATION_MINUTES);
        assert_eq!(event.attendees, vec!["carol@example.com"]);
    }

    #[test]
    fn test_valid_events_normalize_unchanged() {
        let event = Event {
            id: "keep-me".to_string(),
            title: "Review".to_string(),
            start: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 0).unwrap(),
            duration: 45,
            description: Some(String::new()),
            attendees: vec!["dan@example.com".to_string()],
        };

        let normalized = normalize_records(vec![EventRecord::from(event.clone())]);
        assert_eq!(normalized, vec![event]);
    }
}
