//! ICS document generation.

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, Property};

use super::UTC_BASIC_FORMAT;
use crate::constants::UID_DOMAIN;
use crate::event::{Event, normalize_attendee};

const PRODID: &str = "-//sharecal//sharecal 1.0//EN";

/// Render all events as one VCALENDAR document.
///
/// `generated_at` becomes every event's DTSTAMP. The icalendar crate
/// escapes TEXT values, folds long lines and ends every line with CRLF.
pub fn export_calendar_document(events: &[Event], generated_at: DateTime<Utc>) -> String {
    let mut cal = Calendar::empty();
    cal.append_property(Property::new("VERSION", "2.0"));
    cal.append_property(Property::new("PRODID", PRODID));
    cal.append_property(Property::new("CALSCALE", "GREGORIAN"));
    cal.append_property(Property::new("METHOD", "PUBLISH"));

    for event in events {
        cal.push(to_ics_event(event, generated_at));
    }

    cal.done().to_string()
}

fn to_ics_event(event: &Event, generated_at: DateTime<Utc>) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&format!("{}@{}", event.id, UID_DOMAIN));
    ics_event.add_property("DTSTAMP", generated_at.format(UTC_BASIC_FORMAT).to_string());
    ics_event.add_property("DTSTART", event.start.format(UTC_BASIC_FORMAT).to_string());
    ics_event.add_property("DTEND", event.end().format(UTC_BASIC_FORMAT).to_string());
    ics_event.summary(&unify_newlines(&event.title));

    if let Some(desc) = event.description.as_deref().filter(|d| !d.is_empty()) {
        ics_event.description(&unify_newlines(desc));
    }

    // ATTENDEE is a CAL-ADDRESS, which the crate writes unescaped
    for attendee in event.attendees.iter().filter_map(|a| normalize_attendee(a)) {
        ics_event.append_multi_property(Property::new("ATTENDEE", format!("mailto:{}", attendee)));
    }

    ics_event.done()
}

/// The crate escapes `\n` only, so CR and CRLF become LF first
fn unify_newlines(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\r', "\n")
}
