//! ICS import using the icalendar crate's parser.

use chrono::{DateTime, TimeZone, Utc};
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

use crate::constants::UID_DOMAIN;
use crate::datetime::{local_to_utc, start_of_day};
use crate::error::{ShareCalError, ShareCalResult};
use crate::event::EventRecord;

/// Read every VEVENT in `content` into an event record.
///
/// Floating times are read as wall-clock time in `tz`, as are all-day
/// events (which start at local midnight). Events without a usable DTSTART
/// are skipped.
pub fn parse_calendar_document<Tz: TimeZone>(
    content: &str,
    tz: &Tz,
) -> ShareCalResult<Vec<EventRecord>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| ShareCalError::IcsParse(e.to_string()))?;

    let mut vevents = Vec::new();
    collect_vevents(&calendar.components, &mut vevents);

    let records = vevents
        .into_iter()
        .filter_map(|vevent| {
            let record = parse_vevent(vevent, tz);
            if record.is_none() {
                tracing::warn!(
                    uid = vevent.find_prop("UID").map(|p| p.val.as_ref()),
                    "skipping VEVENT without a usable DTSTART"
                );
            }
            record
        })
        .collect();

    Ok(records)
}

fn collect_vevents<'a, 'c>(components: &'c [Component<'a>], out: &mut Vec<&'c Component<'a>>) {
    for component in components {
        if component.name == "VEVENT" {
            out.push(component);
        } else if component.name == "VCALENDAR" {
            collect_vevents(&component.components, out);
        }
    }
}

fn parse_vevent<Tz: TimeZone>(vevent: &Component, tz: &Tz) -> Option<EventRecord> {
    let start = to_utc(DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?, tz)?;

    let end = vevent
        .find_prop("DTEND")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
        .and_then(|dpt| to_utc(dpt, tz));
    let duration = end.map(|end| (end - start).num_minutes());

    let id = vevent.find_prop("UID").map(|p| {
        let uid = p.val.as_ref();
        uid.strip_suffix(&format!("@{}", UID_DOMAIN))
            .unwrap_or(uid)
            .to_string()
    });

    let title = vevent
        .find_prop("SUMMARY")
        .map(|p| unescape_text(p.val.as_ref()));
    let description = vevent
        .find_prop("DESCRIPTION")
        .map(|p| unescape_text(p.val.as_ref()));

    // ATTENDEE (multi-property - can appear multiple times)
    let attendees = vevent
        .properties
        .iter()
        .filter(|p| p.name == "ATTENDEE")
        .map(|p| {
            let val = p.val.as_ref();
            val.strip_prefix("mailto:")
                .or_else(|| val.strip_prefix("MAILTO:"))
                .unwrap_or(val)
                .to_string()
        })
        .collect();

    Some(EventRecord {
        id,
        title,
        start,
        duration,
        description,
        attendees,
    })
}

/// Resolve any DTSTART/DTEND form to an instant
fn to_utc<Tz: TimeZone>(dpt: DatePerhapsTime, tz: &Tz) -> Option<DateTime<Utc>> {
    match dpt {
        DatePerhapsTime::Date(d) => Some(start_of_day(d, tz)),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => Some(dt),
            CalendarDateTime::Floating(naive) => Some(local_to_utc(naive, tz)),
            CalendarDateTime::WithTimezone { date_time, tzid } => {
                match tzid.parse::<chrono_tz::Tz>() {
                    Ok(zone) => Some(local_to_utc(date_time, &zone)),
                    Err(_) => {
                        tracing::debug!(%tzid, "unknown TZID, reading as local time");
                        Some(local_to_utc(date_time, tz))
                    }
                }
            }
        },
    }
}

/// Undo TEXT escaping (`\\`, `\;`, `\,`, `\n`, `\N`)
pub fn unescape_text(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => unescaped.push('\n'),
            Some(other) => unescaped.push(other),
            None => unescaped.push('\\'),
        }
    }

    unescaped
}
