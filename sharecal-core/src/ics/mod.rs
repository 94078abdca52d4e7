//! Calendar document export and import, both built on the icalendar crate.

mod generate;
mod parse;

pub use generate::export_calendar_document;
pub use parse::{parse_calendar_document, unescape_text};

/// Basic UTC format used for DTSTART, DTEND and DTSTAMP
pub const UTC_BASIC_FORMAT: &str = "%Y%m%dT%H%M%SZ";
