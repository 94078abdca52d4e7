/// Title used when an event is saved without one
pub const DEFAULT_TITLE: &str = "(No title)";

/// Event length in minutes when none (or an invalid one) is given
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// Time preselected in a freshly opened create form
pub const DEFAULT_TIME: &str = "09:00";

/// Namespaced storage key holding the serialized event list
pub const STORAGE_KEY: &str = "sharecal.events";

/// Query parameter carrying a shared snapshot
pub const SHARE_PARAM: &str = "data";

/// Share links longer than this may be truncated by browsers and mail clients
pub const MAX_PORTABLE_URL_LEN: usize = 2048;

/// Suffix appended to event ids to form ICS UIDs
pub const UID_DOMAIN: &str = "sharecal.local";

/// Fixed name of the exported calendar file
pub const EXPORT_FILENAME: &str = "calendar.ics";

/// MIME type of the exported calendar file
pub const EXPORT_MIME_TYPE: &str = "text/calendar";
