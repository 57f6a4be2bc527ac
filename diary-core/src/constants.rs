/// Default number of days shown when no window is given.
pub const DEFAULT_DAYS: i64 = 7;

pub const DEFAULT_DIARY_DIR: &str = "~/.diary";
pub const DEFAULT_EVENTS_FILE: &str = "events.json";
pub const DEFAULT_REPORT_FILE: &str = "saved_events";

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";
