//! Plain-text export of the whole diary, grouped by year.
//!
//! ```text
//! Diary saved on 2024-03-01 at 09:15:00
//!
//! 2024
//! ----
//! Wed, Mar 20
//! 15:00	Dentist, High street
//!
//! ```

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDateTime};

use crate::config::DiaryConfig;
use crate::error::DiaryResult;
use crate::event::Event;
use crate::store::write_atomic;

pub struct Reporter {
    path: PathBuf,
}

impl Reporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Reporter { path: path.into() }
    }

    pub fn from_config(config: &DiaryConfig) -> Self {
        Self::new(config.report_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render `events` (in any order) as report text.
    pub fn render<'a, I>(&self, events: I, saved_at: NaiveDateTime) -> String
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let mut sorted: Vec<&Event> = events.into_iter().collect();
        sorted.sort_by_key(|event| event.timestamp);

        let mut out = format!(
            "Diary saved on {} at {}\n\n",
            saved_at.format("%Y-%m-%d"),
            saved_at.format("%H:%M:%S")
        );

        for group in sorted.chunk_by(|a, b| a.timestamp.year() == b.timestamp.year()) {
            out.push_str(&format!("{}\n----\n", group[0].timestamp.year()));
            for event in group {
                out.push_str(&render_event(event));
            }
            out.push('\n');
        }

        out
    }

    /// Write the report, replacing any previous one. Returns the report path.
    pub fn write<'a, I>(&self, events: I, saved_at: NaiveDateTime) -> DiaryResult<&Path>
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let content = self.render(events, saved_at);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        write_atomic(&self.path, &content)?;

        tracing::info!(path = %self.path.display(), "wrote diary report");
        Ok(&self.path)
    }
}

fn render_event(event: &Event) -> String {
    let mut line = format!("{}\n{}\t{}", event.date_label(), event.time_label(), event);
    if let Some(repeat) = event.repeat_label() {
        line.push_str(&format!(" ({})", repeat));
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn empty_diary_is_header_only() {
        let events: Vec<Event> = Vec::new();
        let text = Reporter::new("unused").render(&events, at(2024, 3, 1, 9, 15));
        assert_eq!(text, "Diary saved on 2024-03-01 at 09:15:00\n\n");
    }

    #[test]
    fn groups_by_year_in_order() {
        let events = vec![
            Event::new("party", at(2025, 1, 1, 0, 30), None, None).unwrap(),
            Event::new("dentist", at(2024, 3, 20, 15, 0), Some("high street".into()), None)
                .unwrap(),
            Event::new("gym", at(2024, 3, 19, 7, 0), None, Some(7)).unwrap(),
        ];

        let text = Reporter::new("unused").render(&events, at(2024, 3, 1, 9, 15));

        assert_eq!(
            text,
            "Diary saved on 2024-03-01 at 09:15:00\n\n\
             2024\n----\n\
             Tue, Mar 19\n07:00\tGym (every week)\n\
             Wed, Mar 20\n15:00\tDentist, High street\n\
             \n\
             2025\n----\n\
             Wed, Jan 01\n00:30\tParty\n\
             \n"
        );
    }

    #[test]
    fn write_overwrites_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved_events");
        std::fs::write(&path, "old report").unwrap();

        let events = vec![Event::new("gym", at(2024, 3, 19, 7, 0), None, None).unwrap()];
        let reporter = Reporter::new(&path);
        let written = reporter.write(&events, at(2024, 3, 1, 9, 15)).unwrap();

        assert_eq!(written, path.as_path());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Diary saved on 2024-03-01"));
        assert!(content.contains("07:00\tGym"));
        assert!(!content.contains("old report"));
    }
}
