pub mod add;
pub mod delete;
pub mod list;
pub mod save;

use anyhow::{Context, Result};
use diary_core::{DiaryConfig, EventStore};
use owo_colors::OwoColorize;

/// Open the configured events file, announcing when it is created.
pub fn open_store(config: &DiaryConfig) -> Result<EventStore> {
    let path = config.events_path();

    if !path.exists() {
        println!(
            "{}",
            format!("No events file at {}, creating it.", path.display()).dimmed()
        );
    }

    let store = EventStore::load(&path)
        .with_context(|| format!("Could not open events file {}", path.display()))?;
    Ok(store)
}

/// Current local time, which is what stored timestamps are compared against.
pub fn now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &std::path::Path) -> DiaryConfig {
        DiaryConfig {
            dir: dir.to_path_buf(),
            ..DiaryConfig::default()
        }
    }

    #[test]
    fn open_store_creates_empty_events_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let store = open_store(&config).unwrap();

        assert!(store.is_empty());
        assert_eq!(store.path(), dir.path().join("events.json"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("events.json")).unwrap(),
            "[]\n"
        );
    }

    #[test]
    fn open_store_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(config.events_path(), "not json").unwrap();

        let err = open_store(&config).unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.contains("Could not open events file"));
        assert!(message.contains("not a valid events file"));
    }
}
