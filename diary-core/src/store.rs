//! JSON-array event store.
//!
//! The whole collection lives in one file holding a JSON array of events.
//! Writes go to a sibling `.tmp` file which is then renamed over the store, so
//! a failed write never leaves a truncated array behind.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{DiaryError, DiaryResult};
use crate::event::Event;

const EMPTY_STORE: &str = "[]\n";

#[derive(Debug)]
pub struct EventStore {
    path: PathBuf,
    events: Vec<Event>,
    dirty: bool,
}

impl EventStore {
    /// Load the store at `path`, creating an empty one if the file is missing.
    ///
    /// A file that is not a JSON array of well-formed events is reported as
    /// `CorruptStore` and left untouched.
    pub fn load(path: impl Into<PathBuf>) -> DiaryResult<Self> {
        let path = path.into();

        if path.is_dir() {
            return Err(DiaryError::Io(std::io::Error::other(format!(
                "{} is a directory, expected an events file",
                path.display()
            ))));
        }

        if !path.exists() {
            tracing::info!(path = %path.display(), "events file not found, creating it");
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            write_atomic(&path, EMPTY_STORE)?;
            return Ok(EventStore {
                path,
                events: Vec::new(),
                dirty: false,
            });
        }

        let content = std::fs::read(&path)?;
        let events = parse_events(&content).map_err(|reason| DiaryError::CorruptStore {
            path: path.clone(),
            reason,
        })?;

        tracing::debug!(path = %path.display(), count = events.len(), "loaded events");

        Ok(EventStore {
            path,
            events,
            dirty: false,
        })
    }

    /// Write the full collection back to disk.
    pub fn persist(&mut self) -> DiaryResult<()> {
        let mut content = serde_json::to_string_pretty(&self.events)
            .map_err(|e| DiaryError::Serialization(e.to_string()))?;
        content.push('\n');

        write_atomic(&self.path, &content)?;
        self.dirty = false;

        tracing::debug!(path = %self.path.display(), count = self.events.len(), "persisted events");
        Ok(())
    }

    pub fn add(&mut self, event: Event) {
        self.events.push(event);
        self.dirty = true;
    }

    /// Remove every event matching `predicate`, returning the removed events
    /// in their stored order.
    pub fn remove<F>(&mut self, mut predicate: F) -> Vec<Event>
    where
        F: FnMut(&Event) -> bool,
    {
        let (removed, kept): (Vec<Event>, Vec<Event>) =
            self.events.drain(..).partition(|event| predicate(event));
        self.events = kept;

        if !removed.is_empty() {
            self.dirty = true;
        }
        removed
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether there are changes not yet persisted.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<'a> IntoIterator for &'a EventStore {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Parse and validate the store contents.
fn parse_events(content: &[u8]) -> Result<Vec<Event>, String> {
    let value: serde_json::Value =
        serde_json::from_slice(content).map_err(|e| format!("invalid JSON ({})", e))?;

    let serde_json::Value::Array(items) = value else {
        return Err("top-level value is not a JSON array".to_string());
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let event: Event = serde_json::from_value(item)
                .map_err(|e| format!("event #{} is malformed ({})", index + 1, e))?;
            event
                .validate()
                .map_err(|e| format!("event #{} is invalid ({})", index + 1, e))?;
            Ok(event)
        })
        .collect()
}

/// Replace `path` with `content` via a temp file and rename.
pub(crate) fn write_atomic(path: &Path, content: &str) -> DiaryResult<()> {
    let temp = temp_path_for(path);

    let write = || -> std::io::Result<()> {
        let mut file = File::create(&temp)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        std::fs::rename(&temp, path)?;
        sync_parent(path)
    };

    write().map_err(|source| {
        let _ = std::fs::remove_file(&temp);
        DiaryError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Flush the directory entry so the rename survives a crash.
#[cfg(unix)]
fn sync_parent(path: &Path) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    File::open(parent)?.sync_all()
}

#[cfg(not(unix))]
fn sync_parent(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
