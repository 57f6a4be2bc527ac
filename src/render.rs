//! Colored terminal rendering for diary types.

use diary_core::Event;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Underlined date on its own line, then `time<TAB>Title, Location`.
impl Render for Event {
    fn render(&self) -> String {
        let mut out = format!(
            "{}\n{}\t{}",
            self.date_label().underline(),
            self.time_label(),
            self
        );
        if let Some(repeat) = self.repeat_label() {
            out.push_str(&format!(" {}", format!("({})", repeat).dimmed()));
        }
        out
    }
}

/// "You have 3 events in the coming week."
pub fn window_summary(count: usize, days: i64) -> String {
    let span = match days {
        0 => "right now".to_string(),
        1 => "in the next day".to_string(),
        7 => "in the coming week".to_string(),
        30 => "in the coming month".to_string(),
        365 => "in the coming year".to_string(),
        -1 => "in the past day".to_string(),
        d if d < 0 => format!("in the past {} days", d.unsigned_abs()),
        d => format!("in the next {} days", d),
    };

    format!("You have {} {} {}.", count, pluralize("event", count), span)
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
