use anyhow::{Context, Result};
use diary_core::{DateWindow, DiaryConfig, WindowPolicy};
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::render::{Render, pluralize};

/// Delete every event whose stored time falls in the window.
///
/// Repeating events are matched on their first occurrence, so the whole
/// series goes.
pub fn run(config: &DiaryConfig, days: i64, assume_yes: bool) -> Result<()> {
    let mut store = super::open_store(config)?;
    let window = DateWindow::from_offset(super::now(), days)?;

    let matched = window.select(&store, WindowPolicy::MatchBase);

    if matched.is_empty() {
        println!("{}", "No events to delete".dimmed());
        return Ok(());
    }

    println!(
        "{} {} will be deleted:\n",
        matched.len(),
        pluralize("event", matched.len())
    );
    for event in &matched {
        println!("{}", event.render());
    }
    println!();

    if !assume_yes {
        let confirmed = Confirm::new()
            .with_prompt("  Delete these events?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Nothing deleted".dimmed());
            return Ok(());
        }
    }

    let removed = store.remove(|event| window.matches(event, WindowPolicy::MatchBase));
    store
        .persist()
        .with_context(|| format!("Could not save {}", store.path().display()))?;

    tracing::debug!(removed = removed.len(), remaining = store.len(), "deleted events");
    println!(
        "{}",
        format!("  Deleted {} {}", removed.len(), pluralize("event", removed.len())).red()
    );

    Ok(())
}
