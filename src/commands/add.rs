use anyhow::{Context, Result};
use diary_core::event::{parse_date, parse_repeat, parse_time};
use diary_core::{DiaryConfig, DiaryResult, Event};
use dialoguer::{Confirm, Input};
use owo_colors::OwoColorize;

use crate::render::Render;

/// Raw answers from the add prompts.
struct EventInput {
    title: String,
    date: String,
    time: String,
    location: String,
    repeat: String,
}

pub fn run(config: &DiaryConfig) -> Result<()> {
    // Fail on a broken store before asking anything
    let mut store = super::open_store(config)?;

    let input = prompt(config)?;
    let event = build_event(&input, config)?;

    println!();
    println!("Please check your event's details:");
    println!("{}", event.render());
    println!();

    if event.timestamp < super::now() {
        tracing::warn!(title = %event.title, "adding an event in the past");
        println!("{}", "  Note: the event is in the past.".yellow());
    }

    let confirmed = Confirm::new()
        .with_prompt("  Add this event to the diary?")
        .default(true)
        .interact()?;

    if !confirmed {
        println!("{}", "Nothing added".dimmed());
        return Ok(());
    }

    let title = event.to_string();
    store.add(event);
    store
        .persist()
        .with_context(|| format!("Could not save {}", store.path().display()))?;

    println!("{}", format!("  Added: {}", title).green());
    Ok(())
}

fn prompt(config: &DiaryConfig) -> Result<EventInput> {
    // Input rejects empty answers unless allow_empty is set
    let title: String = Input::new().with_prompt("  Event title").interact_text()?;

    let date: String = Input::new()
        .with_prompt(format!("  Date ({})", format_hint(&config.date_format)))
        .interact_text()?;

    let time: String = Input::new()
        .with_prompt(format!("  Time ({})", format_hint(&config.time_format)))
        .interact_text()?;

    let location: String = Input::new()
        .with_prompt("  Location (optional)")
        .allow_empty(true)
        .interact_text()?;

    let repeat: String = Input::new()
        .with_prompt("  Repeat every N days (optional)")
        .allow_empty(true)
        .interact_text()?;

    Ok(EventInput {
        title,
        date,
        time,
        location,
        repeat,
    })
}

/// Validate the answers into an event. Nothing is written on error.
fn build_event(input: &EventInput, config: &DiaryConfig) -> DiaryResult<Event> {
    let date = parse_date(&input.date, &config.date_format)?;
    let time = parse_time(&input.time, &config.time_format)?;
    let repeat = parse_repeat(&input.repeat)?;

    Event::new(
        input.title.as_str(),
        date.and_time(time),
        Some(input.location.clone()),
        repeat,
    )
}

/// Turn a strftime format into a prompt hint, e.g. "%Y-%m-%d" -> "yyyy-mm-dd".
fn format_hint(format: &str) -> String {
    [
        ("%Y", "yyyy"),
        ("%m", "mm"),
        ("%d", "dd"),
        ("%H", "HH"),
        ("%M", "MM"),
        ("%S", "SS"),
    ]
    .iter()
    .fold(format.to_string(), |hint, &(spec, label)| {
        hint.replace(spec, label)
    })
}
