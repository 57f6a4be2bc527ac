use anyhow::Result;
use diary_core::{DateWindow, DiaryConfig, WindowPolicy};

use crate::render::{Render, window_summary};

pub fn run(config: &DiaryConfig, days: i64) -> Result<()> {
    let store = super::open_store(config)?;
    let window = DateWindow::from_offset(super::now(), days)?;

    let events = window.select(&store, WindowPolicy::ExpandRepeats);

    println!();
    println!("{}", window_summary(events.len(), days));
    println!();

    for event in &events {
        println!("{}", event.render());
    }

    Ok(())
}
