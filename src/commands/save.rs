use anyhow::{Context, Result};
use diary_core::{DiaryConfig, Reporter};
use owo_colors::OwoColorize;

pub fn run(config: &DiaryConfig) -> Result<()> {
    let store = super::open_store(config)?;
    let reporter = Reporter::from_config(config);

    let path = reporter
        .write(&store, super::now())
        .with_context(|| format!("Could not save diary to {}", reporter.path().display()))?;

    println!(
        "{}",
        format!("Diary successfully written to {}.", path.display()).green()
    );
    Ok(())
}
